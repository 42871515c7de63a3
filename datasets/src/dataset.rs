use std::fs::File;
use std::io::{Read, Write};
use std::ops::Range;
use std::path::Path;

use clusterview::dataset::Records;
use clusterview::{ClusterId, Dataset};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use ndarray::{Array1, Array2};

use crate::error::{DatasetError, Result};

/// Dimensionality of the points written by the clustering tools
pub const FEATURE_DIM: usize = 8;

/// Column layout of a cluster file
///
/// The default layout matches the files written by the clustering tools: the label in column
/// 1 and [`FEATURE_DIM`] coordinates in columns 2 to 9.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvLayout {
    delimiter: u8,
    label_column: usize,
    feature_columns: Range<usize>,
}

impl Default for CsvLayout {
    fn default() -> Self {
        CsvLayout {
            delimiter: b',',
            label_column: 1,
            feature_columns: 2..2 + FEATURE_DIM,
        }
    }
}

impl CsvLayout {
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn label_column(mut self, column: usize) -> Self {
        self.label_column = column;
        self
    }

    pub fn feature_columns(mut self, columns: Range<usize>) -> Self {
        self.feature_columns = columns;
        self
    }

    /// Minimal number of columns every data row must have
    pub fn min_columns(&self) -> usize {
        self.feature_columns.end.max(self.label_column + 1)
    }

    /// Parse a cluster file into a dataset of points and their labels
    ///
    /// The first row is dropped unconditionally. Records may have a varying number of fields,
    /// columns past the feature range are ignored.
    pub fn read<R: Read>(&self, reader: R) -> Result<Dataset<f64, ClusterId>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .delimiter(self.delimiter)
            .from_reader(reader);

        let nfeatures = self.feature_columns.len();
        let mut values = Vec::new();
        let mut labels = Vec::new();
        let mut nrows = 0;

        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            nrows += 1;
            // header
            if idx == 0 {
                continue;
            }

            let row = record.position().map_or(idx as u64 + 1, |pos| pos.line());
            self.parse_row(&record, row, &mut values, &mut labels)?;
        }

        if nrows < 2 {
            return Err(DatasetError::NotEnoughRows(nrows));
        }

        let records = Array2::from_shape_vec((labels.len(), nfeatures), values)?;
        let feature_names = (0..nfeatures).map(|i| format!("x{}", i)).collect();

        log::debug!(
            "parsed {} rows with {} features",
            records.nsamples(),
            records.nfeatures()
        );

        Ok(Dataset::try_new(records, Array1::from(labels))?.with_feature_names(feature_names))
    }

    fn parse_row(
        &self,
        record: &StringRecord,
        row: u64,
        values: &mut Vec<f64>,
        labels: &mut Vec<ClusterId>,
    ) -> Result<()> {
        if record.len() < self.min_columns() {
            return Err(DatasetError::NotEnoughColumns {
                row,
                found: record.len(),
                expected: self.min_columns(),
            });
        }

        for column in self.feature_columns.clone() {
            let field = &record[column];
            let value = field
                .parse::<f64>()
                .map_err(|_| DatasetError::InvalidNumber {
                    row,
                    column,
                    value: field.to_string(),
                })?;
            values.push(value);
        }

        // parsing a label never fails, unparsable ids are kept as names
        let label = record[self.label_column]
            .parse::<ClusterId>()
            .unwrap_or_else(|never| match never {});
        labels.push(label);

        Ok(())
    }
}

/// Read a cluster file from disk with the default layout
pub fn load_clusters<P: AsRef<Path>>(path: P) -> Result<Dataset<f64, ClusterId>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    CsvLayout::default().read(file)
}

/// Read a cluster file from any reader with a custom layout
pub fn load_clusters_with<R: Read>(reader: R, layout: &CsvLayout) -> Result<Dataset<f64, ClusterId>> {
    layout.read(reader)
}

/// Write a dataset in the layout produced by the clustering tools
///
/// The header is `i,cluster id`, every row starts with its index and label and continues with
/// the right-aligned coordinates.
pub fn write_clusters<W: Write>(writer: W, dataset: &Dataset<f64, ClusterId>) -> Result<()> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(writer);

    writer.write_record(&["i", "cluster id"])?;
    for (i, (point, label)) in dataset
        .records()
        .rows()
        .into_iter()
        .zip(dataset.targets().iter())
        .enumerate()
    {
        let mut row = vec![i.to_string(), label.to_string()];
        row.extend(point.iter().map(|c| format!("{:>8.4}", c)));
        writer.write_record(&row)?;
    }
    writer.flush().map_err(csv::Error::from)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use std::io::Write;

    const HEADER: &str = "i,cluster id\n";

    fn row(i: usize, label: &str, offset: f64) -> String {
        let coords = (0..FEATURE_DIM)
            .map(|c| format!("{:>8.4}", offset + c as f64))
            .collect::<Vec<_>>()
            .join(",");
        format!("{},{},{}\n", i, label, coords)
    }

    #[test]
    fn drops_header_and_splits_columns() {
        let input = format!("{}{}{}{}", HEADER, row(0, "3", 0.), row(1, "-1", 1.), row(2, "3", 2.));
        let dataset = CsvLayout::default().read(input.as_bytes()).unwrap();

        assert_eq!(dataset.nsamples(), 3);
        assert_eq!(dataset.nfeatures(), FEATURE_DIM);
        assert_eq!(
            dataset.targets(),
            &array![ClusterId::Id(3), ClusterId::NOISE, ClusterId::Id(3)]
        );
        assert_abs_diff_eq!(
            dataset.records().row(1),
            array![1., 2., 3., 4., 5., 6., 7., 8.]
        );
        assert_eq!(dataset.feature_names()[7], "x7");
    }

    #[test]
    fn header_is_dropped_even_if_it_looks_like_data() {
        let input = format!("{}{}", row(0, "1", 0.), row(1, "2", 0.));
        let dataset = CsvLayout::default().read(input.as_bytes()).unwrap();
        assert_eq!(dataset.nsamples(), 1);
        assert_eq!(dataset.targets()[0], ClusterId::Id(2));
    }

    #[test]
    fn extra_columns_are_ignored() {
        let input = format!("{}0,1,1,2,3,4,5,6,7,8,99,100\n", HEADER);
        let dataset = CsvLayout::default().read(input.as_bytes()).unwrap();
        assert_eq!(dataset.records().row(0).to_vec(), vec![1., 2., 3., 4., 5., 6., 7., 8.]);
    }

    #[test]
    fn header_only_is_rejected() {
        let err = CsvLayout::default().read(HEADER.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::NotEnoughRows(1)));

        let err = CsvLayout::default().read("".as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::NotEnoughRows(0)));
    }

    #[test]
    fn short_rows_are_rejected() {
        let input = format!("{}{}0,1,1,2,3\n", HEADER, row(0, "1", 0.));
        let err = CsvLayout::default().read(input.as_bytes()).unwrap_err();
        match err {
            DatasetError::NotEnoughColumns {
                row,
                found,
                expected,
            } => {
                assert_eq!(row, 3);
                assert_eq!(found, 5);
                assert_eq!(expected, 10);
            }
            other => panic!("unexpected error {}", other),
        }
    }

    #[test]
    fn non_numeric_features_are_rejected() {
        let input = format!("{}0,1,1,2,three,4,5,6,7,8\n", HEADER);
        let err = CsvLayout::default().read(input.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InvalidNumber { row: 2, column: 4, .. }
        ));
    }

    #[test]
    fn named_labels_are_kept() {
        let input = format!("{}{}", HEADER, row(0, "granite", 0.));
        let dataset = CsvLayout::default().read(input.as_bytes()).unwrap();
        assert_eq!(dataset.targets()[0], ClusterId::Name("granite".into()));
    }

    #[test]
    fn custom_layout() {
        let input = "label;a;b\nx;1.5;2.5\ny;3.5;4.5\n";
        let layout = CsvLayout::default()
            .delimiter(b';')
            .label_column(0)
            .feature_columns(1..3);
        let dataset = load_clusters_with(input.as_bytes(), &layout).unwrap();
        assert_eq!(dataset.records(), &array![[1.5, 2.5], [3.5, 4.5]]);
        assert_eq!(dataset.labels().len(), 2);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_clusters(dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn written_files_load_back() {
        let dataset = Dataset::new(
            array![
                [0.5, -1.25, 2., 3., 4., 5., 6., 7.],
                [1., 1., 1., 1., 1., 1., 1., -7.125]
            ],
            array![ClusterId::Id(0), ClusterId::NOISE],
        );

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write_clusters(&mut file, &dataset).unwrap();
        file.flush().unwrap();

        let loaded = load_clusters(file.path()).unwrap();
        assert_abs_diff_eq!(*loaded.records(), *dataset.records(), epsilon = 1e-4);
        assert_eq!(loaded.targets(), dataset.targets());
    }
}
