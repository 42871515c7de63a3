use std::collections::BTreeMap;
use std::ops::Range;

use clusterview::{ClusterId, DatasetBase};
use ndarray::{ArrayBase, Data, Ix1, Ix2};

use crate::error::{PlotError, Result};
use crate::palette::{self, Rgb};

pub const X_LABEL: &str = "First Principal Component";
pub const Y_LABEL: &str = "Second Principal Component";

/// One row of the legend
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: ClusterId,
    pub color: Rgb,
    pub count: usize,
}

/// Everything that ends up in the picture, independent of any drawing backend
///
/// Points are coloured by their cluster label. A plot with a single distinct label uses one
/// colour and has no legend, otherwise every label gets its own palette colour and a legend
/// entry. Points without a cluster are always grey.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPlot {
    pub(crate) points: Vec<(f64, f64)>,
    pub(crate) labels: Vec<ClusterId>,
    pub(crate) colors: Vec<Rgb>,
    pub(crate) legend: Vec<LegendEntry>,
    source_dim: usize,
}

impl ScatterPlot {
    /// Describe the plot of projected `points` with one label per point
    ///
    /// `source_dim` is the dimensionality of the data before projection, shown in the title.
    pub fn new<D, S>(
        points: &ArrayBase<D, Ix2>,
        labels: &ArrayBase<S, Ix1>,
        source_dim: usize,
    ) -> Result<Self>
    where
        D: Data<Elem = f64>,
        S: Data<Elem = ClusterId>,
    {
        let (npoints, ndim) = points.dim();
        if npoints == 0 {
            return Err(PlotError::Empty);
        }
        if ndim != 2 {
            return Err(PlotError::NotPlanar(ndim));
        }
        if labels.len() != npoints {
            return Err(PlotError::LabelCount {
                points: npoints,
                labels: labels.len(),
            });
        }

        let mut counts = BTreeMap::new();
        for label in labels {
            *counts.entry(label.clone()).or_insert(0) += 1;
        }

        let legend = if counts.len() > 1 {
            let mut next = 0;
            counts
                .into_iter()
                .map(|(label, count)| {
                    let color = if label.is_noise() {
                        palette::NOISE_COLOR
                    } else {
                        next += 1;
                        palette::categorical(next - 1)
                    };
                    LegendEntry {
                        label,
                        color,
                        count,
                    }
                })
                .collect()
        } else {
            Vec::new()
        };

        let colors = labels
            .iter()
            .map(|label| {
                legend
                    .iter()
                    .find(|entry: &&LegendEntry| entry.label == *label)
                    .map_or(palette::DEFAULT_COLOR, |entry| entry.color)
            })
            .collect();

        Ok(ScatterPlot {
            points: points.rows().into_iter().map(|p| (p[0], p[1])).collect(),
            labels: labels.to_vec(),
            colors,
            legend,
            source_dim,
        })
    }

    /// Build a plot from projected records and their cluster labels
    pub fn from_dataset<D, S>(
        dataset: &DatasetBase<ArrayBase<D, Ix2>, ArrayBase<S, Ix1>>,
        source_dim: usize,
    ) -> Result<Self>
    where
        D: Data<Elem = f64>,
        S: Data<Elem = ClusterId>,
    {
        Self::new(dataset.records(), dataset.targets(), source_dim)
    }

    /// Dimensionality of the data before projection
    pub fn source_dimension(&self) -> usize {
        self.source_dim
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn title(&self) -> String {
        format!(
            "2D PCA Visualization of {}D Data ({} points)",
            self.source_dim,
            group_thousands(self.len())
        )
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Legend entries ordered by label, empty for a single label
    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    /// Points carrying the given label
    pub(crate) fn points_of<'a>(
        &'a self,
        label: &'a ClusterId,
    ) -> impl Iterator<Item = (f64, f64)> + 'a {
        self.points
            .iter()
            .zip(self.labels.iter())
            .filter(move |(_, l)| *l == label)
            .map(|(p, _)| *p)
    }

    /// Axis ranges enclosing all points with a 5% margin
    ///
    /// A degenerate extent (a single point, or all points on a line) is widened to a unit range
    /// around its center.
    pub fn bounds(&self) -> (Range<f64>, Range<f64>) {
        let (x_min, x_max) = extent(self.points.iter().map(|p| p.0));
        let (y_min, y_max) = extent(self.points.iter().map(|p| p.1));

        (pad(x_min, x_max), pad(y_min, y_max))
    }
}

fn extent<I: Iterator<Item = f64>>(values: I) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

fn pad(min: f64, max: f64) -> Range<f64> {
    let span = max - min;
    if span <= f64::EPSILON * max.abs().max(1.) {
        let center = (min + max) / 2.;
        return (center - 0.5)..(center + 0.5);
    }

    (min - span * 0.05)..(max + span * 0.05)
}

/// Format a count with `,` between groups of three digits
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
