use std::fs::{self, File};
use std::path::Path;

use approx::assert_abs_diff_eq;
use clusterview::dataset::Records;
use clusterview::{ClusterId, Dataset, ParamGuard};
use clusterview_datasets::{generate, write_clusters};
use clusterview_pipeline::{
    load, plot, project, run, standardize, ErrorKind, PipelineParams, PipelineValidParams,
};
use clusterview_plot::FigureParams;
use clusterview_preprocessing::ZeroVariance;
use ndarray::{array, Array1, Array2, Axis};
use rand::{rngs::SmallRng, SeedableRng};

fn params_in(dir: &Path) -> PipelineParams {
    PipelineParams::default()
        .input(dir.join("ids.csv"))
        .output(dir.join("pca_visualization.png"))
        .figure(FigureParams::default().dpi(20.))
        .show_plot(false)
}

fn checked(params: PipelineParams) -> PipelineValidParams {
    params.check().unwrap()
}

fn write_input(dir: &Path, dataset: &Dataset<f64, ClusterId>) {
    let file = File::create(dir.join("ids.csv")).unwrap();
    write_clusters(file, dataset).unwrap();
}

fn blobs(blob_size: usize, centroids: Array2<f64>) -> Dataset<f64, ClusterId> {
    let mut rng = SmallRng::seed_from_u64(42);
    generate::labeled_blobs(blob_size, &centroids, &mut rng)
}

#[test]
fn single_cluster_is_plotted_without_legend() {
    let dir = tempfile::tempdir().unwrap();
    write_input(dir.path(), &blobs(100, Array2::zeros((1, 8))));

    let params = checked(params_in(dir.path()));
    let mut out = Vec::new();
    let report = run(&params, &mut out).unwrap();

    assert_eq!(report.npoints, 100);
    assert_eq!(report.ndim, 8);
    assert_eq!(report.projection.dim(), (100, 2));
    assert_eq!(report.legend_entries, 0);
    assert_eq!(report.clusters, vec![(ClusterId::Id(0), 100)]);
    assert!(params.output_path().exists());
    assert!(!report.shown);

    let out = String::from_utf8(out).unwrap();
    let lines = out.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "Loaded 100 points with 8 dimensions");
    assert!(lines[1].starts_with("PCA explained variance: ["));
    assert_eq!(
        lines[2],
        format!(
            "Total explained variance: {:.4}",
            report.total_explained_variance()
        )
    );
    assert_eq!(
        lines[3],
        format!(
            "Visualization complete! Plot saved as '{}'",
            params.output_path().display()
        )
    );
}

#[test]
fn two_clusters_have_two_legend_entries() {
    let dir = tempfile::tempdir().unwrap();
    let centroids = array![
        [0., 0., 0., 0., 0., 0., 0., 0.],
        [5., -5., 5., -5., 5., -5., 5., -5.]
    ];
    write_input(dir.path(), &blobs(50, centroids));

    let report = run(&checked(params_in(dir.path())), &mut Vec::new()).unwrap();

    assert_eq!(report.legend_entries, 2);
    assert_eq!(report.projection.dim(), (100, 2));

    let ratio = &report.explained_variance_ratio;
    assert_eq!(ratio.len(), 2);
    assert!(ratio.iter().all(|r| (0. ..=1.).contains(r)));
    assert!(report.total_explained_variance() <= 1. + 1e-12);
    // the blob separation dominates the first component
    assert!(ratio[0] > 0.5);
}

#[test]
fn noise_points_get_their_own_legend_entry() {
    let dir = tempfile::tempdir().unwrap();
    let mut dataset = blobs(20, Array2::zeros((2, 8)));
    dataset.targets[0] = ClusterId::NOISE;
    write_input(dir.path(), &dataset);

    let report = run(&checked(params_in(dir.path())), &mut Vec::new()).unwrap();
    assert_eq!(report.legend_entries, 3);
    assert_eq!(report.clusters[0], (ClusterId::NOISE, 1));
}

#[test]
fn repeated_runs_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    write_input(dir.path(), &blobs(30, Array2::eye(8) * 3.));
    let params = checked(params_in(dir.path()));

    let first = run(&params, &mut Vec::new()).unwrap();
    let first_png = fs::read(params.output_path()).unwrap();
    let second = run(&params, &mut Vec::new()).unwrap();
    let second_png = fs::read(params.output_path()).unwrap();

    assert_eq!(first.projection, second.projection);
    assert_eq!(first.explained_variance_ratio, second.explained_variance_ratio);
    assert_eq!(first_png, second_png);
}

#[test]
fn single_data_row_projects_to_the_origin() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("ids.csv"),
        "i,cluster id\n0,  4,  1.0000,  2.0000,  3.0000,  4.0000,  5.0000,  6.0000,  7.0000,  8.0000\n",
    )
    .unwrap();

    let params = checked(params_in(dir.path()));
    let report = run(&params, &mut Vec::new()).unwrap();

    assert_eq!(report.projection, Array2::<f64>::zeros((1, 2)));
    assert_eq!(report.explained_variance_ratio, vec![0., 0.]);
    assert_eq!(report.constant_features, (0..8).collect::<Vec<_>>());
    assert!(params.output_path().exists());
}

#[test]
fn header_only_file_is_a_format_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("ids.csv"), "i,cluster id\n").unwrap();

    let params = checked(params_in(dir.path()));
    let mut out = Vec::new();
    let err = run(&params, &mut out).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Format);
    assert!(out.is_empty());
    assert!(!params.output_path().exists());
}

#[test]
fn short_rows_are_a_format_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("ids.csv"), "i,cluster id\n0,1,0.5,0.5\n").unwrap();

    let params = checked(params_in(dir.path()));
    let err = run(&params, &mut Vec::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert!(!params.output_path().exists());
}

#[test]
fn missing_input_is_a_file_access_error() {
    let dir = tempfile::tempdir().unwrap();
    let params = checked(params_in(dir.path()));

    let err = run(&params, &mut Vec::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FileAccess);
}

#[test]
fn unwritable_output_is_an_output_write_error() {
    let dir = tempfile::tempdir().unwrap();
    write_input(dir.path(), &blobs(10, Array2::zeros((2, 8))));
    let params = checked(params_in(dir.path()).output(dir.path().join("nested").join("plot.png")));

    let err = run(&params, &mut Vec::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutputWrite);
}

#[test]
fn rejected_constant_features_are_a_numeric_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut dataset = blobs(10, Array2::zeros((1, 8)));
    dataset.records.column_mut(3).fill(1.5);
    write_input(dir.path(), &dataset);

    let params = checked(params_in(dir.path()).zero_variance(ZeroVariance::Reject));
    let err = run(&params, &mut Vec::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NumericDegeneracy);
    assert!(!params.output_path().exists());

    // centering the constant column instead keeps the run going
    let params = checked(params_in(dir.path()));
    let report = run(&params, &mut Vec::new()).unwrap();
    assert_eq!(report.constant_features, vec![3]);
}

#[test]
fn stages_conserve_rows_and_standardize_columns() {
    let dir = tempfile::tempdir().unwrap();
    let centroids = array![[1., 2., 3., 4., 5., 6., 7., 8.], [-8., 7., -6., 5., -4., 3., -2., 1.]];
    let dataset = blobs(40, centroids);
    write_input(dir.path(), &dataset);
    let params = checked(params_in(dir.path()));

    let loaded = load(&params).unwrap();
    assert_eq!(loaded.nsamples(), 80);
    let loaded_dim = loaded.nfeatures();
    assert_eq!(loaded.targets(), dataset.targets());

    let (scaled, _) = standardize(loaded, ZeroVariance::Center).unwrap();
    assert_eq!(scaled.nsamples(), 80);
    assert_abs_diff_eq!(
        scaled.records().mean_axis(Axis(0)).unwrap(),
        Array1::<f64>::zeros(8),
        epsilon = 1e-10
    );
    assert_abs_diff_eq!(
        scaled.records().std_axis(Axis(0), 0.),
        Array1::<f64>::ones(8),
        epsilon = 1e-10
    );

    let (projected, pca) = project(scaled).unwrap();
    assert_eq!(projected.records().dim(), (80, 2));
    assert_eq!(projected.targets(), dataset.targets());
    assert_eq!(pca.components().dim(), (2, 8));

    let scatter = plot(&projected, loaded_dim).unwrap();
    assert_eq!(scatter.source_dimension(), 8);
    assert_eq!(scatter.title(), "2D PCA Visualization of 8D Data (80 points)");
    assert_eq!(scatter.legend().len(), 2);
}
