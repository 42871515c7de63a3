//! # clusterview pipeline
//!
//! Reads a cluster file, standardizes the points, projects them onto their first two principal
//! components and saves a scatter plot coloured by cluster:
//!
//! ```text
//! ids.csv -> load -> standardize -> project -> plot -> pca_visualization.png -> show
//! ```
//!
//! Each stage is a public function so the pipeline can be driven step by step, [`run`] chains
//! them and prints a short progress report.
//!
//! ```no_run
//! use clusterview::ParamGuard;
//! use clusterview_pipeline::{run, PipelineParams};
//!
//! let params = PipelineParams::default()
//!     .input("embeddings.csv")
//!     .output("embeddings.png")
//!     .check()
//!     .unwrap();
//! let report = run(&params, &mut std::io::stdout()).unwrap();
//! println!("{} points", report.npoints);
//! ```

mod error;
mod params;

use std::io::Write;
use std::path::{Path, PathBuf};

use clusterview::dataset::Records;
use clusterview::traits::{Fit, Predict, Transformer};
use clusterview::{ClusterId, Dataset};
use clusterview_plot::ScatterPlot;
use clusterview_preprocessing::{FittedLinearScaler, LinearScaler, ZeroVariance};
use clusterview_reduction::Pca;
use ndarray::Array2;

pub use error::{Degeneracy, ErrorKind, PipelineError, Result};
pub use params::{PipelineParams, PipelineValidParams};

/// Number of principal components kept for the scatter plot
pub const N_COMPONENTS: usize = 2;

/// Outcome of a pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub npoints: usize,
    pub ndim: usize,
    /// Fraction of the total variance explained by each plotted component
    pub explained_variance_ratio: Vec<f64>,
    /// Columns without any spread in the input
    pub constant_features: Vec<usize>,
    /// Distinct labels with their number of points
    pub clusters: Vec<(ClusterId, usize)>,
    pub legend_entries: usize,
    pub projection: Array2<f64>,
    pub output: PathBuf,
    /// Whether the saved plot was opened in an image viewer
    pub shown: bool,
}

impl Report {
    pub fn total_explained_variance(&self) -> f64 {
        self.explained_variance_ratio.iter().sum()
    }
}

/// Read the input file of the pipeline
pub fn load(params: &PipelineValidParams) -> Result<Dataset<f64, ClusterId>> {
    let dataset = clusterview_datasets::load_clusters(params.input_path())?;
    log::debug!("read {}", params.input_path().display());

    Ok(dataset)
}

/// Standardize every feature to zero mean and unit variance
pub fn standardize(
    dataset: Dataset<f64, ClusterId>,
    zero_variance: ZeroVariance,
) -> Result<(Dataset<f64, ClusterId>, FittedLinearScaler<f64>)> {
    let scaler = LinearScaler::standard()
        .zero_variance(zero_variance)
        .fit(&dataset)?;

    if !scaler.constant_features().is_empty() {
        let names = dataset.feature_names();
        let constant = scaler
            .constant_features()
            .iter()
            .map(|&i| names[i].as_str())
            .collect::<Vec<_>>();
        log::warn!(
            "features {:?} have zero variance and are only centered",
            constant
        );
    }

    Ok((scaler.transform(dataset), scaler))
}

/// Project standardized points onto their first principal components
pub fn project(dataset: Dataset<f64, ClusterId>) -> Result<(Dataset<f64, ClusterId>, Pca<f64>)> {
    let pca = Pca::params(N_COMPONENTS).fit(&dataset)?;

    Ok((pca.predict(dataset), pca))
}

/// Describe the scatter plot of projected points
pub fn plot(projected: &Dataset<f64, ClusterId>, source_dim: usize) -> Result<ScatterPlot> {
    Ok(ScatterPlot::from_dataset(projected, source_dim)?)
}

/// Open a saved plot in the system image viewer
///
/// Returns whether a viewer was started. Without a viewer (e.g. on a headless machine) a
/// warning is logged and the plot stays on disk.
pub fn show(path: &Path) -> bool {
    match opener::open(path) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("could not display {}: {}", path.display(), err);
            false
        }
    }
}

/// Run all stages, save the plot and show it, progress lines are written to `out`
pub fn run<W: Write>(params: &PipelineValidParams, out: &mut W) -> Result<Report> {
    let dataset = load(params)?;
    let (npoints, ndim) = (dataset.nsamples(), dataset.nfeatures());
    writeln!(out, "Loaded {} points with {} dimensions", npoints, ndim)
        .map_err(PipelineError::Console)?;

    let clusters = {
        let mut clusters = dataset.label_frequencies().into_iter().collect::<Vec<_>>();
        clusters.sort();
        clusters
    };
    log::info!("cluster summary {:?}", clusters);

    let (scaled, scaler) = standardize(dataset, params.zero_variance_policy())?;
    let (projected, pca) = project(scaled)?;

    let ratio = pca.explained_variance_ratio().to_vec();
    writeln!(out, "PCA explained variance: {:?}", ratio).map_err(PipelineError::Console)?;
    writeln!(
        out,
        "Total explained variance: {:.4}",
        ratio.iter().sum::<f64>()
    )
    .map_err(PipelineError::Console)?;

    let scatter = plot(&projected, ndim)?;
    scatter.save(params.output_path(), params.figure_params())?;
    writeln!(
        out,
        "Visualization complete! Plot saved as '{}'",
        params.output_path().display()
    )
    .map_err(PipelineError::Console)?;

    let shown = params.shows_plot() && show(params.output_path());

    Ok(Report {
        npoints,
        ndim,
        explained_variance_ratio: ratio,
        constant_features: scaler.constant_features().to_vec(),
        clusters,
        legend_entries: scatter.legend().len(),
        projection: projected.records,
        output: params.output_path().to_path_buf(),
        shown,
    })
}
