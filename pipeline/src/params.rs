use std::path::{Path, PathBuf};

use clusterview::ParamGuard;
use clusterview_plot::FigureParams;
use clusterview_preprocessing::ZeroVariance;

use crate::error::{PipelineError, Result};

/// Input and output of a pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineValidParams {
    input: PathBuf,
    output: PathBuf,
    zero_variance: ZeroVariance,
    figure: FigureParams,
    show_plot: bool,
}

impl PipelineValidParams {
    pub fn input_path(&self) -> &Path {
        &self.input
    }

    pub fn output_path(&self) -> &Path {
        &self.output
    }

    pub fn zero_variance_policy(&self) -> ZeroVariance {
        self.zero_variance
    }

    pub fn figure_params(&self) -> &FigureParams {
        &self.figure
    }

    pub fn shows_plot(&self) -> bool {
        self.show_plot
    }
}

/// Pipeline parameters, not yet checked
///
/// The defaults read `ids.csv` and write `pca_visualization.png` in the working directory, then
/// open the written plot in the system image viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineParams(PipelineValidParams);

impl Default for PipelineParams {
    fn default() -> Self {
        PipelineParams(PipelineValidParams {
            input: PathBuf::from("ids.csv"),
            output: PathBuf::from("pca_visualization.png"),
            zero_variance: ZeroVariance::default(),
            figure: FigureParams::default(),
            show_plot: true,
        })
    }
}

impl PipelineParams {
    pub fn input<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.0.input = path.into();
        self
    }

    pub fn output<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.0.output = path.into();
        self
    }

    /// How features without variance are handled by the scaler
    pub fn zero_variance(mut self, policy: ZeroVariance) -> Self {
        self.0.zero_variance = policy;
        self
    }

    pub fn figure(mut self, figure: FigureParams) -> Self {
        self.0.figure = figure;
        self
    }

    /// Open the saved plot in the system image viewer
    pub fn show_plot(mut self, show: bool) -> Self {
        self.0.show_plot = show;
        self
    }
}

impl ParamGuard for PipelineParams {
    type Checked = PipelineValidParams;
    type Error = PipelineError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.input.as_os_str().is_empty() {
            return Err(PipelineError::Parameters("input path is empty".into()));
        }
        if self.0.output.as_os_str().is_empty() {
            return Err(PipelineError::Parameters("output path is empty".into()));
        }
        self.0.figure.validate()?;

        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn defaults_point_to_the_working_directory() {
        let params = PipelineParams::default().check().unwrap();
        assert_eq!(params.input_path(), Path::new("ids.csv"));
        assert_eq!(params.output_path(), Path::new("pca_visualization.png"));
        assert_eq!(params.zero_variance_policy(), ZeroVariance::Center);
        assert_eq!(params.figure_params().pixel_size(), (3000, 2400));
        assert!(params.shows_plot());

        let params = PipelineParams::default().show_plot(false).check().unwrap();
        assert!(!params.shows_plot());
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let err = PipelineParams::default().input("").check().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parameters);

        let err = PipelineParams::default().output("").check().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parameters);

        let err = PipelineParams::default()
            .figure(FigureParams::default().dpi(-3.))
            .check()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parameters);
    }
}
