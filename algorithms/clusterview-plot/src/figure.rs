use crate::error::{PlotError, Result};

/// Physical layout of a rendered figure
///
/// Sizes are given in inches and points (1/72 inch) and converted to pixels with the
/// resolution, so a figure keeps its proportions at any `dpi`.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureParams {
    pub(crate) width: f64,
    pub(crate) height: f64,
    pub(crate) dpi: f64,
    pub(crate) alpha: f64,
    pub(crate) marker_size: f64,
    pub(crate) grid_alpha: f64,
    pub(crate) padding: f64,
}

impl Default for FigureParams {
    fn default() -> Self {
        FigureParams {
            width: 10.,
            height: 8.,
            dpi: 300.,
            alpha: 0.7,
            marker_size: 20.,
            grid_alpha: 0.3,
            padding: 0.1,
        }
    }
}

impl FigureParams {
    /// Figure size in inches
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Resolution in pixels per inch
    pub fn dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    /// Opacity of the markers
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Marker size, the squared marker diameter in points
    pub fn marker_size(mut self, size: f64) -> Self {
        self.marker_size = size;
        self
    }

    /// Opacity of the grid lines
    pub fn grid_alpha(mut self, alpha: f64) -> Self {
        self.grid_alpha = alpha;
        self
    }

    /// White margin in inches kept around the content after trimming
    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("dpi", self.dpi),
            ("marker size", self.marker_size),
        ];
        if let Some((name, value)) = positive.iter().find(|(_, v)| !(v.is_finite() && *v > 0.)) {
            return Err(PlotError::InvalidFigure(format!(
                "{} must be positive, got {}",
                name, value
            )));
        }

        for (name, value) in [("alpha", self.alpha), ("grid alpha", self.grid_alpha)].iter() {
            if !(0. ..=1.).contains(value) {
                return Err(PlotError::InvalidFigure(format!(
                    "{} must be in [0, 1], got {}",
                    name, value
                )));
            }
        }

        if !(self.padding.is_finite() && self.padding >= 0.) {
            return Err(PlotError::InvalidFigure(format!(
                "padding must not be negative, got {}",
                self.padding
            )));
        }

        let (width, height) = self.pixel_size();
        if width == 0 || height == 0 {
            return Err(PlotError::InvalidFigure(format!(
                "figure of {}x{} pixels has no area",
                width, height
            )));
        }

        Ok(())
    }

    /// Size of the canvas in pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width * self.dpi).round() as u32,
            (self.height * self.dpi).round() as u32,
        )
    }

    /// Convert a length in points to pixels
    pub fn points_to_pixels(&self, points: f64) -> f64 {
        points * self.dpi / 72.
    }

    /// Radius of a marker in pixels, at least one
    ///
    /// The marker size is the squared diameter of the marker in points.
    pub fn marker_radius(&self) -> i32 {
        let radius = self.marker_size.sqrt() / 2.;
        (self.points_to_pixels(radius).round() as i32).max(1)
    }

    pub fn padding_pixels(&self) -> u32 {
        (self.padding * self.dpi).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_figure_is_ten_by_eight_inches_at_300_dpi() {
        let figure = FigureParams::default();
        assert!(figure.validate().is_ok());
        assert_eq!(figure.pixel_size(), (3000, 2400));
        assert_eq!(figure.padding_pixels(), 30);
        // a size of 20 is a diameter of about 4.5 points
        assert_eq!(figure.marker_radius(), 9);
    }

    #[test]
    fn tiny_markers_stay_visible() {
        let figure = FigureParams::default().dpi(10.).marker_size(0.1);
        assert_eq!(figure.marker_radius(), 1);
    }

    #[test]
    fn invalid_figures_are_rejected() {
        assert!(FigureParams::default().dpi(0.).validate().is_err());
        assert!(FigureParams::default().size(-1., 8.).validate().is_err());
        assert!(FigureParams::default().alpha(1.5).validate().is_err());
        assert!(FigureParams::default().padding(f64::NAN).validate().is_err());
        assert!(FigureParams::default().size(0.001, 0.001).dpi(1.).validate().is_err());
    }
}
