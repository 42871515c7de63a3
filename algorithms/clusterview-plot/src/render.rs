use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{imageops, DynamicImage, ImageOutputFormat, RgbImage};
use plotters::prelude::*;

use crate::error::{PlotError, Result};
use crate::figure::FigureParams;
use crate::scatter::{ScatterPlot, X_LABEL, Y_LABEL};

const FONT: &str = "sans-serif";
const TITLE_SIZE: f64 = 12.;
const LABEL_SIZE: f64 = 10.;

fn drawing_error<E: Display>(err: E) -> PlotError {
    PlotError::Drawing(err.to_string())
}

impl ScatterPlot {
    /// Render the plot into a bitmap trimmed to its content
    ///
    /// Text needs a system font. When none can be loaded the plot is drawn again without
    /// title, axis labels and legend.
    pub fn render(&self, figure: &FigureParams) -> Result<RgbImage> {
        figure.validate()?;

        let (width, height) = figure.pixel_size();
        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        if let Err(err) = self.draw(&mut buffer, figure, true) {
            log::warn!("{}, drawing the plot without text", err);
            self.draw(&mut buffer, figure, false)?;
        }

        let image = RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| PlotError::Drawing("bitmap does not match figure size".into()))?;

        Ok(trim(&image, figure.padding_pixels()))
    }

    /// Render the plot and write it as PNG
    pub fn save<P: AsRef<Path>>(&self, path: P, figure: &FigureParams) -> Result<()> {
        let path = path.as_ref();
        let image = self.render(figure)?;

        let io_error = |source| PlotError::Io {
            path: path.to_path_buf(),
            source,
        };
        let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);
        DynamicImage::ImageRgb8(image).write_to(&mut writer, ImageOutputFormat::Png)?;
        writer.flush().map_err(io_error)?;

        log::debug!("wrote {}", path.display());

        Ok(())
    }

    fn draw(&self, buffer: &mut [u8], figure: &FigureParams, with_text: bool) -> Result<()> {
        let root = BitMapBackend::with_buffer(buffer, figure.pixel_size()).into_drawing_area();
        root.fill(&WHITE).map_err(drawing_error)?;

        let title_font = (FONT, figure.points_to_pixels(TITLE_SIZE)).into_font();
        let label_font = (FONT, figure.points_to_pixels(LABEL_SIZE)).into_font();

        let (x_range, y_range) = self.bounds();
        let mut builder = ChartBuilder::on(&root);
        builder.margin(figure.points_to_pixels(10.) as u32);
        if with_text {
            let label_area = figure.points_to_pixels(36.) as u32;
            builder
                .caption(self.title(), title_font)
                .x_label_area_size(label_area)
                .y_label_area_size(label_area);
        }
        let mut chart = builder
            .build_cartesian_2d(x_range, y_range)
            .map_err(drawing_error)?;

        let mut mesh = chart.configure_mesh();
        mesh.bold_line_style(BLACK.mix(figure.grid_alpha))
            .light_line_style(WHITE);
        if with_text {
            mesh.x_desc(X_LABEL)
                .y_desc(Y_LABEL)
                .label_style(label_font.clone())
                .axis_desc_style(label_font.clone());
        }
        mesh.draw().map_err(drawing_error)?;

        let radius = figure.marker_radius();
        if self.legend.is_empty() {
            let markers = self.points.iter().zip(self.colors.iter()).map(|(&point, &color)| {
                Circle::new(point, radius, RGBColor::from(color).mix(figure.alpha).filled())
            });
            chart.draw_series(markers).map_err(drawing_error)?;
        } else {
            for entry in &self.legend {
                let style = RGBColor::from(entry.color).mix(figure.alpha).filled();
                let series = chart
                    .draw_series(
                        self.points_of(&entry.label)
                            .map(|point| Circle::new(point, radius, style)),
                    )
                    .map_err(drawing_error)?;
                if with_text {
                    series
                        .label(entry.label.to_string())
                        .legend(move |(x, y)| Circle::new((x, y), radius, style));
                }
            }

            if with_text {
                chart
                    .configure_series_labels()
                    .position(SeriesLabelPosition::UpperRight)
                    .background_style(WHITE.mix(0.8))
                    .border_style(BLACK.mix(0.3))
                    .label_font(label_font)
                    .draw()
                    .map_err(drawing_error)?;
            }
        }

        root.present().map_err(drawing_error)?;

        Ok(())
    }
}

/// Crop an image to its non-white content plus a margin of `padding` pixels
///
/// A blank image is returned unchanged.
pub fn trim(image: &RgbImage, padding: u32) -> RgbImage {
    let background = image::Rgb([255u8, 255, 255]);

    let bbox = image
        .enumerate_pixels()
        .filter(|(_, _, pixel)| **pixel != background)
        .fold(None, |bbox, (x, y, _)| match bbox {
            None => Some((x, y, x, y)),
            Some((x0, y0, x1, y1)) => Some((x0.min(x), y0.min(y), x1.max(x), y1.max(y))),
        });

    match bbox {
        None => image.clone(),
        Some((x0, y0, x1, y1)) => {
            let left = x0.saturating_sub(padding);
            let top = y0.saturating_sub(padding);
            let right = (x1 + padding).min(image.width() - 1);
            let bottom = (y1 + padding).min(image.height() - 1);

            imageops::crop_imm(image, left, top, right - left + 1, bottom - top + 1).to_image()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clusterview::ClusterId;
    use ndarray::{array, Array1};

    #[test]
    fn trim_keeps_padding_around_content() {
        let mut image = RgbImage::from_pixel(100, 80, image::Rgb([255, 255, 255]));
        image.put_pixel(50, 40, image::Rgb([0, 0, 0]));
        image.put_pixel(52, 41, image::Rgb([10, 20, 30]));

        let trimmed = trim(&image, 3);
        assert_eq!(trimmed.dimensions(), (9, 8));
        assert_eq!(trimmed.get_pixel(3, 3), &image::Rgb([0, 0, 0]));
    }

    #[test]
    fn trim_clamps_to_the_image() {
        let mut image = RgbImage::from_pixel(10, 10, image::Rgb([255, 255, 255]));
        image.put_pixel(0, 9, image::Rgb([0, 0, 0]));

        assert_eq!(trim(&image, 5).dimensions(), (6, 6));
    }

    #[test]
    fn blank_images_are_not_trimmed() {
        let image = RgbImage::from_pixel(10, 7, image::Rgb([255, 255, 255]));
        assert_eq!(trim(&image, 2).dimensions(), (10, 7));
    }

    #[test]
    fn rendering_draws_inside_the_figure() {
        let points = array![[0., 0.], [1., 2.], [-1., 0.5], [3., -2.]];
        let labels = array![ClusterId::Id(0), ClusterId::Id(1), ClusterId::NOISE, ClusterId::Id(0)];
        let plot = ScatterPlot::new(&points, &labels, 8).unwrap();

        let figure = FigureParams::default().dpi(30.);
        let image = plot.render(&figure).unwrap();

        let (width, height) = image.dimensions();
        assert!(width > 0 && width <= 300);
        assert!(height > 0 && height <= 240);
        assert!(image.pixels().any(|p| *p != image::Rgb([255, 255, 255])));
    }

    #[test]
    fn saved_png_can_be_read_back() {
        let points = array![[0., 0.], [1., 1.]];
        let labels: Array1<ClusterId> = array![ClusterId::Id(3), ClusterId::Id(3)];
        let plot = ScatterPlot::new(&points, &labels, 8).unwrap();
        let figure = FigureParams::default().dpi(20.);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.png");
        plot.save(&path, &figure).unwrap();

        let written = image::open(&path).unwrap().to_rgb8();
        assert_eq!(written, plot.render(&figure).unwrap());
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let plot = ScatterPlot::new(&array![[0., 0.]], &array![ClusterId::Id(0)], 8).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("plot.png");

        let err = plot.save(&path, &FigureParams::default().dpi(10.)).unwrap_err();
        assert!(matches!(err, PlotError::Io { .. }));
    }
}
