//! # Scatter plots
//!
//! `clusterview-plot` draws the two dimensional projection of a labeled point set. Building a
//! plot and drawing it are separate steps: [`ScatterPlot`] holds the colours, legend and title
//! derived from the labels and can be inspected without touching a drawing backend, while
//! [`ScatterPlot::save`] renders it with `plotters` into an in-memory bitmap, trims the white
//! border and writes a PNG.
//!
//! ```no_run
//! use clusterview::ClusterId;
//! use clusterview_plot::{FigureParams, ScatterPlot};
//! use ndarray::array;
//!
//! let points = array![[0., 1.], [1., 0.], [2., 2.]];
//! let labels = array![ClusterId::Id(0), ClusterId::Id(1), ClusterId::NOISE];
//!
//! let plot = ScatterPlot::new(&points, &labels, 8).unwrap();
//! assert_eq!(plot.legend().len(), 3);
//! plot.save("clusters.png", &FigureParams::default()).unwrap();
//! ```

mod error;
mod figure;
pub mod palette;
mod render;
mod scatter;

pub use error::{PlotError, Result};
pub use figure::FigureParams;
pub use palette::Rgb;
pub use render::trim;
pub use scatter::{group_thousands, LegendEntry, ScatterPlot, X_LABEL, Y_LABEL};
