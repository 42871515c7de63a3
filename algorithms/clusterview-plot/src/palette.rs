//! Colours of the scatter markers

use plotters::style::RGBColor;

/// An opaque RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<Rgb> for RGBColor {
    fn from(c: Rgb) -> Self {
        RGBColor(c.0, c.1, c.2)
    }
}

/// Categorical palette with ten hues in a dark and a light shade
pub const TAB20: [Rgb; 20] = [
    Rgb(31, 119, 180),
    Rgb(174, 199, 232),
    Rgb(255, 127, 14),
    Rgb(255, 187, 120),
    Rgb(44, 160, 44),
    Rgb(152, 223, 138),
    Rgb(214, 39, 40),
    Rgb(255, 152, 150),
    Rgb(148, 103, 189),
    Rgb(197, 176, 213),
    Rgb(140, 86, 75),
    Rgb(196, 156, 148),
    Rgb(227, 119, 194),
    Rgb(247, 182, 210),
    Rgb(127, 127, 127),
    Rgb(199, 199, 199),
    Rgb(188, 189, 34),
    Rgb(219, 219, 141),
    Rgb(23, 190, 207),
    Rgb(158, 218, 229),
];

/// Colour of points without a cluster
pub const NOISE_COLOR: Rgb = Rgb(128, 128, 128);

/// Colour used when the plot is not split by label
pub const DEFAULT_COLOR: Rgb = TAB20[0];

/// Colour of the `index`-th cluster, cycling through the palette
pub fn categorical(index: usize) -> Rgb {
    TAB20[index % TAB20.len()]
}
