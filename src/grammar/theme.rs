//! Theme system.
//!
//! Controls the non-data appearance of plots and supplies the series palette
//! consulted by color mappings.

use crate::color::Rgba;
use crate::error::{Error, Result};

/// Spectral palette of the `spaceage` theme.
const SPACEAGE_PALETTE: [Rgba; 11] = [
    Rgba::hex(0xd5_3e_4f),
    Rgba::hex(0xe8_5a_48),
    Rgba::hex(0xf6_7a_49),
    Rgba::hex(0xfb_a1_5b),
    Rgba::hex(0xfd_c2_72),
    Rgba::hex(0xfe_e0_8b),
    Rgba::hex(0xe6_f5_98),
    Rgba::hex(0xba_e3_a1),
    Rgba::hex(0x89_d0_a5),
    Rgba::hex(0x59_b4_ab),
    Rgba::hex(0x32_88_bd),
];

/// ggplot2 hue palette.
const HUE_PALETTE: [Rgba; 8] = [
    Rgba::hex(0xf8_76_6d),
    Rgba::hex(0xcd_96_00),
    Rgba::hex(0x7c_ae_00),
    Rgba::hex(0x00_be_67),
    Rgba::hex(0x00_bf_c4),
    Rgba::hex(0x00_a9_ff),
    Rgba::hex(0xc7_7c_ff),
    Rgba::hex(0xff_61_cc),
];

/// Names accepted by [`Theme::by_name`].
pub const THEME_NAMES: [&str; 4] = ["grey", "minimal", "dark", "spaceage"];

/// Colors and palette used when rendering a plot.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Theme name.
    pub name: String,
    /// Axis, tick and text color.
    pub foreground: Rgba,
    /// Grid line color.
    pub grid_color: Rgba,
    /// Background inside the axes.
    pub chart_background: Rgba,
    /// Background around the axes.
    pub border_background: Rgba,
    /// Series colors, cycled by ordinal.
    pub palette: Vec<Rgba>,
    /// Draw grid lines at ticks.
    pub show_grid: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::grey()
    }
}

impl Theme {
    /// Grey theme (ggplot2 default-like).
    #[must_use]
    pub fn grey() -> Self {
        Self {
            name: "grey".to_string(),
            foreground: Rgba::rgb(50, 50, 50),
            grid_color: Rgba::WHITE,
            chart_background: Rgba::rgb(235, 235, 235),
            border_background: Rgba::WHITE,
            palette: HUE_PALETTE.to_vec(),
            show_grid: true,
        }
    }

    /// Minimal theme with white background.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            name: "minimal".to_string(),
            foreground: Rgba::BLACK,
            grid_color: Rgba::rgb(220, 220, 220),
            chart_background: Rgba::WHITE,
            border_background: Rgba::WHITE,
            palette: HUE_PALETTE.to_vec(),
            show_grid: true,
        }
    }

    /// Dark theme.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            foreground: Rgba::rgb(220, 220, 220),
            grid_color: Rgba::rgb(60, 60, 60),
            chart_background: Rgba::rgb(40, 40, 40),
            border_background: Rgba::rgb(30, 30, 30),
            palette: SPACEAGE_PALETTE.to_vec(),
            show_grid: true,
        }
    }

    /// Warm paper background with a spectral palette.
    #[must_use]
    pub fn spaceage() -> Self {
        Self {
            name: "spaceage".to_string(),
            foreground: Rgba::rgb(41, 41, 41),
            grid_color: Rgba::new(41, 41, 41, 64),
            chart_background: Rgba::rgb(245, 236, 225),
            border_background: Rgba::rgb(235, 223, 211),
            palette: SPACEAGE_PALETTE.to_vec(),
            show_grid: true,
        }
    }

    /// Look up a builtin theme by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTheme`] for names not in [`THEME_NAMES`].
    pub fn by_name(name: &str) -> Result<Self> {
        match name {
            "grey" => Ok(Self::grey()),
            "minimal" => Ok(Self::minimal()),
            "dark" => Ok(Self::dark()),
            "spaceage" => Ok(Self::spaceage()),
            _ => Err(Error::UnknownTheme(name.to_string())),
        }
    }

    /// Color for the `index`-th series; the palette repeats.
    ///
    /// An empty palette falls back to the foreground color.
    #[must_use]
    pub fn series_palette(&self, index: usize) -> Rgba {
        if self.palette.is_empty() {
            return self.foreground;
        }
        self.palette[index % self.palette.len()]
    }

    /// Replace the series palette.
    #[must_use]
    pub fn palette(mut self, colors: Vec<Rgba>) -> Self {
        self.palette = colors;
        self
    }

    /// Set chart background color.
    #[must_use]
    pub fn chart_background(mut self, color: Rgba) -> Self {
        self.chart_background = color;
        self
    }

    /// Set grid color.
    #[must_use]
    pub fn grid_color(mut self, color: Rgba) -> Self {
        self.grid_color = color;
        self
    }

    /// Show/hide grid.
    #[must_use]
    pub fn grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }
}
