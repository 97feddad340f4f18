use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::Color;

/// Colours for every scene role. Any role missing from a config file
/// falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Color,
    pub grid_square: Color,
    pub grid_square_minor: Color,
    pub grid_circular: Color,
    pub stalk_line: Color,
    pub stalk_base: Color,
    pub connection_line: Color,
    pub highlight_outer: Color,
    pub highlight_inner: Color,
    /// Opacity of the inner highlight ring.
    pub highlight_inner_alpha: f32,
    pub label_text: Color,
}

pub static DEFAULT_PALETTE: Lazy<Palette> = Lazy::new(|| Palette {
    background: Color(0x0f0f1a),
    grid_square: Color(0x888888),
    grid_square_minor: Color(0x444444),
    grid_circular: Color(0x444488),
    stalk_line: Color(0x445577),
    stalk_base: Color(0x445577),
    connection_line: Color(0xcccccc),
    highlight_outer: Color::WHITE,
    highlight_inner: Color::WHITE,
    highlight_inner_alpha: 0.5,
    label_text: Color::WHITE,
});

impl Default for Palette {
    fn default() -> Self {
        DEFAULT_PALETTE.clone()
    }
}
