use std::f32::consts::PI;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::color::palette::Palette;
use crate::color::Color;

pub const BASE_SCALE: f32 = 0.5;
pub const PULSE_AMPLITUDE: f32 = 0.1;

/// The ring sprite marking the selected or hovered star.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub position: Vec3,
    pub visible: bool,
    pub scale: f32,
    pub outer: Color,
    pub inner: Color,
    pub inner_alpha: f32,
}

impl Highlight {
    pub fn new(palette: &Palette) -> Self {
        Highlight {
            position: Vec3::ZERO,
            visible: false,
            scale: BASE_SCALE,
            outer: palette.highlight_outer,
            inner: palette.highlight_inner,
            inner_alpha: palette.highlight_inner_alpha,
        }
    }

    pub fn show_at(&mut self, position: Vec3) {
        self.position = position;
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// One pulse per second between `BASE_SCALE` and `BASE_SCALE + PULSE_AMPLITUDE`.
    pub fn pulse(&mut self, elapsed: f64) {
        if !self.visible {
            return;
        }
        let phase = ((elapsed as f32 * PI * 2.0).sin() + 1.0) / 2.0;
        self.scale = BASE_SCALE + phase * PULSE_AMPLITUDE;
    }
}
