use std::f32::consts::TAU;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::color::palette::Palette;
use crate::color::Color;

pub const GRID_SIZE: f32 = 20.0;
pub const GRID_DIVISIONS: usize = 10;
pub const RING_SEGMENTS: usize = 64;
pub const RADIAL_SPOKES: usize = 8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridMode {
    /// Square cells growing outward from the origin.
    #[default]
    Square,
    /// Concentric rings with radial spokes.
    Circular,
}

impl GridMode {
    pub fn toggled(self) -> Self {
        match self {
            GridMode::Square => GridMode::Circular,
            GridMode::Circular => GridMode::Square,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GridMode::Square => "Square",
            GridMode::Circular => "Circular",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Vec3,
    pub to: Vec3,
    pub color: Color,
}

/// A reference grid lying on the y = 0 plane.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub mode: GridMode,
    pub segments: Vec<Segment>,
    pub visible: bool,
}

impl Grid {
    pub fn square(palette: &Palette) -> Self {
        let half = GRID_SIZE / 2.0;
        let step = GRID_SIZE / GRID_DIVISIONS as f32;
        let centre = GRID_DIVISIONS / 2;

        let mut segments = Vec::with_capacity(2 * (GRID_DIVISIONS + 1));
        for i in 0..=GRID_DIVISIONS {
            let k = -half + i as f32 * step;
            let color = if i == centre {
                palette.grid_square
            } else {
                palette.grid_square_minor
            };
            segments.push(Segment {
                from: Vec3::new(-half, 0.0, k),
                to: Vec3::new(half, 0.0, k),
                color,
            });
            segments.push(Segment {
                from: Vec3::new(k, 0.0, -half),
                to: Vec3::new(k, 0.0, half),
                color,
            });
        }

        Grid {
            mode: GridMode::Square,
            segments,
            visible: false,
        }
    }

    pub fn circular(palette: &Palette) -> Self {
        let max_radius = GRID_SIZE / 2.0;
        let ring_step = GRID_SIZE / GRID_DIVISIONS as f32;
        let rings = GRID_DIVISIONS / 2;
        let color = palette.grid_circular;

        let mut segments = Vec::with_capacity(rings * RING_SEGMENTS + RADIAL_SPOKES);
        for ring in 1..=rings {
            let r = ring as f32 * ring_step;
            for s in 0..RING_SEGMENTS {
                let a0 = s as f32 / RING_SEGMENTS as f32 * TAU;
                let a1 = (s + 1) as f32 / RING_SEGMENTS as f32 * TAU;
                segments.push(Segment {
                    from: Vec3::new(r * a0.cos(), 0.0, r * a0.sin()),
                    to: Vec3::new(r * a1.cos(), 0.0, r * a1.sin()),
                    color,
                });
            }
        }
        for spoke in 0..RADIAL_SPOKES {
            let a = spoke as f32 / RADIAL_SPOKES as f32 * TAU;
            segments.push(Segment {
                from: Vec3::ZERO,
                to: Vec3::new(max_radius * a.cos(), 0.0, max_radius * a.sin()),
                color,
            });
        }

        Grid {
            mode: GridMode::Circular,
            segments,
            visible: false,
        }
    }
}
