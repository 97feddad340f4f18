use std::collections::HashMap;

use glam::Vec3;
use log::info;
use serde::{Deserialize, Serialize};

use crate::color::palette::Palette;
use crate::color::spectral::spectral_color;
use crate::color::Color;
use crate::coords::transform::ra_dec_to_xyz;
use crate::data::StarRecord;
use crate::graph::connections::{nearest_neighbor_edges, ConnectionEdge, NEAREST_NEIGHBOURS};

use super::grid::{Grid, GridMode};
use super::highlight::Highlight;

/// Pick radius of a star sphere.
pub const STAR_RADIUS: f32 = 0.1;
/// Radius of the disc at the foot of each stalk.
pub const STALK_BASE_RADIUS: f32 = 0.05;
/// Distance a label sits from its star along the camera's right and up axes.
pub const LABEL_OFFSET: f32 = 0.15;

/// A positioned star built from a catalog record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarObject {
    pub index: usize,
    pub record: StarRecord,
    pub position: Vec3,
    pub color: Color,
    pub radius: f32,
}

impl StarObject {
    pub fn from_record(index: usize, record: StarRecord) -> Self {
        let position = ra_dec_to_xyz(&record.ra, &record.dec, record.distance_ly);
        let color = spectral_color(record.spectral_type());
        StarObject {
            index,
            record,
            position,
            color,
            radius: STAR_RADIUS,
        }
    }
}

/// Vertical depth cue from a star down to the reference plane.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stalk {
    pub star: usize,
    pub top: Vec3,
    pub bottom: Vec3,
    pub color: Color,
    pub visible: bool,
}

/// Disc marking where a stalk meets the reference plane.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StalkBase {
    pub star: usize,
    pub center: Vec3,
    pub radius: f32,
    pub color: Color,
    pub visible: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConnectionLine {
    pub edge: ConnectionEdge,
    pub from: Vec3,
    pub to: Vec3,
    pub color: Color,
    pub visible: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub star: usize,
    pub text: String,
    pub anchor: Vec3,
    /// Anchor pushed out along the camera's right/up axes; refreshed every frame.
    pub position: Vec3,
    pub font: String,
    pub color: Color,
    pub visible: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionMode {
    Stalks,
    #[default]
    Connections,
}

impl ConnectionMode {
    pub fn label(self) -> &'static str {
        match self {
            ConnectionMode::Stalks => "stalks",
            ConnectionMode::Connections => "connections",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleState {
    pub grid_mode: GridMode,
    pub grid_visible: bool,
    pub connection_mode: ConnectionMode,
    pub labels_visible: bool,
}

impl Default for ToggleState {
    fn default() -> Self {
        ToggleState {
            grid_mode: GridMode::Square,
            grid_visible: true,
            connection_mode: ConnectionMode::Connections,
            labels_visible: true,
        }
    }
}

/// Owns every scene object and the toggles that decide what is drawn.
#[derive(Clone, Debug)]
pub struct SceneState {
    pub stars: Vec<StarObject>,
    pub stalks: Vec<Stalk>,
    pub stalk_bases: Vec<StalkBase>,
    pub connections: Vec<ConnectionLine>,
    pub labels: Vec<Label>,
    pub square_grid: Grid,
    pub circular_grid: Grid,
    pub highlight: Highlight,
    toggles: ToggleState,
    palette: Palette,
    font: String,
    name_index: HashMap<String, usize>,
}

impl SceneState {
    pub fn new(palette: Palette, font: impl Into<String>) -> Self {
        let mut scene = SceneState {
            stars: Vec::new(),
            stalks: Vec::new(),
            stalk_bases: Vec::new(),
            connections: Vec::new(),
            labels: Vec::new(),
            square_grid: Grid::square(&palette),
            circular_grid: Grid::circular(&palette),
            highlight: Highlight::new(&palette),
            toggles: ToggleState::default(),
            palette,
            font: font.into(),
            name_index: HashMap::new(),
        };
        scene.apply_grid_visibility();
        scene
    }

    /// Replaces the scene contents with one star (plus adornments) per record.
    pub fn load(&mut self, records: Vec<StarRecord>) {
        self.clear();

        self.stars = records
            .into_iter()
            .enumerate()
            .map(|(idx, record)| StarObject::from_record(idx, record))
            .collect();

        for star in &self.stars {
            let foot = Vec3::new(star.position.x, 0.0, star.position.z);
            self.stalks.push(Stalk {
                star: star.index,
                top: star.position,
                bottom: foot,
                color: self.palette.stalk_line,
                visible: false,
            });
            self.stalk_bases.push(StalkBase {
                star: star.index,
                center: foot,
                radius: STALK_BASE_RADIUS,
                color: self.palette.stalk_base,
                visible: false,
            });
            self.labels.push(Label {
                star: star.index,
                text: star.record.display_name().to_uppercase(),
                anchor: star.position,
                position: star.position,
                font: self.font.clone(),
                color: self.palette.label_text,
                visible: false,
            });
        }

        let positions: Vec<Vec3> = self.stars.iter().map(|s| s.position).collect();
        self.connections = nearest_neighbor_edges(&positions, NEAREST_NEIGHBOURS)
            .into_iter()
            .map(|edge| ConnectionLine {
                edge,
                from: positions[edge.a],
                to: positions[edge.b],
                color: self.palette.connection_line,
                visible: false,
            })
            .collect();

        self.rebuild_indices();
        self.apply_connection_visibility();
        self.apply_label_visibility();

        info!(
            "scene loaded: {} stars, {} connections",
            self.stars.len(),
            self.connections.len()
        );
    }

    /// Drops every star and adornment; grids and toggles are kept.
    pub fn clear(&mut self) {
        self.stars.clear();
        self.stalks.clear();
        self.stalk_bases.clear();
        self.connections.clear();
        self.labels.clear();
        self.name_index.clear();
        self.highlight.hide();
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn star(&self, idx: usize) -> Option<&StarObject> {
        self.stars.get(idx)
    }

    pub fn index_of_name(&self, name: &str) -> Option<usize> {
        self.name_index.get(name).copied()
    }

    pub fn toggles(&self) -> ToggleState {
        self.toggles
    }

    pub fn set_grid_mode(&mut self, mode: GridMode) {
        self.toggles.grid_mode = mode;
        self.apply_grid_visibility();
    }

    pub fn set_grid_visible(&mut self, visible: bool) {
        self.toggles.grid_visible = visible;
        self.apply_grid_visibility();
    }

    pub fn set_connection_mode(&mut self, mode: ConnectionMode) {
        self.toggles.connection_mode = mode;
        self.apply_connection_visibility();
    }

    pub fn set_labels_visible(&mut self, visible: bool) {
        self.toggles.labels_visible = visible;
        self.apply_label_visibility();
    }

    /// Moves each label off its star along the camera's screen axes.
    pub fn update_labels(&mut self, camera_right: Vec3, camera_up: Vec3) {
        let offset = (camera_right.normalize_or_zero() + camera_up.normalize_or_zero()) * LABEL_OFFSET;
        for label in &mut self.labels {
            label.position = label.anchor + offset;
        }
    }

    /// The grid currently drawn, if any.
    pub fn active_grid(&self) -> Option<&Grid> {
        if !self.toggles.grid_visible {
            return None;
        }
        match self.toggles.grid_mode {
            GridMode::Square => Some(&self.square_grid),
            GridMode::Circular => Some(&self.circular_grid),
        }
    }

    fn apply_grid_visibility(&mut self) {
        let ToggleState {
            grid_mode,
            grid_visible,
            ..
        } = self.toggles;
        self.square_grid.visible = grid_visible && grid_mode == GridMode::Square;
        self.circular_grid.visible = grid_visible && grid_mode == GridMode::Circular;
    }

    fn apply_connection_visibility(&mut self) {
        let stalks_on = self.toggles.connection_mode == ConnectionMode::Stalks;
        for stalk in &mut self.stalks {
            stalk.visible = stalks_on;
        }
        for base in &mut self.stalk_bases {
            base.visible = stalks_on;
        }
        for line in &mut self.connections {
            line.visible = !stalks_on;
        }
    }

    fn apply_label_visibility(&mut self) {
        let visible = self.toggles.labels_visible;
        for label in &mut self.labels {
            label.visible = visible;
        }
    }

    fn rebuild_indices(&mut self) {
        self.name_index = self
            .stars
            .iter()
            .map(|star| (star.record.display_name().to_string(), star.index))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::StarComponent;

    fn record(name: &str, ra: &str, dec: &str, d: f64, spectral: Option<&str>) -> StarRecord {
        StarRecord {
            name: name.into(),
            ra: ra.into(),
            dec: dec.into(),
            distance_ly: d,
            components: spectral
                .map(|t| {
                    vec![StarComponent {
                        name: format!("{} A", name),
                        spectral_type: Some(t.into()),
                    }]
                })
                .unwrap_or_default(),
        }
    }

    fn sample_scene() -> SceneState {
        let mut scene = SceneState::new(Palette::default(), "helvetiker_regular");
        scene.load(vec![
            record("Sol", "00h00m00s", "+00°00′00″", 0.0, Some("G2V")),
            record("Proxima Centauri", "14h29m43s", "−62°40′46″", 4.2465, Some("M5.5Ve")),
            record("Barnard's Star", "17h57m48s", "+04°41′36″", 5.96, Some("M4V")),
            record("Sirius", "06h45m09s", "−16°42′58″", 8.6, Some("A1V")),
            record("Wolf 359", "10h56m29s", "+07°00′53″", 7.86, None),
        ]);
        scene
    }

    #[test]
    fn load_builds_one_of_each_adornment_per_star() {
        let scene = sample_scene();
        assert_eq!(scene.len(), 5);
        assert_eq!(scene.stalks.len(), 5);
        assert_eq!(scene.stalk_bases.len(), 5);
        assert_eq!(scene.labels.len(), 5);
        assert!(!scene.connections.is_empty());

        for (stalk, star) in scene.stalks.iter().zip(&scene.stars) {
            assert_eq!(stalk.top, star.position);
            assert_eq!(stalk.bottom.y, 0.0);
            assert_eq!(stalk.bottom.x, star.position.x);
        }
        assert_eq!(scene.labels[1].text, "PROXIMA CENTAURI");
        assert_eq!(scene.stars[3].color, spectral_color(Some("A")));
        assert_eq!(scene.stars[4].color, Color::WHITE);
    }

    #[test]
    fn defaults_show_connections_grid_and_labels() {
        let scene = sample_scene();
        assert!(scene.connections.iter().all(|c| c.visible));
        assert!(scene.stalks.iter().all(|s| !s.visible));
        assert!(scene.stalk_bases.iter().all(|b| !b.visible));
        assert!(scene.labels.iter().all(|l| l.visible));
        assert!(scene.square_grid.visible);
        assert!(!scene.circular_grid.visible);
    }

    #[test]
    fn connection_mode_swaps_in_one_call() {
        let mut scene = sample_scene();
        scene.set_connection_mode(ConnectionMode::Stalks);
        assert!(scene.stalks.iter().all(|s| s.visible));
        assert!(scene.stalk_bases.iter().all(|b| b.visible));
        assert!(scene.connections.iter().all(|c| !c.visible));

        scene.set_connection_mode(ConnectionMode::Connections);
        assert!(scene.stalks.iter().all(|s| !s.visible));
        assert!(scene.stalk_bases.iter().all(|b| !b.visible));
        assert!(scene.connections.iter().all(|c| c.visible));
    }

    #[test]
    fn exactly_one_grid_when_visible() {
        let mut scene = sample_scene();
        scene.set_grid_mode(GridMode::Circular);
        assert!(scene.circular_grid.visible && !scene.square_grid.visible);
        assert_eq!(scene.active_grid().map(|g| g.mode), Some(GridMode::Circular));

        scene.set_grid_visible(false);
        assert!(!scene.circular_grid.visible && !scene.square_grid.visible);
        assert!(scene.active_grid().is_none());

        scene.set_grid_mode(GridMode::Square);
        assert!(!scene.square_grid.visible);
        scene.set_grid_visible(true);
        assert!(scene.square_grid.visible && !scene.circular_grid.visible);
    }

    #[test]
    fn labels_hide_and_follow_camera() {
        let mut scene = sample_scene();
        scene.set_labels_visible(false);
        assert!(scene.labels.iter().all(|l| !l.visible));

        scene.update_labels(Vec3::X, Vec3::Y);
        let label = &scene.labels[2];
        let expected = label.anchor + Vec3::new(LABEL_OFFSET, LABEL_OFFSET, 0.0);
        assert!(label.position.distance(expected) < 1e-6);
    }

    #[test]
    fn reload_replaces_everything() {
        let mut scene = sample_scene();
        scene.set_connection_mode(ConnectionMode::Stalks);
        scene.load(vec![record("Vega", "18h36m56s", "+38°47′01″", 25.04, Some("A0V"))]);
        assert_eq!(scene.len(), 1);
        assert!(scene.connections.is_empty());
        assert!(scene.stalks[0].visible);
        assert_eq!(scene.index_of_name("Vega"), Some(0));
        assert_eq!(scene.index_of_name("Sirius"), None);
    }

    #[test]
    fn empty_load_is_fine() {
        let mut scene = SceneState::new(Palette::default(), "font");
        scene.load(Vec::new());
        assert!(scene.is_empty());
        assert!(scene.connections.is_empty());
    }
}
