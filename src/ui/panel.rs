use serde::{Deserialize, Serialize};

use crate::scene::grid::GridMode;
use crate::scene::state::{ConnectionMode, SceneState, ToggleState};

/// A side-panel control being operated. Each maps onto exactly one scene
/// mutator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "control", content = "value", rename_all = "snake_case")]
pub enum ControlAction {
    ToggleGridMode,
    SetGridVisible(bool),
    SetLabelsVisible(bool),
    SetConnectionMode(ConnectionMode),
}

impl ControlAction {
    pub fn apply(self, scene: &mut SceneState) {
        match self {
            ControlAction::ToggleGridMode => {
                let next = scene.toggles().grid_mode.toggled();
                scene.set_grid_mode(next);
            }
            ControlAction::SetGridVisible(visible) => scene.set_grid_visible(visible),
            ControlAction::SetLabelsVisible(visible) => scene.set_labels_visible(visible),
            ControlAction::SetConnectionMode(mode) => scene.set_connection_mode(mode),
        }
    }
}

/// State of the side-panel controls as they should be drawn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SidePanel {
    pub grid_mode: GridMode,
    pub grid_mode_button: String,
    pub grid_visible: bool,
    pub labels_visible: bool,
    pub connection_mode: ConnectionMode,
    pub connection_choices: [ConnectionMode; 2],
}

impl SidePanel {
    pub fn from_toggles(toggles: &ToggleState) -> Self {
        SidePanel {
            grid_mode: toggles.grid_mode,
            grid_mode_button: format!("Grid: {}", toggles.grid_mode.label()),
            grid_visible: toggles.grid_visible,
            labels_visible: toggles.labels_visible,
            connection_mode: toggles.connection_mode,
            connection_choices: [ConnectionMode::Stalks, ConnectionMode::Connections],
        }
    }
}

/// Read-only details of the selected star.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailPanel {
    pub open: bool,
    pub name: String,
    pub distance: String,
    pub spectral_type: String,
}

impl DetailPanel {
    pub fn for_selection(scene: &SceneState, selected: Option<usize>) -> Self {
        let Some(star) = selected.and_then(|idx| scene.star(idx)) else {
            return DetailPanel::default();
        };
        let record = &star.record;
        DetailPanel {
            open: true,
            name: record.display_name().to_string(),
            distance: format!("{} ly", record.distance_ly),
            spectral_type: record.spectral_type().unwrap_or("Unknown").to_string(),
        }
    }
}
