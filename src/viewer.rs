use glam::{Vec2, Vec3};
use log::{error, info, warn};
use serde::Serialize;

use crate::camera::focus::FocusAnimator;
use crate::camera::orbit::OrbitCamera;
use crate::color::Color;
use crate::config::ViewerConfig;
use crate::data::{DataError, StarRecord};
use crate::interaction::controller::{ClickOutcome, EventResponse, InteractionController, SelectionState};
use crate::scene::state::{SceneState, ToggleState};
use crate::ui::panel::{ControlAction, DetailPanel, SidePanel};

/// Identifies one catalog load; only the newest ticket may populate the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Everything one viewer instance owns: scene, camera, input state and the
/// focus animation. Hosts feed it events and call [`Viewer::frame`] once per
/// displayed frame.
#[derive(Debug)]
pub struct Viewer {
    config: ViewerConfig,
    scene: SceneState,
    camera: OrbitCamera,
    controller: InteractionController,
    focus: FocusAnimator,
    load_generation: u64,
    live: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct StarSnapshot {
    pub name: String,
    pub position: Vec3,
    pub color: Color,
}

#[derive(Clone, Debug, Serialize)]
pub struct CameraSnapshot {
    pub position: Vec3,
    pub target: Vec3,
}

/// Serializable summary of the viewer state.
#[derive(Clone, Debug, Serialize)]
pub struct ViewerSnapshot {
    pub stars: Vec<StarSnapshot>,
    pub connections: Vec<(usize, usize)>,
    pub toggles: ToggleState,
    pub camera: CameraSnapshot,
    pub selection: SelectionState,
    pub highlight_visible: bool,
    pub side_panel: SidePanel,
    pub detail_panel: DetailPanel,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        let scene = SceneState::new(config.palette.clone(), config.font.clone());
        let camera = OrbitCamera::new(config.viewport.width, config.viewport.height);
        Viewer {
            config,
            scene,
            camera,
            controller: InteractionController::new(),
            focus: FocusAnimator::new(),
            load_generation: 0,
            live: true,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn selection(&self) -> SelectionState {
        self.controller.selection()
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn is_focusing(&self) -> bool {
        self.focus.is_active()
    }

    /// Starts a catalog load. Any load begun earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_generation += 1;
        LoadTicket(self.load_generation)
    }

    /// Applies the outcome of a catalog load. Returns whether the scene was
    /// updated; stale tickets and torn-down viewers discard the result.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<StarRecord>, DataError>,
    ) -> bool {
        if !self.live || ticket.0 != self.load_generation {
            warn!("discarding stale catalog load {:?}", ticket);
            return false;
        }

        let records = match result {
            Ok(records) => records,
            Err(err) => {
                error!("failed to load star catalog: {}", err);
                Vec::new()
            }
        };

        self.controller.reset();
        self.focus.cancel();
        self.scene.load(records);
        true
    }

    pub fn pointer_down(&mut self, pos: Vec2) {
        if !self.live {
            return;
        }
        self.controller.pointer_down(pos);
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        if !self.live {
            return;
        }
        self.controller
            .pointer_move(pos, &mut self.scene, &mut self.camera);
    }

    pub fn pointer_up(&mut self, pos: Vec2) -> Option<ClickOutcome> {
        if !self.live {
            return None;
        }
        Some(self.controller.pointer_up(pos, &mut self.scene, &self.camera))
    }

    /// Secondary-button action. `now` is the host clock in seconds.
    pub fn context_menu(&mut self, now: f64) -> EventResponse {
        if !self.live {
            return EventResponse::default();
        }
        let response = self.controller.context_menu(&self.scene);
        if let Some(target) = response.focus {
            self.focus.request(target, now, &self.camera);
        }
        response
    }

    /// Selects a star by its display name, as if it had been clicked.
    pub fn select_by_name(&mut self, name: &str) -> Option<usize> {
        if !self.live {
            return None;
        }
        let idx = self.scene.index_of_name(name)?;
        let position = self.scene.stars[idx].position;
        self.controller.select(idx, &mut self.scene);
        info!("selected {} at {:?}", name, position);
        Some(idx)
    }

    pub fn apply_control(&mut self, action: ControlAction) {
        if !self.live {
            return;
        }
        action.apply(&mut self.scene);
    }

    /// Detail panel close button.
    pub fn close_detail(&mut self) {
        if !self.live {
            return;
        }
        self.controller.clear_selection(&mut self.scene);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.resize(width, height);
    }

    /// Per-frame update: focus animation, label placement, highlight pulse.
    pub fn frame(&mut self, now: f64) {
        if !self.live {
            return;
        }
        self.focus.update(now, &mut self.camera);
        self.scene
            .update_labels(self.camera.right(), self.camera.up());
        self.scene.highlight.pulse(now);
    }

    pub fn side_panel(&self) -> SidePanel {
        SidePanel::from_toggles(&self.scene.toggles())
    }

    pub fn detail_panel(&self) -> DetailPanel {
        DetailPanel::for_selection(&self.scene, self.controller.selection().selected)
    }

    pub fn snapshot(&self) -> ViewerSnapshot {
        ViewerSnapshot {
            stars: self
                .scene
                .stars
                .iter()
                .map(|s| StarSnapshot {
                    name: s.record.display_name().to_string(),
                    position: s.position,
                    color: s.color,
                })
                .collect(),
            connections: self
                .scene
                .connections
                .iter()
                .map(|c| (c.edge.a, c.edge.b))
                .collect(),
            toggles: self.scene.toggles(),
            camera: CameraSnapshot {
                position: self.camera.position,
                target: self.camera.target,
            },
            selection: self.controller.selection(),
            highlight_visible: self.scene.highlight.visible,
            side_panel: self.side_panel(),
            detail_panel: self.detail_panel(),
        }
    }

    /// Releases scene contents and stops reacting to input or frames.
    /// Loads still in flight are discarded when they finish.
    pub fn teardown(&mut self) {
        if !self.live {
            return;
        }
        self.live = false;
        self.focus.cancel();
        self.controller.reset();
        self.scene.clear();
        info!("viewer torn down");
    }
}
