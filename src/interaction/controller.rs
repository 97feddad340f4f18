use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::camera::orbit::OrbitCamera;
use crate::scene::state::SceneState;

/// Pointer travel, in pixels on either axis, that turns a press into a drag.
pub const DRAG_THRESHOLD_PX: f32 = 5.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PointerState {
    #[default]
    Idle,
    /// Primary button held, not yet far enough to count as a drag.
    Tracking { press: Vec2 },
    /// Primary button held and moved; pointer motion orbits the camera.
    Dragging { last: Vec2 },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub selected: Option<usize>,
    pub hovered: Option<usize>,
}

/// What a primary-button release did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The press turned into a drag; nothing was picked.
    Dragged,
    Selected(usize),
    Deselected(usize),
    /// Released over empty space.
    Cleared,
}

/// Instructions for the host after a context (secondary-button) action.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EventResponse {
    pub prevent_default: bool,
    /// Position the camera should focus on.
    pub focus: Option<Vec3>,
}

#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    state: PointerState,
    selection: SelectionState,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn pointer_down(&mut self, pos: Vec2) {
        self.state = PointerState::Tracking { press: pos };
    }

    pub fn pointer_move(&mut self, pos: Vec2, scene: &mut SceneState, camera: &mut OrbitCamera) {
        match self.state {
            PointerState::Tracking { press } => {
                let delta = pos - press;
                if delta.x.abs() > DRAG_THRESHOLD_PX || delta.y.abs() > DRAG_THRESHOLD_PX {
                    self.state = PointerState::Dragging { last: pos };
                    orbit_by(camera, delta);
                    return;
                }
            }
            PointerState::Dragging { last } => {
                self.state = PointerState::Dragging { last: pos };
                orbit_by(camera, pos - last);
                return;
            }
            PointerState::Idle => {}
        }
        self.hover(pos, scene, camera);
    }

    pub fn pointer_up(
        &mut self,
        pos: Vec2,
        scene: &mut SceneState,
        camera: &OrbitCamera,
    ) -> ClickOutcome {
        let was_dragging = matches!(self.state, PointerState::Dragging { .. });
        self.state = PointerState::Idle;
        if was_dragging {
            return ClickOutcome::Dragged;
        }

        match pick(scene, camera, pos) {
            Some(idx) if self.selection.selected == Some(idx) => {
                self.selection.selected = None;
                scene.highlight.hide();
                debug!("deselected star {}", idx);
                ClickOutcome::Deselected(idx)
            }
            Some(idx) => {
                self.select(idx, scene);
                debug!("selected star {} ({})", idx, scene.stars[idx].record.display_name());
                ClickOutcome::Selected(idx)
            }
            None => {
                self.clear_selection(scene);
                ClickOutcome::Cleared
            }
        }
    }

    /// Secondary-button action: suppresses the context menu and asks for a
    /// focus transition onto the selected star, if any.
    pub fn context_menu(&self, scene: &SceneState) -> EventResponse {
        let focus = self
            .selection
            .selected
            .and_then(|idx| scene.star(idx))
            .map(|star| star.position);
        EventResponse {
            prevent_default: true,
            focus,
        }
    }

    /// Makes `idx` the selected star and moves the highlight onto it.
    pub fn select(&mut self, idx: usize, scene: &mut SceneState) {
        let Some(star) = scene.star(idx) else {
            return;
        };
        let position = star.position;
        self.selection.selected = Some(idx);
        scene.highlight.show_at(position);
    }

    pub fn clear_selection(&mut self, scene: &mut SceneState) {
        self.selection.selected = None;
        scene.highlight.hide();
    }

    /// Forgets selection and hover, e.g. after the stars were reloaded.
    pub fn reset(&mut self) {
        self.state = PointerState::Idle;
        self.selection = SelectionState::default();
    }

    fn hover(&mut self, pos: Vec2, scene: &mut SceneState, camera: &OrbitCamera) {
        match pick(scene, camera, pos) {
            Some(idx) => {
                self.selection.hovered = Some(idx);
                scene.highlight.show_at(scene.stars[idx].position);
            }
            None => {
                self.selection.hovered = None;
                let selected_at = self
                    .selection
                    .selected
                    .and_then(|idx| scene.star(idx))
                    .map(|star| star.position);
                match selected_at {
                    Some(position) => scene.highlight.show_at(position),
                    None => scene.highlight.hide(),
                }
            }
        }
    }
}

/// Index of the nearest star under the pointer.
pub fn pick(scene: &SceneState, camera: &OrbitCamera, pos: Vec2) -> Option<usize> {
    if scene.is_empty() {
        return None;
    }
    let ray = camera.ray_from_pointer(pos);
    scene
        .stars
        .iter()
        .filter_map(|star| {
            ray.intersect_sphere(star.position, star.radius)
                .map(|t| (star.index, t))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(idx, _)| idx)
}

fn orbit_by(camera: &mut OrbitCamera, delta: Vec2) {
    let height = camera.viewport.y;
    camera.orbit(-TAU * delta.x / height, -TAU * delta.y / height);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::palette::Palette;
    use crate::data::StarRecord;

    /// Projects a world point to viewport pixels.
    fn screen_pos(camera: &OrbitCamera, world: Vec3) -> Vec2 {
        let clip = camera.projection_matrix() * camera.view_matrix() * world.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        Vec2::new(
            (ndc.x + 1.0) / 2.0 * camera.viewport.x,
            (1.0 - ndc.y) / 2.0 * camera.viewport.y,
        )
    }

    fn setup() -> (SceneState, OrbitCamera) {
        let mut scene = SceneState::new(Palette::default(), "font");
        scene.load(vec![
            StarRecord {
                name: "Near".into(),
                ra: "00h00m00s".into(),
                dec: "+00°00′00″".into(),
                distance_ly: 4.0,
                components: Vec::new(),
            },
            StarRecord {
                name: "Far".into(),
                ra: "06h00m00s".into(),
                dec: "+00°00′00″".into(),
                distance_ly: 6.0,
                components: Vec::new(),
            },
        ]);
        (scene, OrbitCamera::new(800.0, 600.0))
    }

    fn click(
        ctl: &mut InteractionController,
        scene: &mut SceneState,
        camera: &mut OrbitCamera,
        pos: Vec2,
    ) -> ClickOutcome {
        ctl.pointer_down(pos);
        ctl.pointer_up(pos, scene, camera)
    }

    #[test]
    fn click_toggles_selection() {
        let (mut scene, mut cam) = setup();
        let mut ctl = InteractionController::new();
        let at = screen_pos(&cam, scene.stars[0].position);

        assert_eq!(click(&mut ctl, &mut scene, &mut cam, at), ClickOutcome::Selected(0));
        assert_eq!(ctl.selection().selected, Some(0));
        assert!(scene.highlight.visible);
        assert_eq!(scene.highlight.position, scene.stars[0].position);

        assert_eq!(click(&mut ctl, &mut scene, &mut cam, at), ClickOutcome::Deselected(0));
        assert_eq!(ctl.selection().selected, None);
        assert!(!scene.highlight.visible);
    }

    #[test]
    fn clicking_another_star_replaces_selection() {
        let (mut scene, mut cam) = setup();
        let mut ctl = InteractionController::new();
        let first = screen_pos(&cam, scene.stars[0].position);
        let second = screen_pos(&cam, scene.stars[1].position);

        click(&mut ctl, &mut scene, &mut cam, first);
        assert_eq!(click(&mut ctl, &mut scene, &mut cam, second), ClickOutcome::Selected(1));
        assert_eq!(ctl.selection().selected, Some(1));
        assert_eq!(scene.highlight.position, scene.stars[1].position);
    }

    #[test]
    fn empty_space_clears_selection() {
        let (mut scene, mut cam) = setup();
        let mut ctl = InteractionController::new();
        let at = screen_pos(&cam, scene.stars[0].position);
        click(&mut ctl, &mut scene, &mut cam, at);

        assert_eq!(
            click(&mut ctl, &mut scene, &mut cam, Vec2::new(5.0, 5.0)),
            ClickOutcome::Cleared
        );
        assert_eq!(ctl.selection().selected, None);
        assert!(!scene.highlight.visible);
    }

    #[test]
    fn drag_release_does_not_select() {
        let (mut scene, mut cam) = setup();
        let mut ctl = InteractionController::new();
        let at = screen_pos(&cam, scene.stars[0].position);

        ctl.pointer_down(at - Vec2::new(6.0, 0.0));
        ctl.pointer_move(at, &mut scene, &mut cam);
        assert!(matches!(ctl.state(), PointerState::Dragging { .. }));
        assert_eq!(ctl.pointer_up(at, &mut scene, &cam), ClickOutcome::Dragged);
        assert_eq!(ctl.selection().selected, None);
        assert_eq!(ctl.state(), PointerState::Idle);
    }

    #[test]
    fn small_jitter_is_still_a_click() {
        let (mut scene, mut cam) = setup();
        let mut ctl = InteractionController::new();
        let at = screen_pos(&cam, scene.stars[0].position);

        ctl.pointer_down(at);
        ctl.pointer_move(at + Vec2::new(5.0, -5.0), &mut scene, &mut cam);
        assert!(matches!(ctl.state(), PointerState::Tracking { .. }));
        assert_eq!(ctl.pointer_up(at, &mut scene, &cam), ClickOutcome::Selected(0));
    }

    #[test]
    fn hover_moves_highlight_and_falls_back_to_selection() {
        let (mut scene, mut cam) = setup();
        let mut ctl = InteractionController::new();
        let first = screen_pos(&cam, scene.stars[0].position);
        let second = screen_pos(&cam, scene.stars[1].position);

        ctl.pointer_move(second, &mut scene, &mut cam);
        assert_eq!(ctl.selection().hovered, Some(1));
        assert!(scene.highlight.visible);

        ctl.pointer_move(Vec2::new(5.0, 5.0), &mut scene, &mut cam);
        assert_eq!(ctl.selection().hovered, None);
        assert!(!scene.highlight.visible);

        click(&mut ctl, &mut scene, &mut cam, first);
        ctl.pointer_move(second, &mut scene, &mut cam);
        assert_eq!(scene.highlight.position, scene.stars[1].position);
        ctl.pointer_move(Vec2::new(5.0, 5.0), &mut scene, &mut cam);
        assert!(scene.highlight.visible);
        assert_eq!(scene.highlight.position, scene.stars[0].position);
    }

    #[test]
    fn context_menu_focuses_selected_star() {
        let (mut scene, mut cam) = setup();
        let mut ctl = InteractionController::new();

        let idle = ctl.context_menu(&scene);
        assert!(idle.prevent_default);
        assert_eq!(idle.focus, None);

        let at = screen_pos(&cam, scene.stars[1].position);
        click(&mut ctl, &mut scene, &mut cam, at);
        let resp = ctl.context_menu(&scene);
        assert_eq!(resp.focus, Some(scene.stars[1].position));
        assert_eq!(ctl.selection().selected, Some(1));
    }

    #[test]
    fn picking_an_empty_scene_is_a_miss() {
        let scene = SceneState::new(Palette::default(), "font");
        let cam = OrbitCamera::new(800.0, 600.0);
        assert_eq!(pick(&scene, &cam, Vec2::new(400.0, 300.0)), None);
    }
}
