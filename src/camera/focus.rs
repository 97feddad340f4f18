use glam::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};

use super::orbit::OrbitCamera;

/// Seconds a focus transition takes.
pub const FOCUS_DURATION: f64 = 2.0;
/// Camera distance from the focused star once the transition ends.
pub const CLOSE_UP_RADIUS: f32 = 2.0;

/// An in-flight focus transition.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FocusRequest {
    pub target: Vec3,
    pub started_at: f64,
    origin_target: Vec3,
    origin_radius: f32,
}

/// Moves the orbit target onto a star and pulls the camera in to a
/// close-up radius over `FOCUS_DURATION`. One transition at a time; a new
/// request replaces the current one.
#[derive(Clone, Debug, Default)]
pub struct FocusAnimator {
    request: Option<FocusRequest>,
}

impl FocusAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, target: Vec3, now: f64, camera: &OrbitCamera) {
        if self.request.is_some() {
            debug!("replacing in-flight focus with {:?}", target);
        }
        self.request = Some(FocusRequest {
            target,
            started_at: now,
            origin_target: camera.target,
            origin_radius: camera.spherical_offset().radius,
        });
    }

    pub fn is_active(&self) -> bool {
        self.request.is_some()
    }

    pub fn cancel(&mut self) {
        self.request = None;
    }

    /// Advances the transition to `now`. Returns true while a transition
    /// was applied this frame.
    pub fn update(&mut self, now: f64, camera: &mut OrbitCamera) -> bool {
        let Some(req) = self.request else {
            return false;
        };

        let t = ((now - req.started_at) / FOCUS_DURATION).clamp(0.0, 1.0) as f32;

        // bearing/elevation are read from the live offset every frame
        let mut spherical = camera.spherical_offset();
        camera.target = req.origin_target.lerp(req.target, t);
        spherical.radius = req.origin_radius + (CLOSE_UP_RADIUS - req.origin_radius) * t;
        camera.set_spherical_offset(spherical);

        if t >= 1.0 {
            self.request = None;
        }
        true
    }
}
