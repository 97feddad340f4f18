use std::f32::consts::PI;

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

pub const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, 5.0, 12.0);
pub const DEFAULT_FOV_Y_DEGREES: f32 = 60.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 1000.0;

/// Keeps the camera off the poles where the up vector degenerates.
const POLAR_EPSILON: f32 = 1e-4;

/// A half-line used for picking.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Distance along the ray to the first hit on the sphere, if any.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_disc = disc.sqrt();
        let near = -b - sqrt_disc;
        let far = -b + sqrt_disc;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            Some(far)
        } else {
            None
        }
    }
}

/// Camera offset from the orbit target: radius, azimuth around +y
/// measured from +z, and polar angle down from +y.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spherical {
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
}

impl Spherical {
    pub fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Spherical {
                radius: 0.0,
                theta: 0.0,
                phi: 0.0,
            };
        }
        Spherical {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }
}

/// Perspective camera orbiting a target point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Viewport size in pixels.
    pub viewport: Vec2,
}

impl OrbitCamera {
    pub fn new(width: f32, height: f32) -> Self {
        OrbitCamera {
            position: DEFAULT_POSITION,
            target: Vec3::ZERO,
            fov_y_degrees: DEFAULT_FOV_Y_DEGREES,
            near: NEAR_PLANE,
            far: FAR_PLANE,
            viewport: Vec2::new(width.max(1.0), height.max(1.0)),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width.max(1.0), height.max(1.0));
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.x / self.viewport.y
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov_y_degrees.to_radians(),
            self.aspect(),
            self.near,
            self.far,
        )
    }

    /// Pixel coordinates (origin top-left) to normalised device coordinates.
    pub fn pointer_ndc(&self, pointer: Vec2) -> Vec2 {
        Vec2::new(
            pointer.x / self.viewport.x * 2.0 - 1.0,
            -(pointer.y / self.viewport.y) * 2.0 + 1.0,
        )
    }

    pub fn ray_from_pointer(&self, pointer: Vec2) -> Ray {
        let ndc = self.pointer_ndc(pointer);
        let inverse = (self.projection_matrix() * self.view_matrix()).inverse();
        let far_point = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray {
            origin: self.position,
            direction: (far_point - self.position).normalize_or_zero(),
        }
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize_or_zero()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward()).normalize_or_zero()
    }

    pub fn spherical_offset(&self) -> Spherical {
        Spherical::from_offset(self.position - self.target)
    }

    pub fn set_spherical_offset(&mut self, spherical: Spherical) {
        self.position = self.target + spherical.to_offset();
    }

    /// Rotates the camera around its target.
    pub fn orbit(&mut self, d_theta: f32, d_phi: f32) {
        let mut s = self.spherical_offset();
        s.theta += d_theta;
        s.phi = (s.phi + d_phi).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.set_spherical_offset(s);
    }
}
