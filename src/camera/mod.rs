pub mod focus;
pub mod orbit;

pub use focus::FocusAnimator;
pub use orbit::{OrbitCamera, Ray, Spherical};
