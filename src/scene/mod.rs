pub mod grid;
pub mod highlight;
pub mod state;

pub use grid::GridMode;
pub use state::{ConnectionMode, SceneState, StarObject, ToggleState};
