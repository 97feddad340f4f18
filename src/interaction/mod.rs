pub mod controller;

pub use controller::{ClickOutcome, EventResponse, InteractionController, PointerState, SelectionState};
