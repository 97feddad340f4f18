pub mod panel;

pub use panel::{ControlAction, DetailPanel, SidePanel};
