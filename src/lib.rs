pub mod camera;
pub mod color;
pub mod config;
pub mod coords;
pub mod data;
pub mod graph;
pub mod interaction;
pub mod scene;
pub mod spatial;
pub mod ui;
pub mod viewer;

pub use config::ViewerConfig;
pub use data::StarRecord;
pub use viewer::Viewer;
