pub mod palette;
pub mod spectral;

pub use spectral::Color;
