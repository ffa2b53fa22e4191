//! Table locations and mission presets

pub mod data;
pub mod presets;

pub use data::DataPaths;
