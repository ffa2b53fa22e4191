//! Detector and camera data-budget models

pub mod camera;
pub mod detector;

pub use camera::Camera;
pub use detector::Detector;
