//! Spectral curves, filters, the solar spectrum and the tables they are loaded from

pub mod curve;
pub mod filter;
pub mod solar;
pub mod tables;

pub use curve::{SpectralCurve, SpectralQuantity, WavelengthGrid};
pub use filter::{ConstantFilter, FilterBank, SpectralResponse, TabulatedFilter};
pub use solar::SolarSpectrum;
