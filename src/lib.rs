//! Back-of-the-envelope sizing for planetary imaging instruments: detector
//! data budgets, circular-orbit geometry and shot-noise limited radiometry.

pub mod config;
pub mod constants;
pub mod errors;
pub mod instrument;
pub mod physics;
pub mod radiometry;
pub mod spectral;
pub mod units;

pub use errors::{DataLoadError, ScopeError};
pub use instrument::{Camera, Detector};
pub use physics::{Altitude, BuiltinEphemeris, Ephemeris, Orbiter};
pub use radiometry::{Radiometry, RadiometryConfig};
