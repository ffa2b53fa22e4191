//! Orbit sizing around a central body

pub mod ephemeris;
pub mod orbiter;

pub use ephemeris::{BodyConstants, BuiltinEphemeris, Ephemeris};
pub use orbiter::{Altitude, Orbiter};
