//! Typed physical quantities used across the public API.
//!
//! Everything that crosses a module boundary is a `uom` quantity, so lengths
//! in kilometres cannot be mixed with wavelengths in nanometres by accident.
//! Spectral tables are the exception: they are stored as plain `f64` arrays
//! in documented canonical units (see [`crate::spectral::SpectralQuantity`]).

use crate::constants::ASTRONOMICAL_UNIT;
use uom::si::angle::{degree, radian};
use uom::si::angular_velocity::radian_per_second;
use uom::si::length::{kilometer, meter, micrometer, nanometer};
use uom::si::time::second;
use uom::si::{Quantity, ISQ, SI};
use uom::typenum::{N2, P3, Z0};

pub use uom::si::f64::{
    Angle, AngularVelocity, Area, Frequency, Information, Length, Ratio, Time, Velocity,
};

/// Product of the gravitational constant and a body's mass (m³/s²).
pub type GravitationalParameter = Quantity<ISQ<P3, Z0, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Extension trait for length conversions used for orbits and wavelengths
pub trait LengthExt {
    fn from_nanometers(nm: f64) -> Self;
    fn as_nanometers(&self) -> f64;
    fn from_micrometers(um: f64) -> Self;
    fn from_meters(m: f64) -> Self;
    fn as_meters(&self) -> f64;
    fn from_kilometers(km: f64) -> Self;
    fn as_kilometers(&self) -> f64;
    fn from_au(au: f64) -> Self;
    fn as_au(&self) -> f64;
}

impl LengthExt for Length {
    fn from_nanometers(nm: f64) -> Self {
        Length::new::<nanometer>(nm)
    }

    fn as_nanometers(&self) -> f64 {
        self.get::<nanometer>()
    }

    fn from_micrometers(um: f64) -> Self {
        Length::new::<micrometer>(um)
    }

    fn from_meters(m: f64) -> Self {
        Length::new::<meter>(m)
    }

    fn as_meters(&self) -> f64 {
        self.get::<meter>()
    }

    fn from_kilometers(km: f64) -> Self {
        Length::new::<kilometer>(km)
    }

    fn as_kilometers(&self) -> f64 {
        self.get::<kilometer>()
    }

    /// IAU 2012 astronomical unit, not uom's rounded one
    fn from_au(au: f64) -> Self {
        Length::new::<meter>(au * ASTRONOMICAL_UNIT)
    }

    fn as_au(&self) -> f64 {
        self.get::<meter>() / ASTRONOMICAL_UNIT
    }
}

pub trait AngleExt {
    fn from_degrees(deg: f64) -> Self;
    fn as_degrees(&self) -> f64;
    fn from_radians(rad: f64) -> Self;
    fn as_radians(&self) -> f64;
    /// Angle in milliradians
    fn as_mrad(&self) -> f64;
}

impl AngleExt for Angle {
    fn from_degrees(deg: f64) -> Self {
        Angle::new::<degree>(deg)
    }

    fn as_degrees(&self) -> f64 {
        self.get::<degree>()
    }

    fn from_radians(rad: f64) -> Self {
        Angle::new::<radian>(rad)
    }

    fn as_radians(&self) -> f64 {
        self.get::<radian>()
    }

    fn as_mrad(&self) -> f64 {
        self.get::<radian>() * 1000.0
    }
}

pub trait AngularVelocityExt {
    fn from_degrees_per_second(deg_s: f64) -> Self;
    fn as_degrees_per_second(&self) -> f64;
}

impl AngularVelocityExt for AngularVelocity {
    fn from_degrees_per_second(deg_s: f64) -> Self {
        AngularVelocity::new::<radian_per_second>(deg_s.to_radians())
    }

    fn as_degrees_per_second(&self) -> f64 {
        self.get::<radian_per_second>().to_degrees()
    }
}

/// Build a gravitational parameter from km³/s², the unit SPICE kernels use.
pub fn gm_from_km3_per_s2(gm: f64) -> GravitationalParameter {
    let km = Length::new::<kilometer>(1.0);
    let s = Time::new::<second>(1.0);
    km * km * km / (s * s) * gm
}

pub fn gm_as_km3_per_s2(gm: GravitationalParameter) -> f64 {
    gm.value * 1e-9
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_length_conversions() {
        let wave = Length::from_micrometers(0.55);
        assert_relative_eq!(wave.as_nanometers(), 550.0, epsilon = 1e-9);

        let alt = Length::from_kilometers(350.0);
        assert_relative_eq!(alt.as_meters(), 350_000.0, epsilon = 1e-9);

        let d = Length::from_au(1.0);
        assert_relative_eq!(d.as_meters(), ASTRONOMICAL_UNIT, max_relative = 1e-12);
    }

    #[test]
    fn test_au_matches_iau_definition() {
        let d = Length::from_kilometers(ASTRONOMICAL_UNIT / 1000.0 * 1.5);
        assert_relative_eq!(d.as_au(), 1.5, max_relative = 1e-14);
    }

    #[test]
    fn test_angle_conversions() {
        let fov = Angle::from_degrees(180.0);
        assert_relative_eq!(fov.as_radians(), std::f64::consts::PI, epsilon = 1e-12);
        assert_relative_eq!(fov.as_mrad(), std::f64::consts::PI * 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_angular_velocity_in_degrees() {
        let rate = AngularVelocity::from_degrees_per_second(0.5);
        assert_relative_eq!(rate.as_degrees_per_second(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_gm_round_trip_through_si() {
        let gm = gm_from_km3_per_s2(398_600.435436);
        assert_relative_eq!(gm.value, 3.98600435436e14, max_relative = 1e-12);
        assert_relative_eq!(gm_as_km3_per_s2(gm), 398_600.435436, max_relative = 1e-12);
    }
}
