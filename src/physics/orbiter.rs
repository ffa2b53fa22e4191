use super::ephemeris::{BuiltinEphemeris, Ephemeris};
use crate::constants::TAU;
use crate::errors::ScopeError;
use crate::units::{
    gm_as_km3_per_s2, AngularVelocity, AngularVelocityExt, GravitationalParameter, Length,
    LengthExt, Ratio, Time, Velocity,
};
use log::warn;
use std::fmt;
use uom::si::angular_velocity::radian_per_second;
use uom::si::ratio::ratio;
use uom::si::time::{hour, second};
use uom::si::velocity::meter_per_second;

/// Altitude input for the per-body constructors.
///
/// A bare number carries no unit; it is read as kilometres and a warning is
/// logged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Altitude {
    Quantity(Length),
    Bare(f64),
}

impl From<Length> for Altitude {
    fn from(length: Length) -> Self {
        Altitude::Quantity(length)
    }
}

impl From<f64> for Altitude {
    fn from(value: f64) -> Self {
        Altitude::Bare(value)
    }
}

impl Altitude {
    pub fn resolve(self) -> Length {
        match self {
            Altitude::Quantity(length) => length,
            Altitude::Bare(value) => {
                warn!(
                    "Altitude {} given without a unit, assuming kilometers",
                    value
                );
                Length::from_kilometers(value)
            }
        }
    }
}

/// Circular orbit around a spherical central body.
#[derive(Debug, Clone, PartialEq)]
pub struct Orbiter {
    body: String,
    gm: GravitationalParameter,
    body_radius: Length,
    altitude: Length,
}

impl Orbiter {
    /// Fails with `DivisionByZero` for zero altitude and `ValueOutOfRange`
    /// when the orbit radius is not positive.
    pub fn new(
        gm: GravitationalParameter,
        body_radius: Length,
        altitude: Length,
    ) -> Result<Self, ScopeError> {
        Self::named("custom", gm, body_radius, altitude)
    }

    fn named(
        body: &str,
        gm: GravitationalParameter,
        body_radius: Length,
        altitude: Length,
    ) -> Result<Self, ScopeError> {
        if !(gm.value > 0.0) {
            return Err(ScopeError::ValueOutOfRange {
                what: "gravitational parameter [m^3/s^2]",
                value: gm.value,
            });
        }
        if !(body_radius.as_meters() > 0.0) {
            return Err(ScopeError::ValueOutOfRange {
                what: "body radius [m]",
                value: body_radius.as_meters(),
            });
        }
        if altitude.as_meters() == 0.0 {
            return Err(ScopeError::DivisionByZero("altitude"));
        }
        let orbit_radius = body_radius + altitude;
        if !(orbit_radius.as_meters() > 0.0) {
            return Err(ScopeError::ValueOutOfRange {
                what: "orbit radius [m]",
                value: orbit_radius.as_meters(),
            });
        }

        Ok(Self {
            body: body.to_string(),
            gm,
            body_radius,
            altitude,
        })
    }

    /// Look the central body up by name.
    pub fn around<E: Ephemeris + ?Sized>(
        ephemeris: &E,
        body: &str,
        altitude: impl Into<Altitude>,
    ) -> Result<Self, ScopeError> {
        let constants = ephemeris.body(body)?;
        Self::named(
            &body.trim().to_uppercase(),
            constants.gm,
            constants.mean_radius,
            altitude.into().resolve(),
        )
    }

    pub fn mars(altitude: impl Into<Altitude>) -> Result<Self, ScopeError> {
        Self::around(&BuiltinEphemeris, "MARS", altitude)
    }

    pub fn earth(altitude: impl Into<Altitude>) -> Result<Self, ScopeError> {
        Self::around(&BuiltinEphemeris, "EARTH", altitude)
    }

    pub fn venus(altitude: impl Into<Altitude>) -> Result<Self, ScopeError> {
        Self::around(&BuiltinEphemeris, "VENUS", altitude)
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn gm(&self) -> GravitationalParameter {
        self.gm
    }

    pub fn body_radius(&self) -> Length {
        self.body_radius
    }

    pub fn altitude(&self) -> Length {
        self.altitude
    }

    pub fn orbit_radius(&self) -> Length {
        self.body_radius + self.altitude
    }

    /// Circular orbital velocity v = sqrt(GM / R)
    pub fn orbital_velocity(&self) -> Velocity {
        (self.gm / self.orbit_radius()).sqrt()
    }

    pub fn orbit_circumference(&self) -> Length {
        self.orbit_radius() * TAU
    }

    pub fn surface_circumference(&self) -> Length {
        self.body_radius * TAU
    }

    pub fn orbital_period(&self) -> Time {
        self.orbit_circumference() / self.orbital_velocity()
    }

    /// Speed of the sub-spacecraft point over the surface
    pub fn ground_track_speed(&self) -> Velocity {
        self.surface_circumference() / self.orbital_period()
    }

    pub fn ground_travel(&self, duration: Time) -> Length {
        self.ground_track_speed() * duration
    }

    /// Rate at which a nadir instrument must rotate to stay on one ground
    /// point: the angle subtended at the spacecraft by one second of ground
    /// travel.
    pub fn slew_rate(&self) -> AngularVelocity {
        let one_second = Time::new::<second>(1.0);
        let tan: Ratio = self.ground_travel(one_second) / self.altitude;
        let angle_rad = tan.get::<ratio>().atan();
        AngularVelocity::new::<radian_per_second>(angle_rad / one_second.get::<second>())
    }
}

impl fmt::Display for Orbiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Central body: {}", self.body)?;
        writeln!(f, "GM: {:.3} km^3/s^2", gm_as_km3_per_s2(self.gm))?;
        writeln!(f, "Body radius: {:.3} km", self.body_radius.as_kilometers())?;
        writeln!(f, "Altitude: {:.3} km", self.altitude.as_kilometers())?;
        writeln!(
            f,
            "Orbital velocity: {:.2} m/s",
            self.orbital_velocity().get::<meter_per_second>()
        )?;
        writeln!(
            f,
            "Orbital period: {:.3} h",
            self.orbital_period().get::<hour>()
        )?;
        writeln!(
            f,
            "Ground track speed: {:.2} m/s",
            self.ground_track_speed().get::<meter_per_second>()
        )?;
        writeln!(
            f,
            "Slew rate: {:.4} deg/s",
            self.slew_rate().as_degrees_per_second()
        )
    }
}
