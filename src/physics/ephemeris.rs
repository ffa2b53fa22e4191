use crate::errors::ScopeError;
use crate::units::{gm_from_km3_per_s2, GravitationalParameter, Length, LengthExt};
use lazy_static::lazy_static;
use std::collections::HashMap;

/// The two body constants orbit sizing needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyConstants {
    pub gm: GravitationalParameter,
    /// Mean of the three triaxial radii
    pub mean_radius: Length,
}

impl BodyConstants {
    /// From SPICE-style values: GM in km³/s² and the three radii in km.
    pub fn from_spice(gm_km3_s2: f64, radii_km: [f64; 3]) -> Self {
        let mean_km = radii_km.iter().sum::<f64>() / 3.0;
        Self {
            gm: gm_from_km3_per_s2(gm_km3_s2),
            mean_radius: Length::from_kilometers(mean_km),
        }
    }
}

/// Lookup of body constants by name.
pub trait Ephemeris {
    fn body(&self, name: &str) -> Result<BodyConstants, ScopeError>;
}

lazy_static! {
    // GM from the generic SPICE gravity kernels, radii from pck00010.tpc
    static ref BODIES: HashMap<&'static str, BodyConstants> = {
        let mut m = HashMap::new();
        m.insert("MERCURY", BodyConstants::from_spice(2.2031780000000021e4, [2439.7, 2439.7, 2439.7]));
        m.insert("VENUS", BodyConstants::from_spice(3.2485859200000006e5, [6051.8, 6051.8, 6051.8]));
        m.insert("EARTH", BodyConstants::from_spice(3.9860043543609598e5, [6378.1366, 6378.1366, 6356.7519]));
        m.insert("MOON", BodyConstants::from_spice(4.9028000661637961e3, [1737.4, 1737.4, 1737.4]));
        m.insert("MARS", BodyConstants::from_spice(4.2828314258067e4, [3396.19, 3396.19, 3376.20]));
        m.insert("JUPITER", BodyConstants::from_spice(1.266865349218008e8, [71492.0, 71492.0, 66854.0]));
        m.insert("SATURN", BodyConstants::from_spice(3.793120749865224e7, [60268.0, 60268.0, 54364.0]));
        m.insert("URANUS", BodyConstants::from_spice(5.793951322279009e6, [25559.0, 25559.0, 24973.0]));
        m.insert("NEPTUNE", BodyConstants::from_spice(6.835099502439672e6, [24764.0, 24764.0, 24341.0]));
        m
    };
}

/// Constants compiled into the crate; names are case-insensitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinEphemeris;

impl Ephemeris for BuiltinEphemeris {
    fn body(&self, name: &str) -> Result<BodyConstants, ScopeError> {
        BODIES
            .get(name.trim().to_uppercase().as_str())
            .copied()
            .ok_or_else(|| ScopeError::UnknownBody(name.to_string()))
    }
}

impl BuiltinEphemeris {
    pub fn bodies(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = BODIES.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
