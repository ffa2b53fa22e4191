//! Named instrument and mission setups.

use crate::errors::ScopeError;
use crate::instrument::{Camera, Detector};
use crate::physics::Orbiter;
use crate::radiometry::RadiometryConfig;
use crate::spectral::{ConstantFilter, FilterBank};
use crate::units::{Angle, AngleExt, Length, LengthExt, Time};
use uom::si::time::second;

/// Reference mapping altitude above Mars (km)
pub const MARS_MAPPING_ALTITUDE_KM: f64 = 350.0;
/// Exposure used for the reference SNR figure (s)
pub const DEFAULT_EXPOSURE_S: f64 = 0.01;

/// 2048 x 2048 x 15 bit framing camera, 5:1 compression, 60 deg field, four bands
pub fn framing_camera() -> Camera {
    Camera::default()
}

/// Wide-angle context imager: smaller detector, wider field, one band.
pub fn context_camera() -> Result<Camera, ScopeError> {
    Camera::new(Detector::new(1024, 1024, 12), 3.0, Angle::from_degrees(90.0), 1)
}

pub fn mars_orbiter() -> Result<Orbiter, ScopeError> {
    Orbiter::mars(Length::from_kilometers(MARS_MAPPING_ALTITUDE_KM))
}

/// Sunlit Martian surface at 1.5 AU and 75 deg incidence
pub fn mars_radiometry() -> RadiometryConfig {
    RadiometryConfig::default()
}

pub fn default_exposure() -> Time {
    Time::new::<second>(DEFAULT_EXPOSURE_S)
}

/// Four broad bands spanning the framing camera's sensitivity.
pub fn framing_filters() -> Result<FilterBank, ScopeError> {
    let mut bank = FilterBank::new();
    for (name, center_nm, width_nm) in [
        ("blue", 450.0, 100.0),
        ("green", 550.0, 100.0),
        ("red", 650.0, 100.0),
        ("nir", 900.0, 200.0),
    ] {
        bank.insert(name, ConstantFilter::from_nm(center_nm, width_nm, 0.9, 1.0)?);
    }
    Ok(bank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn framing_camera_budget() {
        let camera = framing_camera();
        assert_eq!(camera.total_bits(), 2048 * 2048 * 15);
        assert_eq!(camera.n_bandpasses(), framing_filters().unwrap().len() as u32);
    }

    #[test]
    fn context_camera_is_valid() {
        let camera = context_camera().unwrap();
        assert_eq!(camera.n_pixels(), 1024 * 1024);
        assert_relative_eq!(camera.compressed_image_megabits(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn mars_orbiter_altitude() {
        let orbiter = mars_orbiter().unwrap();
        assert_relative_eq!(orbiter.altitude().as_kilometers(), 350.0, epsilon = 1e-9);
        assert_eq!(orbiter.body(), "MARS");
    }

    #[test]
    fn mars_radiometry_defaults() {
        let config = mars_radiometry();
        assert_relative_eq!(config.distance.as_au(), 1.5, epsilon = 1e-9);
        assert_relative_eq!(config.incidence.as_degrees(), 75.0, epsilon = 1e-9);
        assert!(config.filter.is_none());
    }

    #[test]
    fn filters_do_not_overlap() {
        let bank = framing_filters().unwrap();
        let mut edges: Vec<(f64, f64)> = bank.iter().map(|(_, f)| f.band_edges_nm()).collect();
        edges.sort_by(|a, b| a.0.total_cmp(&b.0));
        assert!(edges.windows(2).all(|w| w[0].1 <= w[1].0));
        assert!(bank.get("NIR").is_some());
    }
}
