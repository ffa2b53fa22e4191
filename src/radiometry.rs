//! Shot-noise limited signal estimate for a camera looking at a sunlit
//! surface.
//!
//! The pipeline runs once, at construction:
//!
//! 1. solar irradiance at 1 AU, W m⁻² nm⁻¹
//! 2. photon irradiance `E_ph = E_w λ / (h c)`
//! 3. surface radiance `L = E_ph / d² · cos(i) / π · reflectance`
//! 4. count rate `CR = L · A_t · A_p · T_M1 · T_M2 · T_filter · QE / f²`
//!
//! Every curve is resampled onto the configured [`WavelengthGrid`] before it
//! takes part in any product.

use crate::constants::{
    DEFAULT_DISTANCE_AU, DEFAULT_INCIDENCE_DEG, FILTER_TRANSMISSION, FOCAL_LENGTH,
    MIRROR_TRANSMISSION, PI, PIXEL_AREA, PLANCK_CONSTANT, SPEED_OF_LIGHT, TELESCOPE_APERTURE_AREA,
};
use crate::errors::ScopeError;
use crate::spectral::{
    SolarSpectrum, SpectralCurve, SpectralQuantity, SpectralResponse, WavelengthGrid,
};
use crate::units::{Angle, AngleExt, Area, Frequency, Length, LengthExt, Time};
use log::debug;
use std::fmt;
use std::sync::Arc;
use uom::si::area::square_meter;
use uom::si::frequency::hertz;
use uom::si::ratio::ratio;

/// Geometry and optics of one radiometric observation.
#[derive(Clone)]
pub struct RadiometryConfig {
    pub grid: WavelengthGrid,
    /// Solar incidence angle on the target surface
    pub incidence: Angle,
    /// Sun to target distance
    pub distance: Length,
    pub aperture_area: Area,
    pub pixel_area: Area,
    pub focal_length: Length,
    pub primary_mirror_transmission: f64,
    pub secondary_mirror_transmission: f64,
    /// Scalar filter transmission, used when `filter` is `None`
    pub filter_transmission: f64,
    pub filter: Option<Arc<dyn SpectralResponse + Send + Sync>>,
}

impl Default for RadiometryConfig {
    fn default() -> Self {
        Self {
            grid: WavelengthGrid::default(),
            incidence: Angle::from_degrees(DEFAULT_INCIDENCE_DEG),
            distance: Length::from_au(DEFAULT_DISTANCE_AU),
            aperture_area: Area::new::<square_meter>(TELESCOPE_APERTURE_AREA),
            pixel_area: Area::new::<square_meter>(PIXEL_AREA),
            focal_length: Length::from_meters(FOCAL_LENGTH),
            primary_mirror_transmission: MIRROR_TRANSMISSION,
            secondary_mirror_transmission: MIRROR_TRANSMISSION,
            filter_transmission: FILTER_TRANSMISSION,
            filter: None,
        }
    }
}

impl fmt::Debug for RadiometryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadiometryConfig")
            .field("grid", &self.grid)
            .field("incidence_deg", &self.incidence.as_degrees())
            .field("distance_au", &self.distance.as_au())
            .field("aperture_area_m2", &self.aperture_area.get::<square_meter>())
            .field("pixel_area_m2", &self.pixel_area.get::<square_meter>())
            .field("focal_length_m", &self.focal_length.as_meters())
            .field("primary_mirror_transmission", &self.primary_mirror_transmission)
            .field("secondary_mirror_transmission", &self.secondary_mirror_transmission)
            .field("filter_transmission", &self.filter_transmission)
            .field("filter", &self.filter.is_some())
            .finish()
    }
}

impl RadiometryConfig {
    pub fn with_grid(mut self, grid: WavelengthGrid) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_incidence(mut self, incidence: Angle) -> Self {
        self.incidence = incidence;
        self
    }

    pub fn with_distance(mut self, distance: Length) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_aperture_area(mut self, area: Area) -> Self {
        self.aperture_area = area;
        self
    }

    pub fn with_pixel_area(mut self, area: Area) -> Self {
        self.pixel_area = area;
        self
    }

    pub fn with_focal_length(mut self, focal_length: Length) -> Self {
        self.focal_length = focal_length;
        self
    }

    pub fn with_mirror_transmissions(mut self, primary: f64, secondary: f64) -> Self {
        self.primary_mirror_transmission = primary;
        self.secondary_mirror_transmission = secondary;
        self
    }

    pub fn with_filter_transmission(mut self, transmission: f64) -> Self {
        self.filter_transmission = transmission;
        self
    }

    /// Replace the scalar filter transmission with a spectral response.
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: SpectralResponse + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    fn validate(&self) -> Result<(), ScopeError> {
        let focal_length_m = self.focal_length.as_meters();
        if focal_length_m == 0.0 {
            return Err(ScopeError::DivisionByZero("focal length"));
        }
        if !focal_length_m.is_finite() || focal_length_m < 0.0 {
            return Err(ScopeError::ValueOutOfRange {
                what: "focal length [m]",
                value: focal_length_m,
            });
        }

        let distance_au = self.distance.as_au();
        if distance_au == 0.0 {
            return Err(ScopeError::DivisionByZero("target distance"));
        }
        if !distance_au.is_finite() || distance_au < 0.0 {
            return Err(ScopeError::ValueOutOfRange {
                what: "target distance [AU]",
                value: distance_au,
            });
        }

        for (what, value) in [
            ("aperture area [m^2]", self.aperture_area.get::<square_meter>()),
            ("pixel area [m^2]", self.pixel_area.get::<square_meter>()),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ScopeError::ValueOutOfRange { what, value });
            }
        }

        for (what, value) in [
            ("primary mirror transmission", self.primary_mirror_transmission),
            ("secondary mirror transmission", self.secondary_mirror_transmission),
            ("filter transmission", self.filter_transmission),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ScopeError::ValueOutOfRange { what, value });
            }
        }
        Ok(())
    }
}

/// Evaluated radiometric model. Immutable once built.
#[derive(Debug, Clone)]
pub struct Radiometry {
    config: RadiometryConfig,
    solar_irradiance: SpectralCurve,
    reflectance: SpectralCurve,
    quantum_efficiency: SpectralCurve,
    filter_transmission: SpectralCurve,
    photon_irradiance: SpectralCurve,
    surface_radiance: SpectralCurve,
    count_rate: SpectralCurve,
}

impl Radiometry {
    /// Resample the inputs onto `config.grid` and evaluate the pipeline.
    ///
    /// `reflectance` and `quantum_efficiency` must be fraction curves; any
    /// other quantity is a `UnitMismatch`.
    pub fn new(
        config: RadiometryConfig,
        solar: &SolarSpectrum,
        reflectance: &SpectralCurve,
        quantum_efficiency: &SpectralCurve,
    ) -> Result<Self, ScopeError> {
        config.validate()?;
        expect_fraction(reflectance)?;
        expect_fraction(quantum_efficiency)?;

        let grid = config.grid;
        debug!(
            "Radiometry grid {:.1}-{:.1} nm step {} nm ({} samples)",
            grid.start().as_nanometers(),
            grid.stop().as_nanometers(),
            grid.step().as_nanometers(),
            grid.len()
        );

        let solar_irradiance = solar.irradiance_on(&grid);
        let reflectance = reflectance.resample(&grid);
        let quantum_efficiency = quantum_efficiency.resample(&grid);
        let filter_transmission = match &config.filter {
            Some(filter) => filter.on_grid(&grid),
            None => {
                let t = config.filter_transmission;
                grid.sample(SpectralQuantity::Fraction, |_| t)
            }
        };

        let hc = PLANCK_CONSTANT * SPEED_OF_LIGHT;
        let photon_irradiance = solar_irradiance.convert(
            SpectralQuantity::EnergyIrradiance,
            SpectralQuantity::PhotonIrradiance,
            |wavelength_nm, e_w| e_w * wavelength_nm * 1e-9 / hc,
        )?;

        let distance_au = config.distance.as_au();
        let geometry = config.incidence.as_radians().cos() / PI / (distance_au * distance_au);
        let surface_radiance = photon_irradiance
            .convert(
                SpectralQuantity::PhotonIrradiance,
                SpectralQuantity::PhotonRadiance,
                |_, e_ph| e_ph * geometry,
            )?
            .multiply(&reflectance)?;

        // A_t A_p / f² in m²
        let collecting: Area =
            config.aperture_area * config.pixel_area / (config.focal_length * config.focal_length);
        let throughput = collecting.get::<square_meter>()
            * config.primary_mirror_transmission
            * config.secondary_mirror_transmission;
        let count_rate = surface_radiance
            .convert(
                SpectralQuantity::PhotonRadiance,
                SpectralQuantity::CountRate,
                |_, l| l * throughput,
            )?
            .multiply(&filter_transmission)?
            .multiply(&quantum_efficiency)?;

        let model = Self {
            config,
            solar_irradiance,
            reflectance,
            quantum_efficiency,
            filter_transmission,
            photon_irradiance,
            surface_radiance,
            count_rate,
        };
        debug!(
            "Signal rate {:.3e} counts/s",
            model.signal_rate().get::<hertz>()
        );
        Ok(model)
    }

    pub fn config(&self) -> &RadiometryConfig {
        &self.config
    }

    pub fn grid(&self) -> &WavelengthGrid {
        &self.config.grid
    }

    /// Solar irradiance at 1 AU on the grid
    pub fn solar_irradiance(&self) -> &SpectralCurve {
        &self.solar_irradiance
    }

    pub fn reflectance(&self) -> &SpectralCurve {
        &self.reflectance
    }

    pub fn quantum_efficiency(&self) -> &SpectralCurve {
        &self.quantum_efficiency
    }

    pub fn filter_transmission(&self) -> &SpectralCurve {
        &self.filter_transmission
    }

    pub fn photon_irradiance(&self) -> &SpectralCurve {
        &self.photon_irradiance
    }

    pub fn surface_radiance(&self) -> &SpectralCurve {
        &self.surface_radiance
    }

    pub fn count_rate(&self) -> &SpectralCurve {
        &self.count_rate
    }

    /// Counts per second in one pixel: the count-rate curve summed over the
    /// grid with rectangle weights of one grid step.
    pub fn signal_rate(&self) -> Frequency {
        let step_nm = self.config.grid.step().as_nanometers();
        Frequency::new::<hertz>(self.count_rate.sum() * step_nm)
    }

    /// Poisson shot-noise limited SNR for one exposure. Non-positive
    /// exposures give zero.
    pub fn snr(&self, exposure: Time) -> f64 {
        let counts = (self.signal_rate() * exposure).get::<ratio>();
        counts.max(0.0).sqrt()
    }
}

fn expect_fraction(curve: &SpectralCurve) -> Result<(), ScopeError> {
    if curve.quantity() != SpectralQuantity::Fraction {
        return Err(ScopeError::unit_mismatch(
            SpectralQuantity::Fraction,
            curve.quantity(),
        ));
    }
    Ok(())
}
