//! Solar spectral irradiance at 1 AU.

use super::curve::{SpectralCurve, SpectralQuantity, WavelengthGrid};
use crate::constants::{
    ASTRONOMICAL_UNIT, BOLTZMANN_CONSTANT, PI, PLANCK_CONSTANT, SPEED_OF_LIGHT,
    SUN_EFFECTIVE_TEMPERATURE, SUN_RADIUS,
};
use crate::errors::ScopeError;

/// Source of the solar irradiance spectrum fed into radiometry.
#[derive(Debug, Clone, PartialEq)]
pub enum SolarSpectrum {
    /// The Sun as a blackbody of the given effective temperature (K)
    Blackbody { temperature: f64 },
    /// Measured spectrum, e.g. ASTM E490, in W m⁻² nm⁻¹ at 1 AU
    Tabulated(SpectralCurve),
}

impl Default for SolarSpectrum {
    fn default() -> Self {
        SolarSpectrum::Blackbody {
            temperature: SUN_EFFECTIVE_TEMPERATURE,
        }
    }
}

impl SolarSpectrum {
    pub fn tabulated(curve: SpectralCurve) -> Result<Self, ScopeError> {
        if curve.quantity() != SpectralQuantity::EnergyIrradiance {
            return Err(ScopeError::unit_mismatch(
                SpectralQuantity::EnergyIrradiance,
                curve.quantity(),
            ));
        }
        Ok(SolarSpectrum::Tabulated(curve))
    }

    /// Irradiance at 1 AU in W m⁻² nm⁻¹ sampled on `grid`.
    pub fn irradiance_on(&self, grid: &WavelengthGrid) -> SpectralCurve {
        match self {
            SolarSpectrum::Blackbody { temperature } => {
                let temperature = *temperature;
                grid.sample(SpectralQuantity::EnergyIrradiance, |w| {
                    blackbody_irradiance_at_1au(w, temperature)
                })
            }
            SolarSpectrum::Tabulated(curve) => curve.resample(grid),
        }
    }
}

/// Irradiance at 1 AU (W m⁻² nm⁻¹) from a sphere of solar radius radiating
/// as a blackbody: E = π B_λ(T) (R_sun / AU)².
pub fn blackbody_irradiance_at_1au(wavelength_nm: f64, temperature: f64) -> f64 {
    if wavelength_nm <= 0.0 {
        return 0.0;
    }
    let lambda = wavelength_nm * 1e-9;
    let exponent = PLANCK_CONSTANT * SPEED_OF_LIGHT / (lambda * BOLTZMANN_CONSTANT * temperature);
    let radiance =
        2.0 * PLANCK_CONSTANT * SPEED_OF_LIGHT.powi(2) / lambda.powi(5) / exponent.exp_m1();
    let dilution = (SUN_RADIUS / ASTRONOMICAL_UNIT).powi(2);

    // W m⁻² m⁻¹ -> W m⁻² nm⁻¹
    PI * radiance * dilution * 1e-9
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{Length, LengthExt};
    use approx::assert_relative_eq;

    fn grid(start: f64, stop: f64, step: f64) -> WavelengthGrid {
        WavelengthGrid::new(
            Length::from_nanometers(start),
            Length::from_nanometers(stop),
            Length::from_nanometers(step),
        )
        .unwrap()
    }

    #[test]
    fn blackbody_integrates_to_solar_constant() {
        let irradiance = SolarSpectrum::default().irradiance_on(&grid(100.0, 20_000.0, 1.0));
        assert_relative_eq!(irradiance.integrate(), 1361.0, max_relative = 0.01);
    }

    #[test]
    fn blackbody_peaks_in_the_visible() {
        let irradiance = SolarSpectrum::default().irradiance_on(&grid(200.0, 1200.0, 1.0));
        let (peak, value) = irradiance.peak();
        // Wien: 2.898e6 nm K / 5772 K
        assert_relative_eq!(peak.as_nanometers(), 502.0, epsilon = 1.5);
        assert!(value > 1.5 && value < 2.5, "peak irradiance {}", value);
    }

    #[test]
    fn tabulated_spectrum_requires_energy_irradiance() {
        let qe = SpectralCurve::from_nm(
            vec![400.0, 500.0],
            vec![0.1, 0.2],
            SpectralQuantity::Fraction,
        )
        .unwrap();
        assert!(matches!(
            SolarSpectrum::tabulated(qe),
            Err(ScopeError::UnitMismatch { .. })
        ));
    }

    #[test]
    fn tabulated_spectrum_is_resampled() {
        let table = SpectralCurve::from_nm(
            vec![300.0, 500.0, 700.0],
            vec![1.0, 2.0, 1.5],
            SpectralQuantity::EnergyIrradiance,
        )
        .unwrap();
        let sun = SolarSpectrum::tabulated(table).unwrap();
        let resampled = sun.irradiance_on(&grid(400.0, 600.0, 100.0));
        assert_eq!(resampled.len(), 3);
        assert_relative_eq!(resampled.values()[0], 1.5, epsilon = 1e-12);
        assert_relative_eq!(resampled.values()[1], 2.0, epsilon = 1e-12);
        assert_relative_eq!(resampled.values()[2], 1.75, epsilon = 1e-12);
    }
}
