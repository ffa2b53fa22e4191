//! Bandpass filter transmission models.
//!
//! Wavelength arithmetic here stays in nanometres as plain `f64` so that band
//! edges compare exactly against sample wavelengths; the `Length` based
//! methods convert once at the boundary.

use super::curve::{SpectralCurve, SpectralQuantity, WavelengthGrid};
use crate::errors::ScopeError;
use crate::units::{Length, LengthExt};

pub const DEFAULT_RESOLUTION_NM: f64 = 1.0;

const ARANGE_TOLERANCE: f64 = 1e-9;

/// Wavelength-dependent transmission of an optical element.
pub trait SpectralResponse {
    /// Transmission (0.0-1.0) at a wavelength given in nanometres
    fn transmission_at_nm(&self, wavelength_nm: f64) -> f64;

    /// Spacing of the samples produced by [`response`](Self::response), in nm
    fn resolution_nm(&self) -> f64;

    fn transmission_at(&self, wavelength: Length) -> f64 {
        self.transmission_at_nm(wavelength.as_nanometers())
    }

    /// Sample the response from `wave1_nm` in steps of the filter resolution,
    /// stopping before `wave2_nm + resolution`.
    fn response_nm(&self, wave1_nm: f64, wave2_nm: f64) -> Result<SpectralCurve, ScopeError> {
        if wave2_nm < wave1_nm {
            return Err(ScopeError::ValueOutOfRange {
                what: "response upper wavelength [nm]",
                value: wave2_nm,
            });
        }
        let step = self.resolution_nm();
        let wavelengths = arange(wave1_nm, wave2_nm + step, step);
        let response = wavelengths
            .iter()
            .map(|&w| self.transmission_at_nm(w))
            .collect();
        SpectralCurve::from_nm(wavelengths, response, SpectralQuantity::Fraction)
    }

    fn response(&self, wave1: Length, wave2: Length) -> Result<SpectralCurve, ScopeError> {
        self.response_nm(wave1.as_nanometers(), wave2.as_nanometers())
    }

    /// Transmission evaluated on an existing grid
    fn on_grid(&self, grid: &WavelengthGrid) -> SpectralCurve {
        grid.sample(SpectralQuantity::Fraction, |w| self.transmission_at_nm(w))
    }
}

// Half-open range [start, stop) in increments of `step`; `step` must be > 0.
// Bounds converted from `Length` carry rounding noise, so a stop within
// ARANGE_TOLERANCE steps of a sample still excludes that sample.
fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let n = ((stop - start) / step - ARANGE_TOLERANCE).ceil().max(0.0) as usize;
    (0..n).map(|k| start + k as f64 * step).collect()
}

fn check_resolution(resolution_nm: f64) -> Result<(), ScopeError> {
    if resolution_nm == 0.0 {
        return Err(ScopeError::DivisionByZero("filter sampling resolution"));
    }
    if !resolution_nm.is_finite() || resolution_nm < 0.0 {
        return Err(ScopeError::ValueOutOfRange {
            what: "filter sampling resolution [nm]",
            value: resolution_nm,
        });
    }
    Ok(())
}

/// Flat-top bandpass: `peak_transmission` strictly between the band edges,
/// zero elsewhere (edges excluded).
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantFilter {
    center_nm: f64,
    width_nm: f64,
    peak_transmission: f64,
    resolution_nm: f64,
}

impl ConstantFilter {
    pub fn new(
        center: Length,
        width: Length,
        peak_transmission: f64,
        resolution: Length,
    ) -> Result<Self, ScopeError> {
        Self::from_nm(
            center.as_nanometers(),
            width.as_nanometers(),
            peak_transmission,
            resolution.as_nanometers(),
        )
    }

    pub fn from_nm(
        center_nm: f64,
        width_nm: f64,
        peak_transmission: f64,
        resolution_nm: f64,
    ) -> Result<Self, ScopeError> {
        check_resolution(resolution_nm)?;
        if !width_nm.is_finite() || width_nm < 0.0 {
            return Err(ScopeError::ValueOutOfRange {
                what: "filter width [nm]",
                value: width_nm,
            });
        }
        if !(0.0..=1.0).contains(&peak_transmission) {
            return Err(ScopeError::ValueOutOfRange {
                what: "peak transmission",
                value: peak_transmission,
            });
        }

        Ok(Self {
            center_nm,
            width_nm,
            peak_transmission,
            resolution_nm,
        })
    }

    pub fn center(&self) -> Length {
        Length::from_nanometers(self.center_nm)
    }

    pub fn width(&self) -> Length {
        Length::from_nanometers(self.width_nm)
    }

    pub fn peak_transmission(&self) -> f64 {
        self.peak_transmission
    }

    /// (left, right) band edges in nm
    pub fn band_edges_nm(&self) -> (f64, f64) {
        (
            self.center_nm - self.width_nm / 2.0,
            self.center_nm + self.width_nm / 2.0,
        )
    }
}

impl SpectralResponse for ConstantFilter {
    fn transmission_at_nm(&self, wavelength_nm: f64) -> f64 {
        let (left, right) = self.band_edges_nm();
        if wavelength_nm > left && wavelength_nm < right {
            self.peak_transmission
        } else {
            0.0
        }
    }

    fn resolution_nm(&self) -> f64 {
        self.resolution_nm
    }
}

/// Filter defined by a measured transmission table.
#[derive(Debug, Clone, PartialEq)]
pub struct TabulatedFilter {
    transmission: SpectralCurve,
    resolution_nm: f64,
}

impl TabulatedFilter {
    pub fn new(transmission: SpectralCurve, resolution: Length) -> Result<Self, ScopeError> {
        if transmission.quantity() != SpectralQuantity::Fraction {
            return Err(ScopeError::unit_mismatch(
                SpectralQuantity::Fraction,
                transmission.quantity(),
            ));
        }
        let resolution_nm = resolution.as_nanometers();
        check_resolution(resolution_nm)?;
        Ok(Self {
            transmission,
            resolution_nm,
        })
    }

    pub fn table(&self) -> &SpectralCurve {
        &self.transmission
    }
}

impl SpectralResponse for TabulatedFilter {
    fn transmission_at_nm(&self, wavelength_nm: f64) -> f64 {
        self.transmission
            .value_at(Length::from_nanometers(wavelength_nm))
    }

    fn resolution_nm(&self) -> f64 {
        self.resolution_nm
    }
}

/// Named set of flat-top filters, e.g. the bandpasses of one camera.
#[derive(Debug, Clone, Default)]
pub struct FilterBank {
    filters: Vec<(String, ConstantFilter)>,
}

impl FilterBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, filter: ConstantFilter) {
        let name = name.into();
        match self.filters.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = filter,
            None => self.filters.push((name, filter)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ConstantFilter> {
        self.filters
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, f)| f)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConstantFilter)> {
        self.filters.iter().map(|(n, f)| (n.as_str(), f))
    }
}
