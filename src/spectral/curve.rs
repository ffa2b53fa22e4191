//! Sampled spectral curves and the grids they are resampled onto.
//!
//! Every curve in the crate (filter transmission, reflectance, QE, solar
//! irradiance, count rate) is a pair of aligned sequences: wavelengths in
//! nanometres, ascending, and values in the unit named by the curve's
//! [`SpectralQuantity`]. Curves with different native sampling are brought
//! onto a shared [`WavelengthGrid`] with [`SpectralCurve::resample`] before
//! any arithmetic combines them.
//!
//! Lookups outside the tabulated range return the nearest boundary value.

use crate::constants::{DEFAULT_DLAMBDA_NM, DEFAULT_WAVE_START_NM, DEFAULT_WAVE_STOP_NM};
use crate::errors::ScopeError;
use crate::units::{Length, LengthExt};
use std::fmt;

/// Relative tolerance when comparing grid wavelengths
const GRID_TOLERANCE: f64 = 1e-9;
/// Upper bound on grid samples, far beyond any useful spectral resolution
pub const MAX_GRID_SAMPLES: usize = 10_000_000;

/// Physical meaning and unit of a curve's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectralQuantity {
    /// Dimensionless fraction: transmission, reflectance, quantum efficiency
    Fraction,
    /// W m⁻² nm⁻¹
    EnergyIrradiance,
    /// photons s⁻¹ m⁻² nm⁻¹
    PhotonIrradiance,
    /// photons s⁻¹ m⁻² sr⁻¹ nm⁻¹
    PhotonRadiance,
    /// counts s⁻¹ nm⁻¹ in one pixel
    CountRate,
}

impl SpectralQuantity {
    pub fn unit_label(&self) -> &'static str {
        match self {
            SpectralQuantity::Fraction => "1",
            SpectralQuantity::EnergyIrradiance => "W m-2 nm-1",
            SpectralQuantity::PhotonIrradiance => "ph s-1 m-2 nm-1",
            SpectralQuantity::PhotonRadiance => "ph s-1 m-2 sr-1 nm-1",
            SpectralQuantity::CountRate => "counts s-1 nm-1",
        }
    }
}

impl fmt::Display for SpectralQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} [{}]", self, self.unit_label())
    }
}

/// Evenly spaced wavelengths from `start` to `stop`, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavelengthGrid {
    start_nm: f64,
    stop_nm: f64,
    step_nm: f64,
}

impl WavelengthGrid {
    pub fn new(start: Length, stop: Length, step: Length) -> Result<Self, ScopeError> {
        let (start_nm, stop_nm, step_nm) =
            (start.as_nanometers(), stop.as_nanometers(), step.as_nanometers());

        if step_nm == 0.0 {
            return Err(ScopeError::DivisionByZero("wavelength step"));
        }
        if !step_nm.is_finite() || step_nm < 0.0 {
            return Err(ScopeError::ValueOutOfRange {
                what: "wavelength step [nm]",
                value: step_nm,
            });
        }
        if !start_nm.is_finite() || start_nm < 0.0 {
            return Err(ScopeError::ValueOutOfRange {
                what: "grid start [nm]",
                value: start_nm,
            });
        }
        if !stop_nm.is_finite() || stop_nm < start_nm {
            return Err(ScopeError::ValueOutOfRange {
                what: "grid stop [nm]",
                value: stop_nm,
            });
        }
        let intervals = (stop_nm - start_nm) / step_nm;
        if !(intervals < MAX_GRID_SAMPLES as f64) {
            return Err(ScopeError::ValueOutOfRange {
                what: "grid sample count",
                value: intervals + 1.0,
            });
        }

        Ok(Self {
            start_nm,
            stop_nm,
            step_nm,
        })
    }

    pub fn start(&self) -> Length {
        Length::from_nanometers(self.start_nm)
    }

    pub fn stop(&self) -> Length {
        Length::from_nanometers(self.stop_nm)
    }

    pub fn step(&self) -> Length {
        Length::from_nanometers(self.step_nm)
    }

    pub fn len(&self) -> usize {
        ((self.stop_nm - self.start_nm) / self.step_nm + GRID_TOLERANCE).floor() as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn points_nm(&self) -> Vec<f64> {
        (0..self.len())
            .map(|k| self.start_nm + k as f64 * self.step_nm)
            .collect()
    }

    /// Evaluate `f` (wavelength in nm) at every grid point.
    pub fn sample<F>(&self, quantity: SpectralQuantity, f: F) -> SpectralCurve
    where
        F: Fn(f64) -> f64,
    {
        let wavelengths_nm = self.points_nm();
        let values = wavelengths_nm.iter().map(|&w| f(w)).collect();
        SpectralCurve {
            wavelengths_nm,
            values,
            quantity,
        }
    }
}

impl Default for WavelengthGrid {
    /// 200-1200 nm at 1 nm
    fn default() -> Self {
        Self {
            start_nm: DEFAULT_WAVE_START_NM,
            stop_nm: DEFAULT_WAVE_STOP_NM,
            step_nm: DEFAULT_DLAMBDA_NM,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpectralCurve {
    wavelengths_nm: Vec<f64>,
    values: Vec<f64>,
    quantity: SpectralQuantity,
}

impl SpectralCurve {
    /// Build a curve from wavelengths in nanometres and matching values.
    ///
    /// Rows are sorted by wavelength. Fails if the sequences differ in
    /// length, are empty, contain non-finite numbers or repeat a wavelength.
    pub fn from_nm(
        wavelengths_nm: Vec<f64>,
        values: Vec<f64>,
        quantity: SpectralQuantity,
    ) -> Result<Self, ScopeError> {
        if wavelengths_nm.len() != values.len() {
            return Err(ScopeError::GridMismatch {
                expected: wavelengths_nm.len(),
                found: values.len(),
            });
        }
        if wavelengths_nm.is_empty() {
            return Err(ScopeError::ValueOutOfRange {
                what: "curve length",
                value: 0.0,
            });
        }
        if let Some(&bad) = wavelengths_nm
            .iter()
            .chain(values.iter())
            .find(|v| !v.is_finite())
        {
            return Err(ScopeError::ValueOutOfRange {
                what: "curve sample",
                value: bad,
            });
        }

        let mut rows: Vec<(f64, f64)> = wavelengths_nm.into_iter().zip(values).collect();
        rows.sort_by(|a, b| a.0.total_cmp(&b.0));
        if let Some(pair) = rows.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(ScopeError::ValueOutOfRange {
                what: "duplicate wavelength [nm]",
                value: pair[0].0,
            });
        }

        let (wavelengths_nm, values) = rows.into_iter().unzip();
        Ok(Self {
            wavelengths_nm,
            values,
            quantity,
        })
    }

    pub fn quantity(&self) -> SpectralQuantity {
        self.quantity
    }

    pub fn len(&self) -> usize {
        self.wavelengths_nm.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelengths_nm.is_empty()
    }

    pub fn wavelengths_nm(&self) -> &[f64] {
        &self.wavelengths_nm
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// (wavelength nm, value) pairs
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.wavelengths_nm
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    pub fn wavelength_range(&self) -> (Length, Length) {
        (
            Length::from_nanometers(self.wavelengths_nm[0]),
            Length::from_nanometers(self.wavelengths_nm[self.len() - 1]),
        )
    }

    pub fn contains(&self, wavelength: Length) -> bool {
        let (lo, hi) = self.wavelength_range();
        wavelength >= lo && wavelength <= hi
    }

    /// Linearly interpolated value, clamped to the boundary values outside
    /// the tabulated range.
    pub fn value_at(&self, wavelength: Length) -> f64 {
        interpolate_clamped(&self.wavelengths_nm, &self.values, wavelength.as_nanometers())
    }

    /// Like [`value_at`](Self::value_at) but reports `ValueOutOfRange`
    /// instead of clamping.
    pub fn value_at_strict(&self, wavelength: Length) -> Result<f64, ScopeError> {
        if !self.contains(wavelength) {
            return Err(ScopeError::ValueOutOfRange {
                what: "wavelength outside table [nm]",
                value: wavelength.as_nanometers(),
            });
        }
        Ok(self.value_at(wavelength))
    }

    /// Resample onto `grid` by linear interpolation.
    pub fn resample(&self, grid: &WavelengthGrid) -> SpectralCurve {
        grid.sample(self.quantity, |w| {
            interpolate_clamped(&self.wavelengths_nm, &self.values, w)
        })
    }

    /// Insert a synthetic row, replacing any existing row at that wavelength.
    pub fn with_point(mut self, wavelength_nm: f64, value: f64) -> Self {
        let idx = self.wavelengths_nm.partition_point(|&w| w < wavelength_nm);
        if self.wavelengths_nm.get(idx) == Some(&wavelength_nm) {
            self.values[idx] = value;
        } else {
            self.wavelengths_nm.insert(idx, wavelength_nm);
            self.values.insert(idx, value);
        }
        self
    }

    pub fn same_grid(&self, other: &SpectralCurve) -> bool {
        self.len() == other.len()
            && self
                .wavelengths_nm
                .iter()
                .zip(&other.wavelengths_nm)
                .all(|(a, b)| (a - b).abs() <= GRID_TOLERANCE * a.abs().max(1.0))
    }

    /// Sample-wise product of two curves on the same grid.
    ///
    /// At least one factor must be a [`SpectralQuantity::Fraction`]; the
    /// result carries the other factor's quantity.
    pub fn multiply(&self, other: &SpectralCurve) -> Result<SpectralCurve, ScopeError> {
        if !self.same_grid(other) {
            return Err(ScopeError::GridMismatch {
                expected: self.len(),
                found: other.len(),
            });
        }

        let quantity = match (self.quantity, other.quantity) {
            (SpectralQuantity::Fraction, q) | (q, SpectralQuantity::Fraction) => q,
            (_, found) => return Err(ScopeError::unit_mismatch(SpectralQuantity::Fraction, found)),
        };

        Ok(SpectralCurve {
            wavelengths_nm: self.wavelengths_nm.clone(),
            values: self
                .values
                .iter()
                .zip(&other.values)
                .map(|(a, b)| a * b)
                .collect(),
            quantity,
        })
    }

    /// Apply a per-sample conversion that turns this curve into `quantity`.
    ///
    /// `expected` guards the input quantity so a conversion is never applied
    /// to the wrong kind of curve.
    pub fn convert<F>(
        &self,
        expected: SpectralQuantity,
        quantity: SpectralQuantity,
        f: F,
    ) -> Result<SpectralCurve, ScopeError>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.quantity != expected {
            return Err(ScopeError::unit_mismatch(expected, self.quantity));
        }
        Ok(SpectralCurve {
            wavelengths_nm: self.wavelengths_nm.clone(),
            values: self.iter().map(|(w, v)| f(w, v)).collect(),
            quantity,
        })
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Trapezoidal integral over wavelength (value unit × nm)
    pub fn integrate(&self) -> f64 {
        self.wavelengths_nm
            .windows(2)
            .zip(self.values.windows(2))
            .map(|(w, v)| (w[1] - w[0]) * (v[0] + v[1]) / 2.0)
            .sum()
    }

    pub fn peak(&self) -> (Length, f64) {
        let (w, v) = self
            .iter()
            .fold((self.wavelengths_nm[0], self.values[0]), |best, (w, v)| {
                if v > best.1 {
                    (w, v)
                } else {
                    best
                }
            });
        (Length::from_nanometers(w), v)
    }
}

fn interpolate_clamped(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    let last = xs.len() - 1;
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[last] {
        return ys[last];
    }

    let i = xs.partition_point(|&w| w <= x);
    let t = (x - xs[i - 1]) / (xs[i] - xs[i - 1]);
    ys[i - 1] + (ys[i] - ys[i - 1]) * t
}
