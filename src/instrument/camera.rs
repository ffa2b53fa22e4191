use super::detector::Detector;
use crate::errors::ScopeError;
use crate::units::{Angle, AngleExt, Length};
use std::fmt;

/// A framing camera: one detector behind optics with a fixed field of view,
/// imaging through `n_bandpasses` filters with onboard compression.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    detector: Detector,
    compression_ratio: f64,
    field_of_view: Angle,
    n_bandpasses: u32,
}

impl Camera {
    /// Returns `DivisionByZero` if `compression_ratio` is zero.
    pub fn new(
        detector: Detector,
        compression_ratio: f64,
        field_of_view: Angle,
        n_bandpasses: u32,
    ) -> Result<Self, ScopeError> {
        if compression_ratio == 0.0 {
            return Err(ScopeError::DivisionByZero("compression ratio"));
        }
        Ok(Self {
            detector,
            compression_ratio,
            field_of_view,
            n_bandpasses,
        })
    }

    pub fn detector(&self) -> &Detector {
        &self.detector
    }

    pub fn compression_ratio(&self) -> f64 {
        self.compression_ratio
    }

    pub fn field_of_view(&self) -> Angle {
        self.field_of_view
    }

    pub fn n_bandpasses(&self) -> u32 {
        self.n_bandpasses
    }

    // Detector accessors

    pub fn lines(&self) -> u32 {
        self.detector.lines()
    }

    pub fn samples(&self) -> u32 {
        self.detector.samples()
    }

    pub fn dynamic_range_bits(&self) -> u32 {
        self.detector.dynamic_range_bits()
    }

    pub fn n_pixels(&self) -> u64 {
        self.detector.n_pixels()
    }

    pub fn total_bits(&self) -> u64 {
        self.detector.total_bits()
    }

    pub fn total_megabits(&self) -> f64 {
        self.detector.total_megabits()
    }

    /// Instantaneous field of view of one pixel along (lines, samples)
    pub fn ifov(&self) -> (Angle, Angle) {
        let fov_rad = self.field_of_view.as_radians();
        (
            Angle::from_radians(fov_rad / f64::from(self.detector.lines())),
            Angle::from_radians(fov_rad / f64::from(self.detector.samples())),
        )
    }

    pub fn ifov_mrad(&self) -> (f64, f64) {
        let (x, y) = self.ifov();
        (x.as_mrad(), y.as_mrad())
    }

    /// Ground sampling distance of one pixel seen from `altitude` at nadir.
    pub fn ground_pixel_size(&self, altitude: Length) -> (Length, Length) {
        let (x, y) = self.ifov();
        (altitude * x.as_radians(), altitude * y.as_radians())
    }

    /// Size of one compressed image in Mbit
    pub fn compressed_image_megabits(&self) -> f64 {
        self.detector.total_megabits() / self.compression_ratio
    }

    /// Compressed size of one image per bandpass, in Mbit
    pub fn image_set_megabits(&self) -> f64 {
        f64::from(self.n_bandpasses) * self.compressed_image_megabits()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            detector: Detector::default(),
            compression_ratio: 5.0,
            field_of_view: Angle::from_degrees(60.0),
            n_bandpasses: 4,
        }
    }
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.detector)?;
        writeln!(f, "Compression: {}", self.compression_ratio)?;
        writeln!(
            f,
            "Compressed per image: {:.2} Mbits",
            self.compressed_image_megabits()
        )?;
        writeln!(f, "Bands: {}", self.n_bandpasses)?;
        writeln!(
            f,
            "Set size compressed: {:.2} Mbits",
            self.image_set_megabits()
        )?;
        let (x, y) = self.ifov_mrad();
        writeln!(f, "IFOV_x/y [mrad]: {:.2}/{:.2}", x, y)
    }
}
