use crate::constants::BITS_PER_MEGABIT;
use crate::units::Information;
use std::fmt;
use uom::si::information::bit;

/// Imaging detector geometry and digitisation depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detector {
    lines: u32,
    samples: u32,
    dynamic_range_bits: u32,
}

impl Detector {
    pub fn new(lines: u32, samples: u32, dynamic_range_bits: u32) -> Self {
        Self {
            lines,
            samples,
            dynamic_range_bits,
        }
    }

    /// Number of lines (x)
    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Number of samples per line (y)
    pub fn samples(&self) -> u32 {
        self.samples
    }

    pub fn dynamic_range_bits(&self) -> u32 {
        self.dynamic_range_bits
    }

    pub fn n_pixels(&self) -> u64 {
        u64::from(self.lines) * u64::from(self.samples)
    }

    pub fn total_bits(&self) -> u64 {
        self.n_pixels() * u64::from(self.dynamic_range_bits)
    }

    /// Raw image size in Mbit (2^20 bits)
    pub fn total_megabits(&self) -> f64 {
        self.total_bits() as f64 / BITS_PER_MEGABIT
    }

    pub fn data_volume(&self) -> Information {
        Information::new::<bit>(self.total_bits() as f64)
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new(2048, 2048, 15)
    }
}

impl fmt::Display for Detector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} x {} pixels per detector", self.lines, self.samples)?;
        writeln!(f, "N pixels: {}", self.n_pixels())?;
        writeln!(f, "Dynamic range: {} bits", self.dynamic_range_bits)?;
        writeln!(f, "Total Mbits per detector: {:.1}", self.total_megabits())
    }
}
