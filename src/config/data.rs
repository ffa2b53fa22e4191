use crate::errors::ScopeError;
use crate::spectral::tables;
use crate::spectral::{FilterBank, SolarSpectrum, SpectralCurve};
use log::info;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "SCOPEKIT_DATA_DIR";

const REFLECTANCE_FILE: &str = "reflectance.csv";
const QUANTUM_EFFICIENCY_FILE: &str = "quantum_efficiency.csv";
const SOLAR_IRRADIANCE_FILE: &str = "solar_irradiance.csv";
const FILTERS_FILE: &str = "filters.csv";

/// Location of the spectral tables on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    root: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::new()
    }
}

impl DataPaths {
    /// `$SCOPEKIT_DATA_DIR`, else the platform data directory joined with
    /// `scopekit`, else the working directory.
    pub fn new() -> Self {
        Self {
            root: resolve_root(std::env::var_os(DATA_DIR_ENV), dirs::data_dir()),
        }
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn reflectance(&self) -> PathBuf {
        self.root.join(REFLECTANCE_FILE)
    }

    pub fn quantum_efficiency(&self) -> PathBuf {
        self.root.join(QUANTUM_EFFICIENCY_FILE)
    }

    pub fn solar_irradiance(&self) -> PathBuf {
        self.root.join(SOLAR_IRRADIANCE_FILE)
    }

    pub fn filters(&self) -> PathBuf {
        self.root.join(FILTERS_FILE)
    }

    /// Both tables the radiometry pipeline cannot run without are present
    pub fn has_radiometry_tables(&self) -> bool {
        self.reflectance().is_file() && self.quantum_efficiency().is_file()
    }

    pub fn load_reflectance(&self) -> Result<SpectralCurve, ScopeError> {
        tables::load_reflectance(self.reflectance())
    }

    pub fn load_quantum_efficiency(&self) -> Result<SpectralCurve, ScopeError> {
        tables::load_quantum_efficiency(self.quantum_efficiency())
    }

    /// Measured solar spectrum when `solar_irradiance.csv` exists, the
    /// blackbody Sun otherwise.
    pub fn load_solar_spectrum(&self) -> Result<SolarSpectrum, ScopeError> {
        let path = self.solar_irradiance();
        if path.is_file() {
            tables::load_solar_irradiance(path)
        } else {
            info!(
                "No solar irradiance table at {}, using blackbody Sun",
                path.display()
            );
            Ok(SolarSpectrum::default())
        }
    }

    pub fn load_filter_bank(&self) -> Result<FilterBank, ScopeError> {
        tables::load_filter_bank(self.filters())
    }
}

fn resolve_root(env_dir: Option<OsString>, data_dir: Option<PathBuf>) -> PathBuf {
    match env_dir.filter(|dir| !dir.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => data_dir
            .map(|dir| dir.join("scopekit"))
            .unwrap_or_else(|| PathBuf::from(".")),
    }
}
