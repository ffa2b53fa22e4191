//! CSV loaders for spectral tables.
//!
//! Tables have a header row; the first column is wavelength and the second
//! the tabulated value. Units are declared in the header with a bracket
//! suffix, e.g. `Wavelength[nm],qe[%]` or `Wavelength[um],E[W/m2/um]`.
//! A column without a bracket is nanometres for wavelength and a plain
//! fraction for values.

use super::curve::{SpectralCurve, SpectralQuantity};
use super::filter::{ConstantFilter, FilterBank, DEFAULT_RESOLUTION_NM};
use super::solar::SolarSpectrum;
use crate::constants::{QE_BLUE_EDGE, QE_RED_EDGE, REFLECTANCE_BLUE_EDGE};
use crate::errors::{DataLoadError, ScopeError};
use csv::{ReaderBuilder, Trim};
use log::{debug, info};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Split `name[unit]` (or `name (unit)`) into its parts.
fn split_header(header: &str) -> (&str, Option<&str>) {
    let header = header.trim();
    for (open, close) in [('[', ']'), ('(', ')')] {
        if let (Some(start), true) = (header.find(open), header.ends_with(close)) {
            let unit = header[start + 1..header.len() - 1].trim();
            return (header[..start].trim(), Some(unit));
        }
    }
    (header, None)
}

fn normalize_unit(unit: &str) -> String {
    unit.chars()
        .filter(|c| !c.is_whitespace() && *c != '^' && *c != '*')
        .collect::<String>()
        .to_lowercase()
}

/// Factor converting the declared wavelength unit to nanometres
fn wavelength_factor(unit: Option<&str>) -> Result<f64, ScopeError> {
    let Some(unit) = unit else {
        return Ok(1.0);
    };
    match normalize_unit(unit).as_str() {
        "nm" | "nanometer" | "nanometers" => Ok(1.0),
        "um" | "µm" | "micron" | "microns" | "micrometer" | "micrometers" => Ok(1e3),
        "a" | "å" | "angstrom" | "angstroms" => Ok(0.1),
        "m" | "meter" | "meters" => Ok(1e9),
        _ => Err(ScopeError::unit_mismatch("wavelength unit (nm, um, A, m)", unit)),
    }
}

/// Quantity and factor to canonical units for the declared value unit
fn value_unit(unit: Option<&str>) -> Result<(SpectralQuantity, f64), ScopeError> {
    let Some(unit) = unit else {
        return Ok((SpectralQuantity::Fraction, 1.0));
    };
    match normalize_unit(unit).as_str() {
        "" | "1" | "fraction" => Ok((SpectralQuantity::Fraction, 1.0)),
        "%" | "percent" => Ok((SpectralQuantity::Fraction, 0.01)),
        "w/m2/nm" | "wm-2nm-1" => Ok((SpectralQuantity::EnergyIrradiance, 1.0)),
        "w/m2/um" | "w/m2/µm" | "w/m2/micron" | "wm-2um-1" => {
            Ok((SpectralQuantity::EnergyIrradiance, 1e-3))
        }
        _ => Err(ScopeError::unit_mismatch("known value unit", unit)),
    }
}

/// Read a two-column table and check its value column has the `expected`
/// physical quantity.
pub fn read_table<R: Read>(
    reader: R,
    name: &str,
    expected: SpectralQuantity,
) -> Result<SpectralCurve, ScopeError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.len() < 2 {
        return Err(DataLoadError::MissingColumn(format!("{}: value column", name)).into());
    }
    let (_, wave_unit) = split_header(&headers[0]);
    let (value_name, unit) = split_header(&headers[1]);
    let to_nm = wavelength_factor(wave_unit)?;
    let (quantity, to_canonical) = value_unit(unit)?;
    if quantity != expected {
        return Err(ScopeError::unit_mismatch(
            expected,
            format!("{} [{}]", value_name, unit.unwrap_or("1")),
        ));
    }

    let mut wavelengths = Vec::new();
    let mut values = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if record.len() < 2 {
            return Err(DataLoadError::MissingColumn(format!(
                "{}: row {} has {} field(s)",
                name,
                wavelengths.len() + 1,
                record.len()
            ))
            .into());
        }
        wavelengths.push(record[0].parse::<f64>()? * to_nm);
        values.push(record[1].parse::<f64>()? * to_canonical);
    }

    if wavelengths.is_empty() {
        return Err(DataLoadError::EmptyTable(name.to_string()).into());
    }
    info!("Loaded {} rows from {} ({})", wavelengths.len(), name, quantity);

    SpectralCurve::from_nm(wavelengths, values, quantity)
}

fn open(path: &Path) -> Result<File, ScopeError> {
    let file = File::open(path)?;
    debug!("Opened table {}", path.display());
    Ok(file)
}

pub fn load_table(
    path: impl AsRef<Path>,
    expected: SpectralQuantity,
) -> Result<SpectralCurve, ScopeError> {
    let path = path.as_ref();
    read_table(open(path)?, &path.display().to_string(), expected)
}

fn check_fraction(curve: &SpectralCurve, what: &'static str) -> Result<(), ScopeError> {
    match curve.values().iter().find(|v| !(0.0..=1.0).contains(*v)) {
        Some(&value) => Err(ScopeError::ValueOutOfRange { what, value }),
        None => Ok(()),
    }
}

/// Surface reflectance, padded with a synthetic row at the blue edge so the
/// curve reaches the start of the default wavelength grid.
pub fn read_reflectance<R: Read>(reader: R, name: &str) -> Result<SpectralCurve, ScopeError> {
    let curve = read_table(reader, name, SpectralQuantity::Fraction)?;
    let (w, v) = REFLECTANCE_BLUE_EDGE;
    if curve.wavelengths_nm()[0] <= w {
        return Ok(curve);
    }
    Ok(curve.with_point(w, v))
}

pub fn load_reflectance(path: impl AsRef<Path>) -> Result<SpectralCurve, ScopeError> {
    let path = path.as_ref();
    read_reflectance(open(path)?, &path.display().to_string())
}

/// Detector quantum efficiency as a fraction, padded with zero response
/// outside the measured range.
pub fn read_quantum_efficiency<R: Read>(
    reader: R,
    name: &str,
) -> Result<SpectralCurve, ScopeError> {
    let curve = read_table(reader, name, SpectralQuantity::Fraction)?;
    check_fraction(&curve, "quantum efficiency")?;

    let mut curve = curve;
    let (blue, red) = (QE_BLUE_EDGE, QE_RED_EDGE);
    if curve.wavelengths_nm()[0] > blue.0 {
        curve = curve.with_point(blue.0, blue.1);
    }
    if curve.wavelengths_nm()[curve.len() - 1] < red.0 {
        curve = curve.with_point(red.0, red.1);
    }
    Ok(curve)
}

pub fn load_quantum_efficiency(path: impl AsRef<Path>) -> Result<SpectralCurve, ScopeError> {
    let path = path.as_ref();
    read_quantum_efficiency(open(path)?, &path.display().to_string())
}

pub fn read_solar_irradiance<R: Read>(reader: R, name: &str) -> Result<SolarSpectrum, ScopeError> {
    SolarSpectrum::tabulated(read_table(reader, name, SpectralQuantity::EnergyIrradiance)?)
}

pub fn load_solar_irradiance(path: impl AsRef<Path>) -> Result<SolarSpectrum, ScopeError> {
    let path = path.as_ref();
    read_solar_irradiance(open(path)?, &path.display().to_string())
}

#[derive(Debug, Deserialize)]
struct FilterRow {
    name: String,
    #[serde(rename = "center[nm]")]
    center_nm: f64,
    #[serde(rename = "width[nm]")]
    width_nm: f64,
    transmission: f64,
}

/// Read a filter set with columns `name,center[nm],width[nm],transmission`.
pub fn read_filter_bank<R: Read>(reader: R, name: &str) -> Result<FilterBank, ScopeError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut bank = FilterBank::new();
    for row in rdr.deserialize() {
        let row: FilterRow = row?;
        let filter = ConstantFilter::from_nm(
            row.center_nm,
            row.width_nm,
            row.transmission,
            DEFAULT_RESOLUTION_NM,
        )?;
        bank.insert(row.name, filter);
    }

    if bank.is_empty() {
        return Err(DataLoadError::EmptyTable(name.to_string()).into());
    }
    Ok(bank)
}

pub fn load_filter_bank(path: impl AsRef<Path>) -> Result<FilterBank, ScopeError> {
    let path = path.as_ref();
    read_filter_bank(open(path)?, &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{Length, LengthExt};
    use approx::assert_relative_eq;
    use test_case::test_case;

    #[test_case("Wavelength[nm]", "Wavelength", Some("nm"); "brackets")]
    #[test_case("waves (um)", "waves", Some("um"); "parentheses")]
    #[test_case(" qe ", "qe", None; "no unit")]
    fn header_units_are_split(header: &str, name: &str, unit: Option<&str>) {
        assert_eq!(split_header(header), (name, unit));
    }

    #[test]
    fn percent_qe_is_converted_and_padded() {
        let csv = "Wavelength[nm],qe[%]\n600,50\n400,20\n800,10\n";
        let qe = read_quantum_efficiency(csv.as_bytes(), "qe").unwrap();

        assert_eq!(qe.wavelengths_nm(), &[225.0, 400.0, 600.0, 800.0, 1100.0]);
        assert_relative_eq!(qe.values()[1], 0.2, epsilon = 1e-12);
        assert_relative_eq!(qe.values()[2], 0.5, epsilon = 1e-12);
        assert_eq!(qe.values()[0], 0.0);
        assert_eq!(qe.values()[4], 0.0);
    }

    #[test]
    fn qe_above_unity_is_rejected() {
        let csv = "Wavelength[nm],qe\n400,20\n";
        assert!(matches!(
            read_quantum_efficiency(csv.as_bytes(), "qe"),
            Err(ScopeError::ValueOutOfRange { .. })
        ));
    }

    #[test]
    fn reflectance_gets_blue_edge_row() {
        let csv = "Wavelength[nm],Reflectance\n450,0.05\n700,0.25\n";
        let refl = read_reflectance(csv.as_bytes(), "refl").unwrap();
        assert_eq!(refl.wavelengths_nm(), &[200.0, 450.0, 700.0]);
        assert_eq!(refl.values()[0], 0.02);
    }

    #[test]
    fn micron_wavelengths_are_converted() {
        let csv = "Wavelength[um],E[W/m2/um]\n0.5,1900\n0.6,1800\n";
        let sun = read_solar_irradiance(csv.as_bytes(), "sun").unwrap();
        let SolarSpectrum::Tabulated(curve) = sun else {
            panic!("expected tabulated spectrum");
        };
        assert_relative_eq!(curve.wavelengths_nm()[0], 500.0, epsilon = 1e-9);
        assert_relative_eq!(curve.values()[0], 1.9, epsilon = 1e-12);
        assert_relative_eq!(curve.value_at(Length::from_nanometers(550.0)), 1.85, epsilon = 1e-9);
    }

    #[test]
    fn irradiance_column_where_fraction_expected_is_unit_mismatch() {
        let csv = "Wavelength[nm],E[W/m2/nm]\n500,1.9\n";
        assert!(matches!(
            read_reflectance(csv.as_bytes(), "refl"),
            Err(ScopeError::UnitMismatch { .. })
        ));
    }

    #[test]
    fn non_length_wavelength_unit_is_unit_mismatch() {
        let csv = "Wavelength[s],qe\n500,0.5\n";
        assert!(matches!(
            read_table(csv.as_bytes(), "bad", SpectralQuantity::Fraction),
            Err(ScopeError::UnitMismatch { .. })
        ));
    }

    #[test]
    fn malformed_number_is_data_load_error() {
        let csv = "Wavelength[nm],qe\n500,abc\n";
        assert!(matches!(
            read_table(csv.as_bytes(), "bad", SpectralQuantity::Fraction),
            Err(ScopeError::DataLoad(DataLoadError::ParseFloatError(_)))
        ));
    }

    #[test]
    fn single_column_is_missing_column() {
        let csv = "Wavelength[nm]\n500\n";
        assert!(matches!(
            read_table(csv.as_bytes(), "bad", SpectralQuantity::Fraction),
            Err(ScopeError::DataLoad(DataLoadError::MissingColumn(_)))
        ));
    }

    #[test]
    fn header_only_is_empty_table() {
        let csv = "Wavelength[nm],qe\n";
        assert!(matches!(
            read_table(csv.as_bytes(), "empty", SpectralQuantity::Fraction),
            Err(ScopeError::DataLoad(DataLoadError::EmptyTable(_)))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_table("/nonexistent/scopekit/table.csv", SpectralQuantity::Fraction),
            Err(ScopeError::DataLoad(DataLoadError::IoError(_)))
        ));
    }

    #[test]
    fn filter_bank_from_csv() {
        let csv = "name,center[nm],width[nm],transmission\n\
                   UV365,365,30,0.7\n\
                   IR1,900,40,0.9\n";
        let bank = read_filter_bank(csv.as_bytes(), "filters").unwrap();
        assert_eq!(bank.len(), 2);
        let ir = bank.get("ir1").unwrap();
        assert_eq!(ir.band_edges_nm(), (880.0, 920.0));
        assert_eq!(ir.peak_transmission(), 0.9);
    }

    #[test]
    fn filter_bank_with_bad_row_is_csv_error() {
        let csv = "name,center[nm],width[nm],transmission\nUV,abc,30,0.7\n";
        assert!(matches!(
            read_filter_bank(csv.as_bytes(), "filters"),
            Err(ScopeError::DataLoad(DataLoadError::CsvError(_)))
        ));
    }
}
