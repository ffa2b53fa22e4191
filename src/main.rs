use csv::Writer;
use log::{info, warn};
use scopekit::config::{presets, DataPaths};
use scopekit::radiometry::Radiometry;
use scopekit::units::LengthExt;
use serde::Serialize;
use std::error::Error;
use std::fs::{self, File};
use std::path::Path;
use uom::si::frequency::hertz;
use uom::si::time::second;

#[derive(Serialize)]
struct RadiometryRow {
    #[serde(rename = "Wavelength (nm)")]
    wavelength_nm: f64,
    #[serde(rename = "Solar irradiance (W m-2 nm-1)")]
    solar_irradiance: f64,
    #[serde(rename = "Photon irradiance (ph s-1 m-2 nm-1)")]
    photon_irradiance: f64,
    #[serde(rename = "Reflectance")]
    reflectance: f64,
    #[serde(rename = "QE")]
    quantum_efficiency: f64,
    #[serde(rename = "Count rate (counts s-1 nm-1)")]
    count_rate: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let camera = presets::framing_camera();
    println!("{}", camera);

    let orbiter = presets::mars_orbiter()?;
    println!("{}", orbiter);

    let (gsd_x, gsd_y) = camera.ground_pixel_size(orbiter.altitude());
    println!(
        "Ground pixel size: {:.1} x {:.1} m",
        gsd_x.as_meters(),
        gsd_y.as_meters()
    );

    let paths = DataPaths::new();
    if !paths.has_radiometry_tables() {
        warn!(
            "No reflectance/QE tables in {}, skipping radiometry (set SCOPEKIT_DATA_DIR)",
            paths.root().display()
        );
        return Ok(());
    }

    let radiometry = Radiometry::new(
        presets::mars_radiometry(),
        &paths.load_solar_spectrum()?,
        &paths.load_reflectance()?,
        &paths.load_quantum_efficiency()?,
    )?;

    let exposure = presets::default_exposure();
    println!(
        "Signal rate: {:.1} counts/s",
        radiometry.signal_rate().get::<hertz>()
    );
    println!(
        "SNR at {} s: {:.1}",
        exposure.get::<second>(),
        radiometry.snr(exposure)
    );

    // Create output directory if it doesn't exist
    let output_dir = Path::new("output");
    fs::create_dir_all(output_dir)?;
    let out_path = output_dir.join("radiometry.csv");
    let mut writer = Writer::from_writer(File::create(&out_path)?);

    let curves = radiometry
        .solar_irradiance()
        .iter()
        .zip(radiometry.photon_irradiance().values())
        .zip(radiometry.reflectance().values())
        .zip(radiometry.quantum_efficiency().values())
        .zip(radiometry.count_rate().values());
    for (((((wavelength_nm, e_w), e_ph), refl), qe), cr) in curves {
        writer.serialize(RadiometryRow {
            wavelength_nm,
            solar_irradiance: e_w,
            photon_irradiance: *e_ph,
            reflectance: *refl,
            quantum_efficiency: *qe,
            count_rate: *cr,
        })?;
    }
    writer.flush()?;
    info!("Wrote {}", out_path.display());

    Ok(())
}
