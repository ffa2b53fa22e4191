use approx::assert_relative_eq;
use scopekit::config::presets;
use scopekit::constants::{PLANCK_CONSTANT, SPEED_OF_LIGHT};
use scopekit::physics::{BuiltinEphemeris, Ephemeris, Orbiter};
use scopekit::radiometry::{Radiometry, RadiometryConfig};
use scopekit::spectral::tables;
use scopekit::spectral::{SpectralQuantity, SpectralResponse, TabulatedFilter, WavelengthGrid};
use scopekit::units::{AngularVelocityExt, Length, LengthExt, Time};
use scopekit::ScopeError;
use std::io::Cursor;
use uom::si::frequency::hertz;
use uom::si::time::{hour, second};
use uom::si::velocity::meter_per_second;

const REFLECTANCE_CSV: &str = "\
Wavelength[nm],Reflectance
1000,0.30
400,0.10
600,0.20
800,0.25
";

const QE_CSV: &str = "\
Wavelength[nm],QE[%]
300,20
500,60
700,70
900,40
1050,10
";

const SOLAR_CSV: &str = "\
Wavelength[um],Irradiance[W/m2/um]
0.2,100
0.4,1600
0.5,1950
0.7,1400
1.0,750
1.2,500
";

const FILTERS_CSV: &str = "\
name,center[nm],width[nm],transmission
blue,450,100,0.9
red,650,100,0.85
";

// Full chain from CSV text to SNR, the way the binary drives it from disk
#[test]
fn radiometry_from_tables() -> Result<(), Box<dyn std::error::Error>> {
    let reflectance = tables::read_reflectance(Cursor::new(REFLECTANCE_CSV), "reflectance")?;
    let qe = tables::read_quantum_efficiency(Cursor::new(QE_CSV), "qe")?;
    let sun = tables::read_solar_irradiance(Cursor::new(SOLAR_CSV), "solar")?;

    // Padding rows
    assert_eq!(reflectance.wavelengths_nm()[0], 200.0);
    assert_eq!(qe.wavelengths_nm()[0], 225.0);
    assert_eq!(qe.values()[0], 0.0);
    assert_eq!(*qe.wavelengths_nm().last().unwrap(), 1100.0);

    let model = Radiometry::new(presets::mars_radiometry(), &sun, &reflectance, &qe)?;
    assert_eq!(model.count_rate().len(), 1001);
    assert_eq!(model.count_rate().quantity(), SpectralQuantity::CountRate);

    // Stored per nm after the um -> nm conversion
    let e_500 = model.solar_irradiance().value_at(Length::from_nanometers(500.0));
    assert_relative_eq!(e_500, 1.95, max_relative = 1e-9);

    // QE is zero at and beyond the padded edges
    let counts = model.count_rate();
    assert_eq!(counts.value_at(Length::from_nanometers(200.0)), 0.0);
    assert_eq!(counts.value_at(Length::from_nanometers(1150.0)), 0.0);
    assert!(counts.value_at(Length::from_nanometers(550.0)) > 0.0);

    let rate = model.signal_rate().get::<hertz>();
    assert!(rate > 0.0);
    assert_relative_eq!(model.snr(Time::new::<second>(1.0)), rate.sqrt(), max_relative = 1e-12);

    let t = presets::default_exposure();
    assert_relative_eq!(model.snr(t * 4.0), 2.0 * model.snr(t), max_relative = 1e-12);

    Ok(())
}

#[test]
fn photon_conversion_at_one_wavelength() -> Result<(), Box<dyn std::error::Error>> {
    let sun = tables::read_solar_irradiance(Cursor::new(SOLAR_CSV), "solar")?;
    let reflectance = tables::read_reflectance(Cursor::new(REFLECTANCE_CSV), "reflectance")?;
    let qe = tables::read_quantum_efficiency(Cursor::new(QE_CSV), "qe")?;
    let grid = WavelengthGrid::new(
        Length::from_nanometers(500.0),
        Length::from_nanometers(500.0),
        Length::from_nanometers(1.0),
    )?;

    let config = RadiometryConfig::default().with_grid(grid);
    let model = Radiometry::new(config, &sun, &reflectance, &qe)?;
    let expected = 1.95 * 500e-9 / (PLANCK_CONSTANT * SPEED_OF_LIGHT);
    assert_relative_eq!(model.photon_irradiance().values()[0], expected, max_relative = 1e-9);
    Ok(())
}

#[test]
fn filter_bank_drives_per_band_signal() -> Result<(), Box<dyn std::error::Error>> {
    let bank = tables::read_filter_bank(Cursor::new(FILTERS_CSV), "filters")?;
    let reflectance = tables::read_reflectance(Cursor::new(REFLECTANCE_CSV), "reflectance")?;
    let qe = tables::read_quantum_efficiency(Cursor::new(QE_CSV), "qe")?;
    let sun = tables::read_solar_irradiance(Cursor::new(SOLAR_CSV), "solar")?;

    let unfiltered = Radiometry::new(presets::mars_radiometry(), &sun, &reflectance, &qe)?;
    let mut total = 0.0;
    for (name, filter) in bank.iter() {
        let config = presets::mars_radiometry().with_filter(filter.clone());
        let band = Radiometry::new(config, &sun, &reflectance, &qe)?;
        let rate = band.signal_rate().get::<hertz>();
        assert!(rate > 0.0, "band {} has no signal", name);
        total += rate;
    }
    assert!(total < unfiltered.signal_rate().get::<hertz>());
    Ok(())
}

#[test]
fn tabulated_filter_matches_its_table() -> Result<(), Box<dyn std::error::Error>> {
    let table = tables::read_table(
        Cursor::new("Wavelength[nm],T\n500,0.0\n550,0.8\n600,0.0\n"),
        "filter",
        SpectralQuantity::Fraction,
    )?;
    let filter = TabulatedFilter::new(table, Length::from_nanometers(5.0))?;
    let response = filter.response(Length::from_nanometers(500.0), Length::from_nanometers(600.0))?;

    assert_eq!(response.len(), 21);
    assert_relative_eq!(response.value_at(Length::from_nanometers(525.0)), 0.4, epsilon = 1e-12);
    assert_relative_eq!(response.value_at(Length::from_nanometers(550.0)), 0.8, epsilon = 1e-12);
    Ok(())
}

#[test]
fn irradiance_table_cannot_stand_in_for_qe() {
    let result = tables::read_quantum_efficiency(Cursor::new(SOLAR_CSV), "qe");
    assert!(matches!(result, Err(ScopeError::UnitMismatch { .. })));
}

#[test]
fn mars_mapping_orbit() -> Result<(), Box<dyn std::error::Error>> {
    let orbiter = presets::mars_orbiter()?;

    assert_relative_eq!(orbiter.orbital_period().get::<hour>(), 1.933, epsilon = 0.01);
    assert_relative_eq!(orbiter.slew_rate().as_degrees_per_second(), 0.5019, epsilon = 0.01);
    assert_relative_eq!(
        orbiter.orbital_velocity().get::<meter_per_second>(),
        3384.21,
        epsilon = 0.01
    );
    assert_relative_eq!(
        orbiter.ground_track_speed().get::<meter_per_second>(),
        3067.46,
        epsilon = 0.01
    );

    // The surface point under the spacecraft goes round once per orbit
    let lap: Length = orbiter.ground_track_speed() * orbiter.orbital_period();
    assert_relative_eq!(
        lap.as_kilometers(),
        orbiter.surface_circumference().as_kilometers(),
        max_relative = 1e-12
    );
    Ok(())
}

#[test]
fn camera_over_mars() -> Result<(), Box<dyn std::error::Error>> {
    let camera = presets::framing_camera();
    let orbiter = presets::mars_orbiter()?;

    assert_eq!(camera.total_bits(), 62_914_560);
    assert_relative_eq!(camera.total_megabits(), 60.0, epsilon = 1e-12);
    assert_relative_eq!(camera.image_set_megabits(), 48.0, epsilon = 1e-12);

    let (gsd, _) = camera.ground_pixel_size(orbiter.altitude());
    let (ifov, _) = camera.ifov_mrad();
    assert_relative_eq!(gsd.as_meters(), ifov * 350.0, max_relative = 1e-9);
    Ok(())
}

#[test]
fn every_builtin_body_supports_an_orbit() -> Result<(), Box<dyn std::error::Error>> {
    for name in BuiltinEphemeris.bodies() {
        let body = BuiltinEphemeris.body(name)?;
        let orbiter = Orbiter::around(&BuiltinEphemeris, name, Length::from_kilometers(500.0))?;
        assert_relative_eq!(
            orbiter.orbit_radius().as_kilometers(),
            body.mean_radius.as_kilometers() + 500.0,
            max_relative = 1e-12
        );
        assert!(orbiter.slew_rate().as_degrees_per_second() > 0.0);
    }
    Ok(())
}
