pub const PLANCK_CONSTANT: f64 = 6.62607015e-34; // Planck constant (J·s)
pub const SPEED_OF_LIGHT: f64 = 2.99792458e8; // Speed of light in vacuum (m/s)
pub const ASTRONOMICAL_UNIT: f64 = 1.495978707e11; // (m)

// Sun as a blackbody, used when no measured irradiance table is supplied
pub const BOLTZMANN_CONSTANT: f64 = 1.380649e-23; // (J/K)
pub const SUN_EFFECTIVE_TEMPERATURE: f64 = 5772.0; // (K)
pub const SUN_RADIUS: f64 = 6.957e8; // Nominal solar radius (m)

// Data budgets
pub const BITS_PER_MEGABIT: f64 = 1024.0 * 1024.0;

// Radiometry defaults
pub const DEFAULT_WAVE_START_NM: f64 = 200.0;
pub const DEFAULT_WAVE_STOP_NM: f64 = 1200.0;
pub const DEFAULT_DLAMBDA_NM: f64 = 1.0;
pub const DEFAULT_INCIDENCE_DEG: f64 = 75.0;
pub const DEFAULT_DISTANCE_AU: f64 = 1.5; // Mars
pub const TELESCOPE_APERTURE_AREA: f64 = 5e-3; // (m²)
pub const PIXEL_AREA: f64 = 1.69e-10; // 13 µm pixel (m²)
pub const FOCAL_LENGTH: f64 = 1.3; // (m)
pub const MIRROR_TRANSMISSION: f64 = 0.92;
pub const FILTER_TRANSMISSION: f64 = 0.94;

// Table padding applied at load time
pub const REFLECTANCE_BLUE_EDGE: (f64, f64) = (200.0, 0.02); // (nm, reflectance)
pub const QE_BLUE_EDGE: (f64, f64) = (225.0, 0.0); // (nm, fraction)
pub const QE_RED_EDGE: (f64, f64) = (1100.0, 0.0); // (nm, fraction)

// Math
pub const PI: f64 = std::f64::consts::PI;
pub const TAU: f64 = std::f64::consts::TAU;
