// Environmental constants
pub const STANDARD_GRAVITY: f64 = 9.80665; // Standard gravity (m/s²)
pub const SEAWATER_DENSITY: f64 = 1025.0; // Nominal seawater density (kg/m³)

// Numerical tolerances
pub const UNIT_VECTOR_TOLERANCE: f64 = 1e-6;
pub const MASS_MATRIX_CONDITION_LIMIT: f64 = 1e-12; // Smallest allowed λ_min / λ_max
pub const SYMMETRY_TOLERANCE: f64 = 1e-9;

// Irregular sea defaults
pub const DEFAULT_SPECTRAL_BINS: usize = 64;
pub const DEFAULT_OMEGA_MIN_RATIO: f64 = 0.5; // ω_min / ω_peak
pub const DEFAULT_OMEGA_MAX_RATIO: f64 = 3.0; // ω_max / ω_peak

// Math
pub const PI: f64 = std::f64::consts::PI;
pub const TWO_PI: f64 = std::f64::consts::TAU;
