//! Physical constants shared by the clear-sky and plane-of-array models.

/// Solar constant in W/m^2 used with the Spencer extraterrestrial model
pub const SOLAR_CONSTANT: f64 = 1366.1;

/// Standard sea-level pressure, Pa
pub const SEA_LEVEL_PRESSURE: f64 = 101_325.0;

/// Kasten & Young (1989) relative airmass coefficients
pub const KASTEN_YOUNG_A: f64 = 0.50572;
pub const KASTEN_YOUNG_B: f64 = 6.07995;
pub const KASTEN_YOUNG_C: f64 = 1.6364;

/// Ineichen & Perez (2002) scale heights for the altitude correction, m
pub const INEICHEN_FH1_SCALE: f64 = 8000.0;
pub const INEICHEN_FH2_SCALE: f64 = 1250.0;
