//! Clear-sky irradiance after Ineichen & Perez (2002),
//! "A new airmass independent formulation for the Linke turbidity coefficient",
//! with the Kasten & Young (1989) airmass and Spencer (1971) extraterrestrial
//! irradiance.

use super::constants::{
    INEICHEN_FH1_SCALE, INEICHEN_FH2_SCALE, KASTEN_YOUNG_A, KASTEN_YOUNG_B, KASTEN_YOUNG_C,
    SEA_LEVEL_PRESSURE, SOLAR_CONSTANT,
};
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClearSky {
    pub ghi: f64,
    pub dni: f64,
    pub dhi: f64,
}

/// Extraterrestrial normal irradiance (W/m^2) for a day of the year.
pub fn extraterrestrial_irradiance(day_of_year: u32) -> f64 {
    let b = 2.0 * PI * (day_of_year as f64 - 1.0) / 365.0;
    let r_over_r0_sq = 1.00011
        + 0.034221 * b.cos()
        + 0.00128 * b.sin()
        + 0.000719 * (2.0 * b).cos()
        + 0.000077 * (2.0 * b).sin();

    SOLAR_CONSTANT * r_over_r0_sq
}

/// Relative optical airmass, `None` once the sun is below the horizon.
pub fn relative_airmass(apparent_zenith_deg: f64) -> Option<f64> {
    if apparent_zenith_deg.is_nan() || apparent_zenith_deg > 90.0 {
        return None;
    }

    let z = apparent_zenith_deg;
    let am = 1.0
        / (z.to_radians().cos()
            + KASTEN_YOUNG_A * (KASTEN_YOUNG_B + (90.0 - z)).powf(-KASTEN_YOUNG_C));
    Some(am)
}

/// Standard-atmosphere pressure (Pa) at an elevation in metres.
pub fn altitude_to_pressure(elevation_m: f64) -> f64 {
    100.0 * ((44331.514 - elevation_m) / 11880.516).powf(1.0 / 0.1902632)
}

pub fn absolute_airmass(relative_airmass: f64, pressure_pa: f64) -> f64 {
    relative_airmass * pressure_pa / SEA_LEVEL_PRESSURE
}

/// Ineichen/Perez clear-sky GHI, DNI and DHI in W/m^2.
///
/// # Arguments
/// * `apparent_zenith_deg` - Refraction corrected solar zenith
/// * `airmass_absolute` - Pressure corrected airmass, `None` at night
/// * `linke_turbidity` - Linke turbidity factor (2-7 typical)
/// * `altitude_m` - Site elevation
/// * `dni_extra` - Extraterrestrial normal irradiance
///
/// Every component is zero when there is no airmass and never negative.
pub fn ineichen(
    apparent_zenith_deg: f64,
    airmass_absolute: Option<f64>,
    linke_turbidity: f64,
    altitude_m: f64,
    dni_extra: f64,
) -> ClearSky {
    let Some(am) = airmass_absolute.filter(|am| am.is_finite()) else {
        return ClearSky::default();
    };
    let tl = linke_turbidity;

    let fh1 = (-altitude_m / INEICHEN_FH1_SCALE).exp();
    let fh2 = (-altitude_m / INEICHEN_FH2_SCALE).exp();
    let cg1 = 5.09e-5 * altitude_m + 0.868;
    let cg2 = 3.92e-5 * altitude_m + 0.0387;

    let cos_zenith = apparent_zenith_deg.to_radians().cos().max(0.0);

    let ghi_attenuation = (-cg2 * am * (fh1 + fh2 * (tl - 1.0))).exp();
    let ghi = cg1 * dni_extra * cos_zenith * ghi_attenuation.max(0.0);

    let b = 0.664 + 0.163 / fh1;
    let bnci = dni_extra * (b * (-0.09 * am * (tl - 1.0)).exp()).max(0.0);

    // Beam consistent with the global: keeps dni * cos(z) below ghi
    let beam_fraction = (1.0 - (0.1 - 0.2 * (-tl).exp()) / (0.1 + 0.882 / fh1)) / cos_zenith;
    let bnci_2 = ghi * beam_fraction.max(0.0).min(1e20);

    let dni = bnci.min(bnci_2).max(0.0);
    let dhi = (ghi - dni * cos_zenith).max(0.0);

    ClearSky {
        ghi: ghi.max(0.0),
        dni,
        dhi,
    }
}
