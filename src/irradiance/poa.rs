//! Transposition of horizontal irradiance onto the panel plane.

/// Sky diffuse on a tilted plane, isotropic sky (Liu & Jordan).
pub fn isotropic_sky_diffuse(panel_tilt_deg: f64, dhi: f64) -> f64 {
    dhi * (1.0 + panel_tilt_deg.to_radians().cos()) * 0.5
}

/// Ground-reflected diffuse reaching the panel.
///
/// Only `Unmodeled` exists today and it contributes nothing. An albedo based
/// model would add a variant here and take GHI plus the panel tilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroundReflection {
    #[default]
    Unmodeled,
}

impl GroundReflection {
    pub fn irradiance(&self, _panel_tilt_deg: f64, _ghi: f64) -> f64 {
        match self {
            GroundReflection::Unmodeled => 0.0,
        }
    }
}

/// Plane-of-array irradiance, W/m^2.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PoaComponents {
    pub direct: f64,
    pub sky_diffuse: f64,
    pub ground_diffuse: f64,
    pub global: f64,
}

impl PoaComponents {
    pub fn diffuse(&self) -> f64 {
        self.sky_diffuse + self.ground_diffuse
    }
}

/// Sums the beam projected through `aoi_deg` and both diffuse terms.
///
/// The beam is dropped when the sun is behind the panel.
pub fn global_in_plane(
    aoi_deg: f64,
    dni: f64,
    poa_sky_diffuse: f64,
    poa_ground_diffuse: f64,
) -> PoaComponents {
    let direct = (dni * aoi_deg.to_radians().cos()).max(0.0);

    PoaComponents {
        direct,
        sky_diffuse: poa_sky_diffuse,
        ground_diffuse: poa_ground_diffuse,
        global: direct + poa_sky_diffuse + poa_ground_diffuse,
    }
}
