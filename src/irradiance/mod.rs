pub mod clearsky;
pub mod constants;
pub mod poa;

pub use clearsky::ClearSky;
pub use poa::{GroundReflection, PoaComponents};

use chrono::{Datelike, NaiveDateTime};
use thiserror::Error;

use crate::config::LinkeTurbidity;
use crate::location::{Location, PanelOrientation};
use crate::solar::{SolarGeometry, SolarPosition};

#[derive(Debug, Error)]
pub enum ClearSkyError {
    #[error("time grid has {times} entries but solar geometry has {geometry}")]
    LengthMismatch { times: usize, geometry: usize },

    #[error("non-finite irradiance at {time}: {detail}")]
    NonFinite { time: NaiveDateTime, detail: String },
}

/// Clear-sky irradiance on the horizontal and on the panel for one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrradianceRecord {
    pub dni: f64,
    pub dhi: f64,
    pub ghi: f64,
    pub aoi_deg: f64,
    pub poa_direct: f64,
    pub poa_sky_diffuse: f64,
    pub poa_ground_diffuse: f64,
    pub poa_global: f64,
}

impl IrradianceRecord {
    fn is_finite(&self) -> bool {
        [
            self.dni,
            self.dhi,
            self.ghi,
            self.poa_direct,
            self.poa_sky_diffuse,
            self.poa_ground_diffuse,
            self.poa_global,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Clear-sky plane-of-array irradiance for every instant of the grid.
pub struct ClearSkyModel<'a> {
    location: &'a Location,
    panel: PanelOrientation,
    linke_turbidity: &'a LinkeTurbidity,
    ground: GroundReflection,
    pressure_pa: f64,
}

impl<'a> ClearSkyModel<'a> {
    pub fn new(
        location: &'a Location,
        panel: PanelOrientation,
        linke_turbidity: &'a LinkeTurbidity,
    ) -> Self {
        Self {
            location,
            panel,
            linke_turbidity,
            ground: GroundReflection::default(),
            pressure_pa: clearsky::altitude_to_pressure(location.elevation_m()),
        }
    }

    /// The sun only counts as up once its geometric zenith is below 90 degrees,
    /// so refraction alone never produces a beam.
    pub fn record(
        &self,
        time: NaiveDateTime,
        position: &SolarPosition,
        aoi_deg: f64,
    ) -> IrradianceRecord {
        let airmass = if position.zenith_deg > 90.0 {
            None
        } else {
            clearsky::relative_airmass(position.apparent_zenith_deg)
                .map(|am| clearsky::absolute_airmass(am, self.pressure_pa))
        };
        let cs = clearsky::ineichen(
            position.apparent_zenith_deg,
            airmass,
            self.linke_turbidity.for_month(time.month()),
            self.location.elevation_m(),
            clearsky::extraterrestrial_irradiance(time.ordinal()),
        );

        let sky_diffuse = poa::isotropic_sky_diffuse(self.panel.tilt_deg(), cs.dhi);
        let ground_diffuse = self.ground.irradiance(self.panel.tilt_deg(), cs.ghi);
        let poa = poa::global_in_plane(aoi_deg, cs.dni, sky_diffuse, ground_diffuse);

        IrradianceRecord {
            dni: cs.dni,
            dhi: cs.dhi,
            ghi: cs.ghi,
            aoi_deg,
            poa_direct: poa.direct,
            poa_sky_diffuse: poa.sky_diffuse,
            poa_ground_diffuse: poa.ground_diffuse,
            poa_global: poa.global,
        }
    }

    /// `times` are the wall-clock instants `geometry` was computed for.
    pub fn compute(
        &self,
        times: &[NaiveDateTime],
        geometry: &SolarGeometry,
    ) -> Result<Vec<IrradianceRecord>, ClearSkyError> {
        if times.len() != geometry.len() {
            return Err(ClearSkyError::LengthMismatch {
                times: times.len(),
                geometry: geometry.len(),
            });
        }

        times
            .iter()
            .zip(geometry.positions.iter().zip(&geometry.aoi_deg))
            .map(|(&time, (pos, &aoi))| {
                let record = self.record(time, pos, aoi);
                if record.is_finite() {
                    Ok(record)
                } else {
                    Err(ClearSkyError::NonFinite {
                        time,
                        detail: format!("{record:?}"),
                    })
                }
            })
            .collect()
    }
}
