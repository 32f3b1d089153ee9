//! Sun position from the NREL Solar Position Algorithm.

use chrono::{Datelike, NaiveDateTime};
use solar_positioning::{RefractionCorrection, spa, time::DeltaT};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// Geometric zenith angle, degrees
    pub zenith_deg: f64,
    /// Zenith angle corrected for atmospheric refraction, degrees
    pub apparent_zenith_deg: f64,
    /// Clockwise from north, in [0, 360)
    pub azimuth_deg: f64,
}

impl SolarPosition {
    /// Sun position seen from `latitude`/`longitude` (degrees, east positive)
    /// and `elevation_m` at the UTC instant `utc`.
    pub fn calculate(
        utc: NaiveDateTime,
        latitude: f64,
        longitude: f64,
        elevation_m: f64,
    ) -> Result<Self, solar_positioning::Error> {
        let datetime = utc.and_utc();
        let delta_t = DeltaT::estimate_from_date(utc.year(), utc.month())?;

        let geometric =
            spa::solar_position(datetime, latitude, longitude, elevation_m, delta_t, None)?;
        let apparent = spa::solar_position(
            datetime,
            latitude,
            longitude,
            elevation_m,
            delta_t,
            Some(RefractionCorrection::standard()),
        )?;

        Ok(SolarPosition {
            zenith_deg: geometric.zenith_angle(),
            apparent_zenith_deg: apparent.zenith_angle(),
            azimuth_deg: geometric.azimuth(),
        })
    }

    pub fn is_above_horizon(&self) -> bool {
        self.apparent_zenith_deg < 90.0
    }
}
