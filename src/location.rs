use chrono::{Duration, NaiveDateTime};

use crate::config::{
    ConfigError, DEFAULT_ELEVATION_M, DEFAULT_LATITUDE_DEG, DEFAULT_LOCATION_NAME,
    DEFAULT_LONGITUDE_DEG, DEFAULT_PANEL_AZIMUTH, DEFAULT_PANEL_TILT, DEFAULT_UTC_OFFSET_HOURS,
};

/// Widest offset in use (UTC-12 to UTC+14), rounded out symmetrically.
pub const MAX_UTC_OFFSET_HOURS: f64 = 14.0;

/// Dead Sea shore up to the highest summits. The barometric pressure formula
/// breaks down far above this.
pub const MIN_ELEVATION_M: f64 = -500.0;
pub const MAX_ELEVATION_M: f64 = 9000.0;

/// Site the panel is installed at. Longitude is positive east.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    latitude_deg: f64,
    longitude_deg: f64,
    utc_offset_hours: f64,
    elevation_m: f64,
    name: String,
}

impl Default for Location {
    fn default() -> Self {
        Location {
            latitude_deg: DEFAULT_LATITUDE_DEG,
            longitude_deg: DEFAULT_LONGITUDE_DEG,
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
            elevation_m: DEFAULT_ELEVATION_M,
            name: DEFAULT_LOCATION_NAME.to_string(),
        }
    }
}

impl Location {
    pub fn new(
        latitude_deg: f64,
        longitude_deg: f64,
        utc_offset_hours: f64,
        elevation_m: f64,
        name: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        if !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(ConfigError::Latitude(latitude_deg));
        }

        if !(-180.0..=180.0).contains(&longitude_deg) {
            return Err(ConfigError::Longitude(longitude_deg));
        }

        if !(-MAX_UTC_OFFSET_HOURS..=MAX_UTC_OFFSET_HOURS).contains(&utc_offset_hours) {
            return Err(ConfigError::UtcOffset(utc_offset_hours));
        }

        if !(MIN_ELEVATION_M..=MAX_ELEVATION_M).contains(&elevation_m) {
            return Err(ConfigError::Elevation(elevation_m));
        }

        Ok(Location {
            latitude_deg,
            longitude_deg,
            utc_offset_hours,
            elevation_m,
            name: name.into(),
        })
    }

    pub fn latitude_deg(&self) -> f64 {
        self.latitude_deg
    }

    pub fn longitude_deg(&self) -> f64 {
        self.longitude_deg
    }

    pub fn utc_offset_hours(&self) -> f64 {
        self.utc_offset_hours
    }

    pub fn elevation_m(&self) -> f64 {
        self.elevation_m
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Converts a wall-clock time at this location to UTC.
    pub fn to_utc(&self, local: NaiveDateTime) -> NaiveDateTime {
        let offset_seconds = (self.utc_offset_hours * 3600.0).round() as i64;
        local - Duration::seconds(offset_seconds)
    }
}

/// Fixed orientation of the panel. Azimuth is measured clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelOrientation {
    tilt_deg: f64,
    azimuth_deg: f64,
}

impl Default for PanelOrientation {
    fn default() -> Self {
        PanelOrientation {
            tilt_deg: DEFAULT_PANEL_TILT,
            azimuth_deg: DEFAULT_PANEL_AZIMUTH,
        }
    }
}

impl PanelOrientation {
    pub fn new(tilt_deg: f64, azimuth_deg: f64) -> Result<Self, ConfigError> {
        if !(0.0..=180.0).contains(&tilt_deg) {
            return Err(ConfigError::Tilt(tilt_deg));
        }

        Ok(PanelOrientation {
            tilt_deg,
            azimuth_deg,
        })
    }

    pub fn tilt_deg(&self) -> f64 {
        self.tilt_deg
    }

    pub fn azimuth_deg(&self) -> f64 {
        self.azimuth_deg
    }
}
