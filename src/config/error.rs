use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("latitude_deg should be within [-90, 90], got {0}")]
    Latitude(f64),

    #[error("longitude_deg should be within [-180, 180], got {0}")]
    Longitude(f64),

    #[error("utc_offset_hours should be within [-14, 14], got {0}")]
    UtcOffset(f64),

    #[error("elevation_m should be within [-500, 9000], got {0}")]
    Elevation(f64),

    #[error("panel_tilt should be within [0, 180], got {0}")]
    Tilt(f64),

    #[error("linke_turbidity needs 12 monthly values, got {0}")]
    TurbidityMonths(usize),

    #[error("linke_turbidity values must be positive, got {0}")]
    Turbidity(f64),

    #[error("year {0} is outside the supported range")]
    Year(i32),
}
