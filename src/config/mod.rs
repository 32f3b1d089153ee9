use chrono::NaiveDate;

use serde::Deserialize;
use serde::Deserializer;
use serde::de::Error;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::location::{Location, PanelOrientation};

pub mod error;
pub use error::ConfigError;

pub mod grid;
pub use grid::GridMode;

pub mod turbidity;
pub use turbidity::LinkeTurbidity;

pub const DEFAULT_LATITUDE_DEG: f64 = 53.234079;
pub const DEFAULT_LONGITUDE_DEG: f64 = -2.594865;
pub const DEFAULT_UTC_OFFSET_HOURS: f64 = 0.0;
pub const DEFAULT_ELEVATION_M: f64 = 100.0;
pub const DEFAULT_LOCATION_NAME: &str = "MyLocation";
pub const DEFAULT_PANEL_TILT: f64 = 30.0;
pub const DEFAULT_PANEL_AZIMUTH: f64 = 90.0;
pub const DEFAULT_YEAR: i32 = 2016;
pub const DEFAULT_OUTPUT: &str = "month_averages.csv";

/// Everything one run of the estimator needs. Built once and never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    location: Location,
    panel: PanelOrientation,
    year: i32,
    grid: GridMode,
    linke_turbidity: LinkeTurbidity,
    output: PathBuf,
    series_output: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            location: Location::default(),
            panel: PanelOrientation::default(),
            year: DEFAULT_YEAR,
            grid: GridMode::default(),
            linke_turbidity: LinkeTurbidity::default(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            series_output: None,
        }
    }
}

// Every field is optional and falls back to its default. Every numeric field
// except panel_azimuth is range checked here so the pipeline never sees it
// out of range.
impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct ConfigHelper {
            latitude_deg: Option<f64>,
            longitude_deg: Option<f64>,
            utc_offset_hours: Option<f64>,
            elevation_m: Option<f64>,
            location_name: Option<String>,
            panel_tilt: Option<f64>,
            panel_azimuth: Option<f64>,
            year: Option<i32>,
            grid: Option<GridMode>,
            linke_turbidity: Option<LinkeTurbidity>,
            output: Option<PathBuf>,
            series_output: Option<PathBuf>,
        }

        let helper = ConfigHelper::deserialize(deserializer)?;

        let location = Location::new(
            helper.latitude_deg.unwrap_or(DEFAULT_LATITUDE_DEG),
            helper.longitude_deg.unwrap_or(DEFAULT_LONGITUDE_DEG),
            helper.utc_offset_hours.unwrap_or(DEFAULT_UTC_OFFSET_HOURS),
            helper.elevation_m.unwrap_or(DEFAULT_ELEVATION_M),
            helper
                .location_name
                .unwrap_or_else(|| DEFAULT_LOCATION_NAME.to_string()),
        )
        .map_err(D::Error::custom)?;

        let panel = PanelOrientation::new(
            helper.panel_tilt.unwrap_or(DEFAULT_PANEL_TILT),
            helper.panel_azimuth.unwrap_or(DEFAULT_PANEL_AZIMUTH),
        )
        .map_err(D::Error::custom)?;

        let year = helper.year.unwrap_or(DEFAULT_YEAR);
        validate_year(year).map_err(D::Error::custom)?;

        let linke_turbidity = helper.linke_turbidity.unwrap_or_default();
        linke_turbidity.validate().map_err(D::Error::custom)?;

        Ok(Config {
            location,
            panel,
            year,
            grid: helper.grid.unwrap_or_default(),
            linke_turbidity,
            output: helper.output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            series_output: helper.series_output,
        })
    }
}

// The grid and the month slicing both need Jan 1 of the following year.
fn validate_year(year: i32) -> Result<(), ConfigError> {
    let next = year.checked_add(1).ok_or(ConfigError::Year(year))?;
    if NaiveDate::from_ymd_opt(year, 1, 1).is_none() || NaiveDate::from_ymd_opt(next, 1, 1).is_none() {
        return Err(ConfigError::Year(year));
    }
    Ok(())
}

impl Config {
    pub fn new(
        location: Location,
        panel: PanelOrientation,
        year: i32,
        grid: GridMode,
    ) -> Result<Self, ConfigError> {
        validate_year(year)?;

        Ok(Self {
            location,
            panel,
            year,
            grid,
            ..Config::default()
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let config: Config = serde_json::from_reader(reader).map_err(ConfigError::from)?;

        Ok(config)
    }

    pub fn with_linke_turbidity(
        mut self,
        linke_turbidity: LinkeTurbidity,
    ) -> Result<Self, ConfigError> {
        linke_turbidity.validate()?;
        self.linke_turbidity = linke_turbidity;
        Ok(self)
    }

    pub fn with_output<P: Into<PathBuf>>(mut self, output: P) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_series_output<P: Into<PathBuf>>(mut self, series_output: P) -> Self {
        self.series_output = Some(series_output.into());
        self
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn panel(&self) -> PanelOrientation {
        self.panel
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn grid(&self) -> GridMode {
        self.grid
    }

    pub fn linke_turbidity(&self) -> &LinkeTurbidity {
        &self.linke_turbidity
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn series_output(&self) -> Option<&Path> {
        self.series_output.as_deref()
    }
}
