use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::aggregate::{self, MonthlyTable};
use crate::config::Config;
use crate::date_gen::DateTimeGenerator;
use crate::error::PipelineError;
use crate::irradiance::{ClearSkyModel, IrradianceRecord};
use crate::output;
use crate::solar::{SolarGeometry, SolarPosition};

/// Everything a run produced, kept parallel to `times`.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub times: Vec<NaiveDateTime>,
    pub positions: Vec<SolarPosition>,
    pub records: Vec<IrradianceRecord>,
    pub table: MonthlyTable,
}

#[derive(Debug)]
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Pipeline { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Time grid, solar geometry, clear-sky irradiance, then the monthly table.
    pub fn run(&self) -> Result<PipelineOutput, PipelineError> {
        let location = self.config.location();
        let panel = self.config.panel();
        let year = self.config.year();

        info!(
            location = location.name(),
            latitude = location.latitude_deg(),
            longitude = location.longitude_deg(),
            tilt = panel.tilt_deg(),
            azimuth = panel.azimuth_deg(),
            year,
            grid = %self.config.grid(),
            "starting clear-sky irradiance estimate"
        );

        let times = DateTimeGenerator::new(year, self.config.grid()).generate_datetime_series();
        if times.is_empty() {
            return Err(PipelineError::EmptyGrid(year));
        }
        info!(points = times.len(), "built hourly time grid");

        let geometry = SolarGeometry::compute(&times, location, panel)?;
        let daylight = geometry
            .positions
            .iter()
            .filter(|p| p.is_above_horizon())
            .count();
        debug!(daylight, "computed solar geometry");

        let model = ClearSkyModel::new(location, panel, self.config.linke_turbidity());
        let records = model.compute(&times, &geometry)?;
        info!(records = records.len(), "computed plane-of-array irradiance");

        let poa_global: Vec<f64> = records.iter().map(|r| r.poa_global).collect();
        let table = aggregate::monthly_hourly_means(year, &times, &poa_global)?;

        Ok(PipelineOutput {
            times,
            positions: geometry.positions,
            records,
            table,
        })
    }

    /// Writes the monthly table and, when configured, the hourly series.
    pub fn write_outputs(&self, result: &PipelineOutput) -> Result<(), PipelineError> {
        output::write_monthly_table_file(self.config.output(), &result.table)?;

        if let Some(path) = self.config.series_output() {
            output::write_hourly_series_file(
                path,
                &result.times,
                &result.positions,
                &result.records,
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridMode;
    use crate::location::{Location, PanelOrientation};
    use tempfile::tempdir;

    #[test]
    fn test_default_run() {
        let result = Pipeline::new(Config::default()).run().unwrap();

        assert_eq!(result.times.len(), 8760);
        assert_eq!(result.positions.len(), 8760);
        assert_eq!(result.records.len(), 8760);
        assert_eq!(result.table.rows().count(), 24);
        assert!(result.table.rows().all(|(_, row)| row.len() == 12));
        assert!(
            result
                .table
                .values()
                .all(|v| v.is_finite() && v >= 0.0)
        );
    }

    #[test]
    fn test_night_rows_and_midday_peak() {
        let table = Pipeline::new(Config::default()).run().unwrap().table;

        // 53N in midwinter: nothing at midnight, sun around midday
        assert_eq!(table.get(0, 1), Some(0.0));
        assert_eq!(table.get(0, 12), Some(0.0));
        assert!(table.get(12, 1).unwrap() > 0.0);
        // Midsummer beats midwinter
        assert!(table.get(12, 6).unwrap() > table.get(12, 12).unwrap());
    }

    #[test]
    fn test_below_horizon_property() {
        let result = Pipeline::new(Config::default()).run().unwrap();

        for (pos, rec) in result.positions.iter().zip(&result.records) {
            if pos.zenith_deg > 90.0 {
                assert_eq!(rec.dni, 0.0);
                assert!(rec.poa_global <= rec.poa_sky_diffuse + rec.poa_ground_diffuse);
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let first = Pipeline::new(Config::default()).run().unwrap();
        let second = Pipeline::new(Config::default()).run().unwrap();

        let a: Vec<u64> = first.table.values().map(f64::to_bits).collect();
        let b: Vec<u64> = second.table.values().map(f64::to_bits).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_calendar_grid_leap_year() {
        let base = Config::default();
        let config = Config::new(
            base.location().clone(),
            base.panel(),
            2016,
            GridMode::Calendar,
        )
        .unwrap();

        let result = Pipeline::new(config).run().unwrap();
        assert_eq!(result.times.len(), 8784);
    }

    #[test]
    fn test_south_facing_beats_north_facing() {
        let location = Location::default();
        let south = Config::new(
            location.clone(),
            PanelOrientation::new(30.0, 180.0).unwrap(),
            2023,
            GridMode::Fixed365,
        )
        .unwrap();
        let north = Config::new(
            location,
            PanelOrientation::new(30.0, 0.0).unwrap(),
            2023,
            GridMode::Fixed365,
        )
        .unwrap();

        let south = Pipeline::new(south).run().unwrap().table;
        let north = Pipeline::new(north).run().unwrap().table;

        assert!(south.annual_total_kwh() > north.annual_total_kwh());
    }

    #[test]
    fn test_write_outputs() {
        let dir = tempdir().unwrap();
        let table_path = dir.path().join("month_averages.csv");
        let series_path = dir.path().join("hourly.tsv");
        let config = Config::default()
            .with_output(&table_path)
            .with_series_output(&series_path);

        let pipeline = Pipeline::new(config);
        let result = pipeline.run().unwrap();
        pipeline.write_outputs(&result).unwrap();

        let table = std::fs::read_to_string(&table_path).unwrap();
        assert_eq!(table.lines().count(), 25);

        let series = std::fs::read_to_string(&series_path).unwrap();
        assert_eq!(series.lines().count(), 8761);
        assert!(series.starts_with("timestamp\tzenith\tazimuth\taoi"));
    }
}
