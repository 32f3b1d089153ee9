use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::WriterBuilder;
use thiserror::Error;
use tracing::info;

use crate::aggregate::{MONTHS, MonthlyTable};
use crate::irradiance::IrradianceRecord;
use crate::solar::SolarPosition;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("hourly series columns differ in length: {times} times, {positions} positions, {records} records")]
    SeriesLength {
        times: usize,
        positions: usize,
        records: usize,
    },
}

/// Tab separated, months across, hours down. The header starts with an empty
/// cell above the hour column.
pub fn write_monthly_table<W: Write>(writer: W, table: &MonthlyTable) -> Result<(), OutputError> {
    let mut writer = WriterBuilder::new().delimiter(b'\t').from_writer(writer);

    let mut header = vec![String::new()];
    header.extend((1..=MONTHS).map(|month| month.to_string()));
    writer.write_record(&header)?;

    for (hour, row) in table.rows() {
        let mut record = Vec::with_capacity(MONTHS + 1);
        record.push(hour.to_string());
        record.extend(row.iter().map(|v| v.to_string()));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_monthly_table_file<P: AsRef<Path>>(
    path: P,
    table: &MonthlyTable,
) -> Result<(), OutputError> {
    let file = File::create(path.as_ref())?;
    write_monthly_table(file, table)?;
    info!(path = %path.as_ref().display(), "wrote monthly averages");
    Ok(())
}

/// Every hourly sample of the run, one row per timestamp.
pub fn write_hourly_series<W: Write>(
    writer: W,
    times: &[NaiveDateTime],
    positions: &[SolarPosition],
    records: &[IrradianceRecord],
) -> Result<(), OutputError> {
    if times.len() != positions.len() || times.len() != records.len() {
        return Err(OutputError::SeriesLength {
            times: times.len(),
            positions: positions.len(),
            records: records.len(),
        });
    }

    let mut writer = WriterBuilder::new().delimiter(b'\t').from_writer(writer);

    writer.write_record([
        "timestamp",
        "zenith",
        "azimuth",
        "aoi",
        "dni",
        "dhi",
        "ghi",
        "poa_direct",
        "poa_sky_diffuse",
        "poa_ground_diffuse",
        "poa_global",
    ])?;

    for ((time, pos), rec) in times.iter().zip(positions).zip(records) {
        writer.write_record([
            time.format("%Y-%m-%d %H:%M:%S").to_string(),
            pos.zenith_deg.to_string(),
            pos.azimuth_deg.to_string(),
            rec.aoi_deg.to_string(),
            rec.dni.to_string(),
            rec.dhi.to_string(),
            rec.ghi.to_string(),
            rec.poa_direct.to_string(),
            rec.poa_sky_diffuse.to_string(),
            rec.poa_ground_diffuse.to_string(),
            rec.poa_global.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_hourly_series_file<P: AsRef<Path>>(
    path: P,
    times: &[NaiveDateTime],
    positions: &[SolarPosition],
    records: &[IrradianceRecord],
) -> Result<(), OutputError> {
    let file = File::create(path.as_ref())?;
    write_hourly_series(file, times, positions, records)?;
    info!(path = %path.as_ref().display(), rows = times.len(), "wrote hourly series");
    Ok(())
}

pub fn log_table_summary(table: &MonthlyTable) {
    let values: Vec<f64> = table.values().collect();
    if values.is_empty() {
        return;
    }

    let min = values.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    let max = values.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let mean = values.iter().sum::<f64>() / values.len() as f64;

    info!(
        year = table.year(),
        min = %format!("{min:.2}"),
        max = %format!("{max:.2}"),
        mean = %format!("{mean:.2}"),
        "monthly table W m-2"
    );

    for month in 1..=MONTHS as u32 {
        if let Some(daily) = table.daily_total(month) {
            info!(month, daily_wh = %format!("{daily:.0}"), "mean daily insolation");
        }
    }

    info!(
        annual_kwh = %format!("{:.1}", table.annual_total_kwh()),
        "clear-sky annual insolation per m2"
    );
}
