use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;
use tracing::debug;

pub const HOURS: usize = 24;
pub const MONTHS: usize = 12;

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("{times} timestamps but {values} values")]
    LengthMismatch { times: usize, values: usize },

    #[error("no samples for month {month} at hour {hour}")]
    EmptyCell { month: u32, hour: u32 },

    #[error("month {month} of year {year} cannot be represented")]
    MonthBoundary { year: i32, month: u32 },
}

/// Mean value per hour of day (rows, 0-23) and month (columns, 1-12).
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTable {
    year: i32,
    cells: [[f64; MONTHS]; HOURS],
}

impl MonthlyTable {
    pub fn year(&self) -> i32 {
        self.year
    }

    /// `month` is 1-based.
    pub fn get(&self, hour: usize, month: u32) -> Option<f64> {
        let col = (month as usize).checked_sub(1)?;
        self.cells.get(hour)?.get(col).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = (usize, &[f64; MONTHS])> {
        self.cells.iter().enumerate()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.cells.iter().flatten().copied()
    }

    /// Sum of the hourly means for one month, i.e. the average daily
    /// insolation in Wh/m^2.
    pub fn daily_total(&self, month: u32) -> Option<f64> {
        let col = (month as usize).checked_sub(1).filter(|c| *c < MONTHS)?;
        Some(self.cells.iter().map(|row| row[col]).sum())
    }

    /// Insolation over the calendar year in kWh/m^2.
    pub fn annual_total_kwh(&self) -> f64 {
        (1..=MONTHS as u32)
            .filter_map(|month| {
                let days = days_in_month(self.year, month)?;
                Some(self.daily_total(month)? * days as f64)
            })
            .sum::<f64>()
            / 1000.0
    }
}

fn month_start(year: i32, month: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)
}

fn next_month_start(year: i32, month: u32) -> Option<NaiveDateTime> {
    if month == 12 {
        month_start(year.checked_add(1)?, 1)
    } else {
        month_start(year, month + 1)
    }
}

fn days_in_month(year: i32, month: u32) -> Option<i64> {
    Some((next_month_start(year, month)? - month_start(year, month)?).num_days())
}

/// Averages `values` by month and hour of day.
///
/// `times` must be sorted, hourly, and aligned to midnight. Each month is the
/// half-open range [1st 00:00, 1st of next month 00:00); inside it every 24th
/// sample starting at offset `hour` is averaged. Samples outside `year` are
/// ignored.
pub fn monthly_hourly_means(
    year: i32,
    times: &[NaiveDateTime],
    values: &[f64],
) -> Result<MonthlyTable, AggregateError> {
    if times.len() != values.len() {
        return Err(AggregateError::LengthMismatch {
            times: times.len(),
            values: values.len(),
        });
    }

    let mut cells = [[0.0; MONTHS]; HOURS];

    for month in 1..=MONTHS as u32 {
        let (Some(start), Some(end)) = (month_start(year, month), next_month_start(year, month))
        else {
            return Err(AggregateError::MonthBoundary { year, month });
        };

        let lo = times.partition_point(|t| *t < start);
        let hi = times.partition_point(|t| *t < end);
        let month_values = &values[lo..hi];

        debug!(
            month,
            samples = month_values.len(),
            first = ?times.get(lo).map(|t| t.date()),
            "aggregating month"
        );

        for (hour, row) in cells.iter_mut().enumerate() {
            let (sum, count) = month_values
                .iter()
                .skip(hour)
                .step_by(HOURS)
                .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

            if count == 0 {
                return Err(AggregateError::EmptyCell {
                    month,
                    hour: hour as u32,
                });
            }

            row[month as usize - 1] = sum / count as f64;
        }
    }

    Ok(MonthlyTable { year, cells })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridMode;
    use crate::date_gen::DateTimeGenerator;
    use chrono::{Datelike, Timelike};

    fn grid(year: i32, mode: GridMode) -> Vec<NaiveDateTime> {
        DateTimeGenerator::new(year, mode).generate_datetime_series()
    }

    #[test]
    fn test_hour_of_day_signal() {
        let times = grid(2023, GridMode::Fixed365);
        let values: Vec<f64> = times.iter().map(|t| t.hour() as f64).collect();

        let table = monthly_hourly_means(2023, &times, &values).unwrap();

        for hour in 0..HOURS {
            for month in 1..=12 {
                assert_eq!(table.get(hour, month), Some(hour as f64));
            }
        }
    }

    #[test]
    fn test_month_signal() {
        let times = grid(2023, GridMode::Fixed365);
        let values: Vec<f64> = times.iter().map(|t| t.month() as f64 * 10.0).collect();

        let table = monthly_hourly_means(2023, &times, &values).unwrap();

        for (_, row) in table.rows() {
            for (col, v) in row.iter().enumerate() {
                assert_eq!(*v, (col + 1) as f64 * 10.0);
            }
        }
    }

    #[test]
    fn test_day_average() {
        // Value is the day of month; each cell averages 1..=days
        let times = grid(2023, GridMode::Fixed365);
        let values: Vec<f64> = times.iter().map(|t| t.day() as f64).collect();

        let table = monthly_hourly_means(2023, &times, &values).unwrap();

        assert_eq!(table.get(0, 1), Some(16.0)); // (1 + 31) / 2
        assert_eq!(table.get(23, 2), Some(14.5)); // (1 + 28) / 2
        assert_eq!(table.get(12, 4), Some(15.5)); // (1 + 30) / 2
    }

    #[test]
    fn test_leap_year_fixed_grid() {
        // Fixed grid ends Dec 30 23:00, so December only sees 30 days
        let times = grid(2016, GridMode::Fixed365);
        let values: Vec<f64> = times.iter().map(|t| t.day() as f64).collect();

        let table = monthly_hourly_means(2016, &times, &values).unwrap();

        assert_eq!(table.get(0, 2), Some(15.0)); // (1 + 29) / 2
        assert_eq!(table.get(0, 12), Some(15.5)); // (1 + 30) / 2
    }

    #[test]
    fn test_leap_year_calendar_grid() {
        let times = grid(2016, GridMode::Calendar);
        let values: Vec<f64> = times.iter().map(|t| t.day() as f64).collect();

        let table = monthly_hourly_means(2016, &times, &values).unwrap();

        assert_eq!(table.get(5, 2), Some(15.0));
        assert_eq!(table.get(5, 12), Some(16.0));
    }

    #[test]
    fn test_ignores_other_years() {
        let mut times = grid(2023, GridMode::Fixed365);
        let mut values = vec![1.0; times.len()];
        // A stray day of the following year must not leak into December
        let extra = grid(2024, GridMode::Fixed365);
        times.extend_from_slice(&extra[..24]);
        values.extend(std::iter::repeat_n(1000.0, 24));

        let table = monthly_hourly_means(2023, &times, &values).unwrap();

        assert!(table.values().all(|v| v == 1.0));
    }

    #[test]
    fn test_shape_and_totals() {
        let times = grid(2023, GridMode::Fixed365);
        let values = vec![100.0; times.len()];

        let table = monthly_hourly_means(2023, &times, &values).unwrap();

        assert_eq!(table.rows().count(), HOURS);
        assert_eq!(table.values().count(), HOURS * MONTHS);
        assert_eq!(table.daily_total(1), Some(2400.0));
        assert_eq!(table.daily_total(13), None);
        assert!((table.annual_total_kwh() - 876.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_month() {
        let times: Vec<NaiveDateTime> = grid(2023, GridMode::Fixed365)
            .into_iter()
            .filter(|t| t.month() != 3)
            .collect();
        let values = vec![0.0; times.len()];

        let result = monthly_hourly_means(2023, &times, &values);
        assert!(matches!(
            result,
            Err(AggregateError::EmptyCell { month: 3, hour: 0 })
        ));
    }

    #[test]
    fn test_length_mismatch() {
        let times = grid(2023, GridMode::Fixed365);
        let result = monthly_hourly_means(2023, &times, &[1.0, 2.0]);
        assert!(matches!(result, Err(AggregateError::LengthMismatch { .. })));
    }
}
