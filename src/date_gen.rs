use crate::config::GridMode;
use chrono::{Duration, NaiveDate, NaiveDateTime};

pub const HOURS_PER_DAY: usize = 24;
pub const FIXED_YEAR_HOURS: usize = 365 * HOURS_PER_DAY;

/// Number of hourly samples the grid holds for `year`.
pub fn hours_in_year(year: i32, grid: GridMode) -> usize {
    match grid {
        GridMode::Fixed365 => FIXED_YEAR_HOURS,
        GridMode::Calendar => {
            let days = match (
                NaiveDate::from_ymd_opt(year, 1, 1),
                year.checked_add(1)
                    .and_then(|next| NaiveDate::from_ymd_opt(next, 1, 1)),
            ) {
                (Some(start), Some(end)) => (end - start).num_days() as usize,
                _ => 365,
            };
            days * HOURS_PER_DAY
        }
    }
}

pub struct DateTimeGenerator {
    year: i32,
    grid: GridMode,
}

impl DateTimeGenerator {
    pub fn new(year: i32, grid: GridMode) -> Self {
        Self { year, grid }
    }

    /// Hourly wall-clock times starting at Jan 1 00:00 of the configured year.
    pub fn generate_datetime_series(&self) -> Vec<NaiveDateTime> {
        let Some(start) =
            NaiveDate::from_ymd_opt(self.year, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
        else {
            tracing::warn!(year = self.year, "year cannot be represented, empty time grid");
            return Vec::new();
        };

        let count = hours_in_year(self.year, self.grid);
        (0..count as i64)
            .map(|hour| start + Duration::hours(hour))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_generate_datetime_series() {
        let series = DateTimeGenerator::new(2023, GridMode::Fixed365).generate_datetime_series();

        assert_eq!(series.len(), 8760);
        assert_eq!(
            series[0],
            NaiveDate::from_ymd_opt(2023, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );

        let last = series.last().unwrap();
        assert_eq!(last.date(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert_eq!(last.hour(), 23);
    }

    #[test]
    fn test_strictly_hourly() {
        let series = DateTimeGenerator::new(2023, GridMode::Fixed365).generate_datetime_series();

        for pair in series.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::hours(1));
        }
    }

    #[test]
    fn test_fixed_grid_ignores_leap_day() {
        let series = DateTimeGenerator::new(2016, GridMode::Fixed365).generate_datetime_series();

        // Same count as any other year, so the grid stops a day short
        assert_eq!(series.len(), 8760);
        let last = series.last().unwrap();
        assert_eq!((last.month(), last.day(), last.hour()), (12, 30, 23));
    }

    #[test]
    fn test_calendar_grid_leap_year() {
        let series = DateTimeGenerator::new(2016, GridMode::Calendar).generate_datetime_series();

        assert_eq!(series.len(), 8784);
        let last = series.last().unwrap();
        assert_eq!((last.month(), last.day(), last.hour()), (12, 31, 23));
    }

    #[test]
    fn test_hours_in_year() {
        assert_eq!(hours_in_year(2023, GridMode::Calendar), 8760);
        assert_eq!(hours_in_year(2024, GridMode::Calendar), 8784);
        assert_eq!(hours_in_year(2024, GridMode::Fixed365), 8760);
    }
}
