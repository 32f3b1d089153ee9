pub mod position;

pub use position::SolarPosition;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::location::{Location, PanelOrientation};

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("solar position failed at {time}: {detail}")]
    Ephemeris { time: NaiveDateTime, detail: String },

    #[error("non-finite solar position at {time}: zenith {zenith}, azimuth {azimuth}")]
    Position {
        time: NaiveDateTime,
        zenith: f64,
        azimuth: f64,
    },

    #[error("non-finite angle of incidence at {time}")]
    Incidence { time: NaiveDateTime },
}

/// Cosine of the angle between the sun and the panel normal, clamped to [-1, 1].
///
/// Negative when the sun is behind the panel.
pub fn aoi_projection(
    panel_tilt_deg: f64,
    panel_azimuth_deg: f64,
    zenith_deg: f64,
    azimuth_deg: f64,
) -> f64 {
    let tilt = panel_tilt_deg.to_radians();
    let zenith = zenith_deg.to_radians();
    let projection = zenith.cos() * tilt.cos()
        + zenith.sin() * tilt.sin() * (azimuth_deg - panel_azimuth_deg).to_radians().cos();

    projection.clamp(-1.0, 1.0)
}

/// Angle of incidence of the beam on the panel, degrees in [0, 180].
pub fn angle_of_incidence(
    panel_tilt_deg: f64,
    panel_azimuth_deg: f64,
    zenith_deg: f64,
    azimuth_deg: f64,
) -> f64 {
    aoi_projection(panel_tilt_deg, panel_azimuth_deg, zenith_deg, azimuth_deg)
        .acos()
        .to_degrees()
}

/// Sun positions and angles of incidence, parallel to the time grid.
#[derive(Debug, Clone)]
pub struct SolarGeometry {
    pub positions: Vec<SolarPosition>,
    pub aoi_deg: Vec<f64>,
}

impl SolarGeometry {
    /// `times` are wall-clock times at `location`.
    pub fn compute(
        times: &[NaiveDateTime],
        location: &Location,
        panel: PanelOrientation,
    ) -> Result<Self, GeometryError> {
        let mut positions = Vec::with_capacity(times.len());
        let mut aoi_deg = Vec::with_capacity(times.len());

        for &time in times {
            let pos = SolarPosition::calculate(
                location.to_utc(time),
                location.latitude_deg(),
                location.longitude_deg(),
                location.elevation_m(),
            )
            .map_err(|e| GeometryError::Ephemeris {
                time,
                detail: e.to_string(),
            })?;
            if !(pos.zenith_deg.is_finite() && pos.azimuth_deg.is_finite()) {
                return Err(GeometryError::Position {
                    time,
                    zenith: pos.zenith_deg,
                    azimuth: pos.azimuth_deg,
                });
            }

            let aoi = angle_of_incidence(
                panel.tilt_deg(),
                panel.azimuth_deg(),
                pos.zenith_deg,
                pos.azimuth_deg,
            );
            if !aoi.is_finite() {
                return Err(GeometryError::Incidence { time });
            }

            positions.push(pos);
            aoi_deg.push(aoi);
        }

        Ok(SolarGeometry { positions, aoi_deg })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_horizontal_panel_aoi_is_zenith() {
        for zenith in [0.0, 15.0, 45.0, 80.0] {
            let aoi = angle_of_incidence(0.0, 180.0, zenith, 123.0);
            assert!((aoi - zenith).abs() < 1e-9, "{aoi} vs {zenith}");
        }
    }

    #[test]
    fn test_panel_facing_sun() {
        // Sun 30 degrees from zenith in the south, panel tilted 30 degrees south
        let aoi = angle_of_incidence(30.0, 180.0, 30.0, 180.0);
        assert!(aoi.abs() < 1e-6);
    }

    #[test]
    fn test_vertical_panel_facing_away() {
        let projection = aoi_projection(90.0, 0.0, 40.0, 180.0);
        assert!(projection < 0.0);

        let aoi = angle_of_incidence(90.0, 0.0, 40.0, 180.0);
        assert!(aoi > 90.0);
    }

    #[test]
    fn test_compute_is_parallel_to_times() {
        let location = Location::new(53.2, -2.6, 0.0, 100.0, "test").unwrap();
        let panel = PanelOrientation::new(30.0, 180.0).unwrap();
        let start = NaiveDate::from_ymd_opt(2023, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let times: Vec<NaiveDateTime> = (0..48)
            .map(|h| start + chrono::Duration::hours(h))
            .collect();

        let geometry = SolarGeometry::compute(&times, &location, panel).unwrap();

        assert_eq!(geometry.len(), times.len());
        assert_eq!(geometry.aoi_deg.len(), times.len());
        assert!(geometry.aoi_deg.iter().all(|a| (0.0..=180.0).contains(a)));
        // Midnight and noon
        assert!(geometry.positions[0].zenith_deg > 90.0);
        assert!(geometry.positions[12].zenith_deg < 45.0);
    }

    #[test]
    fn test_compute_uses_utc_offset() {
        let panel = PanelOrientation::new(0.0, 180.0).unwrap();
        let gmt = Location::new(45.0, -75.0, 0.0, 0.0, "gmt").unwrap();
        let est = Location::new(45.0, -75.0, -5.0, 0.0, "est").unwrap();
        let local_noon = NaiveDate::from_ymd_opt(2023, 6, 21)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let utc_17 = local_noon + chrono::Duration::hours(5);

        let a = SolarGeometry::compute(&[local_noon], &est, panel).unwrap();
        let b = SolarGeometry::compute(&[utc_17], &gmt, panel).unwrap();

        assert_eq!(a.positions[0], b.positions[0]);
    }
}
