use approx::assert_abs_diff_eq;
use heliostat::{observer::GeoObservation, solar_position::SolarPosition};
use serde::Deserialize;

/// One row of `tests/data/solar_golden.csv`.
#[derive(Debug, Clone, Deserialize)]
pub struct GoldenRow {
    pub model: String,
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
    pub second: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub azimuth: f64,
    pub elevation: f64,
}

impl GoldenRow {
    pub fn observation(&self) -> GeoObservation {
        GeoObservation::new(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            self.latitude,
            self.longitude,
            self.altitude,
        )
    }

    pub fn expected(&self) -> SolarPosition {
        SolarPosition::new(self.azimuth, self.elevation)
    }
}

pub fn read_golden(path: &str) -> Vec<GoldenRow> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    reader
        .deserialize()
        .collect::<Result<Vec<GoldenRow>, _>>()
        .unwrap()
}

pub fn assert_position_close(actual: &SolarPosition, expected: &SolarPosition, epsilon: f64) {
    assert_abs_diff_eq!(actual.azimuth, expected.azimuth, epsilon = epsilon);
    assert_abs_diff_eq!(actual.elevation, expected.elevation, epsilon = epsilon);
}
