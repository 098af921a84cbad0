//! # Observation context
//!
//! [`GeoObservation`] bundles what every solar position model needs: a UTC calendar date and time,
//! and the geographic position of the observer.
//!
//! Fields are stored exactly as given. No calendar or coordinate validation happens here,
//! out-of-range values flow through the arithmetic of the models unchanged.

use hifitime::Epoch;

use crate::{
    constants::{Degree, Hour, JulianDay, Meter},
    time::{julian_day, ut_hours},
};

/// UTC date/time and geographic position of an observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoObservation {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
    /// Seconds, may carry a fractional part
    pub second: f64,
    /// Geodetic latitude in degrees, positive north
    pub latitude: Degree,
    /// Longitude in degrees, positive east
    pub longitude: Degree,
    /// Altitude above sea level in meters
    pub altitude: Meter,
}

impl GeoObservation {
    /// Build an observation from UTC calendar components.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: f64,
        latitude: Degree,
        longitude: Degree,
        altitude: Meter,
    ) -> Self {
        GeoObservation {
            year,
            month,
            day,
            hour,
            minute,
            second,
            latitude,
            longitude,
            altitude,
        }
    }

    /// Build an observation from a [`hifitime::Epoch`].
    ///
    /// The epoch is expressed in UTC and split into Gregorian components; the nanoseconds are kept
    /// as the fractional part of [`GeoObservation::second`].
    pub fn from_epoch(epoch: &Epoch, latitude: Degree, longitude: Degree, altitude: Meter) -> Self {
        let (year, month, day, hour, minute, second, nanos) = epoch.to_gregorian_utc();

        GeoObservation {
            year,
            month: month as i32,
            day: day as i32,
            hour: hour as i32,
            minute: minute as i32,
            second: second as f64 + nanos as f64 * 1e-9,
            latitude,
            longitude,
            altitude,
        }
    }

    /// Time of day in decimal UTC hours.
    pub fn ut_hours(&self) -> Hour {
        ut_hours(self.hour, self.minute, self.second)
    }

    /// Julian Day of the observation, see [`julian_day`].
    pub fn julian_day(&self) -> JulianDay {
        julian_day(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
        )
    }
}

#[cfg(test)]
mod observer_test {
    use super::*;
    use hifitime::Epoch;

    #[test]
    fn test_from_epoch() {
        let epoch = Epoch::from_gregorian_utc(2023, 8, 1, 10, 15, 30, 250_000_000);
        let obs = GeoObservation::from_epoch(&epoch, -33.8352, 18.6510, 150.0);

        assert_eq!(
            obs,
            GeoObservation::new(2023, 8, 1, 10, 15, 30.25, -33.8352, 18.6510, 150.0)
        );
        assert_eq!(obs.ut_hours(), 10.0 + 15.0 / 60.0 + 30.25 / 3600.0);
    }

    #[test]
    fn test_julian_day() {
        let obs = GeoObservation::new(2000, 1, 1, 12, 0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(obs.julian_day(), 2451545.0);
    }
}
