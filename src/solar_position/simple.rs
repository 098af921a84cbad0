//! Simple solar position model.
//!
//! Mean solar elements are evaluated as polynomials of the time in Julian centuries, corrected by
//! a three-term equation of center; the hour angle includes a five-term equation of time.
//! The time argument is the coarse [`simplified_julian_date`], not a true Julian Day.

use log::trace;

use crate::{
    constants::{Degree, Hour, DAYS_PER_CENTURY, DEG_PER_HOUR, J2000_JD, RADEG},
    observer::GeoObservation,
    time::simplified_julian_date,
    vector_math::to_degrees,
};

use super::{SolarEphemeris, SolarPosition};

/// Intermediate quantities of the simple model for a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleSolarElements {
    /// Julian centuries since J2000.0, from the simplified date
    pub centuries: f64,
    /// Mean longitude of the sun, degrees in `(-360, 360)`
    pub mean_longitude: Degree,
    /// Mean anomaly of the sun, degrees in `(-360, 360)`
    pub mean_anomaly: Degree,
    /// Eccentricity of Earth's orbit
    pub eccentricity: f64,
    /// Apparent ecliptic longitude (mean longitude + equation of center), degrees
    pub apparent_longitude: Degree,
    /// Obliquity of the ecliptic, degrees
    pub obliquity: Degree,
    /// Declination, degrees
    pub declination: Degree,
    /// Equation of time, minutes
    pub equation_of_time: f64,
}

impl SimpleSolarElements {
    /// Evaluate the elements for a number of Julian centuries since J2000.0.
    pub fn at_centuries(t: f64) -> Self {
        let t2 = t * t;

        let mean_longitude = (280.46646 + 36000.76983 * t + 0.0003032 * t2) % 360.0;
        let mean_anomaly = (357.52911 + 35999.05029 * t - 0.0001537 * t2) % 360.0;
        let eccentricity = 0.016708634 - 0.000042037 * t - 0.0000001267 * t2;

        let m = mean_anomaly * RADEG;

        // equation of center
        let center = (1.914602 - 0.004817 * t - 0.000014 * t2) * m.sin()
            + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
            + 0.000289 * (3.0 * m).sin();
        let apparent_longitude = mean_longitude + center;

        let obliquity = 23.436993 + 0.000013 * t;
        let sin_dec = (apparent_longitude * RADEG).sin() * (obliquity * RADEG).sin();
        let declination = to_degrees(sin_dec.clamp(-1.0, 1.0).asin());

        let equation_of_time = 229.18
            * (0.000075 + 0.001868 * m.cos()
                - 0.032077 * m.sin()
                - 0.014615 * (2.0 * m).cos()
                - 0.040849 * (2.0 * m).sin());

        SimpleSolarElements {
            centuries: t,
            mean_longitude,
            mean_anomaly,
            eccentricity,
            apparent_longitude,
            obliquity,
            declination,
            equation_of_time,
        }
    }

    /// Evaluate the elements for a calendar date and UTC time of day in decimal hours.
    pub fn at(day: f64, month: f64, year: f64, ut: Hour) -> Self {
        let jd = simplified_julian_date(day, month, year, ut);
        Self::at_centuries((jd - J2000_JD) / DAYS_PER_CENTURY)
    }
}

/// Simple solar position model, see the [module documentation](self).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimpleSunPosition;

impl SolarEphemeris for SimpleSunPosition {
    fn solar_position(&self, observation: &GeoObservation) -> SolarPosition {
        solar_position_simple(
            observation.day as f64,
            observation.month as f64,
            observation.year as f64,
            observation.hour as f64,
            observation.minute as f64,
            observation.second,
            observation.latitude,
            observation.longitude,
        )
    }
}

/// Solar azimuth and elevation with the simple model.
///
/// Arguments
/// ---------
/// * `day`, `month`, `year`: calendar date (note the order)
/// * `ut_hour`, `ut_minute`, `ut_second`: UTC time of day
/// * `latitude`, `longitude`: observer position in degrees
///
/// Return
/// ------
/// * The [`SolarPosition`] in degrees
///
/// # Details
/// With the elements of [`SimpleSolarElements`]:
///
/// ```text
/// H  = (15 (UT + 4 (λ - lon) + EoT/60) - 180) mod 360
/// El = asin(sinφ sinδ + cosφ cosδ cosH)
/// Az = acos((sinδ - sinEl sinφ) / (cosEl cosφ)),   Az = 180° - Az when sinδ < 0
/// ```
///
/// The azimuth is taken from `acos` and therefore always lies in `[0, 180]`.
#[allow(clippy::too_many_arguments)]
pub fn solar_position_simple(
    day: f64,
    month: f64,
    year: f64,
    ut_hour: f64,
    ut_minute: f64,
    ut_second: f64,
    latitude: Degree,
    longitude: Degree,
) -> SolarPosition {
    let ut = ut_hour + ut_minute / 60.0 + ut_second / 3600.0;
    let elements = SimpleSolarElements::at(day, month, year, ut);
    trace!("simple solar elements: {elements:?}");

    let hour_angle = (DEG_PER_HOUR
        * (ut + 4.0 * (elements.apparent_longitude - longitude) + elements.equation_of_time / 60.0)
        - 180.0)
        % 360.0;

    let phi = latitude * RADEG;
    let delta = elements.declination * RADEG;
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_dec, cos_dec) = delta.sin_cos();

    let sin_el = sin_phi * sin_dec + cos_phi * cos_dec * (hour_angle * RADEG).cos();
    let elevation = sin_el.clamp(-1.0, 1.0).asin();

    let cos_az = (sin_dec - elevation.sin() * sin_phi) / (elevation.cos() * cos_phi);
    let mut azimuth = to_degrees(cos_az.clamp(-1.0, 1.0).acos());
    if sin_dec < 0.0 {
        azimuth = 180.0 - azimuth;
    }

    SolarPosition {
        azimuth,
        elevation: to_degrees(elevation),
    }
}

#[cfg(test)]
mod simple_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_elements_at_j2000() {
        let el = SimpleSolarElements::at_centuries(0.0);
        assert_eq!(el.mean_longitude, 280.46646);
        assert_eq!(el.mean_anomaly, 357.52911);
        assert_eq!(el.eccentricity, 0.016708634);
        assert_eq!(el.obliquity, 23.436993);
        assert_relative_eq!(el.declination, -23.030956005220588, epsilon = 1e-12);
        assert_relative_eq!(el.equation_of_time, -1.7687284485579693, epsilon = 1e-12);
    }

    #[test]
    fn test_elements_use_simplified_date() {
        let el = SimpleSolarElements::at(1.0, 1.0, 2000.0, 12.0);
        assert_relative_eq!(el.centuries, (2001.0 - 2451545.0) / 36525.0);
    }

    #[test]
    fn test_solar_position_simple_golden() {
        let pos = solar_position_simple(1.0, 1.0, 2000.0, 12.0, 0.0, 0.0, 0.0, 0.0);
        assert_relative_eq!(pos.azimuth, 63.3060929494083, epsilon = 1e-9);
        assert_relative_eq!(pos.elevation, 44.78149334185788, epsilon = 1e-9);

        let pos = solar_position_simple(1.0, 8.0, 2023.0, 10.0, 0.0, 0.0, -33.8352, 18.6510);
        assert_relative_eq!(pos.azimuth, 145.31717122944374, epsilon = 1e-9);
        assert_relative_eq!(pos.elevation, -76.81425550551471, epsilon = 1e-9);
    }

    #[test]
    fn test_azimuth_range() {
        for hour in 0..24 {
            let pos = solar_position_simple(21.0, 6.0, 2024.0, hour as f64, 0.0, 0.0, 40.0, -105.0);
            assert!((0.0..=180.0).contains(&pos.azimuth), "{pos}");
            assert!((-90.0..=90.0).contains(&pos.elevation), "{pos}");
        }
    }

    #[test]
    fn test_trait_matches_free_function() {
        let obs = GeoObservation::new(2024, 6, 21, 12, 0, 0.0, 40.0, -105.0, 1600.0);
        assert_eq!(
            SimpleSunPosition.solar_position(&obs),
            solar_position_simple(21.0, 6.0, 2024.0, 12.0, 0.0, 0.0, 40.0, -105.0)
        );
    }
}
