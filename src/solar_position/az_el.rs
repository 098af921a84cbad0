//! Julian-day based solar position model.
//!
//! Orbital elements of the sun are linear functions of the days elapsed since
//! 1999-12-31 00:00 UT. The eccentric anomaly is approximated with one correction term of
//! Kepler's equation, the ecliptic position is rotated to equatorial coordinates, then to the
//! local horizon through the sidereal time.
//!
//! # Known defect
//!
//! The altitude correction subtracts `altitude / 149598000` from the sun distance. The altitude
//! is in meters while the constant is one astronomical unit in kilometers, so the correction is
//! 1000 times too large for a distance expressed in AU. It is kept as is: with altitudes of a few
//! kilometers the effect on the angles stays below 1e-3 degree.

use log::trace;

use crate::{
    constants::{Degree, JulianDay, Meter, AU_KM_APPROX, DEG_PER_HOUR, J1999_DEC31_JD, RADEG},
    observer::GeoObservation,
    time::{julian_day, ut_hours},
    vector_math::to_degrees,
};

use super::{SolarEphemeris, SolarPosition};

/// Obliquity used for the z component of the ecliptic → equatorial rotation.
const FIXED_OBLIQUITY: Degree = 23.4406;

/// Equatorial coordinates of the sun and the mean longitude used for the sidereal time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunEquatorial {
    /// Right ascension, degrees in `(-180, 180]`
    pub right_ascension: Degree,
    /// Declination, degrees
    pub declination: Degree,
    /// Sun distance in AU, after the altitude correction
    pub distance: f64,
    /// Mean longitude of the sun `w + M`, degrees
    pub mean_longitude: Degree,
}

impl SunEquatorial {
    /// Evaluate the sun's equatorial coordinates at a Julian Day, seen from a given altitude.
    pub fn at(jd: JulianDay, altitude: Meter) -> Self {
        let d = jd - J1999_DEC31_JD;

        // longitude of perihelion, eccentricity, mean anomaly
        let w = 282.9404 + 4.70935e-5 * d;
        let e = 0.016709 - 1.151e-9 * d;
        let m = (356.0470 + 0.9856002585 * d) % 360.0;

        let mean_longitude = w + m;
        let oblecl = 23.4393 - 3.563e-7 * d;

        let m_rad = m * RADEG;
        let ecc_anomaly = m + to_degrees(e * m_rad.sin() * (1.0 + e * m_rad.cos()));

        // position in the orbital plane
        let x = (ecc_anomaly * RADEG).cos() - e;
        let y = (ecc_anomaly * RADEG).sin() * (1.0 - e * e).sqrt();
        let r = (x * x + y * y).sqrt();
        let lon = to_degrees(y.atan2(x)) + w;

        let xeclip = r * (lon * RADEG).cos();
        let yeclip = r * (lon * RADEG).sin();

        let xequat = xeclip;
        let yequat = yeclip * (oblecl * RADEG).cos();
        let zequat = yeclip * (FIXED_OBLIQUITY * RADEG).sin();

        let distance = (xequat * xequat + yequat * yequat + zequat * zequat).sqrt()
            - altitude / AU_KM_APPROX;

        SunEquatorial {
            right_ascension: to_degrees(yequat.atan2(xequat)),
            declination: to_degrees((zequat / distance).clamp(-1.0, 1.0).asin()),
            distance,
            mean_longitude,
        }
    }

    /// Hour angle in degrees for a UTC time of day and an observer longitude.
    ///
    /// ```text
    /// GMST0   = ((L + 180) mod 360) / 15
    /// SIDTIME = GMST0 + UT + lon / 15
    /// HA      = 15 SIDTIME - RA
    /// ```
    pub fn hour_angle(&self, ut: f64, longitude: Degree) -> Degree {
        let gmst0 = ((self.mean_longitude + 180.0) % 360.0) / DEG_PER_HOUR;
        let sidereal_time = gmst0 + ut + longitude / DEG_PER_HOUR;
        sidereal_time * DEG_PER_HOUR - self.right_ascension
    }
}

/// Julian-day based solar position model, see the [module documentation](self).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolarAzEl;

impl SolarEphemeris for SolarAzEl {
    fn solar_position(&self, observation: &GeoObservation) -> SolarPosition {
        horizontal_position(
            observation.julian_day(),
            observation.ut_hours(),
            observation.latitude,
            observation.longitude,
            observation.altitude,
        )
    }
}

/// Solar azimuth and elevation with the Julian-day based model.
///
/// Arguments
/// ---------
/// * `year`, `month`, `day`, `hour`, `min`, `sec`: UTC date and time
/// * `latitude`, `longitude`: observer position in degrees
/// * `altitude`: observer altitude in meters
///
/// Return
/// ------
/// * The [`SolarPosition`]; the azimuth lies in `[0, 360]`
///
/// # Example
///
/// ```
/// use heliostat::solar_position::solar_position_precise;
///
/// let pos = solar_position_precise(2000, 1, 1, 12, 0, 0.0, 0.0, 0.0, 0.0);
/// assert!((pos.azimuth - 178.06).abs() < 0.01);
/// assert!((pos.elevation - 66.95).abs() < 0.01);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn solar_position_precise(
    year: i32,
    month: i32,
    day: i32,
    hour: i32,
    min: i32,
    sec: f64,
    latitude: Degree,
    longitude: Degree,
    altitude: Meter,
) -> SolarPosition {
    horizontal_position(
        julian_day(year, month, day, hour, min, sec),
        ut_hours(hour, min, sec),
        latitude,
        longitude,
        altitude,
    )
}

/// Rotate the sun direction from the hour angle frame to the local horizon.
fn horizontal_position(
    jd: JulianDay,
    ut: f64,
    latitude: Degree,
    longitude: Degree,
    altitude: Meter,
) -> SolarPosition {
    let sun = SunEquatorial::at(jd, altitude);
    trace!("sun equatorial coordinates at JD {jd}: {sun:?}");

    let ha = sun.hour_angle(ut, longitude) * RADEG;
    let delta = sun.declination * RADEG;

    let x = ha.cos() * delta.cos();
    let y = ha.sin() * delta.cos();
    let z = delta.sin();

    let colat = (90.0 - latitude) * RADEG;
    let xhor = x * colat.cos() - z * colat.sin();
    let yhor = y;
    let zhor = x * colat.sin() + z * colat.cos();

    SolarPosition {
        azimuth: to_degrees(yhor.atan2(xhor)) + 180.0,
        elevation: to_degrees(zhor.clamp(-1.0, 1.0).asin()),
    }
}

#[cfg(test)]
mod az_el_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sun_equatorial_j2000() {
        let sun = SunEquatorial::at(2451545.0, 0.0);
        // apparent RA ≈ 18h45m, declination ≈ -23.0° on 2000-01-01
        assert!((sun.right_ascension - (-78.7)).abs() < 0.2, "{sun:?}");
        assert!((sun.declination - (-23.0)).abs() < 0.1, "{sun:?}");
        assert!((sun.distance - 0.9833).abs() < 1e-3, "{sun:?}");
    }

    #[test]
    fn test_solar_position_precise_golden() {
        let pos = solar_position_precise(2000, 1, 1, 12, 0, 0.0, 0.0, 0.0, 0.0);
        assert_relative_eq!(pos.azimuth, 178.05753683344568, epsilon = 1e-9);
        assert_relative_eq!(pos.elevation, 66.95163961967401, epsilon = 1e-9);

        let pos = solar_position_precise(2023, 8, 1, 10, 0, 0.0, -33.8352, 18.6510, 0.0);
        assert_relative_eq!(pos.azimuth, 15.40429083847792, epsilon = 1e-9);
        assert_relative_eq!(pos.elevation, 36.69066113401104, epsilon = 1e-9);
    }

    #[test]
    fn test_altitude_correction_is_kept() {
        let sea = solar_position_precise(2024, 6, 21, 18, 0, 0.0, 40.0, -105.0, 0.0);
        let high = solar_position_precise(2024, 6, 21, 18, 0, 0.0, 40.0, -105.0, 1600.0);

        assert_relative_eq!(sea.elevation, 68.90087714913145, epsilon = 1e-9);
        assert_relative_eq!(high.elevation, 68.90109218373934, epsilon = 1e-9);
        assert_relative_eq!(high.azimuth, 137.0823091214408, epsilon = 1e-9);
        assert!(high.elevation > sea.elevation);
    }

    #[test]
    fn test_trait_matches_free_function() {
        let obs = GeoObservation::new(2024, 6, 21, 18, 0, 0.0, 40.0, -105.0, 1600.0);
        assert_eq!(
            SolarAzEl.solar_position(&obs),
            solar_position_precise(2024, 6, 21, 18, 0, 0.0, 40.0, -105.0, 1600.0)
        );
    }

    #[test]
    fn test_noon_is_due_south_in_the_north() {
        // near local solar noon the sun crosses the meridian
        let pos = solar_position_precise(2024, 3, 20, 12, 7, 0.0, 45.0, 0.0, 0.0);
        assert!((pos.azimuth - 180.0).abs() < 1.0, "{pos}");
        assert!((pos.elevation - 45.0).abs() < 1.0, "{pos}");
    }
}
