use hifitime::Epoch;

use crate::constants::{Hour, JulianDay};

/// Decimal hours from an hour, minute, second triplet.
///
/// No range check is done: `ut_hours(25, -3, 90.0)` is a valid call.
#[inline]
pub fn ut_hours(hour: i32, minute: i32, second: f64) -> Hour {
    hour as f64 + minute as f64 / 60.0 + second / 3600.0
}

/// Julian Day of a UTC calendar date and time.
///
/// Arguments
/// ---------
/// * `year`, `month`, `day`: Gregorian calendar date
/// * `hour`, `min`, `sec`: UTC time of day
///
/// Return
/// ------
/// * The Julian Day as a float, e.g. `2451545.0` for 2000-01-01 12:00:00
///
/// # Details
/// January and February are counted as months 13 and 14 of the previous year, then
///
/// ```text
/// JD = ⌊365.25 (Y + 4716)⌋ + ⌊30.6001 (M + 1)⌋ + 2 - ⌊Y/100⌋ + ⌊⌊Y/100⌋/4⌋ + D - 1524.5
///    + (h + m/60 + s/3600) / 24
/// ```
///
/// The Gregorian correction is always applied, so dates before 1582-10-15 are proleptic.
/// Calendar fields are not validated and out-of-range values simply carry over
/// (a local offset can be applied by adding it to `sec`).
pub fn julian_day(year: i32, month: i32, day: i32, hour: i32, min: i32, sec: f64) -> JulianDay {
    let (year, month) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };

    let y = year as f64;
    let century = (y / 100.0).floor();

    (365.25 * (y + 4716.0)).floor() + (30.6001 * (month as f64 + 1.0)).floor() + 2.0 - century
        + (century / 4.0).floor()
        + day as f64
        - 1524.5
        + ut_hours(hour, min, sec) / 24.0
}

/// Linear date approximation used by the simple solar model.
///
/// ```text
/// JD ≈ day + (month - 1)/12 + year + UT/24 - 0.5
/// ```
///
/// This is **not** a Julian Day: it is a continuous but coarse mapping of the calendar onto the
/// real line that only the simple solar model relies on. Use [`julian_day`] everywhere else.
pub fn simplified_julian_date(day: f64, month: f64, year: f64, ut: Hour) -> f64 {
    day + (month - 1.0) / 12.0 + year + ut / 24.0 - 0.5
}

/// Julian Day of a [`hifitime::Epoch`], in the UTC time scale.
pub fn julian_day_from_epoch(epoch: &Epoch) -> JulianDay {
    epoch.to_jde_utc_days()
}
