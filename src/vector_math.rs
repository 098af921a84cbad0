//! # Vector and angle helpers
//!
//! Small building blocks shared by the orientation model and the heliostat:
//! degree/radian conversion, folding of angles to the `[-180, 180)` range, and
//! 3D vector algebra on top of [`nalgebra::Vector3`].
//!
//! Every function that divides by a vector length returns
//! [`HeliostatError::DegenerateVector`] for zero-length input instead of
//! producing NaN components.

use nalgebra::Vector3;

use crate::{
    constants::{Degree, Radian, DEGRAD, RADEG},
    heliostat_errors::HeliostatError,
};

/// Convert an angle from degrees to radians.
#[inline]
pub fn to_radians(degrees: Degree) -> Radian {
    degrees * RADEG
}

/// Convert an angle from radians to degrees.
#[inline]
pub fn to_degrees(radians: Radian) -> Degree {
    radians * DEGRAD
}

/// Fold an angle in degrees toward the `[-180, 180)` range.
///
/// The angle is first reduced with a truncated modulo (the sign of the result follows the sign
/// of the input, like C's `fmod`), then 360° is subtracted if the remainder is above 180°.
///
/// Remarks
/// -------
/// * Only the upper bound is corrected. A remainder `<= -180` is returned unchanged, so
///   `fold_to_180(-200.0) == -200.0` and the result lies in `(-360, 180]`.
/// * `180.0` is kept as is (the test is strict).
///
/// # Examples
///
/// ```
/// use heliostat::vector_math::fold_to_180;
///
/// assert_eq!(fold_to_180(181.0), -179.0);
/// assert_eq!(fold_to_180(180.0), 180.0);
/// assert_eq!(fold_to_180(-200.0), -200.0);
/// ```
pub fn fold_to_180(degrees: Degree) -> Degree {
    let folded = degrees % 360.0;
    if folded > 180.0 {
        folded - 360.0
    } else {
        folded
    }
}

/// Dot product of two vectors.
#[inline]
pub fn dot(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.dot(b)
}

/// Euclidean norm of a vector.
#[inline]
pub fn norm(a: &Vector3<f64>) -> f64 {
    dot(a, a).sqrt()
}

/// Scale a vector to unit length.
///
/// Arguments
/// ---------
/// * `a`: any non-zero vector
///
/// Return
/// ------
/// * `a / |a|`, or [`HeliostatError::DegenerateVector`] if `|a| == 0`
pub fn normalize(a: &Vector3<f64>) -> Result<Vector3<f64>, HeliostatError> {
    let length = norm(a);
    if length == 0.0 {
        return Err(HeliostatError::DegenerateVector("normalize"));
    }
    Ok(a / length)
}

/// Euclidean distance between two points.
pub fn euclidean_distance(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    norm(&(a - b))
}

/// Distance between the directions of two vectors, independent of their magnitude.
///
/// Both vectors are normalized first, so the result lies in `[0, 2]`: `0` for parallel vectors,
/// `√2` for orthogonal ones and `2` for opposite ones.
pub fn normalized_distance(a: &Vector3<f64>, b: &Vector3<f64>) -> Result<f64, HeliostatError> {
    Ok(euclidean_distance(&normalize(a)?, &normalize(b)?))
}

/// Perpendicular distance from a point to an infinite line.
///
/// The point is projected on the line with the parameter
/// `t = (point - line_point)·direction / direction·direction`; the distance to the projected point
/// `line_point + t·direction` is returned.
///
/// Arguments
/// ---------
/// * `point`: the point to measure from
/// * `line_point`: any point of the line
/// * `direction`: direction of the line, need not be unit length
///
/// Return
/// ------
/// * The distance, or [`HeliostatError::DegenerateVector`] if `direction` is the zero vector
pub fn closest_point_distance(
    point: &Vector3<f64>,
    line_point: &Vector3<f64>,
    direction: &Vector3<f64>,
) -> Result<f64, HeliostatError> {
    let dir_sq = dot(direction, direction);
    if dir_sq == 0.0 {
        return Err(HeliostatError::DegenerateVector("closest_point_distance"));
    }

    let t = dot(&(point - line_point), direction) / dir_sq;
    let closest = line_point + direction * t;
    Ok(euclidean_distance(point, &closest))
}
