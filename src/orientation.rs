//! # Surface orientation model
//!
//! Maps between the orientation of a flat surface, given as two angles, and its 3D unit normal.
//!
//! ## Conventions
//!
//! * `theta` is the rotation about the vertical (z) axis, in degrees from north.
//! * `phi` is the rotation about the first (x) axis, the elevation of the surface in degrees.
//! * A surface with `theta = phi = 0` has the normal `(0, -1, 0)`.
//!
//! The combined rotation is `R = R_phi · R_theta`: the surface is first turned about the vertical
//! axis, then tilted.
//!
//! ## See also
//! * [`rotation_matrix`] – the combined rotation
//! * [`normal_from_orientation`] / [`orientation_from_normal`] – the two directions of the mapping
//! * [`crate::heliostat`] – uses the mapping to aim a mirror

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::{
    constants::{Degree, Radian},
    heliostat_errors::HeliostatError,
    vector_math::{dot, fold_to_180, normalize, to_degrees, to_radians},
};

/// Normal of a surface facing north with no elevation.
const REFERENCE_NORMAL: Vector3<f64> = Vector3::new(0.0, -1.0, 0.0);

/// Reference direction of a sun ray before rotation.
const REFERENCE_RAY: Vector3<f64> = Vector3::new(0.0, 1.0, 0.0);

/// Orientation angles of a flat surface, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    /// Rotation about the vertical axis, degrees from north
    pub theta: Degree,
    /// Tilt about the first axis, degrees of elevation
    pub phi: Degree,
}

impl Orientation {
    pub fn new(theta: Degree, phi: Degree) -> Self {
        Orientation { theta, phi }
    }

    /// Unit normal of a surface with this orientation, see [`normal_from_orientation`].
    pub fn normal(&self) -> Vector3<f64> {
        normal_from_orientation(self.theta, self.phi)
    }
}

/// Construct a right-handed 3×3 rotation matrix around one of the principal axes (X, Y, or Z).
///
/// # Arguments
///
/// * `alpha` - Rotation angle in **radians** (positive = direct/trigonometric sense).
/// * `k` - Index of the axis of rotation: `0` → X, `1` → Y, `2` → Z.
///
/// # Panics
///
/// Panics if `k > 2`, as only axes 0–2 are valid.
fn rotmt(alpha: Radian, k: usize) -> Matrix3<f64> {
    let axis = match k {
        0 => Vector3::x_axis(),
        1 => Vector3::y_axis(),
        2 => Vector3::z_axis(),
        _ => panic!("**** ROTMT: invalid axis index {k} (must be 0,1,2) ****"),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Build the combined rotation `R_phi · R_theta`.
///
/// Arguments
/// ---------
/// * `theta`: rotation about the vertical (z) axis, in radians
/// * `phi`: rotation about the first (x) axis, in radians
///
/// Return
/// ------
/// * The orthonormal matrix
///
/// ```text
/// R_theta = | cosθ -sinθ 0 |     R_phi = | 1   0     0   |
///           | sinθ  cosθ 0 |             | 0  cosφ -sinφ |
///           |  0     0   1 |             | 0  sinφ  cosφ |
/// ```
///
/// multiplied as `R_phi · R_theta`, i.e. `theta` is applied to a vector first.
/// The product does not commute.
pub fn rotation_matrix(theta: Radian, phi: Radian) -> Matrix3<f64> {
    let r_theta = rotmt(theta, 2);
    let r_phi = rotmt(phi, 0);
    r_phi * r_theta
}

/// Unit normal of a surface given its orientation angles.
///
/// Both angles are negated, converted to radians and used to rotate the reference normal
/// `(0, -1, 0)`. The reference normal is unit length and the rotation is orthonormal, so the
/// result is unit length.
///
/// Arguments
/// ---------
/// * `degrees_from_north`: azimuth of the surface
/// * `degrees_elevation`: elevation of the surface
pub fn normal_from_orientation(
    degrees_from_north: Degree,
    degrees_elevation: Degree,
) -> Vector3<f64> {
    let theta = to_radians(-degrees_from_north);
    let phi = to_radians(-degrees_elevation);

    rotation_matrix(theta, phi) * REFERENCE_NORMAL
}

/// Orientation angles of a surface given its normal.
///
/// The normal is normalized, then
///
/// ```text
/// theta = -asin(n.x)
/// phi   = -atan2(n.z, n.y) - π
/// ```
///
/// and both angles are converted to degrees and folded with [`fold_to_180`].
///
/// Remarks
/// -------
/// * This is the inverse of [`normal_from_orientation`] up to a multiple of 360° on `phi`:
///   [`fold_to_180`] leaves values in `(-360, -180]` untouched, so an elevation of `30°`
///   comes back as `-330°`.
/// * `theta` is limited to `[-90, 90]` by the range of `asin`. Orientations outside that range map
///   to an equivalent normal but do not round-trip.
///
/// Return
/// ------
/// * The [`Orientation`], or [`HeliostatError::DegenerateVector`] for a zero normal
pub fn orientation_from_normal(normal: &Vector3<f64>) -> Result<Orientation, HeliostatError> {
    let n = normalize(normal)?;

    let theta = -n.x.clamp(-1.0, 1.0).asin();
    let phi = -n.z.atan2(n.y) - std::f64::consts::PI;

    Ok(Orientation {
        theta: fold_to_180(to_degrees(theta)),
        phi: fold_to_180(to_degrees(phi)),
    })
}

/// Unit direction of the light travelling from the sun, for a sun at the given position.
///
/// Arguments
/// ---------
/// * `azimuth`: solar azimuth in degrees
/// * `elevation`: solar elevation in degrees
pub fn sun_ray(azimuth: Degree, elevation: Degree) -> Result<Vector3<f64>, HeliostatError> {
    let theta = to_radians(-azimuth);
    let phi = to_radians(-elevation);

    normalize(&(rotation_matrix(theta, phi) * REFERENCE_RAY))
}

/// Direction of a ray after a specular reflection on a surface.
///
/// Both inputs are normalized, then `r' = r - 2 (r·n) n`.
pub fn reflect_ray(
    ray: &Vector3<f64>,
    normal: &Vector3<f64>,
) -> Result<Vector3<f64>, HeliostatError> {
    let r = normalize(ray)?;
    let n = normalize(normal)?;
    Ok(r - n * (2.0 * dot(&r, &n)))
}
