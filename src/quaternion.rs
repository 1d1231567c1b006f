// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Provides a Quaternion type for representing 3D rotations.

use serde::{Deserialize, Serialize};

use super::{Mat4, Vec3, Vec4};
use std::ops::{Add, Mul, MulAssign, Neg, Sub};

/// Represents a quaternion for efficient 3D rotations.
///
/// A quaternion is stored as `(x, y, z, w)`, where `[x, y, z]` is the "vector"
/// part and `w` is the "scalar" part. For representing rotations, it should be
/// a "unit quaternion" where `x² + y² + z² + w² = 1`; no operation enforces
/// this, and the ones that expect it say so.
///
/// Storage-wise a quaternion is just a [`Vec4`], and every component-wise
/// operation (addition, scaling, dot product, normalization, ...) forwards to
/// it. The wrapper exists so a rotation cannot be handed to code expecting a
/// plain 4-vector by accident; cross the boundary explicitly with
/// [`Quaternion::to_vec4`] and [`Quaternion::from_vec4`].
///
/// Values are immutable: the `with_*` setters and all arithmetic return new
/// quaternions and leave their inputs untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Quaternion(Vec4);

impl Quaternion {
    /// The identity quaternion, representing no rotation.
    pub const IDENTITY: Quaternion = Quaternion(Vec4::new(0.0, 0.0, 0.0, 1.0));

    /// Creates a new quaternion from its raw components.
    ///
    /// Note: This does not guarantee a unit quaternion. For creating rotations,
    /// prefer using `from_axis_angle`.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self(Vec4::new(x, y, z, w))
    }

    /// Creates a quaternion representing a rotation around a given axis by a given angle.
    ///
    /// The axis need not be pre-normalized; it is normalized here, and the
    /// result is a unit quaternion for any nonzero axis. A zero axis inherits
    /// the [`Vec3::normalize`] zero contract and degenerates to
    /// `(0, 0, 0, cos(angle/2))` instead of becoming an error.
    ///
    /// # Arguments
    ///
    /// * `axis`: The axis of rotation (right-handed).
    /// * `angle_radians`: The angle of rotation in radians.
    #[inline]
    pub fn from_axis_angle(axis: Vec3, angle_radians: f32) -> Self {
        let unit_axis = axis.normalize();
        let half_angle = angle_radians * 0.5;
        let s = half_angle.sin();
        let c = half_angle.cos();
        Self::new(unit_axis.x * s, unit_axis.y * s, unit_axis.z * s, c)
    }

    // --- Component access ---

    /// The x component of the vector part.
    #[inline]
    pub fn x(&self) -> f32 {
        self.0.x
    }

    /// The y component of the vector part.
    #[inline]
    pub fn y(&self) -> f32 {
        self.0.y
    }

    /// The z component of the vector part.
    #[inline]
    pub fn z(&self) -> f32 {
        self.0.z
    }

    /// The scalar (real) part.
    #[inline]
    pub fn w(&self) -> f32 {
        self.0.w
    }

    /// Returns a copy of this quaternion with the x component replaced.
    #[inline]
    pub fn with_x(self, x: f32) -> Self {
        Self(Vec4 { x, ..self.0 })
    }

    /// Returns a copy of this quaternion with the y component replaced.
    #[inline]
    pub fn with_y(self, y: f32) -> Self {
        Self(Vec4 { y, ..self.0 })
    }

    /// Returns a copy of this quaternion with the z component replaced.
    #[inline]
    pub fn with_z(self, z: f32) -> Self {
        Self(Vec4 { z, ..self.0 })
    }

    /// Returns a copy of this quaternion with the scalar component replaced.
    #[inline]
    pub fn with_w(self, w: f32) -> Self {
        Self(Vec4 { w, ..self.0 })
    }

    // --- Conversions ---

    /// Unpacks the quaternion into an ordered `(x, y, z, w)` tuple.
    #[inline]
    pub fn to_tuple(self) -> (f32, f32, f32, f32) {
        self.0.into()
    }

    /// Builds a quaternion from an ordered `(x, y, z, w)` tuple.
    ///
    /// Round-trips exactly with [`Quaternion::to_tuple`].
    #[inline]
    pub fn from_tuple(t: (f32, f32, f32, f32)) -> Self {
        Self(t.into())
    }

    /// Returns the components as a labeled `{x, y, z, w}` [`Vec4`].
    ///
    /// This is the self-documenting alternative to the positional tuple form.
    #[inline]
    pub fn to_vec4(self) -> Vec4 {
        self.0
    }

    /// Reinterprets a labeled `{x, y, z, w}` [`Vec4`] as a quaternion.
    ///
    /// Round-trips exactly with [`Quaternion::to_vec4`].
    #[inline]
    pub fn from_vec4(v: Vec4) -> Self {
        Self(v)
    }

    // --- Algebra ---

    /// Computes the dot product of two quaternions.
    #[inline]
    pub fn dot(&self, other: Self) -> f32 {
        self.0.dot(other.0)
    }

    /// Calculates the squared length (magnitude) of the quaternion.
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.0.length_squared()
    }

    /// Calculates the length (magnitude) of the quaternion.
    #[inline]
    pub fn length(&self) -> f32 {
        self.0.length()
    }

    /// Returns a normalized version of the quaternion with a length of 1.
    ///
    /// Inherits the [`Vec4::normalize`] contract: a near-zero-length
    /// quaternion normalizes to the all-zero quaternion, never to NaN.
    #[inline]
    pub fn normalize(&self) -> Self {
        Self(self.0.normalize())
    }

    /// Computes the conjugate of the quaternion, which negates the vector part.
    ///
    /// For a unit quaternion the conjugate is its multiplicative inverse:
    /// `q * q.conjugate()` is the identity.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(-self.0.x, -self.0.y, -self.0.z, self.0.w)
    }

    /// Converts the quaternion into a rotation matrix.
    ///
    /// See [`Mat4::from_quat`] for the non-unit and zero-quaternion behavior.
    #[inline]
    pub fn to_mat4(self) -> Mat4 {
        Mat4::from_quat(self)
    }
}

// --- Operator Overloads ---

impl Default for Quaternion {
    /// Returns the identity quaternion, representing no rotation.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Quaternion> for Quaternion {
    type Output = Self;
    /// Combines two rotations using the Hamilton product: `a * b` represents
    /// applying the rotation of `b`, then the rotation of `a` (compose as
    /// `outer * inner`). Not commutative.
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        let a = self.0;
        let b = rhs.0;
        Self::new(
            a.w * b.x + a.x * b.w - a.y * b.z + a.z * b.y,
            a.w * b.y + a.x * b.z + a.y * b.w - a.z * b.x,
            a.w * b.z - a.x * b.y + a.y * b.x + a.z * b.w,
            a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        )
    }
}

impl MulAssign<Quaternion> for Quaternion {
    /// Combines this rotation with another.
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Add<Quaternion> for Quaternion {
    type Output = Self;
    /// Adds two quaternions component-wise.
    /// Note: This is not a rotation operation.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub<Quaternion> for Quaternion {
    type Output = Self;
    /// Subtracts two quaternions component-wise.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul<f32> for Quaternion {
    type Output = Self;
    /// Scales all components of the quaternion by a scalar.
    #[inline]
    fn mul(self, scalar: f32) -> Self::Output {
        Self(self.0 * scalar)
    }
}

impl Neg for Quaternion {
    type Output = Self;
    /// Negates all components of the quaternion.
    #[inline]
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

// --- Conversions ---

impl From<(f32, f32, f32, f32)> for Quaternion {
    #[inline]
    fn from(t: (f32, f32, f32, f32)) -> Self {
        Self::from_tuple(t)
    }
}

impl From<Quaternion> for (f32, f32, f32, f32) {
    #[inline]
    fn from(q: Quaternion) -> Self {
        q.to_tuple()
    }
}

impl From<Vec4> for Quaternion {
    #[inline]
    fn from(v: Vec4) -> Self {
        Self::from_vec4(v)
    }
}

impl From<Quaternion> for Vec4 {
    #[inline]
    fn from(q: Quaternion) -> Self {
        q.to_vec4()
    }
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{approx_eq, EPSILON, FRAC_PI_2};
    use approx::assert_relative_eq;

    fn quat_approx_eq(q1: Quaternion, q2: Quaternion) -> bool {
        approx_eq(q1.x(), q2.x())
            && approx_eq(q1.y(), q2.y())
            && approx_eq(q1.z(), q2.z())
            && approx_eq(q1.w(), q2.w())
    }

    #[test]
    fn test_identity_and_default() {
        let q_ident = Quaternion::IDENTITY;
        let q_def = Quaternion::default();
        assert_eq!(q_ident, q_def);
        assert_relative_eq!(q_ident.x(), 0.0);
        assert_relative_eq!(q_ident.y(), 0.0);
        assert_relative_eq!(q_ident.z(), 0.0);
        assert_relative_eq!(q_ident.w(), 1.0);
        assert_relative_eq!(q_ident.length(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_accessors() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q.x(), 1.0);
        assert_eq!(q.y(), 2.0);
        assert_eq!(q.z(), 3.0);
        assert_eq!(q.w(), 4.0);
    }

    #[test]
    fn test_setters_replace_only_named_component() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);

        let qx = q.with_x(9.0);
        assert_eq!(qx, Quaternion::new(9.0, 2.0, 3.0, 4.0));
        assert_eq!(q.with_y(9.0), Quaternion::new(1.0, 9.0, 3.0, 4.0));
        assert_eq!(q.with_z(9.0), Quaternion::new(1.0, 2.0, 9.0, 4.0));
        assert_eq!(q.with_w(9.0), Quaternion::new(1.0, 2.0, 3.0, 9.0));

        // The receiver is a value; the original is untouched.
        assert_eq!(q, Quaternion::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(qx.y(), q.y());
    }

    #[test]
    fn test_tuple_round_trip() {
        let q = Quaternion::new(0.1, -0.2, 0.3, -0.4);
        let t = q.to_tuple();
        assert_eq!(t, (0.1, -0.2, 0.3, -0.4));
        assert_eq!(Quaternion::from_tuple(t), q);

        let via_from: Quaternion = (0.1, -0.2, 0.3, -0.4).into();
        assert_eq!(via_from, q);
    }

    #[test]
    fn test_vec4_round_trip() {
        let q = Quaternion::new(0.5, 1.5, -2.5, 3.5);
        let v = q.to_vec4();
        assert_eq!(v, Vec4::new(0.5, 1.5, -2.5, 3.5));
        assert_eq!(Quaternion::from_vec4(v), q);

        let via_from: Quaternion = v.into();
        assert_eq!(via_from, q);
    }

    #[test]
    fn test_component_wise_arithmetic() {
        let a = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        let b = Quaternion::new(5.0, 6.0, 7.0, 8.0);

        assert_eq!(a + b, Quaternion::new(6.0, 8.0, 10.0, 12.0));
        assert_eq!(b - a, Quaternion::new(4.0, 4.0, 4.0, 4.0));
        assert_eq!(a * 2.0, Quaternion::new(2.0, 4.0, 6.0, 8.0));
        assert_eq!(-a, Quaternion::new(-1.0, -2.0, -3.0, -4.0));
        // 5 + 12 + 21 + 32 = 70
        assert_relative_eq!(a.dot(b), 70.0, epsilon = EPSILON);
        assert_relative_eq!(a.length_squared(), 30.0, epsilon = EPSILON);
        assert_relative_eq!(a.length(), 30.0_f32.sqrt(), epsilon = EPSILON);
    }

    #[test]
    fn test_from_axis_angle() {
        let axis = Vec3::Y;
        let angle = FRAC_PI_2; // 90 degrees
        let q = Quaternion::from_axis_angle(axis, angle);

        let half_angle = angle * 0.5;
        let expected_s = half_angle.sin();
        let expected_c = half_angle.cos();

        assert_relative_eq!(q.x(), 0.0, epsilon = EPSILON);
        assert_relative_eq!(q.y(), expected_s, epsilon = EPSILON);
        assert_relative_eq!(q.z(), 0.0, epsilon = EPSILON);
        assert_relative_eq!(q.w(), expected_c, epsilon = EPSILON);
        assert_relative_eq!(q.length(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_from_axis_angle_normalizes_axis() {
        let axis = Vec3::new(0.0, 5.0, 0.0); // Non-unit axis
        let q = Quaternion::from_axis_angle(axis, FRAC_PI_2);
        let q_unit = Quaternion::from_axis_angle(Vec3::Y, FRAC_PI_2);

        assert!(quat_approx_eq(q, q_unit));
        assert_relative_eq!(q.length(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_from_axis_angle_zero_axis_degenerates() {
        // Zero axis inherits the Vec3 zero-normalize contract: the vector
        // part vanishes and only cos(angle/2) survives. Not a unit result.
        let q = Quaternion::from_axis_angle(Vec3::ZERO, 1.0);
        assert_relative_eq!(q.x(), 0.0);
        assert_relative_eq!(q.y(), 0.0);
        assert_relative_eq!(q.z(), 0.0);
        assert_relative_eq!(q.w(), 0.5_f32.cos(), epsilon = EPSILON);
    }

    #[test]
    fn test_multiplication_identity() {
        let q = Quaternion::from_axis_angle(Vec3::new(1.0, -2.0, 0.5), 1.2);

        let res_qi = q * Quaternion::IDENTITY;
        let res_iq = Quaternion::IDENTITY * q;

        assert!(quat_approx_eq(res_qi, q));
        assert!(quat_approx_eq(res_iq, q));
    }

    #[test]
    fn test_multiplication_components() {
        // 90 degrees about Z composed with 90 degrees about X, checked
        // against the product formula expanded by hand.
        let s = FRAC_PI_2 * 0.5;
        let a = Quaternion::from_axis_angle(Vec3::Z, FRAC_PI_2);
        let b = Quaternion::from_axis_angle(Vec3::X, FRAC_PI_2);
        let ab = a * b;

        let (sin, cos) = (s.sin(), s.cos());
        assert_relative_eq!(ab.x(), cos * sin, epsilon = EPSILON);
        assert_relative_eq!(ab.y(), -sin * sin, epsilon = EPSILON);
        assert_relative_eq!(ab.z(), sin * cos, epsilon = EPSILON);
        assert_relative_eq!(ab.w(), cos * cos, epsilon = EPSILON);
    }

    #[test]
    fn test_multiplication_not_commutative() {
        let a = Quaternion::from_axis_angle(Vec3::Z, FRAC_PI_2);
        let b = Quaternion::from_axis_angle(Vec3::X, FRAC_PI_2);

        assert!(!quat_approx_eq(a * b, b * a));
    }

    #[test]
    fn test_multiplication_associative() {
        let a = Quaternion::from_axis_angle(Vec3::new(1.0, 0.0, 1.0), 0.4);
        let b = Quaternion::from_axis_angle(Vec3::new(0.0, 1.0, -1.0), 1.1);
        let c = Quaternion::from_axis_angle(Vec3::new(-2.0, 1.0, 0.5), 2.3);

        assert!(quat_approx_eq((a * b) * c, a * (b * c)));
    }

    #[test]
    fn test_mul_assign() {
        let a = Quaternion::from_axis_angle(Vec3::Y, 0.7);
        let b = Quaternion::from_axis_angle(Vec3::X, -0.3);
        let mut q = a;
        q *= b;
        assert!(quat_approx_eq(q, a * b));
    }

    #[test]
    fn test_conjugate() {
        let q = Quaternion::new(1.0, -2.0, 3.0, 4.0);
        let q_conj = q.conjugate();
        assert_eq!(q_conj, Quaternion::new(-1.0, 2.0, -3.0, 4.0));

        // Conjugating twice gives the original back.
        assert_eq!(q_conj.conjugate(), q);
    }

    #[test]
    fn test_conjugate_is_inverse_for_unit() {
        let axis = Vec3::new(1.0, 2.0, 3.0);
        let q = Quaternion::from_axis_angle(axis, 0.75);

        let forward = q * q.conjugate();
        let backward = q.conjugate() * q;

        assert!(quat_approx_eq(forward, Quaternion::IDENTITY));
        assert!(quat_approx_eq(backward, Quaternion::IDENTITY));
    }

    #[test]
    fn test_normalization() {
        let q_non_unit = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        let q_norm = q_non_unit.normalize();
        assert_relative_eq!(q_norm.length(), 1.0, epsilon = EPSILON);

        // The original keeps its length; normalize is not in-place.
        assert_relative_eq!(q_non_unit.length(), 30.0_f32.sqrt(), epsilon = EPSILON);
    }

    #[test]
    fn test_normalize_zero_is_zero() {
        // Inherited Vec4 contract: the zero quaternion normalizes to itself.
        let q_zero = Quaternion::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(q_zero.normalize(), q_zero);
    }

    #[test]
    fn test_to_mat4_identity() {
        // The identity quaternion has unit length, so the conversion is exact.
        assert_eq!(Quaternion::IDENTITY.to_mat4(), Mat4::IDENTITY);
    }

    #[test]
    fn test_to_mat4_rotates_x_to_y() {
        let q = Quaternion::from_axis_angle(Vec3::Z, FRAC_PI_2);
        let m = q.to_mat4();

        let rotated = m * Vec4::X;
        assert_relative_eq!(rotated.x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(rotated.y, 1.0, epsilon = EPSILON);
        assert_relative_eq!(rotated.z, 0.0, epsilon = EPSILON);
        assert_relative_eq!(rotated.w, 0.0, epsilon = EPSILON);
    }
}
