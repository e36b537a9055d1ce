use crate::constants::{PI, TWO_PI};
use nalgebra as na;

/// Euler-angle utilities for surface vehicle attitude.
/// Attitude vector is [heel φ; trim θ; heading ψ], ZYX convention:
/// R = Rz(ψ) · Ry(θ) · Rx(φ) maps body vectors into the world frame.
///
/// The rate transform is singular at θ = ±π/2. Surface vessels never get
/// there in practice, so no gimbal-lock handling is attempted.
pub fn rotation_matrix(attitude: &na::Vector3<f64>) -> na::Matrix3<f64> {
    na::Rotation3::from_euler_angles(attitude[0], attitude[1], attitude[2]).into_inner()
}

/// Maps body angular velocity [p; q; r] to Euler angle rates [φ̇; θ̇; ψ̇].
pub fn euler_rate_matrix(attitude: &na::Vector3<f64>) -> na::Matrix3<f64> {
    let (sphi, cphi) = attitude[0].sin_cos();
    let (stheta, ctheta) = attitude[1].sin_cos();
    let ttheta = stheta / ctheta;

    na::Matrix3::new(
        1.0, sphi * ttheta,  cphi * ttheta,
        0.0, cphi,          -sphi,
        0.0, sphi / ctheta,  cphi / ctheta,
    )
}

/// Wraps a heading into [0, 2π).
pub fn wrap_heading(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TWO_PI);
    // rem_euclid rounds tiny negative inputs up to exactly 2π
    if wrapped >= TWO_PI {
        0.0
    } else {
        wrapped
    }
}

/// Wraps an angle difference into (-π, π].
pub fn wrap_to_pi(angle: f64) -> f64 {
    let wrapped = wrap_heading(angle + PI) - PI;
    if wrapped <= -PI {
        wrapped + TWO_PI
    } else {
        wrapped
    }
}
