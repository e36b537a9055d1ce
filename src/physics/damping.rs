use crate::models::specification::VehicleSpecification;
use crate::numerics::euler::rotation_matrix;
use nalgebra as na;

/// Body velocity relative to the water, given a world-frame `current`.
/// Angular rates are unaffected.
pub fn relative_velocity(
    velocity: &na::Vector6<f64>,
    attitude: &na::Vector3<f64>,
    current: &na::Vector3<f64>,
) -> na::Vector6<f64> {
    let current_body = rotation_matrix(attitude).transpose() * current;
    let mut relative = *velocity;
    relative
        .fixed_rows_mut::<3>(0)
        .copy_from(&(velocity.fixed_rows::<3>(0) - current_body));
    relative
}

/// Per-DOF hydrodynamic damping, -c₁·v - c₂·v·|v|, body frame.
pub fn damping_force(spec: &VehicleSpecification, velocity: &na::Vector6<f64>) -> na::Vector6<f64> {
    let linear = spec.linear_damping.component_mul(velocity);
    let quadratic = spec
        .quadratic_damping
        .component_mul(&velocity.component_mul(&velocity.abs()));
    -(linear + quadratic)
}
