use crate::models::specification::VehicleSpecification;
use crate::models::state::State;
use crate::numerics::euler::rotation_matrix;
use crate::physics::environment::Environment;
use nalgebra as na;

/// Hydrostatic restoring load in the body frame, about the COG.
///
/// Heave is measured at the reference origin against the calm-water plane
/// (origin on the design waterline ⇒ zero). The vertical force acts along
/// world z and is resolved into body axes; roll and pitch use the linear
/// metacentric righting moments.
pub fn restoring_force(
    spec: &VehicleSpecification,
    env: &Environment,
    state: &State,
) -> na::Vector6<f64> {
    let k = spec.restoring_stiffness(env);
    let heave = state.origin_position(&spec.cog).z;
    let vertical = spec.net_buoyancy(env) - k[2] * heave;

    let rotation = rotation_matrix(&state.attitude);
    let force = rotation.transpose() * na::Vector3::new(0.0, 0.0, vertical);

    na::Vector6::new(
        force.x,
        force.y,
        force.z,
        -k[3] * state.heel(),
        -k[4] * state.trim(),
        0.0,
    )
}
