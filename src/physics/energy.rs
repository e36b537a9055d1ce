use super::environment::Environment;
use super::mass::MassMatrix;
use crate::models::specification::VehicleSpecification;
use crate::models::State;

/// ½·vᵀ·A·v, including the added-mass contribution.
pub fn kinetic_energy(mass: &MassMatrix, state: &State) -> f64 {
    0.5 * state.velocity.dot(&(mass.matrix() * state.velocity))
}

/// Hydrostatic potential consistent with the linear restoring model, zero at
/// the design floating position.
pub fn potential_energy(spec: &VehicleSpecification, env: &Environment, state: &State) -> f64 {
    let k = spec.restoring_stiffness(env);
    let heave = state.origin_position(&spec.cog).z;

    0.5 * k[2] * heave * heave - spec.net_buoyancy(env) * heave
        + 0.5 * k[3] * state.heel() * state.heel()
        + 0.5 * k[4] * state.trim() * state.trim()
}

pub fn mechanical_energy(
    spec: &VehicleSpecification,
    mass: &MassMatrix,
    env: &Environment,
    state: &State,
) -> f64 {
    kinetic_energy(mass, state) + potential_energy(spec, env, state)
}
