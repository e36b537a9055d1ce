use super::damping::{damping_force, relative_velocity};
use super::hydrostatics::restoring_force;
use super::mass::MassMatrix;
use super::sea_state::SeaState;
use crate::models::actuator::Actuator;
use crate::models::specification::VehicleSpecification;
use crate::models::State;
use crate::numerics::euler::{euler_rate_matrix, rotation_matrix};
use nalgebra as na;

pub trait EquationsOfMotion {
    type State;

    fn compute_derivative(&self, state: &Self::State) -> Self::State;
}

/// Equations of motion that can be evaluated in two halves, for integrators
/// that update velocity before pose.
pub trait SplitEquationsOfMotion: EquationsOfMotion {
    /// Derivative carrying only the acceleration.
    fn velocity_derivative(&self, state: &Self::State) -> Self::State;

    /// Derivative carrying only the kinematics (pose rates and time).
    fn pose_derivative(&self, state: &Self::State) -> Self::State;
}

/// Breakdown of the body-frame load on the vehicle, about the COG.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Loads {
    pub propulsion: na::Vector6<f64>,
    pub hydrostatic: na::Vector6<f64>,
    pub damping: na::Vector6<f64>,
    pub wave: na::Vector6<f64>,
    /// Rigid-body Coriolis/centripetal pseudo-force, -[m ω×v; ω×(Iω)].
    pub coriolis: na::Vector6<f64>,
}

impl Loads {
    pub fn zero() -> Self {
        Loads {
            propulsion: na::Vector6::zeros(),
            hydrostatic: na::Vector6::zeros(),
            damping: na::Vector6::zeros(),
            wave: na::Vector6::zeros(),
            coriolis: na::Vector6::zeros(),
        }
    }

    /// Net force/moment F in A·a = F.
    pub fn total(&self) -> na::Vector6<f64> {
        self.propulsion + self.hydrostatic + self.damping + self.wave + self.coriolis
    }
}

/// Sum of actuator forces and moments about `cog`, body frame.
pub fn propulsion_load<'b>(
    actuators: impl IntoIterator<Item = &'b Actuator>,
    cog: &na::Vector3<f64>,
) -> na::Vector6<f64> {
    actuators
        .into_iter()
        .fold(na::Vector6::zeros(), |load, actuator| {
            let (f, m) = actuator.force_and_moment(cog);
            load + na::Vector6::new(f.x, f.y, f.z, m.x, m.y, m.z)
        })
}

pub fn coriolis_force(spec: &VehicleSpecification, state: &State) -> na::Vector6<f64> {
    let v = state.linear_velocity();
    let w = state.angular_velocity();
    let linear = -spec.mass * w.cross(&v);
    let angular = -w.cross(&(spec.inertia * w));

    let mut force = na::Vector6::zeros();
    force.fixed_rows_mut::<3>(0).copy_from(&linear);
    force.fixed_rows_mut::<3>(3).copy_from(&angular);
    force
}

/// 6-DOF surface vehicle dynamics for one step. Actuator thrust is frozen
/// when the dynamics are built; everything else is re-evaluated per stage.
pub struct AsvDynamics<'a> {
    spec: &'a VehicleSpecification,
    sea_state: &'a SeaState,
    mass: &'a MassMatrix,
    propulsion: na::Vector6<f64>,
    current: na::Vector3<f64>, // world frame, m/s
}

impl<'a> AsvDynamics<'a> {
    pub fn new(
        spec: &'a VehicleSpecification,
        sea_state: &'a SeaState,
        mass: &'a MassMatrix,
        actuators: impl IntoIterator<Item = &'a Actuator>,
    ) -> Self {
        let propulsion = propulsion_load(actuators, &spec.cog);
        Self {
            spec,
            sea_state,
            mass,
            propulsion,
            current: na::Vector3::zeros(),
        }
    }

    /// Damping acts on the velocity relative to this world-frame current.
    pub fn with_current(mut self, current: na::Vector3<f64>) -> Self {
        self.current = current;
        self
    }

    pub fn loads(&self, state: &State) -> Loads {
        Loads {
            propulsion: self.propulsion,
            hydrostatic: restoring_force(self.spec, self.sea_state.environment(), state),
            damping: damping_force(
                self.spec,
                &relative_velocity(&state.velocity, &state.attitude, &self.current),
            ),
            wave: self.sea_state.excitation_at(
                state.time,
                &state.position,
                state.heading(),
                self.spec,
            ),
            coriolis: coriolis_force(self.spec, state),
        }
    }

    pub fn acceleration(&self, loads: &Loads) -> na::Vector6<f64> {
        self.mass.solve(&loads.total())
    }
}

impl EquationsOfMotion for AsvDynamics<'_> {
    type State = State;

    fn compute_derivative(&self, state: &State) -> State {
        self.velocity_derivative(state) + self.pose_derivative(state)
    }
}

impl SplitEquationsOfMotion for AsvDynamics<'_> {
    fn velocity_derivative(&self, state: &State) -> State {
        let mut derivative = State::zero();
        derivative.velocity = self.acceleration(&self.loads(state));
        derivative
    }

    fn pose_derivative(&self, state: &State) -> State {
        let mut derivative = State::zero();

        // Position derivative is the body velocity rotated into the world frame
        derivative.position = rotation_matrix(&state.attitude) * state.linear_velocity();

        // Euler angle rates from body angular velocity
        derivative.attitude = euler_rate_matrix(&state.attitude) * state.angular_velocity();

        derivative.time = 1.0;
        derivative
    }
}
