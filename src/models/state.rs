use crate::numerics::euler::rotation_matrix;
use nalgebra as na;

/// Integrable rigid-body state. Doubles as its own time derivative so the
/// integrators can combine states with `+` and `* dt`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    // Pose
    pub position: na::Vector3<f64>, // COG, world frame
    pub attitude: na::Vector3<f64>, // [heel, trim, heading]

    // Body-frame velocity at the COG: [u, v, w, p, q, r]
    pub velocity: na::Vector6<f64>,

    // Time properties
    pub time: f64,
}

impl State {
    /// A vehicle at rest at time zero.
    pub fn new(position: na::Vector3<f64>, attitude: na::Vector3<f64>) -> Self {
        State {
            position,
            attitude,
            velocity: na::Vector6::zeros(),
            time: 0.0,
        }
    }

    pub fn zero() -> Self {
        State {
            position: na::Vector3::zeros(),
            attitude: na::Vector3::zeros(),
            velocity: na::Vector6::zeros(),
            time: 0.0,
        }
    }

    pub fn heel(&self) -> f64 {
        self.attitude[0]
    }

    pub fn trim(&self) -> f64 {
        self.attitude[1]
    }

    pub fn heading(&self) -> f64 {
        self.attitude[2]
    }

    pub fn linear_velocity(&self) -> na::Vector3<f64> {
        self.velocity.fixed_rows::<3>(0).into()
    }

    pub fn angular_velocity(&self) -> na::Vector3<f64> {
        self.velocity.fixed_rows::<3>(3).into()
    }

    /// World position of the reference origin given the COG offset.
    pub fn origin_position(&self, cog: &na::Vector3<f64>) -> na::Vector3<f64> {
        self.position - rotation_matrix(&self.attitude) * cog
    }

    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|v| v.is_finite())
            && self.attitude.iter().all(|v| v.is_finite())
            && self.velocity.iter().all(|v| v.is_finite())
            && self.time.is_finite()
    }
}

impl std::ops::Add for State {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        State {
            position: self.position + other.position,
            attitude: self.attitude + other.attitude,
            velocity: self.velocity + other.velocity,
            time: self.time + other.time,
        }
    }
}

impl std::ops::Mul<f64> for State {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        State {
            position: self.position * scalar,
            attitude: self.attitude * scalar,
            velocity: self.velocity * scalar,
            time: self.time * scalar,
        }
    }
}

/// Read-only snapshot of a vehicle's dynamics after a step.
///
/// `acceleration` and `force` are the values that drove the most recent
/// step (evaluated at its start); both are zero before the first step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicsState {
    pub cog_position: na::Vector3<f64>,
    pub origin_position: na::Vector3<f64>,
    pub attitude: na::Vector3<f64>,
    pub velocity: na::Vector6<f64>,
    pub acceleration: na::Vector6<f64>,
    pub force: na::Vector6<f64>,
    pub time: f64,
}
