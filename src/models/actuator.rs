//! Fixed-mount thrusters and propellers.

use crate::constants::UNIT_VECTOR_TOLERANCE;
use crate::error::{AsvError, AsvResult};
use crate::models::specification::VehicleSpecification;
use nalgebra as na;

/// Which thrust commands an actuator accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrustPolicy {
    pub allow_reverse: bool,
    /// Largest accepted thrust magnitude (N). `None` is unbounded.
    pub max_thrust: Option<f64>,
}

impl ThrustPolicy {
    pub fn check(&self, thrust: f64) -> AsvResult<()> {
        if !thrust.is_finite() {
            return Err(AsvError::thrust(format!("thrust must be finite, got {}", thrust)));
        }
        if thrust < 0.0 && !self.allow_reverse {
            return Err(AsvError::thrust(format!(
                "reverse thrust {} N is disabled for this actuator",
                thrust
            )));
        }
        if let Some(max) = self.max_thrust {
            if thrust.abs() > max {
                return Err(AsvError::thrust(format!(
                    "|{}| N exceeds the {} N limit",
                    thrust, max
                )));
            }
        }
        Ok(())
    }

    /// Clamps a command into the accepted envelope.
    pub fn saturate(&self, thrust: f64) -> f64 {
        let lower = if self.allow_reverse { f64::NEG_INFINITY } else { 0.0 };
        let clamped = thrust.max(lower);
        match self.max_thrust {
            Some(max) => clamped.clamp(-max, max),
            None => clamped,
        }
    }
}

impl Default for ThrustPolicy {
    fn default() -> Self {
        ThrustPolicy {
            allow_reverse: true,
            max_thrust: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Actuator {
    name: String,
    position: na::Vector3<f64>,    // body frame, relative to the reference origin
    orientation: na::Vector3<f64>, // unit thrust direction, body frame
    thrust: f64,                   // N
    policy: ThrustPolicy,
}

impl Actuator {
    pub fn new(
        name: impl Into<String>,
        position: na::Vector3<f64>,
        orientation: na::Vector3<f64>,
        policy: ThrustPolicy,
    ) -> AsvResult<Self> {
        let name = name.into();
        if position.iter().any(|v| !v.is_finite()) {
            return Err(AsvError::geometry(format!(
                "actuator '{}' has a non-finite mount position",
                name
            )));
        }
        if orientation.iter().any(|v| !v.is_finite())
            || (orientation.norm() - 1.0).abs() > UNIT_VECTOR_TOLERANCE
        {
            return Err(AsvError::geometry(format!(
                "actuator '{}' orientation {:?} is not a unit vector",
                name,
                orientation.as_slice()
            )));
        }
        if let Some(max) = policy.max_thrust {
            if !(max.is_finite() && max >= 0.0) {
                return Err(AsvError::thrust(format!(
                    "actuator '{}' thrust limit must be non-negative, got {}",
                    name, max
                )));
            }
        }

        Ok(Actuator {
            name,
            position,
            orientation,
            thrust: 0.0,
            policy,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> na::Vector3<f64> {
        self.position
    }

    pub fn orientation(&self) -> na::Vector3<f64> {
        self.orientation
    }

    pub fn thrust(&self) -> f64 {
        self.thrust
    }

    pub fn policy(&self) -> ThrustPolicy {
        self.policy
    }

    pub fn set_thrust(&mut self, thrust: f64) -> AsvResult<()> {
        self.policy.check(thrust)?;
        self.thrust = thrust;
        Ok(())
    }

    /// Builder-style variant of [`Actuator::set_thrust`].
    pub fn with_thrust(mut self, thrust: f64) -> AsvResult<Self> {
        self.set_thrust(thrust)?;
        Ok(self)
    }

    /// Force and moment about `reference`, both in the body frame.
    pub fn force_and_moment(
        &self,
        reference: &na::Vector3<f64>,
    ) -> (na::Vector3<f64>, na::Vector3<f64>) {
        let force = self.orientation * self.thrust;
        let moment = (self.position - reference).cross(&force);
        (force, moment)
    }

    /// Yaw moment produced per newton of thrust about `reference`.
    pub fn yaw_arm(&self, reference: &na::Vector3<f64>) -> f64 {
        (self.position - reference).cross(&self.orientation).z
    }

    /// Mount lies inside the hull's bounding box: |x| ≤ L/2, |y| ≤ B/2, z ≥ -T.
    pub fn within_hull(&self, spec: &VehicleSpecification) -> bool {
        let d = &spec.dimensions;
        self.position.x.abs() <= 0.5 * d.length
            && self.position.y.abs() <= 0.5 * d.breadth
            && self.position.z >= -d.draft
    }
}
