use crate::error::{AsvError, AsvResult};
use crate::models::actuator::Actuator;
use crate::numerics::euler::wrap_to_pi;
use nalgebra as na;

/// PD heading autopilot producing a yaw moment demand.
pub struct HeadingController {
    kp: f64,
    kd: f64,
    max_moment: f64, // N⋅m
}

impl HeadingController {
    pub fn new(kp: f64, kd: f64, max_moment: f64) -> Self {
        Self { kp, kd, max_moment }
    }

    pub fn compute_yaw_moment(&self, target_heading: f64, heading: f64, yaw_rate: f64) -> f64 {
        let error = wrap_to_pi(target_heading - heading);
        let moment = self.kp * error - self.kd * yaw_rate;

        // Smooth saturation function
        let magnitude = moment.abs();
        if magnitude > self.max_moment && magnitude > 0.0 {
            let scale =
                self.max_moment * (1.0 - (-magnitude / self.max_moment).exp()) / magnitude;
            moment * scale
        } else {
            moment
        }
    }
}

/// Splits a total surge thrust and a yaw moment demand between two actuators.
///
/// Solves T₁ + T₂ = surge_thrust and m₁T₁ + m₂T₂ = yaw_moment, where mᵢ is the
/// yaw arm of each actuator about `reference`. Commands are saturated to each
/// actuator's thrust policy.
pub fn allocate_differential(
    surge_thrust: f64,
    yaw_moment: f64,
    first: &Actuator,
    second: &Actuator,
    reference: &na::Vector3<f64>,
) -> AsvResult<(f64, f64)> {
    let m1 = first.yaw_arm(reference);
    let m2 = second.yaw_arm(reference);
    let det = m2 - m1;
    if det.abs() < 1e-9 {
        return Err(AsvError::geometry(format!(
            "actuators '{}' and '{}' have the same yaw arm; differential allocation impossible",
            first.name(),
            second.name()
        )));
    }

    let t1 = (m2 * surge_thrust - yaw_moment) / det;
    let t2 = surge_thrust - t1;
    Ok((first.policy().saturate(t1), second.policy().saturate(t2)))
}
