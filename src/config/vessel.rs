use crate::error::AsvResult;
use crate::models::actuator::{Actuator, ThrustPolicy};
use crate::models::specification::{Dimensions, MetacentricHeight, VehicleSpecification};
use nalgebra as na;

/// A small twin-hull survey catamaran with two stern thrusters.
pub struct SurveyCatamaran;

impl SurveyCatamaran {
    pub const MASS: f64 = 410.0; // kg
    pub const DISPLACEMENT: f64 = 0.4; // m³
    pub const LENGTH: f64 = 4.9; // meters
    pub const BREADTH: f64 = 2.4; // meters
    pub const DRAFT: f64 = 0.3; // meters
    pub const MAX_THRUST: f64 = 250.0; // N per thruster

    pub fn inertia_tensor() -> na::Matrix3<f64> {
        na::Matrix3::new(250.0, 0.0, 0.0, 0.0, 800.0, 0.0, 0.0, 0.0, 900.0)
    }

    pub fn specification() -> VehicleSpecification {
        VehicleSpecification {
            mass: Self::MASS,
            inertia: Self::inertia_tensor(),
            added_mass: na::Vector6::new(20.0, 120.0, 200.0, 15.0, 150.0, 120.0),
            dimensions: Dimensions {
                length: Self::LENGTH,
                breadth: Self::BREADTH,
                draft: Self::DRAFT,
            },
            cog: na::Vector3::new(-0.2, 0.0, 0.0),
            linear_damping: na::Vector6::new(60.0, 300.0, 800.0, 250.0, 900.0, 400.0),
            quadratic_damping: na::Vector6::new(30.0, 200.0, 0.0, 0.0, 0.0, 150.0),
            metacentric_height: MetacentricHeight {
                transverse: 1.8,
                longitudinal: 6.0,
            },
            displacement: Self::DISPLACEMENT,
            waterplane_coefficient: 0.35,
        }
    }

    pub fn thrust_policy() -> ThrustPolicy {
        ThrustPolicy {
            allow_reverse: true,
            max_thrust: Some(Self::MAX_THRUST),
        }
    }

    /// Port and starboard stern thrusters, both pointing forward.
    pub fn twin_thrusters() -> AsvResult<Vec<Actuator>> {
        Ok(vec![
            Actuator::new(
                "port",
                na::Vector3::new(-2.2, 0.9, -0.25),
                na::Vector3::x(),
                Self::thrust_policy(),
            )?,
            Actuator::new(
                "starboard",
                na::Vector3::new(-2.2, -0.9, -0.25),
                na::Vector3::x(),
                Self::thrust_policy(),
            )?,
        ])
    }
}
