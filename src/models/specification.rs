use crate::constants::SYMMETRY_TOLERANCE;
use crate::error::{AsvError, AsvResult};
use crate::physics::environment::Environment;
use nalgebra as na;

/// Principal hull dimensions in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub length: f64,
    pub breadth: f64,
    pub draft: f64,
}

/// Metacentric heights in meters. Negative values describe an initially
/// unstable hull and are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetacentricHeight {
    pub transverse: f64,
    pub longitudinal: f64,
}

/// Static physical description of one ASV hull.
///
/// Body frame: x forward, y to port, z up, origin at midship on the centerline
/// at the design waterline. Inertia and added mass are taken about the centre
/// of gravity.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleSpecification {
    pub mass: f64,                          // kg
    pub inertia: na::Matrix3<f64>,          // kg⋅m², about the COG
    pub added_mass: na::Vector6<f64>,       // diagonal, per DOF
    pub dimensions: Dimensions,
    pub cog: na::Vector3<f64>,              // COG offset from the reference origin
    pub linear_damping: na::Vector6<f64>,   // per DOF
    pub quadratic_damping: na::Vector6<f64>, // per DOF
    pub metacentric_height: MetacentricHeight,
    pub displacement: f64,                  // m³ at design draft
    pub waterplane_coefficient: f64,        // A_wp / (L⋅B)
}

impl VehicleSpecification {
    /// Checks the physical invariants and hands the specification back.
    pub fn validated(self) -> AsvResult<Self> {
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> AsvResult<()> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(AsvError::specification(format!(
                "mass must be positive, got {}",
                self.mass
            )));
        }

        let d = &self.dimensions;
        for (name, value) in [("length", d.length), ("breadth", d.breadth), ("draft", d.draft)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(AsvError::specification(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if !(self.displacement.is_finite() && self.displacement > 0.0) {
            return Err(AsvError::specification(format!(
                "displacement must be positive, got {}",
                self.displacement
            )));
        }

        if !(self.waterplane_coefficient > 0.0 && self.waterplane_coefficient <= 1.0) {
            return Err(AsvError::specification(format!(
                "waterplane coefficient must lie in (0, 1], got {}",
                self.waterplane_coefficient
            )));
        }

        if self.inertia.iter().any(|v| !v.is_finite()) {
            return Err(AsvError::specification("inertia tensor has non-finite entries"));
        }
        if (self.inertia - self.inertia.transpose()).amax() > SYMMETRY_TOLERANCE {
            return Err(AsvError::specification("inertia tensor is not symmetric"));
        }
        if self.inertia.cholesky().is_none() {
            return Err(AsvError::specification(
                "inertia tensor is not positive definite",
            ));
        }

        if self.added_mass.iter().any(|v| !v.is_finite())
            || self.cog.iter().any(|v| !v.is_finite())
        {
            return Err(AsvError::specification(
                "added mass and centre of gravity must be finite",
            ));
        }

        for (name, coefficients) in [
            ("linear damping", &self.linear_damping),
            ("quadratic damping", &self.quadratic_damping),
        ] {
            if coefficients.iter().any(|c| !(c.is_finite() && *c >= 0.0)) {
                return Err(AsvError::specification(format!(
                    "{} coefficients must be finite and non-negative",
                    name
                )));
            }
        }

        let gm = &self.metacentric_height;
        if !(gm.transverse.is_finite() && gm.longitudinal.is_finite()) {
            return Err(AsvError::specification("metacentric heights must be finite"));
        }

        Ok(())
    }

    pub fn waterplane_area(&self) -> f64 {
        self.waterplane_coefficient * self.dimensions.length * self.dimensions.breadth
    }

    /// Small-angle hydrostatic stiffness per DOF: heave from the waterplane
    /// area, roll and pitch from the metacentric heights.
    pub fn restoring_stiffness(&self, env: &Environment) -> na::Vector6<f64> {
        let rho_g = env.specific_weight();
        let righting = rho_g * self.displacement;
        na::Vector6::new(
            0.0,
            0.0,
            rho_g * self.waterplane_area(),
            righting * self.metacentric_height.transverse,
            righting * self.metacentric_height.longitudinal,
            0.0,
        )
    }

    /// Net vertical force at design draft: buoyancy minus weight (N, + up).
    pub fn net_buoyancy(&self, env: &Environment) -> f64 {
        (env.water_density * self.displacement - self.mass) * env.gravity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use approx::assert_abs_diff_eq;

    fn box_hull() -> VehicleSpecification {
        VehicleSpecification {
            mass: 1000.0,
            inertia: na::Matrix3::from_diagonal(&na::Vector3::new(500.0, 2000.0, 2200.0)),
            added_mass: na::Vector6::zeros(),
            dimensions: Dimensions {
                length: 4.0,
                breadth: 2.0,
                draft: 0.5,
            },
            cog: na::Vector3::zeros(),
            linear_damping: na::Vector6::repeat(50.0),
            quadratic_damping: na::Vector6::zeros(),
            metacentric_height: MetacentricHeight {
                transverse: 0.5,
                longitudinal: 3.0,
            },
            displacement: 1.0,
            waterplane_coefficient: 0.8,
        }
    }

    #[test]
    fn valid_hull_passes() {
        assert!(box_hull().validated().is_ok());
    }

    #[test]
    fn zero_mass_is_rejected() {
        let spec = VehicleSpecification {
            mass: 0.0,
            ..box_hull()
        };
        assert_eq!(
            spec.validate().unwrap_err().kind(),
            ErrorKind::InvalidSpecification
        );
    }

    #[test]
    fn indefinite_inertia_is_rejected() {
        let spec = VehicleSpecification {
            inertia: na::Matrix3::from_diagonal(&na::Vector3::new(500.0, -1.0, 2200.0)),
            ..box_hull()
        };
        let err = spec.validate().unwrap_err();
        assert!(err.to_string().contains("positive definite"));
    }

    #[test]
    fn asymmetric_inertia_is_rejected() {
        let mut inertia = na::Matrix3::from_diagonal(&na::Vector3::new(500.0, 2000.0, 2200.0));
        inertia[(0, 1)] = 10.0;
        let spec = VehicleSpecification {
            inertia,
            ..box_hull()
        };
        assert!(spec.validate().is_err());
    }

    #[test]
    fn negative_damping_is_rejected() {
        let mut spec = box_hull();
        spec.quadratic_damping[2] = -1.0;
        assert!(spec.validate().is_err());
    }

    #[test]
    fn restoring_stiffness_from_hydrostatics() {
        let env = Environment::new(1000.0, 10.0, None).unwrap();
        let k = box_hull().restoring_stiffness(&env);
        assert_abs_diff_eq!(k[2], 1000.0 * 10.0 * 0.8 * 8.0, epsilon = 1e-9);
        assert_abs_diff_eq!(k[3], 1000.0 * 10.0 * 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(k[4], 1000.0 * 10.0 * 3.0, epsilon = 1e-9);
        assert_eq!(k[0], 0.0);
        assert_eq!(k[5], 0.0);
    }

    #[test]
    fn neutral_buoyancy_at_design_draft() {
        let env = Environment::new(1000.0, 9.81, None).unwrap();
        assert_eq!(box_hull().net_buoyancy(&env), 0.0);
    }
}
