use crate::constants::MASS_MATRIX_CONDITION_LIMIT;
use crate::error::{AsvError, AsvResult};
use crate::models::specification::VehicleSpecification;
use nalgebra as na;

/// Constant 6×6 generalised mass matrix A = M_rb + M_a about the COG,
/// assembled and factorised once per vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct MassMatrix {
    matrix: na::Matrix6<f64>,
    inverse: na::Matrix6<f64>,
}

impl MassMatrix {
    pub fn assemble(spec: &VehicleSpecification) -> AsvResult<Self> {
        let mut matrix = na::Matrix6::zeros();
        matrix
            .fixed_view_mut::<3, 3>(0, 0)
            .copy_from(&(na::Matrix3::identity() * spec.mass));
        matrix.fixed_view_mut::<3, 3>(3, 3).copy_from(&spec.inertia);
        matrix += na::Matrix6::from_diagonal(&spec.added_mass);

        if matrix.iter().any(|v| !v.is_finite()) {
            return Err(AsvError::fatal("mass matrix has non-finite entries"));
        }

        let eigenvalues = matrix.symmetric_eigenvalues();
        let lambda_min = eigenvalues.iter().cloned().fold(f64::INFINITY, f64::min);
        let lambda_max = eigenvalues.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        if lambda_min <= MASS_MATRIX_CONDITION_LIMIT * lambda_max {
            return Err(AsvError::fatal(format!(
                "mass matrix is singular or indefinite (eigenvalues in [{:e}, {:e}])",
                lambda_min, lambda_max
            )));
        }

        let inverse = matrix
            .cholesky()
            .map(|c| c.inverse())
            .ok_or_else(|| AsvError::fatal("mass matrix Cholesky factorisation failed"))?;

        Ok(MassMatrix { matrix, inverse })
    }

    pub fn matrix(&self) -> na::Matrix6<f64> {
        self.matrix
    }

    /// Solves A·a = F for the acceleration a.
    pub fn solve(&self, force: &na::Vector6<f64>) -> na::Vector6<f64> {
        self.inverse * force
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::vessel::SurveyCatamaran;
    use crate::error::ErrorKind;
    use approx::assert_abs_diff_eq;

    #[test]
    fn rigid_body_plus_added_mass() {
        let spec = SurveyCatamaran::specification();
        let a = MassMatrix::assemble(&spec).unwrap().matrix();
        assert_abs_diff_eq!(a[(0, 0)], spec.mass + spec.added_mass[0]);
        assert_abs_diff_eq!(a[(5, 5)], spec.inertia[(2, 2)] + spec.added_mass[5]);
        assert_eq!(a[(0, 3)], 0.0);
    }

    #[test]
    fn solve_inverts_matrix() {
        let spec = SurveyCatamaran::specification();
        let mass = MassMatrix::assemble(&spec).unwrap();
        let force = na::Vector6::new(120.0, -30.0, 5.0, 2.0, -8.0, 40.0);
        let a = mass.solve(&force);
        assert_abs_diff_eq!(mass.matrix() * a, force, epsilon = 1e-9);
    }

    #[test]
    fn negative_added_mass_cancelling_mass_is_fatal() {
        let mut spec = SurveyCatamaran::specification();
        spec.added_mass[0] = -spec.mass;
        let err = MassMatrix::assemble(&spec).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FatalConfiguration);
    }
}
