use crate::constants::*;
use crate::error::{AsvError, AsvResult};

/// Physical properties of the water body the vehicle floats in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    pub water_density: f64, // kg/m³
    pub gravity: f64,       // m/s²
    /// Water depth in meters. `None` selects the deep-water approximation.
    pub depth: Option<f64>,
}

impl Environment {
    pub fn new(water_density: f64, gravity: f64, depth: Option<f64>) -> AsvResult<Self> {
        if !(water_density.is_finite() && water_density > 0.0) {
            return Err(AsvError::specification(format!(
                "water density must be positive, got {}",
                water_density
            )));
        }
        if !(gravity.is_finite() && gravity > 0.0) {
            return Err(AsvError::specification(format!(
                "gravity must be positive, got {}",
                gravity
            )));
        }
        if let Some(h) = depth {
            if !(h.is_finite() && h > 0.0) {
                return Err(AsvError::specification(format!(
                    "water depth must be positive, got {}",
                    h
                )));
            }
        }
        Ok(Environment {
            water_density,
            gravity,
            depth,
        })
    }

    /// ρ·g, the hydrostatic pressure gradient.
    pub fn specific_weight(&self) -> f64 {
        self.water_density * self.gravity
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment {
            water_density: SEAWATER_DENSITY,
            gravity: STANDARD_GRAVITY,
            depth: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use test_case::test_case;

    #[test_case(0.0, 9.81, None; "zero density")]
    #[test_case(1025.0, -9.81, None; "negative gravity")]
    #[test_case(1025.0, 9.81, Some(0.0); "zero depth")]
    #[test_case(f64::NAN, 9.81, None; "nan density")]
    fn rejects_non_physical(rho: f64, g: f64, depth: Option<f64>) {
        let err = Environment::new(rho, g, depth).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSpecification);
    }

    #[test]
    fn default_is_deep_seawater() {
        let env = Environment::default();
        assert_eq!(env.depth, None);
        assert!((env.specific_weight() - 1025.0 * 9.80665).abs() < 1e-9);
    }
}
