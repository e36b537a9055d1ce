pub mod rk4;
pub mod semi_implicit_euler;

use crate::physics::dynamics::SplitEquationsOfMotion;
use rk4::RK4;
use semi_implicit_euler::SemiImplicitEuler;

/// Fixed-step scheme used by a vehicle's `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegratorKind {
    #[default]
    Rk4,
    SemiImplicitEuler,
}

impl IntegratorKind {
    pub fn step<E>(self, eom: E, state: &E::State, dt: f64) -> E::State
    where
        E: SplitEquationsOfMotion,
        E::State: Clone + std::ops::Add<Output = E::State> + std::ops::Mul<f64, Output = E::State>,
    {
        match self {
            IntegratorKind::Rk4 => RK4::new(eom).integrate(state, dt),
            IntegratorKind::SemiImplicitEuler => SemiImplicitEuler::new(eom).integrate(state, dt),
        }
    }
}
