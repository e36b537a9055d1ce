use crate::physics::dynamics::SplitEquationsOfMotion;

/// Symplectic (semi-implicit) Euler: velocity is advanced first, then the
/// pose is advanced with the updated velocity.
pub struct SemiImplicitEuler<T: SplitEquationsOfMotion> {
    eom: T,
}

impl<T: SplitEquationsOfMotion> SemiImplicitEuler<T>
where
    T::State: Clone + std::ops::Add<Output = T::State> + std::ops::Mul<f64, Output = T::State>,
{
    pub fn new(eom: T) -> Self {
        SemiImplicitEuler { eom }
    }

    pub fn integrate(&self, state: &T::State, dt: f64) -> T::State {
        let kicked = state.clone() + self.eom.velocity_derivative(state) * dt;
        let drift = self.eom.pose_derivative(&kicked);
        kicked + drift * dt
    }
}
