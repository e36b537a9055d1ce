pub mod actuator;
pub mod asv;
pub mod axes;
pub mod specification;
pub mod state;

pub use actuator::{Actuator, ThrustPolicy};
pub use asv::{Asv, AsvBuilder};
pub use axes::{AttitudeAngle, Axis, Dof};
pub use specification::{Dimensions, MetacentricHeight, VehicleSpecification};
pub use state::{DynamicsState, State};
