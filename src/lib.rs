//! Six-degree-of-freedom rigid-body simulation of an autonomous surface vessel
//! in still water, regular waves, and spectral irregular seas.

pub mod config;
pub mod constants;
pub mod error;
pub mod gnc;
pub mod integrators;
pub mod models;
pub mod numerics;
pub mod physics;

pub use error::{AsvError, AsvResult, ErrorKind};
pub use integrators::IntegratorKind;
pub use models::{
    Actuator, Asv, AsvBuilder, AttitudeAngle, Axis, Dimensions, Dof, DynamicsState,
    MetacentricHeight, State, ThrustPolicy, VehicleSpecification,
};
pub use physics::environment::Environment;
pub use physics::sea_state::{IrregularWave, RegularWave, SeaState, WaveType};
pub use physics::spectrum::{Discretisation, Spectrum};
