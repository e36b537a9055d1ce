pub mod damping;
pub mod dynamics;
pub mod energy;
pub mod environment;
pub mod hydrostatics;
pub mod mass;
pub mod sea_state;
pub mod spectrum;
pub mod waves;
