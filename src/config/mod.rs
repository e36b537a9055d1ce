pub mod scenario;
pub mod vessel;
