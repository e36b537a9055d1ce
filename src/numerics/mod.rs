pub mod euler;
