pub mod heading_controller;
