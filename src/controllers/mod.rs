pub mod estimation_controller;
pub mod extract;
