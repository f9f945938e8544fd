//! Controladores
//!
//! Lógica de cada endpoint, independiente de axum: comprobaciones de
//! existencia, validación, persistencia y construcción de enlaces.

pub mod drone_controller;
pub mod resource_controller;
pub mod resources;

pub use drone_controller::DroneController;
pub use resource_controller::{Resource, ResourceController};
