//! Modelos del sistema
//!
//! Este módulo contiene las cuatro entidades de la API y las vistas
//! reducidas que se incrustan en las relaciones. Las relaciones se guardan
//! como identificadores; el almacenamiento rellena las vistas al leer.

pub mod drone;
pub mod mission;
pub mod operator;
pub mod plastic_waste;

pub use drone::Drone;
pub use mission::{Mission, MissionRef, MissionSummary};
pub use operator::{Operator, OperatorRef};
pub use plastic_waste::{PlasticWaste, WasteSummary};
