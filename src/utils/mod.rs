//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación,
//! extracción de cuerpos JSON y construcción de enlaces.

pub mod errors;
pub mod extract;
pub mod links;
pub mod validation;
