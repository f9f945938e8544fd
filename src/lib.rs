//! API hipermedia de limpieza oceánica
//!
//! CRUD con enlaces hipermedia sobre drones, misiones, operadores y
//! residuos plásticos.

pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
