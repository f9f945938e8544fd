//! Modelo de Drone
//!
//! Entidad independiente, sin relaciones. Sus atributos son libres.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Drone principal - mapea a la tabla drones
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct Drone {
    #[serde(default)]
    pub id_drone: Option<i64>,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub modelo: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_drone_has_no_constraints() {
        let drone: Drone = serde_json::from_value(json!({})).unwrap();
        assert_eq!(drone.id_drone, None);
        assert_eq!(drone.nome, "");
        assert!(drone.validate().is_ok());
    }
}
