//! Modelo de Resíduo Plástico

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::mission::MissionRef;

/// Residuo plástico - mapea a la tabla residuos_plasticos
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct PlasticWaste {
    #[serde(default)]
    pub id_residuo: Option<i64>,

    #[serde(rename = "coordenadaX", default)]
    #[validate(range(min = 0))]
    pub coordenada_x: i32,

    #[serde(rename = "coordenadaY", default)]
    #[validate(range(min = 0))]
    pub coordenada_y: i32,

    #[serde(default)]
    pub missao: Option<MissionRef>,
}

impl PlasticWaste {
    pub fn mission_id(&self) -> Option<i64> {
        self.missao.as_ref().map(|missao| missao.id_missao)
    }
}

/// Residuo visto desde su misión (sin `missao`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteSummary {
    pub id_residuo: i64,
    #[serde(rename = "coordenadaX")]
    pub coordenada_x: i32,
    #[serde(rename = "coordenadaY")]
    pub coordenada_y: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn waste(x: i32, y: i32) -> PlasticWaste {
        PlasticWaste { coordenada_x: x, coordenada_y: y, ..Default::default() }
    }

    #[test]
    fn test_negative_coordinates_fail() {
        let errors = waste(-1, 0).validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 1);

        let errors = waste(0, -1).validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 1);

        let errors = waste(-1, -1).validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 2);
    }

    #[test]
    fn test_zero_coordinates_pass() {
        assert!(waste(0, 0).validate().is_ok());
        assert!(waste(5, 10).validate().is_ok());
    }

    #[test]
    fn test_wire_format() {
        let waste: PlasticWaste = serde_json::from_value(json!({
            "coordenadaX": 5,
            "coordenadaY": 10,
            "missao": { "id_missao": 1 }
        }))
        .unwrap();
        assert_eq!(waste.mission_id(), Some(1));
        assert_eq!(waste.coordenada_x, 5);

        let value = serde_json::to_value(&waste).unwrap();
        assert_eq!(value["coordenadaY"], 10);
        assert_eq!(value["missao"], json!({ "id_missao": 1 }));
    }
}
