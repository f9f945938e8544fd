//! Modelo de Missão
//!
//! La misión es dueña de sus residuos: al borrarla se borran en cascada.
//! La lista `residuosPlasticos` la rellena el almacenamiento; se gestiona
//! desde los endpoints de residuos, nunca desde la actualización de la misión.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::operator::OperatorRef;
use crate::models::plastic_waste::WasteSummary;
use crate::utils::validation::validate_not_blank;

/// Misión - mapea a la tabla missoes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Mission {
    #[serde(default)]
    pub id_missao: Option<i64>,

    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub nome: String,

    #[serde(default)]
    pub operador: Option<OperatorRef>,

    #[serde(rename = "residuosPlasticos", default, skip_deserializing)]
    pub residuos_plasticos: Vec<WasteSummary>,
}

impl Mission {
    pub fn operator_id(&self) -> Option<i64> {
        self.operador.as_ref().map(|operador| operador.id_operador)
    }
}

/// Misión vista desde un operador
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionSummary {
    pub id_missao: i64,
    pub nome: String,
}

/// Referencia a una misión desde un residuo (sin su lista de residuos)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionRef {
    pub id_missao: i64,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
}

impl MissionRef {
    pub fn new(id_missao: i64) -> Self {
        Self { id_missao, nome: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_name_fails_validation() {
        for nome in ["", "   "] {
            let mission = Mission { nome: nome.to_string(), ..Default::default() };
            let errors = mission.validate().unwrap_err();
            assert!(errors.field_errors().contains_key("nome"));
        }

        let mission: Mission = serde_json::from_value(json!({})).unwrap();
        assert!(mission.validate().is_err());
    }

    #[test]
    fn test_non_blank_name_passes() {
        let mission = Mission { nome: "Cleanup A".to_string(), ..Default::default() };
        assert!(mission.validate().is_ok());
    }

    #[test]
    fn test_wire_format() {
        let mission: Mission = serde_json::from_value(json!({
            "id_missao": 5,
            "nome": "Cleanup A",
            "operador": { "id_operador": 2 },
            "residuosPlasticos": [{ "id_residuo": 1, "coordenadaX": 1, "coordenadaY": 2 }]
        }))
        .unwrap();
        assert_eq!(mission.id_missao, Some(5));
        assert_eq!(mission.operator_id(), Some(2));
        assert!(mission.residuos_plasticos.is_empty());

        let value = serde_json::to_value(&mission).unwrap();
        assert_eq!(value["residuosPlasticos"], json!([]));
        assert_eq!(value["operador"], json!({ "id_operador": 2 }));
    }
}
