//! Modelo de Operador
//!
//! Un operador solo conoce sus misiones como referencia inversa: la lista
//! `missoes` la rellena el almacenamiento al leer y se ignora en la entrada.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::mission::MissionSummary;

/// Operador - mapea a la tabla operadores
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Operator {
    #[serde(default)]
    pub id_operador: Option<i64>,
    #[serde(default)]
    pub nome: String,
    #[serde(default, skip_deserializing)]
    pub missoes: Vec<MissionSummary>,
}

/// Referencia a un operador desde una misión (sin `missoes`, para evitar ciclos)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorRef {
    pub id_operador: i64,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
}

impl OperatorRef {
    pub fn new(id_operador: i64) -> Self {
        Self { id_operador, nome: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missoes_are_read_only() {
        let operator: Operator = serde_json::from_value(json!({
            "nome": "Ana",
            "missoes": [{ "id_missao": 9, "nome": "X" }]
        }))
        .unwrap();
        assert!(operator.missoes.is_empty());
        assert!(operator.validate().is_ok());
    }

    #[test]
    fn test_operator_ref_ignores_input_name() {
        let reference: OperatorRef =
            serde_json::from_value(json!({ "id_operador": 3, "nome": "otro" })).unwrap();
        assert_eq!(reference, OperatorRef::new(3));
        assert_eq!(serde_json::to_value(&reference).unwrap(), json!({ "id_operador": 3 }));
    }
}
