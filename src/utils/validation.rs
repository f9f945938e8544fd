//! Utilidades de validación
//!
//! Validadores personalizados usados por los derives de `validator::Validate`
//! en los modelos. Las restricciones se declaran una sola vez en el modelo
//! y se aplican igual en alta y en actualización.

use std::borrow::Cow;
use validator::ValidationError;

/// Validar que un string no esté vacío ni contenga solo espacios
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.add_param(Cow::from("value"), &value.to_string());
        error.message = Some(Cow::from("no puede estar en blanco"));
        return Err(error);
    }
    Ok(())
}

/// Nombres de los campos que fallaron, ordenados
pub fn failed_fields(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();
    fields.sort();
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Named {
        #[validate(custom = "validate_not_blank")]
        nome: String,
        #[validate(range(min = 0))]
        x: i32,
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Cleanup A").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("   \t").is_err());

        let error = validate_not_blank(" ").unwrap_err();
        assert_eq!(error.code, "not_blank");
    }

    #[test]
    fn test_failed_fields() {
        let named = Named { nome: " ".to_string(), x: -1 };
        let errors = named.validate().unwrap_err();
        assert_eq!(failed_fields(&errors), vec!["nome".to_string(), "x".to_string()]);

        let named = Named { nome: "ok".to_string(), x: 0 };
        assert!(named.validate().is_ok());
    }
}
