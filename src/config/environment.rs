//! Configuración de variables de entorno
//!
//! Este módulo lee la configuración del proceso desde variables de entorno
//! (cargadas antes desde `.env` con dotenvy). Los valores numéricos
//! inválidos se reportan como error en lugar de abortar.

use anyhow::{Context, Result};
use std::env;

/// Backend de almacenamiento
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Postgres => "postgres",
            StorageBackend::Memory => "memory",
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    /// Prefijo de los enlaces hipermedia; vacío genera rutas relativas
    pub public_base_url: String,
    pub cors_origins: Vec<String>,
    pub storage: StorageBackend,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 8080,
            host: "0.0.0.0".to_string(),
            public_base_url: String::new(),
            cors_origins: Vec::new(),
            storage: StorageBackend::Memory,
            database_url: None,
            database_max_connections: 20,
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración del entorno del proceso
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Leer la configuración desde una fuente arbitraria de variables
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match var("PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("PORT debe ser un número válido: {}", port))?,
            None => defaults.port,
        };

        let database_max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(max) => max.parse().with_context(|| {
                format!("DATABASE_MAX_CONNECTIONS debe ser un número válido: {}", max)
            })?,
            None => defaults.database_max_connections,
        };

        let database_url = var("DATABASE_URL");
        let storage = match var("STORAGE_BACKEND").as_deref() {
            Some("postgres") => StorageBackend::Postgres,
            Some("memory") => StorageBackend::Memory,
            Some(other) => anyhow::bail!("STORAGE_BACKEND desconocido: {}", other),
            None if database_url.is_some() => StorageBackend::Postgres,
            None => StorageBackend::Memory,
        };

        if storage == StorageBackend::Postgres && database_url.is_none() {
            anyhow::bail!("DATABASE_URL es obligatorio con STORAGE_BACKEND=postgres");
        }

        let cors_origins = var("CORS_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty() && s != "*")
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            environment: var("ENVIRONMENT").unwrap_or(defaults.environment),
            port,
            host: var("HOST").unwrap_or(defaults.host),
            public_base_url: var("PUBLIC_BASE_URL").unwrap_or(defaults.public_base_url),
            cors_origins,
            storage,
            database_url,
            database_max_connections,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<EnvironmentConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvironmentConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_use_memory_storage() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.server_url(), "0.0.0.0:8080");
        assert!(config.is_development());
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_database_url_selects_postgres() {
        let config = config_from(&[("DATABASE_URL", "postgres://localhost/ocean")]).unwrap();
        assert_eq!(config.storage, StorageBackend::Postgres);

        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/ocean"),
            ("STORAGE_BACKEND", "memory"),
        ])
        .unwrap();
        assert_eq!(config.storage, StorageBackend::Memory);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(config_from(&[("PORT", "abc")]).is_err());
        assert!(config_from(&[("STORAGE_BACKEND", "redis")]).is_err());
        assert!(config_from(&[("STORAGE_BACKEND", "postgres")]).is_err());
    }

    #[test]
    fn test_cors_origins_list() {
        let config = config_from(&[("CORS_ORIGINS", "http://a.test, http://b.test,*")]).unwrap();
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }
}
