use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;

use crate::models::{MissionSummary, Operator};
use crate::repositories::Repository;
use crate::utils::errors::{map_db_error, AppError, AppResult};

#[derive(Debug, sqlx::FromRow)]
struct OperatorRow {
    id_operador: i64,
    nome: String,
}

#[derive(Debug, sqlx::FromRow)]
struct AssignedMissionRow {
    id_missao: i64,
    nome: String,
    id_operador: i64,
}

pub struct PgOperatorRepository {
    pool: PgPool,
}

impl PgOperatorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Rellena `missoes` con una sola consulta para todos los operadores
    async fn hydrate(&self, rows: Vec<OperatorRow>) -> AppResult<Vec<Operator>> {
        let ids: Vec<i64> = rows.iter().map(|row| row.id_operador).collect();
        let missions = sqlx::query_as::<_, AssignedMissionRow>(
            "SELECT id_missao, nome, id_operador FROM missoes WHERE id_operador = ANY($1) ORDER BY id_missao",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Error cargando misiones de operadores", e))?;

        let mut by_operator: HashMap<i64, Vec<MissionSummary>> = HashMap::new();
        for mission in missions {
            by_operator
                .entry(mission.id_operador)
                .or_default()
                .push(MissionSummary {
                    id_missao: mission.id_missao,
                    nome: mission.nome,
                });
        }

        Ok(rows
            .into_iter()
            .map(|row| Operator {
                id_operador: Some(row.id_operador),
                nome: row.nome,
                missoes: by_operator.remove(&row.id_operador).unwrap_or_default(),
            })
            .collect())
    }
}

#[async_trait]
impl Repository<Operator> for PgOperatorRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Operator>> {
        let row = sqlx::query_as::<_, OperatorRow>(
            "SELECT id_operador, nome FROM operadores WHERE id_operador = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("Error buscando operador", e))?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> AppResult<Vec<Operator>> {
        let rows = sqlx::query_as::<_, OperatorRow>(
            "SELECT id_operador, nome FROM operadores ORDER BY id_operador",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Error listando operadores", e))?;

        self.hydrate(rows).await
    }

    async fn save(&self, operator: Operator) -> AppResult<Operator> {
        let mut row = None;
        if let Some(id) = operator.id_operador {
            row = sqlx::query_as::<_, OperatorRow>(
                "UPDATE operadores SET nome = $2 WHERE id_operador = $1 RETURNING id_operador, nome",
            )
            .bind(id)
            .bind(operator.nome.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Error actualizando operador", e))?;
        }

        let row = match row {
            Some(row) => row,
            None => sqlx::query_as::<_, OperatorRow>(
                "INSERT INTO operadores (nome) VALUES ($1) RETURNING id_operador, nome",
            )
            .bind(operator.nome)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_db_error("Error guardando operador", e))?,
        };

        self.hydrate(vec![row])
            .await?
            .pop()
            .ok_or_else(|| AppError::Internal("Operador guardado sin hidratar".to_string()))
    }

    /// Falla con conflicto (23503) si alguna misión referencia al operador
    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM operadores WHERE id_operador = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("Error borrando operador", e))?;

        Ok(())
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM operadores WHERE id_operador = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| map_db_error("Error comprobando operador", e))?;

        Ok(result.0)
    }
}
