use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;

use crate::models::{Mission, OperatorRef, WasteSummary};
use crate::repositories::Repository;
use crate::utils::errors::{map_db_error, AppError, AppResult};

const SELECT_MISSIONS: &str = r#"
    SELECT m.id_missao, m.nome, m.id_operador, o.nome AS operador_nome
    FROM missoes m
    LEFT JOIN operadores o ON o.id_operador = m.id_operador
"#;

#[derive(Debug, sqlx::FromRow)]
struct MissionRow {
    id_missao: i64,
    nome: String,
    id_operador: Option<i64>,
    operador_nome: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct OwnedWasteRow {
    id_residuo: i64,
    coordenada_x: i32,
    coordenada_y: i32,
    id_missao: i64,
}

pub struct PgMissionRepository {
    pool: PgPool,
}

impl PgMissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Rellena `residuosPlasticos` con una sola consulta para todas las misiones
    async fn hydrate(&self, rows: Vec<MissionRow>) -> AppResult<Vec<Mission>> {
        let ids: Vec<i64> = rows.iter().map(|row| row.id_missao).collect();
        let wastes = sqlx::query_as::<_, OwnedWasteRow>(
            r#"
            SELECT id_residuo, coordenada_x, coordenada_y, id_missao
            FROM residuos_plasticos
            WHERE id_missao = ANY($1)
            ORDER BY id_residuo
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Error cargando residuos de misiones", e))?;

        let mut by_mission: HashMap<i64, Vec<WasteSummary>> = HashMap::new();
        for waste in wastes {
            by_mission.entry(waste.id_missao).or_default().push(WasteSummary {
                id_residuo: waste.id_residuo,
                coordenada_x: waste.coordenada_x,
                coordenada_y: waste.coordenada_y,
            });
        }

        Ok(rows
            .into_iter()
            .map(|row| Mission {
                id_missao: Some(row.id_missao),
                nome: row.nome,
                operador: row.id_operador.map(|id_operador| OperatorRef {
                    id_operador,
                    nome: row.operador_nome,
                }),
                residuos_plasticos: by_mission.remove(&row.id_missao).unwrap_or_default(),
            })
            .collect())
    }
}

#[async_trait]
impl Repository<Mission> for PgMissionRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Mission>> {
        let row = sqlx::query_as::<_, MissionRow>(&format!("{} WHERE m.id_missao = $1", SELECT_MISSIONS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Error buscando misión", e))?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> AppResult<Vec<Mission>> {
        let rows = sqlx::query_as::<_, MissionRow>(&format!("{} ORDER BY m.id_missao", SELECT_MISSIONS))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_error("Error listando misiones", e))?;

        self.hydrate(rows).await
    }

    /// Solo escribe nombre y operador; los residuos no se tocan
    async fn save(&self, mission: Mission) -> AppResult<Mission> {
        let operator_id = mission.operator_id();
        let mut updated = None;
        if let Some(id) = mission.id_missao {
            updated = sqlx::query_as::<_, (i64,)>(
                r#"
                UPDATE missoes SET nome = $2, id_operador = $3
                WHERE id_missao = $1
                RETURNING id_missao
                "#,
            )
            .bind(id)
            .bind(mission.nome.as_str())
            .bind(operator_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Error actualizando misión", e))?;
        }

        let (id,) = match updated {
            Some(row) => row,
            None => sqlx::query_as::<_, (i64,)>(
                "INSERT INTO missoes (nome, id_operador) VALUES ($1, $2) RETURNING id_missao",
            )
            .bind(mission.nome)
            .bind(operator_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_db_error("Error guardando misión", e))?,
        };

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Misión {} guardada sin hidratar", id)))
    }

    /// Borra la misión y sus residuos en una sola transacción
    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_db_error("Error iniciando transacción", e))?;

        sqlx::query("DELETE FROM residuos_plasticos WHERE id_missao = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_db_error("Error borrando residuos de la misión", e))?;

        sqlx::query("DELETE FROM missoes WHERE id_missao = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_db_error("Error borrando misión", e))?;

        tx.commit()
            .await
            .map_err(|e| map_db_error("Error confirmando borrado de misión", e))?;

        Ok(())
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM missoes WHERE id_missao = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| map_db_error("Error comprobando misión", e))?;

        Ok(result.0)
    }
}
