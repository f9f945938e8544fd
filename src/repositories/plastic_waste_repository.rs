use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{MissionRef, PlasticWaste};
use crate::repositories::Repository;
use crate::utils::errors::{map_db_error, AppError, AppResult};

const SELECT_WASTES: &str = r#"
    SELECT r.id_residuo, r.coordenada_x, r.coordenada_y, r.id_missao, m.nome AS missao_nome
    FROM residuos_plasticos r
    LEFT JOIN missoes m ON m.id_missao = r.id_missao
"#;

#[derive(Debug, sqlx::FromRow)]
struct WasteRow {
    id_residuo: i64,
    coordenada_x: i32,
    coordenada_y: i32,
    id_missao: Option<i64>,
    missao_nome: Option<String>,
}

impl From<WasteRow> for PlasticWaste {
    fn from(row: WasteRow) -> Self {
        Self {
            id_residuo: Some(row.id_residuo),
            coordenada_x: row.coordenada_x,
            coordenada_y: row.coordenada_y,
            missao: row.id_missao.map(|id_missao| MissionRef {
                id_missao,
                nome: row.missao_nome,
            }),
        }
    }
}

pub struct PgPlasticWasteRepository {
    pool: PgPool,
}

impl PgPlasticWasteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<PlasticWaste> for PgPlasticWasteRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<PlasticWaste>> {
        let row = sqlx::query_as::<_, WasteRow>(&format!("{} WHERE r.id_residuo = $1", SELECT_WASTES))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Error buscando residuo", e))?;

        Ok(row.map(PlasticWaste::from))
    }

    async fn find_all(&self) -> AppResult<Vec<PlasticWaste>> {
        let rows = sqlx::query_as::<_, WasteRow>(&format!("{} ORDER BY r.id_residuo", SELECT_WASTES))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_error("Error listando residuos", e))?;

        Ok(rows.into_iter().map(PlasticWaste::from).collect())
    }

    async fn save(&self, waste: PlasticWaste) -> AppResult<PlasticWaste> {
        let mission_id = waste.mission_id();
        let mut updated = None;
        if let Some(id) = waste.id_residuo {
            updated = sqlx::query_as::<_, (i64,)>(
                r#"
                UPDATE residuos_plasticos
                SET coordenada_x = $2, coordenada_y = $3, id_missao = $4
                WHERE id_residuo = $1
                RETURNING id_residuo
                "#,
            )
            .bind(id)
            .bind(waste.coordenada_x)
            .bind(waste.coordenada_y)
            .bind(mission_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Error actualizando residuo", e))?;
        }

        let (id,) = match updated {
            Some(row) => row,
            None => sqlx::query_as::<_, (i64,)>(
                r#"
                INSERT INTO residuos_plasticos (coordenada_x, coordenada_y, id_missao)
                VALUES ($1, $2, $3)
                RETURNING id_residuo
                "#,
            )
            .bind(waste.coordenada_x)
            .bind(waste.coordenada_y)
            .bind(mission_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_db_error("Error guardando residuo", e))?,
        };

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Residuo {} guardado sin hidratar", id)))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM residuos_plasticos WHERE id_residuo = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("Error borrando residuo", e))?;

        Ok(())
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM residuos_plasticos WHERE id_residuo = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| map_db_error("Error comprobando residuo", e))?;

        Ok(result.0)
    }
}
