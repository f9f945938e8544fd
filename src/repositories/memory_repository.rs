//! Repositorio en memoria
//!
//! Implementa los mismos contratos que los repositorios de PostgreSQL sobre
//! tablas en memoria protegidas por un único `RwLock`. Cada operación toma
//! el lock una sola vez, así que la cascada de misiones es atómica.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{
    Drone, Mission, MissionRef, MissionSummary, Operator, OperatorRef, PlasticWaste, WasteSummary,
};
use crate::repositories::{DroneRepository, Repository, LAST_DRONES_LIMIT};
use crate::utils::errors::{missing_reference_error, AppError, AppResult};

#[derive(Debug, Clone)]
struct OperatorRow {
    nome: String,
}

#[derive(Debug, Clone)]
struct MissionRow {
    nome: String,
    operator_id: Option<i64>,
}

#[derive(Debug, Clone)]
struct WasteRow {
    coordenada_x: i32,
    coordenada_y: i32,
    mission_id: Option<i64>,
}

/// Tabla con secuencia propia de ids
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    /// Id del registro a escribir. Un id existente se reemplaza; un id
    /// ausente o desconocido recibe el siguiente valor de la secuencia.
    fn resolve(&mut self, id: Option<i64>) -> AppResult<i64> {
        match id {
            Some(id) if self.rows.contains_key(&id) => Ok(id),
            _ => {
                let next = self
                    .last_id
                    .checked_add(1)
                    .ok_or_else(|| AppError::Internal("Secuencia de ids agotada".to_string()))?;
                self.last_id = next;
                Ok(next)
            }
        }
    }

    /// Inserta o reemplaza el registro completo
    fn upsert(&mut self, id: Option<i64>, row: T) -> AppResult<i64> {
        let id = self.resolve(id)?;
        self.rows.insert(id, row);
        Ok(id)
    }
}

#[derive(Debug, Default)]
struct Tables {
    drones: Table<Drone>,
    operators: Table<OperatorRow>,
    missions: Table<MissionRow>,
    wastes: Table<WasteRow>,
}

impl Tables {
    fn operator(&self, id: i64) -> Option<Operator> {
        let row = self.operators.rows.get(&id)?;
        let missoes = self
            .missions
            .rows
            .iter()
            .filter(|(_, mission)| mission.operator_id == Some(id))
            .map(|(id_missao, mission)| MissionSummary {
                id_missao: *id_missao,
                nome: mission.nome.clone(),
            })
            .collect();

        Some(Operator {
            id_operador: Some(id),
            nome: row.nome.clone(),
            missoes,
        })
    }

    fn mission(&self, id: i64) -> Option<Mission> {
        let row = self.missions.rows.get(&id)?;
        let operador = row.operator_id.map(|id_operador| OperatorRef {
            id_operador,
            nome: self.operators.rows.get(&id_operador).map(|o| o.nome.clone()),
        });
        let residuos_plasticos = self
            .wastes
            .rows
            .iter()
            .filter(|(_, waste)| waste.mission_id == Some(id))
            .map(|(id_residuo, waste)| WasteSummary {
                id_residuo: *id_residuo,
                coordenada_x: waste.coordenada_x,
                coordenada_y: waste.coordenada_y,
            })
            .collect();

        Some(Mission {
            id_missao: Some(id),
            nome: row.nome.clone(),
            operador,
            residuos_plasticos,
        })
    }

    fn waste(&self, id: i64) -> Option<PlasticWaste> {
        let row = self.wastes.rows.get(&id)?;
        let missao = row.mission_id.map(|id_missao| MissionRef {
            id_missao,
            nome: self.missions.rows.get(&id_missao).map(|m| m.nome.clone()),
        });

        Some(PlasticWaste {
            id_residuo: Some(id),
            coordenada_x: row.coordenada_x,
            coordenada_y: row.coordenada_y,
            missao,
        })
    }

    fn hydrated<T>(&self, id: i64, entity: &str, lookup: impl Fn(&Self, i64) -> Option<T>) -> AppResult<T> {
        lookup(self, id).ok_or_else(|| {
            AppError::Internal(format!("{} {} desapareció tras guardarse", entity, id))
        })
    }
}

/// Almacenamiento en memoria compartido por las cuatro entidades
#[derive(Clone, Default)]
pub struct MemoryRepository {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<Drone> for MemoryRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Drone>> {
        Ok(self.tables.read().await.drones.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Drone>> {
        Ok(self.tables.read().await.drones.rows.values().cloned().collect())
    }

    async fn save(&self, mut drone: Drone) -> AppResult<Drone> {
        let mut tables = self.tables.write().await;
        let id = tables.drones.resolve(drone.id_drone)?;
        drone.id_drone = Some(id);
        tables.drones.rows.insert(id, drone.clone());
        Ok(drone)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        self.tables.write().await.drones.rows.remove(&id);
        Ok(())
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        Ok(self.tables.read().await.drones.rows.contains_key(&id))
    }
}

#[async_trait]
impl DroneRepository for MemoryRepository {
    async fn find_last_10(&self) -> AppResult<Vec<Drone>> {
        let tables = self.tables.read().await;
        Ok(tables
            .drones
            .rows
            .values()
            .rev()
            .take(LAST_DRONES_LIMIT)
            .cloned()
            .collect())
    }

    async fn find_all_ordered_by_name(&self) -> AppResult<Vec<Drone>> {
        let mut drones: Vec<Drone> = self.tables.read().await.drones.rows.values().cloned().collect();
        // sort_by es estable: a igual nombre se mantiene el orden por id
        drones.sort_by(|a, b| a.nome.cmp(&b.nome));
        Ok(drones)
    }
}

#[async_trait]
impl Repository<Operator> for MemoryRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Operator>> {
        Ok(self.tables.read().await.operator(id))
    }

    async fn find_all(&self) -> AppResult<Vec<Operator>> {
        let tables = self.tables.read().await;
        Ok(tables
            .operators
            .rows
            .keys()
            .filter_map(|id| tables.operator(*id))
            .collect())
    }

    async fn save(&self, operator: Operator) -> AppResult<Operator> {
        let mut tables = self.tables.write().await;
        let row = OperatorRow { nome: operator.nome };
        let id = tables.operators.upsert(operator.id_operador, row)?;
        tables.hydrated(id, "operador", Tables::operator)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        let referenced = tables
            .missions
            .rows
            .values()
            .any(|mission| mission.operator_id == Some(id));
        if referenced {
            return Err(AppError::Conflict(format!(
                "El operador {} tiene misiones asignadas",
                id
            )));
        }
        tables.operators.rows.remove(&id);
        Ok(())
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        Ok(self.tables.read().await.operators.rows.contains_key(&id))
    }
}

#[async_trait]
impl Repository<Mission> for MemoryRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Mission>> {
        Ok(self.tables.read().await.mission(id))
    }

    async fn find_all(&self) -> AppResult<Vec<Mission>> {
        let tables = self.tables.read().await;
        Ok(tables
            .missions
            .rows
            .keys()
            .filter_map(|id| tables.mission(*id))
            .collect())
    }

    async fn save(&self, mission: Mission) -> AppResult<Mission> {
        let mut tables = self.tables.write().await;
        let operator_id = mission.operator_id();
        if let Some(operator_id) = operator_id {
            if !tables.operators.rows.contains_key(&operator_id) {
                return Err(missing_reference_error("operador", operator_id));
            }
        }

        let row = MissionRow {
            nome: mission.nome,
            operator_id,
        };
        let id = tables.missions.upsert(mission.id_missao, row)?;
        tables.hydrated(id, "misión", Tables::mission)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .wastes
            .rows
            .retain(|_, waste| waste.mission_id != Some(id));
        tables.missions.rows.remove(&id);
        Ok(())
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        Ok(self.tables.read().await.missions.rows.contains_key(&id))
    }
}

#[async_trait]
impl Repository<PlasticWaste> for MemoryRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<PlasticWaste>> {
        Ok(self.tables.read().await.waste(id))
    }

    async fn find_all(&self) -> AppResult<Vec<PlasticWaste>> {
        let tables = self.tables.read().await;
        Ok(tables
            .wastes
            .rows
            .keys()
            .filter_map(|id| tables.waste(*id))
            .collect())
    }

    async fn save(&self, waste: PlasticWaste) -> AppResult<PlasticWaste> {
        let mut tables = self.tables.write().await;
        let mission_id = waste.mission_id();
        if let Some(mission_id) = mission_id {
            if !tables.missions.rows.contains_key(&mission_id) {
                return Err(missing_reference_error("misión", mission_id));
            }
        }

        let row = WasteRow {
            coordenada_x: waste.coordenada_x,
            coordenada_y: waste.coordenada_y,
            mission_id,
        };
        let id = tables.wastes.upsert(waste.id_residuo, row)?;
        tables.hydrated(id, "residuo plástico", Tables::waste)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        self.tables.write().await.wastes.rows.remove(&id);
        Ok(())
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        Ok(self.tables.read().await.wastes.rows.contains_key(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drone(nome: &str) -> Drone {
        Drone {
            nome: nome.to_string(),
            ..Default::default()
        }
    }

    fn mission(nome: &str, operator_id: Option<i64>) -> Mission {
        Mission {
            nome: nome.to_string(),
            operador: operator_id.map(OperatorRef::new),
            ..Default::default()
        }
    }

    fn waste(x: i32, y: i32, mission_id: Option<i64>) -> PlasticWaste {
        PlasticWaste {
            coordenada_x: x,
            coordenada_y: y,
            missao: mission_id.map(MissionRef::new),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let repo = MemoryRepository::new();
        let first = Repository::<Drone>::save(&repo, drone("a")).await.unwrap();
        let second = Repository::<Drone>::save(&repo, drone("b")).await.unwrap();
        assert_eq!(first.id_drone, Some(1));
        assert_eq!(second.id_drone, Some(2));

        // Cada entidad tiene su propia secuencia
        let operator = Repository::<Operator>::save(&repo, Operator::default()).await.unwrap();
        assert_eq!(operator.id_operador, Some(1));
    }

    #[tokio::test]
    async fn test_save_with_id_replaces_record() {
        let repo = MemoryRepository::new();
        let saved = Repository::<Drone>::save(&repo, drone("a")).await.unwrap();

        let mut replacement = drone("b");
        replacement.id_drone = saved.id_drone;
        Repository::<Drone>::save(&repo, replacement).await.unwrap();

        let all = Repository::<Drone>::find_all(&repo).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].nome, "b");
        assert_eq!(all[0].modelo, None);
    }

    #[tokio::test]
    async fn test_save_with_unknown_id_uses_sequence() {
        let repo = MemoryRepository::new();
        let mut foreign = drone("a");
        foreign.id_drone = Some(i64::MAX);
        let saved = Repository::<Drone>::save(&repo, foreign).await.unwrap();
        assert_eq!(saved.id_drone, Some(1));

        let next = Repository::<Drone>::save(&repo, drone("b")).await.unwrap();
        assert_eq!(next.id_drone, Some(2));
    }

    #[test]
    fn test_exhausted_sequence_is_an_error() {
        let mut table: Table<()> = Table {
            rows: BTreeMap::new(),
            last_id: i64::MAX,
        };
        assert!(matches!(table.upsert(None, ()), Err(AppError::Internal(_))));
        assert!(table.rows.is_empty());
    }

    #[tokio::test]
    async fn test_find_last_10_newest_first() {
        let repo = MemoryRepository::new();
        for i in 0..3 {
            Repository::<Drone>::save(&repo, drone(&format!("d{}", i))).await.unwrap();
        }
        let last = repo.find_last_10().await.unwrap();
        let ids: Vec<i64> = last.iter().filter_map(|d| d.id_drone).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        for i in 3..15 {
            Repository::<Drone>::save(&repo, drone(&format!("d{}", i))).await.unwrap();
        }
        let last = repo.find_last_10().await.unwrap();
        assert_eq!(last.len(), LAST_DRONES_LIMIT);
        assert_eq!(last[0].id_drone, Some(15));
        assert_eq!(last[9].id_drone, Some(6));
    }

    #[tokio::test]
    async fn test_find_all_ordered_by_name() {
        let repo = MemoryRepository::new();
        for nome in ["Orca", "Albatroz", "Marlim", "Albatroz"] {
            Repository::<Drone>::save(&repo, drone(nome)).await.unwrap();
        }
        let ordered = repo.find_all_ordered_by_name().await.unwrap();
        let names: Vec<&str> = ordered.iter().map(|d| d.nome.as_str()).collect();
        assert_eq!(names, vec!["Albatroz", "Albatroz", "Marlim", "Orca"]);
        assert!(ordered[0].id_drone < ordered[1].id_drone);
    }

    #[tokio::test]
    async fn test_mission_delete_cascades_to_waste() {
        let repo = MemoryRepository::new();
        let kept = Repository::<Mission>::save(&repo, mission("B", None)).await.unwrap();
        let doomed = Repository::<Mission>::save(&repo, mission("A", None)).await.unwrap();
        let doomed_id = doomed.id_missao.unwrap();

        Repository::<PlasticWaste>::save(&repo, waste(1, 1, Some(doomed_id))).await.unwrap();
        Repository::<PlasticWaste>::save(&repo, waste(2, 2, Some(doomed_id))).await.unwrap();
        Repository::<PlasticWaste>::save(&repo, waste(3, 3, kept.id_missao)).await.unwrap();
        Repository::<PlasticWaste>::save(&repo, waste(4, 4, None)).await.unwrap();

        let hydrated = Repository::<Mission>::find_by_id(&repo, doomed_id).await.unwrap().unwrap();
        assert_eq!(hydrated.residuos_plasticos.len(), 2);

        Repository::<Mission>::delete_by_id(&repo, doomed_id).await.unwrap();

        let remaining = Repository::<PlasticWaste>::find_all(&repo).await.unwrap();
        assert_eq!(remaining.len(), 2);
        assert!(remaining.iter().all(|w| w.mission_id() != Some(doomed_id)));
        assert!(!Repository::<Mission>::exists_by_id(&repo, doomed_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_dangling_references_conflict() {
        let repo = MemoryRepository::new();
        let result = Repository::<Mission>::save(&repo, mission("A", Some(99))).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        let result = Repository::<PlasticWaste>::save(&repo, waste(0, 0, Some(99))).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert!(Repository::<PlasticWaste>::find_all(&repo).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_operator_with_missions_cannot_be_deleted() {
        let repo = MemoryRepository::new();
        let operator = Repository::<Operator>::save(
            &repo,
            Operator {
                nome: "Ana".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let operator_id = operator.id_operador.unwrap();
        let saved = Repository::<Mission>::save(&repo, mission("A", Some(operator_id))).await.unwrap();
        assert_eq!(
            saved.operador.as_ref().and_then(|o| o.nome.as_deref()),
            Some("Ana")
        );

        let hydrated = Repository::<Operator>::find_by_id(&repo, operator_id).await.unwrap().unwrap();
        assert_eq!(hydrated.missoes.len(), 1);

        let result = Repository::<Operator>::delete_by_id(&repo, operator_id).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert!(Repository::<Operator>::exists_by_id(&repo, operator_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_mission_update_keeps_waste() {
        let repo = MemoryRepository::new();
        let saved = Repository::<Mission>::save(&repo, mission("A", None)).await.unwrap();
        Repository::<PlasticWaste>::save(&repo, waste(1, 1, saved.id_missao)).await.unwrap();

        let mut renamed = mission("A2", None);
        renamed.id_missao = saved.id_missao;
        let updated = Repository::<Mission>::save(&repo, renamed).await.unwrap();
        assert_eq!(updated.nome, "A2");
        assert_eq!(updated.residuos_plasticos.len(), 1);
    }
}
