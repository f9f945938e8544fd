//! Las cuatro entidades conectadas al controlador genérico

use std::sync::Arc;

use crate::controllers::resource_controller::Resource;
use crate::models::{Drone, Mission, Operator, PlasticWaste};
use crate::repositories::{DroneRepository, Repository};
use crate::state::AppState;
use crate::utils::links::RouteTemplate;

impl Resource for Drone {
    type Store = dyn DroneRepository;
    const ROUTES: RouteTemplate = RouteTemplate::new("drones", "id_drone");
    const LABEL: &'static str = "dron";

    fn id(&self) -> Option<i64> {
        self.id_drone
    }

    fn set_id(&mut self, id: i64) {
        self.id_drone = Some(id);
    }

    fn store(state: &AppState) -> Arc<Self::Store> {
        state.drones.clone()
    }
}

impl Resource for Operator {
    type Store = dyn Repository<Operator>;
    const ROUTES: RouteTemplate = RouteTemplate::new("operadores", "id_operador");
    const LABEL: &'static str = "operador";

    fn id(&self) -> Option<i64> {
        self.id_operador
    }

    fn set_id(&mut self, id: i64) {
        self.id_operador = Some(id);
    }

    fn store(state: &AppState) -> Arc<Self::Store> {
        state.operators.clone()
    }
}

impl Resource for Mission {
    type Store = dyn Repository<Mission>;
    const ROUTES: RouteTemplate = RouteTemplate::new("missoes", "id_missao");
    const LABEL: &'static str = "misión";

    fn id(&self) -> Option<i64> {
        self.id_missao
    }

    fn set_id(&mut self, id: i64) {
        self.id_missao = Some(id);
    }

    fn store(state: &AppState) -> Arc<Self::Store> {
        state.missions.clone()
    }
}

impl Resource for PlasticWaste {
    type Store = dyn Repository<PlasticWaste>;
    const ROUTES: RouteTemplate = RouteTemplate::new("residuos-plasticos", "id_residuo");
    const LABEL: &'static str = "residuo plástico";

    fn id(&self) -> Option<i64> {
        self.id_residuo
    }

    fn set_id(&mut self, id: i64) {
        self.id_residuo = Some(id);
    }

    fn store(state: &AppState) -> Arc<Self::Store> {
        state.wastes.clone()
    }
}
