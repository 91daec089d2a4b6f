use models::tray;
use serde::Deserialize;

use super::crud::{CrudService, Draft};

pub type TrayService = CrudService<tray::Model>;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTray {
    pub part_type: String,
    pub max_weight: f64,
}

impl Draft for NewTray {
    type Record = tray::Model;

    fn into_record(self) -> tray::Model {
        tray::Model { id: 0, part_type: self.part_type, max_weight: self.max_weight }
    }
}
