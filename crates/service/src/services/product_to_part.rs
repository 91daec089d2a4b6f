use models::product_to_part;
use serde::Deserialize;

use super::crud::{CrudService, Draft};

/// Product ↔ animal part join records.
pub type ProductToPartMappingService = CrudService<product_to_part::Model>;

/// Neither `product_id` nor `part_id` is checked; `quantity` is stored as given.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMapping {
    pub product_id: i32,
    pub part_id: i32,
    pub quantity: i32,
}

impl Draft for NewMapping {
    type Record = product_to_part::Model;

    fn into_record(self) -> product_to_part::Model {
        product_to_part::Model {
            id: 0,
            product_id: self.product_id,
            part_id: self.part_id,
            quantity: self.quantity,
        }
    }
}
