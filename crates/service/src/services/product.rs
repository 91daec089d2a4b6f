use models::product;
use serde::Deserialize;

use super::crud::{CrudService, Draft};

pub type ProductService = CrudService<product::Model>;

#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Draft for NewProduct {
    type Record = product::Model;

    fn into_record(self) -> product::Model {
        product::Model { id: 0, name: self.name, description: self.description }
    }
}
