use models::animal_part;
use serde::Deserialize;

use super::crud::{CrudService, Draft};

/// Parts are created, read and deleted; never updated.
pub type AnimalPartService = CrudService<animal_part::Model>;

/// A part cut from an animal. `animal_id` is not checked against stored animals.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnimalPart {
    pub animal_id: i32,
    pub part_type: String,
    pub weight: f64,
}

impl Draft for NewAnimalPart {
    type Record = animal_part::Model;

    fn into_record(self) -> animal_part::Model {
        animal_part::Model {
            id: 0,
            animal_id: self.animal_id,
            part_type: self.part_type,
            weight: self.weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::errors::ServiceError;
    use crate::storage::MemoryRepository;

    fn leg(animal_id: i32) -> NewAnimalPart {
        NewAnimalPart { animal_id, part_type: "Leg".into(), weight: 22.5 }
    }

    #[tokio::test]
    async fn create_accepts_unknown_animal_and_assigns_own_id() -> Result<(), anyhow::Error> {
        let svc = AnimalPartService::new(Arc::new(MemoryRepository::<animal_part::Model>::new()));
        let part = svc.create(leg(101)).await?;
        assert_eq!(part.id, 1);
        assert_eq!(part.animal_id, 101);
        assert_eq!(svc.get(part.id).await?, part);
        Ok(())
    }

    #[tokio::test]
    async fn list_returns_every_part() -> Result<(), anyhow::Error> {
        let svc = AnimalPartService::new(Arc::new(MemoryRepository::<animal_part::Model>::new()));
        svc.create(leg(100)).await?;
        svc.create(NewAnimalPart { animal_id: 200, part_type: "Tail".into(), weight: 5.0 }).await?;
        let parts = svc.list().await?;
        let types: Vec<_> = parts.iter().map(|p| p.part_type.as_str()).collect();
        assert_eq!(types, vec!["Leg", "Tail"]);
        Ok(())
    }

    #[tokio::test]
    async fn missing_part_reports_id() -> Result<(), anyhow::Error> {
        let svc = AnimalPartService::new(Arc::new(MemoryRepository::<animal_part::Model>::new()));
        let err = svc.delete(77).await.unwrap_err();
        assert!(err.to_string().contains("AnimalPart with ID 77 not found"));
        assert!(matches!(svc.get(55).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
