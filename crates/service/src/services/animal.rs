//! Animal intake: the one entity with update and read filters.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use models::animal;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::crud::{CrudService, Draft};
use crate::errors::ServiceError;
use crate::storage::Repository;

/// Calendar date format accepted by [`AnimalService::list_by_date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Registration of an arriving animal.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnimal {
    pub registration_number: String,
    pub weight: f64,
    pub origin: String,
    /// Honored only when the service does not stamp arrival times itself.
    #[serde(default)]
    pub arrival_time: Option<DateTimeWithTimeZone>,
}

impl Draft for NewAnimal {
    type Record = animal::Model;

    fn into_record(self) -> animal::Model {
        animal::Model {
            id: 0,
            registration_number: self.registration_number,
            weight: self.weight,
            origin: self.origin,
            arrival_time: self.arrival_time.unwrap_or_else(now),
        }
    }
}

/// Fields overwritten by an update. Id and registration number never change.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalUpdate {
    pub origin: String,
    pub weight: f64,
    pub arrival_time: DateTimeWithTimeZone,
}

pub fn now() -> DateTimeWithTimeZone {
    Local::now().fixed_offset()
}

pub struct AnimalService {
    crud: CrudService<animal::Model>,
    server_assigned_arrival_time: bool,
}

impl AnimalService {
    pub fn new(
        repo: Arc<dyn Repository<animal::Model>>,
        server_assigned_arrival_time: bool,
    ) -> Self {
        Self { crud: CrudService::new(repo), server_assigned_arrival_time }
    }

    pub async fn create(&self, mut input: NewAnimal) -> Result<animal::Model, ServiceError> {
        if self.server_assigned_arrival_time {
            input.arrival_time = None;
        }
        self.crud.create(input).await
    }

    pub async fn get(&self, id: i32) -> Result<animal::Model, ServiceError> {
        self.crud.get(id).await
    }

    pub async fn list(&self) -> Result<Vec<animal::Model>, ServiceError> {
        self.crud.list().await
    }

    pub async fn update(
        &self,
        id: i32,
        input: AnimalUpdate,
    ) -> Result<animal::Model, ServiceError> {
        self.crud
            .update(id, move |a| {
                a.origin = input.origin;
                a.weight = input.weight;
                a.arrival_time = input.arrival_time;
            })
            .await
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.crud.delete(id).await
    }

    /// Animals whose origin equals `origin`, ignoring case. Unknown origins
    /// yield an empty list.
    #[instrument(skip(self))]
    pub async fn list_by_origin(&self, origin: &str) -> Result<Vec<animal::Model>, ServiceError> {
        let wanted = origin.to_lowercase();
        let animals: Vec<_> = self
            .crud
            .list()
            .await?
            .into_iter()
            .filter(|a| a.origin.to_lowercase() == wanted)
            .collect();
        debug!(count = animals.len(), "filtered by origin");
        Ok(animals)
    }

    /// Animals that arrived on the given `yyyy-MM-dd` calendar date in the
    /// server's local time zone, whatever offset the arrival was stored with.
    #[instrument(skip(self))]
    pub async fn list_by_date(&self, date: &str) -> Result<Vec<animal::Model>, ServiceError> {
        let day = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| ServiceError::Validation("Invalid date format, use yyyy-MM-dd".into()))?;
        let animals: Vec<_> = self
            .crud
            .list()
            .await?
            .into_iter()
            .filter(|a| a.arrival_time.with_timezone(&Local).date_naive() == day)
            .collect();
        debug!(count = animals.len(), "filtered by arrival date");
        Ok(animals)
    }
}
