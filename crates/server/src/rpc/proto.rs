//! RPC message definitions, written by hand (no protoc build step).
//!
//! Each entity has a `XProto` record message plus create/list envelopes.
//! Get and delete share [`GetByIdRequest`] / [`DeleteByIdRequest`].

use chrono::{DateTime, Local};
use models::{animal, animal_part, product, product_to_part, tray};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use service::services::{NewAnimal, NewAnimalPart, NewMapping, NewProduct, NewTray};
use tonic::Status;

const NANOS_PER_SECOND: i32 = 1_000_000_000;

/// Point in time as seconds and nanoseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanos: i32,
}

impl Timestamp {
    /// `None` when `nanos` is outside `0..1e9` or the instant is out of chrono's range.
    pub fn to_datetime(self) -> Option<DateTimeWithTimeZone> {
        if !(0..NANOS_PER_SECOND).contains(&self.nanos) {
            return None;
        }
        let nanos = u32::try_from(self.nanos).ok()?;
        DateTime::from_timestamp(self.seconds, nanos)
            .map(|utc| utc.with_timezone(&Local).fixed_offset())
    }
}

impl From<DateTimeWithTimeZone> for Timestamp {
    fn from(dt: DateTimeWithTimeZone) -> Self {
        Self { seconds: dt.timestamp(), nanos: dt.timestamp_subsec_nanos() as i32 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetByIdRequest {
    pub id: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteByIdRequest {
    pub id: i32,
}

/// Successful delete. Failures travel as a transport status instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {}

// ---------- Animal ----------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimalProto {
    pub id: i32,
    pub registration_number: String,
    pub weight: f64,
    pub origin: String,
    pub arrival_time: Option<Timestamp>,
}

impl From<animal::Model> for AnimalProto {
    fn from(m: animal::Model) -> Self {
        Self {
            id: m.id,
            registration_number: m.registration_number,
            weight: m.weight,
            origin: m.origin,
            arrival_time: Some(m.arrival_time.into()),
        }
    }
}

/// A supplied arrival time that does not name a valid instant is rejected,
/// never replaced.
impl TryFrom<AnimalProto> for NewAnimal {
    type Error = Status;

    fn try_from(p: AnimalProto) -> Result<Self, Status> {
        let arrival_time = match p.arrival_time {
            Some(ts) => Some(ts.to_datetime().ok_or_else(|| {
                Status::invalid_argument(format!(
                    "invalid arrival_time: seconds={} nanos={}",
                    ts.seconds, ts.nanos
                ))
            })?),
            None => None,
        };
        Ok(Self {
            registration_number: p.registration_number,
            weight: p.weight,
            origin: p.origin,
            arrival_time,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateAnimalRequest {
    pub animal: Option<AnimalProto>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateAnimalResponse {
    pub animal: Option<AnimalProto>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListAnimalsResponse {
    pub animals: Vec<AnimalProto>,
}

// ---------- AnimalPart ----------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimalPartProto {
    pub id: i32,
    pub animal_id: i32,
    pub part_type: String,
    pub weight: f64,
}

impl From<animal_part::Model> for AnimalPartProto {
    fn from(m: animal_part::Model) -> Self {
        Self { id: m.id, animal_id: m.animal_id, part_type: m.part_type, weight: m.weight }
    }
}

impl From<AnimalPartProto> for NewAnimalPart {
    fn from(p: AnimalPartProto) -> Self {
        Self { animal_id: p.animal_id, part_type: p.part_type, weight: p.weight }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateAnimalPartRequest {
    pub part: Option<AnimalPartProto>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateAnimalPartResponse {
    pub part: Option<AnimalPartProto>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListAnimalPartsResponse {
    pub parts: Vec<AnimalPartProto>,
}

// ---------- Product ----------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductProto {
    pub id: i32,
    pub name: String,
    pub description: String,
}

impl From<product::Model> for ProductProto {
    fn from(m: product::Model) -> Self {
        Self { id: m.id, name: m.name, description: m.description }
    }
}

impl From<ProductProto> for NewProduct {
    fn from(p: ProductProto) -> Self {
        Self { name: p.name, description: p.description }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub product: Option<ProductProto>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProductResponse {
    pub product: Option<ProductProto>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListProductsResponse {
    pub products: Vec<ProductProto>,
}

// ---------- ProductToPart ----------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductToPartProto {
    pub id: i32,
    pub product_id: i32,
    pub part_id: i32,
    pub quantity: i32,
}

impl From<product_to_part::Model> for ProductToPartProto {
    fn from(m: product_to_part::Model) -> Self {
        Self { id: m.id, product_id: m.product_id, part_id: m.part_id, quantity: m.quantity }
    }
}

impl From<ProductToPartProto> for NewMapping {
    fn from(p: ProductToPartProto) -> Self {
        Self { product_id: p.product_id, part_id: p.part_id, quantity: p.quantity }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProductToPartRequest {
    pub mapping: Option<ProductToPartProto>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProductToPartResponse {
    pub mapping: Option<ProductToPartProto>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListProductToPartResponse {
    pub mappings: Vec<ProductToPartProto>,
}

// ---------- Tray ----------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrayProto {
    pub id: i32,
    pub part_type: String,
    pub max_weight: f64,
}

impl From<tray::Model> for TrayProto {
    fn from(m: tray::Model) -> Self {
        Self { id: m.id, part_type: m.part_type, max_weight: m.max_weight }
    }
}

impl From<TrayProto> for NewTray {
    fn from(p: TrayProto) -> Self {
        Self { part_type: p.part_type, max_weight: p.max_weight }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateTrayRequest {
    pub tray: Option<TrayProto>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateTrayResponse {
    pub tray: Option<TrayProto>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListTraysResponse {
    pub trays: Vec<TrayProto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    #[test]
    fn timestamp_keeps_the_instant() -> anyhow::Result<()> {
        let dt = FixedOffset::east_opt(3600)
            .and_then(|tz| tz.with_ymd_and_hms(2024, 3, 5, 8, 15, 0).single())
            .ok_or_else(|| anyhow::anyhow!("fixture"))?;
        let ts = Timestamp::from(dt);
        assert_eq!(ts.seconds, 1_709_622_900);
        assert_eq!(ts.nanos, 0);
        assert_eq!(ts.to_datetime(), Some(dt));
        Ok(())
    }

    #[test]
    fn out_of_range_parts_are_rejected() {
        assert_eq!(Timestamp { seconds: 0, nanos: -1 }.to_datetime(), None);
        assert_eq!(Timestamp { seconds: 0, nanos: NANOS_PER_SECOND }.to_datetime(), None);
        assert_eq!(Timestamp { seconds: i64::MAX, nanos: 0 }.to_datetime(), None);
        assert!(Timestamp { seconds: 0, nanos: NANOS_PER_SECOND - 1 }.to_datetime().is_some());
    }

    #[test]
    fn invalid_arrival_time_fails_conversion() {
        let proto = AnimalProto {
            registration_number: "DK-1".into(),
            arrival_time: Some(Timestamp { seconds: 0, nanos: -5 }),
            ..Default::default()
        };
        let err = NewAnimal::try_from(proto).unwrap_err();
        assert_eq!(err.code(), tonic::Code::InvalidArgument);
    }
}
