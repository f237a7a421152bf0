//! In-memory `RemoteService` for unit tests

use crate::core::traits::RemoteService;
use crate::types::{EntityType, PushResponse, UploadError};
use serde_json::{json, Value};
use std::collections::HashMap;

type Responder = Box<dyn FnMut(EntityType, &Value, usize) -> Result<PushResponse, UploadError>>;

/// Records every push and answers with a scripted responder
///
/// The default responder accepts everything and assigns `"{Entity}-{n}"`
/// identifiers, where `n` counts pushes from 1.
pub struct MockService {
    records: HashMap<EntityType, Vec<Value>>,
    pub pushes: Vec<(EntityType, Value)>,
    responder: Responder,
}

impl MockService {
    pub fn new() -> Self {
        MockService {
            records: HashMap::new(),
            pushes: Vec::new(),
            responder: Box::new(|entity, _, n| Ok(Self::created(entity, n))),
        }
    }

    pub fn with_records(mut self, entity: EntityType, records: Vec<Value>) -> Self {
        self.records.insert(entity, records);
        self
    }

    pub fn respond_with<F>(mut self, responder: F) -> Self
    where
        F: FnMut(EntityType, &Value, usize) -> Result<PushResponse, UploadError> + 'static,
    {
        self.responder = Box::new(responder);
        self
    }

    /// Successful response carrying one created record
    pub fn created(entity: EntityType, n: usize) -> PushResponse {
        let mut record = serde_json::Map::new();
        record.insert(
            entity.id_field().to_string(),
            json!(format!("{}-{}", entity, n)),
        );
        PushResponse::new(200, json!({ entity.endpoint(): [record] }))
    }

    /// Pushes of one entity type, in order
    pub fn pushed(&self, entity: EntityType) -> Vec<&Value> {
        self.pushes
            .iter()
            .filter(|(e, _)| *e == entity)
            .map(|(_, record)| record)
            .collect()
    }
}

impl RemoteService for MockService {
    fn filter(&mut self, entity: EntityType) -> Result<Vec<Value>, UploadError> {
        Ok(self.records.get(&entity).cloned().unwrap_or_default())
    }

    fn push(&mut self, entity: EntityType, record: &Value) -> Result<PushResponse, UploadError> {
        self.pushes.push((entity, record.clone()));
        let n = self.pushes.len();
        (self.responder)(entity, record, n)
    }
}
