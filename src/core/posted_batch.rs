//! Identifiers accepted during one posting run
//!
//! A `PostedBatch` lives for exactly one posting loop. It only grows while the
//! loop succeeds; on failure it is consumed by [`PostedBatch::compensate`],
//! which reverses every posted record in posting order.

use crate::core::traits::RemoteService;
use crate::types::EntityType;
use serde_json::{json, Value};

/// Ordered identifiers of records accepted so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedBatch {
    entity: EntityType,
    ids: Vec<String>,
}

impl PostedBatch {
    pub fn new(entity: EntityType) -> Self {
        PostedBatch {
            entity,
            ids: Vec::new(),
        }
    }

    pub fn record(&mut self, id: String) {
        self.ids.push(id);
    }

    pub fn into_ids(self) -> Vec<String> {
        self.ids
    }

    /// Payload that reverses one posted record
    ///
    /// Manual journals are voided; everything else is deleted.
    pub fn compensation_payload(entity: EntityType, id: &str) -> Value {
        let status = match entity {
            EntityType::ManualJournals => "VOIDED",
            _ => "DELETED",
        };
        json!({ entity.id_field(): id, "Status": status })
    }

    /// Reverse every posted record, best effort
    ///
    /// Failures are logged and never retried or escalated. Returns the number
    /// of compensating calls issued.
    pub fn compensate<S: RemoteService + ?Sized>(self, service: &mut S) -> usize {
        let entity = self.entity;
        let mut issued = 0;

        for id in self.ids {
            let payload = Self::compensation_payload(entity, &id);
            issued += 1;

            match service.push(entity, &payload) {
                Ok(response) if response.is_success() => {
                    log::info!("Reversed {} {}", entity, id);
                }
                Ok(response) => {
                    log::error!(
                        "Failed to reverse {} {}: status {} response=[{}]",
                        entity,
                        id,
                        response.status,
                        response.body
                    );
                }
                Err(e) => {
                    log::error!("Failed to reverse {} {}: {}", entity, id, e);
                }
            }
        }

        issued
    }
}
