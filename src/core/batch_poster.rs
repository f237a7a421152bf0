//! Transactional posting of journal entries
//!
//! Entries are submitted one at a time. The first failure stops the loop,
//! voids every entry already accepted in this run, and surfaces as a terminal
//! `Posting` error:
//!
//! ```text
//! Pending → Posting(i) → AllPosted
//!                      ↘ Compensating → Voided + Failed
//! ```
//!
//! A submission fails when the transport errors, the service answers with a
//! `ValidationException` or a non-2xx status, or the response lacks the
//! created `ManualJournalID`. There are no retries.

use crate::core::posted_batch::PostedBatch;
use crate::core::traits::RemoteService;
use crate::types::{Entry, EntityType, UploadError};
use serde_json::Value;

const ENTITY: EntityType = EntityType::ManualJournals;

/// Posts entries through a [`RemoteService`]
pub struct BatchPoster<'a, S: RemoteService + ?Sized> {
    service: &'a mut S,
}

impl<'a, S: RemoteService + ?Sized> BatchPoster<'a, S> {
    pub fn new(service: &'a mut S) -> Self {
        BatchPoster { service }
    }

    /// Post every entry, or none
    ///
    /// # Returns
    ///
    /// The identifiers assigned to the entries, in entry order.
    ///
    /// # Errors
    ///
    /// `Posting` after the already-posted entries have been voided. Entries
    /// after the failing one are never submitted.
    pub fn post(&mut self, entries: &[Entry]) -> Result<Vec<String>, UploadError> {
        let mut posted = PostedBatch::new(ENTITY);

        for entry in entries {
            match self.submit(entry) {
                Ok(id) => {
                    log::info!("Posted Journal Entry {} as {}", entry.narration, id);
                    posted.record(id);
                }
                Err(reason) => {
                    log::error!(
                        "Failure creating entity error=[{}] journal=[{}]",
                        reason,
                        entry.narration
                    );
                    let compensated = posted.compensate(&mut *self.service);
                    return Err(UploadError::posting(
                        ENTITY.endpoint(),
                        &entry.narration,
                        reason,
                        compensated,
                    ));
                }
            }
        }

        Ok(posted.into_ids())
    }

    /// Submit one entry and extract its identifier
    fn submit(&mut self, entry: &Entry) -> Result<String, String> {
        let payload = serde_json::to_value(entry).map_err(|e| e.to_string())?;
        let response = self
            .service
            .push(ENTITY, &payload)
            .map_err(|e| e.to_string())?;

        if let Some(elements) = response.validation_elements() {
            let elements = Value::Array(elements.clone());
            log::error!("Journal Entry validation error: {}", elements);
            return Err(format!("validation error: {}", elements));
        }

        if !response.is_success() {
            return Err(format!(
                "status {} response=[{}]",
                response.status, response.body
            ));
        }

        response
            .posted_ids(ENTITY)
            .into_iter()
            .next()
            .ok_or_else(|| format!("response missing ManualJournalID: {}", response.body))
    }
}
