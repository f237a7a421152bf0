//! Core trait for talking to the remote accounting service
//!
//! The conversion and posting logic only depends on this trait, so the HTTP
//! client can be swapped for an in-memory double in tests.

use crate::types::{EntityType, PushResponse, UploadError};
use serde_json::Value;

/// Reference fetch and record submission
///
/// Implementations block until the remote call completes. Pagination, auth
/// headers and token handling are the implementation's concern.
pub trait RemoteService {
    /// Fetch every active record of an entity type
    fn filter(&mut self, entity: EntityType) -> Result<Vec<Value>, UploadError>;

    /// Submit one record
    ///
    /// Returns `Err` only when no response was obtained. A rejection by the
    /// service is an `Ok` response with a failing status.
    fn push(&mut self, entity: EntityType, record: &Value) -> Result<PushResponse, UploadError>;
}

impl<S: RemoteService + ?Sized> RemoteService for &mut S {
    fn filter(&mut self, entity: EntityType) -> Result<Vec<Value>, UploadError> {
        (**self).filter(entity)
    }

    fn push(&mut self, entity: EntityType, record: &Value) -> Result<PushResponse, UploadError> {
        (**self).push(entity, record)
    }
}
