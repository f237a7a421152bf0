//! Types at the boundary with the remote accounting service

use serde_json::Value;
use std::fmt;

/// Entity types the uploader reads or writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Accounts,
    TrackingCategories,
    Contacts,
    ManualJournals,
    BankTransactions,
}

impl EntityType {
    /// Endpoint name; also the key the service nests results under
    pub fn endpoint(self) -> &'static str {
        match self {
            EntityType::Accounts => "Accounts",
            EntityType::TrackingCategories => "TrackingCategories",
            EntityType::Contacts => "Contacts",
            EntityType::ManualJournals => "ManualJournals",
            EntityType::BankTransactions => "BankTransactions",
        }
    }

    /// Whether the endpoint honours the `page` parameter
    ///
    /// Non-paged endpoints ignore it and return everything on every page.
    pub fn is_paged(self) -> bool {
        matches!(self, EntityType::Contacts | EntityType::BankTransactions)
    }

    /// `where` clause restricting a fetch to active records
    pub fn active_filter(self) -> Option<&'static str> {
        match self {
            EntityType::Accounts => Some("Status==\"ACTIVE\""),
            EntityType::Contacts => Some("ContactStatus==\"ACTIVE\""),
            _ => None,
        }
    }

    /// Field carrying the service-assigned identifier of a posted record
    pub fn id_field(self) -> &'static str {
        match self {
            EntityType::Accounts => "AccountID",
            EntityType::TrackingCategories => "TrackingCategoryID",
            EntityType::Contacts => "ContactID",
            EntityType::ManualJournals => "ManualJournalID",
            EntityType::BankTransactions => "BankTransactionID",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

/// Response to a single push
#[derive(Debug, Clone, PartialEq)]
pub struct PushResponse {
    pub status: u16,
    /// Parsed JSON body; non-JSON bodies are kept as a string value
    pub body: Value,
}

impl PushResponse {
    pub fn new(status: u16, body: Value) -> Self {
        PushResponse { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Field-level errors when the body is a `ValidationException`
    pub fn validation_elements(&self) -> Option<&Vec<Value>> {
        if self.body.get("Type").and_then(Value::as_str) != Some("ValidationException") {
            return None;
        }
        self.body.get("Elements").and_then(Value::as_array)
    }

    /// Identifiers of the records the service created, in response order
    pub fn posted_ids(&self, entity: EntityType) -> Vec<String> {
        self.body
            .get(entity.endpoint())
            .and_then(Value::as_array)
            .map(|records| {
                records
                    .iter()
                    .filter_map(|record| record.get(entity.id_field()))
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::ok(200, true)]
    #[case::created(201, true)]
    #[case::redirect(300, false)]
    #[case::bad_request(400, false)]
    #[case::server_error(500, false)]
    fn test_is_success(#[case] status: u16, #[case] expected: bool) {
        assert_eq!(PushResponse::new(status, Value::Null).is_success(), expected);
    }

    #[test]
    fn test_validation_elements() {
        let response = PushResponse::new(
            400,
            json!({"Type": "ValidationException", "Elements": [{"ValidationErrors": []}]}),
        );
        assert_eq!(response.validation_elements().map(Vec::len), Some(1));

        let other = PushResponse::new(400, json!({"Type": "Other", "Elements": []}));
        assert!(other.validation_elements().is_none());
    }

    #[test]
    fn test_posted_ids() {
        let response = PushResponse::new(
            200,
            json!({"ManualJournals": [{"ManualJournalID": "mj-1"}, {"Narration": "no id"}]}),
        );
        assert_eq!(response.posted_ids(EntityType::ManualJournals), vec!["mj-1"]);
        assert!(response.posted_ids(EntityType::BankTransactions).is_empty());
    }
}
