//! End-to-end integration tests
//!
//! These tests drive the complete upload pipeline over predefined fixtures.
//! Each test:
//! 1. Points the config's `input_path` at a fixture directory holding
//!    `JournalEntries.csv` and/or `Transactions.json`
//! 2. Runs the pipeline against an in-memory service seeded from
//!    `tests/fixtures/reference.json`
//! 3. Compares every submitted record, the run result and the diagnostic file
//!    with the fixture's `expected.json`
//!
//! The in-memory service rejects any record whose `Narration` or `Reference`
//! contains `REJECT` with a `ValidationException`, and otherwise assigns
//! `"{Entity}-{n}"` identifiers where `n` counts pushes from 1.
//!
//! Fixtures cover:
//! - Happy path for both journals and bank transactions
//! - Unresolvable account references (nothing is posted)
//! - A rejected journal entry (earlier entries are voided)
//! - A rejected bank transaction (earlier transactions are deleted)

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::{json, Value};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use xero_uploader::pipeline::upload;
    use xero_uploader::{Config, EntityType, PushResponse, RemoteService, UploadError};

    /// Service double backed by the shared reference fixture
    struct FixtureService {
        reference: Value,
        pushes: Vec<Value>,
    }

    impl FixtureService {
        fn load() -> Self {
            let path = fixtures_dir().join("reference.json");
            let text = fs::read_to_string(&path)
                .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
            FixtureService {
                reference: serde_json::from_str(&text).unwrap(),
                pushes: Vec::new(),
            }
        }

        fn is_rejected(record: &Value) -> bool {
            ["Narration", "Reference"].iter().any(|field| {
                record
                    .get(*field)
                    .and_then(Value::as_str)
                    .is_some_and(|value| value.contains("REJECT"))
            })
        }
    }

    impl RemoteService for FixtureService {
        fn filter(&mut self, entity: EntityType) -> Result<Vec<Value>, UploadError> {
            Ok(self.reference[entity.endpoint()]
                .as_array()
                .cloned()
                .unwrap_or_default())
        }

        fn push(&mut self, entity: EntityType, record: &Value) -> Result<PushResponse, UploadError> {
            self.pushes
                .push(json!({"entity": entity.endpoint(), "record": record}));

            if Self::is_rejected(record) {
                return Ok(PushResponse::new(
                    400,
                    json!({
                        "Type": "ValidationException",
                        "Message": "A validation exception occurred",
                        "Elements": [{"ValidationErrors": [{"Message": "Rejected by fixture"}]}]
                    }),
                ));
            }

            let id = format!("{}-{}", entity, self.pushes.len());
            Ok(PushResponse::new(
                200,
                json!({ entity.endpoint(): [{ entity.id_field(): id }] }),
            ))
        }
    }

    fn fixtures_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
    }

    fn config(input_path: &Path, log_file: &Path) -> Config {
        serde_json::from_value(json!({
            "client_id": "cid",
            "client_secret": "csec",
            "refresh_token": "rt",
            "tenant_id": "tenant",
            "input_path": input_path,
            "log_file": log_file
        }))
        .unwrap()
    }

    /// Run a fixture through the pipeline and compare with expected.json
    ///
    /// # Panics
    ///
    /// Panics if the fixture cannot be read or any observed behaviour differs
    /// from `expected.json`.
    fn run_test_fixture(fixture_name: &str) {
        let fixture_dir = fixtures_dir().join(fixture_name);
        let expected_path = fixture_dir.join("expected.json");
        assert!(
            expected_path.exists(),
            "Expected file not found: {}",
            expected_path.display()
        );
        let expected: Value =
            serde_json::from_str(&fs::read_to_string(&expected_path).unwrap()).unwrap();

        let log_dir = TempDir::new().expect("Failed to create temp dir");
        let log_file = log_dir.path().join("error_log.json");
        let config = config(&fixture_dir, &log_file);
        let mut service = FixtureService::load();

        let result = upload(&config, &mut service);

        match (&result, expected["error"].as_str()) {
            (Ok(summary), None) => {
                let actual = json!({
                    "journals_posted": summary.journals_posted(),
                    "transactions_posted": summary.transactions_posted(),
                    "rolled_back": summary.rolled_back()
                });
                assert_eq!(
                    actual, expected["summary"],
                    "Summary mismatch for fixture: {}",
                    fixture_name
                );
            }
            (Err(e), Some(message)) => {
                assert_eq!(e.to_string(), message, "Error mismatch for fixture: {}", fixture_name);
            }
            (actual, _) => panic!(
                "Unexpected result for fixture {}: {:?}",
                fixture_name, actual
            ),
        }

        assert_eq!(
            Value::Array(service.pushes.clone()),
            expected["pushes"],
            "\n\nPush mismatch for fixture: {}\n\nActual pushes:\n{}\n",
            fixture_name,
            serde_json::to_string_pretty(&service.pushes).unwrap()
        );

        let diagnostics = fs::read_to_string(&log_file)
            .map(|text| serde_json::from_str::<Value>(&text).unwrap())
            .unwrap_or(Value::Null);
        assert_eq!(
            diagnostics, expected["diagnostics"],
            "Diagnostics mismatch for fixture: {}",
            fixture_name
        );
    }

    #[rstest]
    #[case("happy_path")]
    #[case("unresolved_account")]
    #[case("posting_failure")]
    #[case("transactions_rollback")]
    fn test_fixtures(#[case] fixture: &str) {
        run_test_fixture(fixture);
    }
}
