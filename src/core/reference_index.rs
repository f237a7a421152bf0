//! Reference index built from live remote data
//!
//! Two lookups are built once per run:
//! - [`ReferenceIndex`] for journal entries: accounts keyed by code *and* name,
//!   tracking options keyed by option name.
//! - [`TransactionDirectory`] for bank transactions: exact-match lookups over
//!   the fetched account and contact lists.
//!
//! Nothing here is cached across runs.

use crate::core::traits::RemoteService;
use crate::types::reference::parse_records;
use crate::types::{
    AccountRecord, AccountRef, ContactRecord, EntityType, TrackingCategoryRecord, TrackingRef,
    UploadError,
};
use std::collections::HashMap;

const BANK_ACCOUNT_TYPE: &str = "BANK";

/// Lookup maps used to resolve journal line references
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceIndex {
    accounts: HashMap<String, AccountRef>,
    categories: HashMap<String, TrackingRef>,
}

impl ReferenceIndex {
    /// Build the index from typed records
    ///
    /// Accounts without a code cannot be referenced and are skipped. Tracking
    /// option names are assumed unique across categories; on a collision the
    /// category listed last wins.
    pub fn build(accounts: &[AccountRecord], categories: &[TrackingCategoryRecord]) -> Self {
        let mut account_map = HashMap::new();

        for account in accounts {
            let Some(code) = account.code.as_deref() else {
                continue;
            };
            let name = account.name.as_deref().unwrap_or_default();
            let account_ref = AccountRef {
                name: name.to_string(),
                code: code.to_string(),
            };

            account_map.insert(code.to_string(), account_ref.clone());
            if !name.is_empty() {
                account_map.insert(name.to_string(), account_ref);
            }
        }

        let mut category_map = HashMap::new();

        for category in categories {
            let Some(category_name) = category.name.as_deref() else {
                continue;
            };
            for option in &category.options {
                if let Some(option_name) = option.name.as_deref() {
                    category_map.insert(
                        option_name.to_string(),
                        TrackingRef::new(category_name, option_name),
                    );
                }
            }
        }

        ReferenceIndex {
            accounts: account_map,
            categories: category_map,
        }
    }

    /// Fetch accounts and tracking categories and build the index
    pub fn fetch<S: RemoteService + ?Sized>(service: &mut S) -> Result<Self, UploadError> {
        let accounts: Vec<AccountRecord> = parse_records(service.filter(EntityType::Accounts)?);
        let categories: Vec<TrackingCategoryRecord> =
            parse_records(service.filter(EntityType::TrackingCategories)?);

        let index = Self::build(&accounts, &categories);
        log::info!(
            "Indexed {} account keys and {} tracking options",
            index.accounts.len(),
            index.categories.len()
        );
        Ok(index)
    }

    /// Look up an account by code or name
    pub fn account(&self, key: &str) -> Option<&AccountRef> {
        self.accounts.get(key)
    }

    /// Resolve an account by number, falling back to name
    pub fn resolve_account(&self, number: Option<&str>, name: Option<&str>) -> Option<&AccountRef> {
        number
            .and_then(|number| self.account(number))
            .or_else(|| name.and_then(|name| self.account(name)))
    }

    /// Look up a tracking reference by option name
    pub fn tracking(&self, option: &str) -> Option<&TrackingRef> {
        self.categories.get(option)
    }

    pub fn account_keys(&self) -> usize {
        self.accounts.len()
    }

    pub fn tracking_options(&self) -> usize {
        self.categories.len()
    }
}

/// Exact-match lookups for bank transaction references
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionDirectory {
    accounts: Vec<AccountRecord>,
    contacts: Vec<ContactRecord>,
}

impl TransactionDirectory {
    pub fn new(accounts: Vec<AccountRecord>, contacts: Vec<ContactRecord>) -> Self {
        TransactionDirectory { accounts, contacts }
    }

    /// Fetch accounts and contacts
    pub fn fetch<S: RemoteService + ?Sized>(service: &mut S) -> Result<Self, UploadError> {
        let accounts = parse_records(service.filter(EntityType::Accounts)?);
        let contacts = parse_records(service.filter(EntityType::Contacts)?);
        Ok(Self::new(accounts, contacts))
    }

    /// Account id of the first bank-type account with this exact name
    pub fn bank_account_id(&self, name: &str) -> Option<&str> {
        self.accounts.iter().find_map(|account| {
            let is_bank = account.account_type.as_deref() == Some(BANK_ACCOUNT_TYPE);
            if is_bank && account.name.as_deref() == Some(name) {
                account.account_id.as_deref()
            } else {
                None
            }
        })
    }

    /// Code of the first account with this exact name
    pub fn account_code(&self, name: &str) -> Option<&str> {
        self.accounts
            .iter()
            .filter(|account| account.name.as_deref() == Some(name))
            .find_map(|account| account.code.as_deref())
    }

    /// Contact id of the first contact with this exact name
    pub fn contact_id(&self, name: &str) -> Option<&str> {
        self.contacts
            .iter()
            .filter(|contact| contact.name.as_deref() == Some(name))
            .find_map(|contact| contact.contact_id.as_deref())
    }
}
