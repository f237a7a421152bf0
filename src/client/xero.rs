//! Blocking HTTP client for the Xero accounting API

use crate::client::auth::{refresh_access_token, XERO_TOKEN_URL};
use crate::core::traits::RemoteService;
use crate::types::{Config, EntityType, PushResponse, UploadError};
use reqwest::blocking::{Client, RequestBuilder};
use serde_json::Value;
use std::time::Duration;

/// Base URL of the accounting API
pub const XERO_API_BASE: &str = "https://api.xero.com/api.xro/2.0";

/// Records per page on paged endpoints
pub const PAGE_SIZE: usize = 100;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub struct XeroClient {
    http: Client,
    base_url: String,
    token_url: String,
    tenant_id: String,
    access_token: String,
}

impl XeroClient {
    /// Client against the production endpoints
    pub fn new(config: &Config) -> Result<Self, UploadError> {
        Self::with_urls(config, XERO_API_BASE.to_string(), XERO_TOKEN_URL.to_string())
    }

    pub fn with_urls(
        config: &Config,
        base_url: String,
        token_url: String,
    ) -> Result<Self, UploadError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(XeroClient {
            http,
            base_url,
            token_url,
            tenant_id: config.tenant_id.clone(),
            access_token: config.access_token.clone().unwrap_or_default(),
        })
    }

    /// Refresh the access token and store the new tokens in `config`
    ///
    /// The caller is responsible for persisting `config`; the previous
    /// refresh token is no longer valid once a rotated one is issued.
    pub fn refresh_credentials(&mut self, config: &mut Config) -> Result<(), UploadError> {
        let grant = refresh_access_token(&self.http, &self.token_url, config)?;

        self.access_token = grant.access_token.clone();
        config.access_token = Some(grant.access_token);
        if let Some(refresh_token) = grant.refresh_token {
            config.refresh_token = refresh_token;
        }
        Ok(())
    }

    fn endpoint_url(&self, entity: EntityType) -> String {
        format!("{}/{}", self.base_url, entity.endpoint())
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.access_token)
            .header("Xero-tenant-id", &self.tenant_id)
            .header("Accept", "application/json")
    }

    /// Fetch one page (or the whole list for non-paged entities)
    fn fetch_page(&self, entity: EntityType, page: Option<usize>) -> Result<Vec<Value>, UploadError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(filter) = entity.active_filter() {
            query.push(("where", filter.to_string()));
        }
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }

        let response = self
            .authorized(self.http.get(self.endpoint_url(entity)))
            .query(&query)
            .send()?;

        let status = response.status().as_u16();
        if status == 401 || status == 403 {
            return Err(UploadError::authentication(format!(
                "{} fetch returned status {}",
                entity, status
            )));
        }
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            return Err(UploadError::Http {
                message: format!("{} fetch returned status {}: {}", entity, status, body),
            });
        }

        let body: Value = response.json()?;
        Ok(body[entity.endpoint()].as_array().cloned().unwrap_or_default())
    }
}

impl RemoteService for XeroClient {
    fn filter(&mut self, entity: EntityType) -> Result<Vec<Value>, UploadError> {
        if !entity.is_paged() {
            return self.fetch_page(entity, None);
        }

        let mut all = Vec::new();
        let mut page = 1;
        loop {
            let records = self.fetch_page(entity, Some(page))?;
            let count = records.len();
            log::debug!("{} page {}: {} results", entity, page, count);

            all.extend(records);
            if count < PAGE_SIZE {
                break;
            }
            page += 1;
        }
        Ok(all)
    }

    fn push(&mut self, entity: EntityType, record: &Value) -> Result<PushResponse, UploadError> {
        let response = self
            .authorized(self.http.post(self.endpoint_url(entity)))
            .json(record)
            .send()?;

        let status = response.status().as_u16();
        let text = response.text()?;
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Ok(PushResponse::new(status, body))
    }
}
