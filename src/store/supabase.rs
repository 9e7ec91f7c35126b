use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::config::SupabaseConfig;
use crate::error::{AppError, AppResult};

/// Typed gateway to the hosted record store, speaking its PostgREST
/// dialect: equality filters on indexed columns, `order=created_at.desc`
/// by convention, single-row writes keyed by id. Failures surface as
/// [`AppError::StoreError`]; callers never retry automatically.
#[derive(Clone)]
pub struct SupabaseStore {
    client: Client,
    config: SupabaseConfig,
}

impl SupabaseStore {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn rest_url(&self, collection: &str) -> String {
        format!("{}/rest/v1/{}", self.config.base_url, collection)
    }

    /// `select * where col = value [and ...] order by created_at desc`.
    pub async fn list<T: DeserializeOwned>(
        &self,
        collection: &str,
        filters: &[(&str, String)],
    ) -> AppResult<Vec<T>> {
        let mut query: Vec<(String, String)> = vec![
            ("select".to_string(), "*".to_string()),
            ("order".to_string(), "created_at.desc".to_string()),
        ];
        for (col, value) in filters {
            query.push((col.to_string(), format!("eq.{value}")));
        }

        let response = self
            .client
            .get(self.rest_url(collection))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .query(&query)
            .send()
            .await?;

        let response = Self::check(collection, response).await?;
        Ok(response.json().await?)
    }

    /// Raw body of a list, used by the change feed for snapshot digests.
    pub async fn list_raw(
        &self,
        collection: &str,
        filters: &[(&str, String)],
    ) -> AppResult<String> {
        let mut query: Vec<(String, String)> = vec![
            ("select".to_string(), "*".to_string()),
            ("order".to_string(), "created_at.desc".to_string()),
        ];
        for (col, value) in filters {
            query.push((col.to_string(), format!("eq.{value}")));
        }

        let response = self
            .client
            .get(self.rest_url(collection))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .query(&query)
            .send()
            .await?;

        let response = Self::check(collection, response).await?;
        Ok(response.text().await?)
    }

    /// Insert one row; the store assigns the identifier. Returns the full
    /// representation, ids included.
    pub async fn insert<R: DeserializeOwned>(
        &self,
        collection: &str,
        row: &impl Serialize,
    ) -> AppResult<R> {
        let response = self
            .client
            .post(self.rest_url(collection))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .header("Prefer", "return=representation")
            .header("Accept", "application/vnd.pgrst.object+json")
            .json(row)
            .send()
            .await?;

        let response = Self::check(collection, response).await?;
        Ok(response.json().await?)
    }

    /// Partial update of one row by id. Last write wins.
    pub async fn update(
        &self,
        collection: &str,
        id: Uuid,
        patch: &serde_json::Value,
    ) -> AppResult<()> {
        let response = self
            .client
            .patch(self.rest_url(collection))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .query(&[("id", format!("eq.{id}"))])
            .json(patch)
            .send()
            .await?;

        Self::check(collection, response).await?;
        Ok(())
    }

    pub async fn delete(&self, collection: &str, id: Uuid) -> AppResult<()> {
        let response = self
            .client
            .delete(self.rest_url(collection))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;

        Self::check(collection, response).await?;
        Ok(())
    }

    async fn check(
        collection: &str,
        response: reqwest::Response,
    ) -> AppResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::StoreError(format!(
            "{collection}: store responded {status}: {body}"
        )))
    }
}
