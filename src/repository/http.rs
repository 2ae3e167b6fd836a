//! reqwest based implementation of the repository traits.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::customer::Customer;
use crate::domain::establishment::Establishment;
use crate::domain::purchase::Purchase;
use crate::domain::types::{CustomerId, EstablishmentId, PurchaseId};
use crate::repository::errors::{ApiError, ApiResult};
use crate::repository::{
    CustomerReader, CustomerWriter, EstablishmentReader, EstablishmentWriter, PurchaseReader,
    PurchaseWriter,
};

const CUSTOMERS: &str = "clients";
const CUSTOMERS_LIST: &str = "clients/all";
const ESTABLISHMENTS: &str = "establishments";
const ESTABLISHMENTS_LIST: &str = "establishments/list";
const PURCHASES: &str = "purchases";
const PURCHASES_LIST: &str = "purchases";

/// Optional JSON error payload returned by the API.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Client for the loyalty REST API. Cheap to clone; clones share the
/// connection pool.
#[derive(Debug, Clone)]
pub struct HttpRepository {
    client: Client,
    base_url: String,
}

impl HttpRepository {
    /// Builds a client for `base_url`. Requests never time out unless
    /// `timeout` is given.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> ApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        let response = Self::check_status(response).await?;
        response.json().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send<B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ApiResult<()> {
        let response = self
            .client
            .request(method, self.url(path))
            .json(body)
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Turns non-success responses into [`ApiError::Status`], keeping the
    /// server's `message` when the body carries one.
    async fn check_status(response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
        log::warn!("API error {status}: {text}");

        Err(ApiError::Status {
            status,
            message: body.message,
        })
    }
}

#[async_trait]
impl CustomerReader for HttpRepository {
    async fn list_customers(&self) -> ApiResult<Vec<Customer>> {
        self.get(CUSTOMERS_LIST).await
    }
}

#[async_trait]
impl CustomerWriter for HttpRepository {
    async fn create_customer(&self, customer: &Customer) -> ApiResult<()> {
        self.send(Method::POST, CUSTOMERS, customer).await
    }

    async fn update_customer(&self, id: CustomerId, customer: &Customer) -> ApiResult<()> {
        self.send(Method::PUT, &format!("{CUSTOMERS}/{id}"), customer)
            .await
    }
}

#[async_trait]
impl EstablishmentReader for HttpRepository {
    async fn list_establishments(&self) -> ApiResult<Vec<Establishment>> {
        self.get(ESTABLISHMENTS_LIST).await
    }
}

#[async_trait]
impl EstablishmentWriter for HttpRepository {
    async fn create_establishment(&self, establishment: &Establishment) -> ApiResult<()> {
        self.send(Method::POST, ESTABLISHMENTS, establishment).await
    }

    async fn update_establishment(
        &self,
        id: EstablishmentId,
        establishment: &Establishment,
    ) -> ApiResult<()> {
        self.send(Method::PUT, &format!("{ESTABLISHMENTS}/{id}"), establishment)
            .await
    }
}

#[async_trait]
impl PurchaseReader for HttpRepository {
    async fn list_purchases(&self) -> ApiResult<Vec<Purchase>> {
        self.get(PURCHASES_LIST).await
    }
}

#[async_trait]
impl PurchaseWriter for HttpRepository {
    async fn create_purchase(&self, purchase: &Purchase) -> ApiResult<()> {
        self.send(Method::POST, PURCHASES, purchase).await
    }

    async fn update_purchase(&self, id: PurchaseId, purchase: &Purchase) -> ApiResult<()> {
        self.send(Method::PUT, &format!("{PURCHASES}/{id}"), purchase)
            .await
    }
}
