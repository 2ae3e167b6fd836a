//! Access to the loyalty REST API.
//!
//! Services depend on the reader/writer traits below; [`HttpRepository`] is
//! the production implementation and `mock::MockRepository` replaces it in
//! service tests.

use async_trait::async_trait;

use crate::domain::customer::Customer;
use crate::domain::establishment::Establishment;
use crate::domain::purchase::Purchase;
use crate::domain::types::{CustomerId, EstablishmentId, PurchaseId};
use crate::repository::errors::ApiResult;

pub mod errors;
pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;

pub use http::HttpRepository;

#[async_trait]
pub trait CustomerReader {
    async fn list_customers(&self) -> ApiResult<Vec<Customer>>;
}

#[async_trait]
pub trait CustomerWriter {
    async fn create_customer(&self, customer: &Customer) -> ApiResult<()>;
    async fn update_customer(&self, id: CustomerId, customer: &Customer) -> ApiResult<()>;
}

#[async_trait]
pub trait EstablishmentReader {
    async fn list_establishments(&self) -> ApiResult<Vec<Establishment>>;
}

#[async_trait]
pub trait EstablishmentWriter {
    async fn create_establishment(&self, establishment: &Establishment) -> ApiResult<()>;
    async fn update_establishment(
        &self,
        id: EstablishmentId,
        establishment: &Establishment,
    ) -> ApiResult<()>;
}

#[async_trait]
pub trait PurchaseReader {
    async fn list_purchases(&self) -> ApiResult<Vec<Purchase>>;
}

#[async_trait]
pub trait PurchaseWriter {
    async fn create_purchase(&self, purchase: &Purchase) -> ApiResult<()>;
    async fn update_purchase(&self, id: PurchaseId, purchase: &Purchase) -> ApiResult<()>;
}

/// Everything the visualization view needs to load the ledger.
pub trait LedgerReader: CustomerReader + EstablishmentReader + PurchaseReader {}

impl<T> LedgerReader for T where T: CustomerReader + EstablishmentReader + PurchaseReader {}

/// Everything needed to create or replace any record kind.
pub trait RecordWriter: CustomerWriter + EstablishmentWriter + PurchaseWriter {}

impl<T> RecordWriter for T where T: CustomerWriter + EstablishmentWriter + PurchaseWriter {}
