//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::customer::Customer;
use crate::domain::establishment::Establishment;
use crate::domain::purchase::Purchase;
use crate::domain::types::{CustomerId, EstablishmentId, PurchaseId};
use crate::repository::errors::ApiResult;
use crate::repository::{
    CustomerReader, CustomerWriter, EstablishmentReader, EstablishmentWriter, PurchaseReader,
    PurchaseWriter,
};

mock! {
    pub Repository {}

    #[async_trait]
    impl CustomerReader for Repository {
        async fn list_customers(&self) -> ApiResult<Vec<Customer>>;
    }

    #[async_trait]
    impl CustomerWriter for Repository {
        async fn create_customer(&self, customer: &Customer) -> ApiResult<()>;
        async fn update_customer(&self, id: CustomerId, customer: &Customer) -> ApiResult<()>;
    }

    #[async_trait]
    impl EstablishmentReader for Repository {
        async fn list_establishments(&self) -> ApiResult<Vec<Establishment>>;
    }

    #[async_trait]
    impl EstablishmentWriter for Repository {
        async fn create_establishment(&self, establishment: &Establishment) -> ApiResult<()>;
        async fn update_establishment(
            &self,
            id: EstablishmentId,
            establishment: &Establishment,
        ) -> ApiResult<()>;
    }

    #[async_trait]
    impl PurchaseReader for Repository {
        async fn list_purchases(&self) -> ApiResult<Vec<Purchase>>;
    }

    #[async_trait]
    impl PurchaseWriter for Repository {
        async fn create_purchase(&self, purchase: &Purchase) -> ApiResult<()>;
        async fn update_purchase(&self, id: PurchaseId, purchase: &Purchase) -> ApiResult<()>;
    }
}
