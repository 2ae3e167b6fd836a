//! Dispatch of create and replace requests over the record kinds.

use futures::join;

use crate::domain::record::{Record, RecordKind};
use crate::forms::fields::ChoiceLists;
use crate::repository::errors::{ApiError, ApiResult};
use crate::repository::{CustomerReader, EstablishmentReader, RecordWriter};

/// Issues the create request matching the record's kind.
pub async fn create_record<R>(repo: &R, record: &Record) -> ApiResult<()>
where
    R: RecordWriter + ?Sized,
{
    match record {
        Record::Customer(customer) => repo.create_customer(customer).await,
        Record::Establishment(establishment) => repo.create_establishment(establishment).await,
        Record::Purchase(purchase) => repo.create_purchase(purchase).await,
    }
}

/// Replaces the stored record with `record`, addressed by its own id.
pub async fn update_record<R>(repo: &R, record: &Record) -> ApiResult<()>
where
    R: RecordWriter + ?Sized,
{
    match record {
        Record::Customer(customer) => {
            let id = customer.id.ok_or(ApiError::MissingId)?;
            repo.update_customer(id, customer).await
        }
        Record::Establishment(establishment) => {
            let id = establishment.id.ok_or(ApiError::MissingId)?;
            repo.update_establishment(id, establishment).await
        }
        Record::Purchase(purchase) => {
            let id = purchase.id.ok_or(ApiError::MissingId)?;
            repo.update_purchase(id, purchase).await
        }
    }
}

/// Loads the options of the purchase selection inputs.
///
/// Both collections are requested concurrently. A failed request is logged and
/// leaves its list empty.
pub async fn load_choices<R>(repo: &R) -> ChoiceLists
where
    R: CustomerReader + EstablishmentReader + ?Sized,
{
    let (customers, establishments) = join!(repo.list_customers(), repo.list_establishments());

    let customers = customers.unwrap_or_else(|err| {
        log::error!("Failed to load customers: {err}");
        Vec::new()
    });
    let establishments = establishments.unwrap_or_else(|err| {
        log::error!("Failed to load establishments: {err}");
        Vec::new()
    });

    ChoiceLists::from_collections(&customers, &establishments)
}

/// Options needed by a form of `kind`; only purchases have selection inputs.
pub async fn choices_for<R>(repo: &R, kind: RecordKind) -> ChoiceLists
where
    R: CustomerReader + EstablishmentReader + ?Sized,
{
    match kind {
        RecordKind::Purchase => load_choices(repo).await,
        RecordKind::Customer | RecordKind::Establishment => ChoiceLists::default(),
    }
}
