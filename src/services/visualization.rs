//! Services backing the data visualization view.
//!
//! The loaded collections live in a process-wide [`LedgerStore`]. Pages only
//! read from it; the API is contacted on mount, on explicit refresh and after
//! a record was replaced from the edit modal.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use futures::join;

use crate::domain::customer::Customer;
use crate::domain::establishment::Establishment;
use crate::domain::ledger::Ledger;
use crate::domain::purchase::Purchase;
use crate::domain::record::RecordKind;
use crate::dto::visualization::{
    CustomerRow, DashboardPageData, DashboardQuery, EditModalData, EstablishmentRow, PurchaseRow,
    Tab, TabCounts,
};
use crate::forms::edit::EditModal;
use crate::forms::fields::ChoiceLists;
use crate::repository::errors::ApiResult;
use crate::repository::{LedgerReader, RecordWriter};
use crate::services::records::update_record;
use crate::services::{ServiceError, ServiceResult};
use crate::shell::Shell;

#[derive(Debug, Default)]
struct Mounted {
    /// Shell refresh key observed by the last mount.
    refresh_key: Option<u64>,
    ledger: Ledger,
}

/// Single owner of the customer, establishment and purchase collections.
#[derive(Debug, Default)]
pub struct LedgerStore {
    inner: RwLock<Mounted>,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Mounted> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Mounted> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn mounted_key(&self) -> Option<u64> {
        self.read().refresh_key
    }

    /// Runs `f` against the current collections.
    pub fn with_ledger<T>(&self, f: impl FnOnce(&Ledger) -> T) -> T {
        f(&self.read().ledger)
    }

    pub fn snapshot(&self) -> Ledger {
        self.with_ledger(Ledger::clone)
    }
}

/// Outcome of the three concurrent list requests.
#[derive(Debug)]
pub struct Fetched {
    pub customers: ApiResult<Vec<Customer>>,
    pub establishments: ApiResult<Vec<Establishment>>,
    pub purchases: ApiResult<Vec<Purchase>>,
}

impl Fetched {
    /// Replaces every collection whose request succeeded. Failures are logged
    /// and leave the previous contents in place.
    pub fn apply(self, ledger: &mut Ledger) {
        match self.customers {
            Ok(customers) => ledger.customers = customers,
            Err(err) => log::error!("Failed to load customers: {err}"),
        }
        match self.establishments {
            Ok(establishments) => ledger.establishments = establishments,
            Err(err) => log::error!("Failed to load establishments: {err}"),
        }
        match self.purchases {
            Ok(purchases) => ledger.purchases = purchases,
            Err(err) => log::error!("Failed to load purchases: {err}"),
        }
    }
}

/// Requests all three collections concurrently. Each resolves on its own.
pub async fn fetch_all<R>(repo: &R) -> Fetched
where
    R: LedgerReader + ?Sized,
{
    let (customers, establishments, purchases) = join!(
        repo.list_customers(),
        repo.list_establishments(),
        repo.list_purchases()
    );
    Fetched {
        customers,
        establishments,
        purchases,
    }
}

/// Re-fetches the collections into the store.
pub async fn refresh<R>(repo: &R, store: &LedgerStore)
where
    R: LedgerReader + ?Sized,
{
    let fetched = fetch_all(repo).await;
    let mut mounted = store.write();
    fetched.apply(&mut mounted.ledger);
    log::info!(
        "Ledger refreshed: {} customers, {} establishments, {} purchases",
        mounted.ledger.customers.len(),
        mounted.ledger.establishments.len(),
        mounted.ledger.purchases.len()
    );
}

/// Mounts the view: fetches the collections unless the store already holds
/// data for the shell's current refresh key.
pub async fn ensure_mounted<R>(repo: &R, store: &LedgerStore, shell: &Shell)
where
    R: LedgerReader + ?Sized,
{
    let key = shell.refresh_key();
    if store.mounted_key() == Some(key) {
        return;
    }
    log::info!("Mounting visualization view for refresh key {key}");
    refresh(repo, store).await;
    store.write().refresh_key = Some(key);
}

/// Halves round away from zero, so 2.5 points read as 3.
fn points_label(points: f64) -> String {
    format!("{:.0}", points.round())
}

fn amount_label(amount: f64) -> String {
    format!("{:.2}", (amount * 100.0).round() / 100.0)
}

fn customer_rows(ledger: &Ledger, search: &str) -> Vec<CustomerRow> {
    ledger
        .search_customers(search)
        .into_iter()
        .map(|c| CustomerRow {
            id: c.id.map(i32::from),
            name: c.name.clone(),
            email: c.email.clone(),
            phone: c.phone.clone(),
            cpf: c.cpf.clone(),
            points: points_label(c.id.map_or(0.0, |id| ledger.customer_points(id))),
        })
        .collect()
}

fn establishment_rows(ledger: &Ledger, search: &str) -> Vec<EstablishmentRow> {
    ledger
        .search_establishments(search)
        .into_iter()
        .map(|e| EstablishmentRow {
            id: e.id.map(i32::from),
            name: e.name.clone(),
            email: e.email.clone(),
            phone: e.phone.clone(),
            cnpj: e.cnpj.clone(),
            rate: format!("R$ {}/point", e.value_per_point),
        })
        .collect()
}

fn purchase_rows(ledger: &Ledger, search: &str) -> Vec<PurchaseRow> {
    ledger
        .search_purchases(search)
        .into_iter()
        .map(|p| PurchaseRow {
            id: p.id.map(i32::from),
            customer_name: ledger.customer_name(p.client_id),
            establishment_name: ledger.establishment_name(p.establishment_id),
            amount: format!("R$ {}", amount_label(p.amount)),
            points: ledger.displayed_points(p).map(points_label),
            date: p.display_date(),
        })
        .collect()
}

/// Builds the visualization page for the active tab and search term.
///
/// Only the active tab's rows are produced; tab counts always reflect the
/// unfiltered collections.
pub fn dashboard(store: &LedgerStore, query: &DashboardQuery) -> DashboardPageData {
    let tab = query.tab.unwrap_or_default();
    let search = query.search.as_deref().unwrap_or_default().trim().to_string();

    store.with_ledger(|ledger| {
        let counts = TabCounts {
            customers: ledger.customers.len(),
            establishments: ledger.establishments.len(),
            purchases: ledger.purchases.len(),
        };
        let mut page = DashboardPageData {
            tab,
            search,
            counts,
            customers: Vec::new(),
            establishments: Vec::new(),
            purchases: Vec::new(),
            empty_message: None,
        };

        let shown = match tab {
            Tab::Customers => {
                page.customers = customer_rows(ledger, &page.search);
                page.customers.len()
            }
            Tab::Establishments => {
                page.establishments = establishment_rows(ledger, &page.search);
                page.establishments.len()
            }
            Tab::Purchases => {
                page.purchases = purchase_rows(ledger, &page.search);
                page.purchases.len()
            }
        };
        if shown == 0 {
            page.empty_message = Some(tab.empty_message(!page.search.is_empty()));
        }
        page
    })
}

fn modal_data(
    modal: &EditModal,
    choices: &ChoiceLists,
    api_error: Option<String>,
) -> EditModalData {
    EditModalData {
        kind: modal.kind(),
        id: modal.record_id().unwrap_or_default(),
        title: modal.title(),
        fields: modal.view(choices),
        api_error,
    }
}

fn choice_lists(ledger: &Ledger) -> ChoiceLists {
    ChoiceLists::from_collections(&ledger.customers, &ledger.establishments)
}

/// Loads data necessary to render the edit modal body for one record.
pub fn load_edit_modal(
    store: &LedgerStore,
    kind: RecordKind,
    id: i32,
) -> ServiceResult<EditModalData> {
    store.with_ledger(|ledger| {
        let record = ledger.find(kind, id).ok_or(ServiceError::NotFound)?;
        let modal = EditModal::open(&record);
        Ok(modal_data(&modal, &choice_lists(ledger), None))
    })
}

/// Result of saving the edit modal.
#[derive(Debug)]
pub enum SaveOutcome {
    /// The record was replaced and the collections re-fetched.
    Saved,
    /// The modal stays open with the draft and its errors.
    Rejected(EditModalData),
}

/// Applies the submitted fields to a copy of the stored record and replaces it
/// through the API, then re-fetches every collection.
pub async fn save_record<R>(
    repo: &R,
    store: &LedgerStore,
    kind: RecordKind,
    id: i32,
    fields: &[(String, String)],
) -> ServiceResult<SaveOutcome>
where
    R: LedgerReader + RecordWriter + ?Sized,
{
    let (record, choices) = store.with_ledger(|ledger| {
        let record = ledger.find(kind, id).ok_or(ServiceError::NotFound)?;
        Ok::<_, ServiceError>((record, choice_lists(ledger)))
    })?;

    let mut modal = EditModal::open(&record);
    for (name, value) in fields {
        modal.set_field(name, value)?;
    }

    let Some(updated) = modal.save(|updated| updated) else {
        return Ok(SaveOutcome::Rejected(modal_data(&modal, &choices, None)));
    };

    match update_record(repo, &updated).await {
        Ok(()) => {
            log::info!("Updated {kind} #{id}");
            refresh(repo, store).await;
            Ok(SaveOutcome::Saved)
        }
        Err(err) => {
            log::error!("Failed to update {kind} #{id}: {err}");
            let message = err.update_message(kind);
            Ok(SaveOutcome::Rejected(modal_data(&modal, &choices, Some(message))))
        }
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use reqwest::StatusCode;

    use super::*;
    use crate::domain::types::{CustomerId, EstablishmentId, PurchaseId};
    use crate::repository::errors::ApiError;
    use crate::repository::mock::MockRepository;

    fn customers() -> Vec<Customer> {
        vec![
            Customer {
                id: CustomerId::new(1).ok(),
                name: "Ana".into(),
                email: "ana@example.com".into(),
                phone: "1111".into(),
                cpf: "111.111.111-11".into(),
            },
            Customer {
                id: CustomerId::new(2).ok(),
                name: "Bruno".into(),
                email: "bruno@example.com".into(),
                phone: "2222".into(),
                cpf: "222.222.222-22".into(),
            },
        ]
    }

    fn establishments() -> Vec<Establishment> {
        vec![
            Establishment {
                id: EstablishmentId::new(10).ok(),
                name: "Mercado A".into(),
                email: "mercado@example.com".into(),
                phone: "3333".into(),
                cnpj: "11.111.111/0001-11".into(),
                value_per_point: 10.0,
                ..Establishment::default()
            },
            Establishment {
                id: EstablishmentId::new(20).ok(),
                name: "Loja B".into(),
                email: "loja@example.com".into(),
                phone: "4444".into(),
                cnpj: "22.222.222/0001-22".into(),
                value_per_point: 5.0,
                ..Establishment::default()
            },
        ]
    }

    fn purchase(id: i32, client: i32, establishment: i32, amount: f64) -> Purchase {
        Purchase {
            id: PurchaseId::new(id).ok(),
            client_id: CustomerId::new(client).unwrap(),
            establishment_id: EstablishmentId::new(establishment).unwrap(),
            amount,
            purchase_date: None,
            points: None,
        }
    }

    fn purchases() -> Vec<Purchase> {
        vec![purchase(1, 1, 10, 100.0), purchase(2, 1, 20, 50.0)]
    }

    fn stable_repo(times: usize) -> MockRepository {
        let mut repo = MockRepository::new();
        repo.expect_list_customers()
            .times(times)
            .returning(|| Ok(customers()));
        repo.expect_list_establishments()
            .times(times)
            .returning(|| Ok(establishments()));
        repo.expect_list_purchases()
            .times(times)
            .returning(|| Ok(purchases()));
        repo
    }

    fn server_error() -> ApiError {
        ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        }
    }

    #[actix_web::test]
    async fn repeated_refresh_yields_identical_collections() {
        let repo = stable_repo(2);
        let store = LedgerStore::new();

        refresh(&repo, &store).await;
        let first = store.snapshot();
        refresh(&repo, &store).await;

        assert_eq!(store.snapshot(), first);
        assert_eq!(first.customers.len(), 2);
    }

    #[actix_web::test]
    async fn failed_collection_stays_stale() {
        let store = LedgerStore::new();
        refresh(&stable_repo(1), &store).await;

        let mut repo = MockRepository::new();
        repo.expect_list_customers()
            .times(1)
            .returning(|| Err(server_error()));
        repo.expect_list_establishments()
            .times(1)
            .returning(|| Ok(Vec::new()));
        repo.expect_list_purchases()
            .times(1)
            .returning(|| Err(ApiError::Network("connection refused".into())));

        refresh(&repo, &store).await;

        let ledger = store.snapshot();
        assert_eq!(ledger.customers, customers());
        assert!(ledger.establishments.is_empty());
        assert_eq!(ledger.purchases, purchases());
    }

    #[actix_web::test]
    async fn mount_happens_once_per_refresh_key() {
        let repo = stable_repo(2);
        let store = LedgerStore::new();
        let shell = Shell::new();

        ensure_mounted(&repo, &store, &shell).await;
        ensure_mounted(&repo, &store, &shell).await;
        assert_eq!(store.mounted_key(), Some(0));

        shell.notify_success();
        ensure_mounted(&repo, &store, &shell).await;
        assert_eq!(store.mounted_key(), Some(1));
    }

    #[actix_web::test]
    async fn dashboard_filters_the_active_tab() {
        let store = LedgerStore::new();
        refresh(&stable_repo(1), &store).await;

        let page = dashboard(
            &store,
            &DashboardQuery {
                tab: Some(Tab::Customers),
                search: Some("  an ".into()),
            },
        );

        assert_eq!(page.search, "an");
        assert_eq!(page.customers.len(), 1);
        assert_eq!(page.customers[0].name, "Ana");
        assert_eq!(page.customers[0].points, "20");
        assert!(page.purchases.is_empty());
        assert_eq!(
            page.counts,
            TabCounts {
                customers: 2,
                establishments: 2,
                purchases: 2,
            }
        );
        assert_eq!(page.empty_message, None);
    }

    #[actix_web::test]
    async fn purchase_rows_resolve_names_and_format_amounts() {
        let store = LedgerStore::new();
        refresh(&stable_repo(1), &store).await;

        let page = dashboard(
            &store,
            &DashboardQuery {
                tab: Some(Tab::Purchases),
                search: Some("loja".into()),
            },
        );

        assert_eq!(
            page.purchases,
            vec![PurchaseRow {
                id: Some(2),
                customer_name: "Ana".into(),
                establishment_name: "Loja B".into(),
                amount: "R$ 50.00".into(),
                points: Some("10".into()),
                date: None,
            }]
        );
    }

    #[actix_web::test]
    async fn half_points_and_cents_round_away_from_zero() {
        let mut repo = MockRepository::new();
        repo.expect_list_customers().returning(|| Ok(customers()));
        repo.expect_list_establishments()
            .returning(|| Ok(establishments()));
        repo.expect_list_purchases()
            .returning(|| Ok(vec![purchase(1, 2, 10, 25.0), purchase(2, 1, 20, 10.125)]));
        let store = LedgerStore::new();
        refresh(&repo, &store).await;

        let customers_page = dashboard(
            &store,
            &DashboardQuery {
                tab: Some(Tab::Customers),
                search: Some("bruno".into()),
            },
        );
        assert_eq!(customers_page.customers[0].points, "3");

        let purchases_page = dashboard(
            &store,
            &DashboardQuery {
                tab: Some(Tab::Purchases),
                search: None,
            },
        );
        assert_eq!(purchases_page.purchases[0].points.as_deref(), Some("3"));
        assert_eq!(purchases_page.purchases[1].amount, "R$ 10.13");
    }

    #[test]
    fn empty_store_distinguishes_search_from_nothing_loaded() {
        let store = LedgerStore::new();

        let page = dashboard(&store, &DashboardQuery::default());
        assert_eq!(page.empty_message, Some("No customers registered yet."));

        let page = dashboard(
            &store,
            &DashboardQuery {
                tab: Some(Tab::Establishments),
                search: Some("x".into()),
            },
        );
        assert_eq!(
            page.empty_message,
            Some("No establishments found matching your search.")
        );
    }

    #[actix_web::test]
    async fn edit_modal_is_prefilled_from_the_store() {
        let store = LedgerStore::new();
        refresh(&stable_repo(1), &store).await;

        let data = load_edit_modal(&store, RecordKind::Purchase, 2).unwrap();

        assert_eq!(data.title, "Edit Purchase");
        assert_eq!(data.fields[0].options.len(), 2);
        assert!(data.fields[0].options[0].selected);
        assert_eq!(data.fields[2].value, "50");
        assert!(matches!(
            load_edit_modal(&store, RecordKind::Customer, 99),
            Err(ServiceError::NotFound)
        ));
    }

    #[actix_web::test]
    async fn saving_replaces_the_record_and_refreshes() {
        let store = LedgerStore::new();
        refresh(&stable_repo(1), &store).await;

        let mut repo = stable_repo(1);
        repo.expect_update_customer()
            .withf(|id, c| id.get() == 2 && c.name == "Bruno Lima" && c.cpf == "222.222.222-22")
            .times(1)
            .returning(|_, _| Ok(()));

        let outcome = save_record(
            &repo,
            &store,
            RecordKind::Customer,
            2,
            &[("name".to_string(), "Bruno Lima".to_string())],
        )
        .await
        .unwrap();

        assert!(matches!(outcome, SaveOutcome::Saved));
    }

    #[actix_web::test]
    async fn failed_update_keeps_the_modal_open() {
        let store = LedgerStore::new();
        refresh(&stable_repo(1), &store).await;

        let mut repo = MockRepository::new();
        repo.expect_update_establishment()
            .withf(|id, e| {
                id.get() == 10 && e.value_per_point == 12.0 && e.cnpj == "11.111.111/0001-11"
            })
            .times(1)
            .returning(|_, _| Err(server_error()));
        repo.expect_list_customers().never();

        let outcome = save_record(
            &repo,
            &store,
            RecordKind::Establishment,
            10,
            &[("valuePerPoint".to_string(), "12".to_string())],
        )
        .await
        .unwrap();

        let SaveOutcome::Rejected(data) = outcome else {
            panic!("expected the modal to stay open");
        };
        assert_eq!(
            data.api_error.as_deref(),
            Some("Failed to update establishment. Please try again.")
        );
        assert_eq!(data.fields[4].value, "12");
    }

    #[actix_web::test]
    async fn invalid_edit_is_not_sent() {
        let store = LedgerStore::new();
        refresh(&stable_repo(1), &store).await;

        let mut repo = MockRepository::new();
        repo.expect_update_purchase().never();

        let outcome = save_record(
            &repo,
            &store,
            RecordKind::Purchase,
            1,
            &[("amount".to_string(), "0".to_string())],
        )
        .await
        .unwrap();

        let SaveOutcome::Rejected(data) = outcome else {
            panic!("expected the modal to stay open");
        };
        assert_eq!(
            data.fields[2].error,
            Some("Purchase amount must be greater than 0")
        );
    }
}
