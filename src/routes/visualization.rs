use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::domain::record::RecordKind;
use crate::dto::visualization::{DashboardPageData, DashboardQuery, EditModalData, Tab};
use crate::repository::HttpRepository;
use crate::routes::{base_context, parse_fields, redirect, render_template};
use crate::services::ServiceError;
use crate::services::visualization::{self as visualization_service, LedgerStore, SaveOutcome};
use crate::shell::{Section, Shell};

/// Address of the visualization page keeping the tab and search term.
pub fn visualization_url(query: &DashboardQuery) -> String {
    match serde_html_form::to_string(query) {
        Ok(params) if !params.is_empty() => format!("/visualization?{params}"),
        _ => "/visualization".to_string(),
    }
}

fn render_dashboard(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    data: &DashboardPageData,
    modal: Option<&EditModalData>,
) -> HttpResponse {
    let mut context = base_context(flash_messages, Section::Visualization);
    context.insert("tab", &data.tab);
    context.insert("search", &data.search);
    context.insert("counts", &data.counts);
    context.insert("customers", &data.customers);
    context.insert("establishments", &data.establishments);
    context.insert("purchases", &data.purchases);
    context.insert("empty_message", &data.empty_message);
    if let Some(modal) = modal {
        context.insert("modal", modal);
    }
    render_template(tera, "visualization/index.html", &context)
}

#[get("/visualization")]
pub async fn show_visualization(
    query: web::Query<DashboardQuery>,
    repo: web::Data<HttpRepository>,
    store: web::Data<LedgerStore>,
    shell: web::Data<Shell>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    visualization_service::ensure_mounted(repo.get_ref(), store.get_ref(), shell.get_ref()).await;
    let data = visualization_service::dashboard(store.get_ref(), &query);
    render_dashboard(&tera, &flash_messages, &data, None)
}

#[post("/visualization/refresh")]
pub async fn refresh_visualization(
    repo: web::Data<HttpRepository>,
    store: web::Data<LedgerStore>,
    web::Form(query): web::Form<DashboardQuery>,
) -> impl Responder {
    visualization_service::refresh(repo.get_ref(), store.get_ref()).await;
    redirect(&visualization_url(&query))
}

#[get("/visualization/{kind}/{id}/edit")]
pub async fn edit_modal(
    path: web::Path<(RecordKind, i32)>,
    store: web::Data<LedgerStore>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (kind, id) = path.into_inner();
    match visualization_service::load_edit_modal(store.get_ref(), kind, id) {
        Ok(data) => {
            let mut context = Context::new();
            context.insert("modal", &data);
            render_template(&tera, "visualization/modal_body.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to load edit modal for {kind} #{id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/visualization/{kind}/{id}")]
pub async fn save_record(
    path: web::Path<(RecordKind, i32)>,
    repo: web::Data<HttpRepository>,
    store: web::Data<LedgerStore>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    body: web::Bytes,
) -> impl Responder {
    let (kind, id) = path.into_inner();
    let back = DashboardQuery {
        tab: Some(Tab::for_kind(kind)),
        search: None,
    };

    let Some(fields) = parse_fields(&body) else {
        FlashMessage::error("Invalid form data.").send();
        return redirect(&visualization_url(&back));
    };

    match visualization_service::save_record(repo.get_ref(), store.get_ref(), kind, id, &fields)
        .await
    {
        Ok(SaveOutcome::Saved) => {
            FlashMessage::success(format!("{} updated.", kind.title())).send();
            redirect(&visualization_url(&back))
        }
        Ok(SaveOutcome::Rejected(modal)) => {
            let data = visualization_service::dashboard(store.get_ref(), &back);
            render_dashboard(&tera, &flash_messages, &data, Some(&modal))
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error(format!("{} #{id} not found.", kind.title())).send();
            redirect(&visualization_url(&back))
        }
        Err(ServiceError::Form(err)) => {
            log::warn!("Rejected {kind} #{id} update: {err}");
            FlashMessage::error(err.to_string()).send();
            redirect(&visualization_url(&back))
        }
        Err(err) => {
            log::error!("Failed to update {kind} #{id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_keeps_tab_and_search() {
        assert_eq!(visualization_url(&DashboardQuery::default()), "/visualization");
        assert_eq!(
            visualization_url(&DashboardQuery {
                tab: Some(Tab::Purchases),
                search: Some("ana maria".into()),
            }),
            "/visualization?tab=purchases&search=ana+maria"
        );
    }
}
