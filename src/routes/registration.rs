use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::record::RecordKind;
use crate::dto::registration::{RegistrationPageData, kind_tabs};
use crate::repository::HttpRepository;
use crate::routes::{base_context, parse_fields, redirect, render_template};
use crate::services::ServiceError;
use crate::services::registration::{self as registration_service, SubmitOutcome};
use crate::shell::{Section, Shell};

fn render_form(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    data: &RegistrationPageData,
) -> HttpResponse {
    let mut context = base_context(flash_messages, Section::Registration);
    context.insert("tabs", &kind_tabs(data.kind));
    context.insert("kind", &data.kind);
    context.insert("kind_title", data.kind.title());
    context.insert("fields", &data.fields);
    context.insert("api_error", &data.api_error);
    render_template(tera, "registration/index.html", &context)
}

#[get("/registration")]
pub async fn registration_index() -> impl Responder {
    redirect(&format!("/registration/{}", RecordKind::Customer))
}

#[get("/registration/{kind}")]
pub async fn show_registration(
    kind: web::Path<RecordKind>,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = registration_service::show_registration(repo.get_ref(), kind.into_inner()).await;
    render_form(&tera, &flash_messages, &data)
}

#[post("/registration/{kind}")]
pub async fn submit_registration(
    kind: web::Path<RecordKind>,
    repo: web::Data<HttpRepository>,
    shell: web::Data<Shell>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    body: web::Bytes,
) -> impl Responder {
    let kind = kind.into_inner();
    let form_url = format!("/registration/{kind}");

    let Some(fields) = parse_fields(&body) else {
        FlashMessage::error("Invalid form data.").send();
        return redirect(&form_url);
    };

    match registration_service::submit_registration(repo.get_ref(), shell.get_ref(), kind, &fields)
        .await
    {
        Ok(SubmitOutcome::Created(data)) => {
            let mut context = base_context(&flash_messages, Section::Registration);
            context.insert("tabs", &kind_tabs(kind));
            context.insert("success", &data);
            context.insert("display_secs", &data.display_ms.div_ceil(1000));
            context.insert("next_url", &form_url);
            render_template(&tera, "registration/success.html", &context)
        }
        Ok(SubmitOutcome::Rejected(data)) => render_form(&tera, &flash_messages, &data),
        Err(ServiceError::Form(err)) => {
            log::warn!("Rejected {kind} registration: {err}");
            FlashMessage::error(err.to_string()).send();
            redirect(&form_url)
        }
        Err(err) => {
            log::error!("Failed to register {kind}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
