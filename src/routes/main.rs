use actix_web::{Responder, get};

use crate::routes::redirect;

/// The registration area is the default section.
#[get("/")]
pub async fn show_index() -> impl Responder {
    redirect("/registration")
}
