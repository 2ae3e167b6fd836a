//! In-process stand-in for the loyalty REST API.
#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::Mutex;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::{Value, json};

/// One write request received by the fake API.
#[derive(Clone, Debug, PartialEq)]
pub struct Received {
    pub method: String,
    pub path: String,
    pub body: Value,
}

#[derive(Default)]
pub struct FakeState {
    received: Mutex<Vec<Received>>,
}

pub struct FakeApi {
    pub base_url: String,
    state: web::Data<FakeState>,
    handle: ServerHandle,
}

pub fn customers() -> Value {
    json!([
        {
            "id": 1,
            "name": "Ana Souza",
            "email": "ana@example.com",
            "phone": "(11) 98888-7777",
            "cpf": "111.111.111-11"
        },
        {
            "id": 2,
            "name": "Bruno Lima",
            "email": "bruno@example.com",
            "phone": "(21) 97777-6666",
            "cpf": "222.222.222-22"
        }
    ])
}

pub fn establishments() -> Value {
    json!([
        {
            "id": 10,
            "name": "Mercado Central",
            "email": "contato@mercado.com",
            "phone": "(11) 3333-4444",
            "cnpj": "12.345.678/0001-90",
            "valuePerPoint": 10.0
        },
        {
            "id": 20,
            "name": "Loja Bela",
            "email": "loja@bela.com",
            "phone": "(11) 2222-1111",
            "cnpj": "98.765.432/0001-10",
            "valuePerPoint": 5.0
        }
    ])
}

pub fn purchases() -> Value {
    json!([
        {
            "id": 100,
            "clientId": 1,
            "establishmentId": 10,
            "amount": 100.0,
            "purchaseDate": "2024-03-05T14:30:00Z"
        },
        {
            "id": 101,
            "clientId": 1,
            "establishmentId": 20,
            "purchaseValue": 50.0
        }
    ])
}

async fn record(
    req: HttpRequest,
    state: web::Data<FakeState>,
    body: web::Json<Value>,
) -> HttpResponse {
    let body = body.into_inner();

    if body["email"] == "taken@example.com" {
        return HttpResponse::BadRequest().json(json!({ "message": "Email already registered" }));
    }
    if body["amount"].as_f64().is_some_and(|amount| amount > 10_000.0) {
        return HttpResponse::InternalServerError().body("boom");
    }

    state.received.lock().unwrap().push(Received {
        method: req.method().to_string(),
        path: req.path().to_string(),
        body: body.clone(),
    });

    let mut created = body;
    if created.get("id").is_none() {
        created["id"] = json!(999);
    }
    HttpResponse::Created().json(created)
}

impl FakeApi {
    pub async fn start() -> Self {
        let state = web::Data::new(FakeState::default());
        let app_state = state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .route(
                    "/clients/all",
                    web::get().to(|| async { HttpResponse::Ok().json(customers()) }),
                )
                .route(
                    "/establishments/list",
                    web::get().to(|| async { HttpResponse::Ok().json(establishments()) }),
                )
                .route(
                    "/purchases",
                    web::get().to(|| async { HttpResponse::Ok().json(purchases()) }),
                )
                .route("/clients", web::post().to(record))
                .route("/establishments", web::post().to(record))
                .route("/purchases", web::post().to(record))
                .route("/{collection}/{id}", web::put().to(record))
        })
        .workers(1)
        .listen(listener)
        .unwrap()
        .run();

        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            state,
            handle,
        }
    }

    pub fn received(&self) -> Vec<Received> {
        self.state.received.lock().unwrap().clone()
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

/// Address where nothing is listening.
pub fn closed_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
