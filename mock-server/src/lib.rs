//! In-memory stand-in for the customers and contacts REST API.
//!
//! Mirrors the production backend's rules: required fields, no future birth
//! dates, unique CPF (409), contacts removed with their customer. Business
//! rule violations answer with a JSON `message`; missing records and
//! malformed requests answer with a servlet-container style HTML error page.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

pub const DUPLICATE_CPF_MESSAGE: &str = "Este CPF já está cadastrado no sistema.";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    pub id: i64,
    pub nome: String,
    /// Digits only.
    pub cpf: String,
    #[serde(rename = "dataNascimento")]
    pub data_nascimento: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endereco: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    pub id: i64,
    #[serde(rename = "clienteId")]
    pub cliente_id: i64,
    pub tipo: String,
    pub valor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observacao: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CustomerInput {
    pub nome: Option<String>,
    pub cpf: Option<String>,
    #[serde(rename = "dataNascimento")]
    pub data_nascimento: Option<NaiveDate>,
    pub endereco: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactInput {
    #[serde(rename = "clienteId")]
    pub cliente_id: Option<i64>,
    pub tipo: Option<String>,
    pub valor: Option<String>,
    pub observacao: Option<String>,
}

#[derive(Deserialize)]
pub struct CustomerQuery {
    pub busca: Option<String>,
}

#[derive(Deserialize)]
pub struct ContactQuery {
    #[serde(rename = "clienteId")]
    pub cliente_id: Option<String>,
}

#[derive(Debug, Default)]
pub struct Store {
    customers: BTreeMap<i64, Customer>,
    contacts: BTreeMap<i64, Contact>,
    last_customer_id: i64,
    last_contact_id: i64,
}

pub type Db = Arc<RwLock<Store>>;

/// A failed request. `Rule` renders as JSON, `Page` as an HTML error page.
#[derive(Debug)]
pub enum Failure {
    Rule(StatusCode, String),
    Page(StatusCode, String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        match self {
            Failure::Rule(status, message) => {
                (status, Json(ErrorBody { message: &message })).into_response()
            }
            Failure::Page(status, message) => {
                (status, Html(error_page(status, &message))).into_response()
            }
        }
    }
}

fn rule(status: StatusCode, message: &str) -> Failure {
    Failure::Rule(status, message.to_string())
}

fn page(status: StatusCode, message: &str) -> Failure {
    Failure::Page(status, message.to_string())
}

/// HTML error body in the shape a servlet container produces.
pub fn error_page(status: StatusCode, message: &str) -> String {
    let code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("");
    let message = html_escape::encode_text(message);
    format!(
        "<!doctype html><html lang=\"en\"><head><title>HTTP Status {code} – {reason}</title></head>\
         <body><h1>HTTP Status {code} – {reason}</h1><hr class=\"line\" />\
         <p><b>Type</b> Status Report</p><p><b>Message</b> {message}</p>\
         <hr class=\"line\" /><h3>mock-server</h3></body></html>"
    )
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/clientes", get(list_customers).post(create_customer))
        .route(
            "/api/clientes/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .route("/api/contatos", get(list_contacts).post(create_contact))
        .route("/api/contatos/{id}", put(update_contact).delete(delete_contact))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn digits(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Name contains the term (case-insensitive), or the CPF starts with the
/// term's digits when it has any.
pub fn matches_search(customer: &Customer, term: &str) -> bool {
    if customer.nome.to_lowercase().contains(&term.to_lowercase()) {
        return true;
    }
    let term_digits = digits(term);
    !term_digits.is_empty() && customer.cpf.starts_with(&term_digits)
}

fn parse_id(id: Result<Path<i64>, PathRejection>, missing: &str) -> Result<i64, Failure> {
    id.map(|Path(id)| id)
        .map_err(|_| page(StatusCode::BAD_REQUEST, missing))
}

fn parse_body<T>(body: Result<Json<T>, JsonRejection>, what: &str) -> Result<T, Failure> {
    body.map(|Json(input)| input)
        .map_err(|e| Failure::Page(StatusCode::BAD_REQUEST, format!("Erro ao ler dados do {what}: {e}")))
}

impl Store {
    fn cpf_taken(&self, cpf: &str, ignore: Option<i64>) -> bool {
        self.customers
            .values()
            .any(|c| c.cpf == cpf && Some(c.id) != ignore)
    }

    /// Apply the customer rules, returning a record with id 0.
    fn validate_customer(&self, input: CustomerInput, ignore: Option<i64>) -> Result<Customer, Failure> {
        let nome = non_blank(input.nome).ok_or_else(|| rule(StatusCode::BAD_REQUEST, "Nome é obrigatório."))?;
        let cpf = non_blank(input.cpf).ok_or_else(|| rule(StatusCode::BAD_REQUEST, "CPF é obrigatório."))?;
        let data_nascimento = input
            .data_nascimento
            .filter(|d| *d <= Local::now().date_naive())
            .ok_or_else(|| {
                rule(
                    StatusCode::BAD_REQUEST,
                    "Data de Nascimento é obrigatória e não pode ser no futuro.",
                )
            })?;
        let cpf = digits(&cpf);
        if self.cpf_taken(&cpf, ignore) {
            return Err(rule(StatusCode::CONFLICT, DUPLICATE_CPF_MESSAGE));
        }
        Ok(Customer {
            id: 0,
            nome,
            cpf,
            data_nascimento,
            endereco: non_blank(input.endereco),
        })
    }
}

async fn list_customers(State(db): State<Db>, Query(query): Query<CustomerQuery>) -> Json<Vec<Customer>> {
    let store = db.read().await;
    let mut customers: Vec<Customer> = store
        .customers
        .values()
        .filter(|c| query.busca.as_deref().map_or(true, |term| matches_search(c, term)))
        .cloned()
        .collect();
    customers.sort_by_key(|c| c.nome.to_lowercase());
    Json(customers)
}

async fn get_customer(
    State(db): State<Db>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Customer>, Failure> {
    let id = parse_id(id, "ID do cliente inválido na URL.")?;
    let store = db.read().await;
    store
        .customers
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| page(StatusCode::NOT_FOUND, "Cliente não encontrado."))
}

async fn create_customer(
    State(db): State<Db>,
    body: Result<Json<CustomerInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Customer>), Failure> {
    let input = parse_body(body, "cliente")?;
    let mut store = db.write().await;
    let mut customer = store.validate_customer(input, None)?;
    store.last_customer_id += 1;
    customer.id = store.last_customer_id;
    store.customers.insert(customer.id, customer.clone());
    info!(id = customer.id, "customer created");
    Ok((StatusCode::CREATED, Json(customer)))
}

async fn update_customer(
    State(db): State<Db>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<CustomerInput>, JsonRejection>,
) -> Result<Json<Customer>, Failure> {
    let id = parse_id(id, "ID do cliente não fornecido na URL.")?;
    let input = parse_body(body, "cliente")?;
    let mut store = db.write().await;
    if !store.customers.contains_key(&id) {
        return Err(page(StatusCode::NOT_FOUND, "Cliente não encontrado."));
    }
    let mut customer = store.validate_customer(input, Some(id))?;
    customer.id = id;
    store.customers.insert(id, customer.clone());
    info!(id, "customer updated");
    Ok(Json(customer))
}

async fn delete_customer(
    State(db): State<Db>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, Failure> {
    let id = parse_id(id, "ID do cliente não fornecido na URL.")?;
    let mut store = db.write().await;
    if store.customers.remove(&id).is_none() {
        return Err(page(StatusCode::NOT_FOUND, "Cliente não encontrado."));
    }
    let before = store.contacts.len();
    store.contacts.retain(|_, c| c.cliente_id != id);
    info!(id, contacts_removed = before - store.contacts.len(), "customer deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn list_contacts(
    State(db): State<Db>,
    Query(query): Query<ContactQuery>,
) -> Result<Json<Vec<Contact>>, Failure> {
    let raw = query
        .cliente_id
        .filter(|v| !v.is_empty())
        .ok_or_else(|| page(StatusCode::BAD_REQUEST, "O parâmetro 'clienteId' é obrigatório."))?;
    let cliente_id: i64 = raw
        .parse()
        .map_err(|_| page(StatusCode::BAD_REQUEST, "O 'clienteId' deve ser um número."))?;
    let store = db.read().await;
    Ok(Json(
        store
            .contacts
            .values()
            .filter(|c| c.cliente_id == cliente_id)
            .cloned()
            .collect(),
    ))
}

fn contact_fields(input: &mut ContactInput) -> Result<(String, String), Failure> {
    let missing = || rule(StatusCode::BAD_REQUEST, "Os campos 'tipo' e 'valor' são obrigatórios.");
    let tipo = non_blank(input.tipo.take()).ok_or_else(missing)?;
    let valor = non_blank(input.valor.take()).ok_or_else(missing)?;
    Ok((tipo, valor))
}

async fn create_contact(
    State(db): State<Db>,
    body: Result<Json<ContactInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Contact>), Failure> {
    let mut input = parse_body(body, "contato")?;
    let (tipo, valor) = contact_fields(&mut input)?;
    let cliente_id = input
        .cliente_id
        .ok_or_else(|| rule(StatusCode::BAD_REQUEST, "O campo 'clienteId' é obrigatório."))?;
    let mut store = db.write().await;
    if !store.customers.contains_key(&cliente_id) {
        return Err(page(StatusCode::NOT_FOUND, "Cliente não encontrado."));
    }
    store.last_contact_id += 1;
    let contact = Contact {
        id: store.last_contact_id,
        cliente_id,
        tipo,
        valor,
        observacao: non_blank(input.observacao),
    };
    store.contacts.insert(contact.id, contact.clone());
    info!(id = contact.id, cliente_id, "contact created");
    Ok((StatusCode::CREATED, Json(contact)))
}

async fn update_contact(
    State(db): State<Db>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<ContactInput>, JsonRejection>,
) -> Result<Json<Contact>, Failure> {
    let id = parse_id(id, "ID do contato não fornecido na URL.")?;
    let mut input = parse_body(body, "contato")?;
    let (tipo, valor) = contact_fields(&mut input)?;
    let mut store = db.write().await;
    let contact = store
        .contacts
        .get_mut(&id)
        .ok_or_else(|| page(StatusCode::NOT_FOUND, "Contato não encontrado."))?;
    contact.tipo = tipo;
    contact.valor = valor;
    contact.observacao = non_blank(input.observacao);
    info!(id, "contact updated");
    Ok(Json(contact.clone()))
}

async fn delete_contact(
    State(db): State<Db>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, Failure> {
    let id = parse_id(id, "ID do contato não fornecido na URL.")?;
    let mut store = db.write().await;
    store
        .contacts
        .remove(&id)
        .map(|_| {
            info!(id, "contact deleted");
            StatusCode::NO_CONTENT
        })
        .ok_or_else(|| page(StatusCode::NOT_FOUND, "Contato não encontrado."))
}
