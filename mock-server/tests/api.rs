use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Contact, Customer, DUPLICATE_CPF_MESSAGE};
use tower::{Service, ServiceExt};

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

async fn body_text(response: axum::response::Response) -> String {
    String::from_utf8(body_bytes(response).await.to_vec()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn bare_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

const ANA: &str = r#"{"nome":"Ana Souza","cpf":"123.456.789-00","dataNascimento":"1990-05-17","endereco":"Rua A, 10"}"#;
const BRUNO: &str = r#"{"nome":"Bruno Lima","cpf":"987.654.321-00","dataNascimento":"1985-01-02"}"#;

/// Send one request through a long-lived service.
async fn call(
    app: &mut axum::routing::RouterIntoService<String>,
    request: Request<String>,
) -> axum::response::Response {
    ServiceExt::ready(app).await.unwrap().call(request).await.unwrap()
}

// --- customers ---

#[tokio::test]
async fn list_customers_empty() {
    let resp = app()
        .oneshot(bare_request("GET", "/api/clientes"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let customers: Vec<Customer> = body_json(resp).await;
    assert!(customers.is_empty());
}

#[tokio::test]
async fn create_customer_returns_201_with_cpf_digits() {
    let resp = app()
        .oneshot(json_request("POST", "/api/clientes", ANA))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let customer: Customer = body_json(resp).await;
    assert_eq!(customer.id, 1);
    assert_eq!(customer.nome, "Ana Souza");
    assert_eq!(customer.cpf, "12345678900");
    assert_eq!(customer.endereco.as_deref(), Some("Rua A, 10"));
}

#[tokio::test]
async fn create_customer_without_name_is_json_400() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/clientes",
            r#"{"nome":" ","cpf":"123.456.789-00","dataNascimento":"1990-05-17"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["message"], "Nome é obrigatório.");
}

#[tokio::test]
async fn create_customer_with_future_birth_date_is_rejected() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/clientes",
            r#"{"nome":"Ana","cpf":"123.456.789-00","dataNascimento":"2999-01-01"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_is_html_400() {
    let resp = app()
        .oneshot(json_request("POST", "/api/clientes", "{not json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let text = body_text(resp).await;
    assert!(text.contains("<p><b>Message</b> Erro ao ler dados do cliente"));
}

#[tokio::test]
async fn get_customer_not_found_is_html_page() {
    let resp = app()
        .oneshot(bare_request("GET", "/api/clientes/99"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let text = body_text(resp).await;
    assert!(text.contains("<p><b>Message</b> Cliente não encontrado.</p>"));
}

#[tokio::test]
async fn get_customer_bad_id_returns_400() {
    let resp = app()
        .oneshot(bare_request("GET", "/api/clientes/abc"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_cpf_is_409_with_message() {
    let mut app = app().into_service();

    let resp = call(&mut app, json_request("POST", "/api/clientes", ANA)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = call(
        &mut app,
        json_request(
            "POST",
            "/api/clientes",
            r#"{"nome":"Outra","cpf":"12345678900","dataNascimento":"1991-01-01"}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["message"], DUPLICATE_CPF_MESSAGE);
}

#[tokio::test]
async fn update_keeping_own_cpf_is_allowed_but_taking_another_is_not() {
    let mut app = app().into_service();
    call(&mut app, json_request("POST", "/api/clientes", ANA)).await;
    call(&mut app, json_request("POST", "/api/clientes", BRUNO)).await;

    let resp = call(
        &mut app,
        json_request(
            "PUT",
            "/api/clientes/1",
            r#"{"nome":"Ana S. Souza","cpf":"123.456.789-00","dataNascimento":"1990-05-17"}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Customer = body_json(resp).await;
    assert_eq!(updated.nome, "Ana S. Souza");
    assert!(updated.endereco.is_none());

    let resp = call(
        &mut app,
        json_request(
            "PUT",
            "/api/clientes/1",
            r#"{"nome":"Ana","cpf":"987.654.321-00","dataNascimento":"1990-05-17"}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn search_filters_by_name_or_cpf_prefix() {
    let mut app = app().into_service();
    call(&mut app, json_request("POST", "/api/clientes", BRUNO)).await;
    call(&mut app, json_request("POST", "/api/clientes", ANA)).await;

    let resp = call(&mut app, bare_request("GET", "/api/clientes")).await;
    let all: Vec<Customer> = body_json(resp).await;
    let names: Vec<&str> = all.iter().map(|c| c.nome.as_str()).collect();
    assert_eq!(names, ["Ana Souza", "Bruno Lima"]);

    let resp = call(&mut app, bare_request("GET", "/api/clientes?busca=lima")).await;
    let found: Vec<Customer> = body_json(resp).await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].nome, "Bruno Lima");

    let resp = call(&mut app, bare_request("GET", "/api/clientes?busca=123.4")).await;
    let found: Vec<Customer> = body_json(resp).await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].nome, "Ana Souza");
}

// --- contacts ---

#[tokio::test]
async fn list_contacts_requires_customer_id() {
    let resp = app()
        .oneshot(bare_request("GET", "/api/contatos"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app()
        .oneshot(bare_request("GET", "/api/contatos?clienteId=x"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_contact_requires_type_and_value() {
    let mut app = app().into_service();
    call(&mut app, json_request("POST", "/api/clientes", ANA)).await;

    let resp = call(
        &mut app,
        json_request("POST", "/api/contatos", r#"{"clienteId":1,"tipo":"Email","valor":""}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["message"], "Os campos 'tipo' e 'valor' são obrigatórios.");
}

#[tokio::test]
async fn update_contact_not_found() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            "/api/contatos/5",
            r#"{"clienteId":1,"tipo":"Email","valor":"a@b.c"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full lifecycle ---

#[tokio::test]
async fn contact_lifecycle_and_cascade() {
    let mut app = app().into_service();

    let resp = call(&mut app, json_request("POST", "/api/clientes", ANA)).await;
    let ana: Customer = body_json(resp).await;

    // create two contacts
    let resp = call(
        &mut app,
        json_request(
            "POST",
            "/api/contatos",
            &format!(r#"{{"clienteId":{},"tipo":"Email","valor":"ana@example.com"}}"#, ana.id),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let email: Contact = body_json(resp).await;
    assert_eq!(email.cliente_id, ana.id);

    let resp = call(
        &mut app,
        json_request(
            "POST",
            "/api/contatos",
            &format!(
                r#"{{"clienteId":{},"tipo":"Telefone","valor":"(11) 99999-0000","observacao":"celular"}}"#,
                ana.id
            ),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // update one
    let resp = call(
        &mut app,
        json_request(
            "PUT",
            &format!("/api/contatos/{}", email.id),
            &format!(
                r#"{{"id":{},"clienteId":{},"tipo":"Email","valor":"ana@work.com","observacao":"trabalho"}}"#,
                email.id, ana.id
            ),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Contact = body_json(resp).await;
    assert_eq!(updated.valor, "ana@work.com");
    assert_eq!(updated.observacao.as_deref(), Some("trabalho"));

    // list
    let uri = format!("/api/contatos?clienteId={}", ana.id);
    let resp = call(&mut app, bare_request("GET", &uri)).await;
    let contacts: Vec<Contact> = body_json(resp).await;
    assert_eq!(contacts.len(), 2);

    // delete one contact
    let resp = call(&mut app, bare_request("DELETE", &format!("/api/contatos/{}", email.id))).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // delete the customer: remaining contact goes with it
    let resp = call(&mut app, bare_request("DELETE", &format!("/api/clientes/{}", ana.id))).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = call(&mut app, bare_request("GET", &uri)).await;
    let contacts: Vec<Contact> = body_json(resp).await;
    assert!(contacts.is_empty());

    let resp = call(&mut app, bare_request("GET", &format!("/api/clientes/{}", ana.id))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
