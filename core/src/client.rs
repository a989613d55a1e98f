//! Stateless HTTP request builder and response parser for the cadastro API.
//!
//! # Design
//! `CadastroClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the HTTP round-trip in between.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Contact, ContactId, ContactPayload, Customer, CustomerId, CustomerPayload};

/// Synchronous, stateless client for the customers and contacts API.
#[derive(Debug, Clone)]
pub struct CadastroClient {
    base_url: String,
}

impl CadastroClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List customers, optionally filtered server-side by name or CPF.
    /// A blank search term lists everything.
    pub fn build_list_customers(&self, search: Option<&str>) -> HttpRequest {
        let mut path = format!("{}/clientes", self.base_url);
        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            let encoded: String = url::form_urlencoded::byte_serialize(term.as_bytes()).collect();
            path.push_str("?busca=");
            path.push_str(&encoded);
        }
        bare(HttpMethod::Get, path)
    }

    pub fn build_get_customer(&self, id: CustomerId) -> HttpRequest {
        bare(HttpMethod::Get, format!("{}/clientes/{id}", self.base_url))
    }

    pub fn build_create_customer(&self, input: &CustomerPayload) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Post, format!("{}/clientes", self.base_url), input)
    }

    pub fn build_update_customer(
        &self,
        id: CustomerId,
        input: &CustomerPayload,
    ) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Put, format!("{}/clientes/{id}", self.base_url), input)
    }

    pub fn build_delete_customer(&self, id: CustomerId) -> HttpRequest {
        bare(HttpMethod::Delete, format!("{}/clientes/{id}", self.base_url))
    }

    pub fn build_list_contacts(&self, customer_id: CustomerId) -> HttpRequest {
        bare(
            HttpMethod::Get,
            format!("{}/contatos?clienteId={customer_id}", self.base_url),
        )
    }

    pub fn build_create_contact(&self, input: &ContactPayload) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Post, format!("{}/contatos", self.base_url), input)
    }

    pub fn build_update_contact(
        &self,
        id: ContactId,
        input: &ContactPayload,
    ) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Put, format!("{}/contatos/{id}", self.base_url), input)
    }

    pub fn build_delete_contact(&self, id: ContactId) -> HttpRequest {
        bare(HttpMethod::Delete, format!("{}/contatos/{id}", self.base_url))
    }

    pub fn parse_list_customers(&self, response: HttpResponse) -> Result<Vec<Customer>, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_customer(&self, response: HttpResponse) -> Result<Customer, ApiError> {
        parse_json(response)
    }

    pub fn parse_create_customer(&self, response: HttpResponse) -> Result<Customer, ApiError> {
        parse_json(response)
    }

    pub fn parse_update_customer(&self, response: HttpResponse) -> Result<Customer, ApiError> {
        parse_json(response)
    }

    pub fn parse_delete_customer(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_list_contacts(&self, response: HttpResponse) -> Result<Vec<Contact>, ApiError> {
        parse_json(response)
    }

    pub fn parse_create_contact(&self, response: HttpResponse) -> Result<Contact, ApiError> {
        parse_json(response)
    }

    pub fn parse_update_contact(&self, response: HttpResponse) -> Result<Contact, ApiError> {
        parse_json(response)
    }

    pub fn parse_delete_contact(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

fn bare(method: HttpMethod, path: String) -> HttpRequest {
    HttpRequest {
        method,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn with_json<T: Serialize>(method: HttpMethod, path: String, input: &T) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-2xx responses to an `ApiError` carrying the extracted message.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::from_status(response.status, &response.body))
}
