//! Error types for the cadastro client.
//!
//! # Design
//! The backend does not always answer failures with structured JSON: some
//! errors arrive as a servlet container's HTML error page, and some as raw
//! database text. [`extract_error_message`] walks an ordered fallback so every
//! non-2xx response still yields a message a person can read. `NotFound`
//! keeps its own variant because callers distinguish "the record is gone"
//! from other failures.

use thiserror::Error;

use crate::types::ContactId;
use crate::validation::ValidationError;

/// Message shown when the backend leaks a duplicate-key database error.
pub const DUPLICATE_CPF_MESSAGE: &str = "Este CPF já está cadastrado no sistema.";

const DUPLICATE_KEY_MARKERS: &[&str] = &["Duplicate entry", "duplicate key"];

const HTML_MESSAGE_OPEN: &str = "<p><b>Message</b>";

const LINE_BREAKS: &[&str] = &["<br />", "<br/>", "<br>", "<BR />", "<BR/>", "<BR>"];

/// Errors produced while talking to the API. `Display` is the message shown
/// to the user.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("{message}")]
    NotFound { message: String },

    /// The server returned a non-2xx status other than 404.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never produced a response.
    #[error("Falha de comunicação com o servidor: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("Resposta inválida do servidor: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("Falha ao montar a requisição: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Build the error for a non-2xx response, extracting its message.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_error_message(status, body);
        if status == 404 {
            ApiError::NotFound { message }
        } else {
            ApiError::Http { status, message }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failures of a user action, surfaced by the [`App`](crate::App) as alerts.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Nenhum cliente selecionado para a gestão de contatos.")]
    NoContactScope,

    #[error("Contato {0} não encontrado na lista atual.")]
    ContactNotLoaded(ContactId),
}

/// Pick a human-readable message out of an error response body.
///
/// Tried in order: a JSON object's `message` field, the `<p><b>Message</b>`
/// paragraph of an HTML error page, a known duplicate-key phrase, and
/// finally a generic message naming the status.
pub fn extract_error_message(status: u16, body: &str) -> String {
    if let Some(message) = json_message(body) {
        return message;
    }
    if let Some(message) = html_message(body) {
        return message;
    }
    if DUPLICATE_KEY_MARKERS.iter().any(|marker| body.contains(marker)) {
        return DUPLICATE_CPF_MESSAGE.to_string();
    }
    format!("Erro desconhecido (HTTP {status}).")
}

fn json_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = value.get("message")?.as_str()?.trim();
    (!message.is_empty()).then(|| message.to_string())
}

fn html_message(body: &str) -> Option<String> {
    let start = body.find(HTML_MESSAGE_OPEN)? + HTML_MESSAGE_OPEN.len();
    let rest = &body[start..];
    let end = rest.find("</p>")?;
    let mut message = rest[..end].to_string();
    for tag in LINE_BREAKS {
        message = message.replace(tag, " ");
    }
    let message = html_escape::decode_html_entities(&message);
    let message = message.split_whitespace().collect::<Vec<_>>().join(" ");
    (!message.is_empty()).then_some(message)
}
