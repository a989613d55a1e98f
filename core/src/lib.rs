//! Client core for the customers and contacts record system.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of that sit the
//! validation utilities, a view-model holding all transient UI state, and
//! two view-controllers (customers, contacts) driven through [`App`].
//!
//! # Design
//! - `CadastroClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` and `parse_*`; [`Api`] chains
//!   them through a host-supplied [`Transport`].
//! - The server is the source of truth: every mutation is followed by a full
//!   re-fetch, and the only local copy is the contact list cache used when
//!   preparing a contact edit.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod app;
pub mod client;
pub mod contacts;
pub mod customers;
pub mod debounce;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;
pub mod validation;
pub mod view;

pub use api::Api;
pub use app::App;
pub use client::CadastroClient;
pub use contacts::ContactController;
pub use customers::CustomerController;
pub use debounce::SearchDebounce;
pub use error::{ActionError, ApiError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::Transport;
pub use types::{Contact, ContactId, ContactPayload, Customer, CustomerId, CustomerPayload};
pub use view::{Section, TableState, Ui, ViewModel};
