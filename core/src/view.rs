//! View-model: everything the UI renders, plus the `Ui` capabilities the
//! controllers need from the host.
//!
//! # Design
//! All transient state (which record is being edited, which customer the
//! contact section is scoped to, the cached contact list) lives in one
//! [`ViewModel`] owned by the [`App`](crate::App). Hosts render from it after
//! every action; nothing here is authoritative, the server is.

use async_trait::async_trait;

use crate::types::{Contact, ContactId, Customer, CustomerId};
use crate::validation::{format_date_br, mask_cpf};

pub const NO_CUSTOMERS: &str = "Nenhum cliente cadastrado.";
pub const CUSTOMERS_LOAD_ERROR: &str = "Erro ao carregar clientes. O back-end está rodando?";
pub const NO_CONTACTS: &str = "Nenhum contato cadastrado para este cliente.";
pub const CONTACTS_LOAD_ERROR: &str = "Erro ao carregar contatos.";

pub const NEW_CUSTOMER_TITLE: &str = "Cadastrar Cliente";
pub const EDIT_CUSTOMER_TITLE: &str = "Editar Cliente";
pub const NEW_CONTACT_TITLE: &str = "Adicionar Contato";
pub const EDIT_CONTACT_TITLE: &str = "Editar Contato";

/// Host-provided interactions that block on, or notify, the user.
#[async_trait]
pub trait Ui: Send + Sync {
    fn alert(&self, message: &str);

    async fn confirm(&self, message: &str) -> bool;

    fn scroll_to_top(&self) {}
}

/// Which of the two sections is visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    Customers,
    Contacts,
}

/// Contents of a rendered table: data rows, a placeholder row when the list
/// is empty, or an inline error row when the fetch failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableState<R> {
    Rows(Vec<R>),
    Placeholder(&'static str),
    Error(&'static str),
}

impl<R> Default for TableState<R> {
    fn default() -> Self {
        TableState::Rows(Vec::new())
    }
}

impl<R> TableState<R> {
    pub fn rows(&self) -> &[R] {
        match self {
            TableState::Rows(rows) => rows,
            _ => &[],
        }
    }

    fn from_list(rows: Vec<R>, placeholder: &'static str) -> Self {
        if rows.is_empty() {
            TableState::Placeholder(placeholder)
        } else {
            TableState::Rows(rows)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRow {
    pub id: CustomerId,
    pub name: String,
    pub cpf: String,
    pub birth_date: String,
    pub address: String,
    pub contact_count: usize,
}

impl CustomerRow {
    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name.clone(),
            cpf: mask_cpf(&customer.cpf),
            birth_date: format_date_br(customer.birth_date),
            address: customer.address.clone().unwrap_or_default(),
            // TODO: fill in once the list endpoint reports contact counts.
            contact_count: 0,
        }
    }

    pub fn contacts_label(&self) -> String {
        format!("Contatos ({})", self.contact_count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRow {
    pub id: ContactId,
    pub kind: String,
    pub value: String,
    pub observation: String,
}

impl ContactRow {
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            id: contact.id,
            kind: contact.kind.clone(),
            value: contact.value.clone(),
            observation: contact.observation.clone().unwrap_or_default(),
        }
    }
}

/// Raw customer form fields, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerForm {
    pub name: String,
    pub cpf: String,
    pub birth_date: String,
    pub address: String,
}

impl CustomerForm {
    /// Input handler for the CPF field: keeps the field masked as the user
    /// types.
    pub fn input_cpf(&mut self, raw: &str) {
        self.cpf = mask_cpf(raw);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub kind: String,
    pub value: String,
    pub observation: String,
}

#[derive(Debug, Clone, Default)]
pub struct CustomerView {
    pub table: TableState<CustomerRow>,
    pub search_term: String,
    pub form: CustomerForm,
    pub editing: Option<CustomerId>,
}

impl CustomerView {
    pub fn form_title(&self) -> &'static str {
        if self.editing.is_some() {
            EDIT_CUSTOMER_TITLE
        } else {
            NEW_CUSTOMER_TITLE
        }
    }

    pub fn cancel_visible(&self) -> bool {
        self.editing.is_some()
    }

    pub fn reset_form(&mut self) {
        self.editing = None;
        self.form = CustomerForm::default();
    }

    pub(crate) fn show_customers(&mut self, customers: &[Customer]) {
        let rows = customers.iter().map(CustomerRow::from_customer).collect();
        self.table = TableState::from_list(rows, NO_CUSTOMERS);
    }
}

/// The customer whose contacts are on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactScope {
    pub customer_id: CustomerId,
    pub customer_name: String,
}

#[derive(Debug, Clone, Default)]
pub struct ContactView {
    pub scope: Option<ContactScope>,
    /// Last fetched list for the scope; replaced wholesale on every fetch.
    pub cache: Vec<Contact>,
    pub table: TableState<ContactRow>,
    pub form: ContactForm,
    pub editing: Option<ContactId>,
}

impl ContactView {
    pub fn form_title(&self) -> &'static str {
        if self.editing.is_some() {
            EDIT_CONTACT_TITLE
        } else {
            NEW_CONTACT_TITLE
        }
    }

    pub fn cancel_visible(&self) -> bool {
        self.editing.is_some()
    }

    pub fn reset_form(&mut self) {
        self.editing = None;
        self.form = ContactForm::default();
    }

    pub(crate) fn show_contacts(&mut self, contacts: Vec<Contact>) {
        let rows = contacts.iter().map(ContactRow::from_contact).collect();
        self.table = TableState::from_list(rows, NO_CONTACTS);
        self.cache = contacts;
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViewModel {
    pub section: Section,
    pub customers: CustomerView,
    pub contacts: ContactView,
}
