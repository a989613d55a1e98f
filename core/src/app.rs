//! Event dispatch: one method per user interaction, wiring the controllers to
//! the view-model and to the host's `Ui`.
//!
//! Every `ActionError` ends here as an alert. Each action borrows the `App`
//! mutably until its requests resolve, so user actions run one at a time and
//! a second submit only starts after the first has refetched and reset.

use std::time::{Duration, Instant};

use crate::api::Api;
use crate::contacts::{ContactController, DELETE_CONTACT_PROMPT};
use crate::customers::{CustomerController, DELETE_CUSTOMER_PROMPT};
use crate::debounce::DEFAULT_SEARCH_DELAY;
use crate::error::ActionError;
use crate::types::{ContactId, CustomerId};
use crate::view::{ContactForm, CustomerForm, Section, Ui, ViewModel};

pub struct App<U: Ui> {
    view: ViewModel,
    customers: CustomerController,
    contacts: ContactController,
    ui: U,
}

impl<U: Ui> App<U> {
    pub fn new(api: Api, ui: U) -> Self {
        Self::with_search_delay(api, ui, DEFAULT_SEARCH_DELAY)
    }

    pub fn with_search_delay(api: Api, ui: U, search_delay: Duration) -> Self {
        Self {
            view: ViewModel::default(),
            customers: CustomerController::new(api.clone(), search_delay),
            contacts: ContactController::new(api),
            ui,
        }
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    /// Initial page load.
    pub async fn load(&mut self) {
        self.customers.refresh(&mut self.view.customers).await;
    }

    /// Re-fetch whichever list is on screen.
    pub async fn reload(&mut self) {
        match self.view.section {
            Section::Customers => self.customers.refresh(&mut self.view.customers).await,
            Section::Contacts => self.contacts.refresh(&mut self.view.contacts).await,
        }
    }

    pub fn customer_form_mut(&mut self) -> &mut CustomerForm {
        &mut self.view.customers.form
    }

    pub fn contact_form_mut(&mut self) -> &mut ContactForm {
        &mut self.view.contacts.form
    }

    pub fn input_search(&mut self, term: &str, now: Instant) {
        self.customers
            .input_search(&mut self.view.customers, term, now);
    }

    pub fn search_deadline(&self) -> Option<Instant> {
        self.customers.search_deadline()
    }

    pub async fn poll_search(&mut self, now: Instant) -> bool {
        self.customers
            .poll_search(&mut self.view.customers, now)
            .await
    }

    pub async fn submit_customer(&mut self) {
        let result = self.customers.submit(&mut self.view.customers).await;
        self.report(result.map(drop), "Erro ao salvar");
    }

    pub async fn edit_customer(&mut self, id: CustomerId) {
        let result = self
            .customers
            .prepare_edit(&mut self.view.customers, id)
            .await;
        if self.report(result, "Erro ao carregar cliente") {
            self.ui.scroll_to_top();
        }
    }

    pub async fn delete_customer(&mut self, id: CustomerId) {
        if !self.ui.confirm(DELETE_CUSTOMER_PROMPT).await {
            return;
        }
        let result = self.customers.delete(&mut self.view.customers, id).await;
        self.report(result, "Erro ao excluir");
    }

    pub fn cancel_customer_edit(&mut self) {
        self.customers.cancel(&mut self.view.customers);
    }

    pub async fn open_contacts(&mut self, customer_id: CustomerId) {
        let result = self.contacts.enter_scope(&mut self.view, customer_id).await;
        self.report(result, "Erro ao carregar cliente");
    }

    pub async fn close_contacts(&mut self) {
        self.contacts.leave_scope(&mut self.view);
        self.customers.refresh(&mut self.view.customers).await;
    }

    pub async fn submit_contact(&mut self) {
        let result = self.contacts.submit(&mut self.view.contacts).await;
        self.report(result.map(drop), "Erro ao salvar contato");
    }

    pub fn edit_contact(&mut self, id: ContactId) {
        let result = self.contacts.prepare_edit(&mut self.view.contacts, id);
        self.report(result, "Erro ao editar contato");
    }

    pub async fn delete_contact(&mut self, id: ContactId) {
        if !self.ui.confirm(DELETE_CONTACT_PROMPT).await {
            return;
        }
        let result = self.contacts.delete(&mut self.view.contacts, id).await;
        self.report(result, "Erro ao excluir contato");
    }

    pub fn cancel_contact_edit(&mut self) {
        self.contacts.cancel(&mut self.view.contacts);
    }

    /// Alert on failure. Validation messages are shown as is; everything else
    /// is prefixed with what was being attempted.
    fn report(&self, result: Result<(), ActionError>, context: &str) -> bool {
        match result {
            Ok(()) => true,
            Err(err @ ActionError::Validation(_)) => {
                self.ui.alert(&err.to_string());
                false
            }
            Err(err) => {
                self.ui.alert(&format!("{context}: {err}"));
                false
            }
        }
    }
}
