//! Customer view-controller: list and search, create/update form, edit
//! preparation, delete, cancel.

use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::api::Api;
use crate::debounce::SearchDebounce;
use crate::error::ActionError;
use crate::types::{Customer, CustomerId, CustomerPayload};
use crate::validation::{is_cpf_masked, mask_cpf, parse_birth_date_on, ValidationError};
use crate::view::{CustomerForm, CustomerView, TableState, CUSTOMERS_LOAD_ERROR};

/// Confirmation asked before deleting a customer.
pub const DELETE_CUSTOMER_PROMPT: &str =
    "Tem certeza que deseja excluir este cliente? Todos os seus contatos também serão removidos.";

impl CustomerForm {
    /// Validate the form and build the request payload.
    pub fn to_payload(&self, today: NaiveDate) -> Result<CustomerPayload, ValidationError> {
        let name = self.name.trim();
        let cpf = self.cpf.trim();
        if name.is_empty() || cpf.is_empty() {
            return Err(ValidationError::MissingNameOrCpf);
        }
        if !is_cpf_masked(cpf) {
            return Err(ValidationError::InvalidCpf);
        }
        let birth_date = parse_birth_date_on(self.birth_date.trim(), today)
            .ok_or(ValidationError::InvalidBirthDate)?;
        Ok(CustomerPayload {
            name: name.to_string(),
            cpf: cpf.to_string(),
            birth_date,
            address: self.address.trim().to_string(),
        })
    }

    fn fill_from(&mut self, customer: &Customer) {
        self.name = customer.name.clone();
        self.cpf = mask_cpf(&customer.cpf);
        self.birth_date = customer.birth_date.format("%Y-%m-%d").to_string();
        self.address = customer.address.clone().unwrap_or_default();
    }
}

pub struct CustomerController {
    api: Api,
    search: SearchDebounce,
}

impl CustomerController {
    pub fn new(api: Api, search_delay: Duration) -> Self {
        Self {
            api,
            search: SearchDebounce::new(search_delay),
        }
    }

    /// Fetch the list for the current search term and render it. Failures
    /// become an inline error row.
    pub async fn refresh(&self, view: &mut CustomerView) {
        match self.api.list_customers(Some(view.search_term.as_str())).await {
            Ok(customers) => view.show_customers(&customers),
            Err(err) => {
                warn!(error = %err, "failed to load customers");
                view.table = TableState::Error(CUSTOMERS_LOAD_ERROR);
            }
        }
    }

    /// Search-box input: record the term and (re)schedule the fetch.
    pub fn input_search(&mut self, view: &mut CustomerView, term: &str, now: Instant) {
        view.search_term = term.to_string();
        self.search.schedule(now);
    }

    pub fn search_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    /// Run the debounced search if it is due. Returns whether it ran.
    pub async fn poll_search(&mut self, view: &mut CustomerView, now: Instant) -> bool {
        if !self.search.fire_if_due(now) {
            return false;
        }
        self.refresh(view).await;
        true
    }

    /// Create, or update when a customer is being edited. On success the list
    /// is re-fetched and the form reset; on failure the form is left as is.
    pub async fn submit(&self, view: &mut CustomerView) -> Result<Customer, ActionError> {
        let payload = view.form.to_payload(Local::now().date_naive())?;
        let saved = match view.editing {
            Some(id) => self.api.update_customer(id, &payload).await?,
            None => self.api.create_customer(&payload).await?,
        };
        info!(id = saved.id, "customer saved");
        self.refresh(view).await;
        view.reset_form();
        Ok(saved)
    }

    /// Load one customer into the form and enter edit mode. Any edit already
    /// in progress is replaced.
    pub async fn prepare_edit(
        &self,
        view: &mut CustomerView,
        id: CustomerId,
    ) -> Result<(), ActionError> {
        let customer = self.api.get_customer(id).await?;
        view.form.fill_from(&customer);
        view.editing = Some(customer.id);
        Ok(())
    }

    /// Delete a customer (contacts go with it, server-side) and re-fetch.
    /// Confirmation is the caller's job.
    pub async fn delete(&self, view: &mut CustomerView, id: CustomerId) -> Result<(), ActionError> {
        self.api.delete_customer(id).await?;
        info!(id, "customer deleted");
        self.refresh(view).await;
        Ok(())
    }

    pub fn cancel(&self, view: &mut CustomerView) {
        view.reset_form();
    }
}
