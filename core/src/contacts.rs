//! Contact view-controller, scoped to one customer at a time.

use tracing::{info, warn};

use crate::api::Api;
use crate::error::ActionError;
use crate::types::{Contact, ContactId, ContactPayload, CustomerId};
use crate::validation::ValidationError;
use crate::view::{ContactForm, ContactScope, ContactView, Section, TableState, ViewModel, CONTACTS_LOAD_ERROR};

pub const DELETE_CONTACT_PROMPT: &str = "Tem certeza que deseja excluir este contato?";

impl ContactForm {
    /// Validate the form and build the payload for `customer_id`. `id` is set
    /// when updating.
    pub fn to_payload(
        &self,
        customer_id: CustomerId,
        id: Option<ContactId>,
    ) -> Result<ContactPayload, ValidationError> {
        let kind = self.kind.trim();
        let value = self.value.trim();
        if kind.is_empty() || value.is_empty() {
            return Err(ValidationError::MissingContactFields);
        }
        Ok(ContactPayload {
            id,
            customer_id,
            kind: kind.to_string(),
            value: value.to_string(),
            observation: self.observation.trim().to_string(),
        })
    }

    fn fill_from(&mut self, contact: &Contact) {
        self.kind = contact.kind.clone();
        self.value = contact.value.clone();
        self.observation = contact.observation.clone().unwrap_or_default();
    }
}

pub struct ContactController {
    api: Api,
}

impl ContactController {
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    /// Switch to the contact section for `customer_id`. The customer is
    /// fetched first for its name; if that fails nothing changes.
    pub async fn enter_scope(
        &self,
        vm: &mut ViewModel,
        customer_id: CustomerId,
    ) -> Result<(), ActionError> {
        let customer = self.api.get_customer(customer_id).await?;
        vm.contacts.scope = Some(ContactScope {
            customer_id: customer.id,
            customer_name: customer.name,
        });
        vm.section = Section::Contacts;
        self.refresh(&mut vm.contacts).await;
        vm.contacts.reset_form();
        Ok(())
    }

    /// Fetch the scope's contacts, replacing the local cache. Failures become
    /// an inline error row.
    pub async fn refresh(&self, view: &mut ContactView) {
        let Some(customer_id) = view.scope.as_ref().map(|s| s.customer_id) else {
            view.cache.clear();
            view.table = TableState::default();
            return;
        };
        match self.api.list_contacts(customer_id).await {
            Ok(contacts) => view.show_contacts(contacts),
            Err(err) => {
                warn!(customer_id, error = %err, "failed to load contacts");
                view.cache.clear();
                view.table = TableState::Error(CONTACTS_LOAD_ERROR);
            }
        }
    }

    /// Create, or update when a contact is being edited, for the scoped
    /// customer.
    pub async fn submit(&self, view: &mut ContactView) -> Result<Contact, ActionError> {
        let customer_id = view
            .scope
            .as_ref()
            .map(|s| s.customer_id)
            .ok_or(ActionError::NoContactScope)?;
        let payload = view.form.to_payload(customer_id, view.editing)?;
        let saved = match view.editing {
            Some(id) => self.api.update_contact(id, &payload).await?,
            None => self.api.create_contact(&payload).await?,
        };
        info!(id = saved.id, customer_id, "contact saved");
        self.refresh(view).await;
        view.reset_form();
        Ok(saved)
    }

    /// Load a contact into the form from the cached list. No request is made,
    /// so the cache is trusted to be current.
    pub fn prepare_edit(&self, view: &mut ContactView, id: ContactId) -> Result<(), ActionError> {
        let contact = view
            .cache
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(ActionError::ContactNotLoaded(id))?;
        view.form.fill_from(&contact);
        view.editing = Some(contact.id);
        Ok(())
    }

    pub async fn delete(&self, view: &mut ContactView, id: ContactId) -> Result<(), ActionError> {
        self.api.delete_contact(id).await?;
        info!(id, "contact deleted");
        self.refresh(view).await;
        Ok(())
    }

    pub fn cancel(&self, view: &mut ContactView) {
        view.reset_form();
    }

    /// Drop the scope and go back to the customer section. The caller
    /// re-fetches the customer list.
    pub fn leave_scope(&self, vm: &mut ViewModel) {
        vm.contacts.scope = None;
        vm.contacts.cache.clear();
        vm.contacts.reset_form();
        vm.section = Section::Customers;
    }
}
