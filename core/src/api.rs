//! Typed API operations: build, execute through the host transport, parse.

use std::sync::Arc;

use tracing::debug;

use crate::client::CadastroClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Contact, ContactId, ContactPayload, Customer, CustomerId, CustomerPayload};

/// A client bound to a transport. Cheap to clone.
#[derive(Clone)]
pub struct Api {
    client: CadastroClient,
    transport: Arc<dyn Transport>,
}

impl Api {
    pub fn new(client: CadastroClient, transport: Arc<dyn Transport>) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &CadastroClient {
        &self.client
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let (method, path) = (request.method, request.path.clone());
        let response = self.transport.execute(request).await?;
        debug!(%method, %path, status = response.status, "api call");
        Ok(response)
    }

    pub async fn list_customers(&self, search: Option<&str>) -> Result<Vec<Customer>, ApiError> {
        let response = self.send(self.client.build_list_customers(search)).await?;
        self.client.parse_list_customers(response)
    }

    pub async fn get_customer(&self, id: CustomerId) -> Result<Customer, ApiError> {
        let response = self.send(self.client.build_get_customer(id)).await?;
        self.client.parse_get_customer(response)
    }

    pub async fn create_customer(&self, input: &CustomerPayload) -> Result<Customer, ApiError> {
        let response = self.send(self.client.build_create_customer(input)?).await?;
        self.client.parse_create_customer(response)
    }

    pub async fn update_customer(
        &self,
        id: CustomerId,
        input: &CustomerPayload,
    ) -> Result<Customer, ApiError> {
        let response = self.send(self.client.build_update_customer(id, input)?).await?;
        self.client.parse_update_customer(response)
    }

    pub async fn delete_customer(&self, id: CustomerId) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete_customer(id)).await?;
        self.client.parse_delete_customer(response)
    }

    pub async fn list_contacts(&self, customer_id: CustomerId) -> Result<Vec<Contact>, ApiError> {
        let response = self.send(self.client.build_list_contacts(customer_id)).await?;
        self.client.parse_list_contacts(response)
    }

    pub async fn create_contact(&self, input: &ContactPayload) -> Result<Contact, ApiError> {
        let response = self.send(self.client.build_create_contact(input)?).await?;
        self.client.parse_create_contact(response)
    }

    pub async fn update_contact(
        &self,
        id: ContactId,
        input: &ContactPayload,
    ) -> Result<Contact, ApiError> {
        let response = self.send(self.client.build_update_contact(id, input)?).await?;
        self.client.parse_update_contact(response)
    }

    pub async fn delete_contact(&self, id: ContactId) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete_contact(id)).await?;
        self.client.parse_delete_contact(response)
    }
}
