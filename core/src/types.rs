//! Domain DTOs for the cadastro API.
//!
//! # Design
//! Field names follow the API's Portuguese JSON schema through serde renames
//! while the Rust side stays in English. These types are defined independently
//! from the mock-server crate; integration tests catch schema drift.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type CustomerId = i64;
pub type ContactId = i64;

/// A customer as returned by the API. `cpf` arrives as stored by the server
/// (digits only) and is masked for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    #[serde(rename = "nome")]
    pub name: String,
    pub cpf: String,
    #[serde(rename = "dataNascimento")]
    pub birth_date: NaiveDate,
    #[serde(rename = "endereco", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Request payload for creating or updating a customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerPayload {
    #[serde(rename = "nome")]
    pub name: String,
    pub cpf: String,
    #[serde(rename = "dataNascimento")]
    pub birth_date: NaiveDate,
    #[serde(rename = "endereco")]
    pub address: String,
}

/// A contact belonging to one customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    pub id: ContactId,
    #[serde(rename = "clienteId")]
    pub customer_id: CustomerId,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "valor")]
    pub value: String,
    #[serde(rename = "observacao", default, skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
}

/// Request payload for creating or updating a contact. `id` is only sent
/// when updating.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContactId>,
    #[serde(rename = "clienteId")]
    pub customer_id: CustomerId,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "valor")]
    pub value: String,
    #[serde(rename = "observacao")]
    pub observation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_without_address_deserializes() {
        let json = r#"{"id":7,"nome":"Ana","cpf":"12345678900","dataNascimento":"1990-05-17"}"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.id, 7);
        assert_eq!(customer.birth_date, NaiveDate::from_ymd_opt(1990, 5, 17).unwrap());
        assert!(customer.address.is_none());
    }

    #[test]
    fn customer_payload_uses_api_field_names() {
        let payload = CustomerPayload {
            name: "Ana".to_string(),
            cpf: "123.456.789-00".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            address: String::new(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["nome"], "Ana");
        assert_eq!(json["cpf"], "123.456.789-00");
        assert_eq!(json["dataNascimento"], "1990-05-17");
        assert_eq!(json["endereco"], "");
    }

    #[test]
    fn contact_payload_omits_id_when_creating() {
        let payload = ContactPayload {
            id: None,
            customer_id: 3,
            kind: "Email".to_string(),
            value: "ana@example.com".to_string(),
            observation: String::new(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["clienteId"], 3);
        assert_eq!(json["tipo"], "Email");
        assert_eq!(json["valor"], "ana@example.com");
    }
}
