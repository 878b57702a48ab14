//! Records held by the in-memory store.
//!
//! Defined independently of `avatax-core`; integration tests catch schema
//! drift between the two.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchFile {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub batch_id: i32,
    pub name: String,
    #[serde(default, skip_serializing)]
    pub content: Option<String>,
    #[serde(default)]
    pub content_length: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_extension: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    #[serde(default)]
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub company_id: i32,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub batch_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
    #[serde(default)]
    pub record_count: i32,
    #[serde(default)]
    pub files: Vec<BatchFile>,
    #[serde(skip)]
    pub deleted: bool,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub company_id: i32,
    pub contact_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(skip)]
    pub deleted: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: i32,
    pub account_id: i32,
    pub subscription_type_id: i32,
    pub subscription_description: String,
    pub effective_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// One entry of the AvaTax error envelope.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub code: String,
    pub number: i32,
    pub message: String,
    pub severity: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
    pub details: Vec<ErrorDetail>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ErrorResult {
    pub error: ErrorInfo,
}

impl ErrorResult {
    pub fn not_found(entity: &str, id: i32) -> Self {
        let message = format!("{entity} with id {id} was not found");
        Self {
            error: ErrorInfo {
                code: "EntityNotFoundError".to_string(),
                message: message.clone(),
                details: vec![ErrorDetail {
                    code: "EntityNotFoundError".to_string(),
                    number: 4,
                    message,
                    severity: "Error".to_string(),
                }],
            },
        }
    }

    pub fn invalid_query(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            error: ErrorInfo {
                code: "InvalidQuery".to_string(),
                message: message.clone(),
                details: vec![ErrorDetail {
                    code: "InvalidQuery".to_string(),
                    number: 18,
                    message,
                    severity: "Error".to_string(),
                }],
            },
        }
    }
}

/// Subscriptions present at startup. Account 1 holds two, account 2 one.
pub fn seed_subscriptions() -> Vec<Subscription> {
    vec![
        Subscription {
            id: 1,
            account_id: 1,
            subscription_type_id: 1,
            subscription_description: "AvaTaxST".to_string(),
            effective_date: "2024-01-01".to_string(),
            end_date: None,
        },
        Subscription {
            id: 2,
            account_id: 1,
            subscription_type_id: 2,
            subscription_description: "AvaTaxPro".to_string(),
            effective_date: "2024-01-01".to_string(),
            end_date: Some("2026-12-31".to_string()),
        },
        Subscription {
            id: 3,
            account_id: 2,
            subscription_type_id: 1,
            subscription_description: "AvaTaxST".to_string(),
            effective_date: "2025-06-01".to_string(),
            end_date: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_type_uses_wire_name() {
        let batch: Batch =
            serde_json::from_str(r#"{"name":"Upload","type":"TransactionImport"}"#).unwrap();
        assert_eq!(batch.batch_type.as_deref(), Some("TransactionImport"));
        assert_eq!(batch.id, 0);
        assert!(batch.files.is_empty());
    }

    #[test]
    fn file_content_is_never_echoed() {
        let file = BatchFile {
            name: "a.csv".to_string(),
            content: Some("x,y".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&file).unwrap();
        assert!(json.get("content").is_none());
    }

    #[test]
    fn contact_rejects_missing_code() {
        let result: Result<Contact, _> = serde_json::from_str(r#"{"firstName":"Ada"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn contact_keeps_address_and_numbers() {
        let raw = r#"{"contactCode":"C","middleName":"Q","line1":"1 Main St","line2":"Suite 4","line3":"Rear","postalCode":"98101","mobile":"555-0101","fax":"555-0102"}"#;
        let contact: Contact = serde_json::from_str(raw).unwrap();
        let mut json = serde_json::to_value(&contact).unwrap();
        let object = json.as_object_mut().unwrap();
        object.remove("id");
        object.remove("companyId");
        assert_eq!(json, serde_json::from_str::<serde_json::Value>(raw).unwrap());
    }

    #[test]
    fn deleted_flag_stays_off_the_wire() {
        let contact: Contact = serde_json::from_str(r#"{"contactCode":"C","deleted":true}"#).unwrap();
        assert!(!contact.deleted);
        let json = serde_json::to_value(&contact).unwrap();
        assert!(json.get("deleted").is_none());
    }

    #[test]
    fn not_found_envelope_shape() {
        let json = serde_json::to_value(ErrorResult::not_found("Batch", 5)).unwrap();
        assert_eq!(json["error"]["code"], "EntityNotFoundError");
        assert_eq!(json["error"]["details"][0]["number"], 4);
    }
}
