//! Response envelope shared by every signup API endpoint.
//!
//! `{ "success": bool, "data": ..., "message": "..." }`. A missing or false
//! `success` is a domain-level failure, distinct from a transport failure.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::{AppError, AppResult};

/// Message used when the API rejects a request without saying why.
pub const UNSPECIFIED_REJECTION: &str = "The request was not successful";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Positive reply of a command endpoint (login, register)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiReply {
    pub message: Option<String>,
    pub data: Option<Value>,
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        self.success == Some(true)
    }

    fn rejection(self) -> AppError {
        AppError::rejected(
            self.message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| UNSPECIFIED_REJECTION.to_string()),
        )
    }

    /// Accept a command reply.
    pub fn into_reply(self) -> AppResult<ApiReply> {
        if !self.is_success() {
            return Err(self.rejection());
        }
        Ok(ApiReply {
            message: self.message,
            data: self.data,
        })
    }

    /// Accept a list reply. `data` must be an array; anything else is a
    /// domain failure. Malformed items are skipped, and only a list where
    /// no item could be read is a decode failure.
    pub fn into_list<T: DeserializeOwned>(self, what: &str) -> AppResult<Vec<T>> {
        if !self.is_success() {
            return Err(self.rejection());
        }
        let items = match self.data {
            Some(Value::Array(items)) => items,
            _ => return Err(AppError::rejected(format!("{} data is not a list", what))),
        };

        let total = items.len();
        let mut last_error = None;
        let list: Vec<T> = items
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("Skipping malformed {} entry: {}", what, e);
                    last_error = Some(e);
                    None
                }
            })
            .collect();

        match last_error {
            Some(e) if list.is_empty() => Err(e.into()),
            _ => {
                if list.len() < total {
                    warn!("{}: kept {} of {} entries", what, list.len(), total);
                }
                Ok(list)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Envelope {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_missing_success_is_rejection() {
        let err = parse(r#"{"message": "Invalid API key"}"#)
            .into_reply()
            .unwrap_err();
        assert!(matches!(err, AppError::Rejected(msg) if msg == "Invalid API key"));
    }

    #[test]
    fn test_false_success_without_message() {
        let err = parse(r#"{"success": false}"#).into_reply().unwrap_err();
        assert!(matches!(err, AppError::Rejected(msg) if msg == UNSPECIFIED_REJECTION));
    }

    #[test]
    fn test_list_requires_array() {
        let err = parse(r#"{"success": true, "data": {"id": 1}}"#)
            .into_list::<Value>("Countries")
            .unwrap_err();
        assert!(matches!(err, AppError::Rejected(msg) if msg == "Countries data is not a list"));

        let items = parse(r#"{"success": true, "data": [1, 2, 3]}"#)
            .into_list::<i64>("Numbers")
            .unwrap();
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_unreadable_list_is_decode_error() {
        let err = parse(r#"{"success": true, "data": ["x"]}"#)
            .into_list::<i64>("Numbers")
            .unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
        assert!(err.is_transport());
    }

    #[test]
    fn test_malformed_item_does_not_drop_the_list() {
        let items = parse(r#"{"success": true, "data": [1, "x", null, 4]}"#)
            .into_list::<i64>("Numbers")
            .unwrap();
        assert_eq!(items, vec![1, 4]);
    }

    #[test]
    fn test_record_without_id_is_dropped() {
        let industries = parse(
            r#"{"success": true, "data": [
                {"id": 1, "name_en": "Retail", "name_ar": null},
                {"id": null, "name_en": "Broken"}
            ]}"#,
        )
        .into_list::<domain::Industry>("Industries")
        .unwrap();
        assert_eq!(industries.len(), 1);
        assert_eq!(industries[0].name_en, "Retail");
        assert_eq!(industries[0].name_ar, "");
    }

    #[test]
    fn test_empty_list_is_accepted() {
        let items = parse(r#"{"success": true, "data": []}"#)
            .into_list::<i64>("Numbers")
            .unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_reply_keeps_message() {
        let reply = parse(r#"{"success": true, "message": "Welcome"}"#)
            .into_reply()
            .unwrap();
        assert_eq!(reply.message.as_deref(), Some("Welcome"));
    }
}
