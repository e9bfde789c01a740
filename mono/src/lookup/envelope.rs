//! Strict decoding of the `{status, message, data}` response envelope.
//!
//! Absent fields fall back to empty values. Present fields of the wrong type are reported
//! as [`ContractViolation`]s.

use serde_json::{Map, Value};

use super::{ContractViolation, VerificationMethod};

/// `status` value of a successful call
pub const STATUS_SUCCESSFUL: &str = "successful";

/// Decoded response envelope
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseEnvelope {
    /// `status`, empty when absent
    pub status: String,
    /// `message`, empty when absent
    pub message: String,
    /// `data`, shape depends on the endpoint
    pub data: Option<Map<String, Value>>,
}

impl ResponseEnvelope {
    /// Decodes an envelope from the raw response object.
    ///
    /// `None` (a body that was not a JSON object) yields the empty envelope.
    ///
    /// # Errors
    /// Returns a [`ContractViolation`] if `message`, `status` or `data` has the wrong type
    pub fn parse(payload: Option<Map<String, Value>>) -> Result<Self, ContractViolation> {
        let Some(mut payload) = payload else {
            return Ok(Self::default());
        };

        let message = match payload.remove("message") {
            None => String::new(),
            Some(Value::String(message)) => message,
            Some(_) => return Err(ContractViolation::MessageNotString),
        };

        let status = match payload.remove("status") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(status)) => status,
            Some(_) => return Err(ContractViolation::StatusNotString),
        };

        let data = match payload.remove("data") {
            None | Some(Value::Null) => None,
            Some(Value::Object(data)) => Some(data),
            Some(_) => return Err(ContractViolation::DataNotObject),
        };

        Ok(Self {
            status,
            message,
            data,
        })
    }

    /// Whether the API reported success
    #[must_use]
    pub fn is_successful(&self) -> bool {
        self.status == STATUS_SUCCESSFUL
    }

    /// `data.session_id`, empty when absent
    ///
    /// # Errors
    /// Returns [`ContractViolation::SessionIdNotString`] if it is not a string
    pub fn session_id(&self) -> Result<String, ContractViolation> {
        match self.field("session_id") {
            None | Some(Value::Null) => Ok(String::new()),
            Some(Value::String(session_id)) => Ok(session_id.clone()),
            Some(_) => Err(ContractViolation::SessionIdNotString),
        }
    }

    /// `data.methods`, empty when absent. Every entry must carry string `method` and `hint`.
    ///
    /// # Errors
    /// Returns a [`ContractViolation`] for the first malformed entry
    pub fn methods(&self) -> Result<Vec<VerificationChannel>, ContractViolation> {
        let entries = match self.field("methods") {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(entries)) => entries,
            Some(_) => return Err(ContractViolation::MethodsNotArray),
        };

        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| -> Result<_, ContractViolation> {
                let entry = entry
                    .as_object()
                    .ok_or(ContractViolation::MethodEntryNotObject { index })?;
                let string_field = |field: &'static str| {
                    entry
                        .get(field)
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .ok_or(ContractViolation::MethodEntryField { index, field })
                };

                Ok(VerificationChannel {
                    method: string_field("method")?,
                    hint: string_field("hint")?,
                })
            })
            .collect()
    }

    fn field(&self, name: &str) -> Option<&Value> {
        self.data.as_ref().and_then(|data| data.get(name))
    }
}

/// One delivery channel offered for the one-time password
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationChannel {
    /// Wire string of the channel, e.g. `phone_1`
    pub method: String,
    /// Masked destination, e.g. `e***@x.com`
    pub hint: String,
}

impl VerificationChannel {
    /// Interprets the wire string
    ///
    /// # Errors
    /// Returns [`ContractViolation::InvalidMethod`] for an unknown channel
    pub fn kind(&self) -> Result<VerificationMethod, ContractViolation> {
        self.method.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn object(value: Value) -> Option<Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            _ => panic!("test payload must be an object"),
        }
    }

    #[test]
    fn test_parse_full_envelope() {
        let envelope = ResponseEnvelope::parse(object(json!({
            "status": "successful",
            "message": "BVN lookup initiated",
            "data": {
                "session_id": "S1",
                "methods": [
                    { "method": "email", "hint": "e@x.com" },
                    { "method": "phone_1", "hint": "0803****21" }
                ]
            }
        })))
        .unwrap();

        assert!(envelope.is_successful());
        assert_eq!(envelope.message, "BVN lookup initiated");
        assert_eq!(envelope.session_id().unwrap(), "S1");
        assert_eq!(
            envelope.methods().unwrap(),
            vec![
                VerificationChannel {
                    method: "email".to_string(),
                    hint: "e@x.com".to_string()
                },
                VerificationChannel {
                    method: "phone_1".to_string(),
                    hint: "0803****21".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_absent_fields_default_to_empty() {
        let envelope = ResponseEnvelope::parse(object(json!({}))).unwrap();

        assert_eq!(envelope, ResponseEnvelope::default());
        assert!(!envelope.is_successful());
        assert_eq!(envelope.session_id().unwrap(), "");
        assert!(envelope.methods().unwrap().is_empty());
    }

    #[test]
    fn test_missing_payload_is_empty_envelope() {
        assert_eq!(
            ResponseEnvelope::parse(None).unwrap(),
            ResponseEnvelope::default()
        );
    }

    #[test]
    fn test_null_status_and_data_are_absent() {
        let envelope = ResponseEnvelope::parse(object(json!({
            "status": null,
            "message": "failed",
            "data": null
        })))
        .unwrap();

        assert_eq!(envelope.status, "");
        assert_eq!(envelope.message, "failed");
        assert_eq!(envelope.data, None);
    }

    #[test]
    fn test_non_string_message_is_violation() {
        for message in [json!(42), json!(null), json!({ "text": "ok" })] {
            let result = ResponseEnvelope::parse(object(json!({
                "status": "successful",
                "message": message
            })));
            assert_eq!(result, Err(ContractViolation::MessageNotString));
        }
    }

    #[test]
    fn test_mistyped_envelope_fields_are_violations() {
        assert_eq!(
            ResponseEnvelope::parse(object(json!({ "message": "ok", "status": true }))),
            Err(ContractViolation::StatusNotString)
        );
        assert_eq!(
            ResponseEnvelope::parse(object(json!({ "message": "ok", "data": [1, 2] }))),
            Err(ContractViolation::DataNotObject)
        );
    }

    #[test]
    fn test_mistyped_data_fields_are_violations() {
        let envelope = ResponseEnvelope::parse(object(json!({
            "message": "ok",
            "data": { "session_id": 7, "methods": "email" }
        })))
        .unwrap();

        assert_eq!(
            envelope.session_id(),
            Err(ContractViolation::SessionIdNotString)
        );
        assert_eq!(envelope.methods(), Err(ContractViolation::MethodsNotArray));
    }

    #[test]
    fn test_malformed_method_entries() {
        let methods = |entries: Value| {
            ResponseEnvelope::parse(object(json!({
                "message": "ok",
                "data": { "methods": entries }
            })))
            .unwrap()
            .methods()
        };

        assert_eq!(
            methods(json!([{ "method": "email", "hint": "e@x.com" }, { "method": "phone" }])),
            Err(ContractViolation::MethodEntryField {
                index: 1,
                field: "hint"
            })
        );
        assert_eq!(
            methods(json!([{ "hint": "e@x.com" }])),
            Err(ContractViolation::MethodEntryField {
                index: 0,
                field: "method"
            })
        );
        assert_eq!(
            methods(json!([{ "method": 1, "hint": "e@x.com" }])),
            Err(ContractViolation::MethodEntryField {
                index: 0,
                field: "method"
            })
        );
        assert_eq!(
            methods(json!(["email"])),
            Err(ContractViolation::MethodEntryNotObject { index: 0 })
        );
    }

    #[test]
    fn test_channel_kind_is_interpreted_lazily() {
        let known = VerificationChannel {
            method: "alternate_phone".to_string(),
            hint: String::new(),
        };
        let unknown = VerificationChannel {
            method: "carrier_pigeon".to_string(),
            hint: String::new(),
        };

        assert_eq!(known.kind(), Ok(VerificationMethod::AlternatePhone));
        assert_eq!(
            unknown.kind(),
            Err(ContractViolation::InvalidMethod("carrier_pigeon".to_string()))
        );
    }
}
