//! BVN lookup: initiate, verify through a channel, fetch the verified details.
//!
//! [Integration guide](https://docs.mono.co/docs/bvn-lookup-integration-guide)
//!
//! The client keeps no state between the steps. The session identifier returned by
//! [`BvnLookUp::initiate`] is handed back by the caller to the two later steps.

use reqwest::Method;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use super::envelope::ResponseEnvelope;
use super::{ContractViolation, VerificationMethod, VerificationResult, VerificationState};
use crate::client::MonoClient;
use crate::request::RequestSpec;

const INITIATE_PATH: &str = "lookup/bvn/initiate";
const VERIFY_PATH: &str = "lookup/bvn/verify";
const DETAILS_PATH: &str = "lookup/bvn/details";

/// Header correlating the steps of one verification attempt
pub const SESSION_HEADER: &str = "x-session-id";

/// Message of a verify step rejected for lack of a phone number
pub const PHONE_NUMBER_REQUIRED: &str =
    "A phone number is required for the alternate_phone verification method";

/// Decode target for every step. A body that is not a JSON object decodes to `None`.
type Payload = Option<Map<String, Value>>;

#[derive(Debug, Serialize)]
struct InitiateRequest<'a> {
    bvn: &'a str,
}

#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    method: VerificationMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone_number: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct DetailsRequest<'a> {
    otp: &'a str,
}

/// Workflow step, mapped to the state it reaches on success
#[derive(Debug, Clone, Copy)]
enum Step {
    Initiate,
    Verify,
    FetchDetails,
}

impl Step {
    /// Whether `data` carries the offered channels. Details answers are free-form.
    const fn offers_channels(self) -> bool {
        matches!(self, Self::Initiate | Self::Verify)
    }

    const fn reached(self) -> VerificationState {
        match self {
            Self::Initiate => VerificationState::Initiated,
            Self::Verify => VerificationState::ChannelChosen,
            Self::FetchDetails => VerificationState::Completed,
        }
    }
}

/// BVN lookup operations
#[derive(Debug, Clone)]
pub struct BvnLookUp {
    client: MonoClient,
}

impl BvnLookUp {
    /// Creates the BVN lookup over an existing client
    #[must_use]
    pub const fn new(client: MonoClient) -> Self {
        Self { client }
    }

    /// Starts a verification for `bvn`.
    ///
    /// On success the result carries the session identifier and the channels the
    /// one-time password can be sent through.
    ///
    /// # Errors
    /// Returns a [`ContractViolation`] if the answer does not match the documented shape,
    /// including a channel without a string `method` or `hint`. Request failures and
    /// rejections are reported through the returned result instead.
    #[instrument(name = "bvn_initiate", skip_all)]
    pub async fn initiate(&self, bvn: &str) -> Result<VerificationResult, ContractViolation> {
        let spec = self
            .client
            .request(Method::POST, INITIATE_PATH)
            .with_body(InitiateRequest { bvn });

        self.run(Step::Initiate, spec, None).await
    }

    /// Chooses the channel the one-time password is sent through.
    ///
    /// `phone_number` is required for [`VerificationMethod::AlternatePhone`] and ignored
    /// otherwise. Without it, no request is made and the result fails with
    /// [`PHONE_NUMBER_REQUIRED`].
    ///
    /// # Errors
    /// Returns a [`ContractViolation`] if the answer does not match the documented shape.
    #[instrument(name = "bvn_verify", skip_all, fields(method = %method))]
    pub async fn verify(
        &self,
        method: VerificationMethod,
        session_id: &str,
        phone_number: Option<&str>,
    ) -> Result<VerificationResult, ContractViolation> {
        let phone_number = if method.requires_phone_number() {
            let Some(phone_number) = phone_number else {
                warn!("No phone number for the alternate phone channel, not sending");
                return Ok(VerificationResult::invalid(PHONE_NUMBER_REQUIRED));
            };
            Some(phone_number)
        } else {
            None
        };

        let spec = self
            .client
            .request(Method::POST, VERIFY_PATH)
            .with_header(SESSION_HEADER, session_id)
            .with_body(VerifyRequest {
                method,
                phone_number,
            });

        self.run(Step::Verify, spec, Some(session_id)).await
    }

    /// Exchanges the one-time password for the verified personal details.
    ///
    /// # Errors
    /// Returns a [`ContractViolation`] if the answer does not match the documented shape.
    #[instrument(name = "bvn_details", skip_all)]
    pub async fn fetch_details(
        &self,
        otp: &str,
        session_id: &str,
    ) -> Result<VerificationResult, ContractViolation> {
        let spec = self
            .client
            .request(Method::POST, DETAILS_PATH)
            .with_header(SESSION_HEADER, session_id)
            .with_body(DetailsRequest { otp });

        self.run(Step::FetchDetails, spec, Some(session_id)).await
    }

    /// Sends a step and decodes its envelope.
    ///
    /// `session_id` is echoed back on success; without it the session comes from the answer.
    async fn run<B: Serialize>(
        &self,
        step: Step,
        spec: RequestSpec<B>,
        session_id: Option<&str>,
    ) -> Result<VerificationResult, ContractViolation> {
        let payload: Payload = match self.client.execute(spec).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "BVN lookup request failed");
                return Ok(VerificationResult::request_failed(e));
            }
        };

        let result = Self::interpret(step, payload, session_id)
            .inspect_err(|e| warn!(error = %e, "BVN lookup answer breaks the API contract"))?;

        if result.is_successful() {
            info!(state = %result.state(), "BVN lookup step succeeded");
        } else {
            info!(
                status = result.status(),
                message = result.message(),
                "BVN lookup step rejected"
            );
        }

        Ok(result)
    }

    fn interpret(
        step: Step,
        payload: Payload,
        session_id: Option<&str>,
    ) -> Result<VerificationResult, ContractViolation> {
        let envelope = ResponseEnvelope::parse(payload)?;
        let methods = if step.offers_channels() {
            envelope.methods()?
        } else {
            Vec::new()
        };

        let session_id = match session_id {
            None => envelope.session_id()?,
            Some(session_id) if envelope.is_successful() => session_id.to_string(),
            Some(_) => String::new(),
        };

        Ok(VerificationResult::answered(
            step.reached(),
            envelope,
            methods,
            session_id,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn payload(value: Value) -> Payload {
        value.as_object().cloned()
    }

    #[test]
    fn test_verify_body_omits_phone_number_when_absent() {
        let body = serde_json::to_value(VerifyRequest {
            method: VerificationMethod::Phone1,
            phone_number: None,
        })
        .unwrap();

        assert_eq!(body, json!({ "method": "phone_1" }));
    }

    #[test]
    fn test_interpret_initiate_reads_session_from_answer() {
        let result = BvnLookUp::interpret(
            Step::Initiate,
            payload(json!({
                "status": "successful",
                "message": "ok",
                "data": { "session_id": "S1", "methods": [] }
            })),
            None,
        )
        .unwrap();

        assert_eq!(result.session_id(), "S1");
        assert_eq!(result.state(), VerificationState::Initiated);
    }

    #[test]
    fn test_interpret_echoes_session_only_on_success() {
        let answer = |status: &str| {
            payload(json!({
                "status": status,
                "message": "m",
                "data": { "session_id": "FROM_API" }
            }))
        };

        let ok = BvnLookUp::interpret(Step::Verify, answer("successful"), Some("S1")).unwrap();
        assert_eq!(ok.session_id(), "S1");
        assert_eq!(ok.state(), VerificationState::ChannelChosen);

        let rejected = BvnLookUp::interpret(Step::Verify, answer("failed"), Some("S1")).unwrap();
        assert_eq!(rejected.session_id(), "");
        assert_eq!(rejected.state(), VerificationState::Failed);
    }

    #[test]
    fn test_interpret_validates_methods_on_verify() {
        let result = BvnLookUp::interpret(
            Step::Verify,
            payload(json!({
                "status": "successful",
                "message": "ok",
                "data": { "methods": [{ "method": "email" }] }
            })),
            Some("S1"),
        );

        assert_eq!(
            result.unwrap_err(),
            ContractViolation::MethodEntryField {
                index: 0,
                field: "hint"
            }
        );
    }

    #[test]
    fn test_interpret_details_ignores_methods_key() {
        let result = BvnLookUp::interpret(
            Step::FetchDetails,
            payload(json!({
                "status": "successful",
                "message": "ok",
                "data": { "first_name": "Ada", "methods": "sms" }
            })),
            Some("S1"),
        )
        .unwrap();

        assert!(result.is_successful());
        assert!(result.methods().is_empty());
        assert_eq!(result.state(), VerificationState::Completed);
        assert_eq!(result.details().unwrap()["methods"], "sms");
    }
}
