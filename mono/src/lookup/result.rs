use std::fmt;

use serde_json::{Map, Value};

use super::envelope::{ResponseEnvelope, VerificationChannel};
use crate::request::RequestError;

/// Where a BVN verification attempt stands after a step.
///
/// `Unstarted -> Initiated -> ChannelChosen -> Completed`, with `Failed` reachable from
/// every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerificationState {
    /// No step has run yet
    #[default]
    Unstarted,
    /// Initiation accepted, channels offered
    Initiated,
    /// Channel accepted, one-time password sent
    ChannelChosen,
    /// Details released
    Completed,
    /// The last step did not succeed
    Failed,
}

impl VerificationState {
    /// Snake case name, used in logs and CLI output
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unstarted => "unstarted",
            Self::Initiated => "initiated",
            Self::ChannelChosen => "channel_chosen",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Whether no further step can follow
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for VerificationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a step did not succeed
#[derive(Debug)]
pub enum Failure {
    /// The API answered with a status other than `successful`
    Remote,
    /// The request failed before an answer arrived: the body could not be encoded, the
    /// request could not be built, or it was never delivered
    Request(RequestError),
    /// The arguments were rejected before any request was made
    Validation,
}

/// Outcome of one workflow step.
///
/// Unsuccessful steps are values, not errors: check [`is_successful`](Self::is_successful)
/// and read [`message`](Self::message), or match on [`failure`](Self::failure) to tell a
/// rejected request from one that never reached the API.
#[derive(Debug)]
pub struct VerificationResult {
    state: VerificationState,
    envelope: ResponseEnvelope,
    methods: Vec<VerificationChannel>,
    session_id: String,
    failure: Option<Failure>,
}

impl VerificationResult {
    /// Result of a step that got an answer from the API
    pub(crate) fn answered(
        reached: VerificationState,
        envelope: ResponseEnvelope,
        methods: Vec<VerificationChannel>,
        session_id: String,
    ) -> Self {
        let successful = envelope.is_successful();

        Self {
            state: if successful {
                reached
            } else {
                VerificationState::Failed
            },
            envelope,
            methods,
            session_id,
            failure: (!successful).then_some(Failure::Remote),
        }
    }

    /// Result of a step whose request failed before an answer arrived
    pub(crate) fn request_failed(err: RequestError) -> Self {
        Self::failed(err.to_string(), Failure::Request(err))
    }

    /// Result of a step rejected locally
    pub(crate) fn invalid(message: &str) -> Self {
        Self::failed(message.to_string(), Failure::Validation)
    }

    fn failed(message: String, failure: Failure) -> Self {
        Self {
            state: VerificationState::Failed,
            envelope: ResponseEnvelope {
                message,
                ..ResponseEnvelope::default()
            },
            methods: Vec::new(),
            session_id: String::new(),
            failure: Some(failure),
        }
    }

    /// Whether the API reported `status == "successful"`
    #[must_use]
    pub const fn is_successful(&self) -> bool {
        self.failure.is_none()
    }

    /// Human readable message from the API, or the local error text
    #[must_use]
    pub fn message(&self) -> &str {
        &self.envelope.message
    }

    /// Raw `status` from the API, empty when there was no answer
    #[must_use]
    pub fn status(&self) -> &str {
        &self.envelope.status
    }

    /// State reached by this step
    #[must_use]
    pub const fn state(&self) -> VerificationState {
        self.state
    }

    /// Cause of an unsuccessful step
    #[must_use]
    pub const fn failure(&self) -> Option<&Failure> {
        self.failure.as_ref()
    }

    /// Channels offered for the one-time password
    #[must_use]
    pub fn methods(&self) -> &[VerificationChannel] {
        &self.methods
    }

    /// Session identifier to pass to the next step, empty if none
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Raw `data` object of the answer
    #[must_use]
    pub const fn data(&self) -> Option<&Map<String, Value>> {
        self.envelope.data.as_ref()
    }

    /// Verified personal details, once the flow is completed
    #[must_use]
    pub fn details(&self) -> Option<&Map<String, Value>> {
        match self.state {
            VerificationState::Completed => self.data(),
            _ => None,
        }
    }
}
