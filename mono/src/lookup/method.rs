use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ContractViolation;

/// Channel through which the BVN one-time password is delivered.
///
/// See step 2 of the [BVN lookup integration guide](https://docs.mono.co/docs/bvn-lookup-integration-guide).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationMethod {
    /// `email`
    #[serde(rename = "email")]
    Email,
    /// `phone`
    #[serde(rename = "phone")]
    Phone,
    /// `phone_1`, the second phone number on record
    #[serde(rename = "phone_1")]
    Phone1,
    /// `alternate_phone`, a number supplied by the caller
    #[serde(rename = "alternate_phone")]
    AlternatePhone,
}

impl VerificationMethod {
    /// Every channel, in wire order
    pub const ALL: [Self; 4] = [Self::Email, Self::Phone, Self::Phone1, Self::AlternatePhone];

    /// Wire string sent to and received from the API
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Phone1 => "phone_1",
            Self::AlternatePhone => "alternate_phone",
        }
    }

    /// Whether the caller has to supply the phone number for this channel
    #[must_use]
    pub const fn requires_phone_number(self) -> bool {
        matches!(self, Self::AlternatePhone)
    }
}

impl fmt::Display for VerificationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationMethod {
    type Err = ContractViolation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| ContractViolation::InvalidMethod(s.to_string()))
    }
}
