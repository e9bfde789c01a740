//! Lookup products.
//!
//! Only the BVN lookup is implemented. Every product goes through the same
//! [`request`](crate::request) primitive, so adding one is a matter of paths and payloads.

mod bvn;
mod envelope;
mod error;
mod method;
mod result;

pub use bvn::{BvnLookUp, PHONE_NUMBER_REQUIRED, SESSION_HEADER};
pub use envelope::{ResponseEnvelope, VerificationChannel, STATUS_SUCCESSFUL};
pub use error::ContractViolation;
pub use method::VerificationMethod;
pub use result::{Failure, VerificationResult, VerificationState};

use crate::client::MonoClient;

/// Lookup products sharing one client
#[derive(Debug, Clone)]
pub struct LookUp {
    /// Bank Verification Number lookup
    pub bvn: BvnLookUp,
}

impl LookUp {
    /// Groups the lookup products over `client`
    #[must_use]
    pub fn new(client: MonoClient) -> Self {
        Self {
            bvn: BvnLookUp::new(client),
        }
    }
}
