//! Client for the Mono API lookup products.
//!
//! The crate is split in two layers:
//! - `request`: a single reusable HTTP call primitive, parameterized by the shape the
//!   response body is decoded into.
//! - `lookup`: the BVN verification workflow (initiate, verify, fetch details) built on
//!   top of that primitive.

#![deny(clippy::all, clippy::pedantic, clippy::nursery, missing_docs, dead_code)]

/// Shared client handle
pub mod client;

/// Lookup products (BVN)
pub mod lookup;

/// Generic request executor
pub mod request;

/// Configuration types
pub mod types;

pub use client::{MonoClient, BASE_URL};
pub use lookup::{
    BvnLookUp, ContractViolation, Failure, LookUp, VerificationChannel, VerificationMethod,
    VerificationResult, VerificationState,
};
pub use request::{execute, execute_strict, RequestError, RequestSpec, AUTH_HEADER};
pub use types::{ConfigError, Environment, MonoConfig};
