#![deny(missing_docs)]

//! # apisec-core
//!
//! Spec Normalizer and Test Plan Generator for offensive API security
//! testing: turns a decoded OpenAPI v3 / Swagger v2 document into a batch
//! of executable HTTP test descriptors.

/// Shared error types.
pub mod error;

/// Dialect-independent intermediate representation.
pub mod model;

/// Test Descriptor and its constituent types.
pub mod descriptor;

/// OpenAPI v3 / Swagger v2 → `NormalizedSpec`.
pub mod normalizer;

/// Parameter fuzzing.
pub mod fuzzer;

/// Injection payload catalogs.
pub mod payloads;

/// Vulnerability-class test generators.
pub mod generator;

pub use descriptor::{ExecutionOptions, MaliciousPayload, ResponseFilter, TestDescriptor, VulnDetails};
pub use error::{AppError, AppResult};
pub use generator::{generate_all, VulnClass};
pub use model::{
    EndpointRecord, HttpMethod, NormalizedSpec, ParamLocation, ParamType, ParameterRecord, Scheme,
    ServerDescriptor,
};
pub use normalizer::normalize;
