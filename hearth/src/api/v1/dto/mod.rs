//! v1 API Data Transfer Objects.
//!
//! These types define the wire format for the v1 REST API. They are kept
//! apart from the domain models in `src/models/` and own the camelCase
//! naming, timestamp formatting and domain-model conversion.

pub mod appointments;
pub mod common;
pub mod financial;
pub mod patients;

pub use appointments::*;
pub use common::*;
pub use financial::*;
pub use patients::*;
