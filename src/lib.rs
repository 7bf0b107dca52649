#![forbid(unsafe_code)]

//! Generation of Rust client code for AWS service models.
//!
//! Given a normalized [`model::Service`] produced by an upstream parser, a
//! [`Generator`] renders a single ready-to-compile source file implementing a
//! typed client for the service, for one of five wire protocols: `json`,
//! `query`, `ec2`, `rest-xml`, or `rest-json`.

mod error;
pub use error::{Error, Result};

pub mod format;
mod gen;
pub mod model;
pub mod render;
pub mod writer;

pub use gen::Generator;

// re-export
pub use bytes::Bytes;
pub(crate) use bytes::BytesMut;

// common types used in this crate
pub(crate) type JsonValue = serde_json::Value;
pub(crate) type JsonMap = serde_json::Map<String, JsonValue>;
