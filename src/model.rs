//! Service model: the normalized in-memory description of a remote AWS API.
//!
//! The model is produced once by an upstream parser, handed to the emitter,
//! and discarded after the pass. Everything here is read-only input for the
//! templates; the structs serialize directly into the handlebars context.
//!
//! Mappings whose iteration order matters (operations, members, enums,
//! wrappers) are kept as vectors of named entries so generated output is
//! byte-stable across runs.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::error::Error;

/// Wire protocols supported by the emitter.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Protocol {
    /// JSON-RPC ("json")
    Json,
    /// form-encoded query protocol ("query")
    Query,
    /// EC2 variant of the query protocol ("ec2")
    Ec2,
    /// REST with XML payloads ("rest-xml")
    RestXml,
    /// REST with JSON payloads ("rest-json")
    RestJson,
}

impl FromStr for Protocol {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "json" => Ok(Protocol::Json),
            "query" => Ok(Protocol::Query),
            "ec2" => Ok(Protocol::Ec2),
            "rest-xml" => Ok(Protocol::RestXml),
            "rest-json" => Ok(Protocol::RestJson),
            _ => Err(Error::UnknownProtocol(s.to_string())),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template_name())
    }
}

impl Protocol {
    /// Name of the top-level template that renders this protocol.
    pub fn template_name(&self) -> &'static str {
        match self {
            Protocol::Json => "json",
            Protocol::Query => "query",
            Protocol::Ec2 => "ec2",
            Protocol::RestXml => "rest-xml",
            Protocol::RestJson => "rest-json",
        }
    }
}

/// Shape kinds that can appear in a service model.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeType {
    #[default]
    Structure,
    String,
    Integer,
    Long,
    Boolean,
    Timestamp,
    List,
    Map,
    Blob,
    Double,
    Float,
}

/// A complete service description.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Service {
    /// exported client type name, e.g. "DynamoDB"
    pub name: String,
    /// human-readable service name, e.g. "Amazon DynamoDB"
    pub full_name: String,
    /// lowercase identifier used in the generated module doc
    pub package_name: String,
    pub metadata: Metadata,
    pub operations: Vec<Operation>,
    pub shapes: Vec<Shape>,
    /// anonymous result-wrapper shapes; empty for json/rest-json
    pub wrappers: Vec<Wrapper>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct Metadata {
    /// declared wire protocol; parsed by the driver, so unknown values are
    /// representable here
    pub protocol: String,
    pub endpoint_prefix: String,
    pub api_version: String,
    /// json protocol only
    pub json_version: String,
    /// json protocol only
    pub target_prefix: String,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct Http {
    pub method: String,
    pub request_uri: String,
}

/// A named remote method with optional input and output shapes.
///
/// `input`/`output` carry the plain shapes used by the json and rest
/// protocols; `input_ref`/`output_ref` carry the wrapped types the query and
/// ec2 protocols use instead.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Operation {
    pub name: String,
    pub documentation: String,
    pub http: Http,
    pub input: Option<Shape>,
    pub output: Option<Shape>,
    pub input_ref: Option<ShapeRef>,
    pub output_ref: Option<ShapeRef>,
}

/// Reference to a shape carrying the query/ec2 wrapping convention and the
/// rest-xml whole-request element name.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ShapeRef {
    pub wrapped_type: String,
    pub wrapped_literal: String,
    pub location_name: String,
    pub xml_namespace: XmlNamespace,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct XmlNamespace {
    pub uri: String,
}

/// A named type in the service model.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Shape {
    pub name: String,
    /// rendered Rust type, including any Option/Vec/HashMap decoration
    #[serde(rename = "type")]
    pub ty: String,
    /// rendered zero-instance expression, e.g. "GetObjectOutput::default()"
    pub literal: String,
    pub shape_type: ShapeType,
    pub exception: bool,
    #[serde(rename = "enum")]
    pub is_enum: bool,
    pub enums: Vec<EnumEntry>,
    /// member order is the emission order
    pub members: Vec<Member>,
    /// name of the member carrying the HTTP body, if any
    pub payload: Option<String>,
    pub result_wrapper: Option<String>,
}

impl Shape {
    /// Looks up a member by name. Template-side lookups go through the
    /// `member_named` helper; this is the builder/test-side equivalent.
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// One field of a structure shape.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Member {
    pub name: String,
    /// rendered field type, decoration included
    #[serde(rename = "type")]
    pub ty: String,
    pub shape: MemberShape,
    /// "", "uri", "querystring", "header", "headers", "statusCode", or an
    /// annotation the emitter does not support yet (surfaced as a TODO)
    pub location: String,
    pub location_name: String,
    pub streaming: bool,
    pub xml_namespace: XmlNamespace,
}

/// The slice of the member's target shape the templates need.
#[derive(Clone, Debug, Default, Serialize)]
pub struct MemberShape {
    pub name: String,
    pub shape_type: ShapeType,
    #[serde(rename = "type")]
    pub ty: String,
}

/// One named constant of an enum shape. `value` is the already-rendered
/// literal, quotes included.
#[derive(Clone, Debug, Default, Serialize)]
pub struct EnumEntry {
    pub name: String,
    pub value: String,
}

/// A synthetic shape nesting a real shape under a named outer element.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Wrapper {
    pub name: String,
    pub shape: Shape,
}
