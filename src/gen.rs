//! Driver: selects the protocol renderer for a service model, runs it, and
//! pretty-prints the result into the caller's sink.

use std::io::Write;
use std::str::FromStr;

use crate::{
    error::Result,
    format::{RustSourceFormatter, SourceFormatter},
    model::{Protocol, Service},
    render::{RenderConfig, Renderer, Template},
    writer::Writer,
};

/// Templates registered with every generator: shared fragments first, the
/// five protocol renderers after. Protocol template names match the
/// protocol strings a model declares.
const TEMPLATES: &[Template<'static>] = &[
    ("header", include_str!("../templates/header.hbs")),
    ("footer", include_str!("../templates/footer.hbs")),
    ("rest_uri", include_str!("../templates/rest_uri.hbs")),
    (
        "rest_querystring",
        include_str!("../templates/rest_querystring.hbs"),
    ),
    (
        "rest_reqheaders",
        include_str!("../templates/rest_reqheaders.hbs"),
    ),
    (
        "rest_respheaders",
        include_str!("../templates/rest_respheaders.hbs"),
    ),
    ("json", include_str!("../templates/json.hbs")),
    ("query", include_str!("../templates/query.hbs")),
    ("ec2", include_str!("../templates/ec2.hbs")),
    ("rest-xml", include_str!("../templates/rest_xml.hbs")),
    ("rest-json", include_str!("../templates/rest_json.hbs")),
];

/// Renders a complete client source file per service model.
///
/// A generation pass is a single synchronous walk over the model; a
/// `Generator` holds no per-pass state, so one instance can serve any number
/// of passes, each with its own model and sink.
pub struct Generator {
    renderer: Renderer<'static>,
    formatter: Box<dyn SourceFormatter>,
}

impl Generator {
    /// Generator with the default in-process Rust formatter.
    pub fn new() -> Result<Self> {
        Self::with_formatter(Box::new(RustSourceFormatter::default()))
    }

    /// Generator with a caller-chosen formatter.
    pub fn with_formatter(formatter: Box<dyn SourceFormatter>) -> Result<Self> {
        let renderer = Renderer::init(&RenderConfig {
            templates: TEMPLATES.to_vec(),
            strict_mode: false,
        })?;
        Ok(Generator {
            renderer,
            formatter,
        })
    }

    /// Writes the generated client for `service` to `sink`.
    ///
    /// On a formatter failure the raw rendered bytes are still written so the
    /// malformed output can be inspected, and the format error is returned.
    /// An unknown protocol fails before anything is written.
    pub fn generate<W: Write>(&self, service: &Service, sink: &mut W) -> Result<()> {
        let protocol = Protocol::from_str(&service.metadata.protocol)?;

        let mut out = Writer::default();
        self.renderer
            .render(protocol.template_name(), service, &mut out)?;
        let raw = String::from_utf8(out.take().to_vec())?;

        match self.formatter.format(&raw) {
            Ok(pretty) => {
                sink.write_all(pretty.as_bytes())?;
                Ok(())
            }
            Err(e) => {
                sink.write_all(raw.as_bytes())?;
                Err(e)
            }
        }
    }
}
