//! Template substrate: the handlebars registry, the name/doc helpers, and
//! the per-protocol struct-field tag helpers.
//!
//! Generated text references identifiers only through `exportable`/`godoc`,
//! so identical models render to identical bytes.

pub use handlebars::RenderError;
use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext, ScopedJson,
};
use serde::Serialize;

use crate::{JsonMap, JsonValue};

/// Wrap width for generated doc comments, not counting the `/// ` prefix.
const DOC_WRAP_COLUMN: usize = 76;

/// Pairing of template name and contents
pub type Template<'template> = (&'template str, &'template str);

#[derive(Default, Debug)]
pub struct RenderConfig<'render> {
    /// Templates to be loaded for renderer. List of template name, data
    pub templates: Vec<Template<'render>>,
    /// Whether parser is in strict mode:
    ///   If true, a variable used in template that is undefined would raise an error
    ///   if false, an undefined variable would evaluate to 'falsey'
    pub strict_mode: bool,
}

/// HBTemplate processor for code generation
pub struct Renderer<'gen> {
    /// Handlebars processor
    hb: Handlebars<'gen>,
}

impl<'gen> Default for Renderer<'gen> {
    fn default() -> Self {
        // unwrap ok because only error condition occurs with templates, and default has none.
        Self::init(&RenderConfig::default()).unwrap()
    }
}

impl<'gen> Renderer<'gen> {
    /// Initialize handlebars template processor.
    pub fn init(config: &RenderConfig) -> Result<Self, crate::Error> {
        let mut hb = Handlebars::new();
        // don't use strict mode because
        // it's easier in templates to use if we allow undefined ~= false-y
        hb.set_strict_mode(config.strict_mode);
        hb.register_escape_fn(handlebars::no_escape); //html escaping is the default and cause issue

        // add common helpers and templates
        add_base_helpers(&mut hb);
        for t in &config.templates {
            hb.register_template_string(t.0, t.1)?;
        }

        Ok(Self { hb })
    }

    /// Adds template to internal dictionary
    pub fn add_template(&mut self, template: Template) -> Result<(), crate::Error> {
        self.hb.register_template_string(template.0, template.1)?;
        Ok(())
    }

    /// Render a named template
    pub fn render<T, W>(
        &self,
        template_name: &str,
        data: &T,
        writer: &mut W,
    ) -> Result<(), crate::Error>
    where
        T: Serialize,
        W: std::io::Write,
    {
        self.hb.render_to_write(template_name, data, writer)?;
        Ok(())
    }
}

/// Deterministic mapping from a raw model name to the identifier used in
/// emitted source: characters outside `[A-Za-z0-9_]` are dropped and the
/// first letter is uppercased.
pub fn exportable(name: &str) -> String {
    let mut out: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if !out.is_empty() {
        let head = out[0..1].to_ascii_uppercase();
        out.replace_range(0..1, &head);
    }
    out
}

/// Renders the doc-comment block preceding a generated declaration. The
/// first word of the comment is `exportable(name)` so the comment stays
/// self-consistent with the identifier it documents.
pub fn godoc(name: &str, documentation: &str) -> String {
    let ident = exportable(name);
    let text = strip_html(documentation);
    if text.is_empty() {
        return format!("/// {} is undocumented.\n", ident);
    }
    let mut out = String::new();
    let mut column = 0usize;
    for word in std::iter::once(ident.as_str()).chain(text.split_whitespace()) {
        if column == 0 {
            out.push_str("///");
            column = 3;
        } else if column + 1 + word.len() > DOC_WRAP_COLUMN {
            out.push_str("\n///");
            column = 3;
        }
        out.push(' ');
        out.push_str(word);
        column += 1 + word.len();
    }
    out.push('\n');
    out
}

/// Drops HTML tags and decodes the handful of entities AWS documentation
/// blobs carry.
fn strip_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Serde attribute line for a struct field: rename to the wire name, and
/// skip optional fields on serialization. `wrapper`, when present, prefixes
/// the rename with the `Wrapper>Name` path the query/xml codecs understand.
fn serde_tag(member: &JsonMap, wrapper: Option<&str>) -> String {
    let name = str_field(member, "name");
    let location_name = str_field(member, "location_name");
    let base = if location_name.is_empty() { name } else { location_name };
    let rename = match wrapper {
        Some(w) if !w.is_empty() => format!("{}>{}", w, base),
        _ => base.to_string(),
    };
    if str_field(member, "type").starts_with("Option<") {
        format!(
            "#[serde(rename = \"{}\", default, skip_serializing_if = \"Option::is_none\")]",
            rename
        )
    } else {
        format!("#[serde(rename = \"{}\")]", rename)
    }
}

fn str_field<'a>(obj: &'a JsonMap, key: &str) -> &'a str {
    match obj.get(key) {
        Some(JsonValue::String(s)) => s.as_str(),
        _ => "",
    }
}

fn arg_as_string<'reg, 'rc>(
    h: &'reg Helper<'reg, 'rc>,
    n: usize,
    tag: &str,
) -> Result<&'rc str, RenderError> {
    // get nth arg as string
    h.param(n)
        .ok_or_else(|| RenderError::new(format!("missing string param after {}", tag)))?
        .value()
        .as_str()
        .ok_or_else(|| {
            RenderError::new(format!(
                "{} expects string param, not {:?}",
                tag,
                h.param(n).unwrap().value()
            ))
        })
}

fn arg_as_obj<'reg, 'rc>(
    h: &'reg Helper<'reg, 'rc>,
    n: usize,
    tag: &str,
) -> Result<&'rc JsonMap, RenderError> {
    // get nth arg as object
    h.param(n)
        .ok_or_else(|| RenderError::new(format!("missing object param after {}", tag)))?
        .value()
        .as_object()
        .ok_or_else(|| {
            RenderError::new(format!(
                "{} expects object param, not {:?}",
                tag,
                h.param(n).unwrap().value()
            ))
        })
}

/// Optional string arg: absent and null both map to None.
fn arg_as_opt_string<'reg, 'rc>(h: &'reg Helper<'reg, 'rc>, n: usize) -> Option<&'rc str> {
    h.param(n).and_then(|p| p.value().as_str())
}

#[derive(Clone, Copy)]
struct MemberNamedHelper {}

/// Looks up a member of a shape by name; returns null when the shape or the
/// member is absent, so it composes with `#with`.
impl HelperDef for MemberNamedHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _reg: &'reg Handlebars<'reg>,
        _ctx: &'rc Context,
        _rc: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'reg, 'rc>, RenderError> {
        let shape = match h.param(0).map(|p| p.value()) {
            Some(JsonValue::Object(obj)) => obj,
            _ => return Ok(ScopedJson::Derived(JsonValue::Null)),
        };
        let name = match arg_as_opt_string(h, 1) {
            Some(name) => name,
            None => return Ok(ScopedJson::Derived(JsonValue::Null)),
        };
        let member = shape
            .get("members")
            .and_then(|v| v.as_array())
            .and_then(|members| {
                members.iter().find(|m| {
                    matches!(m.get("name"), Some(JsonValue::String(n)) if n == name)
                })
            });
        Ok(ScopedJson::Derived(
            member.cloned().unwrap_or(JsonValue::Null),
        ))
    }
}

/// Add template helpers functions
fn add_base_helpers(hb: &mut Handlebars) {
    // "member_named" resolves a payload/body member object from a shape
    hb.register_helper("member_named", Box::new(MemberNamedHelper {}));

    //
    // identifier used in emitted source for a raw model name
    //
    hb.register_helper(
        "exportable",
        Box::new(
            |h: &Helper,
             _r: &Handlebars,
             _: &Context,
             _rc: &mut RenderContext,
             out: &mut dyn Output|
             -> HelperResult {
                let name = arg_as_string(h, 0, "exportable")?;
                out.write(&exportable(name))?;
                Ok(())
            },
        ),
    );

    //
    // doc-comment block for a declaration: `godoc name documentation`
    //
    hb.register_helper(
        "godoc",
        Box::new(
            |h: &Helper,
             _r: &Handlebars,
             _: &Context,
             _rc: &mut RenderContext,
             out: &mut dyn Output|
             -> HelperResult {
                let name = arg_as_string(h, 0, "godoc")?;
                let documentation = arg_as_opt_string(h, 1).unwrap_or("");
                out.write(&godoc(name, documentation))?;
                Ok(())
            },
        ),
    );

    //
    // struct-field tag formatters, one per protocol family
    //
    hb.register_helper(
        "json_tag",
        Box::new(
            |h: &Helper,
             _r: &Handlebars,
             _: &Context,
             _rc: &mut RenderContext,
             out: &mut dyn Output|
             -> HelperResult {
                let member = arg_as_obj(h, 0, "json_tag")?;
                out.write(&serde_tag(member, None))?;
                Ok(())
            },
        ),
    );

    hb.register_helper(
        "query_tag",
        Box::new(
            |h: &Helper,
             _r: &Handlebars,
             _: &Context,
             _rc: &mut RenderContext,
             out: &mut dyn Output|
             -> HelperResult {
                let member = arg_as_obj(h, 0, "query_tag")?;
                out.write(&serde_tag(member, arg_as_opt_string(h, 1)))?;
                Ok(())
            },
        ),
    );

    // the ec2 protocol uppercases the location name but never nests
    hb.register_helper(
        "ec2_tag",
        Box::new(
            |h: &Helper,
             _r: &Handlebars,
             _: &Context,
             _rc: &mut RenderContext,
             out: &mut dyn Output|
             -> HelperResult {
                let member = arg_as_obj(h, 0, "ec2_tag")?;
                let mut member = member.clone();
                let loc = str_field(&member, "location_name").to_string();
                if !loc.is_empty() {
                    member.insert(
                        "location_name".to_string(),
                        JsonValue::String(exportable(&loc)),
                    );
                }
                out.write(&serde_tag(&member, None))?;
                Ok(())
            },
        ),
    );

    hb.register_helper(
        "xml_tag",
        Box::new(
            |h: &Helper,
             _r: &Handlebars,
             _: &Context,
             _rc: &mut RenderContext,
             out: &mut dyn Output|
             -> HelperResult {
                let member = arg_as_obj(h, 0, "xml_tag")?;
                out.write(&serde_tag(member, arg_as_opt_string(h, 1)))?;
                Ok(())
            },
        ),
    );

    //
    // "{name}" / "{name+}" URI placeholders; literal braces collide with
    // handlebars syntax, so templates build them through this helper
    //
    hb.register_helper(
        "braced",
        Box::new(
            |h: &Helper,
             _r: &Handlebars,
             _: &Context,
             _rc: &mut RenderContext,
             out: &mut dyn Output|
             -> HelperResult {
                let name = arg_as_string(h, 0, "braced")?;
                let suffix = arg_as_opt_string(h, 1).unwrap_or("");
                out.write(&format!("{{{}{}}}", name, suffix))?;
                Ok(())
            },
        ),
    );
}
