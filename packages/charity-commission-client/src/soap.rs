//! SOAP 1.1 envelope building and response decoding.
//!
//! Responses are decoded into a generic `serde_json::Value` tree rather than
//! typed structs. The register's records are wide, loosely populated and
//! deeply nested, and callers only inspect a handful of fields.
//!
//! Conversion rules:
//! - elements with child elements become objects keyed by local name
//! - repeated sibling elements become arrays
//! - leaf elements become strings (no numeric coercion)
//! - `xsi:nil="true"` elements become `null`
//! - elements listed in [`ALWAYS_ARRAY`] are arrays even with one entry

use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

use crate::error::{CharityCommissionError, Result};

/// XML namespace of the register search service.
pub const NAMESPACE: &str = "http://www.charitycommission.gov.uk/";

/// Element names that always decode to arrays.
pub const ALWAYS_ARRAY: &[&str] = &["CharityList", "Returns"];

/// Build a SOAP 1.1 request envelope for `operation`.
///
/// Parameter values are XML-escaped; names are emitted as given.
pub fn envelope(operation: &str, params: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (name, value) in params {
        body.push_str(&format!("<{name}>{}</{name}>", escape(*value)));
    }

    format!(
        concat!(
            r#"<?xml version="1.0" encoding="utf-8"?>"#,
            r#"<soap:Envelope xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" "#,
            r#"xmlns:xsd="http://www.w3.org/2001/XMLSchema" "#,
            r#"xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">"#,
            r#"<soap:Body><{op} xmlns="{ns}">{body}</{op}></soap:Body>"#,
            r#"</soap:Envelope>"#
        ),
        op = operation,
        ns = NAMESPACE,
        body = body,
    )
}

/// Value of the `SOAPAction` header for `operation`.
pub fn soap_action(operation: &str) -> String {
    format!("\"{NAMESPACE}{operation}\"")
}

/// Decode a response envelope and return the `<{operation}Response>` element.
///
/// A `soap:Fault` in the body is returned as [`CharityCommissionError::Fault`].
pub fn parse_response(xml: &str, operation: &str) -> Result<Value> {
    let body = parse_body(xml)?;

    if let Some(fault) = fault_from_body(&body) {
        return Err(fault);
    }

    let element = format!("{operation}Response");
    body.get(&element)
        .cloned()
        .ok_or_else(|| CharityCommissionError::MissingElement(element.clone()))
}

/// Extract a SOAP fault from a response body, if it carries one.
///
/// Returns `None` for anything that is not a well-formed fault envelope.
pub fn parse_fault(xml: &str) -> Option<CharityCommissionError> {
    parse_body(xml).ok().and_then(|body| fault_from_body(&body))
}

fn parse_body(xml: &str) -> Result<Value> {
    let doc = xml_to_value(xml)?;
    doc.get("Envelope")
        .and_then(|envelope| envelope.get("Body"))
        .cloned()
        .ok_or_else(|| CharityCommissionError::MissingElement("Envelope/Body".into()))
}

fn fault_from_body(body: &Value) -> Option<CharityCommissionError> {
    let fault = body.get("Fault")?;
    let text = |key: &str| {
        fault
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    Some(CharityCommissionError::Fault {
        code: text("faultcode"),
        message: text("faultstring"),
    })
}

/// An element being assembled while its children are read.
struct Frame {
    name: String,
    children: Map<String, Value>,
    text: String,
    nil: bool,
}

impl Frame {
    fn root() -> Self {
        Self {
            name: String::new(),
            children: Map::new(),
            text: String::new(),
            nil: false,
        }
    }

    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let name = std::str::from_utf8(start.local_name().as_ref())
            .map_err(|e| CharityCommissionError::Xml(e.to_string()))?
            .to_string();

        let mut nil = false;
        for attr in start.attributes() {
            let attr = attr?;
            if attr.key.local_name().as_ref() == b"nil" && attr.value.as_ref() == b"true" {
                nil = true;
            }
        }

        Ok(Self {
            name,
            children: Map::new(),
            text: String::new(),
            nil,
        })
    }

    fn into_value(self) -> Value {
        if self.nil {
            Value::Null
        } else if !self.children.is_empty() {
            Value::Object(self.children)
        } else if self.text.is_empty() && ALWAYS_ARRAY.contains(&self.name.as_str()) {
            // An empty list wrapper carries no entries.
            Value::Array(Vec::new())
        } else {
            Value::String(self.text)
        }
    }
}

/// Attach a finished element to its parent, folding repeats into arrays.
fn attach(parent: &mut Frame, child: Frame) {
    let name = child.name.clone();
    let value = child.into_value();

    if ALWAYS_ARRAY.contains(&name.as_str()) {
        let slot = parent.children.entry(name).or_insert(Value::Null);
        match value {
            // A nil list carries no entries.
            Value::Null => {}
            Value::Array(items) => {
                if slot.is_null() {
                    *slot = Value::Array(items);
                }
            }
            entry => match slot {
                Value::Array(items) => items.push(entry),
                other => *other = Value::Array(vec![entry]),
            },
        }
        return;
    }

    match parent.children.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            parent.children.insert(name, value);
        }
    }
}

/// Convert an XML document into a `serde_json::Value` tree.
///
/// Namespace prefixes are dropped; attributes other than `xsi:nil` are ignored.
pub fn xml_to_value(xml: &str) -> Result<Value> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack = vec![Frame::root()];

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(Frame::open(&start)?),
            Event::Empty(start) => {
                let frame = Frame::open(&start)?;
                if let Some(parent) = stack.last_mut() {
                    attach(parent, frame);
                }
            }
            Event::Text(text) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::End(_) => {
                if stack.len() < 2 {
                    return Err(CharityCommissionError::Xml("unexpected closing tag".into()));
                }
                if let (Some(frame), Some(parent)) = (stack.pop(), stack.last_mut()) {
                    attach(parent, frame);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if stack.len() != 1 {
        return Err(CharityCommissionError::Xml("unclosed element".into()));
    }

    let root = stack.pop().map(|frame| frame.children).unwrap_or_default();
    Ok(Value::Object(root))
}
