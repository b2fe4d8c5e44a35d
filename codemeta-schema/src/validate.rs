use codemeta_core::model::DevelopmentStatus;
use serde_json::{Map, Value};

use crate::catalog::{Kind, Shape, CONTEXTS};
use crate::format;
use crate::violation::{Location, ValidationFailed, Violation};

/// Check a whole document against the codemeta schema.
///
/// The root must be a `SoftwareSourceCode` object. All violations are
/// collected before returning.
pub fn validate(document: &Value) -> Result<(), ValidationFailed> {
    let mut violations = Vec::new();
    match document {
        Value::Object(map) => check_object(
            Kind::SoftwareSourceCode,
            map,
            &Location::root(),
            &mut violations,
        ),
        other => violations.push(Violation::new(
            Location::root(),
            format!("expected an object, found {}", describe(other)),
        )),
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationFailed::new(violations))
    }
}

fn check_object(
    kind: Kind,
    map: &Map<String, Value>,
    location: &Location,
    out: &mut Vec<Violation>,
) {
    if !map.contains_key("@type") {
        out.push(Violation::new(location.key("@type"), "field is required"));
    }
    for required in kind.required() {
        if !map.contains_key(*required) {
            out.push(Violation::new(location.key(required), "field is required"));
        }
    }

    for (key, value) in map {
        let here = location.key(key);
        if key == "@type" {
            check_type_tag(kind, value, &here, out);
            continue;
        }
        match kind.field(key) {
            Some(shapes) => check_value(value, shapes, &here, out),
            None => out.push(Violation::new(here, "field is not allowed")),
        }
    }
}

fn check_type_tag(kind: Kind, value: &Value, location: &Location, out: &mut Vec<Violation>) {
    match (value, kind.tag()) {
        (Value::String(tag), Some(expected)) if tag != expected => out.push(Violation::new(
            location.clone(),
            format!("expected \"{}\", found \"{}\"", expected, tag),
        )),
        (Value::String(_), _) => {}
        (other, _) => out.push(Violation::new(
            location.clone(),
            format!("expected text, found {}", describe(other)),
        )),
    }
}

/// Accept `value` if any of `shapes` accepts it.
///
/// When none does, report the errors of the one shape the value was most
/// plausibly meant to be: the only shape of the right JSON type, or the
/// object kind named by its `@type`.
fn check_value(
    value: &Value,
    shapes: &[Shape],
    location: &Location,
    out: &mut Vec<Violation>,
) {
    let candidates: Vec<Shape> = shapes
        .iter()
        .copied()
        .filter(|shape| admits(*shape, value))
        .collect();

    if candidates.is_empty() {
        out.push(Violation::new(
            location.clone(),
            format!("expected {}, found {}", alternatives(shapes), describe(value)),
        ));
        return;
    }

    let mut attempts = Vec::with_capacity(candidates.len());
    for shape in &candidates {
        let mut found = Vec::new();
        check_shape(*shape, value, location, &mut found);
        if found.is_empty() {
            return;
        }
        attempts.push(found);
    }

    if attempts.len() == 1 {
        out.append(&mut attempts[0]);
        return;
    }

    let tag = value.get("@type").and_then(Value::as_str);
    let object_kind = |shape: &Shape| match shape {
        Shape::Object(kind) => Some(*kind),
        _ => None,
    };
    let chosen = candidates
        .iter()
        .position(|shape| tag.is_some() && object_kind(shape).and_then(Kind::tag) == tag)
        .or_else(|| {
            candidates
                .iter()
                .position(|shape| object_kind(shape).is_some_and(|kind| kind.tag().is_none()))
        });
    match chosen {
        Some(i) => out.append(&mut attempts[i]),
        None => out.push(Violation::new(
            location.clone(),
            format!("does not match any of {}", alternatives(&candidates)),
        )),
    }
}

fn check_shape(shape: Shape, value: &Value, location: &Location, out: &mut Vec<Violation>) {
    match (shape, value) {
        (Shape::Object(kind), Value::Object(map)) => check_object(kind, map, location, out),
        (Shape::ListOf(items), Value::Array(values)) => {
            for (i, item) in values.iter().enumerate() {
                check_value(item, items, &location.index(i), out);
            }
        }
        (shape, Value::String(s)) => {
            if let Some(message) = check_string(shape, s) {
                out.push(Violation::new(location.clone(), message));
            }
        }
        _ => {}
    }
}

fn check_string(shape: Shape, s: &str) -> Option<String> {
    match shape {
        Shape::Url if !format::is_url(s) => Some(format!("\"{}\" is not a valid URL", s)),
        Shape::Email if !format::is_email(s) => {
            Some(format!("\"{}\" is not a valid email address", s))
        }
        Shape::Date if !format::is_date(s) => Some(format!(
            "\"{}\" is not a valid date (expected RFC 3339 or YYYY-MM-DD)",
            s
        )),
        Shape::Context if !CONTEXTS.contains(&s) => {
            Some(format!("\"{}\" is not a recognized codemeta context", s))
        }
        Shape::DevelopmentStatus if s.parse::<DevelopmentStatus>().is_err() => Some(format!(
            "\"{}\" is not a development status (one of {})",
            s,
            DevelopmentStatus::ALL.map(DevelopmentStatus::name).join(", ")
        )),
        _ => None,
    }
}

/// Whether the JSON type of `value` fits `shape`, ignoring its contents.
fn admits(shape: Shape, value: &Value) -> bool {
    match shape {
        Shape::Text
        | Shape::Url
        | Shape::Email
        | Shape::Date
        | Shape::Context
        | Shape::DevelopmentStatus => value.is_string(),
        Shape::Integer => value.is_i64() || value.is_u64(),
        Shape::Number => value.is_number(),
        Shape::Bool => value.is_boolean(),
        Shape::Object(_) => value.is_object(),
        Shape::ListOf(_) => value.is_array(),
    }
}

fn alternatives(shapes: &[Shape]) -> String {
    let names: Vec<String> = shapes.iter().map(Shape::to_string).collect();
    match names.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} or {}", rest.join(", "), last),
        _ => names.join(""),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "text",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
