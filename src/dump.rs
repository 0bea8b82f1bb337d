//! Render compiled signatures back to DSL text and short human-readable summaries.

use crate::ast::{FieldConfig, SignatureEntry, SignatureSet};
use crate::value::EncodedValue;

/// One entry as a DSL block; loading the result yields the same entry.
pub fn format_entry(entry: &SignatureEntry) -> String {
    let mut out = format!("[signature = \"{}\"", entry.name);
    for c in &entry.fields {
        out.push_str(&format!(", {} = {}", c.field, c.value));
    }
    out.push(']');
    out
}

/// Whole set, one entry per line, in store order.
pub fn format_set(set: &SignatureSet) -> String {
    let mut out = String::new();
    for entry in set {
        out.push_str(&format_entry(entry));
        out.push('\n');
    }
    out
}

/// Value with its encoded byte form, e.g. `0x1f90 (2 bytes: 1f 90)`.
pub fn describe_value(value: &EncodedValue) -> String {
    let bytes = value.to_bytes();
    let literal = match value {
        EncodedValue::Integer(v) => format!("{} (0x{:x})", v, v),
        other => other.to_string(),
    };
    match value {
        EncodedValue::Integer(_) | EncodedValue::Ipv4(_) => {
            let hex: Vec<String> = bytes.iter().map(|b| format!("{:02x}", b)).collect();
            format!("{} [{} bytes: {}]", literal, bytes.len(), hex.join(" "))
        }
        _ => format!("{} [{} bytes]", literal, bytes.len()),
    }
}

/// Indented field listing for one entry.
pub fn describe_entry(entry: &SignatureEntry) -> String {
    let mut out = format!("{}\n", entry.name);
    for c in &entry.fields {
        out.push_str(&describe_field(c));
        out.push('\n');
    }
    out
}

fn describe_field(c: &FieldConfig) -> String {
    format!("  #{:<2} {:<14} {}", c.index(), c.field.label(), describe_value(&c.value))
}
