//! Literal classification and encoding of field values.

use byteorder::{BigEndian, ByteOrder};
use std::fmt;

/// Symbolic placeholder for an address range, resolved downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ipv4Class {
    NorthAmerican,
    SouthAmerican,
    Asian,
    European,
    UserDefined,
}

impl Ipv4Class {
    pub const ALL: [Ipv4Class; 5] = [
        Ipv4Class::NorthAmerican,
        Ipv4Class::SouthAmerican,
        Ipv4Class::Asian,
        Ipv4Class::European,
        Ipv4Class::UserDefined,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Ipv4Class::NorthAmerican => "north-american-ip",
            Ipv4Class::SouthAmerican => "south-american-ip",
            Ipv4Class::Asian => "asian-ip",
            Ipv4Class::European => "european-ip",
            Ipv4Class::UserDefined => "user-defined-ip",
        }
    }

    pub fn from_label(token: &str) -> Option<Ipv4Class> {
        Self::ALL.into_iter().find(|c| c.label() == token)
    }
}

/// An encoded field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedValue {
    /// Decimal or hex literal.
    Integer(u32),
    Ipv4([u8; 4]),
    /// Kept as the literal tag; no address expansion.
    Ipv4Class(Ipv4Class),
    /// Quotes stripped, escapes left as written.
    Str(String),
}

impl EncodedValue {
    /// Classify and encode a literal token: decimal, hex, IPv4 (or class), quoted string.
    /// Returns `None` when the token is none of these.
    pub fn encode(token: &str) -> Option<EncodedValue> {
        if is_decimal(token) || is_hex(token) {
            let v = parse_numeric(token)?;
            return u32::try_from(v).ok().map(EncodedValue::Integer);
        }
        if let Some(class) = Ipv4Class::from_label(token) {
            return Some(EncodedValue::Ipv4Class(class));
        }
        if let Some(octets) = parse_ipv4(token) {
            return Some(EncodedValue::Ipv4(octets));
        }
        if is_quoted(token) {
            return Some(EncodedValue::Str(unquote(token).to_string()));
        }
        None
    }

    /// Byte form handed to the packet engine. Integers use the narrowest of 1, 2 or 4 bytes,
    /// in network byte order.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            EncodedValue::Integer(v) => {
                let mut out = vec![0u8; self.byte_len()];
                match out.len() {
                    1 => out[0] = *v as u8,
                    2 => BigEndian::write_u16(&mut out, *v as u16),
                    _ => BigEndian::write_u32(&mut out, *v),
                }
                out
            }
            EncodedValue::Ipv4(octets) => octets.to_vec(),
            EncodedValue::Ipv4Class(class) => class.label().as_bytes().to_vec(),
            EncodedValue::Str(s) => s.as_bytes().to_vec(),
        }
    }

    pub fn byte_len(&self) -> usize {
        match self {
            EncodedValue::Integer(v) if *v <= u8::MAX as u32 => 1,
            EncodedValue::Integer(v) if *v <= u16::MAX as u32 => 2,
            EncodedValue::Integer(_) => 4,
            EncodedValue::Ipv4(_) => 4,
            EncodedValue::Ipv4Class(class) => class.label().len(),
            EncodedValue::Str(s) => s.len(),
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            EncodedValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            EncodedValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for EncodedValue {
    /// DSL literal form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodedValue::Integer(v) => write!(f, "{}", v),
            EncodedValue::Ipv4([a, b, c, d]) => write!(f, "{}.{}.{}.{}", a, b, c, d),
            EncodedValue::Ipv4Class(class) => f.write_str(class.label()),
            EncodedValue::Str(s) => write!(f, "\"{}\"", s),
        }
    }
}

/// Non-empty run of ASCII digits.
pub fn is_decimal(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// `0x` followed by at least one hex digit.
pub fn is_hex(token: &str) -> bool {
    match token.strip_prefix("0x") {
        Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

/// Begins and ends with `"`, at least two characters.
pub fn is_quoted(token: &str) -> bool {
    token.len() >= 2 && token.starts_with('"') && token.ends_with('"')
}

/// Dotted quad or one of the symbolic IP classes.
pub fn is_ipv4(token: &str) -> bool {
    Ipv4Class::from_label(token).is_some() || parse_ipv4(token).is_some()
}

/// Numeric value of a decimal or hex literal. `None` if neither, or if it overflows `u64`.
pub fn parse_numeric(token: &str) -> Option<u64> {
    if is_hex(token) {
        u64::from_str_radix(&token[2..], 16).ok()
    } else if is_decimal(token) {
        token.parse().ok()
    } else {
        None
    }
}

/// Decimal-or-hex literal within `[0, 2^bits - 1]`.
pub fn fits_bits(token: &str, bits: u32) -> bool {
    let max = (1u64 << bits) - 1;
    matches!(parse_numeric(token), Some(v) if v <= max)
}

/// Exactly four dot-separated decimal groups, each in `[0, 255]`.
pub fn parse_ipv4(token: &str) -> Option<[u8; 4]> {
    let mut octets = [0u8; 4];
    let mut groups = token.split('.');
    for octet in octets.iter_mut() {
        let group = groups.next()?;
        if !is_decimal(group) {
            return None;
        }
        *octet = group.parse().ok()?;
    }
    match groups.next() {
        Some(_) => None,
        None => Some(octets),
    }
}

/// Strip the surrounding quotes of a quoted token.
pub fn unquote(token: &str) -> &str {
    if is_quoted(token) {
        &token[1..token.len() - 1]
    } else {
        token
    }
}
