//! Field catalog: the fixed table of signature fields, their stable indices and validators.

use crate::value;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Stable identity of a signature field. The discriminant is the field index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum FieldId {
    IpVersion,
    IpIhl,
    IpTos,
    IpTlen,
    IpId,
    IpFlags,
    IpOffset,
    IpTtl,
    IpProtocol,
    IpChecksum,
    IpSrc,
    IpDst,
    IpPayload,
    TcpSrc,
    TcpDst,
    TcpSeqno,
    TcpAckno,
    TcpSize,
    TcpReserv,
    TcpUrg,
    TcpAck,
    TcpPsh,
    TcpRst,
    TcpSyn,
    TcpFin,
    TcpWsize,
    TcpChecksum,
    TcpUrgp,
    TcpPayload,
    UdpSrc,
    UdpDst,
    UdpSize,
    UdpChecksum,
    UdpPayload,
    IcmpType,
    IcmpCode,
    IcmpChecksum,
    IcmpPayload,
    Signature,
}

/// Protocol layer a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Ip,
    Tcp,
    Udp,
    Icmp,
    /// Not a header field (`signature`).
    Meta,
}

impl Layer {
    /// TCP, UDP and ICMP.
    pub fn is_transport(self) -> bool {
        matches!(self, Layer::Tcp | Layer::Udp | Layer::Icmp)
    }
}

/// Value validator attached to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Numeric literal equal to 4.
    IpVersion,
    U1,
    U3,
    U4,
    U6,
    U8,
    U13,
    U16,
    U32,
    /// Dotted quad or symbolic IP class.
    Ipv4,
    /// Quoted string.
    Str,
}

impl FieldKind {
    /// Bit width for numeric kinds.
    pub fn bits(self) -> Option<u32> {
        match self {
            FieldKind::U1 => Some(1),
            FieldKind::U3 => Some(3),
            FieldKind::U4 => Some(4),
            FieldKind::U6 => Some(6),
            FieldKind::U8 => Some(8),
            FieldKind::U13 => Some(13),
            FieldKind::U16 => Some(16),
            FieldKind::U32 => Some(32),
            FieldKind::IpVersion | FieldKind::Ipv4 | FieldKind::Str => None,
        }
    }

    /// Whether a literal token is an acceptable value for this kind.
    pub fn accepts(self, token: &str) -> bool {
        match self {
            FieldKind::IpVersion => value::parse_numeric(token) == Some(4),
            FieldKind::Ipv4 => value::is_ipv4(token),
            FieldKind::Str => value::is_quoted(token),
            _ => match self.bits() {
                Some(bits) => value::fits_bits(token, bits),
                None => false,
            },
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::IpVersion => write!(f, "ip version"),
            FieldKind::Ipv4 => write!(f, "ipv4 address"),
            FieldKind::Str => write!(f, "string"),
            other => write!(f, "u{}", other.bits().unwrap_or_default()),
        }
    }
}

/// One catalog row.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub label: &'static str,
    pub id: FieldId,
    pub kind: FieldKind,
}

const fn field(label: &'static str, id: FieldId, kind: FieldKind) -> FieldDescriptor {
    FieldDescriptor { label, id, kind }
}

/// All fields, in index order (`FIELDS[id as usize].id == id`).
pub const FIELDS: [FieldDescriptor; 39] = [
    field("ip.version", FieldId::IpVersion, FieldKind::IpVersion),
    field("ip.ihl", FieldId::IpIhl, FieldKind::U4),
    field("ip.tos", FieldId::IpTos, FieldKind::U8),
    field("ip.tlen", FieldId::IpTlen, FieldKind::U16),
    field("ip.id", FieldId::IpId, FieldKind::U16),
    field("ip.flags", FieldId::IpFlags, FieldKind::U3),
    field("ip.offset", FieldId::IpOffset, FieldKind::U13),
    field("ip.ttl", FieldId::IpTtl, FieldKind::U8),
    field("ip.protocol", FieldId::IpProtocol, FieldKind::U8),
    field("ip.checksum", FieldId::IpChecksum, FieldKind::U16),
    field("ip.src", FieldId::IpSrc, FieldKind::Ipv4),
    field("ip.dst", FieldId::IpDst, FieldKind::Ipv4),
    field("ip.payload", FieldId::IpPayload, FieldKind::Str),
    field("tcp.src", FieldId::TcpSrc, FieldKind::U16),
    field("tcp.dst", FieldId::TcpDst, FieldKind::U16),
    field("tcp.seqno", FieldId::TcpSeqno, FieldKind::U32),
    field("tcp.ackno", FieldId::TcpAckno, FieldKind::U32),
    field("tcp.size", FieldId::TcpSize, FieldKind::U4),
    field("tcp.reserv", FieldId::TcpReserv, FieldKind::U6),
    field("tcp.urg", FieldId::TcpUrg, FieldKind::U1),
    field("tcp.ack", FieldId::TcpAck, FieldKind::U1),
    field("tcp.psh", FieldId::TcpPsh, FieldKind::U1),
    field("tcp.rst", FieldId::TcpRst, FieldKind::U1),
    field("tcp.syn", FieldId::TcpSyn, FieldKind::U1),
    field("tcp.fin", FieldId::TcpFin, FieldKind::U1),
    field("tcp.wsize", FieldId::TcpWsize, FieldKind::U16),
    field("tcp.checksum", FieldId::TcpChecksum, FieldKind::U16),
    field("tcp.urgp", FieldId::TcpUrgp, FieldKind::U16),
    field("tcp.payload", FieldId::TcpPayload, FieldKind::Str),
    field("udp.src", FieldId::UdpSrc, FieldKind::U16),
    field("udp.dst", FieldId::UdpDst, FieldKind::U16),
    field("udp.size", FieldId::UdpSize, FieldKind::U16),
    field("udp.checksum", FieldId::UdpChecksum, FieldKind::U16),
    field("udp.payload", FieldId::UdpPayload, FieldKind::Str),
    field("icmp.type", FieldId::IcmpType, FieldKind::U8),
    field("icmp.code", FieldId::IcmpCode, FieldKind::U8),
    field("icmp.checksum", FieldId::IcmpChecksum, FieldKind::U16),
    field("icmp.payload", FieldId::IcmpPayload, FieldKind::Str),
    field("signature", FieldId::Signature, FieldKind::Str),
];

/// Number of catalog fields.
pub const FIELD_COUNT: usize = FIELDS.len();

impl FieldId {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn descriptor(self) -> &'static FieldDescriptor {
        &FIELDS[self.index()]
    }

    pub fn label(self) -> &'static str {
        self.descriptor().label
    }

    pub fn kind(self) -> FieldKind {
        self.descriptor().kind
    }

    pub fn layer(self) -> Layer {
        match self {
            FieldId::Signature => Layer::Meta,
            id if id <= FieldId::IpPayload => Layer::Ip,
            id if id <= FieldId::TcpPayload => Layer::Tcp,
            id if id <= FieldId::UdpPayload => Layer::Udp,
            _ => Layer::Icmp,
        }
    }

    /// Look a field up by its DSL label.
    pub fn from_label(label: &str) -> Option<FieldId> {
        label_map().get(label).copied()
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn label_map() -> &'static HashMap<&'static str, FieldId> {
    static LABELS: OnceLock<HashMap<&'static str, FieldId>> = OnceLock::new();
    LABELS.get_or_init(|| FIELDS.iter().map(|d| (d.label, d.id)).collect())
}
