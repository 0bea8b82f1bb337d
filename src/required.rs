//! Cross-field checks over a built signature set: IP version and mandatory header fields.

use crate::ast::{SignatureEntry, SignatureSet};
use crate::catalog::FieldId;
use crate::error::SemanticError;
use crate::value::EncodedValue;

const IPV4_REQUIRED: [FieldId; 3] = [FieldId::IpSrc, FieldId::IpDst, FieldId::IpProtocol];

/// Check every entry in store order; the first failing entry rejects the whole set.
pub fn check_required_fields(set: &SignatureSet) -> Result<(), SemanticError> {
    for entry in set {
        check_entry(entry).map_err(|err| {
            tracing::error!(signature = %entry.name, "invalid signature: {}", err);
            err
        })?;
    }
    Ok(())
}

fn check_entry(entry: &SignatureEntry) -> Result<(), SemanticError> {
    let version = entry
        .value(FieldId::IpVersion)
        .ok_or_else(|| SemanticError::MissingIpVersion {
            signature: entry.name.clone(),
        })?;
    match version {
        EncodedValue::Integer(4) => {
            check_ipv4(entry)?;
            check_transport(entry)
        }
        EncodedValue::Integer(6) => check_ipv6(entry, version),
        _ => Err(unsupported(entry, version)),
    }
}

/// No IPv6 header fields exist in the catalog yet, so an IPv6 entry can never be complete.
fn check_ipv6(entry: &SignatureEntry, version: &EncodedValue) -> Result<(), SemanticError> {
    Err(unsupported(entry, version))
}

fn check_ipv4(entry: &SignatureEntry) -> Result<(), SemanticError> {
    match IPV4_REQUIRED.into_iter().find(|f| !entry.has(*f)) {
        Some(field) => Err(SemanticError::MissingRequiredField {
            signature: entry.name.clone(),
            field,
        }),
        None => Ok(()),
    }
}

/// Transport-layer fields need a declared protocol. Any protocol value is accepted.
fn check_transport(entry: &SignatureEntry) -> Result<(), SemanticError> {
    if entry.has(FieldId::IpProtocol) {
        return Ok(());
    }
    if entry.fields.iter().any(|c| c.field.layer().is_transport()) {
        return Err(SemanticError::TransportFieldsWithoutProtocol {
            signature: entry.name.clone(),
        });
    }
    Ok(())
}

fn unsupported(entry: &SignatureEntry, version: &EncodedValue) -> SemanticError {
    SemanticError::UnsupportedIpVersion {
        signature: entry.name.clone(),
        version: version.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::FieldConfig;
    use crate::value::Ipv4Class;

    fn entry(name: &str, fields: &[(FieldId, EncodedValue)]) -> SignatureEntry {
        let mut e = SignatureEntry::new(name);
        e.fields = fields
            .iter()
            .cloned()
            .map(|(f, v)| FieldConfig::new(f, v))
            .collect();
        e
    }

    fn set_of(entries: Vec<SignatureEntry>) -> SignatureSet {
        let mut set = SignatureSet::new();
        for e in entries {
            set.push(e).expect("unique");
        }
        set
    }

    fn ipv4_base() -> Vec<(FieldId, EncodedValue)> {
        vec![
            (FieldId::IpVersion, EncodedValue::Integer(4)),
            (FieldId::IpSrc, EncodedValue::Ipv4([10, 0, 0, 1])),
            (FieldId::IpDst, EncodedValue::Ipv4Class(Ipv4Class::European)),
            (FieldId::IpProtocol, EncodedValue::Integer(6)),
        ]
    }

    #[test]
    fn complete_ipv4_entry_passes() {
        let mut fields = ipv4_base();
        fields.push((FieldId::TcpSrc, EncodedValue::Integer(80)));
        assert_eq!(check_required_fields(&set_of(vec![entry("t", &fields)])), Ok(()));
    }

    #[test]
    fn any_protocol_value_is_accepted() {
        let mut fields = ipv4_base();
        fields[3].1 = EncodedValue::Integer(250);
        fields.push((FieldId::UdpDst, EncodedValue::Integer(53)));
        assert_eq!(check_required_fields(&set_of(vec![entry("t", &fields)])), Ok(()));
    }

    #[test]
    fn missing_version() {
        let base = ipv4_base();
        assert_eq!(
            check_required_fields(&set_of(vec![entry("t", &base[1..])])),
            Err(SemanticError::MissingIpVersion { signature: "t".into() })
        );
    }

    #[test]
    fn ipv6_and_other_versions_are_unsupported() {
        for v in [6, 5] {
            let mut fields = ipv4_base();
            fields[0].1 = EncodedValue::Integer(v);
            assert_eq!(
                check_required_fields(&set_of(vec![entry("t", &fields)])),
                Err(SemanticError::UnsupportedIpVersion {
                    signature: "t".into(),
                    version: v.to_string(),
                })
            );
        }
    }

    #[test]
    fn ipv6_is_rejected_even_when_complete() {
        let mut e = entry("v6", &ipv4_base());
        e.fields[0].value = EncodedValue::Integer(6);
        let version = EncodedValue::Integer(6);
        assert_eq!(
            check_ipv6(&e, &version),
            Err(SemanticError::UnsupportedIpVersion {
                signature: "v6".into(),
                version: "6".into(),
            })
        );
        assert_eq!(check_entry(&e), check_ipv6(&e, &version));
    }

    #[test]
    fn required_fields_reported_in_order() {
        let fields = vec![
            (FieldId::IpVersion, EncodedValue::Integer(4)),
            (FieldId::IpDst, EncodedValue::Ipv4([1, 1, 1, 1])),
        ];
        assert_eq!(
            check_required_fields(&set_of(vec![entry("t", &fields)])),
            Err(SemanticError::MissingRequiredField {
                signature: "t".into(),
                field: FieldId::IpSrc,
            })
        );
    }

    #[test]
    fn transport_fields_need_protocol() {
        let e = entry(
            "t",
            &[
                (FieldId::IpVersion, EncodedValue::Integer(4)),
                (FieldId::IcmpType, EncodedValue::Integer(8)),
            ],
        );
        assert_eq!(
            check_transport(&e),
            Err(SemanticError::TransportFieldsWithoutProtocol { signature: "t".into() })
        );
        let ip_only = entry("u", &[(FieldId::IpTtl, EncodedValue::Integer(1))]);
        assert_eq!(check_transport(&ip_only), Ok(()));
    }

    #[test]
    fn one_bad_entry_rejects_the_set() {
        let good = entry("good", &ipv4_base());
        let bad = entry("bad", &ipv4_base()[..3]);
        assert_eq!(
            check_required_fields(&set_of(vec![good, bad])),
            Err(SemanticError::MissingRequiredField {
                signature: "bad".into(),
                field: FieldId::IpProtocol,
            })
        );
    }
}
