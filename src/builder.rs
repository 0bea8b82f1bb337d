//! Second pass: build named signature entries from a syntax-checked document.

use crate::ast::{FieldConfig, SignatureEntry, SignatureSet};
use crate::catalog::FieldId;
use crate::error::SemanticError;
use crate::lexer::{Token, TokenKind};
use crate::syntax::CheckedDocument;
use crate::value::{unquote, EncodedValue};

/// Build every entry in document order. The first failure drops everything built so far.
pub fn build_entries(doc: CheckedDocument<'_, '_>) -> Result<SignatureSet, SemanticError> {
    let mut set = SignatureSet::new();
    for block in doc.tokens.split_inclusive(|t| t.is(TokenKind::Close)) {
        let entry = build_entry(doc.source, block, &set)?;
        tracing::debug!(signature = %entry.name, fields = entry.fields.len(), "built signature");
        set.push(entry)
            .map_err(|e| report(SemanticError::SignatureRedeclared(e.name)))?;
    }
    Ok(set)
}

/// `(field, value token)` pairs of one `[ ... ]` block, in source order.
fn fields_of<'t, 'src>(
    block: &'t [Token<'src>],
) -> impl Iterator<Item = (FieldId, &'t Token<'src>)> + 't {
    // Checked blocks are `[` then groups of `label = value` followed by `,` or `]`.
    block
        .get(1..)
        .unwrap_or_default()
        .chunks(4)
        .filter_map(|group| Some((FieldId::from_label(group.first()?.text)?, group.get(2)?)))
}

fn build_entry(
    source: &str,
    block: &[Token<'_>],
    built: &SignatureSet,
) -> Result<SignatureEntry, SemanticError> {
    let name = match fields_of(block).find(|(field, _)| *field == FieldId::Signature) {
        Some((_, token)) => unquote(token.text).to_string(),
        None => {
            if let Some(open) = block.first() {
                let (line, column) = open.line_col(source);
                tracing::error!(line, column, "invalid signature: {}", SemanticError::MissingSignatureField);
            }
            return Err(SemanticError::MissingSignatureField);
        }
    };
    if built.contains(&name) {
        return Err(report(SemanticError::SignatureRedeclared(name)));
    }

    let mut entry = SignatureEntry::new(name);
    for (field, token) in fields_of(block).filter(|(field, _)| *field != FieldId::Signature) {
        let value = EncodedValue::encode(token.text).ok_or_else(|| {
            report(SemanticError::UnencodableValue {
                signature: entry.name.clone(),
                field,
                token: token.text.to_string(),
            })
        })?;
        entry.fields.push(FieldConfig::new(field, value));
    }
    Ok(entry)
}

fn report(err: SemanticError) -> SemanticError {
    tracing::error!("invalid signature: {}", err);
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::syntax::check_document;
    use crate::value::Ipv4Class;

    fn build(src: &str) -> Result<SignatureSet, SemanticError> {
        let tokens = tokenize(src).expect("tokenize");
        let doc = check_document(src, &tokens).expect("syntax");
        build_entries(doc)
    }

    #[test]
    fn builds_entries_in_order() {
        let set = build(
            r#"
            [ip.ttl = 64, signature = "first", ip.src = 10.0.0.1]
            [signature = "second", ip.dst = asian-ip, tcp.payload = "GET /\r\n"]
            "#,
        )
        .expect("build");
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["first", "second"]);

        let first = set.get("first").expect("first");
        let fields: Vec<_> = first.fields.iter().map(|c| c.field).collect();
        assert_eq!(fields, vec![FieldId::IpTtl, FieldId::IpSrc]);
        assert_eq!(first.value(FieldId::IpTtl), Some(&EncodedValue::Integer(64)));
        assert_eq!(first.value(FieldId::IpSrc), Some(&EncodedValue::Ipv4([10, 0, 0, 1])));

        let second = set.get("second").expect("second");
        assert_eq!(
            second.value(FieldId::IpDst),
            Some(&EncodedValue::Ipv4Class(Ipv4Class::Asian))
        );
        assert_eq!(
            second.value(FieldId::TcpPayload),
            Some(&EncodedValue::Str(r"GET /\r\n".to_string()))
        );
    }

    #[test]
    fn empty_document_builds_empty_set() {
        assert!(build("").expect("build").is_empty());
    }

    #[test]
    fn missing_signature_field() {
        assert_eq!(
            build(r#"[signature = "a", ip.ttl = 1] [ip.ttl = 2]"#).unwrap_err(),
            SemanticError::MissingSignatureField
        );
    }

    #[test]
    fn redeclared_signature() {
        assert_eq!(
            build(r#"[signature = "a"] [signature = "b"] [signature = "a"]"#).unwrap_err(),
            SemanticError::SignatureRedeclared("a".into())
        );
    }

    #[test]
    fn signature_names_compare_after_unquoting() {
        let set = build(r#"[signature = "a b"] [signature = "a  b"]"#).expect("build");
        assert_eq!(set.len(), 2);
        assert!(set.get("a b").expect("a b").fields.is_empty());
    }
}
