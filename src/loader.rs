//! Load a signature document: tokenize, check syntax, build entries, check required fields.
//!
//! Loading is all-or-nothing. Any failure drops every entry built so far; the caller gets
//! either a complete [`SignatureSet`] or an error, never a partial document.

use crate::ast::SignatureSet;
use crate::builder::build_entries;
use crate::error::LoadError;
use crate::lexer::{decode_source, tokenize};
use crate::required::check_required_fields;
use crate::syntax::check_document;
use std::path::Path;

/// Compile signature source text.
pub fn load_str(source: &str) -> Result<SignatureSet, LoadError> {
    let tokens = tokenize(source).map_err(|e| {
        tracing::error!("invalid signature: {}", e);
        e
    })?;
    tracing::debug!(tokens = tokens.len(), "tokenized signature document");
    let doc = check_document(source, &tokens)?;
    let set = build_entries(doc)?;
    check_required_fields(&set)?;
    tracing::debug!(signatures = set.len(), "signature document loaded");
    Ok(set)
}

/// Read and compile a signature file.
pub fn load_file(path: impl AsRef<Path>) -> Result<SignatureSet, LoadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| {
        tracing::error!(path = %path.display(), "i/o error: {}", source);
        LoadError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let source = decode_source(bytes).map_err(|e| {
        tracing::error!(path = %path.display(), "invalid signature: {}", e);
        e
    })?;
    load_str(&source)
}

/// Load a signature file, reporting failure only through the log.
///
/// Returns `None` on any I/O, syntax or semantic error; use [`load_file`] to get the error.
pub fn load_signatures(path: impl AsRef<Path>) -> Option<SignatureSet> {
    let path = path.as_ref();
    match load_file(path) {
        Ok(set) => Some(set),
        Err(e) => {
            tracing::error!(path = %path.display(), stage = ?e.stage(), "signature file rejected, fix it and try again");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SemanticError, Stage};
    use crate::syntax::SyntaxError;

    const GOOD: &str = r#"[signature="t", ip.version=4, ip.src=10.0.0.1, ip.dst=10.0.0.2, ip.protocol=6]"#;

    #[test]
    fn loads_well_formed_entry() {
        let set = load_str(GOOD).expect("load");
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("t").expect("t").fields.len(), 4);
    }

    #[test]
    fn stages_are_reported() {
        let syntax = load_str("[ip.version = 6]").unwrap_err();
        assert_eq!(syntax.stage(), Stage::Syntax);
        assert!(matches!(syntax.as_syntax(), Some(SyntaxError::InvalidValue(..))));

        let semantic = load_str(r#"[signature = "t", ip.ttl = 1]"#).unwrap_err();
        assert_eq!(semantic.stage(), Stage::Semantic);
        assert_eq!(
            semantic.as_semantic(),
            Some(&SemanticError::MissingIpVersion { signature: "t".into() })
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_file("/nonexistent/dir/signatures.pigsty").unwrap_err();
        assert_eq!(err.stage(), Stage::Io);
        assert!(load_signatures("/nonexistent/dir/signatures.pigsty").is_none());
    }
}
