//! Semantic and load errors.

use crate::catalog::FieldId;
use crate::lexer::LexError;
use crate::syntax::SyntaxError;
use std::path::PathBuf;

/// Errors found while building entries or checking required fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SemanticError {
    #[error("signature field missing")]
    MissingSignatureField,
    #[error("packet signature \"{0}\" redeclared")]
    SignatureRedeclared(String),
    #[error("signature {signature}: field \"{field}\" value \"{token}\" cannot be encoded")]
    UnencodableValue {
        signature: String,
        field: FieldId,
        token: String,
    },
    #[error("signature {signature}: ip.version missing")]
    MissingIpVersion { signature: String },
    #[error("signature {signature}: ip version {version} is not supported")]
    UnsupportedIpVersion { signature: String, version: String },
    #[error("signature {signature}: field \"{field}\" is required")]
    MissingRequiredField { signature: String, field: FieldId },
    #[error("signature {signature}: tcp/udp/icmp fields informed in a non tcp, udp or icmp packet")]
    TransportFieldsWithoutProtocol { signature: String },
}

/// Pipeline stage that rejected a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Io,
    Syntax,
    Semantic,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("unable to read \"{}\": {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Semantic(#[from] SemanticError),
}

impl LoadError {
    pub fn stage(&self) -> Stage {
        match self {
            LoadError::Io { .. } => Stage::Io,
            LoadError::Lex(_) | LoadError::Syntax(_) => Stage::Syntax,
            LoadError::Semantic(_) => Stage::Semantic,
        }
    }

    pub fn as_lex(&self) -> Option<&LexError> {
        match self {
            LoadError::Lex(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            LoadError::Syntax(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_semantic(&self) -> Option<&SemanticError> {
        match self {
            LoadError::Semantic(e) => Some(e),
            _ => None,
        }
    }
}
