//! # pigsty: Packet Signature Compiler
//!
//! Loads and validates pigsty documents: named packet signatures that assign values to
//! IPv4, TCP, UDP and ICMP header fields and payloads. The compiled signatures are consumed
//! by a packet crafting/matching engine, which looks entries up by name and walks their
//! field configurations.
//!
//! ## Pipeline
//!
//! 1. **Tokenize** ([`lexer`]): PEST token grammar; `#` comments, quoted strings with escapes.
//! 2. **Syntax** ([`syntax`]): grammar and per-field value checks for the whole document.
//! 3. **Build** ([`builder`]): named entries with encoded field values, in source order.
//! 4. **Required fields** ([`required`]): IP version and mandatory header fields per entry.
//!
//! Loading is all-or-nothing: the first error aborts and nothing built so far survives.
//!
//! ## Example
//!
//! ```text
//! # TCP SYN towards a web server
//! [ signature = "syn-80",
//!   ip.version = 4, ip.ttl = 64, ip.protocol = 6,
//!   ip.src = asian-ip, ip.dst = 192.168.0.1,
//!   tcp.dst = 80, tcp.syn = 1 ]
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! let set = pigsty::load_file("signatures.pigsty")?;
//! for c in &set.get("syn-80").expect("declared").fields {
//!     println!("{} {:?}", c.index(), c.bytes());
//! }
//! # Ok::<(), pigsty::LoadError>(())
//! ```

pub mod ast;
pub mod builder;
pub mod catalog;
pub mod dump;
pub mod error;
pub mod lexer;
pub mod loader;
pub mod required;
pub mod syntax;
pub mod value;

pub use ast::{FieldConfig, SignatureEntry, SignatureSet};
pub use catalog::{FieldDescriptor, FieldId, FieldKind, Layer, FIELDS};
pub use error::{LoadError, SemanticError, Stage};
pub use lexer::{tokenize, LexError, Token, TokenKind, Tokenizer};
pub use loader::{load_file, load_signatures, load_str};
pub use syntax::SyntaxError;
pub use value::{EncodedValue, Ipv4Class};
