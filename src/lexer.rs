//! Tokenize signature documents using PEST.
//!
//! Whitespace (space, tab, CR, LF) separates tokens. A `#` preceded by whitespace, or at the
//! very start of the document, opens a comment running to the end of the line; any other `#`
//! is part of a word. `=`, `,`, `[` and `]` are single-character tokens; a `"` starts a string
//! running to the next unescaped `"`. Everything else is a word: the longest run of non-blank,
//! non-structural characters.

use pest::iterators::Pairs;
use pest::Parser;
use pest_derive::Parser as PestParser;

#[derive(PestParser)]
#[grammar = "grammar.pest"]
struct SignatureLexer;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("tokenizer: {0}")]
    Grammar(String),
    #[error("invalid UTF-8 at byte {offset}")]
    InvalidUtf8 { offset: usize },
}

/// Decode raw document bytes, rejecting anything that is not UTF-8.
pub fn decode_source(bytes: Vec<u8>) -> Result<String, LexError> {
    String::from_utf8(bytes).map_err(|e| LexError::InvalidUtf8 {
        offset: e.utf8_error().valid_up_to(),
    })
}

/// Token classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Equals,
    Comma,
    Open,
    Close,
    /// Quoted string, quotes included.
    Quoted,
    Word,
}

/// A token borrowed from the source text. Never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    /// Byte offset of the first character.
    pub offset: usize,
}

impl<'src> Token<'src> {
    /// Byte offset just past the token.
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// 1-based line and column of the token within `source`.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let before = &source[..self.offset.min(source.len())];
        let line = before.matches('\n').count() + 1;
        let column = match before.rfind('\n') {
            Some(nl) => before[nl + 1..].chars().count() + 1,
            None => before.chars().count() + 1,
        };
        (line, column)
    }
}

/// Cursor over the tokens of a document.
pub struct Tokenizer<'src> {
    pairs: Pairs<'src, Rule>,
    position: usize,
}

impl<'src> Tokenizer<'src> {
    pub fn new(source: &'src str) -> Result<Self, LexError> {
        let mut top = SignatureLexer::parse(Rule::document, source)
            .map_err(|e| LexError::Grammar(e.to_string()))?;
        let document = top
            .next()
            .ok_or_else(|| LexError::Grammar("empty parse".to_string()))?;
        Ok(Tokenizer {
            pairs: document.into_inner(),
            position: 0,
        })
    }

    /// Byte offset just past the last token returned.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl<'src> Iterator for Tokenizer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Token<'src>> {
        for pair in self.pairs.by_ref() {
            let kind = match pair.as_rule() {
                Rule::punct => match pair.as_str() {
                    "=" => TokenKind::Equals,
                    "," => TokenKind::Comma,
                    "[" => TokenKind::Open,
                    _ => TokenKind::Close,
                },
                Rule::quoted => TokenKind::Quoted,
                Rule::word => TokenKind::Word,
                _ => continue,
            };
            let span = pair.as_span();
            self.position = span.end();
            return Some(Token {
                kind,
                text: span.as_str(),
                offset: span.start(),
            });
        }
        None
    }
}

/// Tokenize a whole document.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    Ok(Tokenizer::new(source)?.collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(src: &str) -> Vec<&str> {
        tokenize(src).expect("tokenize").iter().map(|t| t.text).collect()
    }

    #[test]
    fn empty_and_blank_input() {
        assert!(texts("").is_empty());
        assert!(texts(" \t\r\n ").is_empty());
        assert!(texts("# only a comment").is_empty());
    }

    #[test]
    fn structural_characters_split_words() {
        assert_eq!(
            texts("[ip.ttl=64,ip.tos = 0x10]"),
            vec!["[", "ip.ttl", "=", "64", ",", "ip.tos", "=", "0x10", "]"]
        );
    }

    #[test]
    fn comments_after_whitespace() {
        let src = "[ # open\n  ip.ttl # label\n\t#\n= 1, # after comma\n] #end";
        assert_eq!(texts(src), vec!["[", "ip.ttl", "=", "1", ",", "]"]);
    }

    #[test]
    fn hash_right_after_a_token_starts_a_word() {
        assert_eq!(
            texts("[ip.ttl=#x\n1,#c\n]#end"),
            vec!["[", "ip.ttl", "=", "#x", "1", ",", "#c", "]", "#end"]
        );
        assert_eq!(texts("\"s\"# tail"), vec!["\"s\"", "#", "tail"]);
    }

    #[test]
    fn comment_at_start_of_document() {
        assert_eq!(texts("#header\n[ ]"), vec!["[", "]"]);
        assert_eq!(texts("#a\n#b\n[#c"), vec!["[", "#c"]);
    }

    #[test]
    fn non_utf8_bytes_are_rejected() {
        assert_eq!(decode_source(b"[ ]".to_vec()), Ok("[ ]".to_string()));
        assert_eq!(
            decode_source(b"[ip.payload = \"a\xffb\"]".to_vec()),
            Err(LexError::InvalidUtf8 { offset: 16 })
        );
    }

    #[test]
    fn hash_inside_word_is_kept() {
        assert_eq!(texts("a#b c"), vec!["a#b", "c"]);
    }

    #[test]
    fn quoted_strings_keep_escapes() {
        let toks = tokenize(r#"signature = "a \"quoted\", [x]" ]"#).expect("tokenize");
        assert_eq!(toks[2].kind, TokenKind::Quoted);
        assert_eq!(toks[2].text, r#""a \"quoted\", [x]""#);
        assert_eq!(toks[3].kind, TokenKind::Close);
    }

    #[test]
    fn unterminated_string_runs_to_end() {
        let toks = tokenize("x = \"abc, ]").expect("tokenize");
        assert_eq!(toks.len(), 3);
        assert_eq!(toks[2].text, "\"abc, ]");
    }

    #[test]
    fn cursor_tracks_position() {
        let src = "[ ip.ttl ";
        let mut t = Tokenizer::new(src).expect("tokenizer");
        assert_eq!(t.next().map(|t| t.text), Some("["));
        assert_eq!(t.position(), 1);
        assert_eq!(t.next().map(|t| t.text), Some("ip.ttl"));
        assert_eq!(t.position(), 8);
        assert_eq!(t.next(), None);
    }

    #[test]
    fn line_and_column() {
        let src = "[\n  ip.ttl = 1\n]";
        let toks = tokenize(src).expect("tokenize");
        assert_eq!(toks[1].line_col(src), (2, 3));
        assert_eq!(toks[4].line_col(src), (3, 1));
    }
}
