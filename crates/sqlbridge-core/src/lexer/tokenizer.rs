//! The SQL scanner.
//!
//! A byte-level state machine over UTF-8 source. Every produced token
//! borrows its `raw` bytes from the source; the scanner performs no heap
//! allocation. Whitespace and comments (`--`, `#`, `/* */`) are absorbed
//! silently. Unknown bytes become [`TokenKind::Illegal`] tokens rather than
//! errors; the parser reports them with a position.

use super::keywords::{lookup_keyword, MAX_KEYWORD_LEN};
use super::{Token, TokenKind};

/// A reusable SQL lexer over borrowed source text.
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    line: u32,
    col: u32,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer positioned at the start of `src`.
    #[must_use]
    pub const fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Rewinds the lexer onto new source text.
    pub fn reset(&mut self, src: &'a str) {
        self.src = src;
        self.pos = 0;
        self.line = 1;
        self.col = 1;
    }

    #[inline]
    fn byte(&self, i: usize) -> u8 {
        *self.src.as_bytes().get(i).unwrap_or(&0)
    }

    #[inline]
    fn peek_byte(&self) -> u8 {
        self.byte(self.pos)
    }

    #[inline]
    fn bump(&mut self) {
        self.pos += 1;
        self.col += 1;
    }

    fn token(&self, kind: TokenKind, start: usize, line: u32, col: u32) -> Token<'a> {
        Token {
            kind,
            raw: &self.src[start..self.pos],
            pos: start as u32,
            line,
            col,
        }
    }

    /// Returns the next token. Returns [`TokenKind::Eof`] at end of input
    /// and keeps returning it on subsequent calls.
    pub fn next_token(&mut self) -> Token<'a> {
        let src = self.src.as_bytes();
        while self.pos < src.len() {
            let start = self.pos;
            let line = self.line;
            let col = self.col;
            let b = src[self.pos];

            match b {
                b'\n' => {
                    self.pos += 1;
                    self.line += 1;
                    self.col = 1;
                }
                b'\r' => {
                    self.pos += 1;
                    if self.peek_byte() == b'\n' {
                        self.pos += 1;
                    }
                    self.line += 1;
                    self.col = 1;
                }
                b' ' | b'\t' | 0x0B | 0x0C => {
                    self.bump();
                    while is_space(self.peek_byte()) {
                        self.bump();
                    }
                }
                b'-' if self.byte(self.pos + 1) == b'-' => {
                    // line comment
                    self.pos += 2;
                    self.col += 2;
                    while self.pos < src.len() && src[self.pos] != b'\n' {
                        self.bump();
                    }
                }
                b'#' => {
                    // `#>` and `#>>` are JSON operators, not a comment start
                    if self.byte(self.pos + 1) == b'>' {
                        return self.lex_punct(start, line, col);
                    }
                    // MySQL hash comment
                    self.bump();
                    while self.pos < src.len() && src[self.pos] != b'\n' {
                        self.bump();
                    }
                }
                b'/' if self.byte(self.pos + 1) == b'*' => {
                    // block comment; unterminated extends to end of input
                    self.pos += 2;
                    self.col += 2;
                    while self.pos < src.len() {
                        if src[self.pos] == b'\n' {
                            self.pos += 1;
                            self.line += 1;
                            self.col = 1;
                        } else if src[self.pos] == b'*' && self.byte(self.pos + 1) == b'/' {
                            self.pos += 2;
                            self.col += 2;
                            break;
                        } else {
                            self.bump();
                        }
                    }
                }
                b'0' if matches!(self.byte(self.pos + 1), b'x' | b'X') => {
                    return self.lex_hex_0x(start, line, col);
                }
                b'0'..=b'9' => return self.lex_number(start, line, col),
                b'.' if self.byte(self.pos + 1).is_ascii_digit() => {
                    return self.lex_number(start, line, col);
                }
                b'\'' => return self.lex_quoted(start, line, col, b'\'', TokenKind::String),
                b'"' => return self.lex_quoted(start, line, col, b'"', TokenKind::DoubleQuoted),
                b'`' => return self.lex_quoted(start, line, col, b'`', TokenKind::Backtick),
                b'x' | b'X' if self.byte(self.pos + 1) == b'\'' => {
                    return self.lex_hex_quoted(start, line, col);
                }
                b'b' | b'B' if self.byte(self.pos + 1) == b'\'' => {
                    // b'...' bit literal: skip the prefix, scan the quoted body
                    self.bump();
                    return self.lex_quoted(start, line, col, b'\'', TokenKind::BitLit);
                }
                b'a'..=b'z' | b'A'..=b'Z' | b'_' => return self.lex_ident(start, line, col),
                _ => return self.lex_punct(start, line, col),
            }
        }
        Token {
            kind: TokenKind::Eof,
            raw: &self.src[self.src.len()..],
            pos: self.pos as u32,
            line: self.line,
            col: self.col,
        }
    }

    /// Scans an identifier or keyword.
    fn lex_ident(&mut self, start: usize, line: u32, col: u32) -> Token<'a> {
        self.bump();
        while is_ident_cont(self.peek_byte()) && self.pos < self.src.len() {
            self.bump();
        }
        let raw = &self.src.as_bytes()[start..self.pos];

        // Lowercase into a stack buffer for keyword lookup. Spans longer
        // than the longest keyword are unconditionally identifiers.
        if raw.len() > MAX_KEYWORD_LEN {
            return self.token(TokenKind::Ident, start, line, col);
        }
        let mut scratch = [0u8; MAX_KEYWORD_LEN];
        for (dst, &c) in scratch.iter_mut().zip(raw) {
            *dst = c.to_ascii_lowercase();
        }
        let kind = match lookup_keyword(&scratch[..raw.len()]) {
            Some(kw) => TokenKind::Keyword(kw),
            None => TokenKind::Ident,
        };
        self.token(kind, start, line, col)
    }

    /// Scans an integer or float literal.
    fn lex_number(&mut self, start: usize, line: u32, col: u32) -> Token<'a> {
        let mut kind = TokenKind::Int;
        while self.peek_byte().is_ascii_digit() {
            self.bump();
        }
        if self.peek_byte() == b'.' {
            kind = TokenKind::Float;
            self.bump();
            while self.peek_byte().is_ascii_digit() {
                self.bump();
            }
        }
        if matches!(self.peek_byte(), b'e' | b'E') {
            kind = TokenKind::Float;
            self.bump();
            if matches!(self.peek_byte(), b'+' | b'-') {
                self.bump();
            }
            while self.peek_byte().is_ascii_digit() {
                self.bump();
            }
        }
        self.token(kind, start, line, col)
    }

    /// Scans a quoted span. The cursor sits on the opening delimiter; `start`
    /// may lie earlier (bit literals include their `b` prefix).
    ///
    /// A doubled delimiter is an escape. Backslash escapes the next character
    /// inside single- and double-quoted forms but not backticks. Unterminated
    /// literals extend to end of input.
    fn lex_quoted(
        &mut self,
        start: usize,
        line: u32,
        col: u32,
        delim: u8,
        kind: TokenKind,
    ) -> Token<'a> {
        self.bump(); // opening delimiter
        while self.pos < self.src.len() {
            let c = self.src.as_bytes()[self.pos];
            if c == delim {
                self.bump();
                if self.peek_byte() == delim {
                    self.bump();
                    continue;
                }
                break;
            }
            if c == b'\\' && delim != b'`' {
                self.bump();
                self.bump_char();
                continue;
            }
            if c == b'\n' {
                self.pos += 1;
                self.line += 1;
                self.col = 1;
                continue;
            }
            if c >= 0x80 {
                self.bump_char();
                continue;
            }
            self.bump();
        }
        self.token(kind, start, line, col)
    }

    /// Advances over one full character, counting a single column.
    fn bump_char(&mut self) {
        if let Some(ch) = self.src[self.pos..].chars().next() {
            self.pos += ch.len_utf8();
            self.col += 1;
        }
    }

    /// Scans `x'...'`.
    fn lex_hex_quoted(&mut self, start: usize, line: u32, col: u32) -> Token<'a> {
        self.bump(); // x
        self.bump(); // '
        while self.pos < self.src.len() && self.src.as_bytes()[self.pos] != b'\'' {
            self.bump();
        }
        if self.pos < self.src.len() {
            self.bump(); // closing '
        }
        self.token(TokenKind::HexLit, start, line, col)
    }

    /// Scans `0x...`.
    fn lex_hex_0x(&mut self, start: usize, line: u32, col: u32) -> Token<'a> {
        self.pos += 2;
        self.col += 2;
        while self.peek_byte().is_ascii_hexdigit() {
            self.bump();
        }
        self.token(TokenKind::HexLit, start, line, col)
    }

    /// Scans single- and multi-character punctuation and operators.
    fn lex_punct(&mut self, start: usize, line: u32, col: u32) -> Token<'a> {
        let b = self.src.as_bytes()[self.pos];
        if b >= 0x80 {
            // not ASCII punctuation; swallow one full character
            self.bump_char();
            return self.token(TokenKind::Illegal, start, line, col);
        }
        self.bump();

        let kind = match b {
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            b'*' => TokenKind::Star,
            b'%' => TokenKind::Percent,
            b'^' => TokenKind::Caret,
            b'~' => TokenKind::Tilde,
            b'+' => TokenKind::Plus,
            b'/' => TokenKind::Slash,
            b'?' => match self.peek_byte() {
                b'|' => {
                    self.bump();
                    TokenKind::QuestionPipe
                }
                b'&' => {
                    self.bump();
                    TokenKind::QuestionAnd
                }
                b'0'..=b'9' => {
                    // numbered parameter ?1
                    while self.peek_byte().is_ascii_digit() {
                        self.bump();
                    }
                    TokenKind::NamedParam
                }
                _ => TokenKind::Question,
            },
            b'=' => {
                if self.peek_byte() == b'>' {
                    self.bump();
                    TokenKind::FatArrow
                } else {
                    TokenKind::Eq
                }
            }
            b'!' => {
                if self.peek_byte() == b'=' {
                    self.bump();
                    TokenKind::Neq
                } else {
                    TokenKind::Bang
                }
            }
            b'<' => match self.peek_byte() {
                b'=' => {
                    self.bump();
                    TokenKind::Le
                }
                b'>' => {
                    self.bump();
                    TokenKind::Neq
                }
                b'@' => {
                    self.bump();
                    TokenKind::ArrowAt
                }
                b'<' => {
                    self.bump();
                    TokenKind::Shl
                }
                _ => TokenKind::Lt,
            },
            b'>' => match self.peek_byte() {
                b'=' => {
                    self.bump();
                    TokenKind::Ge
                }
                b'>' => {
                    self.bump();
                    TokenKind::Shr
                }
                _ => TokenKind::Gt,
            },
            b'|' => {
                if self.peek_byte() == b'|' {
                    self.bump();
                    TokenKind::Concat
                } else {
                    TokenKind::Pipe
                }
            }
            b'&' => {
                if self.peek_byte() == b'&' {
                    self.bump();
                    TokenKind::AndAnd
                } else {
                    TokenKind::Ampersand
                }
            }
            b'-' => {
                if self.peek_byte() == b'>' {
                    self.bump();
                    if self.peek_byte() == b'>' {
                        self.bump();
                        TokenKind::LongArrow
                    } else {
                        TokenKind::Arrow
                    }
                } else {
                    TokenKind::Minus
                }
            }
            b'.' => {
                if self.peek_byte() == b'.' {
                    self.bump();
                    TokenKind::DotDot
                } else {
                    TokenKind::Dot
                }
            }
            b':' => {
                if is_ident_start(self.peek_byte()) {
                    self.consume_ident_cont();
                    TokenKind::NamedParam
                } else {
                    TokenKind::Colon
                }
            }
            b'@' => {
                if self.peek_byte() == b'>' {
                    self.bump();
                    TokenKind::AtArrow
                } else if is_ident_start(self.peek_byte()) || self.peek_byte() == b'@' {
                    self.consume_ident_cont();
                    TokenKind::NamedParam
                } else {
                    TokenKind::At
                }
            }
            b'$' => {
                if self.peek_byte().is_ascii_digit() {
                    while self.peek_byte().is_ascii_digit() {
                        self.bump();
                    }
                    TokenKind::NamedParam
                } else if is_ident_start(self.peek_byte()) {
                    self.consume_ident_cont();
                    TokenKind::NamedParam
                } else {
                    TokenKind::Dollar
                }
            }
            b'#' => {
                if self.peek_byte() == b'>' {
                    self.bump();
                    if self.peek_byte() == b'>' {
                        self.bump();
                        TokenKind::HashLongArrow
                    } else {
                        TokenKind::HashArrow
                    }
                } else {
                    TokenKind::Hash
                }
            }
            _ => TokenKind::Illegal,
        };
        self.token(kind, start, line, col)
    }

    fn consume_ident_cont(&mut self) {
        while is_ident_cont(self.peek_byte()) && self.pos < self.src.len() {
            self.bump();
        }
    }
}

#[inline]
const fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | 0x0B | 0x0C)
}

#[inline]
const fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

#[inline]
const fn is_ident_cont(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'$'
}

#[cfg(test)]
mod tests {
    use super::super::tokenize;
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut buf = Vec::new();
        tokenize(input, &mut buf);
        buf.into_iter().map(|t| t.kind).collect()
    }

    fn raws(input: &str) -> Vec<String> {
        let mut buf = Vec::new();
        tokenize(input, &mut buf);
        buf.into_iter().map(|t| t.raw.to_owned()).collect()
    }

    use crate::lexer::Keyword;

    #[test]
    fn empty_input_is_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds("  \t\n  "), vec![TokenKind::Eof]);
    }

    #[test]
    fn keywords_case_insensitive() {
        assert_eq!(
            kinds("select FROM wHeRe"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Keyword(Keyword::From),
                TokenKind::Keyword(Keyword::Where),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn identifiers() {
        assert_eq!(
            kinds("foo bar_baz _qux v$1"),
            vec![
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn long_span_is_identifier() {
        assert_eq!(
            kinds("an_identifier_longer_than_any_keyword"),
            vec![TokenKind::Ident, TokenKind::Eof]
        );
    }

    #[test]
    fn comments_are_absorbed() {
        assert_eq!(
            kinds("SELECT -- trailing\nFROM"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Keyword(Keyword::From),
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds("SELECT /* block\ncomment */ FROM # hash\n1"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Keyword(Keyword::From),
                TokenKind::Int,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unterminated_block_comment_extends_to_eof() {
        assert_eq!(kinds("SELECT /* never closed"), vec![
            TokenKind::Keyword(Keyword::Select),
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn numbers() {
        assert_eq!(
            kinds("42 3.14 .5 1e10 2.5e-3 1."),
            vec![
                TokenKind::Int,
                TokenKind::Float,
                TokenKind::Float,
                TokenKind::Float,
                TokenKind::Float,
                TokenKind::Float,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn hex_and_bit_literals() {
        assert_eq!(
            kinds("x'1F' 0xBEEF b'0101'"),
            vec![
                TokenKind::HexLit,
                TokenKind::HexLit,
                TokenKind::BitLit,
                TokenKind::Eof,
            ]
        );
        assert_eq!(raws("x'1F' 0xBEEF")[..2], ["x'1F'", "0xBEEF"]);
    }

    #[test]
    fn quoted_forms() {
        assert_eq!(
            kinds(r#"'s' "d" `b`"#),
            vec![
                TokenKind::String,
                TokenKind::DoubleQuoted,
                TokenKind::Backtick,
                TokenKind::Eof,
            ]
        );
        // doubled delimiter escapes; raw is untouched
        assert_eq!(raws("'it''s'")[0], "'it''s'");
        // backslash escapes in single quotes, not backticks
        assert_eq!(raws(r"'a\'b'")[0], r"'a\'b'");
    }

    #[test]
    fn unterminated_string_extends_to_eof() {
        let toks = raws("'never closed");
        assert_eq!(toks[0], "'never closed");
    }

    #[test]
    fn multibyte_string_counts_one_column_per_char() {
        let mut buf = Vec::new();
        tokenize("'héllo' x", &mut buf);
        assert_eq!(buf[0].kind, TokenKind::String);
        assert_eq!(buf[0].raw, "'héllo'");
        // 'héllo' is 7 columns; token x starts at column 9
        assert_eq!(buf[1].col, 9);
    }

    #[test]
    fn operators_multichar() {
        assert_eq!(
            kinds("!= <> <= >= << >> || && => -> ->> #> #>> @> <@ ?| ?& .."),
            vec![
                TokenKind::Neq,
                TokenKind::Neq,
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::Shl,
                TokenKind::Shr,
                TokenKind::Concat,
                TokenKind::AndAnd,
                TokenKind::FatArrow,
                TokenKind::Arrow,
                TokenKind::LongArrow,
                TokenKind::HashArrow,
                TokenKind::HashLongArrow,
                TokenKind::AtArrow,
                TokenKind::ArrowAt,
                TokenKind::QuestionPipe,
                TokenKind::QuestionAnd,
                TokenKind::DotDot,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn hash_arrow_is_not_a_comment() {
        assert_eq!(
            kinds("payload#>'{a}'"),
            vec![
                TokenKind::Ident,
                TokenKind::HashArrow,
                TokenKind::String,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn parameters() {
        assert_eq!(
            kinds("? ?3 :name @name @@session $1 $name $"),
            vec![
                TokenKind::Question,
                TokenKind::NamedParam,
                TokenKind::NamedParam,
                TokenKind::NamedParam,
                TokenKind::NamedParam,
                TokenKind::NamedParam,
                TokenKind::NamedParam,
                TokenKind::Dollar,
                TokenKind::Eof,
            ]
        );
        assert_eq!(raws(":name @x $2 ?7")[..4], [":name", "@x", "$2", "?7"]);
    }

    #[test]
    fn illegal_bytes_are_tokens_not_errors() {
        let mut buf = Vec::new();
        tokenize("select \u{00A7} 1", &mut buf);
        assert_eq!(buf[1].kind, TokenKind::Illegal);
        assert_eq!(buf[2].kind, TokenKind::Int);
    }

    #[test]
    fn positions_track_lines_and_columns() {
        let mut buf = Vec::new();
        tokenize("SELECT a\nFROM t", &mut buf);
        assert_eq!((buf[0].line, buf[0].col), (1, 1));
        assert_eq!((buf[1].line, buf[1].col), (1, 8));
        assert_eq!((buf[2].line, buf[2].col), (2, 1));
        assert_eq!((buf[3].line, buf[3].col), (2, 6));
    }

    #[test]
    fn raw_slices_cover_the_source() {
        let src = "SELECT a, 'x''y' FROM t -- done\nWHERE a >= 1.5";
        let mut buf = Vec::new();
        tokenize(src, &mut buf);
        let mut last_end = 0usize;
        for tok in &buf {
            let start = tok.pos as usize;
            assert!(start >= last_end, "token offsets must be monotonic");
            // every raw is the exact sub-slice of the source at its offset
            assert_eq!(&src[start..start + tok.raw.len()], tok.raw);
            last_end = start + tok.raw.len();
        }
        assert_eq!(last_end, src.len(), "final token must end at end of input");
    }

    #[test]
    fn eof_is_sticky() {
        let mut lexer = Lexer::new("1");
        assert_eq!(lexer.next_token().kind, TokenKind::Int);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn reset_rewinds() {
        let mut lexer = Lexer::new("a");
        let _ = lexer.next_token();
        lexer.reset("b");
        let tok = lexer.next_token();
        assert_eq!(tok.raw, "b");
        assert_eq!((tok.line, tok.col), (1, 1));
    }
}
