//! Lexer for function source text.
//!
//! Tokenizing is done with the logos library, one token at a time, while
//! whitespace, comments, template and regex literals and non-ASCII
//! identifiers are handled by the surrounding loop. The lexer never stops on bad input:
//! unexpected characters become [`Token::Error`] entries and are reported
//! alongside the token stream.

use crate::parser::token::{Span, Token};
use logos::Logos;
use unicode_xid::UnicodeXID;

/// Logos-based token enum for lexing.
///
/// Converted to the public [`Token`] enum after lexing.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum LogosToken {
    // Keywords (must come before identifiers)
    #[token("function")]
    Function,

    #[token("async")]
    Async,

    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*", |lex| lex.slice().to_string())]
    Identifier(String),

    #[regex(r"#[a-zA-Z_$][a-zA-Z0-9_$]*", |lex| lex.slice().to_string())]
    PrivateName(String),

    // Numbers are never interpreted, only skipped over
    #[regex(r"[0-9][0-9a-zA-Z_]*(\.[0-9][0-9a-zA-Z_]*)?", |lex| lex.slice().to_string())]
    #[regex(r"\.[0-9][0-9a-zA-Z_]*", |lex| lex.slice().to_string())]
    Number(String),

    #[regex(r#""([^"\\\n]|\\(.|\n))*""#, parse_string)]
    #[regex(r"'([^'\\\n]|\\(.|\n))*'", parse_string)]
    String(String),

    #[token("(")]
    LeftParen,

    #[token(")")]
    RightParen,

    #[token("{")]
    LeftBrace,

    #[token("}")]
    RightBrace,

    #[token("[")]
    LeftBracket,

    #[token("]")]
    RightBracket,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[token(":")]
    Colon,

    #[token("?")]
    Question,

    #[token(".")]
    Dot,

    #[token("...")]
    DotDotDot,

    #[token("=")]
    Equal,

    #[token("=>")]
    Arrow,

    #[token("*")]
    Star,

    #[token("===", operator)]
    #[token("!==", operator)]
    #[token("==", operator)]
    #[token("!=", operator)]
    #[token("<=", operator)]
    #[token(">=", operator)]
    #[token("&&", operator)]
    #[token("||", operator)]
    #[token("??", operator)]
    #[token("?.", operator)]
    #[token("++", operator)]
    #[token("--", operator)]
    #[token("**", operator)]
    #[token("+=", operator)]
    #[token("-=", operator)]
    #[token("*=", operator)]
    #[token("/=", operator)]
    #[token("%=", operator)]
    #[token("**=", operator)]
    #[token("&=", operator)]
    #[token("|=", operator)]
    #[token("^=", operator)]
    #[token("&&=", operator)]
    #[token("||=", operator)]
    #[token("??=", operator)]
    #[token("<<", operator)]
    #[token(">>", operator)]
    #[token(">>>", operator)]
    #[token("<<=", operator)]
    #[token(">>=", operator)]
    #[token(">>>=", operator)]
    #[token("+", operator)]
    #[token("-", operator)]
    #[token("/", operator)]
    #[token("%", operator)]
    #[token("<", operator)]
    #[token(">", operator)]
    #[token("!", operator)]
    #[token("~", operator)]
    #[token("&", operator)]
    #[token("|", operator)]
    #[token("^", operator)]
    #[token("@", operator)]
    Operator(String),
}

fn operator(lex: &mut logos::Lexer<LogosToken>) -> String {
    lex.slice().to_string()
}

fn parse_string(lex: &mut logos::Lexer<LogosToken>) -> String {
    let s = lex.slice();
    // Contents are kept raw: escapes never matter for a parameter list
    s[1..s.len() - 1].to_string()
}

/// Lexer error types.
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    UnexpectedCharacter { char: char, span: Span },
    UnterminatedComment { span: Span },
    UnterminatedTemplate { span: Span },
}

impl LexError {
    /// Get the span of this error
    pub fn span(&self) -> &Span {
        match self {
            LexError::UnexpectedCharacter { span, .. }
            | LexError::UnterminatedComment { span }
            | LexError::UnterminatedTemplate { span } => span,
        }
    }

    /// Get a description of this error
    pub fn description(&self) -> String {
        match self {
            LexError::UnexpectedCharacter { char, .. } => {
                format!("Unexpected character '{}'", char)
            }
            LexError::UnterminatedComment { .. } => "Unterminated block comment".to_string(),
            LexError::UnterminatedTemplate { .. } => "Unterminated template literal".to_string(),
        }
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}:{}",
            self.description(),
            self.span().line,
            self.span().column
        )
    }
}

impl std::error::Error for LexError {}

/// Main lexer structure.
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    line: u32,
    column: u32,
    tokens: Vec<(Token, Span)>,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the whole source, failing if any character could not be lexed.
    pub fn tokenize(self) -> Result<Vec<(Token, Span)>, Vec<LexError>> {
        let (tokens, errors) = self.tokenize_loose();
        if errors.is_empty() {
            Ok(tokens)
        } else {
            Err(errors)
        }
    }

    /// Tokenize the whole source, keeping going after errors.
    ///
    /// The returned stream always ends with [`Token::Eof`]; every lexing error
    /// has a matching [`Token::Error`] entry at its position.
    pub fn tokenize_loose(mut self) -> (Vec<(Token, Span)>, Vec<LexError>) {
        let source = self.source;
        while self.skip_trivia() {
            let start = self.pos;
            let (line, column) = (self.line, self.column);
            let rest = &source[start..];

            if rest.starts_with('`') {
                self.lex_template(start, line, column);
                continue;
            }

            if rest.starts_with('/') && self.regex_allowed() {
                if let Some(len) = scan_regex(rest) {
                    let raw = source[start..start + len].to_string();
                    self.push(Token::Regex(raw), start, start + len, line, column);
                    continue;
                }
            }

            let first = rest.chars().next().unwrap_or('\0');
            if !first.is_ascii() && first.is_xid_start() {
                let end = self.identifier_end(start + first.len_utf8());
                let name = source[start..end].to_string();
                self.push(Token::Identifier(name), start, end, line, column);
                continue;
            }

            let mut logos_lexer = LogosToken::lexer(rest);
            match logos_lexer.next() {
                Some(Ok(logos_token)) => {
                    let range = logos_lexer.span();
                    let mut end = start + range.end;
                    let token = match logos_token {
                        LogosToken::Identifier(_) => {
                            // ASCII prefix of an identifier, such as `na` in `naïve`
                            end = self.identifier_end(end);
                            Token::Identifier(source[start + range.start..end].to_string())
                        }
                        other => convert_token(other),
                    };
                    self.push(token, start + range.start, end, line, column);
                }
                Some(Err(())) => {
                    let range = logos_lexer.span();
                    let end = (start + range.end).max(start + first.len_utf8());
                    let span = Span::new(start, end, line, column);
                    self.errors.push(LexError::UnexpectedCharacter { char: first, span });
                    self.push(Token::Error(source[start..end].to_string()), start, end, line, column);
                }
                None => break,
            }
        }

        let eof_span = Span::new(self.source.len(), self.source.len(), self.line, self.column);
        self.tokens.push((Token::Eof, eof_span));
        (self.tokens, self.errors)
    }

    /// Skip whitespace and comments. Returns false once the source is exhausted.
    fn skip_trivia(&mut self) -> bool {
        let source = self.source;
        loop {
            let rest = &source[self.pos..];
            let Some(ch) = rest.chars().next() else {
                return false;
            };

            if ch.is_whitespace() || ch == '\u{feff}' {
                self.bump(ch.len_utf8());
            } else if rest.starts_with("//") {
                let len = rest.find('\n').unwrap_or(rest.len());
                self.bump(len);
            } else if rest.starts_with("/*") {
                match rest[2..].find("*/") {
                    Some(end) => self.bump(end + 4),
                    None => {
                        let span = Span::new(self.pos, source.len(), self.line, self.column);
                        self.errors.push(LexError::UnterminatedComment { span });
                        self.bump(rest.len());
                    }
                }
            } else {
                return true;
            }
        }
    }

    fn lex_template(&mut self, start: usize, line: u32, column: u32) {
        let source = self.source;
        match scan_template(source, start + 1) {
            Some(end) => {
                let raw = source[start + 1..end - 1].to_string();
                self.push(Token::Template(raw), start, end, line, column);
            }
            None => {
                let end = source.len();
                let span = Span::new(start, end, line, column);
                self.errors.push(LexError::UnterminatedTemplate { span });
                self.push(Token::Error(source[start..end].to_string()), start, end, line, column);
            }
        }
    }

    /// Whether a `/` at this point starts a regex literal rather than a division.
    ///
    /// Decided by the previous token: a value (name, literal, closing paren or
    /// bracket) is followed by division, anything else by an expression.
    fn regex_allowed(&self) -> bool {
        let Some((previous, _)) = self.tokens.last() else {
            return true;
        };
        match previous {
            Token::Identifier(name) => matches!(
                name.as_str(),
                "return" | "typeof" | "instanceof" | "in" | "of" | "new" | "delete" | "void"
                    | "throw" | "case" | "do" | "else" | "yield" | "await"
            ),
            Token::Operator(op) => !matches!(op.as_str(), "++" | "--"),
            Token::Function
            | Token::Async
            | Token::PrivateName(_)
            | Token::Number(_)
            | Token::String(_)
            | Token::Template(_)
            | Token::Regex(_)
            | Token::RightParen
            | Token::RightBracket
            | Token::Error(_)
            | Token::Eof => false,
            _ => true,
        }
    }

    /// Extend an identifier over any trailing Unicode identifier characters.
    fn identifier_end(&self, mut end: usize) -> usize {
        for ch in self.source[end..].chars() {
            if ch.is_xid_continue() || ch == '$' || ch == '\u{200c}' || ch == '\u{200d}' {
                end += ch.len_utf8();
            } else {
                break;
            }
        }
        end
    }

    fn push(&mut self, token: Token, start: usize, end: usize, line: u32, column: u32) {
        self.tokens.push((token, Span::new(start, end, line, column)));
        self.bump(end - self.pos);
    }

    /// Advance `len` bytes, keeping line and column up to date.
    fn bump(&mut self, len: usize) {
        let source = self.source;
        let end = self.pos + len;
        for c in source[self.pos..end].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos = end;
    }
}

fn convert_token(logos_token: LogosToken) -> Token {
    match logos_token {
        LogosToken::Function => Token::Function,
        LogosToken::Async => Token::Async,
        LogosToken::Identifier(s) => Token::Identifier(s),
        LogosToken::PrivateName(s) => Token::PrivateName(s),
        LogosToken::Number(s) => Token::Number(s),
        LogosToken::String(s) => Token::String(s),
        LogosToken::LeftParen => Token::LeftParen,
        LogosToken::RightParen => Token::RightParen,
        LogosToken::LeftBrace => Token::LeftBrace,
        LogosToken::RightBrace => Token::RightBrace,
        LogosToken::LeftBracket => Token::LeftBracket,
        LogosToken::RightBracket => Token::RightBracket,
        LogosToken::Comma => Token::Comma,
        LogosToken::Semicolon => Token::Semicolon,
        LogosToken::Colon => Token::Colon,
        LogosToken::Question => Token::Question,
        LogosToken::Dot => Token::Dot,
        LogosToken::DotDotDot => Token::DotDotDot,
        LogosToken::Equal => Token::Equal,
        LogosToken::Arrow => Token::Arrow,
        LogosToken::Star => Token::Star,
        LogosToken::Operator(op) => Token::Operator(op),
    }
}

/// Find the end of a template literal whose content starts at `pos`.
///
/// Returns the byte offset right after the closing backtick, walking nested
/// `${ ... }` substitutions (which may hold templates of their own).
fn scan_template(source: &str, mut pos: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'`' => return Some(pos + 1),
            b'$' if bytes.get(pos + 1) == Some(&b'{') => {
                pos = scan_substitution(source, pos + 2)?;
            }
            _ => pos += 1,
        }
    }
    None
}

/// Length of the regex literal at the start of `rest`, flags included.
///
/// A `/` inside a character class does not end the literal. Returns `None`
/// when the line or input ends first, in which case the `/` is an operator.
fn scan_regex(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut pos = 1;
    let mut in_class = false;
    loop {
        match *bytes.get(pos)? {
            b'\\' => {
                if matches!(bytes.get(pos + 1), None | Some(b'\n') | Some(b'\r')) {
                    return None;
                }
                pos += 2;
                continue;
            }
            b'\n' | b'\r' => return None,
            b'[' => in_class = true,
            b']' => in_class = false,
            b'/' if !in_class => break,
            _ => {}
        }
        pos += 1;
    }
    pos += 1;
    while bytes.get(pos).is_some_and(|b| b.is_ascii_alphanumeric()) {
        pos += 1;
    }
    Some(pos)
}

fn scan_substitution(source: &str, mut pos: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut depth = 1usize;
    while pos < bytes.len() {
        match bytes[pos] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(pos + 1);
                }
            }
            b'`' => {
                pos = scan_template(source, pos + 1)?;
                continue;
            }
            quote @ (b'"' | b'\'') => {
                pos += 1;
                while pos < bytes.len() && bytes[pos] != quote {
                    pos += if bytes[pos] == b'\\' { 2 } else { 1 };
                }
            }
            _ => {}
        }
        pos += 1;
    }
    None
}
