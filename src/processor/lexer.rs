//! Hand-written tokenizer for C-family source text.
//!
//! This is *not* a C++ lexer – it only splits a file into the handful of
//! token classes the macro expander cares about. Everything the expander
//! does not recognise is copied back out verbatim, so fidelity of the spans
//! matters much more than fidelity of the classification.
//
//  Lexical items:
//
//      Whitespace ::= [ \t\r\n]+              (one token per run)
//      Comment    ::= '//' .* EOL  |  '/*' .*? '*/'   (non-nesting)
//      String     ::= '"' (\\. | [^"])* '"'   (span excludes the quotes)
//      Character  ::= '\'' (\\. | [^'])* '\''
//      Identifier ::= [A-Za-z_][A-Za-z0-9_]*
//      Punctuation::= ( ) : ; * [ ] { } #     (one token each)
//
//  A '/' that does not start a comment, digits, and any other byte come out
//  as `Unknown` single-character tokens. Unterminated strings, characters
//  and block comments consume to the end of the buffer. The tokenizer never
//  fails; end of input is a sticky `EndOfStream` token.

use crate::model::{Token, TokenKind};

pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
}

fn is_end_of_line(b: u8) -> bool {
    b == b'\r' || b == b'\n'
}

fn is_whitespace(b: u8) -> bool {
    b == b' ' || b == b'\t' || is_end_of_line(b)
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

impl<'a> Tokenizer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// Byte at `pos + ahead`, or 0 past the end of the buffer.
    fn peek(&self, ahead: usize) -> u8 {
        *self.src.as_bytes().get(self.pos + ahead).unwrap_or(&0)
    }

    /// Next token, advancing the cursor past it. At the end of the buffer
    /// this keeps returning `EndOfStream`.
    pub fn next(&mut self) -> Token<'a> {
        if self.pos >= self.src.len() {
            return Token::new(TokenKind::EndOfStream, "");
        }
        let b = self.peek(0);
        if is_whitespace(b) {
            return self.lex_whitespace();
        }
        match b {
            b'(' => self.single(TokenKind::ParenOpen),
            b')' => self.single(TokenKind::ParenClose),
            b':' => self.single(TokenKind::Colon),
            b';' => self.single(TokenKind::Semicolon),
            b'*' => self.single(TokenKind::Asterisk),
            b'[' => self.single(TokenKind::BracketOpen),
            b']' => self.single(TokenKind::BracketClose),
            b'{' => self.single(TokenKind::BraceOpen),
            b'}' => self.single(TokenKind::BraceClose),
            b'#' => self.single(TokenKind::Hash),
            b'/' if self.peek(1) == b'/' || self.peek(1) == b'*' => self.lex_comment(),
            b'"' => self.lex_quoted(b'"', TokenKind::String),
            b'\'' => self.lex_quoted(b'\'', TokenKind::Character),
            _ if is_ident_start(b) => self.lex_identifier(),
            _ => {
                // lone '/', digits, operators we don't model, …
                let ch_len = self.src[self.pos..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                let start = self.pos;
                self.pos += ch_len;
                Token::new(TokenKind::Unknown, &self.src[start..self.pos])
            }
        }
    }

    fn single(&mut self, kind: TokenKind) -> Token<'a> {
        let start = self.pos;
        self.pos += 1;
        Token::new(kind, &self.src[start..self.pos])
    }

    fn lex_whitespace(&mut self) -> Token<'a> {
        let start = self.pos;
        while is_whitespace(self.peek(0)) && self.pos < self.src.len() {
            self.pos += 1;
        }
        Token::new(TokenKind::Whitespace, &self.src[start..self.pos])
    }

    fn lex_comment(&mut self) -> Token<'a> {
        let start = self.pos;
        if self.peek(1) == b'/' {
            self.pos += 2;
            while self.pos < self.src.len() && !is_end_of_line(self.peek(0)) {
                self.pos += 1;
            }
        } else {
            self.pos += 2;
            while self.pos < self.src.len()
                && !(self.peek(0) == b'*' && self.peek(1) == b'/')
            {
                self.pos += 1;
            }
            if self.peek(0) == b'*' {
                self.pos += 2;
            }
        }
        Token::new(TokenKind::Comment, &self.src[start..self.pos])
    }

    /// String or character literal. A backslash and the byte after it are
    /// consumed as a pair, never interpreted; the returned span covers the
    /// interior only. A missing closing delimiter consumes the rest of the
    /// buffer.
    fn lex_quoted(&mut self, delim: u8, kind: TokenKind) -> Token<'a> {
        self.pos += 1;
        let start = self.pos;
        while self.pos < self.src.len() && self.peek(0) != delim {
            if self.peek(0) == b'\\' && self.pos + 1 < self.src.len() {
                self.pos += 1;
            }
            self.pos += 1;
        }
        let text = &self.src[start..self.pos];
        if self.peek(0) == delim {
            self.pos += 1;
        }
        Token::new(kind, text)
    }

    fn lex_identifier(&mut self) -> Token<'a> {
        let start = self.pos;
        self.pos += 1;
        while is_ident_continue(self.peek(0)) && self.pos < self.src.len() {
            self.pos += 1;
        }
        Token::new(TokenKind::Identifier, &self.src[start..self.pos])
    }

    /// Consume up to (not including) the next end-of-line, treating a
    /// backslash directly before the line break as a continuation: the
    /// backslash and the whole newline run are consumed and the scan goes
    /// on. Used to copy `#define` bodies out verbatim.
    pub fn take_logical_line(&mut self) -> &'a str {
        let start = self.pos;
        while self.pos < self.src.len() {
            let b = self.peek(0);
            if b == b'\\' && is_end_of_line(self.peek(1)) {
                self.pos += 1;
                while self.pos < self.src.len() && is_end_of_line(self.peek(0)) {
                    self.pos += 1;
                }
            } else if is_end_of_line(b) {
                break;
            } else {
                self.pos += 1;
            }
        }
        &self.src[start..self.pos]
    }
}
