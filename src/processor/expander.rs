//! Macro expansion engine.
//!
//! Consumes one file's token stream and rebuilds its text, copying every
//! token verbatim except for the fixed vocabulary of `KASSET*` directives,
//! which are rewritten into plain C++ that indexes the generated asset
//! table. Asset names mentioned by `KASSET("...")` are interned into the
//! run-wide [`AssetTable`] as a side effect.
//!
//! Malformed directives never abort the run: the failure is reported on
//! stderr and expansion carries on with whatever tokens remain.

use super::assets::AssetTable;
use super::lexer::Tokenizer;
use crate::model::{Token, TokenKind};

/// Rewrite one file's source text. `table` accumulates asset references
/// across every file of the run.
pub fn expand(src: &str, table: &mut AssetTable) -> String {
    let expander = Expander {
        lex: Tokenizer::new(src),
        out: String::with_capacity(src.len()),
        table,
    };
    expander.run()
}

struct Expander<'a, 't> {
    lex: Tokenizer<'a>,
    out: String,
    table: &'t mut AssetTable,
}

impl<'a> Expander<'a, '_> {
    fn run(mut self) -> String {
        loop {
            let tok = self.lex.next();
            match tok.kind {
                TokenKind::EndOfStream => break,
                TokenKind::Hash => self.copy_hash_line(tok),
                TokenKind::Identifier => match tok.text {
                    "INCLUDE_KASSET" => self.expand_include(),
                    "KASSET" => self.expand_asset(),
                    "KASSET_SEARCH" => {
                        self.expand_ident_arg("KASSET_SEARCH", |id| {
                            format!("findKAssetCStr({id})")
                        });
                    }
                    "KASSET_CSTR" => {
                        self.expand_ident_arg("KASSET_CSTR", |id| format!("g_kassets[{id}]"));
                    }
                    "KASSET_INDEX" => {
                        self.expand_ident_arg("KASSET_INDEX", |id| {
                            format!("static_cast<u32>({id} - g_kassets)")
                        });
                    }
                    "KASSET_TYPE" => {
                        self.expand_ident_arg("KASSET_TYPE", |id| {
                            format!("g_kassetFileTypes[({id} - g_kassets)]")
                        });
                    }
                    "KASSET_COUNT" => {
                        self.expand_literal("KASSET_COUNT", "(sizeof(g_kassets)/sizeof(g_kassets[0]))");
                    }
                    "KASSET_TYPE_PNG" => {
                        self.expand_literal("KASSET_TYPE_PNG", "KAssetFileType::PNG");
                    }
                    "KASSET_TYPE_WAV" => {
                        self.expand_literal("KASSET_TYPE_WAV", "KAssetFileType::WAV");
                    }
                    "KASSET_TYPE_OGG" => {
                        self.expand_literal("KASSET_TYPE_OGG", "KAssetFileType::OGG");
                    }
                    "KASSET_TYPE_FLIPBOOK_META" => {
                        self.expand_literal(
                            "KASSET_TYPE_FLIPBOOK_META",
                            "KAssetFileType::FLIPBOOK_META",
                        );
                    }
                    "KASSET_TYPE_UNKNOWN" => {
                        self.expand_literal("KASSET_TYPE_UNKNOWN", "KAssetFileType::UNKNOWN");
                    }
                    _ => self.out.push_str(tok.text),
                },
                _ => self.copy_token(tok),
            }
        }
        self.out
    }

    /// Copy a token back out. String and character spans exclude their
    /// delimiters, so those get re-wrapped.
    fn copy_token(&mut self, tok: Token<'a>) {
        match tok.kind {
            TokenKind::String => {
                self.out.push('"');
                self.out.push_str(tok.text);
                self.out.push('"');
            }
            TokenKind::Character => {
                self.out.push('\'');
                self.out.push_str(tok.text);
                self.out.push('\'');
            }
            _ => self.out.push_str(tok.text),
        }
    }

    /// `#` followed by `define` suppresses directive recognition for the
    /// rest of the logical line, so a textual macro that *mentions* a
    /// directive name is not substituted inside its own definition.
    fn copy_hash_line(&mut self, hash: Token<'a>) {
        let next = self.lex.next();
        self.copy_token(hash);
        self.copy_token(next);
        if next.kind == TokenKind::Identifier && next.text == "define" {
            let body = self.lex.take_logical_line();
            self.out.push_str(body);
        }
    }

    /// Pull tokens until one of kind `wanted` appears, silently discarding
    /// everything else; gives up (returning the `EndOfStream` token) when
    /// the buffer runs out first.
    fn require(&mut self, wanted: TokenKind) -> Token<'a> {
        loop {
            let tok = self.lex.next();
            if tok.kind == wanted || tok.kind == TokenKind::EndOfStream {
                return tok;
            }
        }
    }

    fn require_or_report(&mut self, wanted: TokenKind, directive: &str) -> Option<Token<'a>> {
        let tok = self.require(wanted);
        if tok.kind != wanted {
            eprintln!("{directive}: expected {wanted:?} before end of input, expansion abandoned");
            return None;
        }
        Some(tok)
    }

    fn expand_include(&mut self) {
        if self
            .require_or_report(TokenKind::ParenOpen, "INCLUDE_KASSET")
            .is_none()
        {
            return;
        }
        self.out.push_str("#include \"gen_kassets.h\"");
        self.require_or_report(TokenKind::ParenClose, "INCLUDE_KASSET");
    }

    fn expand_asset(&mut self) {
        if self.require_or_report(TokenKind::ParenOpen, "KASSET").is_none() {
            return;
        }
        let Some(name) = self.require_or_report(TokenKind::String, "KASSET") else {
            return;
        };
        let idx = self.table.intern(name.text);
        self.out.push_str(&format!("&g_kassets[{idx}]"));
        self.require_or_report(TokenKind::ParenClose, "KASSET");
    }

    fn expand_ident_arg(&mut self, directive: &str, render: impl Fn(&str) -> String) {
        if self
            .require_or_report(TokenKind::ParenOpen, directive)
            .is_none()
        {
            return;
        }
        let Some(arg) = self.require_or_report(TokenKind::Identifier, directive) else {
            return;
        };
        self.out.push_str(&render(arg.text));
        self.require_or_report(TokenKind::ParenClose, directive);
    }

    /// Zero-argument directive: still consumes its `()` so the substitution
    /// is not followed by a stray call operator.
    fn expand_literal(&mut self, directive: &str, replacement: &str) {
        if self
            .require_or_report(TokenKind::ParenOpen, directive)
            .is_none()
        {
            return;
        }
        self.out.push_str(replacement);
        self.require_or_report(TokenKind::ParenClose, directive);
    }
}
