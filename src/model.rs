//! Shared data types for the rewriter and the enumerator.

/// File name of the header the rewriter generates at the root of the
/// rebuilt code tree. `INCLUDE_KASSET()` expands to an include of it.
pub const GEN_ASSET_HEADER_FILE_NAME: &str = "gen_kassets.h";

/// File name of the header the asset enumerator emits.
pub const GEN_ENUM_HEADER_FILE_NAME: &str = "gen_kgtAssets.h";

/// File name of the optional ignore-pattern list at the asset root.
pub const ASSET_IGNORE_FILE_NAME: &str = "assets.ignore";

/// Lexical classification of a source span. Closed set – the lexer never
/// produces anything outside it, and malformed input degrades to `Unknown`
/// rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    ParenOpen,
    ParenClose,
    Colon,
    Semicolon,
    Asterisk,
    BracketOpen,
    BracketClose,
    BraceOpen,
    BraceClose,
    Hash,
    Whitespace,
    Comment,
    String,
    Character,
    Identifier,
    EndOfStream,
    Unknown,
}

/// One token – a borrowed view into the file's source buffer.
///
/// For `String` and `Character` the span *excludes* the delimiters but keeps
/// escape pairs verbatim (`\"` stays two bytes); the expander re-wraps them
/// when copying to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str) -> Self {
        Self { kind, text }
    }
}

/// Asset classification derived purely from the filename suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Png,
    Wav,
    Ogg,
    FlipbookMeta,
    Unknown,
}

impl FileType {
    /// Suffix match over the known extensions.
    pub fn classify(name: &str) -> Self {
        if name.ends_with(".png") {
            FileType::Png
        } else if name.ends_with(".wav") {
            FileType::Wav
        } else if name.ends_with(".ogg") {
            FileType::Ogg
        } else if name.ends_with(".fbm") {
            FileType::FlipbookMeta
        } else {
            FileType::Unknown
        }
    }

    /// Spelling of the corresponding `KAssetFileType` enumerator in the
    /// generated header.
    pub fn c_name(self) -> &'static str {
        match self {
            FileType::Png => "PNG",
            FileType::Wav => "WAV",
            FileType::Ogg => "OGG",
            FileType::FlipbookMeta => "FLIPBOOK_META",
            FileType::Unknown => "UNKNOWN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FileType;

    #[test]
    fn classify_known_suffixes() {
        assert_eq!(FileType::classify("foo.png"), FileType::Png);
        assert_eq!(FileType::classify("foo.wav"), FileType::Wav);
        assert_eq!(FileType::classify("foo.ogg"), FileType::Ogg);
        assert_eq!(FileType::classify("foo.fbm"), FileType::FlipbookMeta);
        assert_eq!(FileType::classify("foo.xyz"), FileType::Unknown);
    }

    #[test]
    fn classify_needs_the_dot() {
        assert_eq!(FileType::classify("sprites/png"), FileType::Unknown);
        assert_eq!(FileType::classify("a.png.bak"), FileType::Unknown);
    }
}
