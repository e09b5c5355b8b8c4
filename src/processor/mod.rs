//! The functional core: tokenize a file, expand its asset directives.

pub mod assets;
pub mod expander;
pub mod lexer;

pub use assets::AssetTable;

/// Rewrite one file's text, accumulating asset references into `table`.
pub fn rewrite(src: &str, table: &mut AssetTable) -> String {
    expander::expand(src, table)
}
