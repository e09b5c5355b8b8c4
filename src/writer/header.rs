//! Emit `gen_kassets.h` – the asset-name table the rewritten code indexes.
//!
//! The shape of this header is a wire format: `&g_kassets[N]` expressions
//! already written into source files are only valid against exactly this
//! array ordering, and the rewritten code calls `findKAssetCStr` by name.

use crate::model::FileType;
use crate::processor::AssetTable;

/// Render the full header text for a finalized table.
pub fn render(table: &AssetTable) -> String {
    let mut h = String::new();
    h.push_str("#pragma once\n");

    // ---------------------------------------------------------------
    // 1. Name array (sentinel entry when no asset was ever referenced)
    // ---------------------------------------------------------------
    h.push_str("static const char* g_kassets[] = {\n");
    if table.is_empty() {
        h.push_str("\t\"NO_KASSETS_FOUND_IN_SOURCE!\"\n");
    }
    for (name, _) in table.entries() {
        h.push_str(&format!("\t\"{name}\",\n"));
    }
    h.push_str("};\n");

    // ---------------------------------------------------------------
    // 2. File-type enum + parallel array, aligned index-for-index
    // ---------------------------------------------------------------
    h.push_str("enum class KAssetFileType : unsigned char {\n");
    for ty in [
        FileType::Png,
        FileType::Wav,
        FileType::Ogg,
        FileType::FlipbookMeta,
        FileType::Unknown,
    ] {
        h.push_str(&format!("\t{},\n", ty.c_name()));
    }
    h.push_str("};\n");

    h.push_str("static const KAssetFileType g_kassetFileTypes[] = {\n");
    if table.is_empty() {
        h.push_str("\tKAssetFileType::UNKNOWN\n");
    }
    for (_, ty) in table.entries() {
        h.push_str(&format!("\tKAssetFileType::{},\n", ty.c_name()));
    }
    h.push_str("};\n");

    // ---------------------------------------------------------------
    // 3. Linear-scan lookup used by the KASSET_SEARCH expansion
    // ---------------------------------------------------------------
    h.push_str("static const char*const* findKAssetCStr(const char* str)\n");
    h.push_str("{\n");
    h.push_str(
        "\tfor(size_t a = 0; \n\t    a < (sizeof(g_kassets)/sizeof(g_kassets[0])); a++)\n",
    );
    h.push_str("\t{\n");
    h.push_str("\t\tif(strcmp(g_kassets[a], str) == 0)\n");
    h.push_str("\t\t{\n");
    h.push_str("\t\t\treturn &g_kassets[a];\n");
    h.push_str("\t\t}\n");
    h.push_str("\t}\n");
    h.push_str("\treturn nullptr;\n");
    h.push_str("}\n");
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_emits_sentinels() {
        let mut table = AssetTable::new();
        table.finalize();
        let h = render(&table);
        assert!(h.contains("\t\"NO_KASSETS_FOUND_IN_SOURCE!\"\n"));
        assert!(h.contains("\tKAssetFileType::UNKNOWN\n"));
        assert!(h.contains("findKAssetCStr"));
    }

    #[test]
    fn test_arrays_stay_parallel() {
        let mut table = AssetTable::new();
        table.intern("a.png");
        table.intern("b.wav");
        table.intern("c.fbm");
        table.finalize();
        let h = render(&table);

        let names_at = h.find("g_kassets[]").unwrap();
        let types_at = h.find("g_kassetFileTypes[]").unwrap();
        let names = &h[names_at..types_at];
        assert_eq!(
            names.matches("\t\"").count(),
            4,
            "c.fbm implies c.png, so four name rows"
        );

        let types = &h[types_at..];
        assert!(types.contains("KAssetFileType::PNG,\n\tKAssetFileType::WAV,\n\tKAssetFileType::FLIPBOOK_META,\n\tKAssetFileType::PNG,"));
    }
}
