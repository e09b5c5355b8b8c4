//! Emit `gen_kgtAssets.h` – the enumeration header produced by the asset
//! enumerator: one sanitized identifier per discovered file, a parallel
//! array of the original relative paths, and a total-count constant.

/// Render the enumeration header for the given relative asset paths, in
/// discovery order.
pub fn render(asset_file_names: &[String]) -> String {
    let mut h = String::new();
    h.push_str("#pragma once\n");

    h.push_str("enum class KgtAssetIndex : unsigned\n");
    for (idx, name) in asset_file_names.iter().enumerate() {
        h.push_str(if idx == 0 { "\t{ " } else { "\t, " });
        h.push_str(&sanitize_identifier(name));
        h.push_str(&format!(" = {idx}\n"));
    }
    if asset_file_names.is_empty() {
        h.push_str("\t{ ENUM_SIZE\n");
    } else {
        h.push_str("\t, ENUM_SIZE\n");
    }
    h.push_str("};\n");

    h.push_str("static const unsigned KGT_ASSET_COUNT = \n");
    h.push_str("\tstatic_cast<unsigned>(KgtAssetIndex::ENUM_SIZE);\n");

    h.push_str("static const char* kgtAssetFileNames[] = \n");
    for (idx, name) in asset_file_names.iter().enumerate() {
        h.push_str(if idx == 0 { "\t{ \"" } else { "\t, \"" });
        // path separators are normalized so the game code only ever sees '/'
        h.push_str(&name.replace('\\', "/"));
        h.push_str("\"\n");
    }
    if asset_file_names.is_empty() {
        h.push_str("{\"NO_KASSETS_FOUND\"};\n");
        h.push_str("#define KGT_ASSET_NONE_FOUND\n");
    } else {
        h.push_str("};\n");
    }
    h
}

/// Replace every non-alphanumeric character with `_` so the relative path
/// becomes a legal C++ enumerator.
fn sanitize_identifier(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
