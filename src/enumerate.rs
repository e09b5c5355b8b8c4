//! Asset enumerator: walk an asset root and emit an enumeration header
//! (`gen_kgtAssets.h`) naming every discovered file.
//!
//! Independent of the rewriter – the two tools only share the convention of
//! emitting a header of asset names and indices. An optional `assets.ignore`
//! file at the root holds one regex per line, matched against each asset's
//! path relative to the root; matching files are left out.

use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::model::{ASSET_IGNORE_FILE_NAME, GEN_ENUM_HEADER_FILE_NAME};
use crate::writer::enumeration;

pub fn run(asset_dir: &Path, out_dir: &Path, verbose: bool) -> Result<()> {
    let ignore_file = asset_dir.join(ASSET_IGNORE_FILE_NAME);
    let ignore_list = load_ignore_patterns(&ignore_file, verbose)?;

    let mut asset_file_names = Vec::new();
    for entry in WalkDir::new(asset_dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                eprintln!("Failed to walk {}: {e}", asset_dir.display());
                continue;
            }
        };
        if !entry.file_type().is_file() || entry.path() == ignore_file {
            continue;
        }
        let rel = match entry.path().strip_prefix(asset_dir) {
            Ok(rel) => rel.display().to_string(),
            Err(_) => continue,
        };
        if ignore_list.iter().any(|re| re.is_match(&rel)) {
            if verbose {
                println!("Ignoring asset '{rel}'...");
            }
            continue;
        }
        if verbose {
            println!("Adding asset '{rel}'...");
        }
        asset_file_names.push(rel);
    }

    fs::create_dir_all(out_dir).with_context(|| format!("Creating {}", out_dir.display()))?;
    let out_path = out_dir.join(GEN_ENUM_HEADER_FILE_NAME);
    fs::write(&out_path, enumeration::render(&asset_file_names))
        .with_context(|| format!("Writing {}", out_path.display()))?;
    Ok(())
}

/// One full-match regex per non-empty line of the ignore file; an absent
/// file simply means nothing is ignored.
fn load_ignore_patterns(ignore_file: &Path, verbose: bool) -> Result<Vec<Regex>> {
    let text = match fs::read_to_string(ignore_file) {
        Ok(text) => text,
        Err(_) => return Ok(Vec::new()),
    };
    let mut list = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if verbose {
            println!("Adding ignore line '{line}'...");
        }
        let re = Regex::new(&format!("^(?:{line})$"))
            .with_context(|| format!("Bad pattern '{line}' in {}", ignore_file.display()))?;
        list.push(re);
    }
    Ok(list)
}
