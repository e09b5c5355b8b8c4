//! Ordered, deduplicating store of asset names referenced by `KASSET(...)`.
//!
//! Insertion order is load-bearing: the index handed out by [`AssetTable::intern`]
//! is baked into already-rewritten source text, so the table is append-only and
//! its final ordering must match what the expander saw. One table lives for the
//! whole run and is threaded by `&mut` through the pipeline into the expander.

use crate::model::FileType;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct AssetTable {
    names: Vec<String>,
    types: Vec<FileType>,
    index: HashMap<String, usize>,
    finalized: bool,
}

impl AssetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `name`, inserting it at the next free slot on first sight.
    pub fn intern(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), idx);
        idx
    }

    /// Classify every entry and append the `.png` sibling of every `.fbm`
    /// entry that is not already present. A flipbook's metadata implies the
    /// image sheet of the same stem, so the table must carry it even when no
    /// source file names it directly. Must run exactly once, after all files
    /// have been expanded.
    pub fn finalize(&mut self) {
        assert!(!self.finalized, "asset table finalized twice");
        self.finalized = true;

        // Appending while iterating: implied siblings land after all explicit
        // entries and are themselves classified by the same loop.
        let mut i = 0;
        while i < self.names.len() {
            let ty = FileType::classify(&self.names[i]);
            self.types.push(ty);
            if ty == FileType::FlipbookMeta {
                if let Some(stem) = self.names[i].strip_suffix(".fbm") {
                    let sibling = format!("{stem}.png");
                    if !self.index.contains_key(&sibling) {
                        let idx = self.names.len();
                        self.names.push(sibling.clone());
                        self.index.insert(sibling, idx);
                    }
                }
            }
            i += 1;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Entries in index order. Only meaningful after [`finalize`](Self::finalize).
    pub fn entries(&self) -> impl Iterator<Item = (&str, FileType)> {
        debug_assert!(self.finalized || self.names.is_empty());
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.types.iter().copied())
    }
}
