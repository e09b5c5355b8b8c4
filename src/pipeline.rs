//! Whole-tree transform: back the input tree up, rebuild every file through
//! the expander, then drop the generated asset header at the new root.
//!
//! The run is a one-way state machine – there is no rollback. Each
//! transition is recorded in a small sibling marker file so an interrupted
//! run is detected (and refused) instead of silently re-transforming a
//! half-rebuilt tree:
//!
//! ```text
//! Init -> BackedUp -> Rebuilding -> Finalizing -> Done
//! ```
//!
//! Only the initial rename is fatal; every per-file failure is reported to
//! stderr and the walk carries on.

use anyhow::{Context, Result, bail};
use std::fs::{self, FileTimes, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

use crate::model::GEN_ASSET_HEADER_FILE_NAME;
use crate::processor::{self, AssetTable};
use crate::writer::header;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    BackedUp,
    Rebuilding,
    Finalizing,
}

impl Stage {
    fn as_str(self) -> &'static str {
        match self {
            Stage::BackedUp => "backed-up",
            Stage::Rebuilding => "rebuilding",
            Stage::Finalizing => "finalizing",
        }
    }
}

pub struct Pipeline {
    /// Root being rebuilt (the original input path).
    tree: PathBuf,
    /// Renamed-aside original subtree; read during rebuilding, never written.
    backup: PathBuf,
    /// Durable record of the current stage, removed on success.
    marker: PathBuf,
    table: AssetTable,
    verbose: bool,
}

impl Pipeline {
    pub fn new(tree: &Path, verbose: bool) -> Result<Self> {
        let name = tree
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("{} is not a usable tree root", tree.display()))?;
        let parent = tree.parent().unwrap_or_else(|| Path::new(""));
        Ok(Self {
            tree: tree.to_path_buf(),
            backup: parent.join(format!("{name}_backup")),
            marker: parent.join(format!("{name}_backup.state")),
            table: AssetTable::new(),
            verbose,
        })
    }

    /// Run every phase. Fatal errors only come out of setup; once the tree
    /// is renamed aside the run always reaches `Done`.
    pub fn run(mut self) -> Result<()> {
        let started = Instant::now();

        self.back_up()?;
        self.rebuild();
        self.finalize();

        // Done – the marker is no longer needed.
        if let Err(e) = fs::remove_file(&self.marker) {
            eprintln!("Failed to remove {}: {e}", self.marker.display());
        }
        println!(
            "kcpp complete! Seconds elapsed={}",
            started.elapsed().as_secs_f32()
        );
        Ok(())
    }

    fn enter(&self, stage: Stage) {
        if let Err(e) = fs::write(&self.marker, stage.as_str()) {
            eprintln!("Failed to record stage in {}: {e}", self.marker.display());
        }
    }

    /// Init -> BackedUp. Renames the input tree to its sibling backup path.
    /// Nothing has been mutated yet, so any failure here aborts the run.
    fn back_up(&self) -> Result<()> {
        if self.marker.exists() {
            let stage = fs::read_to_string(&self.marker).unwrap_or_default();
            bail!(
                "a previous run was interrupted during '{}'; inspect {} and {} before re-running",
                stage.trim(),
                self.tree.display(),
                self.backup.display()
            );
        }
        fs::rename(&self.tree, &self.backup).with_context(|| {
            format!(
                "Renaming {} to {}",
                self.tree.display(),
                self.backup.display()
            )
        })?;
        self.enter(Stage::BackedUp);
        Ok(())
    }

    /// BackedUp -> Rebuilding. Walks the backup and recreates every file
    /// under the original root with directives expanded. The walk is sorted
    /// so asset indices don't depend on readdir order.
    fn rebuild(&mut self) {
        self.enter(Stage::Rebuilding);
        for entry in WalkDir::new(&self.backup).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    eprintln!("Failed to walk backup tree: {e}");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                // directories reappear implicitly when files are written
                continue;
            }
            if self.verbose {
                println!("'{}'", entry.path().display());
            }
            if let Err(e) = self.rebuild_file(entry.path()) {
                eprintln!("Failed to process {}: {e:#}", entry.path().display());
            }
        }
    }

    fn rebuild_file(&mut self, src: &Path) -> Result<()> {
        let rel = src
            .strip_prefix(&self.backup)
            .with_context(|| format!("{} is outside the backup root", src.display()))?;
        let dest = self.tree.join(rel);
        if let Some(dir) = dest.parent() {
            fs::create_dir_all(dir).with_context(|| format!("Creating {}", dir.display()))?;
        }

        let raw = fs::read(src).with_context(|| "reading")?;
        match String::from_utf8(raw) {
            Ok(text) => {
                let rewritten = processor::rewrite(&text, &mut self.table);
                fs::write(&dest, rewritten).with_context(|| "writing")?;
            }
            Err(e) => {
                // not text – carried over untouched
                fs::write(&dest, e.into_bytes()).with_context(|| "writing")?;
            }
        }

        if let Err(e) = clone_timestamps(src, &dest) {
            eprintln!("Failed to copy timestamps onto {}: {e}", dest.display());
        }
        Ok(())
    }

    /// Rebuilding -> Finalizing. Renders the accumulated asset table into
    /// the generated header at the rebuilt root; nothing is written when no
    /// directive ever referenced an asset.
    fn finalize(&mut self) {
        self.enter(Stage::Finalizing);
        if self.table.is_empty() {
            return;
        }
        self.table.finalize();
        let out = self.tree.join(GEN_ASSET_HEADER_FILE_NAME);
        if let Err(e) = fs::write(&out, header::render(&self.table)) {
            eprintln!("Failed to write {}: {e}", out.display());
            return;
        }
        if let Err(e) = set_read_only(&out) {
            eprintln!("Failed to set {} read-only: {e}", out.display());
        }
    }
}

/// Copy access and modification times from `src` onto `dest` so build
/// tooling sees accurate staleness information for the rewritten files.
fn clone_timestamps(src: &Path, dest: &Path) -> std::io::Result<()> {
    let meta = fs::metadata(src)?;
    let times = FileTimes::new()
        .set_accessed(meta.accessed()?)
        .set_modified(meta.modified()?);
    OpenOptions::new().write(true).open(dest)?.set_times(times)
}

/// Discourage hand-edits of the generated header. Advisory only.
fn set_read_only(path: &Path) -> std::io::Result<()> {
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_readonly(true);
    fs::set_permissions(path, perms)
}
