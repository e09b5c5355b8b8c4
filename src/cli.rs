use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rewrite KASSET* directives across a C++ source tree in place
    Rewrite {
        /// Root of the source tree to transform
        tree: PathBuf,
        /// Print every visited file
        #[arg(long)]
        verbose: bool,
    },
    /// Enumerate asset files and emit the enumeration header
    Enumerate {
        /// Asset root directory (may contain an assets.ignore file)
        asset_dir: PathBuf,
        /// Directory that receives gen_kgtAssets.h
        out_dir: PathBuf,
        /// Print every discovered / ignored asset
        #[arg(long)]
        verbose: bool,
    },
}
