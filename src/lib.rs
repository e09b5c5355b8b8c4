pub mod cli;
pub mod enumerate;
pub mod model;
pub mod pipeline;
pub mod processor;
pub mod writer;

use clap::Parser;

pub fn run() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    match args.command {
        cli::Command::Rewrite { tree, verbose } => {
            pipeline::Pipeline::new(&tree, verbose)?.run()
        }
        cli::Command::Enumerate {
            asset_dir,
            out_dir,
            verbose,
        } => enumerate::run(&asset_dir, &out_dir, verbose),
    }
}
