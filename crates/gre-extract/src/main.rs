use std::path::PathBuf;

use clap::Parser;

use crate::prelude::*;

mod extract;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Reads the book's bookmark outline to locate each practice test, parses the \
answer key and explanation pages, and writes one lazy-loadable JSON record per test."
)]
pub struct App {
    /// Path to the Barron's 6 GRE Practice Tests PDF
    pub pdf: PathBuf,

    /// Directory for the per-test JSON files (created if absent)
    pub output_dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();
    extract::run(app)
}
