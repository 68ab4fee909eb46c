#[macro_use]
extern crate clap;

#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate serde_plain;

mod arch;
mod cli;
mod error;
mod memory;
mod project;

use std::io;
use tracing_subscriber::EnvFilter;

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ls8=warn")),
        )
        .with_writer(io::stderr)
        .init();

    cli::main()
}
