//! CLI support for non-command bits

use crate::{cli, project};
use clap::Arg;
use std::io;

pub fn main() -> io::Result<()> {
    let mut app = app_from_crate!();
    app = app.arg(
        Arg::with_name("image")
            .value_name("program.ls8")
            .index(1)
            .required(true)
            .help("The program image to run"),
    );
    app = app.arg(
        Arg::with_name("dis")
            .long("dis")
            .help("List the program's instructions instead of running it"),
    );
    app = project::MachineConfig::configure_app(app);

    let matches = app.get_matches();

    let config = project::MachineConfig::from_arg_matches(&matches)?;
    let image = matches
        .value_of("image")
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Did not specify an image"))?;

    if matches.is_present("dis") {
        cli::dis(&config, image)
    } else {
        cli::run(&config, image)
    }
}
