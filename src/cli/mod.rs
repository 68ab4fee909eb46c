//! CLI commands

mod dis;
mod main;
mod run;

pub use dis::dis;
pub use main::main;
pub use run::run;
