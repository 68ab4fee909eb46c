//! Configuration file structures

mod machine;

pub use machine::MachineConfig;
