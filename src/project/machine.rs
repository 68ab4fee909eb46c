//! Machine configuration

use crate::arch::ls8::{Clock, Pacing, Value, DEFAULT_INTERVAL, STACK_POINTER_INIT};
use crate::error::{Error, Result};
use crate::memory::{Memory, DEFAULT_CAPACITY};
use clap::{App, Arg, ArgMatches};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Describes the machine a program is run on.
///
/// This is typically read from a JSON file such as `ls8.json`; every field is
/// optional and defaults to a stock LS-8 clocked at roughly 1KHz.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MachineConfig {
    #[serde(default = "default_memory_size")]
    memory_size: usize,

    #[serde(default = "default_stack_pointer")]
    stack_pointer: Value,

    #[serde(default)]
    pacing: Pacing,

    #[serde(default = "default_clock_interval")]
    clock_interval_ms: u64,

    #[serde(default)]
    cycle_limit: Option<u64>,
}

fn default_memory_size() -> usize {
    DEFAULT_CAPACITY
}

fn default_stack_pointer() -> Value {
    STACK_POINTER_INIT
}

fn default_clock_interval() -> u64 {
    DEFAULT_INTERVAL.as_millis() as u64
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            memory_size: default_memory_size(),
            stack_pointer: default_stack_pointer(),
            pacing: Pacing::default(),
            clock_interval_ms: default_clock_interval(),
            cycle_limit: None,
        }
    }
}

impl MachineConfig {
    pub fn read<P>(filename: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let json = fs::read_to_string(filename)?;

        MachineConfig::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;

        config.validate()?;

        Ok(config)
    }

    /// Reject machines that registers could not fully address, or whose stack
    /// would start outside of memory.
    pub fn validate(&self) -> Result<()> {
        if self.memory_size == 0 || self.memory_size > DEFAULT_CAPACITY {
            return Err(Error::Config(format!(
                "memory_size must be between 1 and {}, got {}",
                DEFAULT_CAPACITY, self.memory_size
            )));
        }

        if self.stack_pointer as usize > self.memory_size {
            return Err(Error::Config(format!(
                "stack_pointer {:#04x} lies outside of {} bytes of memory",
                self.stack_pointer, self.memory_size
            )));
        }

        Ok(())
    }

    pub fn configure_app<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
        app.arg(
            Arg::with_name("config")
                .long("config")
                .value_name("ls8.json")
                .help("The machine configuration file to load.")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("pacing")
                .long("pacing")
                .value_name("PACING")
                .help("Run cycles back-to-back (immediate) or at the configured clock rate (realtime).")
                .takes_value(true),
        )
    }

    /// Build a configuration from the command line: the file named by
    /// `--config`, if any, overridden by individual flags.
    pub fn from_arg_matches(matches: &ArgMatches) -> Result<Self> {
        let mut config = match matches.value_of("config") {
            Some(filename) => MachineConfig::read(filename)?,
            None => MachineConfig::default(),
        };

        if let Some(pacing) = matches.value_of("pacing") {
            config.set_pacing(Pacing::from_str(pacing).map_err(|_| {
                Error::Config(format!("{} is not a valid pacing mode", pacing))
            })?);
        }

        Ok(config)
    }

    pub fn memory_size(&self) -> usize {
        self.memory_size
    }

    pub fn stack_pointer(&self) -> Value {
        self.stack_pointer
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    pub fn set_pacing(&mut self, pacing: Pacing) {
        self.pacing = pacing;
    }

    pub fn cycle_limit(&self) -> Option<u64> {
        self.cycle_limit
    }

    pub fn build_memory(&self) -> Memory {
        Memory::new(self.memory_size)
    }

    pub fn build_clock(&self) -> Clock {
        let clock = match self.pacing() {
            Pacing::Immediate => Clock::immediate(),
            Pacing::Realtime => Clock::realtime(Duration::from_millis(self.clock_interval_ms)),
        };

        clock.with_cycle_limit(self.cycle_limit())
    }
}
