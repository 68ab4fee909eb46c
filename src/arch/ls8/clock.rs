//! Scheduling of processor cycles

use crate::arch::ls8::{Processor, Status};
use crate::error::{self, Error};
use std::io::Write;
use std::time::Duration;
use std::{fmt, str, thread};

/// How quickly the clock issues cycles.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pacing {
    /// Run cycles back-to-back.
    Immediate,

    /// Wait a fixed interval between cycles.
    Realtime,
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing::Realtime
    }
}

impl fmt::Display for Pacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pacing::Immediate => write!(f, "immediate"),
            Pacing::Realtime => write!(f, "realtime"),
        }
    }
}

impl str::FromStr for Pacing {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "immediate" => Ok(Pacing::Immediate),
            "realtime" => Ok(Pacing::Realtime),
            _ => Err(()),
        }
    }
}

derive_deserialize_from_str!(Pacing, "valid pacing mode");
derive_serialize_from_display!(Pacing);

/// The default interval between paced cycles: 1ms, or roughly 1KHz.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1);

/// Drives a processor until it halts.
///
/// The clock only ever yields between cycles, so a cycle is never left half
/// executed. The only way to stop a running program short of a fault is the
/// cycle limit, which leaves the processor `Running` so that it can be
/// resumed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Clock {
    pacing: Pacing,
    interval: Duration,
    cycle_limit: Option<u64>,
}

impl Clock {
    pub fn immediate() -> Self {
        Clock {
            pacing: Pacing::Immediate,
            interval: Duration::from_millis(0),
            cycle_limit: None,
        }
    }

    pub fn realtime(interval: Duration) -> Self {
        Clock {
            pacing: Pacing::Realtime,
            interval,
            cycle_limit: None,
        }
    }

    pub fn with_cycle_limit(self, cycle_limit: Option<u64>) -> Self {
        Clock {
            cycle_limit,
            ..self
        }
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Run the processor until it halts, yielding the number of cycles this
    /// call executed.
    pub fn run<W>(&self, cpu: &mut Processor<W>) -> error::Result<u64>
    where
        W: Write,
    {
        let mut ticks = 0;

        while cpu.status() == Status::Running {
            if let Some(limit) = self.cycle_limit {
                if ticks >= limit {
                    tracing::warn!("Stopping clock after {} cycles", limit);
                    return Err(Error::CycleLimitExceeded { limit });
                }
            }

            let status = cpu.step()?;
            ticks += 1;

            if self.pacing() == Pacing::Realtime && status == Status::Running {
                thread::sleep(self.interval);
            }
        }

        tracing::debug!("Processor halted after {} cycles", ticks);

        Ok(ticks)
    }
}

impl Default for Clock {
    fn default() -> Self {
        Clock::realtime(DEFAULT_INTERVAL)
    }
}
