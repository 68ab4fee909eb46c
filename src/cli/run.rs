//! Program execution command

use crate::arch::ls8::Processor;
use crate::memory::load_image_file;
use crate::project::MachineConfig;
use std::io;

/// Load a program image and run it to completion on a machine built from
/// `config`.
///
/// Console output goes to stdout. A fault is reported as an error once the
/// processor has halted.
pub fn run(config: &MachineConfig, image: &str) -> io::Result<()> {
    let mut memory = config.build_memory();
    load_image_file(image, &mut memory)?;

    let stdout = io::stdout();
    let mut cpu = Processor::with_stack_pointer(memory, stdout.lock(), config.stack_pointer());
    let clock = config.build_clock();

    tracing::info!(
        "Running {} with {} pacing on {} bytes of memory",
        image,
        clock.pacing(),
        config.memory_size()
    );

    clock.run(&mut cpu)?;

    tracing::info!("Halted at {:#04x} after {} cycles", cpu.pc(), cpu.cycles());
    tracing::debug!(
        "Registers {:02X?}, flags {:03b}",
        cpu.registers(),
        cpu.flags().bits()
    );

    Ok(())
}
