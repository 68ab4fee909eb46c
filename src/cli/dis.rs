//! Disassembly listing command

use crate::arch::ls8::disassemble;
use crate::memory::load_image_file;
use crate::project::MachineConfig;
use std::io;

/// Print a listing of every instruction in a program image.
pub fn dis(config: &MachineConfig, image: &str) -> io::Result<()> {
    let mut memory = config.build_memory();
    let length = load_image_file(image, &mut memory)?;

    for line in disassemble(&memory, 0, length) {
        if line.as_instr().is_none() {
            tracing::warn!(
                "{:#04x} holds {:02X?}, which is not a valid instruction",
                line.address(),
                line.as_bytes()
            );
        }

        println!("{}", line);
    }

    Ok(())
}
