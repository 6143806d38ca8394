// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::config::MachineOptions;
use crate::error::MachineError;
use crate::memory::{ImageBuf, Memory};
use crate::registers::Registers;

use rvelf::{ElfClass, Image};

/// A guest machine instance: the register file and the guest memory the
/// image was loaded into.
#[derive(Debug)]
pub struct Machine<C: ElfClass> {
    memory: Memory<C>,
    registers: Registers<C>,
}

impl<C: ElfClass> Machine<C> {
    /// Constructs a machine from a guest image.
    ///
    /// The load phase is strictly sequential: the ELF header is parsed
    /// and validated, dynamically linked images get their `.rela.dyn`
    /// and `.rela.plt` entries applied in that order, and the entry
    /// point lands in `pc`. There is no retry and no partial-success
    /// state; any validation failure aborts construction.
    pub fn new(image: ImageBuf, options: MachineOptions) -> Result<Self, MachineError> {
        let (is_dynamic, entry) = {
            let parsed = Image::<C>::read(image.as_bytes())?;
            (parsed.is_dynamic(), parsed.header().e_entry)
        };

        let mut memory = Memory::new(image, is_dynamic, &options);
        if is_dynamic {
            memory.dynamic_linking()?;
        }

        let mut registers = Registers::new();
        registers.pc = memory.elf_base_address(entry)?;
        log::debug!(
            "loaded {} image, entry point {:#x}",
            if is_dynamic { "dynamic" } else { "static" },
            registers.pc
        );

        Ok(Self { memory, registers })
    }

    pub fn memory(&self) -> &Memory<C> {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory<C> {
        &mut self.memory
    }

    pub fn registers(&self) -> &Registers<C> {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut Registers<C> {
        &mut self.registers
    }
}
