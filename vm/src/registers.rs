// SPDX-License-Identifier: MIT OR Apache-2.0

use core::fmt;

use rvelf::{Address, ElfClass};

/// ABI names of the 32 integer registers, indexed by register number.
const REG_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// The guest register file: plain fixed-size storage plus the program
/// counter and the retired instruction counter. The [`fmt::Display`]
/// impl dumps the ABI-named registers, five per row.
#[derive(Debug, Clone)]
pub struct Registers<C: ElfClass> {
    pub pc: C::Addr,
    /// Retired instruction counter
    pub counter: u64,
    regs: [C::Addr; 32],
}

impl<C: ElfClass> Registers<C> {
    pub fn new() -> Self {
        Self {
            pc: <C::Addr as Address>::ZERO,
            counter: 0,
            regs: [<C::Addr as Address>::ZERO; 32],
        }
    }

    pub fn get(&self, reg: usize) -> C::Addr {
        self.regs[reg]
    }

    pub fn set(&mut self, reg: usize, value: C::Addr) {
        self.regs[reg] = value;
    }
}

impl<C: ElfClass> Default for Registers<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ElfClass> fmt::Display for Registers<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[INSTR\t{:8}] ", self.counter)?;
        // x0 is hardwired to zero and not worth a column.
        for reg in 1..32 {
            write!(f, "[{}\t{:08x}] ", REG_NAMES[reg], self.regs[reg])?;
            if reg % 5 == 4 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use rvelf::{Elf32, Elf64};

    #[test]
    fn test_get_set_roundtrip() {
        let mut regs = Registers::<Elf64>::new();
        assert_eq!(regs.get(2), 0);
        regs.set(2, 0x8000_0000);
        assert_eq!(regs.get(2), 0x8000_0000);

        let mut regs = Registers::<Elf32>::new();
        regs.set(10, 0x42);
        assert_eq!(regs.get(10), 0x42);
    }

    #[test]
    fn test_display_dumps_abi_names() {
        let mut regs = Registers::<Elf64>::new();
        regs.counter = 7;
        regs.set(1, 0xdead);
        let dump = format!("{regs}");
        assert!(dump.contains("INSTR"));
        assert!(dump.contains("[ra\t0000dead]"));
        assert!(dump.contains("[t6\t00000000]"));
        assert!(!dump.contains("zero"));
    }
}
