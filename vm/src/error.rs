// SPDX-License-Identifier: MIT OR Apache-2.0

use core::fmt;
use rvelf::ElfError;

// Functions private to a module may use the leaf error types. The public
// surface returns a MachineError wrapping the leaf type, with a From
// conversion so `?` propagates naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineError {
    /// The guest image failed validation; machine construction aborts
    /// and there is no partial load to recover.
    InvalidProgram(ElfError),
    /// A guest memory access outside the configured RAM.
    AccessFault(u64),
}

impl From<ElfError> for MachineError {
    fn from(err: ElfError) -> Self {
        Self::InvalidProgram(err)
    }
}

impl fmt::Display for MachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidProgram(err) => {
                write!(f, "invalid program: {err}")
            }
            Self::AccessFault(addr) => {
                write!(f, "guest memory access fault at {addr:#x}")
            }
        }
    }
}
