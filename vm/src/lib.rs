// SPDX-License-Identifier: MIT OR Apache-2.0

//! RISC-V virtual machine core: guest memory, ELF image loading and
//! static/dynamic relocation.
//!
//! A [`Machine`] is constructed from a shared read-only [`ImageBuf`] and
//! [`MachineOptions`]. Construction runs the whole load phase to
//! completion: the image header is validated, dynamically linked images
//! get their `.rela.dyn`/`.rela.plt` entries patched into guest RAM at
//! the configured load base, and the entry point lands in `pc`. A failed
//! validation aborts construction; the guest never runs from a partially
//! loaded image.

#![no_std]

extern crate alloc;

mod config;
mod error;
mod machine;
mod memory;
mod registers;

pub use config::{MachineOptions, DYLINK_BASE};
pub use error::MachineError;
pub use machine::Machine;
pub use memory::{ImageBuf, Memory};
pub use registers::Registers;
