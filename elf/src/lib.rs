// SPDX-License-Identifier: MIT OR Apache-2.0

//! Width-generic ELF views over an untrusted guest image.
//!
//! The crate borrows the raw image bytes and never copies them; all
//! lookups (named sections, named symbols, relocation entries) validate
//! every derived offset against the buffer length before dereferencing
//! it. The address width is selected through the [`ElfClass`] parameter
//! ([`Elf32`] or [`Elf64`]), with all arithmetic overflow-checked at the
//! chosen width.

#![no_std]

#[cfg(test)]
extern crate alloc;

mod error;
mod header;
mod image;
mod relocation;
mod section_header;
mod syms;
mod types;

pub use error::ElfError;
pub use header::FileHeader;
pub use image::Image;
pub use relocation::{Rela, RelaIterator, RelaTable};
pub use section_header::{SectionHeader, ShdrFlags};
pub use syms::{Strtab, Symbol, SymbolType, Symtab, SymtabIterator};
pub use types::*;
