// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::types::*;
use bitflags::bitflags;

bitflags! {
    /// Flags associated with an ELF section header (e.g. writable,
    /// contains null-terminated strings, etc.). The 32-bit class stores
    /// these in a word; the value is zero-extended here.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ShdrFlags : u64 {
        const WRITE            = 0x001;
        const ALLOC            = 0x002;
        const EXECINSTR        = 0x004;
        const MERGE            = 0x010;
        const STRINGS          = 0x020;
        const INFO_LINK        = 0x040;
        const LINK_ORDER       = 0x080;
        const OS_NONCONFORMING = 0x100;
        const GROUP            = 0x200;
        const TLS              = 0x400;
        const COMPRESSED       = 0x800;
    }
}

/// One section header of the guest image. The field order is identical in
/// both ELF classes, only the widths differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionHeader<C: ElfClass> {
    /// Section name, as an offset into the section name string table
    pub sh_name: ElfWord,
    pub sh_type: ElfWord,
    pub sh_flags: ShdrFlags,
    pub sh_addr: C::Addr,
    /// File offset of the section contents
    pub sh_offset: C::Addr,
    /// Size of the section contents in bytes
    pub sh_size: C::Addr,
    /// Link to another section
    pub sh_link: ElfWord,
    /// Additional section information
    pub sh_info: ElfWord,
    /// Address alignment constraint
    pub sh_addralign: C::Addr,
    /// Size of each entry, for sections holding fixed-size entries
    pub sh_entsize: C::Addr,
}

impl<C: ElfClass> SectionHeader<C> {
    /// Represents an undefined section index
    pub const SHN_UNDEF: ElfHalf = 0;

    /// Represents a null section type
    pub const SHT_NULL: ElfWord = 0;

    /// Represents a symbol table section type
    pub const SHT_SYMTAB: ElfWord = 2;

    /// Represents a string table section type
    pub const SHT_STRTAB: ElfWord = 3;

    /// Represents a relocation-with-addend section type
    pub const SHT_RELA: ElfWord = 4;

    /// Represents a section with no associated data in the ELF file
    pub const SHT_NOBITS: ElfWord = 8;

    /// Reads a section header from the first [`ElfClass::SHDR_SIZE`] bytes
    /// of `shdr_buf`.
    pub fn read(shdr_buf: &[u8]) -> Self {
        let a = <C::Addr as Address>::SIZE;
        let sh_name = ElfWord::from_le_bytes(shdr_buf[0..4].try_into().unwrap());
        let sh_type = ElfWord::from_le_bytes(shdr_buf[4..8].try_into().unwrap());
        let sh_flags = <C::Addr>::from_le(&shdr_buf[8..]);
        let sh_addr = <C::Addr>::from_le(&shdr_buf[8 + a..]);
        let sh_offset = <C::Addr>::from_le(&shdr_buf[8 + 2 * a..]);
        let sh_size = <C::Addr>::from_le(&shdr_buf[8 + 3 * a..]);
        let off = 8 + 4 * a;
        let sh_link = ElfWord::from_le_bytes(shdr_buf[off..off + 4].try_into().unwrap());
        let sh_info = ElfWord::from_le_bytes(shdr_buf[off + 4..off + 8].try_into().unwrap());
        let sh_addralign = <C::Addr>::from_le(&shdr_buf[off + 8..]);
        let sh_entsize = <C::Addr>::from_le(&shdr_buf[off + 8 + a..]);

        let sh_flags = ShdrFlags::from_bits_truncate(sh_flags.as_u64());

        Self {
            sh_name,
            sh_type,
            sh_flags,
            sh_addr,
            sh_offset,
            sh_size,
            sh_link,
            sh_info,
            sh_addralign,
            sh_entsize,
        }
    }
}
