// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::header::FileHeader;
use crate::section_header::SectionHeader;
use crate::syms::{Strtab, Symbol, Symtab};
use crate::types::*;
use crate::ElfError;

use core::ffi;

/// A parsed view of a guest ELF image. Borrows the raw bytes, owns
/// nothing; every offset taken from the image contents is validated
/// against the buffer length before it is dereferenced.
#[derive(Debug)]
pub struct Image<'a, C: ElfClass> {
    buf: &'a [u8],
    ehdr: FileHeader<C>,
}

impl<'a, C: ElfClass> Image<'a, C> {
    /// Parses and validates the ELF header of `buf`, returning a view
    /// the section, symbol and relocation lookups operate on.
    ///
    /// # Errors
    ///
    /// Returns an [`ElfError`] if the header fails validation.
    pub fn read(buf: &'a [u8]) -> Result<Self, ElfError> {
        let ehdr = FileHeader::read(buf)?;
        Ok(Self { buf, ehdr })
    }

    pub fn header(&self) -> &FileHeader<C> {
        &self.ehdr
    }

    /// Whether the image is dynamically linked (`ET_DYN`).
    pub fn is_dynamic(&self) -> bool {
        self.ehdr.is_dynamic()
    }

    /// Finds the section header whose name equals `name` exactly.
    ///
    /// The section header array is validated on the way: the table offset
    /// must leave room for at least one header, the section name string
    /// table header must lie within the image, and the one-past-last
    /// header must not exceed the image end. Only that last extent is
    /// checked per lookup; the array is contiguous, so every other header
    /// lies strictly before it.
    ///
    /// # Errors
    ///
    /// Returns an [`ElfError`] if the section header table or a derived
    /// name offset escapes the image bounds. A name with no match is not
    /// an error; static binaries legitimately lack `.dynsym` and friends.
    pub fn section_by_name(&self, name: &str) -> Result<Option<SectionHeader<C>>, ElfError> {
        let buf_len = self.buf.len();

        let shoff = self
            .ehdr
            .e_shoff
            .to_usize()
            .ok_or(ElfError::InvalidSectionHeaderOffset)?;
        if buf_len < C::SHDR_SIZE || shoff > buf_len - C::SHDR_SIZE {
            return Err(ElfError::InvalidSectionHeaderOffset);
        }

        // Locate the section name string table header.
        let shstr_off = usize::from(self.ehdr.e_shstrndx)
            .checked_mul(C::SHDR_SIZE)
            .and_then(|off| off.checked_add(shoff))
            .ok_or(ElfError::InvalidSectionHeaderOffset)?;
        if shstr_off > buf_len - C::SHDR_SIZE {
            return Err(ElfError::InvalidSectionHeaderOffset);
        }
        let shstrtab = SectionHeader::<C>::read(&self.buf[shstr_off..shstr_off + C::SHDR_SIZE]);
        let strings = shstrtab
            .sh_offset
            .to_usize()
            .ok_or(ElfError::InvalidStringOffset)?;

        let shnum = usize::from(self.ehdr.e_shnum);
        let table_end = shnum
            .checked_mul(C::SHDR_SIZE)
            .and_then(|size| size.checked_add(shoff))
            .ok_or(ElfError::InvalidStringOffset)?;
        if table_end > buf_len {
            return Err(ElfError::InvalidStringOffset);
        }

        for i in 0..shnum {
            let shdr_off = shoff + i * C::SHDR_SIZE;
            let shdr = SectionHeader::<C>::read(&self.buf[shdr_off..shdr_off + C::SHDR_SIZE]);

            let name_off = strings
                .checked_add(shdr.sh_name as usize)
                .ok_or(ElfError::InvalidStringOffset)?;
            if name_off >= buf_len {
                return Err(ElfError::InvalidStringOffset);
            }
            // Bounded read: a terminator exactly at the image end is
            // fine, a string that would need a byte past it is not.
            let shname = ffi::CStr::from_bytes_until_nul(&self.buf[name_off..])
                .map_err(|_| ElfError::InvalidStringOffset)?;

            if shname.to_bytes() == name.as_bytes() {
                return Ok(Some(shdr));
            }
        }
        Ok(None)
    }

    /// Returns the contents of a section as a slice of the image.
    ///
    /// # Errors
    ///
    /// Returns [`ElfError::FileTooShort`] if the section's file range
    /// escapes the image bounds.
    pub fn section_data(&self, shdr: &SectionHeader<C>) -> Result<&'a [u8], ElfError> {
        let offset = shdr.sh_offset.to_usize().ok_or(ElfError::FileTooShort)?;
        let size = shdr.sh_size.to_usize().ok_or(ElfError::FileTooShort)?;
        let end = offset.checked_add(size).ok_or(ElfError::FileTooShort)?;
        if end > self.buf.len() {
            return Err(ElfError::FileTooShort);
        }
        Ok(&self.buf[offset..end])
    }

    /// Resolves a named symbol through the `.symtab`/`.strtab` pair.
    ///
    /// The scan is in file order and the first exact name match wins.
    /// A missing `.symtab`, a missing `.strtab` or a zero-size symbol
    /// table all yield [`None`]; an ELF without symbols is a valid ELF.
    pub fn resolve_symbol(&self, name: &str) -> Result<Option<Symbol<C>>, ElfError> {
        let Some(sym_hdr) = self.section_by_name(".symtab")? else {
            return Ok(None);
        };
        let Some(str_hdr) = self.section_by_name(".strtab")? else {
            return Ok(None);
        };
        // ELF with no symbols
        if sym_hdr.sh_size == <C::Addr as Address>::ZERO {
            return Ok(None);
        }

        let symtab = Symtab::<C>::new(self.section_data(&sym_hdr)?)?;
        let strtab = Strtab::new(self.section_data(&str_hdr)?);

        for sym in symtab.iter() {
            let Ok(symname) = strtab.get_str(sym.st_name) else {
                continue;
            };
            if symname.to_bytes() == name.as_bytes() {
                return Ok(Some(sym));
            }
        }
        Ok(None)
    }
}
