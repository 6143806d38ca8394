// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::config::MachineOptions;
use crate::error::MachineError;

use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use rvelf::{
    Address, ElfClass, ElfError, Image, RelaTable, SectionHeader, Symbol, SymbolType, Symtab,
};

/// A shared, read-only guest image buffer. Cloning bumps a reference
/// count; several machines may load from one image without copying it,
/// and none of them can outlive the bytes.
#[derive(Debug, Clone)]
pub struct ImageBuf {
    bytes: Arc<[u8]>,
}

impl ImageBuf {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Vec<u8>> for ImageBuf {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for ImageBuf {
    fn from(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

/// Guest memory: the shared read-only ELF image plus the exclusively
/// owned RAM the guest runs from. The ELF views (sections, symbols,
/// relocations) are derived from the image on demand and never copied.
#[derive(Debug)]
pub struct Memory<C: ElfClass> {
    image: ImageBuf,
    ram: Vec<u8>,
    is_dynamic: bool,
    dynamic_base: C::Addr,
}

impl<C: ElfClass> Memory<C> {
    pub(crate) fn new(image: ImageBuf, is_dynamic: bool, options: &MachineOptions) -> Self {
        Self {
            image,
            ram: vec![0; options.memory_size],
            is_dynamic,
            dynamic_base: <C::Addr>::from_u64(options.dynamic_base),
        }
    }

    pub fn image(&self) -> &ImageBuf {
        &self.image
    }

    pub fn is_dynamic(&self) -> bool {
        self.is_dynamic
    }

    pub fn memory_size(&self) -> usize {
        self.ram.len()
    }

    /// Maps a file-relative offset to the virtual address the guest
    /// sees: the offset itself for statically linked images, the dynamic
    /// load base plus the offset for dynamically linked ones. An offset
    /// large enough to wrap below the load base is a hostile image and
    /// fails the load.
    pub fn elf_base_address(&self, offset: C::Addr) -> Result<C::Addr, MachineError> {
        if self.is_dynamic {
            self.dynamic_base
                .checked_add(offset)
                .ok_or(MachineError::InvalidProgram(ElfError::AddressOverflow))
        } else {
            Ok(offset)
        }
    }

    /// Stores an address-width little-endian value at `addr`.
    pub fn write_addr(&mut self, addr: C::Addr, value: C::Addr) -> Result<(), MachineError> {
        let offset = addr
            .to_usize()
            .ok_or(MachineError::AccessFault(addr.as_u64()))?;
        let end = offset
            .checked_add(<C::Addr as Address>::SIZE)
            .ok_or(MachineError::AccessFault(addr.as_u64()))?;
        if end > self.ram.len() {
            return Err(MachineError::AccessFault(addr.as_u64()));
        }
        value.write_le(&mut self.ram[offset..end]);
        Ok(())
    }

    /// Loads an address-width little-endian value from `addr`.
    pub fn read_addr(&self, addr: C::Addr) -> Result<C::Addr, MachineError> {
        let offset = addr
            .to_usize()
            .ok_or(MachineError::AccessFault(addr.as_u64()))?;
        let end = offset
            .checked_add(<C::Addr as Address>::SIZE)
            .ok_or(MachineError::AccessFault(addr.as_u64()))?;
        if end > self.ram.len() {
            return Err(MachineError::AccessFault(addr.as_u64()));
        }
        Ok(<C::Addr>::from_le(&self.ram[offset..end]))
    }

    /// Finds a section header of the guest image by exact name. Useful
    /// for introspection beyond the load itself, e.g. debugging symbol
    /// lookups.
    pub fn section_by_name(&self, name: &str) -> Result<Option<SectionHeader<C>>, MachineError> {
        let image = Image::<C>::read(self.image.as_bytes())?;
        Ok(image.section_by_name(name)?)
    }

    /// Resolves a named symbol through the image's `.symtab`/`.strtab`
    /// pair. An empty image, like an image without those sections,
    /// simply has no symbols to offer.
    pub fn resolve_symbol(&self, name: &str) -> Result<Option<Symbol<C>>, MachineError> {
        if self.image.is_empty() {
            return Ok(None);
        }
        let image = Image::<C>::read(self.image.as_bytes())?;
        Ok(image.resolve_symbol(name)?)
    }

    /// Applies one relocation section against one symbol section.
    ///
    /// Either section being absent makes this a no-op; binaries without
    /// dynamic relocations are valid. Only symbols of type FUNC or
    /// OBJECT are patched, all others are skipped. The relocation type
    /// sub-field and the addend are deliberately ignored: every applied
    /// entry is a direct absolute store of the referenced symbol's value
    /// at `elf_base_address(r_offset)`. This is a documented policy, not
    /// full ELF relocation conformance.
    pub(crate) fn relocate_section(
        &mut self,
        section_name: &str,
        sym_section: &str,
    ) -> Result<(), MachineError> {
        let image_buf = self.image.clone();
        let image = Image::<C>::read(image_buf.as_bytes())?;
        let Some(rela_hdr) = image.section_by_name(section_name)? else {
            return Ok(());
        };
        let Some(sym_hdr) = image.section_by_name(sym_section)? else {
            return Ok(());
        };

        let relas = RelaTable::<C>::new(image.section_data(&rela_hdr)?);
        let symtab = Symtab::<C>::new(image.section_data(&sym_hdr)?)?;
        log::debug!(
            "{}: applying {} relocations against {}",
            section_name,
            relas.count(),
            sym_section
        );

        for rela in relas.iter() {
            let sym = symtab.read_sym(rela.symbol_index())?;
            match sym.sym_type() {
                SymbolType::Func | SymbolType::Object => {
                    let dst = self.elf_base_address(rela.r_offset)?;
                    self.write_addr(dst, sym.st_value)?;
                }
                _ => (),
            }
        }
        Ok(())
    }

    /// Runs the two dynamic relocation passes in their fixed order.
    /// `.rela.plt` runs second, so on shared targets its writes win.
    pub(crate) fn dynamic_linking(&mut self) -> Result<(), MachineError> {
        self.relocate_section(".rela.dyn", ".dynsym")?;
        self.relocate_section(".rela.plt", ".dynsym")
    }
}
