// SPDX-License-Identifier: MIT OR Apache-2.0

/// Errors raised while interpreting a guest ELF image. Every variant is
/// fatal for the load: the machine is never constructed from an image that
/// failed validation. Missing sections and missing symbols are *not*
/// errors; those lookups return [`Option::None`] instead.
use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElfError {
    FileTooShort,

    UnrecognizedMagic,
    UnsupportedClass,
    UnsupportedEndianess,
    UnsupportedOsAbi,
    UnsupportedType,
    UnsupportedMachine,
    UnsupportedVersion,

    InvalidSectionHeaderOffset,
    InvalidStringOffset,

    InvalidSymbolIndex,

    AddressOverflow,
}

impl fmt::Display for ElfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileTooShort => {
                write!(f, "ELF file too short")
            }

            Self::UnrecognizedMagic => {
                write!(f, "unrecognized ELF magic")
            }
            Self::UnsupportedClass => {
                write!(f, "unsupported ELF class")
            }
            Self::UnsupportedEndianess => {
                write!(f, "unsupported ELF endianess")
            }
            Self::UnsupportedOsAbi => {
                write!(f, "unsupported ELF ABI")
            }
            Self::UnsupportedType => {
                write!(f, "unsupported ELF file type")
            }
            Self::UnsupportedMachine => {
                write!(f, "unsupported ELF machine")
            }
            Self::UnsupportedVersion => {
                write!(f, "unsupported ELF version")
            }

            Self::InvalidSectionHeaderOffset => {
                write!(f, "invalid section header offset")
            }
            Self::InvalidStringOffset => {
                write!(f, "invalid ELF string offset")
            }

            Self::InvalidSymbolIndex => {
                write!(f, "invalid ELF symbol index")
            }

            Self::AddressOverflow => {
                write!(f, "bogus ELF virtual address offset")
            }
        }
    }
}
