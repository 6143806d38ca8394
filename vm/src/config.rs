// SPDX-License-Identifier: MIT OR Apache-2.0

/// Default load base for dynamically linked guest images, kept below the
/// link bases common toolchains pick for static executables.
pub const DYLINK_BASE: u64 = 0x60_0000;

/// Configuration for constructing a [`crate::Machine`].
#[derive(Debug, Clone, Copy)]
pub struct MachineOptions {
    /// Guest RAM size in bytes.
    pub memory_size: usize,
    /// Virtual address dynamically linked images are rebased to.
    pub dynamic_base: u64,
}

impl Default for MachineOptions {
    fn default() -> Self {
        Self {
            memory_size: 8 << 20,
            dynamic_base: DYLINK_BASE,
        }
    }
}
