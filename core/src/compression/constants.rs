//! compression/constants.rs
//! Stream signatures and LZR instruction constants.

/// Stable stream signatures (u32, little-endian on the wire).
pub mod signatures {
    /// "P3DZ": LZR-compressed container.
    pub const LZR: u32 = 0x5A44_3350;
}

/// Control bytes up to this value encode literal runs; above it, back-references.
pub const LITERAL_CODE_MAX: u8 = 15;

/// Base length used by extended matches and by the fixed block of extended literals.
pub const EXTENSION_BASE: usize = 15;

/// Amount each zero byte adds inside an extension sequence.
pub const EXTENSION_STEP: usize = 255;
