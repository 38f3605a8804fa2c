use std::fmt;
use num_enum::TryFromPrimitive;

use crate::chunks::ChunkKind;

pub fn enum_name_or_hex<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::LowerHex,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("0x{:x}", raw),
    }
}

/// Display name for a chunk id: the known kind, or hex.
pub fn chunk_name(id: u32) -> String {
    enum_name_or_hex::<ChunkKind>(id)
}

/// Render a 4-byte signature as text when printable, hex otherwise.
pub fn fmt_signature(raw: u32) -> String {
    let b = raw.to_le_bytes();
    if b.iter().all(|&c| c.is_ascii_graphic()) {
        format!("b\"{}\"", String::from_utf8_lossy(&b))
    } else {
        format!("0x{}", hex::encode(b))
    }
}

/// Round `len` up to the next multiple of `align` (a power of two).
#[inline]
pub fn align_up(len: usize, align: usize) -> usize {
    (len + align - 1) & !(align - 1)
}
