//! chunks/types.rs
//! Chunk record, known chunk kinds and the chunk-layer error type.
//!
//! Notes:
//! - A chunk is kept as its full byte span (header + payload + nested chunks).
//!   Nothing below the top-level header is interpreted here.
//! - Spans are `Bytes` slices of the decompressed file, so parsing never copies.

use byteorder::{ByteOrder, LittleEndian};
use bytes::Bytes;
use num_enum::TryFromPrimitive;
use thiserror::Error;

use crate::constants::{header_offsets, CHUNK_HEADER_LEN};
use crate::utils::{chunk_name, fmt_signature};

/// Known top-level chunk types.
///
/// Declaration order is the canonical emission order used when sorting.
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum ChunkKind {
    History               = 0x7000,
    ExportInfo            = 0x7030,
    Image                 = 0x19001,
    Texture               = 0x19000,
    Set                   = 0x3000110,
    Shader                = 0x11000,
    TextureFont           = 0x22000,
    ImageFont             = 0x22002,
    Sprite                = 0x19005,
    VertexAnimKey         = 0x121304,
    Animation             = 0x121000,
    Light                 = 0x13000,
    LightGroup            = 0x2380,
    PhotonMap             = 0x13005,
    Camera                = 0x2200,
    Skeleton              = 0x4500,
    LensFlareGroup        = 0x16006,
    ParticleSystemFactory = 0x15800,
    ParticleSystem        = 0x15801,
    OldBillboardQuad      = 0x17001,
    OldBillboardQuadGroup = 0x17002,
    Mesh                  = 0x10000,
    PhysicsObject         = 0x7011000,
    CollisionObject       = 0x7010000,
    AnimDynaPhys          = 0x3F0000E,
    AnimColl              = 0x3F00008,
    AnimDynaPhysWrapper   = 0x3F0000F,
    BreakableObject       = 0x3001000,
    InstParticleSystem    = 0x3001001,
    Anim                  = 0x3F0000C,
    Locator               = 0x3000005,
    Spline                = 0x3000007,
    Skin                  = 0x10001,
    ExpressionGroup       = 0x21001,
    ExpressionMixer       = 0x21002,
    Wall                  = 0x3000000,
    Fenceline             = 0x3000001,
    Intersection          = 0x3000004,
    RoadSegmentData       = 0x3000009,
    RoadSegment           = 0x3000002,
    Road                  = 0x3000003,
    Path                  = 0x300000B,
    CompositeDrawable     = 0x4512,
    AnimatedObjectFactory = 0x20000,
    AnimatedObject        = 0x20001,
    Scenegraph            = 0x120100,
    OldFrameController    = 0x121200,
    MultiController       = 0x48A0,
    Locator3              = 0x14000,
    GameAttr              = 0x12000,
    SmartProp             = 0x8010000,
    StateProp             = 0x8020000,
}

impl ChunkKind {
    #[inline(always)]
    pub const fn id(self) -> u32 {
        self as u32
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkError {
    /// Buffer too short for a container, or the signature does not match.
    #[error("not a P3D container: signature {} at byte {offset}", signature_text(.found))]
    InvalidFormat { offset: usize, found: u32 },

    /// A chunk header or its declared span runs past the end of the buffer.
    #[error("truncated chunk at byte {offset}: need {need} bytes, have {have}")]
    TruncatedChunk { offset: usize, need: usize, have: usize },

    /// Declared total size is smaller than the header itself.
    #[error("chunk {} at byte {offset} declares size {size}, below the 12-byte header", id_text(.id))]
    UndersizedChunk { offset: usize, id: u32, size: u32 },

    /// Span length disagrees with the size in its own header.
    #[error("chunk span is {actual} bytes but its header declares {declared}")]
    SizeMismatch { declared: usize, actual: usize },

    /// More history records than the 16-bit count field can hold.
    #[error("history has {records} records, at most {} fit", u16::MAX)]
    HistoryOverflow { records: usize },

    /// Merged output does not fit the 32-bit size fields.
    #[error("merged container is {len} bytes, larger than a 32-bit size field")]
    ContainerTooLarge { len: usize },
}

impl ChunkError {
    pub fn offset(&self) -> Option<usize> {
        match self {
            ChunkError::InvalidFormat { offset, .. }
            | ChunkError::TruncatedChunk { offset, .. }
            | ChunkError::UndersizedChunk { offset, .. } => Some(*offset),
            ChunkError::SizeMismatch { .. }
            | ChunkError::HistoryOverflow { .. }
            | ChunkError::ContainerTooLarge { .. } => None,
        }
    }
}

fn signature_text(raw: &u32) -> String {
    fmt_signature(*raw)
}

fn id_text(id: &u32) -> String {
    chunk_name(*id)
}

/// One top-level chunk: its type id and full byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    id: u32,
    span: Bytes,
}

impl Chunk {
    /// Wrap a complete span, checking that its header size matches its length.
    pub fn from_span(span: Bytes) -> Result<Self, ChunkError> {
        if span.len() < CHUNK_HEADER_LEN {
            return Err(ChunkError::TruncatedChunk {
                offset: 0,
                need: CHUNK_HEADER_LEN,
                have: span.len(),
            });
        }
        let id = LittleEndian::read_u32(&span[header_offsets::ID..]);
        let declared = LittleEndian::read_u32(&span[header_offsets::TOTAL_SIZE..]);
        if (declared as usize) < CHUNK_HEADER_LEN {
            return Err(ChunkError::UndersizedChunk { offset: 0, id, size: declared });
        }
        if declared as usize != span.len() {
            return Err(ChunkError::SizeMismatch {
                declared: declared as usize,
                actual: span.len(),
            });
        }
        Ok(Self { id, span })
    }

    /// Build a leaf chunk around an opaque payload.
    pub fn build(id: u32, payload: &[u8]) -> Self {
        let total = (CHUNK_HEADER_LEN + payload.len()) as u32;
        let mut span = Vec::with_capacity(total as usize);
        span.extend_from_slice(&id.to_le_bytes());
        span.extend_from_slice(&total.to_le_bytes());
        span.extend_from_slice(&total.to_le_bytes());
        span.extend_from_slice(payload);
        Self { id, span: Bytes::from(span) }
    }

    /// Caller guarantees the span has already been validated.
    pub(crate) fn from_parts(id: u32, span: Bytes) -> Self {
        Self { id, span }
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn kind(&self) -> Option<ChunkKind> {
        ChunkKind::try_from_primitive(self.id).ok()
    }

    /// Full span, header included.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.span
    }

    pub fn span(&self) -> &Bytes {
        &self.span
    }

    pub fn payload(&self) -> &[u8] {
        &self.span[CHUNK_HEADER_LEN..]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.span.len()
    }

    /// True for a 12-byte chunk with no payload.
    pub fn is_header_only(&self) -> bool {
        self.payload().is_empty()
    }

    pub fn children_size(&self) -> u32 {
        LittleEndian::read_u32(&self.span[header_offsets::CHILDREN_SIZE..])
    }

    pub fn name(&self) -> String {
        chunk_name(self.id)
    }
}
