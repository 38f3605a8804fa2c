//! chunks/priority.rs
//! Fixed emission order for sorted output.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::chunks::types::ChunkKind;

/// Known ids in the order sorted output emits them.
pub const PRIORITY: [ChunkKind; 52] = [
    ChunkKind::History,
    ChunkKind::ExportInfo,
    ChunkKind::Image,
    ChunkKind::Texture,
    ChunkKind::Set,
    ChunkKind::Shader,
    ChunkKind::TextureFont,
    ChunkKind::ImageFont,
    ChunkKind::Sprite,
    ChunkKind::VertexAnimKey,
    ChunkKind::Animation,
    ChunkKind::Light,
    ChunkKind::LightGroup,
    ChunkKind::PhotonMap,
    ChunkKind::Camera,
    ChunkKind::Skeleton,
    ChunkKind::LensFlareGroup,
    ChunkKind::ParticleSystemFactory,
    ChunkKind::ParticleSystem,
    ChunkKind::OldBillboardQuad,
    ChunkKind::OldBillboardQuadGroup,
    ChunkKind::Mesh,
    ChunkKind::PhysicsObject,
    ChunkKind::CollisionObject,
    ChunkKind::AnimDynaPhys,
    ChunkKind::AnimColl,
    ChunkKind::AnimDynaPhysWrapper,
    ChunkKind::BreakableObject,
    ChunkKind::InstParticleSystem,
    ChunkKind::Anim,
    ChunkKind::Locator,
    ChunkKind::Spline,
    ChunkKind::Skin,
    ChunkKind::ExpressionGroup,
    ChunkKind::ExpressionMixer,
    ChunkKind::Wall,
    ChunkKind::Fenceline,
    ChunkKind::Intersection,
    ChunkKind::RoadSegmentData,
    ChunkKind::RoadSegment,
    ChunkKind::Road,
    ChunkKind::Path,
    ChunkKind::CompositeDrawable,
    ChunkKind::AnimatedObjectFactory,
    ChunkKind::AnimatedObject,
    ChunkKind::Scenegraph,
    ChunkKind::OldFrameController,
    ChunkKind::MultiController,
    ChunkKind::Locator3,
    ChunkKind::GameAttr,
    ChunkKind::SmartProp,
    ChunkKind::StateProp,
];

fn rank_index() -> &'static HashMap<u32, usize> {
    static INDEX: OnceLock<HashMap<u32, usize>> = OnceLock::new();
    INDEX.get_or_init(|| {
        PRIORITY
            .iter()
            .enumerate()
            .map(|(rank, kind)| (kind.id(), rank))
            .collect()
    })
}

/// Position of `id` in the priority table, `None` for ids not listed.
#[inline]
pub fn rank(id: u32) -> Option<usize> {
    rank_index().get(&id).copied()
}

/// Stable sort: listed ids by rank, unlisted ids after them in their given order.
pub fn sort_by_priority(ids: &mut [u32]) {
    ids.sort_by_key(|&id| rank(id).unwrap_or(usize::MAX));
}
