//! Material strategies.
//!
//! The mesher never interprets voxel ids itself. Texture layers and
//! transparency come from a [`VoxelMaterials`] implementation.

use voxels_core::{Face, VoxelId};

/// Maps voxel ids to atlas layers and transparency.
///
/// Never called for air.
pub trait VoxelMaterials {
    /// Atlas layer for `face` of `voxel`. `is_top` is set when the voxel
    /// above is air or differs in transparency (grass tops and the like).
    fn texture(&self, voxel: VoxelId, face: Face, is_top: bool) -> u32;

    /// Whether `voxel` belongs in the transparent buffer.
    fn is_transparent(&self, _voxel: VoxelId) -> bool {
        false
    }
}

/// Layer `voxel - 1` for every face, everything opaque.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMaterials;

impl VoxelMaterials for DefaultMaterials {
    #[inline]
    fn texture(&self, voxel: VoxelId, _face: Face, _is_top: bool) -> u32 {
        u32::from(voxel.saturating_sub(1))
    }
}

fn opaque(_voxel: VoxelId) -> bool {
    false
}

/// Closure-backed materials.
///
/// ```rust
/// use voxels_core::Face;
/// use voxels_meshing::{FnMaterials, VoxelMaterials};
///
/// let materials = FnMaterials::new(|voxel: u8, face: Face, is_top: bool| {
///     if voxel == 1 && is_top && face == Face::Top { 10 } else { u32::from(voxel) }
/// })
/// .with_transparency(|voxel: u8| voxel == 3);
///
/// assert_eq!(materials.texture(1, Face::Top, true), 10);
/// assert!(materials.is_transparent(3));
/// ```
#[derive(Clone, Copy)]
pub struct FnMaterials<T, P = fn(VoxelId) -> bool> {
    texture: T,
    transparent: P,
}

impl<T> FnMaterials<T>
where
    T: Fn(VoxelId, Face, bool) -> u32,
{
    /// Opaque materials with the given texture function.
    #[must_use]
    pub fn new(texture: T) -> Self {
        Self {
            texture,
            transparent: opaque,
        }
    }
}

impl<T, P> FnMaterials<T, P> {
    /// Replaces the transparency function.
    #[must_use]
    pub fn with_transparency<Q>(self, transparent: Q) -> FnMaterials<T, Q>
    where
        Q: Fn(VoxelId) -> bool,
    {
        FnMaterials {
            texture: self.texture,
            transparent,
        }
    }
}

impl<T, P> VoxelMaterials for FnMaterials<T, P>
where
    T: Fn(VoxelId, Face, bool) -> u32,
    P: Fn(VoxelId) -> bool,
{
    #[inline]
    fn texture(&self, voxel: VoxelId, face: Face, is_top: bool) -> u32 {
        (self.texture)(voxel, face, is_top)
    }

    #[inline]
    fn is_transparent(&self, voxel: VoxelId) -> bool {
        (self.transparent)(voxel)
    }
}

impl<M: VoxelMaterials + ?Sized> VoxelMaterials for &M {
    fn texture(&self, voxel: VoxelId, face: Face, is_top: bool) -> u32 {
        (**self).texture(voxel, face, is_top)
    }

    fn is_transparent(&self, voxel: VoxelId) -> bool {
        (**self).is_transparent(voxel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layer_is_voxel_minus_one() {
        assert_eq!(DefaultMaterials.texture(1, Face::South, false), 0);
        assert_eq!(DefaultMaterials.texture(200, Face::Top, true), 199);
        assert!(!DefaultMaterials.is_transparent(5));
    }

    #[test]
    fn test_fn_materials_default_opaque() {
        let materials = FnMaterials::new(|v: u8, _: Face, _: bool| u32::from(v) * 2);
        assert_eq!(materials.texture(4, Face::East, false), 8);
        assert!(!materials.is_transparent(4));
    }
}
