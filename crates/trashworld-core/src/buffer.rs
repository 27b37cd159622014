//! Fixed-size particle storage shared by the galaxy and dust fields.
//!
//! A [`ParticleBuffer`] keeps positions plus exactly one parallel attribute
//! (per-point colours for the galaxy, per-point velocities for the dust). The
//! index of a point is its identity for the buffer's lifetime and the length
//! never changes; a different count always means a brand new buffer.

use crate::constants::MAX_PARTICLES;
use crate::error::{SceneError, SceneResult};
use glam::Vec3;

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleBuffer {
    positions: Vec<Vec3>,
    attribute: Vec<Vec3>,
    dirty: bool,
}

impl ParticleBuffer {
    /// Build a buffer from already-filled parallel arrays.
    pub fn from_parts(positions: Vec<Vec3>, attribute: Vec<Vec3>) -> SceneResult<Self> {
        if positions.len() != attribute.len() {
            return Err(SceneError::BufferMismatch {
                positions: positions.len(),
                attribute: attribute.len(),
            });
        }
        check_ceiling(positions.len())?;
        Ok(Self {
            positions,
            attribute,
            dirty: true,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[inline]
    pub fn attribute(&self) -> &[Vec3] {
        &self.attribute
    }

    /// Mutable positions; the buffer is flagged for re-upload.
    pub fn positions_mut(&mut self) -> &mut [Vec3] {
        self.dirty = true;
        &mut self.positions
    }

    /// Both arrays at once, for updates that read one while writing the other.
    /// The buffer is flagged for re-upload.
    pub fn split_mut(&mut self) -> (&mut [Vec3], &mut [Vec3]) {
        self.dirty = true;
        (&mut self.positions, &mut self.attribute)
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Called once the renderer has consumed the current contents.
    #[inline]
    pub fn mark_uploaded(&mut self) {
        self.dirty = false;
    }

    /// Raw little-endian bytes of the position array, ready for a vertex buffer.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn attribute_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.attribute)
    }
}

#[inline]
fn check_ceiling(requested: usize) -> SceneResult<()> {
    if requested > MAX_PARTICLES {
        return Err(SceneError::Allocation {
            requested,
            ceiling: MAX_PARTICLES,
        });
    }
    Ok(())
}

/// Reserve room for `count` points, failing up front instead of mid-fill.
pub(crate) fn reserve_points(count: usize) -> SceneResult<Vec<Vec3>> {
    check_ceiling(count)?;
    let mut v = Vec::new();
    v.try_reserve_exact(count).map_err(|_| SceneError::Allocation {
        requested: count,
        ceiling: MAX_PARTICLES,
    })?;
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_attribute_length() {
        let err = ParticleBuffer::from_parts(vec![Vec3::ZERO; 3], vec![Vec3::ONE; 2]).unwrap_err();
        assert_eq!(
            err,
            SceneError::BufferMismatch {
                positions: 3,
                attribute: 2
            }
        );
    }

    #[test]
    fn new_buffer_starts_dirty_and_clears_after_upload() {
        let mut buf = ParticleBuffer::from_parts(vec![Vec3::ZERO; 4], vec![Vec3::ONE; 4]).unwrap();
        assert!(buf.is_dirty());
        buf.mark_uploaded();
        assert!(!buf.is_dirty());
        buf.positions_mut()[0].y = 1.0;
        assert!(buf.is_dirty());
    }

    #[test]
    fn byte_views_cover_every_component() {
        let buf = ParticleBuffer::from_parts(vec![Vec3::ONE; 5], vec![Vec3::ZERO; 5]).unwrap();
        assert_eq!(buf.position_bytes().len(), 5 * 3 * 4);
        assert_eq!(buf.attribute_bytes().len(), 5 * 3 * 4);
    }

    #[test]
    fn reserve_refuses_counts_above_the_ceiling() {
        let err = reserve_points(MAX_PARTICLES + 1).unwrap_err();
        assert!(matches!(err, SceneError::Allocation { requested, .. } if requested == MAX_PARTICLES + 1));
        assert!(reserve_points(16).unwrap().capacity() >= 16);
    }
}
