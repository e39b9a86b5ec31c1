//! Anchor layout
//!
//! The unit-sphere positions the tiles are attached to, taken from the
//! vertices of a subdivided icosahedron. Indices are stable for the lifetime
//! of the layout: the 12 base vertices come first, then the midpoints in the
//! order the subdivision creates them.

use std::collections::HashMap;

use bevy::math::Vec3;

use crate::error::{OrbitError, Result};

/// Fixed, ordered set of unit anchor directions
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorLayout {
    positions: Vec<Vec3>,
}

impl AnchorLayout {
    /// Vertices of an icosahedron subdivided `subdivisions` times.
    ///
    /// 0 passes give 12 anchors, 1 pass 42, 2 passes 162.
    pub fn icosphere(subdivisions: u32) -> Self {
        let mut mesh = Icosahedron::new();
        for _ in 0..subdivisions {
            mesh.subdivide();
        }
        Self {
            positions: mesh.vertices.into_iter().map(Vec3::normalize).collect(),
        }
    }

    /// Use positions supplied by a mesh layer; each one is normalised
    pub fn from_positions(positions: impl IntoIterator<Item = Vec3>) -> Result<Self> {
        let positions: Vec<Vec3> = positions
            .into_iter()
            .filter_map(|p| p.try_normalize())
            .collect();
        if positions.is_empty() {
            return Err(OrbitError::EmptyLayout);
        }
        Ok(Self { positions })
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn get(&self, index: usize) -> Option<Vec3> {
        self.positions.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Icosahedron mesh before projection onto the sphere
struct Icosahedron {
    vertices: Vec<Vec3>,
    faces: Vec<[u32; 3]>,
    midpoints: HashMap<(u32, u32), u32>,
}

impl Icosahedron {
    fn new() -> Self {
        let t = (5f32.sqrt() + 1.0) * 0.5;
        let vertices = vec![
            Vec3::new(-1.0, t, 0.0),
            Vec3::new(1.0, t, 0.0),
            Vec3::new(-1.0, -t, 0.0),
            Vec3::new(1.0, -t, 0.0),
            Vec3::new(0.0, -1.0, t),
            Vec3::new(0.0, 1.0, t),
            Vec3::new(0.0, -1.0, -t),
            Vec3::new(0.0, 1.0, -t),
            Vec3::new(t, 0.0, -1.0),
            Vec3::new(t, 0.0, 1.0),
            Vec3::new(-t, 0.0, -1.0),
            Vec3::new(-t, 0.0, 1.0),
        ];
        let faces = vec![
            [0, 11, 5],
            [0, 5, 1],
            [0, 1, 7],
            [0, 7, 10],
            [0, 10, 11],
            [1, 5, 9],
            [5, 11, 4],
            [11, 10, 2],
            [10, 7, 6],
            [7, 1, 8],
            [3, 9, 4],
            [3, 4, 2],
            [3, 2, 6],
            [3, 6, 8],
            [3, 8, 9],
            [4, 9, 5],
            [2, 4, 11],
            [6, 2, 10],
            [8, 6, 7],
            [9, 8, 1],
        ];
        Self {
            vertices,
            faces,
            midpoints: HashMap::new(),
        }
    }

    /// Split every face into four, sharing midpoints between neighbours
    fn subdivide(&mut self) {
        let faces = std::mem::take(&mut self.faces);
        let mut next = Vec::with_capacity(faces.len() * 4);
        for [a, b, c] in faces {
            let ab = self.midpoint(a, b);
            let bc = self.midpoint(b, c);
            let ca = self.midpoint(c, a);
            next.push([a, ab, ca]);
            next.push([b, bc, ab]);
            next.push([c, ca, bc]);
            next.push([ab, bc, ca]);
        }
        self.faces = next;
    }

    fn midpoint(&mut self, a: u32, b: u32) -> u32 {
        let key = (a.max(b), a.min(b));
        if let Some(&index) = self.midpoints.get(&key) {
            return index;
        }
        let index = self.vertices.len() as u32;
        let mid = (self.vertices[a as usize] + self.vertices[b as usize]) * 0.5;
        self.vertices.push(mid);
        self.midpoints.insert(key, index);
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_counts_follow_subdivision() {
        assert_eq!(AnchorLayout::icosphere(0).len(), 12);
        assert_eq!(AnchorLayout::icosphere(1).len(), 42);
        assert_eq!(AnchorLayout::icosphere(2).len(), 162);
    }

    #[test]
    fn anchors_are_unit_length_and_distinct() {
        let layout = AnchorLayout::icosphere(1);
        for (i, a) in layout.positions().iter().enumerate() {
            assert!((a.length() - 1.0).abs() < 1e-5);
            for b in &layout.positions()[i + 1..] {
                assert!(a.distance(*b) > 0.1, "{a:?} {b:?}");
            }
        }
    }

    #[test]
    fn base_vertices_keep_their_order() {
        let layout = AnchorLayout::icosphere(1);
        let t = (5f32.sqrt() + 1.0) * 0.5;
        let first = Vec3::new(-1.0, t, 0.0).normalize();
        assert!(layout.get(0).unwrap().abs_diff_eq(first, 1e-6));
        // First midpoint is between vertices 0 and 11
        let mid = layout.get(12).unwrap();
        let expected = (layout.get(0).unwrap() + layout.get(11).unwrap()).normalize();
        assert!(mid.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn supplied_positions_are_normalised() {
        let layout =
            AnchorLayout::from_positions([Vec3::new(0.0, 0.0, -3.0), Vec3::ZERO, Vec3::X * 2.0])
                .unwrap();
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.get(0), Some(Vec3::NEG_Z));
    }

    #[test]
    fn empty_layout_is_rejected() {
        assert!(matches!(
            AnchorLayout::from_positions(Vec::new()),
            Err(OrbitError::EmptyLayout)
        ));
    }
}
