//! Primitive connectivity.
//!
//! A batch of primitives is an ordered list of index tuples into a vertex
//! buffer, all of the same order: points (1 index), edges (2), or triangles
//! (3). Triangle vertex order is significant — clockwise when viewed from
//! the camera is front-facing, a convention shared by the clipper's fan
//! triangulation and the rasterizer's inside test.

/// Shape of every primitive in a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimitiveKind {
    Point,
    Edge,
    Triangle,
}

impl PrimitiveKind {
    /// Number of vertex indices per primitive.
    pub const fn order(self) -> usize {
        match self {
            Self::Point => 1,
            Self::Edge => 2,
            Self::Triangle => 3,
        }
    }
}

/// A uniform-order batch of primitive connectivity.
///
/// The variant carries the order, so a connectivity row can never have the
/// wrong arity and orders above 3 are unrepresentable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Primitives {
    Points(Vec<[usize; 1]>),
    Edges(Vec<[usize; 2]>),
    Triangles(Vec<[usize; 3]>),
}

impl Primitives {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Points(_) => PrimitiveKind::Point,
            Self::Edges(_) => PrimitiveKind::Edge,
            Self::Triangles(_) => PrimitiveKind::Triangle,
        }
    }

    /// Number of primitives in the batch.
    pub fn len(&self) -> usize {
        match self {
            Self::Points(p) => p.len(),
            Self::Edges(e) => e.len(),
            Self::Triangles(t) => t.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_carries_the_order() {
        let batch = Primitives::Edges(vec![[0, 1], [1, 2]]);
        assert_eq!(batch.kind(), PrimitiveKind::Edge);
        assert_eq!(batch.kind().order(), 2);
        assert_eq!(batch.len(), 2);
        assert!(!batch.is_empty());

        assert_eq!(PrimitiveKind::Point.order(), 1);
        assert_eq!(PrimitiveKind::Triangle.order(), 3);
        assert!(Primitives::Triangles(vec![]).is_empty());
    }
}
