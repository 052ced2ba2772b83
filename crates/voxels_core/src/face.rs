//! Face directions.
//!
//! The discriminants are the face indices written into mesh records, so the
//! order here is part of the output format.

/// One of the six faces of a voxel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Face {
    /// +Z
    South = 0,
    /// +Y
    Top = 1,
    /// -Y
    Bottom = 2,
    /// -X
    West = 3,
    /// +X
    East = 4,
    /// -Z
    North = 5,
}

impl Face {
    /// All faces in emission order.
    pub const ALL: [Face; 6] = [
        Face::South,
        Face::Top,
        Face::Bottom,
        Face::West,
        Face::East,
        Face::North,
    ];

    /// Face index (0..6).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self as u32
    }

    /// Outward unit normal.
    #[inline]
    #[must_use]
    pub const fn normal(self) -> [i32; 3] {
        match self {
            Face::South => [0, 0, 1],
            Face::Top => [0, 1, 0],
            Face::Bottom => [0, -1, 0],
            Face::West => [-1, 0, 0],
            Face::East => [1, 0, 0],
            Face::North => [0, 0, -1],
        }
    }

    /// In-plane tangent axes `(u, v)`.
    ///
    /// Corner offsets are `u * cu + v * cv` for `(cu, cv)` in
    /// `[(-1, 1), (1, 1), (-1, -1), (1, -1)]`.
    #[inline]
    #[must_use]
    pub const fn tangents(self) -> ([i32; 3], [i32; 3]) {
        match self {
            Face::South => ([1, 0, 0], [0, 1, 0]),
            Face::Top => ([1, 0, 0], [0, 0, -1]),
            Face::Bottom => ([1, 0, 0], [0, 0, 1]),
            Face::West => ([0, 0, 1], [0, 1, 0]),
            Face::East => ([0, 0, -1], [0, 1, 0]),
            Face::North => ([-1, 0, 0], [0, 1, 0]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(a: [i32; 3], b: [i32; 3]) -> i32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    #[test]
    fn test_indices_follow_emission_order() {
        for (i, face) in Face::ALL.iter().enumerate() {
            assert_eq!(face.index() as usize, i);
        }
    }

    #[test]
    fn test_tangent_frames_are_orthogonal() {
        for face in Face::ALL {
            let n = face.normal();
            let (u, v) = face.tangents();
            assert_eq!(dot(n, u), 0, "{face:?}");
            assert_eq!(dot(n, v), 0, "{face:?}");
            assert_eq!(dot(u, v), 0, "{face:?}");
        }
    }
}
