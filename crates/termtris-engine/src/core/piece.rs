use std::fmt;

use super::vector::Vector;

/// Cell offsets of one rotation state, relative to the piece's top-left origin.
///
/// Every rotation state occupies exactly four cells.
pub type Shape = [Vector; 4];

/// Display color tag of a piece kind.
///
/// The engine never interprets it; renderers map it to whatever their surface supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceColor {
    Yellow,
    Red,
    Green,
    Magenta,
    White,
    Blue,
    Cyan,
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    /// O-piece.
    O = 0,
    /// Z-piece.
    Z = 1,
    /// S-piece.
    S = 2,
    /// T-piece.
    T = 3,
    /// L-piece.
    L = 4,
    /// J-piece.
    J = 5,
    /// I-piece.
    I = 6,
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All kinds in catalog order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::O,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::I,
    ];

    /// Returns the catalog entry of this kind.
    #[must_use]
    pub fn def(self) -> &'static PieceDef {
        &CATALOG[self as usize]
    }

    /// Number of distinct rotation states of this kind.
    #[must_use]
    pub fn rotation_count(self) -> usize {
        self.def().rotations.len()
    }

    /// Returns the cell offsets of the given rotation state.
    ///
    /// The index is taken modulo the rotation count.
    #[must_use]
    pub fn shape(self, rotation: usize) -> &'static Shape {
        let rotations = self.def().rotations;
        &rotations[rotation % rotations.len()]
    }

    #[must_use]
    pub fn color(self) -> PieceColor {
        self.def().color
    }

    #[must_use]
    pub fn spawn_offset(self) -> Vector {
        self.def().spawn_offset
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use termtris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::O => 'O',
            PieceKind::Z => 'Z',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
            PieceKind::I => 'I',
        }
    }
}

/// Static definition of a piece kind.
#[derive(Debug)]
pub struct PieceDef {
    pub kind: PieceKind,
    pub rotations: &'static [Shape],
    pub spawn_offset: Vector,
    pub color: PieceColor,
}

/// Returns the fixed catalog of the seven piece kinds, in [`PieceKind::ALL`] order.
#[must_use]
pub fn kinds() -> &'static [PieceDef; PieceKind::LEN] {
    &CATALOG
}

const fn s(cells: [(i32, i32); 4]) -> Shape {
    let mut shape = [Vector::ZERO; 4];
    let mut i = 0;
    while i < 4 {
        shape[i] = Vector::new(cells[i].0, cells[i].1);
        i += 1;
    }
    shape
}

static CATALOG: [PieceDef; PieceKind::LEN] = [
    PieceDef {
        kind: PieceKind::O,
        rotations: &[s([(0, 0), (1, 0), (0, 1), (1, 1)])],
        spawn_offset: Vector::new(4, 0),
        color: PieceColor::Yellow,
    },
    PieceDef {
        kind: PieceKind::Z,
        rotations: &[
            s([(0, 0), (1, 0), (1, 1), (2, 1)]),
            s([(1, 0), (0, 1), (1, 1), (0, 2)]),
        ],
        spawn_offset: Vector::new(3, 0),
        color: PieceColor::Red,
    },
    PieceDef {
        kind: PieceKind::S,
        rotations: &[
            s([(1, 0), (2, 0), (0, 1), (1, 1)]),
            s([(0, 0), (0, 1), (1, 1), (1, 2)]),
        ],
        spawn_offset: Vector::new(3, 0),
        color: PieceColor::Green,
    },
    PieceDef {
        kind: PieceKind::T,
        rotations: &[
            s([(0, 0), (1, 0), (2, 0), (1, 1)]),
            s([(1, 0), (0, 1), (1, 1), (1, 2)]),
            s([(1, 0), (0, 1), (1, 1), (2, 1)]),
            s([(0, 0), (0, 1), (1, 1), (0, 2)]),
        ],
        spawn_offset: Vector::new(3, 0),
        color: PieceColor::Magenta,
    },
    PieceDef {
        kind: PieceKind::L,
        rotations: &[
            s([(0, 1), (1, 1), (2, 1), (0, 2)]),
            s([(0, 0), (1, 0), (1, 1), (1, 2)]),
            s([(2, 0), (0, 1), (1, 1), (2, 1)]),
            s([(1, 0), (1, 1), (1, 2), (2, 2)]),
        ],
        spawn_offset: Vector::new(3, -1),
        color: PieceColor::White,
    },
    PieceDef {
        kind: PieceKind::J,
        rotations: &[
            s([(0, 1), (1, 1), (2, 1), (2, 2)]),
            s([(1, 0), (1, 1), (1, 2), (0, 2)]),
            s([(0, 1), (1, 1), (2, 1), (0, 0)]),
            s([(1, 0), (2, 0), (1, 1), (1, 2)]),
        ],
        spawn_offset: Vector::new(3, -1),
        color: PieceColor::Blue,
    },
    PieceDef {
        kind: PieceKind::I,
        rotations: &[
            s([(0, 1), (1, 1), (2, 1), (3, 1)]),
            s([(1, 0), (1, 1), (1, 2), (1, 3)]),
        ],
        spawn_offset: Vector::new(3, -1),
        color: PieceColor::Cyan,
    },
];

/// The piece currently in play: a kind, a rotation index and a board position.
///
/// The position is the top-left origin of the piece's shape; occupied cells are the
/// position plus each offset of the current rotation state.
///
/// # Example
///
/// ```
/// use termtris_engine::{FallingPiece, PieceKind, Vector};
///
/// let mut piece = FallingPiece::spawn(PieceKind::T);
/// piece.rotate();
/// assert_eq!(piece.rotation(), 1);
/// assert_eq!(piece.position(), Vector::new(3, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallingPiece {
    kind: PieceKind,
    rotation: usize,
    position: Vector,
}

impl FallingPiece {
    /// Places a piece of `kind` at its spawn offset in rotation 0.
    #[must_use]
    pub fn spawn(kind: PieceKind) -> Self {
        Self::new(kind, 0, kind.spawn_offset())
    }

    #[must_use]
    pub fn new(kind: PieceKind, rotation: usize, position: Vector) -> Self {
        Self {
            kind,
            rotation: rotation % kind.rotation_count(),
            position,
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn rotation(&self) -> usize {
        self.rotation
    }

    #[must_use]
    pub fn position(&self) -> Vector {
        self.position
    }

    #[must_use]
    pub fn color(&self) -> PieceColor {
        self.kind.color()
    }

    /// Absolute cells occupied at the current position and rotation.
    pub fn cells(&self) -> impl Iterator<Item = Vector> + '_ {
        self.cells_at(Vector::ZERO, self.rotation)
    }

    /// Absolute cells the piece would occupy if moved by `delta` under `rotation`.
    pub fn cells_at(&self, delta: Vector, rotation: usize) -> impl Iterator<Item = Vector> + '_ {
        let origin = self.position + delta;
        self.kind
            .shape(rotation)
            .iter()
            .map(move |&offset| origin + offset)
    }

    pub(crate) fn translate(&mut self, delta: Vector) {
        self.position = self.position + delta;
    }

    /// Advances to the next rotation state.
    pub fn rotate(&mut self) {
        self.rotation = (self.rotation + 1) % self.kind.rotation_count();
    }

    /// Goes back to the previous rotation state.
    pub fn unrotate(&mut self) {
        let count = self.kind.rotation_count();
        self.rotation = (self.rotation + count - 1) % count;
    }

    /// Rotates by two states (180°).
    pub fn rotate_half(&mut self) {
        self.rotation = (self.rotation + 2) % self.kind.rotation_count();
    }
}

impl fmt::Display for FallingPiece {
    // Format: "kind#rotation@x,y" (e.g., "S#1@4,-1")
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}#{}@{},{}",
            self.kind.as_char(),
            self.rotation,
            self.position.x,
            self.position.y
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_catalog_order_matches_kind_discriminants() {
        for (i, def) in kinds().iter().enumerate() {
            assert_eq!(def.kind as usize, i);
            assert_eq!(PieceKind::ALL[i], def.kind);
        }
    }

    #[test]
    fn test_rotation_counts() {
        assert_eq!(PieceKind::O.rotation_count(), 1);
        assert_eq!(PieceKind::I.rotation_count(), 2);
        assert_eq!(PieceKind::S.rotation_count(), 2);
        assert_eq!(PieceKind::Z.rotation_count(), 2);
        assert_eq!(PieceKind::T.rotation_count(), 4);
        assert_eq!(PieceKind::L.rotation_count(), 4);
        assert_eq!(PieceKind::J.rotation_count(), 4);
    }

    #[test]
    fn test_every_shape_has_four_distinct_non_negative_cells() {
        for def in kinds() {
            for shape in def.rotations {
                let cells: HashSet<_> = shape.iter().copied().collect();
                assert_eq!(cells.len(), 4, "{:?} has overlapping offsets", def.kind);
                assert!(
                    cells.iter().all(|c| c.x >= 0 && c.y >= 0 && c.x < 4 && c.y < 4),
                    "{:?} has offsets outside its 4x4 box",
                    def.kind,
                );
            }
        }
    }

    #[test]
    fn test_rotation_index_stays_in_range() {
        for kind in PieceKind::ALL {
            let count = kind.rotation_count();
            let mut piece = FallingPiece::spawn(kind);
            for _ in 0..10 {
                piece.rotate();
                assert!(piece.rotation() < count);
                piece.rotate_half();
                assert!(piece.rotation() < count);
            }
            for _ in 0..10 {
                piece.unrotate();
                assert!(piece.rotation() < count);
            }
        }
    }

    #[test]
    fn test_rotate_then_unrotate_n_times_restores_index() {
        for kind in PieceKind::ALL {
            for n in 0..9 {
                let mut piece = FallingPiece::spawn(kind);
                piece.rotate();
                let start = piece.rotation();
                for _ in 0..n {
                    piece.rotate();
                }
                for _ in 0..n {
                    piece.unrotate();
                }
                assert_eq!(piece.rotation(), start, "{kind:?} after {n} rotations");
            }
        }
    }

    #[test]
    fn test_spawn_uses_catalog_offset() {
        let piece = FallingPiece::spawn(PieceKind::I);
        assert_eq!(piece.position(), Vector::new(3, -1));
        assert_eq!(piece.rotation(), 0);
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(
            cells,
            [
                Vector::new(3, 0),
                Vector::new(4, 0),
                Vector::new(5, 0),
                Vector::new(6, 0)
            ]
        );
    }

    #[test]
    fn test_display_format() {
        let piece = FallingPiece::new(PieceKind::S, 1, Vector::new(4, -1));
        assert_eq!(piece.to_string(), "S#1@4,-1");
    }

    #[test]
    fn test_piece_kind_chars_are_distinct() {
        let chars: HashSet<char> = PieceKind::ALL.iter().map(|kind| kind.as_char()).collect();
        assert_eq!(chars.len(), PieceKind::LEN);
    }
}
