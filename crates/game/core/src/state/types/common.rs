use std::fmt;

/// Unique identifier for a stone, assigned at spawn and never reused.
///
/// Renderers key board cells by this id so a stone that moves or fades out
/// is told apart from one that is created or destroyed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoneId(pub u64);

impl fmt::Display for StoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stone-{}", self.0)
    }
}

/// Board cell coordinates.
///
/// `column` is always in `[0, N)`. `row` is normalized into `[0, N)` at rest
/// but goes negative while spawned stones wait above the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub column: i32,
    pub row: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { column: 0, row: 0 };

    pub fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// The same column shifted `rows` rows down (negative moves up).
    pub fn shifted(self, rows: i32) -> Self {
        Self::new(self.column, self.row + rows)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}
