//! Cell Definitions - the atomic simulated unit of the circuit grid
//!
//! A cell is a typed element (wire, splitter, gate, generator...) plus the
//! signal it currently holds. Byte values are part of the world format and
//! must not be reordered.

use serde::{Deserialize, Serialize};

/// Element kind stored in a cell. Discriminants are the on-disk type ids.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CellType {
    #[default]
    Empty = 0,
    Arrow = 1,
    Source = 2,
    Blocker = 3,
    Delay = 4,
    Detector = 5,
    SplitterUpDown = 6,
    SplitterUpRight = 7,
    SplitterUpRightLeft = 8,
    Pulse = 9,
    BlueArrow = 10,
    Diagonal = 11,
    BlueSplitterUpUp = 12,
    BlueSplitterRightUp = 13,
    BlueSplitterUpDiagonal = 14,
    Not = 15,
    And = 16,
    Xor = 17,
    Latch = 18,
    Flipflop = 19,
    Random = 20,
    Button = 21,
    LevelSource = 22,
    LevelTarget = 23,
    DirectionalButton = 24,
}

/// Number of known cell types (valid ids are `0..CELL_TYPE_COUNT`).
pub const CELL_TYPE_COUNT: usize = 25;

impl CellType {
    pub const ALL: [CellType; CELL_TYPE_COUNT] = [
        CellType::Empty,
        CellType::Arrow,
        CellType::Source,
        CellType::Blocker,
        CellType::Delay,
        CellType::Detector,
        CellType::SplitterUpDown,
        CellType::SplitterUpRight,
        CellType::SplitterUpRightLeft,
        CellType::Pulse,
        CellType::BlueArrow,
        CellType::Diagonal,
        CellType::BlueSplitterUpUp,
        CellType::BlueSplitterRightUp,
        CellType::BlueSplitterUpDiagonal,
        CellType::Not,
        CellType::And,
        CellType::Xor,
        CellType::Latch,
        CellType::Flipflop,
        CellType::Random,
        CellType::Button,
        CellType::LevelSource,
        CellType::LevelTarget,
        CellType::DirectionalButton,
    ];

    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn from_id(id: u8) -> Option<CellType> {
        Self::ALL.get(id as usize).copied()
    }
}

impl TryFrom<u8> for CellType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        CellType::from_id(value).ok_or(value)
    }
}

/// Signal held by a cell. Encodes both the colour family a wire carries and
/// the output state of gates.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    #[default]
    None = 0,
    Block = 1,
    Red = 2,
    Blue = 3,
    Yellow = 4,
    Orange = 5,
    DelayedAfterRed = 6,
}

impl Signal {
    pub const ALL: [Signal; 7] = [
        Signal::None,
        Signal::Block,
        Signal::Red,
        Signal::Blue,
        Signal::Yellow,
        Signal::Orange,
        Signal::DelayedAfterRed,
    ];

    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn from_id(id: u8) -> Option<Signal> {
        Self::ALL.get(id as usize).copied()
    }
}

/// Cardinal orientation. Screen coordinates: north is `-y`.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::North, Direction::East, Direction::South, Direction::West];

    /// Decode the two low bits of a packed direction byte.
    #[inline]
    pub fn from_bits(bits: u8) -> Direction {
        Self::ALL[(bits & 0b11) as usize]
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Rotate clockwise by `quarter_turns` steps.
    #[inline]
    pub fn turn(self, quarter_turns: u8) -> Direction {
        Self::from_bits(self.bits().wrapping_add(quarter_turns))
    }

    #[inline]
    pub fn right(self) -> Direction {
        self.turn(1)
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        self.turn(2)
    }

    #[inline]
    pub fn left(self) -> Direction {
        self.turn(3)
    }

    /// Unit step one cell forward.
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Diagonal step: forward plus a quarter turn clockwise
    /// (north -> north-east, east -> south-east, ...).
    #[inline]
    pub fn diagonal_offset(self) -> (i32, i32) {
        match self {
            Direction::North => (1, -1),
            Direction::East => (1, 1),
            Direction::South => (-1, 1),
            Direction::West => (-1, -1),
        }
    }
}

/// One grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub kind: CellType,
    pub signal: Signal,
    pub direction: Direction,
    pub flipped: bool,
    /// Power messages received since this cell was last evaluated.
    pub pulse_count: u16,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        kind: CellType::Empty,
        signal: Signal::None,
        direction: Direction::North,
        flipped: false,
        pulse_count: 0,
    };

    pub fn new(kind: CellType, direction: Direction) -> Self {
        Cell { kind, direction, ..Cell::EMPTY }
    }

    pub fn flipped(mut self, flipped: bool) -> Self {
        self.flipped = flipped;
        self
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kind == CellType::Empty
    }

    /// Pack direction and flip into the world-format byte
    /// (bits 0-1 direction, bit 2 flipped).
    #[inline]
    pub fn packed_orientation(&self) -> u8 {
        self.direction.bits() | if self.flipped { 0b100 } else { 0 }
    }

    /// Inverse of [`Cell::packed_orientation`]. Bits above 2 are ignored.
    #[inline]
    pub fn from_packed(kind: CellType, packed: u8) -> Self {
        Cell {
            kind,
            direction: Direction::from_bits(packed),
            flipped: packed & 0b100 != 0,
            ..Cell::EMPTY
        }
    }

    /// Clear transient signal state, keeping the placed element.
    #[inline]
    pub fn reset_signal(&mut self) {
        self.signal = Signal::None;
        self.pulse_count = 0;
    }
}
