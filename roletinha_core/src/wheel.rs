use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the five multiplier values a segment can show.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Face {
    One,
    Three,
    Five,
    Ten,
    Twenty,
}

impl Face {
    pub const ALL: [Face; 5] = [Face::One, Face::Three, Face::Five, Face::Ten, Face::Twenty];

    pub fn from_index(i: u8) -> Self {
        match i % 5 {
            0 => Face::One,
            1 => Face::Three,
            2 => Face::Five,
            3 => Face::Ten,
            _ => Face::Twenty,
        }
    }

    pub fn to_index(self) -> u8 {
        match self {
            Face::One => 0,
            Face::Three => 1,
            Face::Five => 2,
            Face::Ten => 3,
            Face::Twenty => 4,
        }
    }

    pub const fn value(self) -> u64 {
        match self {
            Face::One => 1,
            Face::Three => 3,
            Face::Five => 5,
            Face::Ten => 10,
            Face::Twenty => 20,
        }
    }

    /// Parse a face from its numeric value, as typed by a player.
    pub fn from_value(v: u64) -> Option<Self> {
        match v {
            1 => Some(Face::One),
            3 => Some(Face::Three),
            5 => Some(Face::Five),
            10 => Some(Face::Ten),
            20 => Some(Face::Twenty),
            _ => None,
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// The physical wheel: an ordered list of segments, each showing a face.
///
/// The face distribution is deliberately non-uniform (low faces dominate);
/// that skew is the house-edge mechanism, so the layout is fixed rather
/// than configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wheel {
    segments: Vec<Face>,
}

impl Wheel {
    /// The standard 30-segment layout: 1 fifteen times, 3 seven times,
    /// 5 four times, 10 three times, 20 once.
    pub fn standard_30() -> Self {
        use Face::{Five, One, Ten, Three, Twenty};
        Self {
            segments: vec![
                One, Three, One, Five, One, Three, One, Ten, One, Three, //
                One, Twenty, One, Three, One, Five, One, Three, One, Ten, //
                One, Three, One, Five, One, Three, One, Ten, One, Five,
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Face] {
        &self.segments
    }

    /// Face shown at a wheel position; positions wrap around the rim.
    pub fn face_at(&self, position: usize) -> Face {
        self.segments[position % self.segments.len()]
    }

    /// How many segments show the given face.
    pub fn count_of(&self, face: Face) -> usize {
        self.segments.iter().filter(|s| **s == face).count()
    }
}
