//! Text-level mirror and rotation rewrites.
//!
//! These never execute a pattern. They relabel the four direction symbols in a
//! single pass over the characters, so no symbol can be relabeled twice, and
//! leave every other character (digits, letters, brackets, `@`, whitespace,
//! even invalid characters) exactly where it was.

use crate::cursor::Direction;
use serde::{Deserialize, Serialize};

/// Swaps `.` and `-`.
pub fn mirror_horizontal(pattern: &str) -> String {
    Transform::MirrorHorizontal.apply(pattern)
}

/// Swaps `|` and `/`.
pub fn mirror_vertical(pattern: &str) -> String {
    Transform::MirrorVertical.apply(pattern)
}

/// `.`→`|`, `|`→`-`, `-`→`/`, `/`→`.`
pub fn rotate90(pattern: &str) -> String {
    Transform::Rotate90.apply(pattern)
}

pub fn rotate180(pattern: &str) -> String {
    Transform::Rotate180.apply(pattern)
}

pub fn rotate270(pattern: &str) -> String {
    Transform::Rotate270.apply(pattern)
}

/// A symmetry of the square, applied to pattern text.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Transform {
    #[default]
    Identity,
    MirrorHorizontal,
    MirrorVertical,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Transform {
    pub const ALL: [Transform; 6] = [
        Transform::Identity,
        Transform::MirrorHorizontal,
        Transform::MirrorVertical,
        Transform::Rotate90,
        Transform::Rotate180,
        Transform::Rotate270,
    ];

    /// Where this transform sends a single direction.
    pub fn map(self, dir: Direction) -> Direction {
        use Direction::*;
        match self {
            Self::Identity => dir,
            Self::MirrorHorizontal => match dir {
                PosX => NegX,
                NegX => PosX,
                other => other,
            },
            Self::MirrorVertical => match dir {
                PosY => NegY,
                NegY => PosY,
                other => other,
            },
            Self::Rotate90 => match dir {
                PosX => PosY,
                PosY => NegX,
                NegX => NegY,
                NegY => PosX,
            },
            Self::Rotate180 => Self::Rotate90.map(Self::Rotate90.map(dir)),
            Self::Rotate270 => Self::Rotate90.map(Self::Rotate180.map(dir)),
        }
    }

    /// The transform that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            Self::Rotate90 => Self::Rotate270,
            Self::Rotate270 => Self::Rotate90,
            other => other,
        }
    }

    /// Old symbol to new symbol, one entry per direction.
    fn table(self) -> [(char, char); 4] {
        Direction::ALL.map(|dir| (dir.symbol(), self.map(dir).symbol()))
    }

    pub fn apply(self, pattern: &str) -> String {
        if self == Self::Identity {
            return pattern.to_owned();
        }
        let table = self.table();
        pattern
            .chars()
            .map(|ch| {
                table
                    .iter()
                    .find(|(from, _)| *from == ch)
                    .map_or(ch, |&(_, to)| to)
            })
            .collect()
    }
}

/// Applies `transforms` left to right.
pub fn apply_all(transforms: &[Transform], pattern: &str) -> String {
    transforms
        .iter()
        .fold(pattern.to_owned(), |acc, t| t.apply(&acc))
}
