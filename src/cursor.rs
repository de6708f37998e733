//! Cursor state and token classification for pattern interpretation.

use crate::error::{PatternError, PatternResult};
use bevy_math::Rect;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One of the four axis-aligned unit moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// `.`
    PosX,
    /// `-`
    NegX,
    /// `|`
    PosY,
    /// `/`
    NegY,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::PosX,
        Direction::NegX,
        Direction::PosY,
        Direction::NegY,
    ];

    /// Unit vector for this direction; scaled by the interpreter's step.
    pub fn unit(self) -> Vec2 {
        match self {
            Self::PosX => Vec2::X,
            Self::NegX => Vec2::NEG_X,
            Self::PosY => Vec2::Y,
            Self::NegY => Vec2::NEG_Y,
        }
    }

    /// The pattern symbol that produces this move.
    pub fn symbol(self) -> char {
        match self {
            Self::PosX => '.',
            Self::NegX => '-',
            Self::PosY => '|',
            Self::NegY => '/',
        }
    }

    pub fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::PosX),
            '-' => Some(Self::NegX),
            '|' => Some(Self::PosY),
            '/' => Some(Self::NegY),
            _ => None,
        }
    }
}

/// Whether a lowercase/uppercase letter binds or recalls a waypoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaypointAction {
    Define,
    Jump,
}

/// Opening or closing half of a `(...)` or `[...]` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Toggle {
    Enter,
    Exit,
}

/// A single classified pattern character.
///
/// The whole grammar lives in [`Token::classify`]; everything downstream
/// matches on the tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    /// `0`-`9`, accumulated into the pending multiplier.
    Digit(u8),
    /// `.` `-` `|` `/`
    Axis(Direction),
    /// A waypoint letter, always stored in its lowercase form.
    Waypoint(char, WaypointAction),
    /// `(` / `)`
    Blank(Toggle),
    /// `[` / `]`
    Capture(Toggle),
    /// `@`
    Reset,
    Whitespace,
    Invalid(char),
}

impl Token {
    pub fn classify(ch: char) -> Self {
        match ch {
            '0'..='9' => Self::Digit(ch as u8 - b'0'),
            '@' => Self::Reset,
            'a'..='z' => Self::Waypoint(ch, WaypointAction::Define),
            'A'..='Z' => Self::Waypoint(ch.to_ascii_lowercase(), WaypointAction::Jump),
            '(' => Self::Blank(Toggle::Enter),
            ')' => Self::Blank(Toggle::Exit),
            '[' => Self::Capture(Toggle::Enter),
            ']' => Self::Capture(Toggle::Exit),
            ' ' | '\t' | '\r' | '\n' => Self::Whitespace,
            other => match Direction::from_symbol(other) {
                Some(dir) => Self::Axis(dir),
                None => Self::Invalid(other),
            },
        }
    }
}

/// Classifies every character of `pattern`, paired with its character offset.
pub fn tokenize(pattern: &str) -> impl Iterator<Item = (usize, Token)> + '_ {
    pattern
        .chars()
        .enumerate()
        .map(|(index, ch)| (index, Token::classify(ch)))
}

/// Checks a pattern without executing it.
///
/// Interpretation never calls this; it discovers invalid tokens as it goes.
pub fn validate(pattern: &str) -> PatternResult<()> {
    match tokenize(pattern).find(|(_, t)| matches!(t, Token::Invalid(_))) {
        Some((index, Token::Invalid(ch))) => Err(PatternError::invalid_token(ch, index)),
        _ => Ok(()),
    }
}

/// Running extrema of cursor travel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// A zero-sized box sitting on `point`.
    pub fn at(point: Vec2) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    pub fn include(&mut self, point: Vec2) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn min_x(&self) -> f32 {
        self.min.x
    }

    pub fn max_x(&self) -> f32 {
        self.max.x
    }

    pub fn min_y(&self) -> f32 {
        self.min.y
    }

    pub fn max_y(&self) -> f32 {
        self.max.y
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.min, self.max)
    }
}

/// Pen state toggled by `(` and `)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pen {
    #[default]
    Draw,
    Lift,
}

/// What a single token did to the cursor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    /// Nothing the surface needs to hear about.
    None,
    /// `position` changed; emit a lift-move or draw-line to it.
    Moved,
    /// A capture region closed; connect `anchor` straight to `position`.
    CaptureClosed { anchor: Vec2 },
}

/// Everything one interpretation run tracks. Created at the start of a run and
/// dropped at its end.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CursorState {
    pub position: Vec2,

    /// Starting point of the run; `@` returns here.
    pub origin: Vec2,

    /// Digits seen since the last move. `None` reads as a multiplier of 1.
    pub multiplier: Option<u32>,

    pub pen: Pen,

    /// Set while inside `[...]`.
    pub capture_anchor: Option<Vec2>,

    /// Indexed by `letter - 'a'`.
    pub waypoints: [Option<Vec2>; 26],

    /// Extended only by axis moves, never by `@` or waypoint jumps.
    pub bounds: Bounds,
}

impl CursorState {
    pub fn new(start: Vec2) -> Self {
        Self {
            position: start,
            origin: start,
            multiplier: None,
            pen: Pen::Draw,
            capture_anchor: None,
            waypoints: [None; 26],
            bounds: Bounds::at(start),
        }
    }

    /// True when a plain move should produce a visible segment.
    pub fn drawing(&self) -> bool {
        self.pen == Pen::Draw && self.capture_anchor.is_none()
    }

    pub fn waypoint(&self, name: char) -> Option<Vec2> {
        waypoint_slot(name).and_then(|i| self.waypoints[i])
    }

    fn take_multiplier(&mut self) -> f32 {
        self.multiplier.take().unwrap_or(1) as f32
    }

    /// Applies one token. Shared by draw and measure runs; the caller decides
    /// which surface instruction an [`Effect`] turns into.
    ///
    /// [`Token::Invalid`] and [`Token::Whitespace`] leave the state untouched.
    pub fn apply(&mut self, token: Token, step: Vec2) -> Effect {
        match token {
            Token::Digit(d) => {
                let m = self.multiplier.unwrap_or(0);
                self.multiplier = Some(m.saturating_mul(10).saturating_add(u32::from(d)));
                Effect::None
            }
            Token::Axis(dir) => {
                let factor = self.take_multiplier();
                self.position += dir.unit() * step * factor;
                self.bounds.include(self.position);
                Effect::Moved
            }
            Token::Reset => {
                self.multiplier = None;
                self.position = self.origin;
                Effect::Moved
            }
            Token::Waypoint(name, WaypointAction::Define) => {
                if let Some(i) = waypoint_slot(name) {
                    self.waypoints[i] = Some(self.position);
                }
                Effect::None
            }
            Token::Waypoint(name, WaypointAction::Jump) => match self.waypoint(name) {
                Some(point) => {
                    self.position = point;
                    Effect::Moved
                }
                None => {
                    tracing::debug!(waypoint = %name, "jump to undefined waypoint ignored");
                    Effect::None
                }
            },
            Token::Blank(Toggle::Enter) => {
                self.pen = Pen::Lift;
                Effect::None
            }
            Token::Blank(Toggle::Exit) => {
                self.pen = Pen::Draw;
                Effect::None
            }
            Token::Capture(Toggle::Enter) => {
                self.capture_anchor = Some(self.position);
                Effect::None
            }
            Token::Capture(Toggle::Exit) => match self.capture_anchor.take() {
                Some(anchor) => Effect::CaptureClosed { anchor },
                None => Effect::None,
            },
            Token::Whitespace | Token::Invalid(_) => Effect::None,
        }
    }
}

fn waypoint_slot(name: char) -> Option<usize> {
    name.is_ascii_lowercase().then(|| (name as u8 - b'a') as usize)
}
