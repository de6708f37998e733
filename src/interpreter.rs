//! Interpreter that walks a pattern string and drives a [`Surface`].
//!
//! The entry point is [`PatternInterpreter`]. Configure it with a
//! [`PatternConfig`], then call [`PatternInterpreter::interpret`] (or the
//! [`draw`](PatternInterpreter::draw) / [`measure`](PatternInterpreter::measure)
//! shorthands) with a [`Start`] and a pattern.

use crate::cursor::{Bounds, CursorState, Effect, Token, tokenize};
use crate::error::{PatternError, PatternResult};
use crate::surface::Surface;
use bevy_math::Rect;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Host-facing configuration for pattern interpretation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Distance covered by one unit move along each axis.
    pub step: Vec2,
    /// Canvas extent, anchored at the origin. Only used for centering.
    pub canvas: Vec2,
    pub stroke_color: String,
    pub stroke_width: f32,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            step: Vec2::splat(10.0),
            canvas: Vec2::splat(800.0),
            stroke_color: "#000000".to_owned(),
            stroke_width: 1.0,
        }
    }
}

/// Draw strokes, or only trace the path and report its extent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Draw,
    Measure,
}

/// One axis of a starting point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coord {
    At(f32),
    /// Center the pattern's bounding box on the canvas along this axis.
    Centered,
}

/// Where interpretation begins.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Start {
    pub x: Coord,
    pub y: Coord,
}

impl Start {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x: Coord::At(x),
            y: Coord::At(y),
        }
    }

    pub fn centered() -> Self {
        Self {
            x: Coord::Centered,
            y: Coord::Centered,
        }
    }
}

impl From<Vec2> for Start {
    fn from(point: Vec2) -> Self {
        Self::at(point.x, point.y)
    }
}

/// Interprets pattern strings against a [`Surface`].
///
/// Holds configuration only; every call builds its own [`CursorState`], so one
/// interpreter can serve any number of independent runs.
#[derive(Clone, Debug, Default)]
pub struct PatternInterpreter {
    config: PatternConfig,
}

impl PatternInterpreter {
    pub fn new(config: PatternConfig) -> Self {
        Self { config }
    }

    /// Replaces the per-axis step size (builder pattern).
    pub fn with_step(mut self, step: Vec2) -> Self {
        self.config.step = step;
        self
    }

    /// Rescales every pattern run afterwards without touching pattern text.
    pub fn set_step(&mut self, step: Vec2) {
        self.config.step = step;
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    fn canvas(&self) -> Rect {
        Rect::from_corners(Vec2::ZERO, self.config.canvas)
    }

    /// Runs `pattern` from `start` in the given `mode`.
    ///
    /// Returns the bounding box of cursor travel in [`Mode::Measure`] and
    /// `None` in [`Mode::Draw`].
    ///
    /// If either axis of `start` is [`Coord::Centered`], the pattern is first
    /// measured from the origin on the same surface, then run again from the
    /// point that centers its box on the canvas.
    ///
    /// # Errors
    ///
    /// Fails on the first character outside the pattern alphabet. Instructions
    /// issued before that point have already reached the surface and the path
    /// is left uncommitted.
    #[tracing::instrument(level = "debug", skip_all, fields(len = pattern.len(), mode = ?mode))]
    pub fn interpret<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        start: Start,
        pattern: &str,
        mode: Mode,
    ) -> PatternResult<Option<Bounds>> {
        let start = self.resolve_start(surface, start, pattern)?;
        let cursor = self.execute(surface, start, pattern, mode)?;
        Ok(match mode {
            Mode::Draw => None,
            Mode::Measure => Some(cursor.bounds),
        })
    }

    /// Strokes `pattern` onto `surface`.
    pub fn draw<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        start: Start,
        pattern: &str,
    ) -> PatternResult<()> {
        self.interpret(surface, start, pattern, Mode::Draw).map(|_| ())
    }

    /// Traces `pattern` with lift-moves only and returns its bounding box.
    pub fn measure<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        start: Start,
        pattern: &str,
    ) -> PatternResult<Bounds> {
        let start = self.resolve_start(surface, start, pattern)?;
        let cursor = self.execute(surface, start, pattern, Mode::Measure)?;
        Ok(cursor.bounds)
    }

    /// Single pass over `pattern` from a concrete point, returning the final
    /// cursor state.
    ///
    /// # Emission
    ///
    /// - Draw mode opens with `set_stroke_style` and `begin_path` and closes
    ///   with `stroke`. Measure mode issues neither.
    /// - The first instruction on the path is always a lift-move to `start`.
    /// - Every token that changes the position emits one instruction: a
    ///   draw-line when drawing with the pen down outside a capture region, a
    ///   lift-move otherwise.
    /// - `]` emits a lift-move to the capture anchor followed by one straight
    ///   connector to the current position (draw-line in draw mode).
    pub fn execute<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        start: Vec2,
        pattern: &str,
        mode: Mode,
    ) -> PatternResult<CursorState> {
        let mut cursor = CursorState::new(start);
        let draws = mode == Mode::Draw;

        if draws {
            surface.set_stroke_style(&self.config.stroke_color, self.config.stroke_width);
            surface.begin_path();
        }
        surface.move_to(start);

        for (index, token) in tokenize(pattern) {
            if let Token::Invalid(ch) = token {
                return Err(PatternError::invalid_token(ch, index));
            }

            match cursor.apply(token, self.config.step) {
                Effect::None => {}
                Effect::Moved => {
                    if draws && cursor.drawing() {
                        surface.line_to(cursor.position);
                    } else {
                        surface.move_to(cursor.position);
                    }
                }
                Effect::CaptureClosed { anchor } => {
                    surface.move_to(anchor);
                    if draws {
                        surface.line_to(cursor.position);
                    } else {
                        surface.move_to(cursor.position);
                    }
                }
            }
        }

        if draws {
            surface.stroke();
        }
        Ok(cursor)
    }

    fn resolve_start<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        start: Start,
        pattern: &str,
    ) -> PatternResult<Vec2> {
        if let (Coord::At(x), Coord::At(y)) = (start.x, start.y) {
            return Ok(Vec2::new(x, y));
        }

        let bounds = self.execute(surface, Vec2::ZERO, pattern, Mode::Measure)?.bounds;
        let offset = self.canvas().center() - bounds.center();
        let resolved = Vec2::new(
            match start.x {
                Coord::At(x) => x,
                Coord::Centered => offset.x,
            },
            match start.y {
                Coord::At(y) => y,
                Coord::Centered => offset.y,
            },
        );
        tracing::debug!(?bounds, start = ?resolved, "centered pattern on canvas");
        Ok(resolved)
    }
}
