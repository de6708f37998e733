//! The drawing surface the interpreter talks to.
//!
//! The crate never rasterizes anything. It issues calls against a [`Surface`]
//! implemented by whatever rendering layer the host owns. [`Recorder`] is the
//! in-crate implementation: it keeps every call as an [`Instruction`].

use bevy_math::Rect;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rendering capability consumed by the interpreter.
///
/// Only the path calls (`set_stroke_style` through `stroke`) are driven by
/// pattern interpretation. `fill_rect` and `arc` are standalone primitives for
/// decoration and carry all their own styling.
pub trait Surface {
    fn set_stroke_style(&mut self, color: &str, width: f32);
    fn begin_path(&mut self);
    /// Moves the pen without drawing.
    fn move_to(&mut self, point: Vec2);
    /// Draws a straight segment from the current pen position to `point`.
    fn line_to(&mut self, point: Vec2);
    /// Commits the accumulated path.
    fn stroke(&mut self);
    fn fill_rect(&mut self, rect: Rect, color: &str);
    fn arc(
        &mut self,
        center: Vec2,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        color: &str,
        thickness: f32,
    );
}

/// One recorded surface call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Instruction {
    SetStrokeStyle {
        color: String,
        width: f32,
    },
    BeginPath,
    MoveTo {
        point: Vec2,
    },
    LineTo {
        point: Vec2,
    },
    Stroke,
    FillRect {
        min: Vec2,
        max: Vec2,
        color: String,
    },
    Arc {
        center: Vec2,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        color: String,
        thickness: f32,
    },
}

impl Instruction {
    pub fn move_to(x: f32, y: f32) -> Self {
        Self::MoveTo {
            point: Vec2::new(x, y),
        }
    }

    pub fn line_to(x: f32, y: f32) -> Self {
        Self::LineTo {
            point: Vec2::new(x, y),
        }
    }

    pub fn is_line(&self) -> bool {
        matches!(self, Self::LineTo { .. })
    }
}

/// A [`Surface`] that stores every call in order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Recorder {
    pub instructions: Vec<Instruction>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.instructions.clear();
    }

    /// Targets of every lift-move, in order.
    pub fn moves(&self) -> Vec<Vec2> {
        self.instructions
            .iter()
            .filter_map(|i| match i {
                Instruction::MoveTo { point } => Some(*point),
                _ => None,
            })
            .collect()
    }

    /// Targets of every draw-line, in order.
    pub fn lines(&self) -> Vec<Vec2> {
        self.instructions
            .iter()
            .filter_map(|i| match i {
                Instruction::LineTo { point } => Some(*point),
                _ => None,
            })
            .collect()
    }

    /// Only the pen motions (`move_to`/`line_to`), dropping style and path calls.
    pub fn path(&self) -> Vec<Instruction> {
        self.instructions
            .iter()
            .filter(|i| matches!(i, Instruction::MoveTo { .. } | Instruction::LineTo { .. }))
            .cloned()
            .collect()
    }
}

impl Surface for Recorder {
    fn set_stroke_style(&mut self, color: &str, width: f32) {
        self.instructions.push(Instruction::SetStrokeStyle {
            color: color.to_owned(),
            width,
        });
    }

    fn begin_path(&mut self) {
        self.instructions.push(Instruction::BeginPath);
    }

    fn move_to(&mut self, point: Vec2) {
        self.instructions.push(Instruction::MoveTo { point });
    }

    fn line_to(&mut self, point: Vec2) {
        self.instructions.push(Instruction::LineTo { point });
    }

    fn stroke(&mut self) {
        self.instructions.push(Instruction::Stroke);
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.instructions.push(Instruction::FillRect {
            min: rect.min,
            max: rect.max,
            color: color.to_owned(),
        });
    }

    fn arc(
        &mut self,
        center: Vec2,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        color: &str,
        thickness: f32,
    ) {
        self.instructions.push(Instruction::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            color: color.to_owned(),
            thickness,
        });
    }
}
