//! # cancan
//!
//! A tiny pattern language for generative line-art.
//!
//! A pattern is a string of relative cursor moves (`.` `-` `|` `/`), optional
//! decimal multipliers, waypoints (`a`-`z` to bind, `A`-`Z` to jump back), lifted
//! regions `(...)`, capture regions `[...]` that collapse to one straight
//! connector, and `@` to return to the start. The [`PatternInterpreter`] walks a
//! pattern and issues move/line calls against an abstract [`Surface`], or
//! measures its bounding box instead. The [`transform`] module mirrors and
//! rotates pattern text without running it.

pub mod cursor;
pub mod error;
pub mod interpreter;
pub mod surface;
pub mod transform;

pub use cursor::*;
pub use error::*;
pub use interpreter::*;
pub use surface::*;
pub use transform::*;
