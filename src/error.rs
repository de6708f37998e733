//! Error type for pattern interpretation.

/// Convenience alias used throughout the crate.
pub type PatternResult<T> = Result<T, PatternError>;

/// The only failure an interpretation run can produce.
///
/// Jumps to undefined waypoints and empty patterns are defined behaviour and
/// never surface here.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum PatternError {
    /// A character outside the pattern alphabet. `index` is the character
    /// offset into the pattern, not the byte offset.
    #[error("invalid pattern token {token:?} at position {index}")]
    InvalidToken { token: char, index: usize },
}

impl PatternError {
    pub fn invalid_token(token: char, index: usize) -> Self {
        Self::InvalidToken { token, index }
    }

    /// The offending character.
    pub fn token(&self) -> char {
        match self {
            Self::InvalidToken { token, .. } => *token,
        }
    }

    /// Character offset of the offending token.
    pub fn index(&self) -> usize {
        match self {
            Self::InvalidToken { index, .. } => *index,
        }
    }
}
