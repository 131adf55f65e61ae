/// Error types for the termcaps library.
///
/// Detection itself never fails; these errors only come out of the
/// parsing helpers that callers use to build inputs by hand.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TermcapsError {
    /// The string does not name a color level.
    #[error("Invalid color level: '{0}' (expected none, basic, 256, truecolor or 0-3)")]
    InvalidColorLevel(String),

    /// The string is not a `major.minor.build` Windows release.
    #[error("Invalid Windows release: '{0}' (expected major.minor.build)")]
    InvalidRelease(String),
}

/// Convenience Result type for termcaps operations.
pub type Result<T> = std::result::Result<T, TermcapsError>;
