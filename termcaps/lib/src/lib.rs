//! # termcaps
//!
//! Terminal color-depth and Unicode detection for Rust applications.
//!
//! Capabilities are inferred from environment variables (`FORCE_COLOR`,
//! `TERM`, `COLORTERM`, CI markers, ...), the platform (including the
//! Windows build number) and whether each output stream is a TTY.
//!
//! ## Quick Start
//!
//! ```
//! use termcaps::terminal::TerminalSupport;
//!
//! let support = TerminalSupport::global();
//!
//! match support.stdout {
//!     Some(color) if color.has_16m => println!("\x1b[38;2;255;100;0mtruecolor\x1b[0m"),
//!     Some(color) if color.has_256 => println!("\x1b[38;5;208m256 colors\x1b[0m"),
//!     Some(_) => println!("\x1b[33mbasic colors\x1b[0m"),
//!     None => println!("no colors"),
//! }
//!
//! let tick = if support.unicode { "✔" } else { "√" };
//! println!("{tick} done");
//! ```
//!
//! ## Modules
//!
//! - [`terminal`] - `TerminalSupport`: stdout/stderr color plus Unicode, cached per process
//! - [`discovery`] - Low-level detection functions
//!   - [`discovery::color`] - Color level classifier
//!   - [`discovery::unicode`] - Unicode support classifier
//!   - [`discovery::env`] - Environment snapshots
//!   - [`discovery::platform`] - OS and Windows release detection
//! - [`error`] - Error type for the parsing helpers

pub mod discovery;
pub mod error;
pub mod terminal;

pub use discovery::color::{ColorLevel, ColorSupport, DetectOptions};
pub use discovery::env::EnvSnapshot;
pub use discovery::platform::{OsKind, Platform, WindowsRelease};
pub use error::{Result, TermcapsError};
pub use terminal::{
    TerminalSupport, supports_color_stdout, supports_color_stderr, unicode_supported,
};
