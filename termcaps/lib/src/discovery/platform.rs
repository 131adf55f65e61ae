//! Platform identification.
//!
//! Color detection only needs to know whether it is running on Windows and,
//! if so, which Windows build. Everything else is treated as "some Unix-like
//! terminal host".
//!
//! ## Examples
//!
//! ```
//! use termcaps::discovery::platform::{OsKind, Platform, WindowsRelease};
//!
//! let release: WindowsRelease = "10.0.19045".parse().unwrap();
//! let platform = Platform::windows(release);
//!
//! assert!(platform.is_windows());
//! assert_eq!(platform.windows_release.map(|r| r.build), Some(19045));
//! assert_eq!(Platform::linux().os, OsKind::Linux);
//! ```

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sysinfo::System;

use crate::error::{Result, TermcapsError};

/// The operating system family, as far as terminal detection cares.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OsKind {
    /// Microsoft Windows
    Windows,
    /// Linux (any distribution)
    Linux,
    /// Apple macOS
    MacOS,
    /// Anything else, carrying the raw `std::env::consts::OS` value
    Other(String),
}

impl OsKind {
    /// Maps a `std::env::consts::OS` style identifier to an `OsKind`.
    pub fn from_identifier(os: &str) -> Self {
        match os {
            "windows" | "win32" => OsKind::Windows,
            "linux" => OsKind::Linux,
            "macos" | "darwin" => OsKind::MacOS,
            other => OsKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for OsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsKind::Windows => write!(f, "Windows"),
            OsKind::Linux => write!(f, "Linux"),
            OsKind::MacOS => write!(f, "macOS"),
            OsKind::Other(name) => write!(f, "{}", name),
        }
    }
}

/// A Windows release in `major.minor.build` form (e.g. `10.0.22631`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowsRelease {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
}

impl WindowsRelease {
    pub const fn new(major: u32, minor: u32, build: u32) -> Self {
        Self { major, minor, build }
    }
}

impl FromStr for WindowsRelease {
    type Err = TermcapsError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TermcapsError::InvalidRelease(s.to_string());

        let mut parts = s.trim().split('.');
        let mut next = || -> Result<u32> {
            parts
                .next()
                .and_then(|p| p.parse::<u32>().ok())
                .ok_or_else(invalid)
        };

        let release = WindowsRelease::new(next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(release)
    }
}

impl fmt::Display for WindowsRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.build)
    }
}

/// The platform a detection runs against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub os: OsKind,
    /// Only populated on Windows, and only when the build could be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows_release: Option<WindowsRelease>,
}

impl Platform {
    /// Detects the platform of the running process.
    ///
    /// On Windows the release is read through `sysinfo`; a release that
    /// cannot be read is left as `None`, which color detection treats as
    /// a pre-10586 build.
    pub fn detect() -> Self {
        let os = OsKind::from_identifier(env::consts::OS);
        let windows_release = match os {
            OsKind::Windows => detect_windows_release(),
            _ => None,
        };

        tracing::debug!(%os, ?windows_release, "Detected platform");
        Self { os, windows_release }
    }

    pub fn windows(release: WindowsRelease) -> Self {
        Self {
            os: OsKind::Windows,
            windows_release: Some(release),
        }
    }

    pub fn linux() -> Self {
        Self {
            os: OsKind::Linux,
            windows_release: None,
        }
    }

    pub fn macos() -> Self {
        Self {
            os: OsKind::MacOS,
            windows_release: None,
        }
    }

    pub fn is_windows(&self) -> bool {
        self.os == OsKind::Windows
    }
}

/// Reads the Windows release from the OS.
///
/// `sysinfo` reports the build number as the kernel version and the
/// marketing major version ("10", "11") as the leading number of the OS
/// version. Windows 11 still reports an NT major of 10, so any major of
/// 10 or above is normalized to 10.
fn detect_windows_release() -> Option<WindowsRelease> {
    let build = System::kernel_version()?.trim().parse::<u32>().ok()?;
    let major = System::os_version()
        .as_deref()
        .and_then(leading_number)
        .map(|m| m.min(10))
        .unwrap_or(10);

    Some(WindowsRelease::new(major, 0, build))
}

fn leading_number(s: &str) -> Option<u32> {
    let digits: String = s
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
