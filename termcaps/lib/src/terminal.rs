use std::io::{self, IsTerminal};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::discovery::color::{ColorSupport, DetectOptions, supports_color};
use crate::discovery::env::EnvSnapshot;
use crate::discovery::platform::Platform;
use crate::discovery::unicode::is_unicode_supported;

static GLOBAL: LazyLock<TerminalSupport> = LazyLock::new(TerminalSupport::detect);

fn new_terminal_support() -> TerminalSupport {
    let env = EnvSnapshot::capture();
    let platform = Platform::detect();

    TerminalSupport::from_parts(
        &env,
        &platform,
        &DetectOptions::tty(io::stdout().is_terminal()),
        &DetectOptions::tty(io::stderr().is_terminal()),
    )
}

/// Color and Unicode capabilities of the process's output streams.
///
/// A `None` color support means the stream should not be sent any color
/// escape codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalSupport {
    /// Color support of standard output
    pub stdout: Option<ColorSupport>,
    /// Color support of standard error
    pub stderr: Option<ColorSupport>,
    /// Whether Unicode symbols render correctly
    pub unicode: bool,
}

impl Default for TerminalSupport {
    fn default() -> TerminalSupport {
        new_terminal_support()
    }
}

impl TerminalSupport {
    /// Detects capabilities from the live process: environment, platform
    /// and the TTY status of stdout and stderr.
    pub fn detect() -> TerminalSupport {
        new_terminal_support()
    }

    /// The process-wide result, computed on first use and reused afterwards.
    pub fn global() -> &'static TerminalSupport {
        &GLOBAL
    }

    /// Detects capabilities from explicit inputs.
    pub fn from_parts(
        env: &EnvSnapshot,
        platform: &Platform,
        stdout: &DetectOptions,
        stderr: &DetectOptions,
    ) -> TerminalSupport {
        TerminalSupport {
            stdout: supports_color(env, platform, stdout),
            stderr: supports_color(env, platform, stderr),
            unicode: is_unicode_supported(env, platform),
        }
    }
}

/// Color support of stdout, cached for the life of the process.
pub fn supports_color_stdout() -> Option<ColorSupport> {
    TerminalSupport::global().stdout
}

/// Color support of stderr, cached for the life of the process.
pub fn supports_color_stderr() -> Option<ColorSupport> {
    TerminalSupport::global().stderr
}

/// Whether Unicode renders, cached for the life of the process.
pub fn unicode_supported() -> bool {
    TerminalSupport::global().unicode
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::color::ColorLevel;

    #[test]
    fn test_from_parts_treats_streams_independently() {
        let env = EnvSnapshot::from_pairs([("TERM", "xterm-256color")]);
        let support = TerminalSupport::from_parts(
            &env,
            &Platform::linux(),
            &DetectOptions::tty(true),
            &DetectOptions::tty(false),
        );

        assert_eq!(support.stdout.map(|s| s.level), Some(ColorLevel::Ansi256));
        assert_eq!(support.stderr, None);
        assert!(support.unicode);
    }

    #[test]
    fn test_global_is_computed_once() {
        let first = TerminalSupport::global();
        let second = TerminalSupport::global();
        assert!(std::ptr::eq(first, second));
        assert_eq!(supports_color_stdout(), first.stdout);
        assert_eq!(supports_color_stderr(), first.stderr);
        assert_eq!(unicode_supported(), first.unicode);
    }
}
