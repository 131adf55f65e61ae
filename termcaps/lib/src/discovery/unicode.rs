//! Unicode rendering support.
//!
//! Outside of Windows almost every terminal renders Unicode; the Linux
//! kernel console (`TERM=linux`) is the notable exception. On Windows the
//! legacy console host does not, so support is only assumed for hosts that
//! identify themselves.
//!
//! ## Examples
//!
//! ```
//! use termcaps::discovery::env::EnvSnapshot;
//! use termcaps::discovery::platform::{Platform, WindowsRelease};
//! use termcaps::discovery::unicode::is_unicode_supported;
//!
//! let console = EnvSnapshot::from_pairs([("TERM", "linux")]);
//! assert!(!is_unicode_supported(&console, &Platform::linux()));
//!
//! let windows_terminal = EnvSnapshot::from_pairs([("WT_SESSION", "8e1c4a0b")]);
//! let windows = Platform::windows(WindowsRelease::new(10, 0, 22631));
//! assert!(is_unicode_supported(&windows_terminal, &windows));
//! ```

use super::env::EnvSnapshot;
use super::platform::Platform;

/// A named Windows host that is known to render Unicode.
struct UnicodeHost {
    name: &'static str,
    detect: fn(&EnvSnapshot) -> bool,
}

/// Windows hosts checked in order; any match means Unicode works.
const WINDOWS_UNICODE_HOSTS: &[UnicodeHost] = &[
    UnicodeHost { name: "ci", detect: |env| env.is_set("CI") },
    UnicodeHost { name: "windows_terminal", detect: |env| env.is_set("WT_SESSION") },
    UnicodeHost { name: "cmder", detect: |env| env.is("ConEmuTask", "{cmd::Cmder}") },
    UnicodeHost { name: "vscode", detect: |env| env.is("TERM_PROGRAM", "vscode") },
    UnicodeHost { name: "xterm_256color", detect: |env| env.is("TERM", "xterm-256color") },
    UnicodeHost { name: "alacritty", detect: |env| env.is("TERM", "alacritty") },
];

/// Whether the terminal can be trusted to render Unicode symbols.
pub fn is_unicode_supported(env: &EnvSnapshot, platform: &Platform) -> bool {
    if !platform.is_windows() {
        // Linux kernel console
        let supported = !env.is("TERM", "linux");
        tracing::debug!(supported, os = %platform.os, "Detected unicode support");
        return supported;
    }

    match WINDOWS_UNICODE_HOSTS.iter().find(|host| (host.detect)(env)) {
        Some(host) => {
            tracing::debug!(supported = true, host = host.name, "Detected unicode support");
            true
        }
        None => {
            tracing::debug!(supported = false, "No unicode-capable Windows host detected");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::platform::WindowsRelease;

    fn windows() -> Platform {
        Platform::windows(WindowsRelease::new(10, 0, 19045))
    }

    #[test]
    fn test_unix_is_supported_except_linux_console() {
        for platform in [Platform::linux(), Platform::macos()] {
            assert!(is_unicode_supported(&EnvSnapshot::empty(), &platform));
            assert!(is_unicode_supported(
                &EnvSnapshot::from_pairs([("TERM", "xterm")]),
                &platform
            ));
            assert!(!is_unicode_supported(
                &EnvSnapshot::from_pairs([("TERM", "linux")]),
                &platform
            ));
        }
    }

    #[test]
    fn test_windows_defaults_to_unsupported() {
        assert!(!is_unicode_supported(&EnvSnapshot::empty(), &windows()));
        assert!(!is_unicode_supported(
            &EnvSnapshot::from_pairs([("TERM", "xterm")]),
            &windows()
        ));
    }

    #[test]
    fn test_windows_terminal_without_term() {
        let env = EnvSnapshot::from_pairs([("WT_SESSION", "1a2b3c")]);
        assert!(env.get("TERM").is_none());
        assert!(is_unicode_supported(&env, &windows()));
    }

    #[test]
    fn test_windows_known_hosts() {
        let cases = [
            ("CI", "true"),
            ("WT_SESSION", "abc"),
            ("ConEmuTask", "{cmd::Cmder}"),
            ("TERM_PROGRAM", "vscode"),
            ("TERM", "xterm-256color"),
            ("TERM", "alacritty"),
        ];

        for (key, value) in cases {
            let env = EnvSnapshot::from_pairs([(key, value)]);
            assert!(is_unicode_supported(&env, &windows()), "{key}={value}");
        }
    }

    #[test]
    fn test_windows_empty_markers_do_not_count() {
        let env = EnvSnapshot::from_pairs([("CI", ""), ("WT_SESSION", "")]);
        assert!(!is_unicode_supported(&env, &windows()));
    }

    #[test]
    fn test_windows_other_conemu_tasks_do_not_count() {
        let env = EnvSnapshot::from_pairs([("ConEmuTask", "{Shells::cmd}")]);
        assert!(!is_unicode_supported(&env, &windows()));
    }
}
