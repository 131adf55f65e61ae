//! Color-support detection.
//!
//! The classifier works on an explicit [`EnvSnapshot`] and [`Platform`] so
//! that every rule can be exercised without touching the real process.
//! Rules live in a single ordered table and are evaluated top to bottom; the
//! first rule that returns a level wins, otherwise the forced floor is used.
//!
//! ## Examples
//!
//! ```
//! use termcaps::discovery::color::{supports_color, ColorLevel, DetectOptions};
//! use termcaps::discovery::env::EnvSnapshot;
//! use termcaps::discovery::platform::Platform;
//!
//! let env = EnvSnapshot::from_pairs([("TERM", "xterm-256color")]);
//! let support = supports_color(&env, &Platform::linux(), &DetectOptions::tty(true)).unwrap();
//!
//! assert_eq!(support.level, ColorLevel::Ansi256);
//! assert!(support.has_basic && support.has_256 && !support.has_16m);
//!
//! // piped output gets nothing unless FORCE_COLOR says otherwise
//! assert!(supports_color(&env, &Platform::linux(), &DetectOptions::tty(false)).is_none());
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::env::EnvSnapshot;
use super::platform::Platform;
use crate::error::{Result, TermcapsError};

/// How many colors a stream can display.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum ColorLevel {
    /// no color support
    #[default]
    None = 0,
    /// 16 colors (8 normal plus "bright" variants)
    Basic = 1,
    /// 256 color palette (8 bit)
    Ansi256 = 2,
    /// 16 million colors (24 bit)
    TrueColor = 3,
}

impl ColorLevel {
    /// Converts an integer to a level, clamping it into `0..=3`.
    pub const fn from_clamped(n: i64) -> Self {
        match n {
            i64::MIN..=0 => ColorLevel::None,
            1 => ColorLevel::Basic,
            2 => ColorLevel::Ansi256,
            _ => ColorLevel::TrueColor,
        }
    }

    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Translates the level into the record handed to callers.
    ///
    /// `ColorLevel::None` has no record; every other level does.
    pub fn support(self) -> Option<ColorSupport> {
        ColorSupport::from_level(self)
    }
}

impl From<ColorLevel> for u8 {
    fn from(level: ColorLevel) -> Self {
        level.as_u8()
    }
}

impl fmt::Display for ColorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorLevel::None => write!(f, "none"),
            ColorLevel::Basic => write!(f, "basic"),
            ColorLevel::Ansi256 => write!(f, "256"),
            ColorLevel::TrueColor => write!(f, "truecolor"),
        }
    }
}

impl FromStr for ColorLevel {
    type Err = TermcapsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "none" | "false" => Ok(ColorLevel::None),
            "1" | "basic" | "16" | "true" => Ok(ColorLevel::Basic),
            "2" | "256" | "ansi256" => Ok(ColorLevel::Ansi256),
            "3" | "truecolor" | "16m" | "full" | "24bit" => Ok(ColorLevel::TrueColor),
            _ => Err(TermcapsError::InvalidColorLevel(s.to_string())),
        }
    }
}

/// The color capabilities of a stream that supports at least basic color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorSupport {
    pub level: ColorLevel,
    pub has_basic: bool,
    pub has_256: bool,
    pub has_16m: bool,
}

impl ColorSupport {
    pub fn from_level(level: ColorLevel) -> Option<Self> {
        if level == ColorLevel::None {
            return None;
        }

        Some(Self {
            level,
            has_basic: true,
            has_256: level >= ColorLevel::Ansi256,
            has_16m: level >= ColorLevel::TrueColor,
        })
    }
}

/// What the `FORCE_COLOR` variable asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForcedColor {
    /// An explicit level (`"true"`, `"false"`, `""` or a number).
    Level(ColorLevel),
    /// Set, but not a number. Counts as an override with a floor of 0.
    Malformed,
}

impl ForcedColor {
    /// Reads `FORCE_COLOR`, returning `None` when it is absent.
    pub fn from_env(env: &EnvSnapshot) -> Option<Self> {
        let raw = env.get("FORCE_COLOR")?;

        let forced = match raw {
            "true" | "" => ForcedColor::Level(ColorLevel::Basic),
            "false" => ForcedColor::Level(ColorLevel::None),
            other => parse_leading_int(other)
                .map_or(ForcedColor::Malformed, |n| {
                    ForcedColor::Level(ColorLevel::from_clamped(n))
                }),
        };
        Some(forced)
    }

    /// The minimum level this override guarantees.
    pub fn floor(self) -> ColorLevel {
        match self {
            ForcedColor::Level(level) => level,
            ForcedColor::Malformed => ColorLevel::None,
        }
    }
}

/// Per-stream inputs to color detection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectOptions {
    /// Whether the stream is an interactive terminal.
    ///
    /// `None` means there is no stream to inspect, which skips the TTY check.
    pub stream_is_tty: Option<bool>,
    /// Whether `--color=<mode>` style flags in `args` are honored.
    pub sniff_flags: bool,
    /// Command-line arguments to search when `sniff_flags` is set.
    pub args: Vec<String>,
}

impl DetectOptions {
    /// Options for a stream whose TTY status is known.
    pub fn tty(is_tty: bool) -> Self {
        Self {
            stream_is_tty: Some(is_tty),
            ..Self::default()
        }
    }

    /// Honors `--color=<mode>` flags found in `args`.
    pub fn with_flags<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sniff_flags = true;
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

/// Matches TeamCity 9.1+ and any two-digit major version.
static TEAMCITY_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(9\.(0*[1-9]\d*)\.|\d{2,}\.)").expect("Invalid TeamCity version regex")
});

/// `TERM` values advertising a 256 color palette.
static TERM_256_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)-256(color)?$").expect("Invalid TERM 256 regex"));

/// `TERM` values of terminals known to handle the basic palette.
static TERM_BASIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^screen|^xterm|^vt100|^vt220|^rxvt|color|ansi|cygwin|linux")
        .expect("Invalid TERM basic regex")
});

/// CI providers whose log viewers render ANSI colors.
const CI_PROVIDERS: &[&str] = &[
    "TRAVIS",
    "CIRCLECI",
    "APPVEYOR",
    "GITLAB_CI",
    "GITHUB_ACTIONS",
    "BUILDKITE",
    "DRONE",
];

/// Everything a rule may look at.
struct Probe<'a> {
    env: &'a EnvSnapshot,
    platform: &'a Platform,
    options: &'a DetectOptions,
    forced: Option<ForcedColor>,
}

impl Probe<'_> {
    fn floor(&self) -> ColorLevel {
        self.forced.map_or(ColorLevel::None, ForcedColor::floor)
    }

    fn has_flag(&self, flag: &str) -> bool {
        self.options.sniff_flags && has_flag(&self.options.args, flag)
    }
}

/// A named step in the detection order. `None` falls through.
struct ColorRule {
    name: &'static str,
    decide: fn(&Probe<'_>) -> Option<ColorLevel>,
}

/// Detection order. Earlier rules take priority.
const COLOR_RULES: &[ColorRule] = &[
    ColorRule { name: "force_color_off", decide: force_color_off },
    ColorRule { name: "color_flag", decide: color_flag },
    ColorRule { name: "not_a_tty", decide: not_a_tty },
    ColorRule { name: "dumb_terminal", decide: dumb_terminal },
    ColorRule { name: "windows", decide: windows_build },
    ColorRule { name: "ci", decide: ci_provider },
    ColorRule { name: "teamcity", decide: teamcity },
    ColorRule { name: "colorterm_truecolor", decide: colorterm_truecolor },
    ColorRule { name: "term_program", decide: term_program },
    ColorRule { name: "term_256", decide: term_256 },
    ColorRule { name: "term_basic", decide: term_basic },
    ColorRule { name: "colorterm_present", decide: colorterm_present },
];

fn force_color_off(probe: &Probe<'_>) -> Option<ColorLevel> {
    (probe.forced == Some(ForcedColor::Level(ColorLevel::None))).then_some(ColorLevel::None)
}

fn color_flag(probe: &Probe<'_>) -> Option<ColorLevel> {
    if ["color=16m", "color=full", "color=truecolor"]
        .iter()
        .any(|flag| probe.has_flag(flag))
    {
        return Some(ColorLevel::TrueColor);
    }

    probe.has_flag("color=256").then_some(ColorLevel::Ansi256)
}

fn not_a_tty(probe: &Probe<'_>) -> Option<ColorLevel> {
    (probe.options.stream_is_tty == Some(false) && probe.forced.is_none())
        .then_some(ColorLevel::None)
}

fn dumb_terminal(probe: &Probe<'_>) -> Option<ColorLevel> {
    probe.env.is("TERM", "dumb").then(|| probe.floor())
}

/// Windows 10 build 10586 is the first release with 256 colors and
/// build 14931 the first with truecolor.
fn windows_build(probe: &Probe<'_>) -> Option<ColorLevel> {
    if !probe.platform.is_windows() {
        return None;
    }

    let level = match probe.platform.windows_release {
        Some(r) if r.major >= 10 && r.build >= 14_931 => ColorLevel::TrueColor,
        Some(r) if r.major >= 10 && r.build >= 10_586 => ColorLevel::Ansi256,
        _ => ColorLevel::Basic,
    };
    Some(level)
}

fn ci_provider(probe: &Probe<'_>) -> Option<ColorLevel> {
    if !probe.env.contains("CI") {
        return None;
    }

    let known = CI_PROVIDERS.iter().any(|sign| probe.env.contains(sign))
        || probe.env.is("CI_NAME", "codeship");

    Some(if known { ColorLevel::Basic } else { probe.floor() })
}

fn teamcity(probe: &Probe<'_>) -> Option<ColorLevel> {
    let version = probe.env.get("TEAMCITY_VERSION")?;

    Some(if TEAMCITY_VERSION_RE.is_match(version) {
        ColorLevel::Basic
    } else {
        ColorLevel::None
    })
}

fn colorterm_truecolor(probe: &Probe<'_>) -> Option<ColorLevel> {
    probe
        .env
        .is("COLORTERM", "truecolor")
        .then_some(ColorLevel::TrueColor)
}

fn term_program(probe: &Probe<'_>) -> Option<ColorLevel> {
    let program = probe.env.get("TERM_PROGRAM")?;
    let major = probe
        .env
        .get("TERM_PROGRAM_VERSION")
        .unwrap_or_default()
        .split('.')
        .next()
        .and_then(parse_leading_int);

    match program {
        "iTerm.app" if major.is_some_and(|v| v >= 3) => Some(ColorLevel::TrueColor),
        "iTerm.app" | "Apple_Terminal" => Some(ColorLevel::Ansi256),
        _ => None,
    }
}

fn term_256(probe: &Probe<'_>) -> Option<ColorLevel> {
    let term = probe.env.get("TERM")?;
    TERM_256_RE.is_match(term).then_some(ColorLevel::Ansi256)
}

fn term_basic(probe: &Probe<'_>) -> Option<ColorLevel> {
    let term = probe.env.get("TERM")?;
    TERM_BASIC_RE.is_match(term).then_some(ColorLevel::Basic)
}

fn colorterm_present(probe: &Probe<'_>) -> Option<ColorLevel> {
    probe.env.contains("COLORTERM").then_some(ColorLevel::Basic)
}

/// Detects the color level of a single stream.
///
/// Pure function of its inputs: the environment snapshot, the platform and
/// the stream options. Never fails; anything unrecognized falls through to
/// the `FORCE_COLOR` floor (or `ColorLevel::None`).
pub fn detect_color_level(
    env: &EnvSnapshot,
    platform: &Platform,
    options: &DetectOptions,
) -> ColorLevel {
    let probe = Probe {
        env,
        platform,
        options,
        forced: ForcedColor::from_env(env),
    };

    for rule in COLOR_RULES {
        if let Some(level) = (rule.decide)(&probe) {
            tracing::debug!(
                rule = rule.name,
                level = ?level,
                forced = ?probe.forced,
                "Detected color level"
            );
            return level;
        }
    }

    let level = probe.floor();
    tracing::debug!(
        rule = "floor",
        level = ?level,
        forced = ?probe.forced,
        "No color rule matched, using floor"
    );
    level
}

/// Detects color support for a single stream, returning `None` when the
/// stream should not receive color at all.
pub fn supports_color(
    env: &EnvSnapshot,
    platform: &Platform,
    options: &DetectOptions,
) -> Option<ColorSupport> {
    detect_color_level(env, platform, options).support()
}

/// Whether `flag` appears in `args` before any `--` terminator.
///
/// A bare flag name gets a `--` prefix (or `-` when it is a single
/// character), so `has_flag(args, "color=256")` looks for `--color=256`.
///
/// ## Examples
///
/// ```
/// use termcaps::discovery::color::has_flag;
///
/// let args = ["prog", "--color=256", "--", "--color=16m"].map(String::from);
/// assert!(has_flag(&args, "color=256"));
/// assert!(!has_flag(&args, "color=16m"));
/// ```
pub fn has_flag(args: &[String], flag: &str) -> bool {
    let prefix = if flag.starts_with('-') {
        ""
    } else if flag.len() == 1 {
        "-"
    } else {
        "--"
    };
    let wanted = format!("{prefix}{flag}");

    let position = args.iter().position(|a| *a == wanted);
    let terminator = args.iter().position(|a| a == "--");

    match (position, terminator) {
        (Some(p), Some(t)) => p < t,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

/// Parses a leading integer the lenient way: leading whitespace is skipped,
/// an optional sign is accepted and parsing stops at the first non-digit.
///
/// Returns `None` when no digits follow, which callers treat as "not a
/// number" rather than an error.
pub(crate) fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut seen = false;
    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }

    seen.then_some(if negative { -value } else { value })
}
