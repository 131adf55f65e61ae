//! Terminal capability report CLI.
//!
//! Displays what the termcaps library detects for the current process:
//! - Color support of stdout and stderr (level and palette flags)
//! - Unicode rendering support
//! - Platform and Windows release

use std::io::{self, IsTerminal};

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use serde::Serialize;
use termcaps::{
    ColorLevel, ColorSupport, DetectOptions, EnvSnapshot, Platform, TerminalSupport,
};

/// Terminal capability report
#[derive(Parser, Debug)]
#[command(name = "termcaps")]
#[command(author, version, about = "Report terminal color depth and Unicode support")]
#[command(after_help = "\
ENVIRONMENT:
  FORCE_COLOR   true, false, or 0-3; overrides TTY detection
  NO_COLOR      disables styling of this report (not of the detection)
  RUST_LOG      e.g. termcaps=debug to trace which rule decided

SHELL COMPLETIONS:
  termcaps --completions bash >> ~/.bashrc
  termcaps --completions zsh > ~/.zfunc/_termcaps
  termcaps --completions fish > ~/.config/fish/completions/termcaps.fish
")]
struct Args {
    /// Output in JSON format
    #[arg(long)]
    json: bool,

    /// Verbose output (show platform details)
    #[arg(short, long)]
    verbose: bool,

    /// Honor --color=<MODE> style flags when detecting
    #[arg(long)]
    sniff_flags: bool,

    /// Requested color mode (16m, full, truecolor or 256); needs --sniff-flags
    #[arg(long, value_name = "MODE", require_equals = true)]
    color: Option<String>,

    /// Generate shell completions and exit.
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

#[derive(Debug, Serialize)]
struct Report {
    /// Platform the detection ran against
    platform: Platform,
    /// Whether stdout is connected to a TTY
    stdout_is_tty: bool,
    /// Whether stderr is connected to a TTY
    stderr_is_tty: bool,
    #[serde(flatten)]
    support: TerminalSupport,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Setup logging if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    }

    let args = Args::parse();

    if let Some(shell) = args.completions {
        let mut cmd = Args::command();
        clap_complete::generate(shell, &mut cmd, "termcaps", &mut io::stdout());
        return Ok(());
    }

    let report = collect_report(&args);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_pretty(&report, args.verbose);
    }

    Ok(())
}

/// Runs detection for both streams, passing flags through when asked.
fn collect_report(args: &Args) -> Report {
    let env = EnvSnapshot::capture();
    let platform = Platform::detect();
    let stdout_is_tty = io::stdout().is_terminal();
    let stderr_is_tty = io::stderr().is_terminal();

    let options = |is_tty: bool| {
        let options = DetectOptions::tty(is_tty);
        if !args.sniff_flags {
            return options;
        }

        options.with_flags(args.color.iter().map(|mode| format!("--color={mode}")))
    };

    let support = TerminalSupport::from_parts(
        &env,
        &platform,
        &options(stdout_is_tty),
        &options(stderr_is_tty),
    );
    tracing::debug!(?support, sniff_flags = args.sniff_flags, "Collected report");

    Report {
        platform,
        stdout_is_tty,
        stderr_is_tty,
        support,
    }
}

fn describe(support: Option<ColorSupport>) -> String {
    match support.map(|s| s.level) {
        None | Some(ColorLevel::None) => "none".to_string(),
        Some(ColorLevel::Basic) => "basic (16 colors)".to_string(),
        Some(ColorLevel::Ansi256) => "256 colors".to_string(),
        Some(ColorLevel::TrueColor) => "truecolor (16m colors)".to_string(),
    }
}

fn print_pretty(report: &Report, verbose: bool) {
    // Style the report only when our own stdout would get color
    let styled = std::env::var("NO_COLOR").is_err() && report.support.stdout.is_some();

    let bold = if styled { "\x1b[1m" } else { "" };
    let dim = if styled { "\x1b[2m" } else { "" };
    let reset = if styled { "\x1b[0m" } else { "" };
    let green = if styled { "\x1b[32m" } else { "" };
    let blue = if styled { "\x1b[34m" } else { "" };

    let yes_no = |flag: bool| {
        if flag {
            format!("{}yes{}", green, reset)
        } else {
            "no".to_string()
        }
    };

    println!();
    println!("{}Terminal Capabilities{}", bold, reset);
    println!("{}═══════════════════════════════════════{}", dim, reset);

    println!("\n{}{}Color{}", bold, blue, reset);
    println!("  Stdout:     {}", describe(report.support.stdout));
    println!("  Stderr:     {}", describe(report.support.stderr));

    println!("\n{}{}Text{}", bold, blue, reset);
    println!("  Unicode:    {}", yes_no(report.support.unicode));

    if verbose {
        println!("\n{}{}Platform{}", bold, blue, reset);
        println!("  OS:         {}", report.platform.os);
        if let Some(release) = report.platform.windows_release {
            println!("  Release:    {}", release);
        }
        println!("  Stdout TTY: {}", yes_no(report.stdout_is_tty));
        println!("  Stderr TTY: {}", yes_no(report.stderr_is_tty));
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_levels() {
        assert_eq!(describe(None), "none");
        assert_eq!(describe(ColorLevel::Basic.support()), "basic (16 colors)");
        assert_eq!(describe(ColorLevel::Ansi256.support()), "256 colors");
        assert_eq!(
            describe(ColorLevel::TrueColor.support()),
            "truecolor (16m colors)"
        );
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["termcaps", "--json", "--sniff-flags", "--color=256"])
            .unwrap();
        assert!(args.json);
        assert!(args.sniff_flags);
        assert_eq!(args.color.as_deref(), Some("256"));
    }

    #[test]
    fn test_args_verify() {
        Args::command().debug_assert();
    }
}
