// SPDX-License-Identifier: MIT
//
// tint — type a color in any common notation, see it, convert it.
//
// This is the binary that wires the two crates together:
//
//   tint-color → notation detection, parsing, formatting, live controller
//   tint-term  → cbreak mode, key parsing, line editing, ANSI output
//
// Startup:
//
//   args → logging → config → named-color table → dispatcher → LiveInput
//
// then one of three modes (see app.rs):
//
//   COLOR args given      one-shot report per argument
//   stdin is a terminal   interactive live prompt
//   otherwise             commit the first line of stdin
//
// Exit status: 0 converted, 1 not a color (or an error), 130 cancelled.

mod app;
mod cli;
mod config;

use std::io;
use std::process::ExitCode;

use tint_color::{Dispatcher, HslMode, LiveInput};
use tint_term::terminal::{is_stdout_tty, is_tty};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::{Directive, LevelFilter};

use crate::app::Style;
use crate::config::Config;

const DEFAULT_LOG_DIRECTIVE: &str = "tint=warn";

fn init_logging(directive: Option<&str>) {
    let directive = directive.unwrap_or(DEFAULT_LOG_DIRECTIVE);
    let mut bad_directive = None;
    let parsed = match directive.parse::<Directive>() {
        Ok(parsed) => parsed,
        Err(err) => {
            bad_directive = Some(err);
            DEFAULT_LOG_DIRECTIVE
                .parse()
                .unwrap_or_else(|_| LevelFilter::WARN.into())
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(parsed))
        .with_writer(io::stderr)
        .init();

    if let Some(err) = bad_directive {
        warn!(directive, error = %err, "invalid --log-level, using {DEFAULT_LOG_DIRECTIVE}");
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let args = cli::parse();
    init_logging(args.log_level.as_deref());
    debug!(version = env!("CARGO_PKG_VERSION"), "tint starting");

    let config = Config::load_or_default(args.config.as_deref());
    let names = config.named_colors();
    let hsl_mode = args.hsl.map_or(config.hsl, HslMode::from);
    let label = config.label_rgb();
    debug!(names = names.len(), hsl = ?hsl_mode, "config ready");

    let dispatcher = Dispatcher::new(&names).with_hsl_mode(hsl_mode);
    let live = LiveInput::new(dispatcher)
        .with_swatch_width(config.swatch_width)
        .with_placeholder(config.placeholder_fill());

    let style = if is_stdout_tty() {
        Style::colored(label)
    } else {
        Style::PLAIN
    };

    if !args.colors.is_empty() {
        let stdout = io::stdout();
        let ok = app::run_oneshot(&mut stdout.lock(), &args.colors, &live, style)?;
        return Ok(app::exit_for(ok));
    }

    if is_tty() {
        return app::run_interactive(live, label);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let ok = app::run_piped(stdin.lock(), &mut stdout.lock(), &live, style)?;
    Ok(app::exit_for(ok))
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("tint: {err:#}");
            ExitCode::from(app::EXIT_NOT_A_COLOR)
        }
    }
}
