// SPDX-License-Identifier: MIT

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tint_color::HslMode;

/// tint: type a color in any common notation, preview it live, convert it.
///
/// Accepts `#rgb`, `#rrggbb[aa]`, `0xrrggbb[aa]`, `rgb(r,g,b)`, `hsl(h,s,l)`
/// and CSS color names. With no COLOR arguments, opens an interactive
/// prompt (or reads one line from stdin when it is not a terminal).
#[derive(Parser, Debug)]
#[command(name = "tint", version, about)]
pub struct Args {
    /// Colors to convert. Each one prints a report and tint exits.
    pub colors: Vec<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter directive, e.g. `tint=debug` (logs go to stderr).
    #[arg(long)]
    pub log_level: Option<String>,

    /// How `hsl(…)` tuples are read. Overrides the config file.
    #[arg(long, value_enum)]
    pub hsl: Option<HslArg>,
}

/// `--hsl` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HslArg {
    /// RGB→HLS transform, lightness and saturation swapped.
    Compat,
    /// Real HSL→RGB conversion.
    Standard,
}

impl From<HslArg> for HslMode {
    fn from(arg: HslArg) -> Self {
        match arg {
            HslArg::Compat => Self::Compat,
            HslArg::Standard => Self::Standard,
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
