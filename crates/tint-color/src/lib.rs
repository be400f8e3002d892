//! # tint-color — color notation engine
//!
//! Detects which notation a string is written in, parses it into one
//! canonical four-component value, and renders that value back out in the
//! other notations.
//!
//! # Architecture
//!
//! ```text
//! raw input
//!     │
//!     ▼
//! dispatch.rs:   trim, lowercase, classify by prefix (first match wins)
//!     │
//!     ├── css.rs         `#rgb` `#rrggbb` `#rrggbbaa`
//!     ├── hex.rs         `0xrrggbb` `0xrrggbbaa`
//!     ├── functional.rs  `rgb(…)` `hsl(…)`, through tuple.rs
//!     └── named.rs       bare keyword, looked up in an injected table
//!     │
//!     ▼
//! color.rs:      Color + Provenance label
//!     │
//!     ▼
//! format.rs:     RGB tuple, packed hex, CSS hex
//! live.rs:       per-edit preview and commit report
//! ```
//!
//! Parsing is pure: no I/O, no logging, no global state. The named-color
//! table is built by the caller and passed in by reference.

pub mod color;
pub mod css;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod functional;
pub mod hex;
pub mod live;
pub mod named;
pub mod tuple;

pub use color::{Color, NumberKind, Parsed, Provenance};
pub use dispatch::{Dispatcher, Notation, parse_color};
pub use error::{FormatError, ParseError, ParseErrorKind};
pub use format::{HexWidth, format_component, format_css, format_hex, format_rgb};
pub use functional::HslMode;
pub use live::{Commit, LiveInput, LiveState, Preview, Report, ReportLine, Swatch};
pub use named::NamedColors;
