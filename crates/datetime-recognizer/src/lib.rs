//! # datetime-recognizer
//!
//! Recognize date, time, duration and recurrence expressions in free text
//! and resolve them against a reference moment.
//!
//! Every recognized span gets a canonical ISO-8601-like code and a concrete
//! value. Expressions that are ambiguous relative to the reference moment
//! (a bare weekday, "March 5th") carry both a future and a past reading.
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use datetime_recognizer::Recognizer;
//!
//! let recognizer = Recognizer::english()?;
//! let reference = NaiveDate::from_ymd_opt(2016, 11, 7)
//!     .and_then(|d| d.and_hms_opt(0, 0, 0))
//!     .unwrap_or_default();
//! for value in recognizer.recognize("every Monday at 4pm", reference) {
//!     println!("{} -> {}", value.text, value.code);
//! }
//! # Ok::<(), datetime_recognizer::RecognizerError>(())
//! ```
//!
//! ## Modules
//!
//! - [`extract`]: per-category pattern extraction
//! - [`merge`]: overlap resolution and compound spans across categories
//! - [`parse`]: per-category resolution against a reference moment
//! - [`recognizer`]: extraction and resolution behind one handle
//! - [`config`]: validated locale configuration and resolution options
//! - [`locale`]: capability traits and the English locale
//! - [`calendar`]: calendar arithmetic shared by the parsers
//! - [`holiday`]: holiday rules (fixed, Easter-relative, nth weekday, Hijri)
//! - [`recurrence`]: recurrence rules and RRULE expansion
//! - [`timex`]: canonical code formatting
//! - [`error`]: error types

pub mod calendar;
pub mod config;
pub mod error;
pub mod extract;
pub mod holiday;
pub mod locale;
pub mod merge;
pub mod number;
pub mod parse;
pub mod recognizer;
pub mod recurrence;
pub mod span;
pub mod timex;
pub mod value;

pub use calendar::{Unit, WeekStartDay};
pub use config::{BandKind, Configuration, DateOrder, ResolveOptions, TimeBands};
pub use error::RecognizerError;
pub use extract::{Extractor, SpanExtractor};
pub use merge::MergedExtractor;
pub use parse::{MergedParser, TemporalParser};
pub use recognizer::Recognizer;
pub use recurrence::Recurrence;
pub use span::{Category, ExtractedSpan, Modifier};
pub use value::{Interpretation, Resolution, ResolvedValue, TimeZoneValue};
