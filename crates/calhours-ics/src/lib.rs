//! ICS parsing, admission filter and event normalization.
//!
//! This crate turns the text of an ICS export into report events:
//!
//! - [`parse_calendar`] - Walks the calendar and extracts every VEVENT
//! - [`RawComponent`] - The fields of one VEVENT, offsets stripped
//! - [`normalize_components`] - Admission filter plus recurrence expansion
//! - [`IcsError`] - Error types for parsing
//!
//! # Architecture
//!
//! ```text
//!        ┌──────────────┐
//!        │   ICS text   │
//!        └──────┬───────┘
//!               │ parse_calendar()
//!               ▼
//!        ┌──────────────┐
//!        │ RawComponent │
//!        └──────┬───────┘
//!               │ normalize_components()
//!               ▼
//!        ┌──────────────┐
//!        │ ReportEvent  │
//!        └──────────────┘
//! ```

pub mod error;
pub mod ics;
pub mod normalize;
pub mod raw_event;

// Re-export main types at crate root
pub use error::{IcsError, IcsResult};
pub use ics::{convert_date_time, parse_calendar, parse_duration};
pub use normalize::{
    SkipReason, admission, is_admitted, normalize_component, normalize_components,
    normalize_components_with,
};
pub use raw_event::RawComponent;
