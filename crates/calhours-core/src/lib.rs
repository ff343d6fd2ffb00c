//! Core types: event times, recurrence expansion, range filter, yearly aggregation

pub mod aggregate;
pub mod event;
pub mod filter;
pub mod recurrence;
pub mod time;
pub mod tracing;

pub use aggregate::{WeekEntry, YearBucket, aggregate, sort_chronologically};
pub use event::ReportEvent;
pub use filter::{DateRange, RangeMode};
pub use recurrence::{
    Expander, HORIZON_DAYS, Occurrence, RecurrenceError, RecurrenceResult, RecurrenceRule, expand,
};
pub use time::{EventTime, elapsed_hours};
pub use crate::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
