//! Calendar primitives: committed events and local day windows.

pub mod event;
pub mod window;

pub use event::{validate_events, ScheduledEvent};
pub use window::{
    clock_label, day_label, duration_hours, hours_span, local_offset, parse_instant, saturating_add,
    slot_overlaps, DayWindow, MAX_SPAN_HOURS,
};
