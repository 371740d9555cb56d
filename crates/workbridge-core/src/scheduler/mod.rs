//! Scheduling analysis over committed calendar events:
//! - Detects collisions between a candidate and existing events
//! - Scans working hours for free slots of a given length
//! - Aggregates committed hours into a workload snapshot

mod availability;
mod conflict;
mod workload;

pub use availability::{
    find_available_slots, Availability, AvailabilityScanner, AvailabilitySlot, AvailableSlots,
    ScanWindow,
};
pub use conflict::{
    detect_conflict, detect_conflicts, CandidateConflict, ConflictDetector, ConflictPolicy, ConflictResult, RiskLevel,
};
pub use workload::{compute_workload, WorkloadSnapshot};
