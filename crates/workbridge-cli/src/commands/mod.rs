pub mod analyze;
pub mod config;
pub mod extract;
pub mod insight;
pub mod slots;
pub mod sync;
pub mod workload;

mod input;
