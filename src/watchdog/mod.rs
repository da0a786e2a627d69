pub mod backup;
pub mod supervisor;

pub use crate::watchdog::backup::run_backups;
pub use crate::watchdog::supervisor::supervise;
