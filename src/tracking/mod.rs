pub mod fixes;
pub mod monitor;

pub use fixes::{FixParseError, fixes, parse_fix, read_fixes};
pub use monitor::{FenceMonitor, Observation, Transition};
