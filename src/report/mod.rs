//! 报告模块：实时上报接口与结果持久化
pub mod console;
pub mod persist;

pub use self::console::{ConsoleReporter, NullReporter, ScanReporter};
pub use self::persist::ResultWriter;
