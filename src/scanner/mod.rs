//! 扫描模块：抓取-提取-匹配流水线核心逻辑
pub mod global;
pub mod fetcher;
pub mod matcher;
pub mod scanner;

// 导出核心接口
pub use self::global::{init_scanner, init_scanner_with_config, scan_url};
pub use self::fetcher::{PageFetcher, PageResponse};
pub use self::matcher::SecretMatcher;
pub use self::scanner::SecretScanner;
