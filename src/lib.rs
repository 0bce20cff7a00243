//! rsdonns - 网页敏感信息扫描器
//! 抓取页面及同源脚本资源，基于内置规则库检测泄露的API Key、Token等敏感凭据

// 导出全局错误类型
pub use self::error::{RsdonnsError, RsdResult};

// 导出配置模块
pub use self::config::{GlobalConfig, ConfigManager, CustomConfigBuilder};

// 导出规则模块核心接口
pub use self::rule::{Finding, ScanReport, RULE_TABLE};

// 导出编译模块核心接口
pub use self::compiler::{CompiledRule, CompiledRuleSet, RuleCompiler};

// 导出提取模块核心接口
pub use self::extractor::{ScriptExtractor, OriginFilter};

// 导出扫描模块核心接口
pub use self::scanner::{
    SecretScanner,
    SecretMatcher,
    PageFetcher,
    PageResponse,
    init_scanner,
    init_scanner_with_config,
    scan_url,
};

// 导出报告模块核心接口
pub use self::report::{ScanReporter, ConsoleReporter, NullReporter, ResultWriter};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod rule;
pub mod compiler;
pub mod extractor;
pub mod scanner;
pub mod report;
