//! 规则模块：内置规则表与结果数据模型定义
pub mod model;
pub mod table;

// 导出核心接口
pub use self::model::{Finding, ScanReport};
pub use self::table::RULE_TABLE;
