//! 提取模块：HTML脚本提取与URL同源处理
pub mod script_extractor;
pub mod origin;

pub use self::script_extractor::ScriptExtractor;
pub use self::origin::OriginFilter;
