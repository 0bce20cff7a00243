//! 编译模块：将规则表编译为可执行的正则模式
pub mod pattern;
pub mod compiler;

pub use self::pattern::{CompiledRule, CompiledRuleSet};
pub use self::compiler::RuleCompiler;
