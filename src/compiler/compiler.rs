//! 规则编译器核心
//! 将规则表编译为可执行的正则模式，启动时一次性完成

use std::time::Instant;
use regex::RegexBuilder;
use tracing::debug;

use super::pattern::{CompiledRule, CompiledRuleSet};
use crate::rule::table::RULE_TABLE;
use crate::error::{RsdResult, RsdonnsError};

/// 规则编译器
pub struct RuleCompiler;

impl RuleCompiler {
    /// 编译内置规则表
    ///
    /// 任一规则编译失败即返回错误（规则表为静态数据，
    /// 编译失败属启动期致命错误，不做跳过处理）。
    pub fn compile() -> RsdResult<CompiledRuleSet> {
        Self::compile_table(RULE_TABLE)
    }

    /// 编译指定规则表（测试可注入精简规则子集）
    pub fn compile_table(table: &[(&str, &str)]) -> RsdResult<CompiledRuleSet> {
        let start = Instant::now();
        let mut rules = Vec::with_capacity(table.len());

        for (label, pattern) in table {
            // 默认 10MB 编译尺寸上限不够容纳 (?i)\w{300,360} 类规则，放宽到 64MB
            let regex = RegexBuilder::new(pattern)
                .size_limit(64 << 20)
                .build()
                .map_err(|e| RsdonnsError::RuleCompileError {
                label: label.to_string(),
                source: e,
            })?;
            rules.push(CompiledRule {
                label: label.to_string(),
                regex,
            });
        }

        debug!(
            "规则编译完成，规则总数：{}，耗时{:?}",
            rules.len(),
            start.elapsed()
        );

        Ok(CompiledRuleSet { rules })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_full_table() {
        // 内置规则表必须全部可编译（失败即启动期致命错误）
        let rule_set = RuleCompiler::compile().expect("内置规则表编译失败");
        assert_eq!(rule_set.len(), RULE_TABLE.len());
        assert!(rule_set.len() > 150);
    }

    #[test]
    fn test_compile_keeps_table_order() {
        let rule_set = RuleCompiler::compile().unwrap();
        assert_eq!(rule_set.rules[0].label, "Google API Key");
        assert_eq!(
            rule_set.rules.last().unwrap().label,
            RULE_TABLE.last().unwrap().0
        );
    }

    #[test]
    fn test_compile_invalid_pattern_fails() {
        let table: &[(&str, &str)] = &[("Broken Rule", r"([unclosed")];
        let err = RuleCompiler::compile_table(table).unwrap_err();
        assert!(err.to_string().contains("Broken Rule"));
    }

    #[test]
    fn test_capture_group_detection() {
        let table: &[(&str, &str)] = &[
            ("Whole Match", r"AKIA[0-9A-Z]{16}"),
            ("Group Match", r"mailto:([a-z]+@[a-z.]+)"),
        ];
        let rule_set = RuleCompiler::compile_table(table).unwrap();
        assert!(!rule_set.rules[0].has_capture_group());
        assert!(rule_set.rules[1].has_capture_group());
    }
}
