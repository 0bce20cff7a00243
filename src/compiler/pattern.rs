//! 编译后规则模型
//! 正则编译后的结构

use regex::Regex;

/// 编译后的单条规则
#[derive(Debug, Clone)]
pub struct CompiledRule {
    /// 规则名称
    pub label: String,
    /// 预编译正则
    pub regex: Regex,
}

impl CompiledRule {
    /// 是否提取捕获组内容（规则含捕获组时取第1组，否则取整体匹配）
    pub fn has_capture_group(&self) -> bool {
        self.regex.captures_len() > 1
    }
}

/// 编译后的规则集（保持规则表顺序）
#[derive(Debug, Clone, Default)]
pub struct CompiledRuleSet {
    pub rules: Vec<CompiledRule>,
}

impl CompiledRuleSet {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
