//! 扫描结果数据模型定义
//! 仅存储数据，无任何业务逻辑，支持序列化

use std::fmt;
use serde::{Deserialize, Serialize};

/// 单条命中结果：一条规则在某个资源文本上的全部匹配
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// 规则名称（如 "Google API Key"）
    pub rule_label: String,
    /// 命中资源的URL（页面或脚本文件）
    pub source_url: String,
    /// 按出现顺序排列的匹配内容，至少包含一项
    pub matched_values: Vec<String>,
}

impl Finding {
    pub fn new(rule_label: String, source_url: String, matched_values: Vec<String>) -> Self {
        Self {
            rule_label,
            source_url,
            matched_values,
        }
    }
}

// ======== 为 Finding 实现 Display trait（用于 CLI / 结果文件输出） ========
// 输出格式与结果文件行格式保持一致
impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} found in {}: {:?}",
            self.rule_label, self.source_url, self.matched_values
        )
    }
}

/// 单次顶层扫描的完整报告
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanReport {
    /// 本次扫描的种子URL
    pub seed_url: String,
    /// 按产生顺序排列的命中结果
    pub findings: Vec<Finding>,
}

impl ScanReport {
    /// 创建空报告
    pub fn new(seed_url: String) -> Self {
        Self {
            seed_url,
            findings: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// 追加一批命中结果
    ///
    /// 完全相同的命中（规则、资源、匹配内容均一致）仅保留首次：
    /// 内联脚本文本同时存在于页面正文中，两次匹配会产生重复条目。
    /// 实时上报不受此去重影响。
    pub fn extend(&mut self, findings: Vec<Finding>) {
        for finding in findings {
            if !self.findings.contains(&finding) {
                self.findings.push(finding);
            }
        }
    }

    /// 生成结果文件摘要行（每条命中一行）
    pub fn summary_lines(&self) -> Vec<String> {
        self.findings.iter().map(|f| f.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finding_display() {
        let finding = Finding::new(
            "Google API Key".to_string(),
            "https://example.com".to_string(),
            vec!["AIzaXXX".to_string()],
        );
        assert_eq!(
            finding.to_string(),
            r#"Google API Key found in https://example.com: ["AIzaXXX"]"#
        );
    }

    #[test]
    fn test_report_summary_lines() {
        let mut report = ScanReport::new("https://example.com".to_string());
        assert!(report.is_empty());

        report.extend(vec![Finding::new(
            "JWT Token".to_string(),
            "https://example.com/app.js".to_string(),
            vec!["eyJhbGciOiJIUzI1NiJ9.e30.x".to_string()],
        )]);

        assert_eq!(report.summary_lines().len(), 1);
        assert!(report.summary_lines()[0].starts_with("JWT Token found in"));
    }

    #[test]
    fn test_extend_dedupes_identical_findings() {
        let finding = Finding::new(
            "Google API Key".to_string(),
            "https://example.com".to_string(),
            vec!["AIzaXXX".to_string()],
        );

        let mut report = ScanReport::new("https://example.com".to_string());
        report.extend(vec![finding.clone()]);
        report.extend(vec![finding]);

        assert_eq!(report.findings.len(), 1);
    }
}
