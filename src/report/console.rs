//! 实时报告接口
//! 命中结果产生时立即上报，与最终汇总报告相互独立

use tracing::error;

use crate::rule::Finding;

/// 扫描过程报告接口
///
/// 上报时机：每条Finding产生时、资源跳过时、错误发生时。
pub trait ScanReporter: Send + Sync {
    /// 命中上报（script_url：命中发生在脚本文件中时为该脚本URL）
    fn on_finding(&self, finding: &Finding, script_url: Option<&str>);

    /// 资源跳过上报
    fn on_skip(&self, url: &str, reason: &str);

    /// 错误上报（默认写入日志）
    fn on_error(&self, message: &str, detail: &str) {
        error!("{}。详情：{}", message, detail);
    }
}

/// 控制台报告器（交互模式实时输出）
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

impl ScanReporter for ConsoleReporter {
    fn on_finding(&self, finding: &Finding, script_url: Option<&str>) {
        println!(
            "\n[+] {} found in {}",
            finding.rule_label, finding.source_url
        );
        if let Some(js) = script_url {
            println!("    发现于脚本文件：{}", js);
        }
        println!("    匹配内容：{:?}\n", finding.matched_values);
    }

    fn on_skip(&self, url: &str, reason: &str) {
        println!("已跳过 {}（{}）", url, reason);
    }
}

/// 静默报告器（库调用方/测试使用）
#[derive(Debug, Default)]
pub struct NullReporter;

impl NullReporter {
    pub fn new() -> Self {
        Self
    }
}

impl ScanReporter for NullReporter {
    fn on_finding(&self, _finding: &Finding, _script_url: Option<&str>) {}

    fn on_skip(&self, _url: &str, _reason: &str) {}
}
