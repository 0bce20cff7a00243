//! 扫描器核心：驱动 抓取 → 提取 → 子资源抓取 → 匹配 → 汇总 流水线

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use super::fetcher::PageFetcher;
use super::matcher::SecretMatcher;
use crate::compiler::{CompiledRuleSet, RuleCompiler};
use crate::config::GlobalConfig;
use crate::error::RsdResult;
use crate::extractor::{OriginFilter, ScriptExtractor};
use crate::report::ScanReporter;
use crate::rule::ScanReport;

/// 顶层扫描视为HTML的Content-Type标识
const TEXT_HTML: &str = "text/html";

/// 敏感信息扫描器
///
/// 持有已访问URL集合（仅在本实例生命周期内累积），
/// 同一URL在一次运行内只做一次完整扫描。
#[derive(Debug)]
pub struct SecretScanner {
    rules: Arc<CompiledRuleSet>,
    fetcher: PageFetcher,
    // 并发执行多个种子时的插入-检查竞争由锁消除
    visited: Mutex<HashSet<String>>,
}

impl SecretScanner {
    /// 创建扫描器（编译内置规则表，失败即启动期错误）
    pub fn new(config: &GlobalConfig) -> RsdResult<Self> {
        let rules = RuleCompiler::compile()?;
        Self::with_rules(config, rules)
    }

    /// 以指定规则集创建扫描器（测试可注入精简规则子集）
    pub fn with_rules(config: &GlobalConfig, rules: CompiledRuleSet) -> RsdResult<Self> {
        Ok(Self {
            rules: Arc::new(rules),
            fetcher: PageFetcher::new(config)?,
            visited: Mutex::new(HashSet::new()),
        })
    }

    /// 对单个种子URL执行一次完整的抓取-扫描
    ///
    /// 流程：去重检查 → 抓取页面 → 内容类型门控 → 脚本提取与同源过滤 →
    /// 页面正文匹配 → 内联脚本匹配 → 同源外部脚本并发抓取与匹配。
    /// 单资源失败只影响该资源；本方法不向上传播错误，始终返回报告。
    /// 结果顺序：页面正文命中 → 内联脚本命中（文档顺序）→
    /// 外部脚本命中（抓取完成顺序，不保证与文档顺序一致）。
    pub async fn crawl_and_scan(&self, url: &str, reporter: &dyn ScanReporter) -> ScanReport {
        let mut report = ScanReport::new(url.to_string());

        // 1. 去重检查：已扫过的URL直接返回空报告（幂等）
        if !self.mark_visited(url) {
            debug!("URL已扫描过，跳过：{}", url);
            return report;
        }

        // 2. 抓取顶层页面（传输失败记录日志后返回空报告，不致命）
        let response = match self.fetcher.fetch_response(url).await {
            Ok(response) => response,
            Err(e) => {
                reporter.on_error(&format!("页面访问失败：{}", url), &e.to_string());
                return report;
            }
        };

        // 3. 内容类型门控：非HTML资源不做顶层扫描
        if !response.content_type.contains(TEXT_HTML) {
            reporter.on_skip(url, "非HTML内容");
            return report;
        }

        debug!("开始扫描 {}（状态码 {}）", url, response.status);

        // 4. 提取脚本引用并做同源过滤
        let extracted = ScriptExtractor::new().extract(&response.body);
        let script_urls = self.resolve_same_origin(url, &extracted.get_script_srcs(), reporter);

        // 5. 匹配页面正文（直接嵌在标记中的敏感信息）
        report.extend(SecretMatcher::scan(
            &self.rules,
            &response.body,
            url,
            None,
            reporter,
        ));

        // 6. 匹配内联脚本（文档顺序）
        for inline in extracted.get_inline_scripts() {
            report.extend(SecretMatcher::scan(&self.rules, &inline, url, None, reporter));
        }

        // 7. 并发抓取同源外部脚本并逐个匹配（单个失败不影响其余）
        let bodies = self.fetcher.fetch_all(script_urls.into_iter().collect()).await;
        for (script_url, body) in bodies {
            if body.is_empty() {
                continue;
            }
            report.extend(SecretMatcher::scan(
                &self.rules,
                &body,
                &script_url,
                Some(&script_url),
                reporter,
            ));
        }

        debug!("扫描完成：{}，命中 {} 条", url, report.findings.len());
        report
    }

    /// 标记URL为已访问；返回false表示本次运行内已访问过
    fn mark_visited(&self, url: &str) -> bool {
        self.visited
            .lock()
            .expect("visited锁中毒")
            .insert(url.to_string())
    }

    /// 解析script-src并保留同源URL；解析失败时降级为空集合
    fn resolve_same_origin(
        &self,
        base_url: &str,
        srcs: &[String],
        reporter: &dyn ScanReporter,
    ) -> HashSet<String> {
        let resolved = match OriginFilter::resolve(base_url, srcs) {
            Ok(resolved) => resolved,
            Err(e) => {
                reporter.on_error(&format!("脚本URL解析失败：{}", base_url), &e.to_string());
                return HashSet::new();
            }
        };

        match OriginFilter::filter_same_origin(base_url, &resolved) {
            Ok(same_origin) => {
                if resolved.len() > same_origin.len() {
                    warn!(
                        "已过滤 {} 个跨源脚本：{}",
                        resolved.len() - same_origin.len(),
                        base_url
                    );
                }
                same_origin
            }
            Err(e) => {
                reporter.on_error(&format!("同源过滤失败：{}", base_url), &e.to_string());
                HashSet::new()
            }
        }
    }
}
