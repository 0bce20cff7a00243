//! 脚本URL解析与同源过滤
//! 相对引用基于页面URL补全；同源判定以 host[:port] 精确相等为准

use std::collections::HashSet;
use tracing::warn;
use url::Url;

use crate::error::RsdResult;

/// 同源过滤器
pub struct OriginFilter;

impl OriginFilter {
    /// 将script-src列表解析为绝对URL集合
    ///
    /// 相对引用与base_url合并，绝对引用原样保留；
    /// 单条解析失败仅跳过该条，不影响其余。
    pub fn resolve(base_url: &str, srcs: &[String]) -> RsdResult<HashSet<String>> {
        let base = Url::parse(base_url)?;
        let mut resolved = HashSet::new();

        for src in srcs {
            match base.join(src) {
                Ok(url) => {
                    resolved.insert(url.to_string());
                }
                Err(e) => {
                    warn!("脚本URL解析失败，已跳过：{}，错误：{}", src, e);
                }
            }
        }

        Ok(resolved)
    }

    /// 仅保留与base_url同源（host[:port]相等）的URL
    pub fn filter_same_origin(base_url: &str, urls: &HashSet<String>) -> RsdResult<HashSet<String>> {
        let base = Url::parse(base_url)?;
        let base_origin = Self::net_location(&base);

        let same_origin = urls
            .iter()
            .filter(|u| match Url::parse(u) {
                Ok(parsed) => Self::net_location(&parsed) == base_origin,
                Err(_) => false,
            })
            .cloned()
            .collect();

        Ok(same_origin)
    }

    /// 提取网络位置标识（host[:port]，端口含协议默认端口归一化）
    fn net_location(url: &Url) -> (String, Option<u16>) {
        (
            url.host_str().unwrap_or_default().to_string(),
            url.port_or_known_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_and_absolute() {
        let srcs = vec![
            "/a.js".to_string(),
            "assets/b.js".to_string(),
            "https://cdn.other.com/x.js".to_string(),
        ];
        let resolved = OriginFilter::resolve("https://example.com/page/index.html", &srcs).unwrap();

        assert!(resolved.contains("https://example.com/a.js"));
        assert!(resolved.contains("https://example.com/page/assets/b.js"));
        assert!(resolved.contains("https://cdn.other.com/x.js"));
    }

    #[test]
    fn test_filter_same_origin() {
        let urls: HashSet<String> = [
            "https://example.com/app.js".to_string(),
            "https://cdn.other.com/x.js".to_string(),
        ]
        .into_iter()
        .collect();

        let same = OriginFilter::filter_same_origin("https://example.com/a", &urls).unwrap();
        assert_eq!(same.len(), 1);
        assert!(same.contains("https://example.com/app.js"));
    }

    #[test]
    fn test_filter_port_mismatch() {
        let urls: HashSet<String> = [
            "https://example.com:8443/app.js".to_string(),
            "https://example.com/main.js".to_string(),
        ]
        .into_iter()
        .collect();

        let same = OriginFilter::filter_same_origin("https://example.com/", &urls).unwrap();
        assert_eq!(same.len(), 1);
        assert!(same.contains("https://example.com/main.js"));
    }

    #[test]
    fn test_default_port_normalized() {
        // 显式443端口与默认端口视为同源
        let urls: HashSet<String> = ["https://example.com:443/app.js".to_string()]
            .into_iter()
            .collect();

        let same = OriginFilter::filter_same_origin("https://example.com/", &urls).unwrap();
        assert_eq!(same.len(), 1);
    }
}
