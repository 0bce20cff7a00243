//! 页面与脚本资源抓取器
//! 单资源错误隔离：任一抓取失败仅记录日志并降级为空内容，
//! 不中断兄弟请求，也不中断整体扫描

use std::time::Duration;
use reqwest::Client;
use tokio::task::JoinSet;
use tracing::warn;

use crate::config::GlobalConfig;
use crate::error::RsdResult;

const USER_AGENT: &str = concat!("Rsdonns/", env!("CARGO_PKG_VERSION"));

/// 顶层页面响应
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub status: u16,
    /// Content-Type头（小写），缺失时为空串
    pub content_type: String,
    pub body: String,
}

/// 资源抓取器
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// 创建抓取器（超时受配置约束，默认跟随重定向）
    pub fn new(config: &GlobalConfig) -> RsdResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout))
            .build()?;

        Ok(Self { client })
    }

    /// 抓取顶层页面（含状态码与Content-Type，供内容类型门控）
    pub async fn fetch_response(&self, url: &str) -> RsdResult<PageResponse> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_lowercase();
        let body = response.text().await?;

        Ok(PageResponse {
            status,
            content_type,
            body,
        })
    }

    /// 抓取单个资源为文本
    ///
    /// 任何网络/超时/解码/非2xx错误均降级为空串返回，不向上传播。
    pub async fn fetch_text(&self, url: &str) -> String {
        match Self::fetch_with(&self.client, url).await {
            Ok(body) => body,
            Err(e) => {
                warn!("抓取失败，按空内容处理：{}，错误：{}", url, e);
                String::new()
            }
        }
    }

    /// 并发抓取一组资源（fan-out/fan-in）
    ///
    /// 所有请求同时发出，全部完成后统一返回；
    /// 单个失败不取消、不阻塞其余请求。
    /// 返回 (url, body) 列表，顺序为完成顺序，失败项body为空串。
    pub async fn fetch_all(&self, urls: Vec<String>) -> Vec<(String, String)> {
        let mut tasks = JoinSet::new();

        for url in urls {
            let client = self.client.clone();
            tasks.spawn(async move {
                let body = match Self::fetch_with(&client, &url).await {
                    Ok(body) => body,
                    Err(e) => {
                        warn!("抓取失败，按空内容处理：{}，错误：{}", url, e);
                        String::new()
                    }
                };
                (url, body)
            });
        }

        let mut results = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(pair) => results.push(pair),
                Err(e) => warn!("抓取任务异常退出：{}", e),
            }
        }

        results
    }

    async fn fetch_with(client: &Client, url: &str) -> RsdResult<String> {
        let response = client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigManager;

    #[tokio::test]
    async fn test_fetch_text_degrades_to_empty() {
        // 连接失败降级为空串，不向上传播
        let fetcher = PageFetcher::new(&ConfigManager::get_default()).unwrap();
        let body = fetcher.fetch_text("http://127.0.0.1:1/unreachable").await;
        assert_eq!(body, "");
    }

    #[tokio::test]
    async fn test_fetch_all_isolates_failures() {
        let fetcher = PageFetcher::new(&ConfigManager::get_default()).unwrap();
        let urls = vec![
            "http://127.0.0.1:1/a.js".to_string(),
            "http://127.0.0.1:1/b.js".to_string(),
        ];

        // 全部失败时仍返回全部条目（空内容），不panic
        let results = fetcher.fetch_all(urls).await;
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|(_, body)| body.is_empty()));
    }
}
