//! 全局扫描器单例管理
use once_cell::sync::Lazy;
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::scanner::SecretScanner;
use crate::config::{ConfigManager, GlobalConfig};
use crate::error::{RsdResult, RsdonnsError};
use crate::report::ScanReporter;
use crate::rule::ScanReport;

/// 全局扫描器实例
static GLOBAL_SCANNER: Lazy<Arc<OnceCell<SecretScanner>>> = Lazy::new(|| {
    Arc::new(OnceCell::new())
});

/// 初始化全局扫描器（默认配置）
pub fn init_scanner() -> RsdResult<()> {
    init_scanner_with_config(ConfigManager::get_default())
}

/// 带自定义配置初始化全局扫描器
pub fn init_scanner_with_config(config: GlobalConfig) -> RsdResult<()> {
    if GLOBAL_SCANNER.get().is_some() {
        return Ok(());
    }

    let scanner = SecretScanner::new(&config)?;
    GLOBAL_SCANNER.set(scanner).map_err(|_| {
        RsdonnsError::ScannerNotInitialized
    })?;

    Ok(())
}

/// 获取全局扫描器
pub fn get_global_scanner() -> RsdResult<&'static SecretScanner> {
    GLOBAL_SCANNER.get()
        .ok_or(RsdonnsError::ScannerNotInitialized)
}

/// 对外暴露的简化接口：通过全局扫描器执行一次顶层扫描
pub async fn scan_url(url: &str, reporter: &dyn ScanReporter) -> RsdResult<ScanReport> {
    let scanner = get_global_scanner()?;
    Ok(scanner.crawl_and_scan(url, reporter).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_scanner_idempotent() {
        // 重复初始化应保持成功（首次之后为空操作）
        init_scanner().unwrap();
        init_scanner().unwrap();
        assert!(get_global_scanner().is_ok());
    }
}
