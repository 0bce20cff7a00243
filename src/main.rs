use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::error;

use rsdonns::{
    scan_url, init_scanner_with_config, ConfigManager, ConsoleReporter, GlobalConfig,
    ResultWriter, ScanReporter,
};

const BANNER: &str = r#"
        ██████╗  ██████╗ ███╗   ██╗███╗   ██╗███████╗
        ██╔══██╗██╔═══██╗████╗  ██║████╗  ██║██╔════╝
        ██║  ██║██║   ██║██╔██╗ ██║██╔██╗ ██║███████╗
        ██║  ██║██║   ██║██║╚██╗██║██║╚██╗██║╚════██║
        ██████╔╝╚██████╔╝██║ ╚████║██║ ╚████║███████║
        ╚═════╝  ╚═════╝ ╚═╝  ╚═══╝╚═╝  ╚═══╝╚══════╝
"#;

/// 命令行入口（基于 clap；不带参数时进入交互模式）
#[derive(Parser, Debug)]
#[command(name = "rsdonns", version, about = "网页敏感信息扫描器：检测页面及同源脚本中泄露的API Key、Token等凭据")]
struct Cli {
    /// 扫描单个URL
    #[arg(long, conflicts_with = "list")]
    url: Option<String>,

    /// 从文本文件读取URL列表（每行一个），逐个扫描
    #[arg(long)]
    list: Option<PathBuf>,

    /// 结果文件输出目录
    #[arg(long, default_value = "scan_results")]
    output: PathBuf,

    /// HTTP请求超时（单位：秒）
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// 同时输出JSON格式结果文件
    #[arg(long)]
    json: bool,

    /// 启用详细日志
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = ConfigManager::custom()
        .output_dir(cli.output.clone())
        .http_timeout(cli.timeout)
        .json_output(cli.json)
        .verbose(cli.verbose)
        .build();

    // 规则编译失败属启动期致命错误，直接退出
    init_scanner_with_config(config.clone()).context("扫描器初始化失败")?;

    let reporter = ConsoleReporter::new();

    if let Some(url) = cli.url {
        scan_one(&url, &config, &reporter).await;
        scan_complete_message();
        return Ok(());
    }

    if let Some(list_path) = cli.list {
        scan_list(&list_path, &config, &reporter).await?;
        scan_complete_message();
        return Ok(());
    }

    // 无参数：进入交互模式
    interactive(&config, &reporter).await
}

/// 交互模式：单URL（S）或URL列表文件（L）
async fn interactive(config: &GlobalConfig, reporter: &dyn ScanReporter) -> Result<()> {
    welcome_message();

    let mode = prompt("扫描单个网站（S）还是从文件读取网站列表（L）？ ")?.to_uppercase();
    match mode.as_str() {
        "S" => {
            let url = prompt("请输入要扫描的URL： ")?;
            scan_one(&url, config, reporter).await;
            scan_complete_message();
        }
        "L" => {
            let path = prompt("请输入网站列表文件路径： ")?;
            scan_list(&PathBuf::from(path), config, reporter).await?;
            scan_complete_message();
        }
        _ => {
            println!("无效模式。单个网站请输入 'S'，网站列表请输入 'L'。");
        }
    }

    Ok(())
}

/// 扫描单个种子URL并持久化结果
///
/// 每个种子独立包裹：持久化失败只记录日志，不中断后续种子。
async fn scan_one(url: &str, config: &GlobalConfig, reporter: &dyn ScanReporter) {
    println!("\n正在扫描 {} ...\n", url);

    let report = match scan_url(url, reporter).await {
        Ok(report) => report,
        Err(e) => {
            error!("扫描失败：{}，错误：{}", url, e);
            return;
        }
    };

    match ResultWriter::save(&report, &config.output_dir) {
        Ok(path) => println!("结果已保存到 {}", path.display()),
        Err(e) => error!("结果保存失败：{}", e),
    }

    if config.json_output {
        if let Err(e) = ResultWriter::save_json(&report, &config.output_dir) {
            error!("JSON结果保存失败：{}", e);
        }
    }
}

/// 逐行读取列表文件并顺序扫描（每行一个URL，空行跳过）
async fn scan_list(path: &PathBuf, config: &GlobalConfig, reporter: &dyn ScanReporter) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("读取列表文件失败：{}", path.display()))?;

    for line in content.lines() {
        let url = line.trim();
        if url.is_empty() {
            continue;
        }
        scan_one(url, config, reporter).await;
    }

    Ok(())
}

fn welcome_message() {
    println!("{}", BANNER);
    println!("欢迎使用敏感信息扫描器！\n");
    println!("本工具扫描页面及其JavaScript文件中的敏感信息，");
    println!("可发现嵌在代码中的API Key、凭据等机密数据。\n");
}

fn scan_complete_message() {
    println!("\n扫描完成！感谢使用。");
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input).context("读取输入失败")?;
    Ok(input.trim().to_string())
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 支持通过环境变量 RUST_LOG 控制日志等级，如：RUST_LOG=debug
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(env_filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
