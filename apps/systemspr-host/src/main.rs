//! 规则宿主演示程序：加载配置分类，逐行评估资产读数并输出判定结果。

use serde_json::{Value, json};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use systemspr_config::{ConfigDelta, HostConfig};
use systemspr_rule::{ConnectionRule, NotificationRule, plugin_info};
use systemspr_telemetry::{init_tracing, metrics, new_evaluation_id};
use tracing::{info, info_span};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = HostConfig::from_env()?;
    // 初始化结构化日志
    init_tracing();

    let descriptor = plugin_info();
    info!(name = descriptor.name, version = descriptor.version, "notification rule loaded");

    let rule = build_rule(&config)?;
    info!(
        enabled = rule.is_enabled(),
        tracking = rule.has_connection_loss_tracking(),
        triggers = %rule.get_triggers(),
        "rule configured"
    );

    // 读数来源：文件或 stdin，每行一个 JSON 文档
    let input: Box<dyn BufRead> = match &config.readings_path {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let mut out = io::stdout().lock();
    for line in input.lines() {
        let line = line?;
        let reading = line.trim();
        if reading.is_empty() {
            continue;
        }
        let span = info_span!("evaluate", evaluation_id = %new_evaluation_id());
        let _guard = span.enter();
        writeln!(out, "{}", evaluate_line(&rule, reading))?;
    }

    let snapshot = metrics().snapshot();
    info!(?snapshot, "readings exhausted");
    Ok(())
}

/// 默认配置 → 配置文件 → 强制启用。
fn build_rule(config: &HostConfig) -> Result<ConnectionRule, Box<dyn std::error::Error>> {
    let rule = ConnectionRule::from_delta(&ConfigDelta::defaults());
    if let Some(path) = &config.config_path {
        let category = std::fs::read_to_string(path)?;
        rule.reconfigure_json(&category)?;
    }
    if config.force_enable {
        rule.reconfigure(&ConfigDelta::default().with_enable(true));
    }
    Ok(rule)
}

fn evaluate_line(rule: &dyn NotificationRule, reading: &str) -> Value {
    let matched = rule.eval(reading);
    let reason = rule.reason();
    let reason = if reason.is_empty() {
        Value::Null
    } else {
        match serde_json::from_str::<Value>(&reason) {
            Ok(parsed) => parsed,
            Err(_) => Value::String(reason),
        }
    };
    json!({ "matched": matched, "reason": reason })
}
