//! 日志追踪、评估 ID 与规则指标。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 规则指标快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub evaluations: u64,
    pub skipped_disabled: u64,
    pub skipped_untracked: u64,
    pub rejected_invalid: u64,
    pub ignored_irrelevant: u64,
    pub connection_lost: u64,
    pub connection_restored: u64,
    pub no_status_change: u64,
    pub schema_imports: u64,
    pub schema_import_failures: u64,
}

/// 规则指标（进程级计数器）。
pub struct RuleMetrics {
    evaluations: AtomicU64,
    skipped_disabled: AtomicU64,
    skipped_untracked: AtomicU64,
    rejected_invalid: AtomicU64,
    ignored_irrelevant: AtomicU64,
    connection_lost: AtomicU64,
    connection_restored: AtomicU64,
    no_status_change: AtomicU64,
    schema_imports: AtomicU64,
    schema_import_failures: AtomicU64,
}

impl RuleMetrics {
    pub fn new() -> Self {
        Self {
            evaluations: AtomicU64::new(0),
            skipped_disabled: AtomicU64::new(0),
            skipped_untracked: AtomicU64::new(0),
            rejected_invalid: AtomicU64::new(0),
            ignored_irrelevant: AtomicU64::new(0),
            connection_lost: AtomicU64::new(0),
            connection_restored: AtomicU64::new(0),
            no_status_change: AtomicU64::new(0),
            schema_imports: AtomicU64::new(0),
            schema_import_failures: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            evaluations: self.evaluations.load(Ordering::Relaxed),
            skipped_disabled: self.skipped_disabled.load(Ordering::Relaxed),
            skipped_untracked: self.skipped_untracked.load(Ordering::Relaxed),
            rejected_invalid: self.rejected_invalid.load(Ordering::Relaxed),
            ignored_irrelevant: self.ignored_irrelevant.load(Ordering::Relaxed),
            connection_lost: self.connection_lost.load(Ordering::Relaxed),
            connection_restored: self.connection_restored.load(Ordering::Relaxed),
            no_status_change: self.no_status_change.load(Ordering::Relaxed),
            schema_imports: self.schema_imports.load(Ordering::Relaxed),
            schema_import_failures: self.schema_import_failures.load(Ordering::Relaxed),
        }
    }
}

impl Default for RuleMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<RuleMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static RuleMetrics {
    METRICS.get_or_init(RuleMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 evaluation_id。
pub fn new_evaluation_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 记录评估调用次数。
pub fn record_evaluation() {
    metrics().evaluations.fetch_add(1, Ordering::Relaxed);
}

/// 记录规则未启用导致的跳过。
pub fn record_skipped_disabled() {
    metrics().skipped_disabled.fetch_add(1, Ordering::Relaxed);
}

/// 记录未开启连接跟踪导致的跳过。
pub fn record_skipped_untracked() {
    metrics().skipped_untracked.fetch_add(1, Ordering::Relaxed);
}

/// 记录非法读数（JSON 错误、结构错误）。
pub fn record_rejected_invalid() {
    metrics().rejected_invalid.fetch_add(1, Ordering::Relaxed);
}

/// 记录无关读数（非跟踪资产、非南向事件）。
pub fn record_ignored_irrelevant() {
    metrics().ignored_irrelevant.fetch_add(1, Ordering::Relaxed);
}

pub fn record_connection_lost() {
    metrics().connection_lost.fetch_add(1, Ordering::Relaxed);
}

pub fn record_connection_restored() {
    metrics().connection_restored.fetch_add(1, Ordering::Relaxed);
}

/// 记录南向事件无相关状态变化。
pub fn record_no_status_change() {
    metrics().no_status_change.fetch_add(1, Ordering::Relaxed);
}

/// 记录点表导入结果。
pub fn record_schema_import(success: bool) {
    let metrics = metrics();
    metrics.schema_imports.fetch_add(1, Ordering::Relaxed);
    if !success {
        metrics
            .schema_import_failures
            .fetch_add(1, Ordering::Relaxed);
    }
}
