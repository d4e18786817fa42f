/*
 * Responsibility
 * - 設定から実行するチェックインタスクの一覧を組み立てる
 * - 登録順は REGISTRY の宣言順で固定 (HashMap の走査順に依存しない)
 */
use crate::checkin::{AcfunTask, CheckinTask};
use crate::config::{Config, QD_ACFUN};

pub type TaskList = Vec<Box<dyn CheckinTask>>;

struct Registration {
    key: &'static str,
    build: fn(&str, &Config) -> Box<dyn CheckinTask>,
}

// Qd_Baidu is a known key but has no task yet.
const REGISTRY: &[Registration] = &[Registration {
    key: QD_ACFUN,
    build: build_acfun,
}];

fn build_acfun(raw: &str, config: &Config) -> Box<dyn CheckinTask> {
    Box::new(AcfunTask::new(raw, config.http_timeout))
}

/// Builds one task per registered service whose credential string is non-empty.
pub fn select_tasks(config: &Config) -> TaskList {
    REGISTRY
        .iter()
        .filter_map(|reg| {
            let raw = config.credentials.get(reg.key).filter(|v| !v.is_empty())?;
            Some((reg.build)(raw, config))
        })
        .collect()
}
