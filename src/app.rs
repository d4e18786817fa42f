/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config読み込み → AppState 生成 → タスク選択 → Runner 実行
 */
use anyhow::Result;
use std::{panic, sync::Arc, thread};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::runner::TaskOutcome;
use crate::services::{ConsoleSink, run_all, select_tasks};
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // stdout is reserved for task status lines.
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn init_panic_hook() {
    // Panics inside a task are caught by the runner; surface them via tracing
    // instead of letting the default hook print outside the log stream.
    panic::set_hook(Box::new(|info| {
        let thread = thread::current();
        tracing::error!(thread = thread.name().unwrap_or("<unnamed>"), %info, "panic");
    }));
}

pub fn run() -> Result<()> {
    init_tracing();
    init_panic_hook();

    let config = Config::from_env()?;
    tracing::debug!(
        services = ?config.credentials.keys().collect::<Vec<_>>(),
        timeout = ?config.http_timeout,
        "configuration loaded"
    );

    let state = AppState::new(config, Arc::new(ConsoleSink::stdout()));
    let outcomes = checkin(&state);

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    tracing::info!(tasks = outcomes.len(), failed, "check-in run finished");
    Ok(())
}

/// Selects the configured tasks and runs them to completion.
pub fn checkin(state: &AppState) -> Vec<TaskOutcome> {
    let tasks = select_tasks(&state.config);
    if tasks.is_empty() {
        tracing::info!("no check-in tasks configured");
        return Vec::new();
    }

    tracing::info!(tasks = tasks.len(), "starting check-in tasks");
    run_all(tasks, state.sink.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigStore, QD_ACFUN};
    use crate::services::LineSink;
    use crate::services::runner::TaskStatus;
    use std::time::Duration;

    fn state_with(lookup: impl Fn(&str) -> Option<String>) -> (AppState, Arc<ConsoleSink<Vec<u8>>>) {
        let sink = Arc::new(ConsoleSink::new(Vec::new()));
        let config = Config {
            credentials: ConfigStore::load_from(lookup),
            http_timeout: Duration::from_secs(1),
        };
        let shared: Arc<dyn LineSink> = sink.clone();
        (AppState::new(config, shared), sink)
    }

    #[test]
    fn unset_credentials_run_nothing() {
        let (state, sink) = state_with(|_| None);
        assert!(checkin(&state).is_empty());
        drop(state);
        let sink = Arc::into_inner(sink).unwrap();
        assert!(sink.into_inner().is_empty());
    }

    #[test]
    fn malformed_credentials_fail_the_task_and_are_reported() {
        let (state, sink) = state_with(|key| (key == QD_ACFUN).then(|| "alice".to_string()));
        let outcomes = checkin(&state);

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].name, "acfun");
        assert!(matches!(&outcomes[0].status, TaskStatus::Failed(reason) if reason.contains("#1")));

        drop(state);
        let text = String::from_utf8(Arc::into_inner(sink).unwrap().into_inner()).unwrap();
        assert!(text.starts_with("[acfun] failed: malformed credential entry #1"));
    }
}
