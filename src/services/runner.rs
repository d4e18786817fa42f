/*
 * Responsibility
 * - タスクごとに 1 スレッド (スレッド名 = タスク名) を起動し, 全て終わるまで待つ
 * - タスクの失敗 / panic はスレッド単位で捕まえて記録する (他のタスクは止めない)
 */
use std::any::Any;
use std::thread;
use tracing::{error, info, warn};

use super::console::LineSink;
use super::registry::TaskList;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Succeeded,
    Failed(String),
    Panicked(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    pub name: &'static str,
    pub status: TaskStatus,
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, TaskStatus::Succeeded)
    }
}

/// Runs every task on its own thread and waits for all of them.
///
/// Outcomes come back in task order. An empty list returns immediately
/// without spawning anything.
pub fn run_all(tasks: TaskList, sink: &dyn LineSink) -> Vec<TaskOutcome> {
    if tasks.is_empty() {
        return Vec::new();
    }

    let outcomes: Vec<TaskOutcome> = thread::scope(|scope| {
        let spawned: Vec<_> = tasks
            .iter()
            .map(|task| {
                let handle = thread::Builder::new()
                    .name(task.name().to_string())
                    .spawn_scoped(scope, move || task.run(sink));
                (task.name(), handle)
            })
            .collect();

        spawned
            .into_iter()
            .map(|(name, handle)| {
                let status = match handle {
                    Err(e) => TaskStatus::Failed(format!("failed to spawn thread: {e}")),
                    Ok(handle) => match handle.join() {
                        Ok(Ok(())) => TaskStatus::Succeeded,
                        Ok(Err(e)) => TaskStatus::Failed(e.to_string()),
                        Err(payload) => TaskStatus::Panicked(panic_message(payload.as_ref())),
                    },
                };
                TaskOutcome { name, status }
            })
            .collect()
    });

    for outcome in &outcomes {
        report(outcome, sink);
    }
    outcomes
}

fn report(outcome: &TaskOutcome, sink: &dyn LineSink) {
    let line = match &outcome.status {
        TaskStatus::Succeeded => {
            info!(task = outcome.name, "task finished");
            return;
        }
        TaskStatus::Failed(reason) => {
            warn!(task = outcome.name, error = %reason, "task failed");
            format!("[{}] failed: {reason}", outcome.name)
        }
        TaskStatus::Panicked(reason) => {
            error!(task = outcome.name, panic = %reason, "task panicked");
            format!("[{}] panicked: {reason}", outcome.name)
        }
    };

    if let Err(e) = sink.write_line(&line) {
        error!(task = outcome.name, error = %e, "failed to write task outcome");
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
