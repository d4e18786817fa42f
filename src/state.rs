/*
 * Responsibility
 * - 実行全体で共有するコンテキスト (AppState)
 *   - config: 読み込み後は不変, sink: 全タスク共通の出力先
 * - Clone 前提で持つ (内部は Arc で cheap)
 */
use std::sync::Arc;

use crate::config::Config;
use crate::services::LineSink;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sink: Arc<dyn LineSink>,
}

impl AppState {
    pub fn new(config: Config, sink: Arc<dyn LineSink>) -> Self {
        Self {
            config: Arc::new(config),
            sink,
        }
    }
}
