/*
 * Responsibility
 * - app::run() の呼び出し（ロジックは置かない）
 */
use anyhow::Result;

mod app;
mod checkin;
mod config;
mod error;
mod services;
mod state;

fn main() -> Result<()> {
    app::run()
}
