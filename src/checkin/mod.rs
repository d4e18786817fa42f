/*
 * Responsibility
 * - サービスごとのチェックイン処理の共通インターフェース
 * - Runner はこの trait だけを知っていれば良い (中身はサービス側に閉じ込める)
 */
pub mod acfun;

pub use acfun::AcfunTask;

use crate::error::CheckinError;
use crate::services::console::LineSink;

/// One service's daily check-in for all of its configured accounts.
///
/// Tasks run on their own thread, so they must be shareable across threads.
pub trait CheckinTask: Send + Sync {
    // Name used for the worker thread and in logs.
    fn name(&self) -> &'static str;

    // Run the whole check-in, writing status lines to `sink`.
    fn run(&self, sink: &dyn LineSink) -> Result<(), CheckinError>;
}
