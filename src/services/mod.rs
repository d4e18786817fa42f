pub mod console;
pub mod credentials;
pub mod registry;
pub mod runner;

pub use console::{ConsoleSink, LineSink};
pub use registry::select_tasks;
pub use runner::run_all;
