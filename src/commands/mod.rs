mod command_def;
mod handler;
mod router;

pub use command_def::Command;
pub use handler::{InputEnd, run_command_loop};
