mod config_cmd;
mod event;

pub use config_cmd::ConfigCommand;
pub use event::EventCommand;
