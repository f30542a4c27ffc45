use crate::{Result, State};
use clap::Parser;
use time::{Date, macros::format_description};

pub mod habits;
use habits::HabitCommands;
pub mod widget;
pub use widget::WidgetCommands;
mod completion;

#[derive(Debug, Parser)]
#[command(version, author)]
#[command(rename_all = "kebab")]
#[command(about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn execute(self, state: State) -> Result<()> {
        self.command.execute(state)
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self::parse()
    }
}

#[derive(Debug, Parser)]
pub enum Commands {
    #[command(subcommand)]
    Habits(HabitCommands),
    #[command(subcommand)]
    Widget(WidgetCommands),
}

pub trait ExecutableCommand {
    fn execute(self, state: State) -> Result<()>;
}

impl ExecutableCommand for Commands {
    fn execute(self, state: State) -> Result<()> {
        match self {
            Self::Habits(cmd) => cmd.execute(state),
            Self::Widget(cmd) => cmd.execute(state),
        }
    }
}

pub(crate) fn parse_date(value: &str) -> core::result::Result<Date, String> {
    Date::parse(value, format_description!("[year]-[month]-[day]")).map_err(|e| e.to_string())
}
