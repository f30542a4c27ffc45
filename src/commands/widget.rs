use super::ExecutableCommand;
use crate::{
    CACHE_DIR, Error, HISTORY_FILE_PATH, Result, State, WIDGET_FILE_PATH, picker,
    snapshot::HabitSnapshot,
};
use clap::{Args, Parser};
use file_rotate::{ContentLimit, FileRotate, compression::Compression, suffix::AppendCount};
use notify_rust::Notification;
use serde_jsonlines::JsonLinesWriter;
use std::fs::{self, DirBuilder};

#[derive(Debug, Parser)]
#[command(rename_all = "kebab")]
pub enum WidgetCommands {
    /// Pick the day's habit if needed and write the widget handoff file.
    Render(RenderWidgetCommand),
    /// Print the current widget document without touching the handoff file.
    Show(ShowWidgetCommand),
}

impl ExecutableCommand for WidgetCommands {
    fn execute(self, state: State) -> Result<()> {
        match self {
            Self::Render(cmd) => cmd.execute(state),
            Self::Show(cmd) => cmd.execute(state),
        }
    }
}

/// Every rendered document is also appended to a rotated json-lines feed so
/// the widget host (or the curious) can read back what was shown.
fn append_history(snapshot: &HabitSnapshot) -> Result<()> {
    let rotate = FileRotate::new(
        HISTORY_FILE_PATH.as_std_path(),
        AppendCount::new(3),
        ContentLimit::Lines(10_000),
        Compression::None,
        #[cfg(unix)]
        None,
    );
    let mut writer = JsonLinesWriter::new(rotate);
    writer.write(snapshot)?;
    writer.flush()?;
    Ok(())
}

#[derive(Debug, Args)]
pub struct RenderWidgetCommand {
    #[arg(short, long)]
    /// Raise a desktop notification when the featured habit is already done.
    pub notify: bool,
}

impl ExecutableCommand for RenderWidgetCommand {
    fn execute(self, mut state: State) -> Result<()> {
        picker::ensure_featured(&mut state)?;
        state.save()?;
        let habit = state.featured().ok_or(Error::NoFeaturedHabit)?;
        let snapshot = habit.snapshot();
        let document = snapshot.encode()?;
        DirBuilder::new().recursive(true).create(&*CACHE_DIR)?;
        fs::write(&*WIDGET_FILE_PATH, &document)?;
        append_history(&snapshot)?;
        log::info!(
            "rendered widget snapshot for {} to {}",
            habit.slug(),
            &*WIDGET_FILE_PATH
        );
        if self.notify && snapshot.completed() {
            Notification::new()
                .summary("Habit done")
                .body(&format!("{} is already checked off for today.", snapshot.name()))
                .show()?;
        }
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct ShowWidgetCommand {}

impl ExecutableCommand for ShowWidgetCommand {
    fn execute(self, state: State) -> Result<()> {
        let habit = state.featured().ok_or(Error::NoFeaturedHabit)?;
        println!("{}", habit.snapshot().encode()?);
        Ok(())
    }
}
