use super::{ExecutableCommand, completion, parse_date};
use crate::{
    Error, Result, State,
    habit::{HabitBuilder, HabitConfig},
};
use camino::Utf8PathBuf;
use clap::{Args, Subcommand};
use clap_complete::{ArgValueCompleter, PathCompleter};
use cli_table::{Cell, Table};
use notify_rust::Notification;
use std::{collections::BTreeMap, fs, io};
use time::Date;

#[derive(Debug, Subcommand)]
#[command(rename_all = "kebab")]
pub enum HabitCommands {
    /// Add a new habit.
    #[command(aliases=["a", "n", "new"])]
    Add(AddHabitCommand),
    /// Add a new habit or update it if the habit already exists.
    Upsert(UpsertHabitCommand),
    /// Update an existing habit.
    Update(UpdateHabitCommand),
    #[command(aliases = ["rm", "delete"])]
    /// Delete a habit.
    Remove(RemoveHabitCommand),
    /// Print a simple list of all habits.
    #[command(alias = "ls")]
    List,
    /// Get details about habit(s).
    Details(HabitDetailsCommand),
    /// Mark habit(s) as done for the day.
    #[command(aliases = ["c", "done"])]
    Complete(CompleteHabitCommand),
    /// Clear the done-for-the-day flag on habit(s).
    Reset(ResetHabitCommand),
    /// Pause habit(s) so the widget skips them.
    Pause(PauseHabitCommand),
    /// Resume paused habit(s).
    Resume(ResumeHabitCommand),
    /// Import habits from a file.
    Import(ImportHabitsCommand),
}

fn list_habits(state: State) -> Result<()> {
    let today = state.todays_date();
    let habits = state.habits();
    let table = if habits.is_empty() {
        vec![vec!["No Habits".cell()]].table()
    } else {
        habits
            .into_iter()
            .map(|h| {
                let featured = state.featured_slug() == Some(h.slug());
                vec![
                    h.slug().cell(),
                    h.habit().cell(),
                    h.status(today, featured).to_string().cell(),
                ]
            })
            .collect::<Vec<_>>()
            .table()
    };
    cli_table::print_stdout(table)?;
    Ok(())
}

impl ExecutableCommand for HabitCommands {
    fn execute(self, state: State) -> Result<()> {
        match self {
            Self::List => list_habits(state),
            Self::Add(cmd) => cmd.execute(state),
            Self::Upsert(cmd) => cmd.execute(state),
            Self::Update(cmd) => cmd.execute(state),
            Self::Details(cmd) => cmd.execute(state),
            Self::Remove(cmd) => cmd.execute(state),
            Self::Complete(cmd) => cmd.execute(state),
            Self::Reset(cmd) => cmd.execute(state),
            Self::Pause(cmd) => cmd.execute(state),
            Self::Resume(cmd) => cmd.execute(state),
            Self::Import(cmd) => cmd.execute(state),
        }
    }
}

macro_rules! impl_into_habit_builder {
    (
        $type:ident {
            required: ($($required:ident),*),
            optional: ($($optional:ident),*),
            copy: ($($copy:ident),*),
        }
    ) => {
        impl From<$type> for HabitBuilder {
            fn from(value: $type) -> Self {
                let mut builder = HabitBuilder::default();
                $(
                    builder.$required(value.$required);
                )*
                $(
                    if let Some(attr) = value.$copy {
                        builder.$copy(attr);
                    }
                )*
                $(
                    if let Some(attr) = value.$optional {
                        builder.$optional(attr);
                    }
                )*
                builder
            }
        }
    }
}

#[derive(Debug, Args)]
pub struct AddHabitCommand {
    #[arg(short, long)]
    /// The habit's slug/id.
    pub slug: Option<String>,
    #[arg(short, long)]
    /// How likely the habit is to be featured on the widget.
    pub weight: Option<f64>,
    #[arg(long = "tag")]
    /// Any tags to associate with the habit.
    pub tags: Vec<String>,
    #[arg(short, long)]
    /// A more detailed description of the habit.
    pub description: Option<String>,
    #[arg()]
    /// The habit's display name, as the widget shows it.
    pub habit: String,
}

impl_into_habit_builder! {
    AddHabitCommand {
        required: (habit, tags, description),
        optional: (slug),
        copy: (weight),
    }
}

impl ExecutableCommand for AddHabitCommand {
    fn execute(self, mut state: State) -> Result<()> {
        let habit = HabitBuilder::from(self).build()?;
        state.add_habit(habit)?;
        state.save()
    }
}

#[derive(Debug, Args)]
pub struct UpsertHabitCommand {
    #[arg(short, long)]
    /// How likely the habit is to be featured on the widget.
    pub weight: Option<f64>,
    #[arg(long = "tag")]
    /// Any tags to associate with the habit.
    pub tags: Vec<String>,
    #[arg(short, long)]
    /// A more detailed description of the habit.
    pub description: Option<String>,
    #[arg(long)]
    /// The habit's display name, as the widget shows it.
    pub habit: Option<String>,
    #[arg()]
    /// The habit's slug/id.
    pub slug: String,
}

impl_into_habit_builder! {
    UpsertHabitCommand {
        required: (slug, tags, description),
        optional: (habit),
        copy: (weight),
    }
}

impl ExecutableCommand for UpsertHabitCommand {
    fn execute(self, mut state: State) -> Result<()> {
        state.upsert_habit(HabitBuilder::from(self))?;
        state.save()
    }
}

#[derive(Debug, Args)]
pub struct UpdateHabitCommand {
    #[arg(short, long)]
    /// How likely the habit is to be featured on the widget.
    pub weight: Option<f64>,
    #[arg(long = "tag")]
    /// Any tags to associate with the habit.
    pub tags: Vec<String>,
    #[arg(short, long)]
    /// A more detailed description of the habit.
    pub description: Option<String>,
    #[arg(long)]
    /// The habit's display name, as the widget shows it.
    pub habit: Option<String>,
    /// The habit's slug/id.
    #[arg(add = ArgValueCompleter::new(completion::all_habits))]
    pub slug: String,
}

impl_into_habit_builder! {
    UpdateHabitCommand {
        required: (slug, tags, description),
        optional: (habit),
        copy: (weight),
    }
}

impl ExecutableCommand for UpdateHabitCommand {
    fn execute(self, state: State) -> Result<()> {
        state.update_habit(HabitBuilder::from(self))?;
        state.save()
    }
}

#[derive(Debug, Args)]
pub struct RemoveHabitCommand {
    #[arg(add = ArgValueCompleter::new(completion::all_habits))]
    /// The habit(s) to remove.
    pub habits: Vec<String>,
}

impl ExecutableCommand for RemoveHabitCommand {
    fn execute(self, mut state: State) -> Result<()> {
        println!("Removing {} habit(s).", self.habits.len());
        state.remove_habits(&self.habits)?;
        state.save()
    }
}

#[derive(Debug, Args)]
pub struct HabitDetailsCommand {
    #[arg(add = ArgValueCompleter::new(completion::all_habits))]
    /// The habit(s) to print the details for.
    pub habits: Vec<String>,
}

impl ExecutableCommand for HabitDetailsCommand {
    fn execute(self, state: State) -> Result<()> {
        let slugs = if self.habits.is_empty() {
            state.habit_slugs()
        } else {
            self.habits
        };
        let today = state.todays_date();
        let infos: BTreeMap<_, _> = slugs
            .into_iter()
            .map(|s| {
                state
                    .get_habit(&s)
                    .map(|h| h.info(today, state.featured_slug() == Some(h.slug())))
                    .ok_or_else(|| Error::habit_not_found(&s))
            })
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .map(|i| (i.slug.clone(), i))
            .collect();
        let stdout = io::stdout();
        serde_norway::to_writer(stdout, &infos)?;
        Ok(())
    }
}

/// Habits named on the command line, or the currently featured habit when
/// none are.
fn named_or_featured(habits: Vec<String>, state: &State) -> Result<Vec<String>> {
    if habits.is_empty() {
        match state.featured_slug() {
            Some(slug) => Ok(vec![String::from(slug)]),
            None => Err(Error::NoFeaturedHabit),
        }
    } else {
        Ok(habits)
    }
}

#[derive(Debug, Args)]
pub struct CompleteHabitCommand {
    #[arg(short, long)]
    /// Raise a desktop notification when every habit is done for the day.
    pub notify: bool,
    #[arg(add = ArgValueCompleter::new(completion::uncompleted_habits))]
    /// The habit(s) to mark done; defaults to the featured habit.
    pub habits: Vec<String>,
}

impl ExecutableCommand for CompleteHabitCommand {
    fn execute(self, state: State) -> Result<()> {
        let slugs = named_or_featured(self.habits, &state)?;
        state.complete_habits(&slugs)?;
        if self.notify && state.all_completed() {
            Notification::new()
                .summary("All habits done")
                .body("Every habit is checked off for today.")
                .show()?;
        }
        state.save()
    }
}

#[derive(Debug, Args)]
pub struct ResetHabitCommand {
    #[arg(add = ArgValueCompleter::new(completion::completed_habits))]
    /// The habit(s) to reset; defaults to the featured habit.
    pub habits: Vec<String>,
}

impl ExecutableCommand for ResetHabitCommand {
    fn execute(self, state: State) -> Result<()> {
        let slugs = named_or_featured(self.habits, &state)?;
        state.reset_habits(&slugs)?;
        state.save()
    }
}

#[derive(Debug, Args)]
pub struct PauseHabitCommand {
    #[arg(short, long, value_parser = parse_date)]
    /// Pause the habit(s) through a certain date (YYYY-MM-DD).
    pub until: Option<Date>,
    #[arg(add = ArgValueCompleter::new(completion::active_habits))]
    /// The habit(s) to pause.
    pub habits: Vec<String>,
}

impl ExecutableCommand for PauseHabitCommand {
    fn execute(self, state: State) -> Result<()> {
        state.pause_habits(&self.habits, self.until)?;
        state.save()
    }
}

#[derive(Debug, Args)]
pub struct ResumeHabitCommand {
    #[arg(add = ArgValueCompleter::new(completion::paused_habits))]
    /// The habit(s) to resume.
    pub habits: Vec<String>,
}

impl ExecutableCommand for ResumeHabitCommand {
    fn execute(self, state: State) -> Result<()> {
        state.resume_habits(&self.habits)?;
        state.save()
    }
}

#[derive(Debug, Args)]
pub struct ImportHabitsCommand {
    #[arg(short, long)]
    /// Update any habits that already exist.
    pub update: bool,
    #[arg(add = ArgValueCompleter::new(PathCompleter::file()))]
    /// The csv or yaml file to import habits from.
    pub file: Utf8PathBuf,
}

impl ExecutableCommand for ImportHabitsCommand {
    fn execute(self, mut state: State) -> Result<()> {
        println!("Reading file: {}", self.file);
        let habits: Vec<HabitConfig> = match self.file.extension() {
            Some("yml") | Some("yaml") => {
                let data = fs::read(&self.file)?;
                serde_norway::from_slice(&data)?
            }
            Some("csv") | Some("tsv") | Some("psv") => csv::Reader::from_path(&self.file)?
                .into_deserialize()
                .collect::<core::result::Result<Vec<_>, _>>()?,
            Some(ext) => return Err(Error::unsupported_file_type(ext)),
            None => return Err(Error::unsupported_file_type("No extension")),
        };
        println!("Importing {} habit(s).", habits.len());
        if self.update {
            state.upsert_configs(habits)?;
        } else {
            for habit in habits {
                if let Err(Error::HabitAlreadyExists { slug }) = state.add_habit(habit) {
                    println!("Habit {slug} already exists; skipping...");
                }
            }
        }
        println!("Imported habit(s).");
        state.save()?;
        Ok(())
    }
}
