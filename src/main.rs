use clap::CommandFactory;
use clap_complete::CompleteEnv;
use habit_widget::{Cli, Result, State};

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    CompleteEnv::with_factory(Cli::command).complete();
    pretty_env_logger::init();
    color_backtrace::install();
    let cli = Cli::default();
    let state = State::load()?;
    cli.execute(state)?;
    Ok(())
}
