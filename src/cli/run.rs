use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{init::init, list::list, sync},
    exit_status::ExitStatus,
};

/// Dispatch to the handler of the parsed command.
pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Init) => init(),
        Some(Command::List(cmd)) => list(cmd),
        Some(Command::Upload(cmd)) => sync::upload(cmd),
        Some(Command::Update(cmd)) => sync::update(cmd),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
