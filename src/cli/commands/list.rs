use std::io;

use anyhow::Result;

use super::super::{args::ListCommand, exit_status::ExitStatus, report};
use super::context::SelectContext;
use crate::fs::OsFileSystem;

pub fn list(cmd: ListCommand) -> Result<ExitStatus> {
    let context = SelectContext::new(&cmd.args)?;
    let set = context.select(&OsFileSystem)?.into_file_set();

    report::print_selection_to(&set, context.verbose, &mut io::stdout().lock());

    Ok(ExitStatus::Success)
}
