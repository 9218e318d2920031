use anyhow::Result;
use colored::Colorize;
use deploy_common::{all_steps, DeployRunner, DeployStep};
use prettytable::{row, Table};

pub fn handle_list_steps() -> Result<()> {
    let runner = DeployRunner::with_steps(all_steps())?;

    let mut table = Table::new();
    table.add_row(row![
        "Step".purple().bold(),
        "Tags".blue().bold(),
        "Depends on".green().bold(),
    ]);
    for step in runner.steps() {
        table.add_row(row![
            step.name(),
            step.tags().join(", "),
            step.dependencies().join(", "),
        ]);
    }
    table.printstd();
    Ok(())
}
