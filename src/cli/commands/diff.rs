//! Diff command implementation

use anyhow::Result;
use colored::Colorize;

use crate::cli::Context;
use crate::writer::Modification;

/// Print the modifications a save would apply, per file.
///
/// A freshly loaded session has nothing pending, so this doubles as a
/// check that parsing and regeneration agree on the current files.
pub fn execute(ctx: &Context) -> Result<()> {
    let session = ctx.load_session()?;
    let plan = session.plan();

    if plan.is_empty() {
        ctx.print_success("No pending changes");
        return Ok(());
    }

    for (file, modifications) in &plan {
        println!("{}", file.bold());
        for modification in modifications {
            let line = modification.to_string();
            let colored = match modification {
                Modification::UpdateLine(..) => line.yellow(),
                Modification::InsertAfter(..) | Modification::AppendLine(_) => line.green(),
                Modification::DeleteLine(_) => line.red(),
            };
            println!("  {}", colored);
        }
    }

    Ok(())
}
