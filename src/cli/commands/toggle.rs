//! Enable/disable command implementation

use anyhow::Result;
use colored::Colorize;

use crate::cli::Context;

/// Comment out (`enabled == false`) or uncomment an alias.
pub fn execute(ctx: &Context, name: &str, enabled: bool) -> Result<()> {
    let mut session = ctx.load_session()?;
    let verb = if enabled { "Enabled" } else { "Disabled" };

    if !session.aliases.iter().any(|a| a.name == name) {
        ctx.print_error(&format!("Alias '{}' not found", name));
        return Ok(());
    }

    let Some(alias) = session
        .aliases
        .iter_mut()
        .find(|a| a.name == name && a.enabled != enabled)
    else {
        println!("Alias '{}' is already {}.", name.cyan(), verb.to_lowercase());
        return Ok(());
    };
    alias.enabled = enabled;

    ctx.save(&mut session)?;
    ctx.print_success(&format!("{} alias '{}'", verb, name.cyan()));
    Ok(())
}
