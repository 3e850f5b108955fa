//! CLI command listing the built-in bots.

use super::CliError;
use skirmish::bots::BUILTIN_BOTS;

/// Execute the `bots` command.
pub(crate) fn execute() -> Result<(), CliError> {
    println!("Built-in bots:");
    println!();
    println!("{:<16} Description", "Name");
    println!("{:-<16} {:-<48}", "", "");

    for (name, description) in BUILTIN_BOTS {
        println!("{name:<16} {description}");
    }

    println!();
    println!("Total: {} bot(s)", BUILTIN_BOTS.len());

    Ok(())
}
