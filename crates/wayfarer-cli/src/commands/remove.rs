use wayfarer_core::screens::HomeScreen;
use wayfarer_core::DiaryEntry;

use crate::commands::common::{normalize_target, open_store, resolve_entry_target, AppContext};
use crate::error::CliError;
use crate::platform::TerminalAlerts;

pub async fn run_remove(target: &str, ctx: &AppContext) -> Result<DiaryEntry, CliError> {
    let target = normalize_target(target)?;
    let store = open_store(ctx)?;
    let alerts = TerminalAlerts;
    let mut screen = HomeScreen::new(&store, &alerts);
    let entries = screen.on_focus().await?;

    let index = resolve_entry_target(&target, entries)?;
    let removed = screen.remove_entry(index).await?;
    println!("{}", removed.id);
    Ok(removed)
}
