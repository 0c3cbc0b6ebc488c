use wayfarer_core::screens::{HomeScreen, EMPTY_LIST_MESSAGE};

use crate::commands::common::{
    entry_to_list_item, format_entry_lines, open_store, AppContext, EntryListItem,
};
use crate::error::CliError;
use crate::platform::TerminalAlerts;

pub async fn run_list(as_json: bool, ctx: &AppContext) -> Result<(), CliError> {
    let store = open_store(ctx)?;
    let alerts = TerminalAlerts;
    let mut screen = HomeScreen::new(&store, &alerts);
    let entries = screen.on_focus().await?;

    if as_json {
        let json_items = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| entry_to_list_item(index, entry))
            .collect::<Vec<EntryListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if entries.is_empty() {
        println!("{EMPTY_LIST_MESSAGE}");
    } else {
        for line in format_entry_lines(entries) {
            println!("{line}");
        }
    }

    Ok(())
}
