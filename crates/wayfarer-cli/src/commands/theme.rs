use wayfarer_core::config::save_config_to_path;
use wayfarer_core::theme::{ResolvedTheme, ThemeMode, ThemeState};

use crate::cli::ThemeCommands;
use crate::commands::common::AppContext;
use crate::error::CliError;

pub fn run_theme(
    command: Option<ThemeCommands>,
    ctx: &mut AppContext,
) -> Result<ResolvedTheme, CliError> {
    let state = ThemeState::from_system(ctx.config.theme);

    let theme = match command.unwrap_or(ThemeCommands::Show) {
        ThemeCommands::Show => state.current(),
        ThemeCommands::Toggle => {
            let theme = state.toggle();
            persist_mode(ctx, theme.as_mode())?;
            theme
        }
        ThemeCommands::Set { mode } => {
            let mode = ThemeMode::from(mode);
            persist_mode(ctx, mode)?;
            ThemeState::from_system(mode).current()
        }
    };

    println!("{theme} (mode: {})", mode_label(ctx.config.theme));
    Ok(theme)
}

fn persist_mode(ctx: &mut AppContext, mode: ThemeMode) -> Result<(), CliError> {
    ctx.config.theme = mode;
    save_config_to_path(&ctx.config, &ctx.config_path)?;
    tracing::debug!("Saved theme mode to {}", ctx.config_path.display());
    Ok(())
}

const fn mode_label(mode: ThemeMode) -> &'static str {
    match mode {
        ThemeMode::Light => "light",
        ThemeMode::Dark => "dark",
        ThemeMode::System => "system",
    }
}
