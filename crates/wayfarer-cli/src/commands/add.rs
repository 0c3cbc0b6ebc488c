use wayfarer_core::capture::{CaptureFlow, CaptureOutcome, Devices};
use wayfarer_core::navigation::{Navigator, Route};
use wayfarer_core::screens::AddEntryScreen;
use wayfarer_core::DiaryEntry;

use crate::cli::AddArgs;
use crate::commands::common::{coordinates_from_args, open_store, AppContext};
use crate::error::CliError;
use crate::platform::{
    CliLocator, CliNotifier, FileImagePicker, NominatimGeocoder, TerminalAlerts,
    TerminalPermissions,
};

/// Capture one entry from an image file; prints the new entry id.
///
/// Returns `None` when the pick was canceled.
pub async fn run_add(args: AddArgs, ctx: &AppContext) -> Result<Option<DiaryEntry>, CliError> {
    let explicit = coordinates_from_args(args.lat, args.lon)?;
    let geocoder = if args.offline {
        None
    } else {
        Some(NominatimGeocoder::new(ctx.config.geocoder_url.clone())?)
    };

    let store = open_store(ctx)?;
    let picker = FileImagePicker::new(Some(args.image.clone()));
    let locator = CliLocator::new(explicit, Some(args.image), geocoder);
    let notifier = CliNotifier::select(ctx.config.notifications_enabled && !args.no_notify);
    let alerts = TerminalAlerts;

    let flow = CaptureFlow::new(
        &store,
        Devices {
            picker: &picker,
            locator: &locator,
            notifier: &notifier,
            alerts: &alerts,
        },
    )
    .with_options(ctx.config.capture);

    let mut navigator = Navigator::new();
    navigator.navigate(Route::AddEntry);
    let mut screen = AddEntryScreen::mount(flow, &TerminalPermissions).await;

    if let CaptureOutcome::Canceled = screen.pick_image().await? {
        println!("Canceled");
        return Ok(None);
    }
    tracing::debug!(
        "{}: {} at {}",
        navigator.current().title(),
        screen.image_label(),
        screen.address_label()
    );

    let entry = screen.save(&mut navigator).await?;
    println!("{}", entry.id);
    Ok(Some(entry))
}
