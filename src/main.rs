use anyhow::{bail, Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{error, info, warn};
use std::sync::Arc;

use image_post_filters::cli::{Cli, Commands, FilterArgs};
use image_post_filters::config::Config;
use image_post_filters::error::EditorError;
use image_post_filters::services::location::{LocationBinding, LocationFeed};
use image_post_filters::services::photos::{DirectoryPhotoLibrary, ExportOutcome, PhotoLibrary};
use image_post_filters::services::picker;
use image_post_filters::state::edit::FilterParams;
use image_post_filters::state::editor::{Committed, Editor};
use image_post_filters::state::library::{Library, RecordStore};
use image_post_filters::ui;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // The app cannot function without its catalog
    let library = Library::open(&config.database_path)
        .context("Failed to open the post catalog. Check permissions and disk space.")?;
    info!("🎨 Image Post Filters ready with {} posts", library.count()?);

    let photos: Arc<dyn PhotoLibrary> = Arc::new(DirectoryPhotoLibrary::new(&config.export_dir));

    match cli.command {
        Commands::Post {
            image,
            title,
            at,
            filters,
        } => {
            let feed = LocationFeed::new();
            let mut editor = Editor::new(
                &library,
                Arc::clone(&photos),
                LocationBinding::Live(feed.subscribe()),
                config.preview_size(),
            );

            let selection = picker::pick_from_path(&image)?;
            if editor.apply_selection(selection).is_none() {
                warn!("No image selected");
                return Ok(());
            }
            apply_filters(&mut editor, &filters)?;

            if let Some(at) = at {
                feed.update(at);
            }
            let committed = commit_or_exit(&mut editor, &title)?;
            finish(committed, filters.no_export).await;
        }

        Commands::Repost { id, title, filters } => {
            let Some(record) = library.get(id)? else {
                bail!("No post with ID {}", id);
            };
            let mut editor =
                Editor::for_record(&library, Arc::clone(&photos), &record, config.preview_size())?;
            apply_filters(&mut editor, &filters)?;

            let title = title.unwrap_or_else(|| editor.title().to_string());
            let committed = commit_or_exit(&mut editor, &title)?;
            finish(committed, filters.no_export).await;
        }

        Commands::List => {
            let records = library.all()?;
            for row in ui::gallery::rows(&records, config.thumbnail_size) {
                println!(
                    "#{:<4} {:<32} {}x{}",
                    row.id,
                    row.title,
                    row.thumbnail.width(),
                    row.thumbnail.height()
                );
            }
        }

        Commands::Map => {
            let records = library.all()?;
            for pin in ui::map::pins(ui::gallery::chronological(&records)) {
                println!("{}", pin);
            }
        }

        Commands::Remove { id } => {
            if !library.remove(id)? {
                bail!("No post with ID {}", id);
            }
        }
    }

    Ok(())
}

/// Apply a preset file, then individual sliders, exactly as the UI would.
/// Optionally saves the result as a new preset.
fn apply_filters<S: RecordStore>(editor: &mut Editor<'_, S>, args: &FilterArgs) -> Result<()> {
    if let Some(path) = &args.preset {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read preset {}", path.display()))?;
        let preset = FilterParams::from_json(&json)
            .with_context(|| format!("Malformed preset {}", path.display()))?;
        editor.apply_params(preset.clamped());
    }

    for (param, value) in args.overrides() {
        let range = param.range();
        let clamped = value.clamp(*range.start(), *range.end());
        if clamped != value {
            warn!("{} {} is outside {:?}, using {}", param, value, range, clamped);
        }
        editor.on_parameter_changed(param, clamped)?;
    }

    if editor.params().is_neutral() {
        info!("No filters applied");
    }
    if let Some(path) = &args.save_preset {
        let json = editor.params().to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write preset {}", path.display()))?;
        info!("💾 Saved preset to {}", path.display());
    }
    Ok(())
}

/// Commit the post. A store failure leaves no sensible way to continue.
fn commit_or_exit<S: RecordStore>(editor: &mut Editor<'_, S>, title: &str) -> Result<Committed> {
    match editor.commit(title) {
        Ok(committed) => Ok(committed),
        Err(EditorError::Persistence(e)) => {
            error!("💥 Could not save post: {}", e);
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

/// Run the export and report how it went. Export failures are not fatal.
async fn finish(committed: Committed, skip_export: bool) {
    println!(
        "Posted #{} \"{}\" at {:.5}, {:.5}",
        committed.record.id,
        committed.record.title,
        committed.record.latitude,
        committed.record.longitude
    );
    if skip_export {
        return;
    }

    match committed.export.run().await {
        Ok(ExportOutcome::Saved { asset }) => {
            println!("Photo Saved! The photo has been saved to your Photo Library: {}", asset)
        }
        Ok(ExportOutcome::Declined) => {}
        Err(e) => error!("Error saving photo: {}", e),
    }
}
