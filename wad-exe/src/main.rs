//! `wadex`: print what is inside a WAD and pull its graphics and music out.

mod cli;
mod export;

use std::error::Error;
use std::path::Path;

use cli::CliOptions;
use log::{error, info, warn};
use simplelog::TermLogger;
use wad::{DecodeOptions, WadContents, WadData};

fn main() -> Result<(), Box<dyn Error>> {
    let options: CliOptions = argh::from_env();

    TermLogger::init(
        options.verbose.unwrap_or(log::LevelFilter::Info),
        simplelog::ConfigBuilder::default()
            .set_time_level(log::LevelFilter::Trace)
            .build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    if options.wads.is_empty() {
        warn!("No WAD files given, nothing to do");
        return Ok(());
    }

    for path in options.wads.iter() {
        if let Err(e) = process_wad(Path::new(path), &options) {
            error!("{path}: {e}");
        }
    }
    Ok(())
}

/// Decode one WAD and run every action asked for. A failing action is
/// logged and the rest still run.
fn process_wad(path: &Path, options: &CliOptions) -> Result<(), Box<dyn Error>> {
    info!("Reading {}", path.display());
    let wad = WadData::from_bytes(std::fs::read(path)?)?;
    let contents = WadContents::load(&wad, &DecodeOptions::from(options))?;

    if let Some(file) = &options.lumpsinfo_dump {
        report(export::write_text(Path::new(file), &export::lump_summary(&wad)));
    }

    let maps = export::map_summary(&contents.maps);
    if options.mapsinfo {
        print!("{maps}");
    }
    if let Some(file) = &options.mapsinfo_dump {
        report(export::write_text(Path::new(file), &maps));
    }

    let music = export::music_summary(&contents.music);
    if options.musicinfo {
        print!("{music}");
    }
    if let Some(file) = &options.musicinfo_dump {
        report(export::write_text(Path::new(file), &music));
    }
    if let Some(dir) = &options.music_export {
        report(export::export_music(&wad, &contents.music, Path::new(dir)));
    }

    if options.wants_graphics() {
        let Some(palette) = contents.palette() else {
            error!(
                "{}: no palette {} to render with, skipping graphics export",
                path.display(),
                options.palette
            );
            return Ok(());
        };
        if let Some(dir) = &options.sprites_export {
            report(export::export_patches(&contents.sprites, palette, Path::new(dir)));
        }
        if let Some(dir) = &options.patches_export {
            report(export::export_patches(&contents.patches, palette, Path::new(dir)));
        }
        if let Some(dir) = &options.flats_export {
            report(export::export_flats(&contents.flats, palette, Path::new(dir)));
        }
    }

    Ok(())
}

fn report<T>(result: Result<T, Box<dyn Error>>) {
    if let Err(e) = result {
        error!("{e}");
    }
}
