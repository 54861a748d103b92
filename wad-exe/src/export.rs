//! Text summaries and file export. Everything that touches the filesystem
//! lives here, the `wad` crate only ever sees bytes.

use std::error::Error;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use log::{debug, info, warn};
use wad::{
    MusicLump, Raster, WadData, WadFlat, WadMap, WadPalette, WadPatch, render_flat, render_patch,
};

pub fn lump_summary(wad: &WadData) -> String {
    let mut out = String::from("Lump name | Size (bytes)\n");
    for lump in wad.lumps() {
        let _ = writeln!(out, "{} | {}", lump.name, lump.size);
    }
    out
}

pub fn map_summary(maps: &[WadMap]) -> String {
    let mut out = String::from("Map list\n");
    for map in maps {
        let _ = writeln!(out, "{}", map.name);
    }
    out
}

pub fn music_summary(music: &[MusicLump]) -> String {
    let mut out = String::from("Song list | Format\n");
    for song in music {
        let _ = writeln!(out, "{} | {}", song.name, song.format);
    }
    out
}

/// A lump name made safe to use as one path component inside an export
/// directory. Separators and a leading dot become `_`.
pub fn file_stem(name: &str) -> String {
    let mut stem: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect();
    if stem.is_empty() || stem.starts_with('.') {
        stem.replace_range(..stem.len().min(1), "_");
    }
    stem
}

pub fn write_text(path: &Path, text: &str) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text)?;
    info!("Wrote {}", path.display());
    Ok(())
}

/// Copy each song out unmodified as `<dir>/<name>.<ext>`. Returns how many
/// were written.
pub fn export_music(
    wad: &WadData,
    music: &[MusicLump],
    dir: &Path,
) -> Result<usize, Box<dyn Error>> {
    fs::create_dir_all(dir)?;
    let mut written = 0;
    for song in music {
        let bytes = match wad.music_data(song) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Skipping song {}: {e}", song.name);
                continue;
            }
        };
        let path = dir.join(format!("{}.{}", file_stem(&song.name), song.extension()));
        fs::write(&path, bytes)?;
        debug!("Wrote {} ({} bytes)", path.display(), bytes.len());
        written += 1;
    }
    info!("Exported {written} songs to {}", dir.display());
    Ok(written)
}

pub fn write_png(path: &Path, raster: &Raster) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)?;
    let mut encoder = png::Encoder::new(
        BufWriter::new(file),
        raster.width as u32,
        raster.height as u32,
    );
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&raster.pixels)?;
    Ok(())
}

pub fn export_patches(
    patches: &[WadPatch],
    palette: &WadPalette,
    dir: &Path,
) -> Result<usize, Box<dyn Error>> {
    fs::create_dir_all(dir)?;
    let mut written = 0;
    for patch in patches {
        if patch.width == 0 || patch.height == 0 {
            warn!("Patch {} has no pixels, skipping", patch.name);
            continue;
        }
        let path = dir.join(format!("{}.png", file_stem(&patch.name)));
        write_png(&path, &render_patch(patch, palette))?;
        written += 1;
    }
    info!("Exported {written} images to {}", dir.display());
    Ok(written)
}

pub fn export_flats(
    flats: &[WadFlat],
    palette: &WadPalette,
    dir: &Path,
) -> Result<usize, Box<dyn Error>> {
    fs::create_dir_all(dir)?;
    for flat in flats {
        let path = dir.join(format!("{}.png", file_stem(&flat.name)));
        write_png(&path, &render_flat(flat, palette))?;
    }
    info!("Exported {} flats to {}", flats.len(), dir.display());
    Ok(flats.len())
}
