//! JSON persistence of categorized palettes

use crate::color::{Color, color_to_hex};
use crate::io::error::{MosaicError, Result, WithContext, input_not_found};
use crate::palette::metadata::ImageMetadata;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Write palette records as a pretty-printed JSON array
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The file cannot be created or written
/// - A record cannot be serialized (for example a non UTF-8 path)
pub fn save_palette(records: &[ImageMetadata], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    let file = File::create(path).map_err(|e| MosaicError::FileSystem {
        path: path.to_path_buf(),
        operation: "create cache",
        source: e,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records).with_path(path)?;
    writer.flush().map_err(|e| MosaicError::FileSystem {
        path: path.to_path_buf(),
        operation: "write cache",
        source: e,
    })?;

    tracing::info!(path = %path.display(), records = records.len(), "Saved palette cache");
    Ok(())
}

/// Read palette records back from a cache file
///
/// Each record's hex string is re-derived from its RGB triple and compared
/// ignoring case, so hand-edited caches cannot silently disagree with
/// themselves.
///
/// # Errors
///
/// Returns an error if:
/// - The cache file does not exist
/// - The file cannot be read or is not a valid palette
/// - A record's hex color does not match its RGB color
pub fn load_palette(path: &Path) -> Result<Vec<ImageMetadata>> {
    if !path.is_file() {
        return Err(input_not_found(path, "Palette cache"));
    }

    let file = File::open(path).map_err(|e| MosaicError::FileSystem {
        path: path.to_path_buf(),
        operation: "open cache",
        source: e,
    })?;
    let records: Vec<ImageMetadata> =
        serde_json::from_reader(BufReader::new(file)).with_path(path)?;

    for record in &records {
        let expected = color_to_hex(record.avg_color_rgb);
        if !expected.eq_ignore_ascii_case(&record.avg_color_hex) {
            return Err(MosaicError::InvalidCache {
                path: path.to_path_buf(),
                reason: format!(
                    "'{}' stores {} but its RGB {:?} encodes {expected}",
                    record.filepath.display(),
                    record.avg_color_hex,
                    record.avg_color_rgb
                ),
            });
        }
    }

    tracing::info!(path = %path.display(), records = records.len(), "Loaded palette cache");
    Ok(records)
}

/// Matcher input built from palette records, keyed by file path in record order
pub fn palette_entries(records: &[ImageMetadata]) -> Vec<(PathBuf, Color)> {
    records
        .iter()
        .map(|record| (record.filepath.clone(), record.avg_color_rgb))
        .collect()
}
