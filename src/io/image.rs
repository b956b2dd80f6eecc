//! Image discovery, decoding to RGB and export

use crate::io::error::{MosaicError, Result, input_not_found};
use image::RgbImage;
use std::path::{Path, PathBuf};

/// Check a path against a list of extensions
///
/// Matching ignores ASCII case and accepts entries written with or without
/// a leading dot (`"png"` and `".PNG"` are equivalent).
pub fn has_supported_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(extension) = path.extension().and_then(|s| s.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|candidate| candidate.trim_start_matches('.').eq_ignore_ascii_case(extension))
}

/// Recursively collect image files below a directory
///
/// The result is sorted so palette order, and with it matcher tie-breaking,
/// does not depend on filesystem enumeration order. Symlinked files are
/// included; symlinked directories are not descended.
///
/// # Errors
///
/// Returns an error if:
/// - The directory does not exist or is not a directory
/// - A directory below it cannot be read
pub fn get_image_files(directory: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        return Err(input_not_found(directory, "Image directory"));
    }

    let mut files = Vec::new();
    collect_into(directory, extensions, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_into(directory: &Path, extensions: &[String], files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(directory).map_err(|e| MosaicError::FileSystem {
        path: directory.to_path_buf(),
        operation: "read directory",
        source: e,
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| MosaicError::FileSystem {
            path: directory.to_path_buf(),
            operation: "read directory entry",
            source: e,
        })?;
        let path = entry.path();
        // Does not follow symlinks, so linked directories are never descended
        let file_type = entry.file_type().map_err(|e| MosaicError::FileSystem {
            path: path.clone(),
            operation: "read file type",
            source: e,
        })?;

        if file_type.is_dir() {
            collect_into(&path, extensions, files)?;
        } else if path.is_file() && has_supported_extension(&path, extensions) {
            files.push(path);
        }
    }

    Ok(())
}

/// Decode an image file and normalize it to 8-bit RGB
///
/// Alpha is dropped and grayscale is expanded to three channels.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_rgb_image(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|e| MosaicError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(img.to_rgb8())
}

/// Save an RGB image, creating parent directories as needed
///
/// The format follows the extension of `output_path`.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written to the specified path
pub fn export_image(image: &RgbImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    image
        .save(output_path)
        .map_err(|e| MosaicError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
