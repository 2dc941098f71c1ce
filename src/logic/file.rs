//! File type detection
//!
//! Pure functions mapping file names to preview and thumbnail kinds.

use crate::api::DriveItem;

/// How a file can be previewed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewType {
    Image,
    Video,
    Audio,
    Text,
    Code,
    Markdown,
    Pdf,
    Docx,
    Other,
}

/// Which thumbnail the worker can generate for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailType {
    Image,
    Video,
    Pdf,
    Docx,
    None,
}

/// Lowercased extension without the dot, if any
///
/// # Examples
/// ```
/// use drivetui::logic::file::extension;
///
/// assert_eq!(extension("Photo.PNG"), Some("png".to_string()));
/// assert_eq!(extension("archive.tar.gz"), Some("gz".to_string()));
/// assert_eq!(extension("README"), None);
/// assert_eq!(extension(".hidden"), None);
/// ```
pub fn extension(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

pub fn is_image_file(name: &str) -> bool {
    preview_type(name) == PreviewType::Image
}

pub fn preview_type(name: &str) -> PreviewType {
    let Some(ext) = extension(name) else {
        return PreviewType::Other;
    };

    match ext.as_str() {
        "png" | "jpg" | "jpeg" | "gif" | "bmp" | "webp" | "tiff" | "tif" | "svg" | "ico"
        | "heic" => PreviewType::Image,
        "mp4" | "webm" | "mov" | "mkv" | "avi" => PreviewType::Video,
        "mp3" | "wav" | "ogg" | "flac" | "m4a" | "aac" => PreviewType::Audio,
        "txt" | "log" | "csv" | "ini" | "cfg" | "conf" => PreviewType::Text,
        "md" | "markdown" => PreviewType::Markdown,
        "rs" | "js" | "ts" | "tsx" | "jsx" | "py" | "go" | "c" | "h" | "cpp" | "hpp" | "java"
        | "kt" | "swift" | "rb" | "php" | "sh" | "json" | "yaml" | "yml" | "toml" | "xml"
        | "html" | "css" | "sql" => PreviewType::Code,
        "pdf" => PreviewType::Pdf,
        "docx" => PreviewType::Docx,
        _ => PreviewType::Other,
    }
}

pub fn thumbnail_type(name: &str) -> ThumbnailType {
    match preview_type(name) {
        // Vector and container formats the worker cannot rasterize
        PreviewType::Image => match extension(name).as_deref() {
            Some("svg") | Some("ico") | Some("heic") => ThumbnailType::None,
            _ => ThumbnailType::Image,
        },
        PreviewType::Video => ThumbnailType::Video,
        PreviewType::Pdf => ThumbnailType::Pdf,
        PreviewType::Docx => ThumbnailType::Docx,
        _ => ThumbnailType::None,
    }
}

/// Whether opening the file should show the preview popup
pub fn is_previewable(name: &str) -> bool {
    preview_type(name) != PreviewType::Other
}

/// Thumbnails are only requested for supported files under the size limit
pub fn should_fetch_thumbnail(item: &DriveItem, max_fetch_size: u64) -> bool {
    !item.is_directory()
        && thumbnail_type(&item.name) != ThumbnailType::None
        && item.size <= max_fetch_size
}
