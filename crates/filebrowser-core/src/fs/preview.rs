//! Loading file contents for the preview renderers.
//!
//! [`load_preview`] is blocking; frontends call it through
//! [`crate::loader::Loader`] so the interactive thread never waits on I/O.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::GenericImageView;

use crate::error::{CoreError, CoreResult};
use crate::fs::classify::{classify, content_type, FileKind, Renderer};
use crate::fs::hex::{HexDump, DEFAULT_BYTES_PER_ROW};

/// Byte-view ceiling when nothing else is configured (10 MiB).
pub const DEFAULT_MAX_HEX_SIZE: u64 = 10 * 1024 * 1024;

/// Body shown when text cannot be decoded.
pub const UNABLE_TO_DISPLAY: &str = "Unable to display";

/// Knobs for [`load_preview`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewSettings {
    /// Files larger than this are refused by the byte view.
    pub max_hex_size: u64,
    /// Row width of the byte view.
    pub bytes_per_row: usize,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            max_hex_size: DEFAULT_MAX_HEX_SIZE,
            bytes_per_row: DEFAULT_BYTES_PER_ROW,
        }
    }
}

/// Metadata extracted from an image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub color_type: String,
    pub file_size: u64,
}

/// Loaded content, ready for the matching renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    /// Decoded image header plus the raw encoded bytes for display.
    Image { info: ImageInfo, bytes: Vec<u8> },
    /// To be streamed by the host media player.
    Media { path: PathBuf, kind: FileKind },
    /// Text body. `decoded` is `false` when the body is the placeholder.
    Text { body: String, decoded: bool },
    /// Hex dump of the whole file.
    Hex(HexDump),
    /// Nothing loaded; a size and type description stands in.
    Placeholder { size: u64, description: String },
}

/// How the text renderer interprets the bytes it decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSyntax {
    Plain,
    /// Pretty-printed through `serde_json`.
    Json,
    /// XML or binary property list, shown as pretty-printed JSON.
    PropertyList,
}

impl TextSyntax {
    /// Picks the syntax from the extension and MIME type of `path`.
    pub fn of(path: &Path) -> Self {
        let plist = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("plist"));
        if plist {
            Self::PropertyList
        } else if classify(path) == FileKind::Json {
            Self::Json
        } else {
            Self::Plain
        }
    }
}

/// Loads `path` for `renderer`.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `path` does not exist.
/// - [`CoreError::IsADirectory`] if contents are requested for a directory.
/// - [`CoreError::TooLarge`] if the byte view is requested for a file over
///   `settings.max_hex_size`.
/// - [`CoreError::Decode`] if an image cannot be decoded.
/// - [`CoreError::Io`] on other read failures.
pub fn load_preview(path: &Path, renderer: Renderer, settings: &PreviewSettings) -> CoreResult<Preview> {
    tracing::debug!("loading {renderer:?} preview of {}", path.display());

    match renderer {
        Renderer::Media => {
            if !path.exists() {
                return Err(CoreError::NotFound(path.to_path_buf()));
            }
            Ok(Preview::Media {
                path: path.to_path_buf(),
                kind: classify(path),
            })
        }
        Renderer::Image => {
            let bytes = read_file(path)?;
            let info = decode_image_info(&bytes)?;
            Ok(Preview::Image { info, bytes })
        }
        Renderer::Text => {
            let bytes = read_file(path)?;
            Ok(text_preview(&bytes, TextSyntax::of(path)))
        }
        Renderer::Hex => {
            let bytes = read_capped(path, settings.max_hex_size)?;
            Ok(Preview::Hex(HexDump::new(&bytes, settings.bytes_per_row)))
        }
        Renderer::Placeholder => {
            let size = fs::metadata(path)
                .map_err(|e| CoreError::from_io(e, path))?
                .len();
            let description = content_type(path)
                .map(|m| m.essence_str().to_string())
                .unwrap_or_else(|| "data".to_string());
            Ok(Preview::Placeholder { size, description })
        }
    }
}

/// Reads the whole file if it is no larger than `limit` bytes.
///
/// # Errors
///
/// Returns [`CoreError::TooLarge`] without reading anything when the file
/// exceeds `limit`.
pub fn read_capped(path: &Path, limit: u64) -> CoreResult<Vec<u8>> {
    let size = fs::metadata(path)
        .map_err(|e| CoreError::from_io(e, path))?
        .len();
    if size > limit {
        return Err(CoreError::TooLarge { size, limit });
    }
    read_file(path)
}

fn read_file(path: &Path) -> CoreResult<Vec<u8>> {
    if path.is_dir() {
        return Err(CoreError::IsADirectory(path.to_path_buf()));
    }
    fs::read(path).map_err(|e| CoreError::from_io(e, path))
}

/// Decodes `bytes` as UTF-8, pretty-printing JSON and property lists.
///
/// Binary property lists are recognised by their magic whatever `syntax`
/// says. Content that does not parse falls back to the raw text; invalid
/// UTF-8 falls back to [`UNABLE_TO_DISPLAY`].
pub fn text_preview(bytes: &[u8], syntax: TextSyntax) -> Preview {
    let is_plist = syntax == TextSyntax::PropertyList || bytes.starts_with(BINARY_PLIST_MAGIC);
    let structured = if is_plist {
        plist::Value::from_reader(Cursor::new(bytes))
            .map_err(|e| tracing::debug!("property list did not parse: {e}"))
            .ok()
            .map(plist_to_json)
    } else if syntax == TextSyntax::Json {
        serde_json::from_slice::<serde_json::Value>(bytes).ok()
    } else {
        None
    };

    if let Some(value) = structured {
        if let Ok(body) = serde_json::to_string_pretty(&value) {
            return Preview::Text {
                body,
                decoded: true,
            };
        }
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => Preview::Text {
            body: text.to_string(),
            decoded: true,
        },
        Err(e) => {
            tracing::debug!("text preview is not UTF-8: {e}");
            Preview::Text {
                body: UNABLE_TO_DISPLAY.to_string(),
                decoded: false,
            }
        }
    }
}

const BINARY_PLIST_MAGIC: &[u8] = b"bplist00";

/// Converts a property list into the equivalent JSON tree.
///
/// Data becomes an uppercase hex string and dates their XML form.
fn plist_to_json(value: plist::Value) -> serde_json::Value {
    use serde_json::Value as Json;

    match value {
        plist::Value::Array(items) => Json::Array(items.into_iter().map(plist_to_json).collect()),
        plist::Value::Dictionary(dict) => Json::Object(
            dict.into_iter()
                .map(|(key, value)| (key, plist_to_json(value)))
                .collect(),
        ),
        plist::Value::Boolean(b) => Json::Bool(b),
        plist::Value::Data(bytes) => Json::String(hex::encode_upper(bytes)),
        plist::Value::Date(date) => Json::String(date.to_xml_format()),
        plist::Value::Real(f) => serde_json::Number::from_f64(f).map_or(Json::Null, Json::Number),
        plist::Value::Integer(i) => i
            .as_signed()
            .map(Json::from)
            .or_else(|| i.as_unsigned().map(Json::from))
            .unwrap_or(Json::Null),
        plist::Value::String(s) => Json::String(s),
        plist::Value::Uid(uid) => Json::from(uid.get()),
        _ => Json::Null,
    }
}

/// Decodes image dimensions, format and color type from encoded bytes.
///
/// # Errors
///
/// Returns [`CoreError::Decode`] if the bytes are not a supported image.
pub fn decode_image_info(bytes: &[u8]) -> CoreResult<ImageInfo> {
    let format = image::guess_format(bytes)
        .map_err(|e| CoreError::Decode(format!("image error: {e}")))?;
    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| CoreError::Decode(format!("image error: {e}")))?;
    let (width, height) = img.dimensions();

    Ok(ImageInfo {
        width,
        height,
        format: format!("{format:?}"),
        color_type: format!("{:?}", img.color()),
        file_size: bytes.len() as u64,
    })
}
