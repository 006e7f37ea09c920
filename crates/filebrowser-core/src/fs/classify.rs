//! Content-type classification and renderer selection.
//!
//! A location is classified once from its declared content type (derived
//! from the extension through the MIME database) into a closed
//! [`FileKind`]. [`select_renderer`] then maps that kind onto the
//! [`Renderer`] a frontend should use.

use std::path::Path;

use mime_guess::mime;

/// The category of a file, as far as previewing is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Image,
    Movie,
    Audio,
    Text,
    Json,
    Xml,
    /// Generic data: `application/octet-stream` or no extension at all.
    Binary,
    /// A known non-previewable type, or an unrecognised extension.
    Unsupported,
}

impl FileKind {
    /// Returns `true` if the browser can display this kind of file.
    pub fn is_viewable(self) -> bool {
        !matches!(self, Self::Audio | Self::Unsupported)
    }

    /// Returns `true` for kinds streamed by the host media player.
    pub fn is_media(self) -> bool {
        matches!(self, Self::Movie | Self::Audio)
    }

    /// Short label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Movie => "movie",
            Self::Audio => "audio",
            Self::Text => "text",
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Binary => "binary",
            Self::Unsupported => "unsupported",
        }
    }
}

/// Extensions treated as XML documents even when the MIME database
/// doesn't know them.
const XML_EXTENSIONS: &[&str] = &["plist", "xib", "storyboard"];

/// Returns the declared content type of `path`, if its extension is known.
pub fn content_type(path: &Path) -> Option<mime::Mime> {
    mime_guess::from_path(path).first()
}

/// Classifies `path` by its declared content type.
///
/// # Examples
///
/// ```
/// use filebrowser_core::{classify, FileKind};
/// use std::path::Path;
///
/// assert_eq!(classify(Path::new("clip.mp4")), FileKind::Movie);
/// assert_eq!(classify(Path::new("data.json")), FileKind::Json);
/// assert_eq!(classify(Path::new("blob.qqzz")), FileKind::Unsupported);
/// ```
pub fn classify(path: &Path) -> FileKind {
    let Some(ext) = path.extension().map(|e| e.to_string_lossy().to_lowercase()) else {
        return FileKind::Binary;
    };
    if XML_EXTENSIONS.contains(&ext.as_str()) {
        return FileKind::Xml;
    }

    match content_type(path) {
        Some(content) => classify_mime(&content),
        None => FileKind::Unsupported,
    }
}

fn classify_mime(content: &mime::Mime) -> FileKind {
    let (top, sub) = (content.type_(), content.subtype());
    let suffix = content.suffix().map(|s| s.as_str());

    if top == mime::IMAGE {
        FileKind::Image
    } else if top == mime::VIDEO {
        FileKind::Movie
    } else if top == mime::AUDIO {
        FileKind::Audio
    } else if sub == mime::JSON || suffix == Some("json") {
        FileKind::Json
    } else if sub == mime::XML || suffix == Some("xml") {
        FileKind::Xml
    } else if top == mime::TEXT {
        FileKind::Text
    } else if top == mime::APPLICATION && sub == mime::OCTET_STREAM {
        FileKind::Binary
    } else {
        FileKind::Unsupported
    }
}

/// The preview renderer a frontend should use for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Renderer {
    /// Decoded image, loaded into memory off the interactive thread.
    Image,
    /// Streamed by the host media player; nothing is loaded.
    Media,
    /// UTF-8 text, pretty-printed when the file is JSON.
    Text,
    /// Hex dump of the raw bytes, subject to the size ceiling.
    Hex,
    /// A size placeholder; no content is read.
    Placeholder,
}

/// Chooses the renderer for `kind`.
///
/// `hex_requested` forces the byte view for every kind that is not streamed
/// by the media player.
pub fn select_renderer(kind: FileKind, hex_requested: bool) -> Renderer {
    match kind {
        FileKind::Movie | FileKind::Audio => Renderer::Media,
        _ if hex_requested => Renderer::Hex,
        FileKind::Image => Renderer::Image,
        FileKind::Text | FileKind::Json | FileKind::Xml => Renderer::Text,
        FileKind::Binary | FileKind::Unsupported => Renderer::Placeholder,
    }
}
