//! File metadata for the details pane.
//!
//! [`read_metadata`] queries a fixed list of [`ResourceKey`]s for a path.
//! Keys the platform cannot answer are left out rather than reported as
//! errors. [`ResourceValues::rows`] then renders the values as
//! label/value pairs with per-type formatting.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::time::{Duration, SystemTime};

use lofty::file::AudioFile;
use unicode_normalization::UnicodeNormalization;

use crate::error::{CoreError, CoreResult};
use crate::fs::classify::{classify, content_type, FileKind};
use crate::fs::format::{format_byte_count, format_size, format_timestamp};

/// A piece of file metadata the reader knows how to query.
///
/// Variant order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKey {
    Name,
    ContentType,
    IsDirectory,
    IsRegularFile,
    IsSymbolicLink,
    IsHidden,
    IsReadable,
    IsWritable,
    IsExecutable,
    CreationDate,
    ModificationDate,
    AccessDate,
    AttributeModificationDate,
    FileSize,
    FileAllocatedSize,
    LinkCount,
    FileIdentifier,
    Permissions,
    CanonicalPath,
    AudioDuration,
}

impl ResourceKey {
    /// Every key, in display order.
    pub const ALL: &'static [ResourceKey] = &[
        Self::Name,
        Self::ContentType,
        Self::IsDirectory,
        Self::IsRegularFile,
        Self::IsSymbolicLink,
        Self::IsHidden,
        Self::IsReadable,
        Self::IsWritable,
        Self::IsExecutable,
        Self::CreationDate,
        Self::ModificationDate,
        Self::AccessDate,
        Self::AttributeModificationDate,
        Self::FileSize,
        Self::FileAllocatedSize,
        Self::LinkCount,
        Self::FileIdentifier,
        Self::Permissions,
        Self::CanonicalPath,
        Self::AudioDuration,
    ];

    /// Label shown next to the value.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::ContentType => "contentType",
            Self::IsDirectory => "isDirectory",
            Self::IsRegularFile => "isRegularFile",
            Self::IsSymbolicLink => "isSymbolicLink",
            Self::IsHidden => "isHidden",
            Self::IsReadable => "isReadable",
            Self::IsWritable => "isWritable",
            Self::IsExecutable => "isExecutable",
            Self::CreationDate => "creationDate",
            Self::ModificationDate => "contentModificationDate",
            Self::AccessDate => "contentAccessDate",
            Self::AttributeModificationDate => "attributeModificationDate",
            Self::FileSize => "fileSize",
            Self::FileAllocatedSize => "fileAllocatedSize",
            Self::LinkCount => "linkCount",
            Self::FileIdentifier => "fileIdentifier",
            Self::Permissions => "permissions",
            Self::CanonicalPath => "canonicalPath",
            Self::AudioDuration => "audioDuration",
        }
    }
}

/// A metadata value. The variant decides how it is formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceValue {
    Bool(bool),
    Date(SystemTime),
    Size(u64),
    Number(u64),
    Duration(Duration),
    Text(String),
}

impl fmt::Display for ResourceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Date(t) => write!(f, "{}", format_timestamp(*t, DEFAULT_DATE_FORMAT)),
            Self::Size(n) => write!(f, "{}", format_size(*n)),
            Self::Number(n) => write!(f, "{n}"),
            Self::Duration(d) => f.write_str(&format_duration(*d)),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Formats a play time as `m:ss.mmm`, with an hour field once it is needed.
fn format_duration(d: Duration) -> String {
    let millis = d.subsec_millis();
    let secs = d.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, secs / 60 % 60, secs % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}.{millis:03}")
    } else {
        format!("{minutes}:{seconds:02}.{millis:03}")
    }
}

/// Timestamp pattern used when none is configured.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One formatted line of the metadata list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRow {
    pub label: &'static str,
    pub value: String,
}

/// The values the platform reported for a path, keyed and ordered by [`ResourceKey`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceValues {
    values: BTreeMap<ResourceKey, ResourceValue>,
}

impl ResourceValues {
    /// Returns the value for `key`, if the platform reported one.
    pub fn get(&self, key: ResourceKey) -> Option<&ResourceValue> {
        self.values.get(&key)
    }

    /// Number of reported keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates reported values in display order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKey, &ResourceValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    /// Formats every value for display.
    ///
    /// Booleans render as `"true"`/`"false"`, dates with `date_format` in
    /// local time, and sizes as two rows: human-readable then raw bytes.
    pub fn rows(&self, date_format: &str) -> Vec<MetadataRow> {
        let mut rows = Vec::with_capacity(self.values.len() + 2);
        for (key, value) in &self.values {
            let label = key.label();
            match value {
                ResourceValue::Bool(b) => rows.push(MetadataRow {
                    label,
                    value: if *b { "true" } else { "false" }.to_string(),
                }),
                ResourceValue::Date(t) => rows.push(MetadataRow {
                    label,
                    value: format_timestamp(*t, date_format),
                }),
                ResourceValue::Size(n) => {
                    rows.push(MetadataRow {
                        label,
                        value: format_size(*n),
                    });
                    rows.push(MetadataRow {
                        label,
                        value: format_byte_count(*n),
                    });
                }
                other => rows.push(MetadataRow {
                    label,
                    value: other.to_string(),
                }),
            }
        }
        rows
    }

    fn insert(&mut self, key: ResourceKey, value: Option<ResourceValue>) {
        if let Some(value) = value {
            self.values.insert(key, value);
        }
    }
}

/// Reads every [`ResourceKey`] the platform can answer for `path`.
///
/// Symlinks are described as links; the target is not followed except for
/// the canonical path.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `path` does not exist.
/// - [`CoreError::PermissionDenied`] if its metadata cannot be read.
pub fn read_metadata(path: &Path) -> CoreResult<ResourceValues> {
    let meta = std::fs::symlink_metadata(path).map_err(|e| CoreError::from_io(e, path))?;
    let mut values = ResourceValues::default();

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().nfc().collect::<String>());
    let hidden = name.as_deref().map(|n| n.starts_with('.'));

    for key in ResourceKey::ALL {
        let value = match key {
            ResourceKey::Name => name.clone().map(ResourceValue::Text),
            ResourceKey::ContentType => {
                if meta.is_dir() {
                    Some(ResourceValue::Text("inode/directory".to_string()))
                } else {
                    content_type(path).map(|m| ResourceValue::Text(m.essence_str().to_string()))
                }
            }
            ResourceKey::IsDirectory => Some(ResourceValue::Bool(meta.is_dir())),
            ResourceKey::IsRegularFile => Some(ResourceValue::Bool(meta.is_file())),
            ResourceKey::IsSymbolicLink => Some(ResourceValue::Bool(meta.is_symlink())),
            ResourceKey::IsHidden => hidden.map(ResourceValue::Bool),
            ResourceKey::IsReadable => platform::is_readable(&meta).map(ResourceValue::Bool),
            ResourceKey::IsWritable => Some(ResourceValue::Bool(!meta.permissions().readonly())),
            ResourceKey::IsExecutable => platform::is_executable(&meta).map(ResourceValue::Bool),
            ResourceKey::CreationDate => meta.created().ok().map(ResourceValue::Date),
            ResourceKey::ModificationDate => meta.modified().ok().map(ResourceValue::Date),
            ResourceKey::AccessDate => meta.accessed().ok().map(ResourceValue::Date),
            ResourceKey::AttributeModificationDate => {
                platform::changed(&meta).map(ResourceValue::Date)
            }
            ResourceKey::FileSize => (!meta.is_dir()).then(|| ResourceValue::Size(meta.len())),
            ResourceKey::FileAllocatedSize => platform::allocated(&meta).map(ResourceValue::Size),
            ResourceKey::LinkCount => platform::link_count(&meta).map(ResourceValue::Number),
            ResourceKey::FileIdentifier => platform::identifier(&meta).map(ResourceValue::Number),
            ResourceKey::Permissions => platform::permissions(&meta).map(ResourceValue::Text),
            ResourceKey::CanonicalPath => std::fs::canonicalize(path)
                .ok()
                .map(|p| ResourceValue::Text(p.display().to_string())),
            ResourceKey::AudioDuration => {
                audio_duration(path, &meta).map(ResourceValue::Duration)
            }
        };
        values.insert(*key, value);
    }

    Ok(values)
}

/// Play time of an audio file. Other kinds and undecodable files give `None`.
fn audio_duration(path: &Path, meta: &std::fs::Metadata) -> Option<Duration> {
    if !meta.is_file() || classify(path) != FileKind::Audio {
        return None;
    }
    match lofty::read_from_path(path) {
        Ok(tagged) => Some(tagged.properties().duration()),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "no audio properties");
            None
        }
    }
}

#[cfg(unix)]
mod platform {
    use std::fs::Metadata;
    use std::os::unix::fs::MetadataExt;
    use std::time::{Duration, SystemTime};

    pub(super) fn is_readable(meta: &Metadata) -> Option<bool> {
        Some(meta.mode() & 0o444 != 0)
    }

    pub(super) fn is_executable(meta: &Metadata) -> Option<bool> {
        Some(meta.mode() & 0o111 != 0)
    }

    pub(super) fn changed(meta: &Metadata) -> Option<SystemTime> {
        let secs = u64::try_from(meta.ctime()).ok()?;
        let nanos = u32::try_from(meta.ctime_nsec()).ok()?;
        SystemTime::UNIX_EPOCH.checked_add(Duration::new(secs, nanos))
    }

    pub(super) fn allocated(meta: &Metadata) -> Option<u64> {
        meta.blocks().checked_mul(512)
    }

    pub(super) fn link_count(meta: &Metadata) -> Option<u64> {
        Some(meta.nlink())
    }

    pub(super) fn identifier(meta: &Metadata) -> Option<u64> {
        Some(meta.ino())
    }

    pub(super) fn permissions(meta: &Metadata) -> Option<String> {
        Some(format!("{:04o}", meta.mode() & 0o7777))
    }
}

#[cfg(not(unix))]
mod platform {
    use std::fs::Metadata;
    use std::time::SystemTime;

    pub(super) fn is_readable(_meta: &Metadata) -> Option<bool> {
        None
    }

    pub(super) fn is_executable(_meta: &Metadata) -> Option<bool> {
        None
    }

    pub(super) fn changed(_meta: &Metadata) -> Option<SystemTime> {
        None
    }

    pub(super) fn allocated(_meta: &Metadata) -> Option<u64> {
        None
    }

    pub(super) fn link_count(_meta: &Metadata) -> Option<u64> {
        None
    }

    pub(super) fn identifier(_meta: &Metadata) -> Option<u64> {
        None
    }

    pub(super) fn permissions(_meta: &Metadata) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn reads_basic_file_metadata() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("notes.txt");
        fs::write(&file, "hello").unwrap();

        let values = read_metadata(&file).unwrap();
        assert_eq!(
            values.get(ResourceKey::Name),
            Some(&ResourceValue::Text("notes.txt".to_string()))
        );
        assert_eq!(
            values.get(ResourceKey::ContentType),
            Some(&ResourceValue::Text("text/plain".to_string()))
        );
        assert_eq!(values.get(ResourceKey::FileSize), Some(&ResourceValue::Size(5)));
        assert_eq!(
            values.get(ResourceKey::IsDirectory),
            Some(&ResourceValue::Bool(false))
        );
        assert_eq!(
            values.get(ResourceKey::IsHidden),
            Some(&ResourceValue::Bool(false))
        );
        assert!(matches!(
            values.get(ResourceKey::ModificationDate),
            Some(ResourceValue::Date(_))
        ));
    }

    #[test]
    fn directories_have_no_file_size() {
        let tmp = TempDir::new().unwrap();
        let values = read_metadata(tmp.path()).unwrap();
        assert!(values.get(ResourceKey::FileSize).is_none());
        assert_eq!(
            values.get(ResourceKey::IsDirectory),
            Some(&ResourceValue::Bool(true))
        );
    }

    #[test]
    fn unknown_content_type_is_omitted() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("blob.qqzz");
        fs::write(&file, "x").unwrap();
        let values = read_metadata(&file).unwrap();
        assert!(values.get(ResourceKey::ContentType).is_none());
    }

    #[test]
    fn hidden_file_flagged() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join(".env");
        fs::write(&file, "").unwrap();
        let values = read_metadata(&file).unwrap();
        assert_eq!(
            values.get(ResourceKey::IsHidden),
            Some(&ResourceValue::Bool(true))
        );
    }

    #[cfg(unix)]
    #[test]
    fn unix_specific_keys_present() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("run.sh");
        fs::write(&file, "#!/bin/sh").unwrap();
        fs::set_permissions(&file, fs::Permissions::from_mode(0o755)).unwrap();

        let values = read_metadata(&file).unwrap();
        assert_eq!(
            values.get(ResourceKey::Permissions),
            Some(&ResourceValue::Text("0755".to_string()))
        );
        assert_eq!(
            values.get(ResourceKey::IsExecutable),
            Some(&ResourceValue::Bool(true))
        );
        assert_eq!(values.get(ResourceKey::LinkCount), Some(&ResourceValue::Number(1)));
        assert!(values.get(ResourceKey::FileIdentifier).is_some());
    }

    #[test]
    fn missing_path_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = read_metadata(&tmp.path().join("nope"));
        assert!(matches!(result, Err(CoreError::NotFound(_))));
    }

    #[test]
    fn rows_format_by_type() {
        let mut values = ResourceValues::default();
        values.insert(ResourceKey::IsHidden, Some(ResourceValue::Bool(false)));
        values.insert(ResourceKey::FileSize, Some(ResourceValue::Size(1536)));
        values.insert(ResourceKey::LinkCount, Some(ResourceValue::Number(3)));
        values.insert(
            ResourceKey::ModificationDate,
            Some(ResourceValue::Date(
                SystemTime::UNIX_EPOCH + Duration::from_secs(86_400 * 400),
            )),
        );
        values.insert(ResourceKey::Permissions, None);

        let rows = values.rows("%Y");
        let rendered: Vec<(&str, &str)> =
            rows.iter().map(|r| (r.label, r.value.as_str())).collect();

        assert_eq!(rendered[0], ("isHidden", "false"));
        assert_eq!(rendered[1], ("contentModificationDate", "1971"));
        assert_eq!(rendered[2], ("fileSize", "1.5 KB"));
        assert_eq!(rendered[3], ("fileSize", "1,536 bytes"));
        assert_eq!(rendered[4], ("linkCount", "3"));
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn every_key_has_a_label() {
        for key in ResourceKey::ALL {
            assert!(!key.label().is_empty());
        }
        assert_eq!(ResourceKey::ALL.len(), 20);
    }

    /// Mono 8-bit PCM at 8 kHz holding `samples` bytes of silence.
    fn wav_bytes(samples: u32) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + samples).to_le_bytes());
        out.extend_from_slice(b"WAVEfmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&8000u32.to_le_bytes());
        out.extend_from_slice(&8000u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&8u16.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&samples.to_le_bytes());
        out.resize(out.len() + samples as usize, 0x80);
        out
    }

    #[test]
    fn audio_files_report_duration() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("tone.wav");
        fs::write(&file, wav_bytes(8000)).unwrap();

        let values = read_metadata(&file).unwrap();
        let Some(ResourceValue::Duration(d)) = values.get(ResourceKey::AudioDuration) else {
            panic!("expected an audio duration");
        };
        assert!((990..=1010).contains(&d.as_millis()));
    }

    #[test]
    fn duration_omitted_for_other_files() {
        let tmp = TempDir::new().unwrap();
        let text = tmp.path().join("notes.txt");
        fs::write(&text, "hello").unwrap();
        let garbage = tmp.path().join("broken.wav");
        fs::write(&garbage, "not audio at all").unwrap();

        assert!(read_metadata(&text)
            .unwrap()
            .get(ResourceKey::AudioDuration)
            .is_none());
        assert!(read_metadata(&garbage)
            .unwrap()
            .get(ResourceKey::AudioDuration)
            .is_none());
    }

    #[test]
    fn durations_format_with_milliseconds() {
        assert_eq!(format_duration(Duration::from_millis(1_500)), "0:01.500");
        assert_eq!(format_duration(Duration::from_millis(205_123)), "3:25.123");
        assert_eq!(
            format_duration(Duration::from_millis(3_723_004)),
            "1:02:03.004"
        );
        let mut values = ResourceValues::default();
        values.insert(
            ResourceKey::AudioDuration,
            Some(ResourceValue::Duration(Duration::from_secs(61))),
        );
        assert_eq!(values.rows("%Y")[0].value, "1:01.000");
    }
}
