//! Hex dump formatting for the byte view.

use serde::{Deserialize, Serialize};

/// Bytes shown per row when nothing else is configured.
pub const DEFAULT_BYTES_PER_ROW: usize = 16;

/// Hex digits per space-separated group (two bytes).
const GROUP_DIGITS: usize = 4;

/// One row of a hex dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexRow {
    /// Byte offset of the first byte in this row.
    pub offset: usize,
    /// Uppercase hex digits, grouped in fours: `"4865 6C6C 6F"`.
    pub hex: String,
    /// Printable ASCII characters, `.` for anything else.
    pub ascii: String,
}

/// How row offsets are rendered. Persisted as a user preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetStyle {
    /// Plain decimal counter: `"32"`.
    #[default]
    Decimal,
    /// High and low 16-bit halves in hex: `"0000 0020"`.
    SplitHex,
}

impl OffsetStyle {
    /// Returns the other style.
    pub fn toggled(self) -> Self {
        match self {
            Self::Decimal => Self::SplitHex,
            Self::SplitHex => Self::Decimal,
        }
    }

    /// Renders `offset` in this style.
    pub fn format(self, offset: usize) -> String {
        match self {
            Self::Decimal => offset.to_string(),
            Self::SplitHex => format!("{:04X} {:04X}", (offset >> 16) & 0xFFFF, offset & 0xFFFF),
        }
    }
}

/// Formats `bytes` into rows of `bytes_per_row` bytes.
///
/// Produces `ceil(len / bytes_per_row)` rows; the last row may be short.
/// A `bytes_per_row` of zero is treated as one.
///
/// # Examples
///
/// ```
/// use filebrowser_core::fs::hex::format_hex;
///
/// let rows = format_hex(b"abc", 4);
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].offset, 0);
/// assert_eq!(rows[0].hex, "6162 63");
/// assert_eq!(rows[0].ascii, "abc");
/// ```
pub fn format_hex(bytes: &[u8], bytes_per_row: usize) -> Vec<HexRow> {
    let width = bytes_per_row.max(1);

    bytes
        .chunks(width)
        .enumerate()
        .map(|(row, chunk)| HexRow {
            offset: row * width,
            hex: group_hex(chunk),
            ascii: ascii_gloss(chunk),
        })
        .collect()
}

/// Number of rows [`format_hex`] produces for `len` bytes.
pub fn row_count(len: usize, bytes_per_row: usize) -> usize {
    len.div_ceil(bytes_per_row.max(1))
}

fn group_hex(chunk: &[u8]) -> String {
    let digits = hex::encode_upper(chunk);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / GROUP_DIGITS);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && i % GROUP_DIGITS == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    grouped
}

fn ascii_gloss(chunk: &[u8]) -> String {
    chunk
        .iter()
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            }
        })
        .collect()
}

/// Bytes loaded for the byte view together with their formatted rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexDump {
    len: usize,
    bytes_per_row: usize,
    rows: Vec<HexRow>,
}

impl HexDump {
    /// Formats `bytes` at `bytes_per_row`.
    pub fn new(bytes: &[u8], bytes_per_row: usize) -> Self {
        Self {
            len: bytes.len(),
            bytes_per_row: bytes_per_row.max(1),
            rows: format_hex(bytes, bytes_per_row),
        }
    }

    /// Total number of bytes in the dump.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the dump holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes per row used for formatting.
    pub fn bytes_per_row(&self) -> usize {
        self.bytes_per_row
    }

    /// The formatted rows.
    pub fn rows(&self) -> &[HexRow] {
        &self.rows
    }

    /// Renders every row as a single line: offset, hex, then ASCII.
    pub fn lines(&self, style: OffsetStyle) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| format!("{:>9}  {}  {}", style.format(row.offset), row.hex, row.ascii))
            .collect()
    }
}
