//! Parsing of the `yt-dlp -F` format table and choice of the rendition to download.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// `ID  EXT  RESOLUTION` at the start of a table row.
static ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([\w-]+)\s+(\w+)\s+([\dx]+|audio only)").expect("row pattern is valid")
});

static SIZE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([\d.]+)(KiB|MiB|GiB)").expect("size pattern is valid")
});

static RESOLUTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+x\d+$").expect("resolution pattern is valid"));

/// Header, separator and non-video rows of the table.
const SKIP_MARKERS: [&str; 5] = ["ID", "[youtube]", "[line]", "----------", "mhtml"];

/// Resolutions small enough to fit the upload limit in practice.
const PREFERRED_RESOLUTIONS: [&str; 3] = ["640", "360", "240"];

/// One downloadable rendition from the format table. Size is in MiB.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoFormat {
    pub id: String,
    pub container: String,
    pub resolution: String,
    pub size_mb: f64,
}

fn is_skipped(line: &str, skip_video_only: bool) -> bool {
    line.trim().is_empty()
        || SKIP_MARKERS.iter().any(|m| line.contains(m))
        || line.contains("audio only")
        || (skip_video_only && line.contains("video only"))
}

/// Parses `9.05MiB` style tokens into MiB. KiB values are rounded to 4 decimals.
fn parse_size(line: &str) -> Option<f64> {
    let caps = SIZE_RE.captures(line)?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    let size = match caps.get(2)?.as_str() {
        "GiB" => value * 1024.0,
        "KiB" => (value / 1024.0 * 10_000.0).round() / 10_000.0,
        _ => value,
    };
    Some(size)
}

/// Parses one row of `yt-dlp -F` into a [`VideoFormat`].
///
/// Rows without a `WxH` resolution or a size, header rows, audio-only and video-only
/// streams are rejected: only muxed renditions can be sent as they are.
pub fn parse_format_line(line: &str) -> Option<VideoFormat> {
    if is_skipped(line, true) {
        return None;
    }
    let row = ROW_RE.captures(line)?;
    let size_mb = parse_size(line)?;
    let resolution = row.get(3)?.as_str();
    if !RESOLUTION_RE.is_match(resolution) {
        return None;
    }
    Some(VideoFormat {
        id: row.get(1)?.as_str().to_string(),
        container: row.get(2)?.as_str().to_string(),
        resolution: resolution.to_string(),
        size_mb,
    })
}

/// Extracts only the size (MiB) from a row. Video-only rows count here:
/// sites serving a single stream list it that way.
pub fn parse_size_line(line: &str) -> Option<f64> {
    if is_skipped(line, false) {
        return None;
    }
    parse_size(line)
}

/// Smallest mp4 rendition with a preferred resolution, if any.
pub fn select_best_format(formats: &[VideoFormat]) -> Option<&VideoFormat> {
    formats
        .iter()
        .filter(|f| f.container.eq_ignore_ascii_case("mp4"))
        .filter(|f| PREFERRED_RESOLUTIONS.iter().any(|r| f.resolution.contains(r)))
        .min_by(|a, b| a.size_mb.total_cmp(&b.size_mb))
}
