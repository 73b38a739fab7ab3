//! Deterministic ordering of dependency lines.
//!
//! Dependencies are grouped by their top-level directory, with paths that
//! have no directory at all sorted first. The ordering is implemented as a
//! string sort key so ties fall through to the remaining path segments.

const SEGMENT_WIDTH: usize = 30;
const TOP_LEVEL_WIDTH: usize = 29;

/// Drops a leading `plugin!` prefix; group and sort decisions look at the
/// resource path only.
pub fn strip_plugin_prefix(path: &str) -> &str {
    match path.split_once('!') {
        Some((_, rest)) => rest,
        None => path,
    }
}

/// The group a dependency path belongs to when rendering: its first
/// directory segment, or the empty string for top-level paths.
pub fn top_level_dir(path: &str) -> &str {
    let path = strip_plugin_prefix(path);
    match path.rsplit_once('/') {
        Some((dirs, _)) => dirs.split('/').next().unwrap_or(""),
        None => "",
    }
}

/// Sort key for one dependency path. Top-level paths get a `'0'` sentinel
/// prefix and a narrower pad so they collate before any directory group;
/// every path segment is right-padded with `'0'` to a fixed width.
pub fn sort_key(path: &str) -> String {
    let path = strip_plugin_prefix(path);
    let top_level = !path.contains('/');

    let (prefix, width) = if top_level {
        ("0", TOP_LEVEL_WIDTH)
    } else {
        ("", SEGMENT_WIDTH)
    };

    let mut key = String::from(prefix);
    for segment in path.split('/') {
        if segment.len() >= width {
            key.push_str(segment.get(..width).unwrap_or(segment));
        } else {
            key.push_str(segment);
            key.extend(std::iter::repeat_n('0', width - segment.len()));
        }
    }
    key
}
