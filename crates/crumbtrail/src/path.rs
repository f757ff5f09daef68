//! Path and label helpers for breadcrumb resolution.
//!
//! These operate on the path component of a link only; query strings and
//! fragments are carried through untouched where a function says so.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Trailing slash policy applied to every produced link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailingSlash {
    /// Links never end with `/` (except the bare root).
    #[default]
    None,
    /// Links always end with `/`, except file-like paths such as `/feed.xml`.
    Always,
}

impl std::str::FromStr for TrailingSlash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" | "false" | "never" => Ok(Self::None),
            "always" | "true" => Ok(Self::Always),
            other => Err(Error::TrailingSlash(other.to_string())),
        }
    }
}

/// Strip the query string and fragment from a path.
pub fn without_query(path: &str) -> &str {
    match path.find(['?', '#']) {
        Some(pos) => &path[..pos],
        None => path,
    }
}

/// Strip trailing slashes. The bare root (or an empty path) becomes `/`.
pub fn without_trailing_slash(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Append a trailing slash if missing.
pub fn with_trailing_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

/// Normalize the trailing slash of a link according to `policy`.
///
/// Only the path component is touched; a query string or fragment is kept as
/// is. File-like paths (last segment contains a `.`) are returned unchanged.
/// Applying this twice yields the same result as applying it once.
pub fn fix_slashes(policy: TrailingSlash, link: &str) -> String {
    let pathname = without_query(link);
    let suffix = &link[pathname.len()..];

    let last_segment = pathname.rsplit('/').next().unwrap_or_default();
    if last_segment.contains('.') {
        return link.to_string();
    }

    let fixed = match policy {
        TrailingSlash::Always => with_trailing_slash(pathname),
        TrailingSlash::None => without_trailing_slash(pathname).to_string(),
    };

    format!("{fixed}{suffix}")
}

/// Whether `link` is a plain path (as opposed to an absolute URL or scheme).
pub fn is_path(link: &str) -> bool {
    link.starts_with('/') && !link.starts_with("//")
}

/// Title-case a slug: `-` becomes a space, each word gets an upper-case first
/// letter and lower-case remainder.
///
/// ```
/// assert_eq!(crumbtrail::path::title_case("my-first-POST"), "My First Post");
/// ```
pub fn title_case(s: &str) -> String {
    s.replace('-', " ")
        .split(' ')
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    // Leading punctuation is kept; the first word character is capitalized.
    let Some(start) = word.find(|c: char| c.is_alphanumeric() || c == '_') else {
        return word.to_string();
    };

    let (prefix, rest) = word.split_at(start);
    let mut chars = rest.chars();
    let Some(first) = chars.next() else {
        return word.to_string();
    };

    let mut out = String::with_capacity(word.len());
    out.push_str(prefix);
    out.extend(first.to_uppercase());
    out.push_str(&chars.as_str().to_lowercase());
    out
}

/// Title derived from the last non-empty segment of a path.
///
/// `/blog/my-post/` → `My Post`; `/` → empty string.
pub fn path_to_title(path: &str) -> String {
    let last = without_query(path)
        .split('/')
        .rfind(|s| !s.is_empty())
        .unwrap_or_default();
    title_case(last)
}

/// Cumulative path prefixes from `root` down to `path`.
///
/// The root itself is always yielded first, followed by one entry per path
/// segment below the root:
///
/// ```
/// let segments: Vec<_> = crumbtrail::path::segments("/blog/my-post", "/").collect();
/// assert_eq!(segments, ["/", "/blog", "/blog/my-post"]);
/// ```
///
/// The iterator is `Clone`, so a trail can be re-walked without recomputing
/// the path.
pub fn segments<'a>(path: &'a str, root: &'a str) -> Segments<'a> {
    Segments {
        root,
        rest: relative_to_root(path, root),
        offset: 0,
        root_done: false,
    }
}

/// Strip `root` from `path` when `path` lies below it, then trim slashes.
fn relative_to_root<'a>(path: &'a str, root: &str) -> &'a str {
    let relative = match path.strip_prefix(root) {
        Some(rest) if root.ends_with('/') || rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    };
    relative.trim_matches('/')
}

/// Iterator returned by [`segments`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    root: &'a str,
    rest: &'a str,
    offset: usize,
    root_done: bool,
}

impl Iterator for Segments<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if !self.root_done {
            self.root_done = true;
            return Some(self.root.to_string());
        }

        loop {
            if self.offset >= self.rest.len() {
                return None;
            }

            let remaining = &self.rest[self.offset..];
            let len = remaining.find('/').unwrap_or(remaining.len());
            let end = self.offset + len;
            self.offset = end + 1;

            // Collapse `//` runs instead of yielding duplicate prefixes.
            if len == 0 {
                continue;
            }

            return Some(join(self.root, &self.rest[..end]));
        }
    }
}

fn join(root: &str, relative: &str) -> String {
    if root.ends_with('/') {
        format!("{root}{relative}")
    } else {
        format!("{root}/{relative}")
    }
}
