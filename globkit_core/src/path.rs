//! Path classification and string helpers.
//!
//! A pattern is split into a directory part and a final (possibly wildcard)
//! name part. A pattern that literally names an existing directory is never
//! split: the whole string is the directory, so `foo/bar` and `foo/bar/`
//! classify the same way when `bar` is a real directory.

use std::env;
use std::path::{is_separator, Component, Path, PathBuf};

use path_slash::PathBufExt;

/// Directory and name parts of a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PatternParts {
    /// Everything before the last separator, or the whole pattern for an
    /// existing directory. Empty when the pattern has no directory part.
    pub directory: String,
    /// Final component; empty for an existing directory.
    pub name: String,
}

/// Lexically normalizes a path: unifies separators, drops `.` components
/// and trailing separators. Does not touch the filesystem and keeps `..`.
pub fn normalize_path(path: &str) -> PathBuf {
    let path = PathBuf::from_slash(path);
    let normalized: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}

/// Splits a pattern, short-circuiting on existing directories.
pub fn split_pattern(pattern: &str) -> PatternParts {
    split_pattern_with(pattern, Path::is_dir)
}

/// [`split_pattern`] with a caller-supplied directory check.
pub fn split_pattern_with(pattern: &str, is_dir: impl Fn(&Path) -> bool) -> PatternParts {
    if !pattern.is_empty() && is_dir(Path::new(pattern)) {
        return PatternParts {
            directory: normalize_path(pattern).to_string_lossy().into_owned(),
            name: String::new(),
        };
    }

    let (directory, name) = split_literal(pattern);
    PatternParts {
        directory: directory.to_string(),
        name: name.to_string(),
    }
}

/// Directory part of `pattern`.
pub fn path_of(pattern: &str) -> String {
    split_pattern(pattern).directory
}

/// Final component of `pattern`.
pub fn name_of(pattern: &str) -> String {
    split_pattern(pattern).name
}

/// Name of `pattern` without its extension.
pub fn stem_of(pattern: &str) -> String {
    let name = name_of(pattern);
    split_extension(&name).0.to_string()
}

/// Extension of `pattern`, without the dot.
pub fn extension_of(pattern: &str) -> String {
    let name = name_of(pattern);
    split_extension(&name).1.to_string()
}

/// Expands a leading `~` to the home directory and `$VAR` / `${VAR}` to
/// environment values. Unknown variables are left as written.
pub fn expand_path(path: &str) -> String {
    expand_vars(&expand_user(path))
}

fn split_literal(pattern: &str) -> (&str, &str) {
    match pattern.rfind(is_separator) {
        Some(idx) => {
            let head = &pattern[..=idx];
            let trimmed = head.trim_end_matches(is_separator);
            // Keep the root separator itself
            let directory = if trimmed.is_empty() { head } else { trimmed };
            (directory, &pattern[idx + 1..])
        }
        None => ("", pattern),
    }
}

/// Splits at the last dot; leading dots of a dot-file are part of the stem.
fn split_extension(name: &str) -> (&str, &str) {
    let lead = name.len() - name.trim_start_matches('.').len();
    match name[lead..].rfind('.') {
        Some(idx) => (&name[..lead + idx], &name[lead + idx + 1..]),
        None => (name, ""),
    }
}

fn expand_user(path: &str) -> String {
    let Some(rest) = path.strip_prefix('~') else {
        return path.to_string();
    };
    // `~user` forms are not expanded
    if !rest.is_empty() && !rest.starts_with(is_separator) {
        return path.to_string();
    }

    match dirs::home_dir() {
        Some(home) => format!("{}{}", home.to_string_lossy(), rest),
        None => path.to_string(),
    }
}

fn expand_vars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let (name, consumed) = match after.strip_prefix('{') {
            Some(braced) => match braced.find('}') {
                Some(end) => (&braced[..end], end + 2),
                None => ("", 0),
            },
            None => {
                let end = after
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                    .unwrap_or(after.len());
                (&after[..end], end)
            }
        };

        match Some(name)
            .filter(|n| !n.is_empty())
            .and_then(|n| env::var(n).ok())
        {
            Some(value) => {
                out.push_str(&value);
                rest = &after[consumed..];
            }
            None => {
                out.push('$');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
