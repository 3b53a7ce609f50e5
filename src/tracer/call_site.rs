//! Call site capture and trace line formatting

use super::render::ArgList;
use std::fmt;
use std::panic::Location;

/// File basename and line of a call expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite {
    file: &'static str,
    line: u32,
}

impl CallSite {
    /// The location of whoever called the enclosing `#[track_caller]` function
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self::new(location.file(), location.line())
    }

    /// Build a call site from a source path; only the basename is kept
    pub fn new(file: &'static str, line: u32) -> Self {
        Self {
            file: basename(file),
            line,
        }
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

fn basename(path: &'static str) -> &'static str {
    path.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(path)
}

/// The `file:line:name(args)` prefix shared by the records of one call
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TraceLine(String);

impl TraceLine {
    pub fn new(site: &CallSite, name: &str, args: &ArgList) -> Self {
        Self(format!("{}:{}({})", site, name, args.render()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TraceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TraceLine {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Split a type path on `::`, ignoring separators nested inside `<...>`
fn path_segments(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let bytes = path.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'<' | b'(' | b'[' => depth += 1,
            // the `>` of a `->` return arrow closes nothing
            b'>' if i > 0 && bytes[i - 1] == b'-' => {}
            b'>' | b')' | b']' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                segments.push(&path[start..i]);
                i += 2;
                start = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    segments.push(&path[start..]);
    segments
}

/// Reduce one path segment to a bare identifier
///
/// `Vec<u8>` becomes `Vec`; `<a::Foo as a::Bar>` becomes `Foo`.
fn clean_segment(segment: &str) -> &str {
    if let Some(inner) = segment.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        let self_type = inner.split(" as ").next().unwrap_or(inner);
        return short_type_name(self_type);
    }
    match segment.find('<') {
        Some(idx) => &segment[..idx],
        None => segment,
    }
}

/// Last path segment of a type name, without generic arguments
pub(crate) fn short_type_name(type_name: &str) -> &str {
    let segments = path_segments(type_name);
    segments
        .last()
        .map(|last| clean_segment(last))
        .unwrap_or(type_name)
}

/// Function pointers and boxed or borrowed `dyn Fn` objects
fn is_anonymous_fn(type_name: &str, last: &str) -> bool {
    let bare = type_name.trim_start_matches('&').trim_start_matches("mut ");
    if ["fn(", "for<", "unsafe ", "extern ", "dyn "]
        .iter()
        .any(|prefix| bare.starts_with(prefix))
    {
        return true;
    }
    matches!(clean_segment(last), "Box" | "Arc" | "Rc") && last.contains("<dyn ")
}

/// Derive the name shown in trace lines from a callable's type name
///
/// Free functions show their declared name, methods and associated functions
/// show `Type::method` when `qualified` is set. Closures show `<closure>`,
/// function pointers and `dyn Fn` objects show `<fn>`.
pub(crate) fn display_name(type_name: &str, qualified: bool) -> String {
    let segments = path_segments(type_name);
    let Some(last) = segments.last().copied() else {
        return type_name.to_string();
    };

    if last == "{{closure}}" {
        return "<closure>".to_string();
    }
    if is_anonymous_fn(type_name, last) {
        return "<fn>".to_string();
    }

    let name = clean_segment(last);
    if !qualified || segments.len() < 2 {
        return name.to_string();
    }

    let owner = clean_segment(segments[segments.len() - 2]);
    if owner.starts_with(|c: char| c.is_ascii_uppercase()) {
        format!("{}::{}", owner, name)
    } else {
        name.to_string()
    }
}
