//! Caller-frame and stack-trace capture.
//!
//! Two ways to locate the code that raised an error:
//!
//! - **Compiler-provided location** (`#[track_caller]`). Portable and exact.
//!   Any helper that is itself `#[track_caller]` is skipped automatically, so
//!   a domain-level constructor can attribute an error to *its* caller.
//! - **Stack walk** (`frame-walk` feature). Resolves the frame `skip` levels
//!   above the function that requested it. Depends on unwind tables and debug
//!   symbols being present; when they are not, or the requested depth is past
//!   the end of the stack, nothing is returned.
//!
//! Neither path can fail construction: a miss simply yields `None`.

use std::borrow::Cow;
use std::fmt;
use std::panic::Location;

/// Field key used for the resolved caller.
pub const CALLER_KEY: &str = "caller";

/// Field key used for a captured stack trace.
pub const STACKTRACE_KEY: &str = "stacktrace";

/// A resolved source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    file: Cow<'static, str>,
    line: u32,
}

impl Caller {
    /// Build from an explicit file and line.
    #[inline]
    pub fn new(file: impl Into<Cow<'static, str>>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Location of the (track_caller-transparent) caller of this function.
    #[track_caller]
    #[inline]
    pub fn here() -> Self {
        Self::from_location(Location::caller())
    }

    /// Copy a compiler-provided location.
    #[inline]
    pub fn from_location(location: &Location<'_>) -> Self {
        Self::new(location.file().to_owned(), location.line())
    }

    /// Full file path as reported by the compiler or debug info.
    #[inline]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// 1-based line number.
    #[inline]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Last two path segments of [`file`](Self::file).
    #[inline]
    pub fn short_file(&self) -> &str {
        trim_file_path(&self.file)
    }
}

impl fmt::Display for Caller {
    /// `<short-file>:<line>`, the value stored under the `caller` field.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.short_file(), self.line)
    }
}

/// Keep the last two segments of a path.
///
/// `/home/u/project/pkg/file.rs` becomes `pkg/file.rs`. Paths with fewer
/// than two separators are returned unchanged. Both `/` and `\` count as
/// separators so compiler paths on Windows trim the same way.
pub fn trim_file_path(path: &str) -> &str {
    let is_sep = |c: char| c == '/' || c == '\\';
    let Some(last) = path.rfind(is_sep) else {
        return path;
    };
    match path[..last].rfind(is_sep) {
        Some(prev) => &path[prev + 1..],
        None => path,
    }
}

/// Capture the full current stack trace as text.
///
/// Always captures, regardless of `RUST_BACKTRACE`. The cost is paid only
/// by call sites that ask for it.
pub fn capture_stacktrace() -> String {
    std::backtrace::Backtrace::force_capture().to_string()
}

// ============================================================================
// Stack walking
// ============================================================================

/// Symbol of the frame every walk is anchored on.
#[cfg(feature = "frame-walk")]
const ANCHOR_SYMBOL: &str = "errorx::caller::resolve_frame";

/// Frames between the anchor and the requester: the public entry point
/// (`with_caller_skip`) that called `resolve_frame`.
#[cfg(feature = "frame-walk")]
const BASE_DEPTH: usize = 1;

/// Resolve the frame `skip` levels above the function that called the
/// public entry point.
///
/// Must be called directly from a non-inlined entry point; see
/// [`BASE_DEPTH`].
#[cfg(feature = "frame-walk")]
#[inline(never)]
pub(crate) fn resolve_frame(skip: usize) -> Option<Caller> {
    let depth = BASE_DEPTH.saturating_add(skip);
    let mut anchored = false;
    let mut remaining = 0usize;
    let mut found = None;

    backtrace::trace(|frame| {
        let mut is_anchor = false;
        if !anchored || remaining == depth {
            backtrace::resolve_frame(frame, |symbol| {
                if let Some(name) = symbol.name() {
                    if format!("{:#}", name).contains(ANCHOR_SYMBOL) {
                        is_anchor = true;
                    }
                }
            });
        }

        if is_anchor {
            // The closure and the function itself may both report the
            // anchor name; counting restarts at the outermost one.
            anchored = true;
            remaining = depth;
            return true;
        }
        if !anchored {
            return true;
        }
        if remaining > 0 {
            remaining -= 1;
            return true;
        }

        backtrace::resolve_frame(frame, |symbol| {
            if found.is_some() {
                return;
            }
            if let (Some(file), Some(line)) = (symbol.filename(), symbol.lineno()) {
                found = Some(Caller::new(file.to_string_lossy().into_owned(), line));
            }
        });
        false
    });

    found
}

#[cfg(not(feature = "frame-walk"))]
#[inline]
pub(crate) fn resolve_frame(_skip: usize) -> Option<Caller> {
    None
}
