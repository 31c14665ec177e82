//! Convenience macros.
//!
//! - [`errorx!`](crate::errorx!) builds an [`Error`](crate::Error) from a
//!   format string and an optional list of options.
//! - [`caller!`](crate::caller!) captures `file!()`/`line!()` at the macro
//!   site as a `caller` option.
//! - [`sanitized!`](crate::sanitized!) bounds untrusted text before it
//!   becomes a field value.
//!
//! ```rust
//! use errorx::{caller, errorx, sanitized, with_int, with_string};
//!
//! let raw_input = "bob\u{1b}[31m\nadmin";
//! let err = errorx!("user {} rejected", 17; with_string("input", sanitized!(raw_input)), caller!());
//!
//! assert_eq!(err.to_string(), "user 17 rejected");
//! assert_eq!(err.field("input"), Some("bob??admin"));
//! ```

/// Maximum length, in bytes, of a sanitized value.
pub const MAX_SANITIZED_LEN: usize = 256;

/// Suffix marking a sanitized value that was cut.
const SANITIZED_TRUNCATION: &str = "...[TRUNCATED]";

/// Returned when nothing printable survives sanitization.
const INVALID_INPUT: &str = "[INVALID_INPUT]";

/// Bound `raw` for use as a field value.
///
/// - ANSI escape sequences (`ESC ... m`) collapse to a single `?`
/// - other control characters become `?`
/// - output is cut to [`MAX_SANITIZED_LEN`] bytes on a char boundary and
///   marked with `...[TRUNCATED]`
/// - input with no printable character becomes `[INVALID_INPUT]`
pub fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len().min(MAX_SANITIZED_LEN));
    let mut printable = false;
    let mut truncated = false;
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        let replacement = if c == '\u{1b}' {
            // Swallow the rest of the escape sequence.
            for rest in chars.by_ref() {
                if rest == 'm' {
                    break;
                }
            }
            '?'
        } else if c.is_control() {
            '?'
        } else {
            printable = true;
            c
        };

        if out.len() + replacement.len_utf8() > MAX_SANITIZED_LEN {
            truncated = true;
            break;
        }
        out.push(replacement);
    }

    if !printable {
        return INVALID_INPUT.to_owned();
    }
    if truncated {
        let mut cut = MAX_SANITIZED_LEN.saturating_sub(SANITIZED_TRUNCATION.len());
        while cut > 0 && !out.is_char_boundary(cut) {
            cut -= 1;
        }
        out.truncate(cut);
        out.push_str(SANITIZED_TRUNCATION);
    }
    out
}

/// Sanitize any `Display` value; see [`sanitize`](crate::convenience::sanitize).
#[macro_export]
macro_rules! sanitized {
    ($value:expr) => {
        $crate::convenience::sanitize(&::std::string::ToString::to_string(&$value))
    };
}

/// `caller` option for the line the macro is written on.
///
/// Unlike [`with_caller`](crate::with_caller) this is never affected by
/// `#[track_caller]` on enclosing functions.
#[macro_export]
macro_rules! caller {
    () => {
        $crate::with_caller_at($crate::Caller::new(::std::file!(), ::std::line!()))
    };
}

/// Build an [`Error`](crate::Error) from a format string.
///
/// Options follow a `;`:
///
/// ```rust
/// use errorx::{errorx, with_int, with_internal};
///
/// let plain = errorx!("nothing to see");
/// let formatted = errorx!("row {} missing", 3);
/// let rich = errorx!("row {} missing", 3; with_internal("no rows"), with_int("row", 3));
///
/// assert_eq!(plain.to_string(), "nothing to see");
/// assert_eq!(formatted.to_string(), "row 3 missing");
/// assert_eq!(rich.field("row"), Some("3"));
/// ```
#[macro_export]
macro_rules! errorx {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::Error::new(::std::format!($fmt $(, $arg)*), [])
    };
    ($fmt:literal $(, $arg:expr)* ; $($option:expr),+ $(,)?) => {
        $crate::Error::new(::std::format!($fmt $(, $arg)*), [$($option),+])
    };
}
