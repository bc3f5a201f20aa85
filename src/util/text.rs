//! Unicode-aware text measurement and truncation for the renderer.

use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Ellipsis string used for truncation
const ELLIPSIS: &str = "...";
/// Display width of the ellipsis (3 columns for ASCII "...")
const ELLIPSIS_WIDTH: usize = 3;

/// Display width of a string in terminal columns.
///
/// Handles CJK characters and emoji (2 columns) and zero-width characters
/// (0 columns) correctly; descriptions and song names are user-authored
/// and full of both.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within a maximum display width, appending "..."
/// when text was cut off.
///
/// Returns `Cow::Borrowed` when the string already fits (no allocation in
/// the common render path). For very narrow widths (<= 3 columns) there is
/// no room for "char + ellipsis", so as many characters as fit are returned
/// without the ellipsis.
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if max_width == 0 {
        return Cow::Borrowed("");
    }
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    let budget = max_width.saturating_sub(if max_width > ELLIPSIS_WIDTH {
        ELLIPSIS_WIDTH
    } else {
        0
    });

    let mut out = String::new();
    let mut used = 0usize;
    for ch in s.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }

    if max_width > ELLIPSIS_WIDTH {
        out.push_str(ELLIPSIS);
    }
    Cow::Owned(out)
}
