//! Locating the metadata block in a document.
//!
//! Two fence conventions are recognised:
//!
//! ```text
//! ---              title: Hello
//! title: Hello     ---
//! ---              # Body
//! # Body
//! ```
//!
//! The left form (fence before and after the block) is checked first; the
//! right form (a single fence after the block) is the fallback. A fence is a
//! line made only of three or more `-`, or three or more `;`.

use std::sync::LazyLock;

use regex::Regex;

use super::types::SplitResult;

/// Document starts with something fence-like.
static PREFIX_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A(?:-{3,}|;{3,})").unwrap());

/// Head, then the first fence line, then the rest.
static TRAILING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A(.+?)\n(-{3,}|;{3,})(?:\z|\n(.*)\z)").unwrap());

/// Split a document into its raw metadata block and body.
pub fn split(text: &str) -> SplitResult {
    if let Some(result) = split_fenced(text) {
        tracing::trace!(separator = ?result.separator, "matched fenced front matter");
        return result;
    }

    if let Some(caps) = TRAILING_FENCE.captures(text) {
        // A leading fence without its closing twin is body text.
        if PREFIX_SEPARATOR.is_match(text) {
            return SplitResult::content_only(text);
        }

        tracing::trace!(separator = &caps[2], "matched trailing-fence front matter");
        return SplitResult {
            data: Some(caps[1].to_string()),
            content: caps.get(3).map_or("", |m| m.as_str()).to_string(),
            separator: Some(caps[2].to_string()),
            prefix_separator: false,
        };
    }

    SplitResult::content_only(text)
}

/// Match a block opened and closed by the same fence line.
fn split_fenced(text: &str) -> Option<SplitResult> {
    let (fence, after) = text.split_once('\n')?;
    if !is_fence(fence) {
        return None;
    }

    let closing = format!("\n{fence}");
    for (idx, _) in after.match_indices(&closing) {
        // The block holds at least one character.
        if idx == 0 {
            continue;
        }

        let tail = &after[idx + closing.len()..];
        let content = if tail.is_empty() {
            ""
        } else if let Some(rest) = tail.strip_prefix('\n') {
            rest
        } else {
            // A longer fence (`----` after `---`) does not close the block.
            continue;
        };

        return Some(SplitResult {
            data: Some(after[..idx].to_string()),
            content: content.to_string(),
            separator: Some(fence.to_string()),
            prefix_separator: true,
        });
    }
    None
}

fn is_fence(line: &str) -> bool {
    line.len() >= 3
        && (line.bytes().all(|b| b == b'-') || line.bytes().all(|b| b == b';'))
}
