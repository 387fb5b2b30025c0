//! HTML minification for finished pages.
//!
//! [`minify_html`] runs in three stages:
//!
//! ## Stage 1: Protect
//!
//! Every `<script>…</script>` and `<style>…</style>` block (case-insensitive,
//! shortest match) is cut out verbatim and replaced by a numbered placeholder
//! comment carrying a nonce unique to the call. Placeholder-looking comments
//! already present in the input are ordinary comments and get removed.
//!
//! ## Stage 2: Squeeze
//!
//! On the remaining skeleton: comments are removed (conditional comments
//! `<!--[if …]>` and placeholders excepted), whitespace runs collapse to one
//! space, whitespace between adjacent tags is dropped, and the result is
//! trimmed.
//!
//! ## Stage 3: Restore
//!
//! Placeholders are swapped back for their original blocks, byte for byte.
//!
//! The minifier works on tag boundaries, not on a parsed DOM. Attribute values
//! containing `>` or `<` are not supported. Whitespace-sensitive elements
//! other than `script` and `style` (such as `pre`) are collapsed too.
//!
//! Minification is deterministic and idempotent.
//!
//! ```rust
//! use pagetree_render::minify_html;
//!
//! assert_eq!(
//!     minify_html("<div>  <span>Hello</span>   </div>"),
//!     "<div><span>Hello</span></div>"
//! );
//! ```

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use uuid::Uuid;

const PLACEHOLDER_PREFIX: &str = "<!--pagetree:keep:";

static PROTECTED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
        .expect("protected block pattern is valid")
});

static COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern is valid"));

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<!--pagetree:keep:([0-9a-f]+):(\d+)-->").expect("placeholder pattern is valid")
});

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static BETWEEN_TAGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r">\s+<").expect("inter-tag pattern is valid"));

/// Minifies an HTML document or fragment.
pub fn minify_html(html: &str) -> String {
    let nonce = Uuid::new_v4().simple().to_string();
    let marker = format!("{}{}:", PLACEHOLDER_PREFIX, nonce);

    let mut blocks = Vec::new();
    let skeleton = PROTECTED.replace_all(html, |caps: &Captures| {
        blocks.push(caps[0].to_string());
        format!("{}{}-->", marker, blocks.len() - 1)
    });

    let skeleton = COMMENT.replace_all(&skeleton, |caps: &Captures| {
        let comment = &caps[0];
        if comment.starts_with("<!--[if") || comment.starts_with(&marker) {
            comment.to_string()
        } else {
            String::new()
        }
    });
    let skeleton = WHITESPACE.replace_all(&skeleton, " ");
    let skeleton = BETWEEN_TAGS.replace_all(&skeleton, "><");
    let skeleton = skeleton.trim();

    if blocks.is_empty() {
        return skeleton.to_string();
    }

    PLACEHOLDER
        .replace_all(skeleton, |caps: &Captures| {
            Some(&caps[1])
                .filter(|found| *found == nonce)
                .and_then(|_| caps[2].parse::<usize>().ok())
                .and_then(|index| blocks.get(index))
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
