// src/checker/html.rs
// =============================================================================
// This module extracts media references from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Is built on html5ever (Mozilla's HTML parser)
// - Recovers from broken markup exactly like a browser would
//
// Which elements count as media, and which attribute holds the URL:
//   img -> src, script -> src, link -> href, video -> src,
//   source -> src, track -> src, iframe -> src
//
// References are returned exactly as written in the markup (they may be
// relative). Resolving them against the page URL is resolve.rs's job.
//
// Rust concepts:
// - Iterators: references() is lazy and can be restarted any number of times
// - Lifetimes: the iterator borrows the parsed document
// - Newtypes: MediaReference wraps the raw attribute string
// =============================================================================

use scraper::Html;
use url::Url;

// Element name -> attribute that carries the URL
const MEDIA_ATTRIBUTES: &[(&str, &str)] = &[
    ("img", "src"),
    ("script", "src"),
    ("link", "href"),
    ("video", "src"),
    ("source", "src"),
    ("track", "src"),
    ("iframe", "src"),
];

// Throwaway base used only to check that an attribute value is a
// well-formed URL reference. Nothing is ever resolved against it for real.
const PLACEHOLDER_BASE: &str = "http://reference.invalid/";

/// A URL exactly as written in a media element's attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaReference {
    element: &'static str,
    value: String,
}

impl MediaReference {
    pub fn new(element: &'static str, value: impl Into<String>) -> Self {
        Self {
            element,
            value: value.into(),
        }
    }

    /// The tag name the reference was found on (e.g. "img").
    pub fn element(&self) -> &'static str {
        self.element
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

/// A parsed page that media references can be read from.
pub struct MediaDocument {
    html: Html,
}

impl MediaDocument {
    // Parses raw page bytes
    //
    // The HTML parser never gives up: unclosed tags, stray end tags and the
    // like are repaired. Bytes that aren't UTF-8 (a windows-1252 page, say)
    // become U+FFFD; tag names, attribute names and URLs are ASCII in
    // practice, so the references come through unchanged.
    pub fn parse(bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes);

        Self {
            html: Html::parse_document(&text),
        }
    }

    // Walks the whole tree in document order (depth-first, pre-order) and
    // yields at most one reference per qualifying element
    //
    // Calling this twice gives the same sequence both times.
    pub fn references(&self) -> impl Iterator<Item = MediaReference> + '_ {
        self.html
            .tree
            .root()
            .descendants()
            .filter_map(|node| node.value().as_element())
            .filter_map(|element| {
                let (name, attribute) = media_attribute(element.name())?;
                let value = element.attr(attribute)?;
                if !is_url_reference(value) {
                    return None;
                }
                Some(MediaReference::new(name, value))
            })
    }
}

// Convenience wrapper: parse and collect in one step
//
// The parsed document is dropped before returning, so callers can hold the
// result across .await points freely.
pub fn extract_media_urls(bytes: &[u8]) -> Vec<MediaReference> {
    let document = MediaDocument::parse(bytes);
    document.references().collect()
}

// Looks up the URL attribute for an element name
fn media_attribute(element: &str) -> Option<(&'static str, &'static str)> {
    MEDIA_ATTRIBUTES
        .iter()
        .find(|(name, _)| *name == element)
        .copied()
}

// Empty values and values the URL parser rejects are skipped silently
fn is_url_reference(value: &str) -> bool {
    if value.trim().is_empty() {
        return false;
    }
    Url::parse(PLACEHOLDER_BASE)
        .and_then(|base| base.join(value))
        .is_ok()
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why walk the tree instead of using CSS selectors?
//    - Each element maps to exactly one attribute, and we want a single pass
//      in document order over all seven element kinds
//    - descendants() is a pre-order walk, which is document order
//
// 2. Why does parse() take bytes and not &str?
//    - The page body comes off the network as bytes, in whatever charset
//      the server used
//    - Lossy decoding keeps every ASCII byte, which is all we look at
//
// 3. What is impl Iterator + '_?
//    - "some iterator type, borrowing from self"
//    - Nothing is computed until the caller pulls items out of it
// -----------------------------------------------------------------------------
