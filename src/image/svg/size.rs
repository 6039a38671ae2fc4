//! Root `<svg>` size attributes.
//!
//! The root start tag is located with `quick-xml`; attributes inside it are
//! read and rewritten textually so that every byte outside that tag stays
//! untouched.

use std::borrow::Cow;
use std::ops::Range;
use std::sync::LazyLock;

use quick_xml::Reader;
use quick_xml::events::Event;
use regex::Regex;

/// One `name="value"` pair. The regex requires leading whitespace, so an
/// attribute like `stroke-width` is never read as `width`.
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*("[^"]*"|'[^']*')"#).unwrap()
});

/// Leading numeric part of a length, `parseFloat` style.
static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").unwrap());

static VIEWBOX_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s,]+").unwrap());

/// Height/width ratio of the drawing, 1 when no usable size hint exists.
pub fn aspect_ratio(markup: &str) -> f64 {
    RootTag::find(markup).map_or(1.0, |root| root.aspect_ratio())
}

/// Set `width`/`height` on the root element.
///
/// Returns the input unchanged when no `<svg>` root can be found.
pub fn rewrite_size(markup: &str, width: u32, height: u32) -> Cow<'_, str> {
    match RootTag::find(markup) {
        Some(root) => Cow::Owned(root.rewrite(markup, width, height)),
        None => Cow::Borrowed(markup),
    }
}

#[derive(Debug)]
struct Attribute<'a> {
    name: &'a str,
    value: &'a str,
    /// Absolute byte range of the value, quotes excluded.
    value_span: Range<usize>,
}

#[derive(Debug)]
struct RootTag<'a> {
    attributes: Vec<Attribute<'a>>,
    /// Where new attributes go: after the last attribute, before `>` or `/>`.
    insert_at: usize,
}

impl<'a> RootTag<'a> {
    fn find(markup: &'a str) -> Option<Self> {
        let span = root_span(markup)?;
        let tag = &markup[span.clone()];

        // `<svg`, `<svg:svg`, ... up to the first whitespace or tag end
        let name_len = tag[1..]
            .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
            .map_or(tag.len(), |i| i + 1);
        let close_len = if tag.ends_with("/>") { 2 } else { 1 };
        if name_len + close_len > tag.len() {
            return None;
        }

        let region_start = span.start + name_len;
        let region = &markup[region_start..span.end - close_len];

        let attributes = ATTRIBUTE
            .captures_iter(region)
            .filter_map(|caps| {
                let name = caps.get(1)?;
                let quoted = caps.get(2)?;
                let start = region_start + quoted.start() + 1;
                let end = region_start + quoted.end() - 1;
                Some(Attribute {
                    name: name.as_str(),
                    value: &markup[start..end],
                    value_span: start..end,
                })
            })
            .collect();

        let insert_at = region_start + region.trim_end().len();
        Some(Self {
            attributes,
            insert_at,
        })
    }

    fn get(&self, name: &str) -> Option<&Attribute<'a>> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    fn aspect_ratio(&self) -> f64 {
        if let Some((w, h)) = self.get("viewBox").and_then(|attr| view_box_size(attr.value)) {
            return h / w;
        }

        let width = self.get("width").and_then(|attr| leading_number(attr.value));
        let height = self.get("height").and_then(|attr| leading_number(attr.value));
        match (width, height) {
            (Some(w), Some(h)) if w > 0.0 && h > 0.0 => h / w,
            _ => 1.0,
        }
    }

    fn rewrite(&self, markup: &str, width: u32, height: u32) -> String {
        let mut edits: Vec<(Range<usize>, String)> = Vec::new();
        let mut appended = String::new();

        for (name, value) in [("width", width), ("height", height)] {
            match self.get(name) {
                Some(attr) => edits.push((attr.value_span.clone(), value.to_string())),
                None => appended.push_str(&format!(" {name}=\"{value}\"")),
            }
        }

        if !appended.is_empty() {
            edits.push((self.insert_at..self.insert_at, appended));
        }
        edits.sort_by_key(|(span, _)| span.start);

        let mut out = String::with_capacity(markup.len() + 64);
        let mut cursor = 0;
        for (span, replacement) in edits {
            out.push_str(&markup[cursor..span.start]);
            out.push_str(&replacement);
            cursor = span.end;
        }
        out.push_str(&markup[cursor..]);
        out
    }
}

/// Byte span of the root start tag, if the root element is `svg`.
fn root_span(markup: &str) -> Option<Range<usize>> {
    let mut reader = Reader::from_str(markup);

    loop {
        let before = usize::try_from(reader.buffer_position()).ok()?;
        match reader.read_event() {
            Ok(Event::Start(tag) | Event::Empty(tag)) => {
                if tag.local_name().as_ref() != b"svg" {
                    return None;
                }
                let end = usize::try_from(reader.buffer_position()).ok()?;
                let from = before.saturating_sub(1);
                let start = from + markup.get(from..end)?.find('<')?;
                return Some(start..end);
            }
            Ok(Event::Eof) | Err(_) => return None,
            Ok(_) => {}
        }
    }
}

fn leading_number(value: &str) -> Option<f64> {
    let found = LEADING_NUMBER.find(value)?;
    found.as_str().trim().parse().ok()
}

/// Width and height of a `min-x min-y width height` viewBox, both positive.
fn view_box_size(value: &str) -> Option<(f64, f64)> {
    let parts: Vec<f64> = VIEWBOX_SEPARATOR
        .split(value.trim())
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;

    match parts.as_slice() {
        [_, _, w, h] if *w > 0.0 && *h > 0.0 => Some((*w, *h)),
        _ => None,
    }
}
