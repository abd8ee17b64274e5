//! CSS selector helpers shared by the site extractors
//!
//! Uses the scraper crate to select elements by CSS selectors and to
//! approximate the rendered text a browser would report for an element.

use scraper::{ElementRef, Html, Node, Selector};

use crate::error::ExtractionError;

/// Elements whose content never shows up as rendered text.
const HIDDEN: &[&str] = &["script", "style", "noscript", "template", "head"];

/// Elements that start a new line.
const LINE_BLOCKS: &[&str] = &[
    "address", "article", "aside", "dd", "details", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "header", "hr", "li", "main", "nav", "ol",
    "section", "summary", "table", "tbody", "thead", "tfoot", "tr", "ul",
];

/// Elements that are set apart by a blank line.
const PARAGRAPH_BLOCKS: &[&str] = &["blockquote", "h1", "h2", "h3", "h4", "h5", "h6", "p", "pre"];

/// Compile a selector, reporting the offending text on failure
pub fn compile(selector_str: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(selector_str).map_err(|e| ExtractionError::Selector {
        selector: selector_str.to_string(),
        reason: e.to_string(),
    })
}

/// All elements of the document matching a selector, in document order
pub fn select_all<'a>(
    document: &'a Html,
    selector_str: &str,
) -> Result<Vec<ElementRef<'a>>, ExtractionError> {
    let selector = compile(selector_str)?;
    Ok(document.select(&selector).collect())
}

/// First element of the document matching a selector
pub fn select_first<'a>(
    document: &'a Html,
    selector_str: &str,
) -> Result<Option<ElementRef<'a>>, ExtractionError> {
    let selector = compile(selector_str)?;
    Ok(document.select(&selector).next())
}

/// Descendants of `scope` matching a selector. The scope itself is never returned.
pub fn select_within<'a>(
    scope: ElementRef<'a>,
    selector_str: &str,
) -> Result<Vec<ElementRef<'a>>, ExtractionError> {
    let selector = compile(selector_str)?;
    Ok(scope
        .select(&selector)
        .filter(|el| el.id() != scope.id())
        .collect())
}

/// First descendant of `scope` matching a selector
pub fn first_within<'a>(
    scope: ElementRef<'a>,
    selector_str: &str,
) -> Result<Option<ElementRef<'a>>, ExtractionError> {
    let selector = compile(selector_str)?;
    Ok(scope.select(&selector).find(|el| el.id() != scope.id()))
}

/// Whether any descendant of `scope` matches a selector
pub fn has_within(scope: ElementRef<'_>, selector_str: &str) -> Result<bool, ExtractionError> {
    Ok(first_within(scope, selector_str)?.is_some())
}

/// Substring match of any keyword against the raw `class` attribute
pub fn class_contains_any(element: ElementRef<'_>, keywords: &[&str]) -> bool {
    let class = element.value().attr("class").unwrap_or("");
    keywords.iter().any(|k| class.contains(k))
}

/// Text of the most specific content element inside `container`, falling
/// back to the container's own text when nothing matches
pub fn content_text(
    container: ElementRef<'_>,
    content_selector: &str,
) -> Result<String, ExtractionError> {
    let target = first_within(container, content_selector)?.unwrap_or(container);
    Ok(inner_text(target))
}

/// Approximate rendered text of an element.
///
/// Whitespace inside text runs is collapsed, block elements break lines,
/// `<pre>` keeps its formatting and hidden elements are skipped.
pub fn inner_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_text(element, element.value().name() == "pre", &mut raw);
    normalize_lines(&raw)
}

fn collect_text(element: ElementRef<'_>, preformatted: bool, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                if preformatted {
                    out.push_str(text);
                } else {
                    push_collapsed(out, text);
                }
            }
            Node::Element(_) => {
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                let name = child_el.value().name();
                if HIDDEN.contains(&name) {
                    continue;
                }
                if name == "br" {
                    out.push('\n');
                    continue;
                }

                let breaks = if PARAGRAPH_BLOCKS.contains(&name) {
                    2
                } else if LINE_BLOCKS.contains(&name) {
                    1
                } else {
                    0
                };

                end_with_newlines(out, breaks);
                collect_text(child_el, preformatted || name == "pre", out);
                end_with_newlines(out, breaks);
            }
            _ => {}
        }
    }
}

/// Append `text` with whitespace runs collapsed to one space. A run between
/// inline content becomes a space even when the node holds nothing else.
fn push_collapsed(out: &mut String, text: &str) {
    let at_line_start = out.is_empty() || out.ends_with('\n') || out.ends_with(' ');
    if text.starts_with(char::is_whitespace) && !at_line_start {
        out.push(' ');
    }
    for (i, word) in text.split_whitespace().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(word);
    }
    if text.ends_with(char::is_whitespace) && !text.trim().is_empty() {
        out.push(' ');
    }
}

fn end_with_newlines(out: &mut String, count: usize) {
    if count == 0 || out.is_empty() {
        return;
    }
    let existing = out.chars().rev().take_while(|c| *c == '\n').count();
    for _ in existing..count {
        out.push('\n');
    }
}

fn normalize_lines(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut blank_run = 0;

    for line in raw.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        result.push_str(line);
        result.push('\n');
    }

    result.trim().to_string()
}
