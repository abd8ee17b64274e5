//! Note assembly and destination path

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use crate::extractors::truncate_chars;
use crate::result::ExtractionResult;

/// Characters of the title kept in file names
pub const FILENAME_TITLE_CHARS: usize = 50;

const RESERVED: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// A finished note and where it goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledNote {
    pub path: String,
    pub content: String,
}

/// Replace filesystem-reserved characters with `_` and cap the length
pub fn sanitize_title(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| if RESERVED.contains(&c) { '_' } else { c })
        .collect();
    truncate_chars(&replaced, FILENAME_TITLE_CHARS)
}

/// `{folder}/{date}_{source}_{title}.md`
pub fn build_path(folder: &str, date: NaiveDate, source: &str, title: &str) -> String {
    let filename = format!(
        "{}_{}_{}.md",
        date.format("%Y-%m-%d"),
        source,
        sanitize_title(title)
    );
    let folder = folder.trim_end_matches('/');
    if folder.is_empty() {
        filename
    } else {
        format!("{folder}/{filename}")
    }
}

/// Assemble the note, stamped with the current instant
pub fn build_note(result: &ExtractionResult, summary: &str, diagram: &str) -> String {
    build_note_at(result, summary, diagram, Utc::now())
}

/// Assemble the note: front-matter, title, optional summary, optional
/// diagram, transcript. Empty annexes are omitted.
pub fn build_note_at(
    result: &ExtractionResult,
    summary: &str,
    diagram: &str,
    created: DateTime<Utc>,
) -> String {
    let source = result.source.tag();
    let mut content = format!(
        "---\nsource: {}\nurl: {}\ncreated: {}\ntags: [ai-chat, {}]\n---\n\n# {}\n\n",
        source,
        result.url,
        created.to_rfc3339_opts(SecondsFormat::Millis, true),
        source.to_lowercase(),
        result.title
    );

    if !summary.is_empty() {
        content.push_str(&format!("## Summary\n\n{summary}\n\n"));
    }

    if !diagram.is_empty() {
        content.push_str(&format!("## Flow Diagram\n\n```mermaid\n{diagram}\n```\n\n"));
    }

    content.push_str(&format!(
        "## Conversation Log\n\n🔗 Original chat: {}\n\n{}",
        result.url, result.markdown_fragment
    ));

    content
}
