use chrono::{DateTime, SecondsFormat, Utc};

/// Number of characters echoed back before the acknowledgement is cut off.
pub const ECHO_LIMIT: usize = 50;

/// Suffix appended to an echo that was cut off.
pub const TRUNCATION_MARKER: &str = "...";

/// A single recorded reasoning step.
///
/// Entries are **immutable**: once appended to a [`Notebook`](crate::notebook::Notebook)
/// they are never edited, only dropped wholesale by a clear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The thought text exactly as the caller supplied it.
    pub content: String,
    pub recorded_at: DateTime<Utc>,
}

impl Entry {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            recorded_at: Utc::now(),
        }
    }

    /// RFC 3339 timestamp with second precision, e.g. `2026-10-18T09:30:00Z`.
    pub fn timestamp(&self) -> String {
        self.recorded_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Render this entry as one transcript block. `position` is 1-based.
    pub fn render(&self, position: usize) -> String {
        format!(
            "Thought #{} at {}:\n{}\n",
            position,
            self.timestamp(),
            self.content
        )
    }
}

/// Confirmation returned after a successful append.
///
/// Carries a display-friendly echo of the recorded content. The echo is
/// cosmetic: the stored [`Entry`] always keeps the full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgement {
    pub echo: String,
}

impl Acknowledgement {
    pub fn for_content(content: &str) -> Self {
        Self {
            echo: echo(content),
        }
    }
}

impl std::fmt::Display for Acknowledgement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Thought: {}", self.echo)
    }
}

/// Shorten `content` to [`ECHO_LIMIT`] characters plus [`TRUNCATION_MARKER`].
///
/// Counts `char`s rather than bytes so multi-byte text is never split.
pub fn echo(content: &str) -> String {
    match content.char_indices().nth(ECHO_LIMIT) {
        Some((cut, _)) => format!("{}{}", &content[..cut], TRUNCATION_MARKER),
        None => content.to_string(),
    }
}

/// Render a snapshot of entries as the newline-joined transcript.
pub fn render_transcript(entries: &[Entry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| entry.render(i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}
