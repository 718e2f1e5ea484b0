// src/domain/note.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum NoteTag {
    Todo,
    Work,
    Personal,
    Meeting,
    Shopping,
}

impl NoteTag {
    pub const ALL: [NoteTag; 5] = [
        NoteTag::Todo,
        NoteTag::Work,
        NoteTag::Personal,
        NoteTag::Meeting,
        NoteTag::Shopping,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NoteTag::Todo => "Todo",
            NoteTag::Work => "Work",
            NoteTag::Personal => "Personal",
            NoteTag::Meeting => "Meeting",
            NoteTag::Shopping => "Shopping",
        }
    }
}

impl fmt::Display for NoteTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteTag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        NoteTag::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                DomainError::Validation(format!(
                    "Unknown tag '{wanted}', expected one of: Todo, Work, Personal, Meeting, Shopping"
                ))
            })
    }
}

/// A note as stored by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub tag: NoteTag,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner: String,
}

/// Reduced projection used when rendering lists.
///
/// List responses carry full notes; the extra fields are ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteListItem {
    pub id: String,
    pub title: String,
    pub content: String,
    pub tag: NoteTag,
}

impl From<Note> for NoteListItem {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            tag: note.tag,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteCreationData {
    pub title: String,
    pub content: String,
    pub tag: NoteTag,
}

impl NoteCreationData {
    pub fn new(title: impl Into<String>, content: impl Into<String>, tag: NoteTag) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tag,
        }
    }

    /// Trim the title and reject payloads the service would refuse anyway.
    pub fn validated(self) -> Result<Self, DomainError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::Validation("Title must not be empty".to_string()));
        }
        Ok(Self {
            title,
            content: self.content,
            tag: self.tag,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Todo", NoteTag::Todo)]
    #[case("work", NoteTag::Work)]
    #[case(" PERSONAL ", NoteTag::Personal)]
    #[case("meeting", NoteTag::Meeting)]
    #[case("Shopping", NoteTag::Shopping)]
    fn given_tag_text_when_parsing_then_matches_case_insensitively(
        #[case] input: &str,
        #[case] expected: NoteTag,
    ) {
        assert_eq!(input.parse::<NoteTag>().unwrap(), expected);
    }

    #[test]
    fn given_unknown_tag_when_parsing_then_returns_validation_error() {
        let result = "Urgent".parse::<NoteTag>();

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn given_blank_title_when_validating_then_rejects_payload() {
        let data = NoteCreationData::new("   ", "body", NoteTag::Todo);

        let result = data.validated();

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn given_padded_title_when_validating_then_trims_title() {
        let data = NoteCreationData::new("  Groceries ", "milk", NoteTag::Shopping);

        let validated = data.validated().expect("Title is not blank");

        assert_eq!(validated.title, "Groceries");
        assert_eq!(validated.content, "milk");
    }

    #[test]
    fn given_full_note_json_when_decoding_list_item_then_ignores_extra_fields() {
        let json = r#"{
            "id": "65f1",
            "title": "Standup",
            "content": "Daily sync",
            "tag": "Meeting",
            "createdAt": "2025-01-02T10:00:00.000Z",
            "updatedAt": "2025-01-02T10:00:00.000Z",
            "owner": "u1"
        }"#;

        let item: NoteListItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.id, "65f1");
        assert_eq!(item.tag, NoteTag::Meeting);
    }

    #[test]
    fn given_note_json_when_decoding_then_reads_camel_case_timestamps() {
        let json = r#"{
            "id": "65f1",
            "title": "Standup",
            "content": "Daily sync",
            "tag": "Work",
            "createdAt": "2025-01-02T10:00:00Z",
            "updatedAt": "2025-01-03T11:30:00Z",
            "owner": "u1"
        }"#;

        let note: Note = serde_json::from_str(json).unwrap();
        let item = NoteListItem::from(note.clone());

        assert!(note.updated_at > note.created_at);
        assert_eq!(item.title, "Standup");
    }
}
