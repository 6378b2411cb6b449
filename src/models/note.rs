//! Note endpoints.

use reqwest::{Method, Request};
use serde::Serialize;

use crate::{
    client::Reply,
    error::Error,
    models::{clamp_count, maybe_yes_no, require, require_id, yes_no},
    result::Result,
    Client,
};

const MAX_COUNT: u32 = 100;

/// A note to create with [`Client::create_note`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewNote {
    /// Note title.
    pub title: String,
    /// Note text.
    #[serde(rename = "note")]
    pub body: String,
    /// Render the body as Markdown.
    #[serde(serialize_with = "yes_no")]
    pub use_markdown: bool,
}

impl NewNote {
    /// Starts a plain-text note.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        NewNote {
            title: title.into(),
            body: body.into(),
            use_markdown: false,
        }
    }
}

/// A partial edit for [`Client::update_note`]. Only `Some` fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoteUpdate {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New text.
    #[serde(rename = "note", skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Switch Markdown rendering on or off.
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "maybe_yes_no")]
    pub use_markdown: Option<bool>,
}

impl NoteUpdate {
    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        self == &NoteUpdate::default()
    }
}

impl Client {
    /// Lists notes, newest first. `count` is clamped to 100.
    ///
    /// # Errors
    ///
    /// Fails like [`Client::hello`].
    pub async fn get_notes(&self, count: u32, offset: u32) -> Result<Reply> {
        let request = self.get_notes_request(count, offset)?;
        self.send(request).await
    }

    /// Fetches one note.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty id,
    /// [`Error::NotFound`] if it does not exist.
    pub async fn get_note(&self, id: &str) -> Result<Reply> {
        require_id(id, "note id")?;
        let request = self.prepare::<(), ()>(Method::GET, &["notes", id], None, None)?;
        self.send(request).await
    }

    /// Creates a note. The reply carries the new note's identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty title or body.
    pub async fn create_note(&self, note: &NewNote) -> Result<Reply> {
        let request = self.create_note_request(note)?;
        self.send(request).await
    }

    /// Edits a note in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty id or an update with
    /// no fields set.
    pub async fn update_note(&self, id: &str, update: &NoteUpdate) -> Result<Reply> {
        let request = self.update_note_request(id, update)?;
        self.send(request).await
    }

    /// Deletes a note.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty id.
    pub async fn delete_note(&self, id: &str) -> Result<Reply> {
        require_id(id, "note id")?;
        let request = self.prepare::<(), ()>(Method::DELETE, &["notes", id], None, None)?;
        self.send(request).await
    }

    pub(crate) fn get_notes_request(&self, count: u32, offset: u32) -> Result<Request> {
        let query = [("count", clamp_count(count, MAX_COUNT, "notes")), ("offset", offset)];
        self.prepare::<_, ()>(Method::GET, &["notes"], Some(&query), None)
    }

    pub(crate) fn create_note_request(&self, note: &NewNote) -> Result<Request> {
        require(&note.title, "note title")?;
        require(&note.body, "note body")?;
        self.prepare::<(), _>(Method::POST, &["notes"], None, Some(note))
    }

    pub(crate) fn update_note_request(&self, id: &str, update: &NoteUpdate) -> Result<Request> {
        require_id(id, "note id")?;
        if update.is_empty() {
            return Err(Error::invalid("no fields provided for update"));
        }
        self.prepare::<(), _>(Method::POST, &["notes", id], None, Some(update))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{client, form_pairs, pairs, query_pairs};

    #[test]
    fn notes_page_is_clamped() {
        let request = client().get_notes_request(500, 20).unwrap();
        assert_eq!(request.url().path(), "/v2/notes/");
        assert_eq!(query_pairs(&request), pairs(&[("count", "100"), ("offset", "20")]));
    }

    #[test]
    fn create_sends_body_as_note() {
        let note = NewNote {
            use_markdown: true,
            ..NewNote::new("Shopping", "- milk\n- eggs")
        };
        let request = client().create_note_request(&note).unwrap();
        assert_eq!(request.method(), &Method::POST);
        assert_eq!(
            form_pairs(&request),
            pairs(&[
                ("title", "Shopping"),
                ("note", "- milk\n- eggs"),
                ("use_markdown", "yes"),
            ])
        );
    }

    #[test]
    fn create_requires_title_and_body() {
        let c = client();
        assert!(c.create_note_request(&NewNote::new("", "body")).is_err());
        assert!(c.create_note_request(&NewNote::new("title", "")).is_err());
    }

    #[test]
    fn update_sends_only_set_fields() {
        let update = NoteUpdate {
            use_markdown: Some(false),
            ..Default::default()
        };
        let request = client().update_note_request("n1", &update).unwrap();
        assert_eq!(request.url().path(), "/v2/notes/n1/");
        assert_eq!(form_pairs(&request), pairs(&[("use_markdown", "no")]));
    }

    #[test]
    fn dot_ids_cannot_reach_the_notes_list() {
        let update = NoteUpdate {
            title: Some("x".into()),
            ..Default::default()
        };
        for id in [".", ".."] {
            let err = client().update_note_request(id, &update).unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)), "{id}");
        }
    }

    #[test]
    fn empty_update_is_rejected() {
        let err = client()
            .update_note_request("n1", &NoteUpdate::default())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
