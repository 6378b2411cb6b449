//! Bookmark endpoints.
//!
//! # Example: saving a link and reading it back
//! ```no_run
//! # async fn run() -> pbapi2::Result<()> {
//! use pbapi2::{bookmark::{BookmarkQuery, NewBookmark}, Client};
//!
//! let client = Client::new("user:0123456789ABCDEF")?;
//!
//! let mut link = NewBookmark::new("https://www.rust-lang.org/", "Rust");
//! link.tags = vec!["rust".into(), "lang".into()];
//! link.toread = true;
//! client.add_bookmark(&link).await?;
//!
//! let query = BookmarkQuery { tags: vec!["rust".into()], ..Default::default() };
//! let found = client.get_bookmarks(&query).await?;
//! println!("{found:#?}");
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use reqwest::{Method, Request};
use serde::Serialize;

use crate::{
    client::Reply,
    models::{
        clamp_count, comma_list, is_blank, join, maybe_comma_list, maybe_timestamp, maybe_yes_no,
        require, require_id, require_list, timestamp, yes_no,
    },
    result::Result,
    Client,
};

const MAX_IDS: usize = 50;
const MAX_FILTER_TAGS: usize = 3;
const MAX_COUNT: u32 = 1000;
const MAX_BATCH_DELETE: usize = 100;

/// Visibility/read-state filter for [`BookmarkQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Only public bookmarks.
    Public,
    /// Only private bookmarks.
    Private,
    /// Only bookmarks already read.
    Read,
}

impl Filter {
    fn as_str(self) -> &'static str {
        match self {
            Filter::Public => "public",
            Filter::Private => "private",
            Filter::Read => "read",
        }
    }
}

/// Selection for [`Client::get_bookmarks`].
///
/// `ids` take precedence over everything else, then `url`. Only when both
/// are empty are the remaining filters and paging applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkQuery {
    /// Specific bookmark IDs, up to 50.
    pub ids: Vec<String>,
    /// A single URL to look up.
    pub url: Option<String>,
    /// Tags every result must carry, up to 3.
    pub tags: Vec<String>,
    /// Only bookmarks created after this instant.
    pub start_date: Option<DateTime<Utc>>,
    /// Only bookmarks created before this instant.
    pub end_date: Option<DateTime<Utc>>,
    /// Visibility or read-state filter.
    pub filter: Option<Filter>,
    /// Page size; values above 1000 are clamped.
    pub count: u32,
    /// Number of results to skip.
    pub offset: u32,
}

impl Default for BookmarkQuery {
    fn default() -> Self {
        BookmarkQuery {
            ids: Vec::new(),
            url: None,
            tags: Vec::new(),
            start_date: None,
            end_date: None,
            filter: None,
            count: 25,
            offset: 0,
        }
    }
}

impl BookmarkQuery {
    fn params(&self) -> Result<Vec<(&'static str, String)>> {
        if !self.ids.is_empty() {
            require_list(&self.ids, "bookmark ids", MAX_IDS)?;
            return Ok(vec![("ids", join(&self.ids))]);
        }
        if let Some(url) = self.url.as_deref().filter(|u| !u.trim().is_empty()) {
            return Ok(vec![("url", url.to_string())]);
        }

        if self.tags.len() > MAX_FILTER_TAGS {
            return Err(crate::Error::invalid(format!(
                "at most {MAX_FILTER_TAGS} tags may be used as a filter"
            )));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(crate::Error::invalid("start_date must not be after end_date"));
            }
        }

        let mut params = Vec::new();
        if !self.tags.is_empty() {
            params.push(("tags", join(&self.tags)));
        }
        if let Some(start) = &self.start_date {
            params.push(("start_date", timestamp(start)));
        }
        if let Some(end) = &self.end_date {
            params.push(("end_date", timestamp(end)));
        }
        if let Some(filter) = self.filter {
            params.push(("filter", filter.as_str().to_string()));
        }
        params.push(("count", clamp_count(self.count, MAX_COUNT, "bookmarks").to_string()));
        params.push(("offset", self.offset.to_string()));
        Ok(params)
    }
}

/// A bookmark to create with [`Client::add_bookmark`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBookmark {
    /// Address being bookmarked.
    pub url: String,
    /// Title shown in the bookmark list.
    pub title: String,
    /// Free-form description.
    #[serde(skip_serializing_if = "is_blank")]
    pub description: Option<String>,
    /// Backdated creation time; the server uses "now" when absent.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "maybe_timestamp"
    )]
    pub created: Option<DateTime<Utc>>,
    /// Tags to attach.
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "comma_list")]
    pub tags: Vec<String>,
    /// Hide the bookmark from other users.
    #[serde(serialize_with = "yes_no")]
    pub private: bool,
    /// Mark as unread.
    #[serde(serialize_with = "yes_no")]
    pub toread: bool,
    /// Store the URL exactly as given instead of normalizing it.
    #[serde(serialize_with = "yes_no")]
    pub exact_url: bool,
}

impl NewBookmark {
    /// Starts a public, read bookmark with no description or tags.
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        NewBookmark {
            url: url.into(),
            title: title.into(),
            description: None,
            created: None,
            tags: Vec::new(),
            private: false,
            toread: false,
            exact_url: false,
        }
    }
}

/// A partial edit for [`Client::update_bookmark`].
///
/// Only fields that are `Some` are sent. An empty value erases the stored
/// one, so `tags: Some(vec![])` removes every tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookmarkUpdate {
    /// New address. Changing it changes the bookmark's ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New creation time.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "maybe_timestamp"
    )]
    pub created: Option<DateTime<Utc>>,
    /// Replacement tag set.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "maybe_comma_list"
    )]
    pub tags: Option<Vec<String>>,
    /// Make private (`true`) or public (`false`).
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "maybe_yes_no")]
    pub private: Option<bool>,
    /// Mark unread (`true`) or read (`false`).
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "maybe_yes_no")]
    pub toread: Option<bool>,
    /// Store the URL exactly as given.
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "maybe_yes_no")]
    pub exact_url: Option<bool>,
}

impl BookmarkUpdate {
    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        self == &BookmarkUpdate::default()
    }
}

#[derive(Serialize)]
struct BatchDelete {
    ids: String,
}

impl Client {
    /// Lists bookmarks matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) for
    /// more than 50 ids, more than 3 tags, or a start date after the end
    /// date. Otherwise fails like [`Client::hello`].
    pub async fn get_bookmarks(&self, query: &BookmarkQuery) -> Result<Reply> {
        let request = self.get_bookmarks_request(query)?;
        self.send(request).await
    }

    /// Returns every bookmark in the account.
    ///
    /// Pinboard limits this call to five per hour.
    ///
    /// # Errors
    ///
    /// Fails like [`Client::hello`].
    pub async fn get_all_bookmarks(&self) -> Result<Reply> {
        let request = self.prepare::<(), ()>(Method::GET, &["bookmarks", "all"], None, None)?;
        self.send(request).await
    }

    /// Fetches one bookmark.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) for
    /// an empty id, [`Error::NotFound`](crate::Error::NotFound) if it does
    /// not exist.
    pub async fn get_bookmark(&self, id: &str) -> Result<Reply> {
        require_id(id, "bookmark id")?;
        let request = self.prepare::<(), ()>(Method::GET, &["bookmarks", id], None, None)?;
        self.send(request).await
    }

    /// Creates a bookmark. The reply usually holds `result` and `bookmark_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) when
    /// the url or title is empty. Otherwise fails like [`Client::hello`].
    pub async fn add_bookmark(&self, bookmark: &NewBookmark) -> Result<Reply> {
        let request = self.add_bookmark_request(bookmark)?;
        self.send(request).await
    }

    /// Edits a bookmark in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) for an
    /// empty id or an update with no fields set.
    pub async fn update_bookmark(&self, id: &str, update: &BookmarkUpdate) -> Result<Reply> {
        let request = self.update_bookmark_request(id, update)?;
        self.send(request).await
    }

    /// Permanently deletes a bookmark.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) for
    /// an empty id. Otherwise fails like [`Client::hello`].
    pub async fn delete_bookmark(&self, id: &str) -> Result<Reply> {
        require_id(id, "bookmark id")?;
        let request = self.prepare::<(), ()>(Method::DELETE, &["bookmarks", id], None, None)?;
        self.send(request).await
    }

    /// Deletes up to 100 bookmarks in one call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) unless
    /// 1 to 100 non-empty ids are given.
    pub async fn delete_bookmarks<S: AsRef<str>>(&self, ids: &[S]) -> Result<Reply> {
        let request = self.delete_bookmarks_request(ids)?;
        self.send(request).await
    }

    pub(crate) fn get_bookmarks_request(&self, query: &BookmarkQuery) -> Result<Request> {
        let params = query.params()?;
        self.prepare::<_, ()>(Method::GET, &["bookmarks"], Some(&params), None)
    }

    pub(crate) fn add_bookmark_request(&self, bookmark: &NewBookmark) -> Result<Request> {
        require(&bookmark.url, "bookmark url")?;
        require(&bookmark.title, "bookmark title")?;
        self.prepare::<(), _>(Method::POST, &["bookmarks"], None, Some(bookmark))
    }

    pub(crate) fn update_bookmark_request(
        &self,
        id: &str,
        update: &BookmarkUpdate,
    ) -> Result<Request> {
        require_id(id, "bookmark id")?;
        if update.is_empty() {
            return Err(crate::Error::invalid("no fields provided for update"));
        }
        self.prepare::<(), _>(Method::POST, &["bookmarks", id], None, Some(update))
    }

    pub(crate) fn delete_bookmarks_request<S: AsRef<str>>(&self, ids: &[S]) -> Result<Request> {
        require_list(ids, "bookmark ids", MAX_BATCH_DELETE)?;
        let form = BatchDelete { ids: join(ids) };
        self.prepare::<(), _>(Method::POST, &["bookmarks", "delete"], None, Some(&form))
    }
}
