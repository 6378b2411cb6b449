//! Tag endpoints.

use reqwest::{Method, Request};

use crate::{
    client::Reply,
    error::Error,
    models::{join, require, require_list},
    result::Result,
    Client,
};

const MAX_RENAME: usize = 30;
const MAX_DELETE: usize = 100;

impl Client {
    /// Lists every tag with its usage count, as a `tag -> count` map.
    ///
    /// Tags used fewer than `cutoff` times are left out. Pinboard limits
    /// this call to once a minute.
    ///
    /// # Errors
    ///
    /// Fails like [`Client::hello`].
    pub async fn get_tags(&self, cutoff: Option<u32>) -> Result<Reply> {
        let request = self.get_tags_request(cutoff)?;
        self.send(request).await
    }

    /// Renames `old` to `new`.
    ///
    /// `old` may list up to 30 tags separated by commas, which are all merged
    /// into `new`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for empty names, a comma in `new`,
    /// more than 30 old tags, or a rename that only changes letter case
    /// (unsupported by Pinboard).
    pub async fn rename_tags(&self, old: &str, new: &str) -> Result<Reply> {
        let request = self.rename_tags_request(old, new)?;
        self.send(request).await
    }

    /// Removes up to 100 tags from every bookmark.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] unless 1 to 100 non-empty tags are
    /// given.
    pub async fn delete_tags<S: AsRef<str>>(&self, tags: &[S]) -> Result<Reply> {
        let request = self.delete_tags_request(tags)?;
        self.send(request).await
    }

    pub(crate) fn get_tags_request(&self, cutoff: Option<u32>) -> Result<Request> {
        match cutoff {
            Some(cutoff) => self.prepare::<_, ()>(
                Method::GET,
                &["tags"],
                Some(&[("cutoff", cutoff)]),
                None,
            ),
            None => self.prepare::<(), ()>(Method::GET, &["tags"], None, None),
        }
    }

    pub(crate) fn rename_tags_request(&self, old: &str, new: &str) -> Result<Request> {
        require(old, "old tag")?;
        require(new, "new tag")?;
        if new.contains(',') {
            return Err(Error::invalid("new tag must be a single tag"));
        }
        let olds: Vec<&str> = old.split(',').map(str::trim).collect();
        require_list(&olds, "old tags", MAX_RENAME)?;
        if olds.len() == 1 && olds[0] != new && olds[0].to_lowercase() == new.to_lowercase() {
            return Err(Error::invalid("tag renames that only change case are not supported"));
        }

        let form = [("old", old), ("new", new)];
        self.prepare::<(), _>(Method::POST, &["tags", "rename"], None, Some(&form))
    }

    pub(crate) fn delete_tags_request<S: AsRef<str>>(&self, tags: &[S]) -> Result<Request> {
        require_list(tags, "tags", MAX_DELETE)?;
        let form = [("tags", join(tags))];
        self.prepare::<(), _>(Method::POST, &["tags", "delete"], None, Some(&form))
    }
}
