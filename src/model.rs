//! Data models for the photo aggregator
//!
//! This module defines the raw records fetched from the remote source
//! (users, albums, photos), the denormalized views served to clients,
//! and the request/response shapes of the HTTP API.

use serde::{Deserialize, Serialize};

/// The three collections exposed by the remote source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Users,
    Albums,
    Photos,
}

impl ResourceKind {
    /// Name used both for logging and as the cache key of the collection
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Users => "users",
            ResourceKind::Albums => "albums",
            ResourceKind::Photos => "photos",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub geo: Geo,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub catch_phrase: String,
    pub bs: String,
}

/// A user record as served by the remote source
///
/// Immutable snapshot; the same shape is embedded in [`AlbumView`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub address: Address,
    pub phone: String,
    pub website: String,
    pub company: Company,
}

/// An album record; `user_id` references [`User::id`]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub user_id: i64,
    pub id: i64,
    pub title: String,
}

/// A photo record; `album_id` references [`Album::id`]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub album_id: i64,
    pub id: i64,
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
}

/// Album as embedded in a [`PhotoView`]
///
/// `user` is absent when the album's `userId` matches no user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AlbumView {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub user: Option<User>,
}

/// Denormalized photo joined with its album and the album's owner
///
/// `album` is absent when the photo's `albumId` matches no album.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhotoView {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub album: Option<AlbumView>,
}

/// The three raw collections a single request works on
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub users: Vec<User>,
    pub albums: Vec<Album>,
    pub photos: Vec<Photo>,
}

/// Filter criteria for the photo listing
///
/// Empty strings count as "not provided". Case normalization happens
/// before the filter reaches the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoFilter {
    pub title: String,
    pub album_title: String,
    pub user_email: String,
}

impl PhotoFilter {
    /// Builds a filter from raw query values, lowercasing every field
    pub fn normalized(title: &str, album_title: &str, user_email: &str) -> Self {
        Self {
            title: title.to_lowercase(),
            album_title: album_title.to_lowercase(),
            user_email: user_email.to_lowercase(),
        }
    }

    /// True when no field carries a value
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.album_title.is_empty() && self.user_email.is_empty()
    }
}

/// Pagination metadata returned alongside a page of results
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Pagination {
    pub limit: usize,
    pub offset: usize,
    pub total: usize,
    pub pages: usize,
}

/// A page of photo views plus its pagination metadata
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PhotosPage {
    pub result: Vec<PhotoView>,
    pub pagination: Pagination,
}

/// Query parameters for listing photos
///
/// # Example
/// Query string: `?title=accusamus&album.title=quidem&limit=10&offset=20`
#[derive(Deserialize, Debug, Default)]
pub struct ListParams {
    /// Substring of the photo title
    pub title: Option<String>,

    /// Substring of the album title
    #[serde(rename = "album.title")]
    pub album_title: Option<String>,

    /// Exact email of the album owner
    #[serde(rename = "album.user.email")]
    pub user_email: Option<String>,

    /// Number of items per page, kept raw so junk falls back to the default
    pub limit: Option<String>,

    /// Number of items to skip, kept raw so junk falls back to the default
    pub offset: Option<String>,
}

/// Page size used when `limit` is missing, zero or not a number
pub const DEFAULT_LIMIT: usize = 25;

impl ListParams {
    pub fn limit(&self) -> usize {
        parse_count(self.limit.as_deref())
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_LIMIT)
    }

    pub fn offset(&self) -> usize {
        parse_count(self.offset.as_deref()).unwrap_or(0)
    }
}

fn parse_count(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|value| value.trim().parse().ok())
}
