//! Filtering the joined photo set
//!
//! The filter fields are not combined freely. They are applied with a fixed
//! precedence:
//!
//! 1. `title` seeds the result with photos whose title contains it.
//! 2. `album_title`, when present, decides the result on its own terms: if
//!    step 1 found nothing, photos are searched by album title instead, and
//!    whatever was collected is narrowed to entries whose album title
//!    contains it. `user_email` is never consulted in this case.
//! 3. `user_email`, when present (and `album_title` is not), replaces the
//!    result with the first photo of every album owned by that user.
//! 4. Otherwise the title matches are returned, deduplicated by id.
//!
//! Matching is raw substring containment; case folding happens upstream.

use std::collections::HashSet;

use tracing::debug;

use crate::aggregate::join;
use crate::model::{Catalog, PhotoFilter, PhotoView};

/// Looks up a single photo by id, ignoring any filter
pub fn by_id(catalog: &Catalog, id: i64) -> Option<PhotoView> {
    catalog
        .photos
        .iter()
        .find(|photo| photo.id == id)
        .map(|photo| join(photo, &catalog.albums, &catalog.users))
}

/// Applies `filter` to the whole catalog
pub fn filter_photos(catalog: &Catalog, filter: &PhotoFilter) -> Vec<PhotoView> {
    let mut results: Vec<PhotoView> = Vec::new();

    if !filter.title.is_empty() {
        debug!(title = %filter.title, "Filtering photos by title");
        results.extend(
            catalog
                .photos
                .iter()
                .filter(|photo| photo.title.contains(&filter.title))
                .map(|photo| join(photo, &catalog.albums, &catalog.users)),
        );
    }

    if !filter.album_title.is_empty() {
        debug!(album_title = %filter.album_title, "Filtering photos by album title");
        if results.is_empty() {
            results = by_album_title(catalog, &filter.album_title);
        }
        results.retain(|view| {
            view.album
                .as_ref()
                .is_some_and(|album| album.title.contains(&filter.album_title))
        });
        return results;
    }

    if !filter.user_email.is_empty() {
        debug!(user_email = %filter.user_email, "Filtering photos by album user email");
        return by_user_email(catalog, &filter.user_email);
    }

    dedup_by_id(results)
}

fn by_album_title(catalog: &Catalog, album_title: &str) -> Vec<PhotoView> {
    let album_ids: HashSet<i64> = catalog
        .albums
        .iter()
        .filter(|album| album.title.contains(album_title))
        .map(|album| album.id)
        .collect();

    catalog
        .photos
        .iter()
        .filter(|photo| album_ids.contains(&photo.album_id))
        .map(|photo| join(photo, &catalog.albums, &catalog.users))
        .collect()
}

/// First photo of each album owned by the first user with `email`
///
/// Emails compare trimmed and case-insensitively. Albums without photos
/// contribute nothing.
fn by_user_email(catalog: &Catalog, email: &str) -> Vec<PhotoView> {
    let wanted = email.trim().to_lowercase();
    let Some(owner) = catalog
        .users
        .iter()
        .find(|user| user.email.trim().to_lowercase() == wanted)
    else {
        return Vec::new();
    };

    catalog
        .albums
        .iter()
        .filter(|album| album.user_id == owner.id)
        .filter_map(|album| catalog.photos.iter().find(|photo| photo.album_id == album.id))
        .map(|photo| join(photo, &catalog.albums, &catalog.users))
        .collect()
}

/// Keeps the first occurrence of every id, preserving order
fn dedup_by_id(views: Vec<PhotoView>) -> Vec<PhotoView> {
    let mut seen = HashSet::new();
    views.into_iter().filter(|view| seen.insert(view.id)).collect()
}
