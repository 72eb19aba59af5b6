//! Joining raw photos with their album and the album's owner

use crate::model::{Album, AlbumView, Photo, PhotoView, User};

/// Builds the denormalized view of `photo`
///
/// The first album whose id equals `photo.album_id` is embedded, along with
/// the first user whose id equals that album's `user_id`. A dangling
/// reference leaves the nested field empty.
pub fn join(photo: &Photo, albums: &[Album], users: &[User]) -> PhotoView {
    let album = albums.iter().find(|album| album.id == photo.album_id);
    let user = album.and_then(|album| users.iter().find(|user| user.id == album.user_id));

    PhotoView {
        id: photo.id,
        title: photo.title.clone(),
        url: photo.url.clone(),
        thumbnail_url: photo.thumbnail_url.clone(),
        album: album.map(|album| AlbumView {
            id: album.id,
            title: album.title.clone(),
            user: user.cloned(),
        }),
    }
}
