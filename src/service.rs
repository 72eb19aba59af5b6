//! Photo listing use cases on top of the caching provider

use tracing::debug;

use crate::aggregate::join;
use crate::error::Result;
use crate::filter;
use crate::model::{Album, Catalog, Pagination, Photo, PhotoFilter, PhotoView, PhotosPage, User};
use crate::pagination::{paginate, total_pages};
use crate::provider::CachingProvider;
use crate::remote::{HttpFetcher, RemoteFetcher};

pub struct PhotoService<F = HttpFetcher> {
    provider: CachingProvider<F>,
}

impl<F: RemoteFetcher> PhotoService<F> {
    pub fn new(provider: CachingProvider<F>) -> Self {
        Self { provider }
    }

    /// Loads the three collections for one request
    ///
    /// Collections are evaluated one after another so the expiry check of
    /// the first one settles the cache window for the others.
    pub async fn load_catalog(&self) -> Result<Catalog> {
        let photos = self.provider.evaluate::<Photo>().await?;
        let users = self.provider.evaluate::<User>().await?;
        let albums = self.provider.evaluate::<Album>().await?;
        Ok(Catalog {
            users,
            albums,
            photos,
        })
    }

    /// Every photo, joined
    pub async fn photos(&self) -> Result<Vec<PhotoView>> {
        let catalog = self.load_catalog().await?;
        Ok(catalog
            .photos
            .iter()
            .map(|photo| join(photo, &catalog.albums, &catalog.users))
            .collect())
    }

    pub async fn photo_with_id(&self, id: i64) -> Result<Option<PhotoView>> {
        let catalog = self.load_catalog().await?;
        Ok(filter::by_id(&catalog, id))
    }

    /// Filters (when any field is set) and paginates the photo set
    pub async fn filtering_photos(
        &self,
        criteria: &PhotoFilter,
        limit: usize,
        offset: usize,
    ) -> Result<PhotosPage> {
        let photos = if criteria.is_empty() {
            self.photos().await?
        } else {
            debug!(?criteria, "Filtering photos");
            let catalog = self.load_catalog().await?;
            filter::filter_photos(&catalog, criteria)
        };

        Ok(PhotosPage {
            result: paginate(&photos, limit, offset).to_vec(),
            pagination: Pagination {
                limit,
                offset,
                total: photos.len(),
                pages: total_pages(photos.len(), limit),
            },
        })
    }
}
