//! Gallery filter/pagination logic.
//!
//! This module decides, for any (filter, cursor) pair, what query to issue
//! against the photo store and how to interpret the result. Two modes exist:
//!
//! - **All** (`"all"` on the wire): fixed-size pages walked with a keyset
//!   cursor. The has-more flag is speculative: it stays set until a page
//!   comes back with fewer records than the page size. No count query is
//!   issued.
//! - **Location**: a single equality predicate, one unpaginated result,
//!   pagination disabled. The backing query layer cannot combine the
//!   equality predicate with keyset pagination efficiently for this usage
//!   pattern, so filtered views load in full.
//!
//! [`fetch_page`] is the stateless decision; [`GalleryView`] is the stateful
//! machine that owns the loaded list, the cursor, and the single-in-flight
//! rule.

mod view;

pub use view::{GallerySnapshot, GalleryView};

use crate::error::StoreError;
use crate::store::{Photo, PhotoCursor, PhotoQuery, PhotoStore};

/// Default number of records per page in "all" mode.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// The active gallery filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GalleryFilter {
    /// No predicate; paginated
    #[default]
    All,

    /// Equality predicate on location; unpaginated
    Location(String),
}

impl GalleryFilter {
    /// Parse the wire form: absent, empty, or the sentinel `"all"` mean no
    /// filter; anything else is a location value.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            None | Some("") | Some("all") => GalleryFilter::All,
            Some(location) => GalleryFilter::Location(location.to_string()),
        }
    }

    /// The wire form of this filter.
    pub fn as_param(&self) -> &str {
        match self {
            GalleryFilter::All => "all",
            GalleryFilter::Location(location) => location,
        }
    }
}

/// One loaded page of gallery results.
#[derive(Debug, Clone)]
pub struct GalleryPage {
    /// Records in display order (newest first)
    pub photos: Vec<Photo>,

    /// Cursor at the last record, for requesting the next page.
    /// Always `None` in location mode.
    pub next_cursor: Option<PhotoCursor>,

    /// Whether a further page may exist. Speculative: true exactly when a
    /// full page came back in "all" mode.
    pub has_more: bool,
}

/// Issue the query for one page under the given filter.
///
/// In "all" mode the query carries the page-size limit and the optional
/// strictly-after cursor; in location mode it carries the equality predicate
/// and nothing else.
pub async fn fetch_page<S: PhotoStore + ?Sized>(
    store: &S,
    filter: &GalleryFilter,
    after: Option<&PhotoCursor>,
    page_size: u32,
) -> Result<GalleryPage, StoreError> {
    match filter {
        GalleryFilter::All => {
            let photos = store
                .query(PhotoQuery::recent(page_size, after.copied()))
                .await?;
            let has_more = photos.len() as u32 == page_size;
            let next_cursor = photos.last().map(Photo::cursor);
            Ok(GalleryPage {
                photos,
                next_cursor,
                has_more,
            })
        }
        GalleryFilter::Location(location) => {
            let photos = store.query(PhotoQuery::at_location(location)).await?;
            Ok(GalleryPage {
                photos,
                next_cursor: None,
                has_more: false,
            })
        }
    }
}
