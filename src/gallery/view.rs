//! Stateful gallery view.
//!
//! `GalleryView` owns the loaded record list, the pagination cursor, and the
//! has-more flag for one gallery screen, and enforces the two rules the
//! stateless [`fetch_page`](super::fetch_page) cannot:
//!
//! - at most one load (initial or more) in flight at a time; a load-more
//!   arriving while a load is running is ignored, not queued;
//! - a filter change supersedes any in-flight load, so a stale response can
//!   never overwrite the newer list or advance the cursor out of order.
//!
//! Supersession uses a generation counter captured when a load starts and
//! re-checked when it completes.

use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::store::{Photo, PhotoCursor, PhotoStore};

use super::{fetch_page, GalleryFilter};

/// A point-in-time copy of the view state.
#[derive(Debug, Clone)]
pub struct GallerySnapshot {
    pub filter: GalleryFilter,
    pub photos: Vec<Photo>,
    pub has_more: bool,
    pub loading: bool,
}

struct ViewState {
    filter: GalleryFilter,
    photos: Vec<Photo>,
    cursor: Option<PhotoCursor>,
    has_more: bool,
    in_flight: bool,
    generation: u64,
}

/// The gallery filter/pagination state machine.
///
/// Shared via `Arc`; all methods take `&self` so concurrent completions
/// interleave the way event-driven UI code does.
pub struct GalleryView<S: ?Sized> {
    store: Arc<S>,
    page_size: u32,
    state: Mutex<ViewState>,
}

impl<S: PhotoStore + ?Sized> GalleryView<S> {
    /// Create an idle view. No query is issued until [`set_filter`] runs
    /// (the initial mount calls it with [`GalleryFilter::All`]).
    ///
    /// [`set_filter`]: GalleryView::set_filter
    pub fn new(store: Arc<S>, page_size: u32) -> Self {
        Self {
            store,
            page_size,
            state: Mutex::new(ViewState {
                filter: GalleryFilter::All,
                photos: Vec::new(),
                cursor: None,
                has_more: false,
                in_flight: false,
                generation: 0,
            }),
        }
    }

    /// Switch the filter (or perform the initial load).
    ///
    /// Discards the current list immediately, then loads the first page for
    /// the new filter. A failure leaves the list empty with has-more false;
    /// the error is logged, not returned, so the view is never stuck
    /// loading. If another filter change lands while this load is in
    /// flight, this load's result is dropped.
    pub async fn set_filter(&self, filter: GalleryFilter) {
        let generation = {
            let mut state = self.state.lock().expect("gallery state lock");
            state.generation += 1;
            state.filter = filter.clone();
            state.photos.clear();
            state.cursor = None;
            state.has_more = false;
            state.in_flight = true;
            state.generation
        };

        let result = fetch_page(self.store.as_ref(), &filter, None, self.page_size).await;

        let mut state = self.state.lock().expect("gallery state lock");
        if state.generation != generation {
            // A newer filter change owns the view now
            return;
        }
        state.in_flight = false;
        match result {
            Ok(page) => {
                state.photos = page.photos;
                state.cursor = page.next_cursor;
                state.has_more = page.has_more;
            }
            Err(err) => {
                warn!(filter = filter.as_param(), "initial gallery load failed: {err}");
                state.photos.clear();
                state.has_more = false;
            }
        }
    }

    /// Request the next page.
    ///
    /// Ignored (returns `false`) unless the filter is `All`, has-more is
    /// set, and no load is in flight. On success the page is appended in
    /// cursor order and the cursor advances; on failure the existing list is
    /// left intact and has-more is cleared. No automatic retry.
    pub async fn load_more(&self) -> bool {
        let (generation, cursor) = {
            let mut state = self.state.lock().expect("gallery state lock");
            if state.in_flight
                || !state.has_more
                || !matches!(state.filter, GalleryFilter::All)
            {
                return false;
            }
            state.in_flight = true;
            (state.generation, state.cursor)
        };

        let result = fetch_page(
            self.store.as_ref(),
            &GalleryFilter::All,
            cursor.as_ref(),
            self.page_size,
        )
        .await;

        let mut state = self.state.lock().expect("gallery state lock");
        if state.generation != generation {
            return true;
        }
        state.in_flight = false;
        match result {
            Ok(page) => {
                state.photos.extend(page.photos);
                if page.next_cursor.is_some() {
                    state.cursor = page.next_cursor;
                }
                state.has_more = page.has_more;
            }
            Err(err) => {
                warn!("gallery load-more failed: {err}");
                state.has_more = false;
            }
        }
        true
    }

    /// A copy of the current view state.
    pub fn snapshot(&self) -> GallerySnapshot {
        let state = self.state.lock().expect("gallery state lock");
        GallerySnapshot {
            filter: state.filter.clone(),
            photos: state.photos.clone(),
            has_more: state.has_more,
            loading: state.in_flight,
        }
    }
}
