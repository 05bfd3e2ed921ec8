//! The paginated cursor

use super::types::{CursorState, PageLayout};
use crate::decode::{decode_elements, DecodeContext, FromJson};
use crate::error::Result;
use crate::http::Transport;
use crate::protocol::Rollup;
use crate::response::Response;
use chrono_tz::Tz;
use futures::stream::{self, BoxStream, StreamExt};
use serde_json::Value;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Lazy, forward-only sequence of `T` spanning every page of a collection
///
/// The cursor holds a handle on the transport that fetched its first page
/// and uses it for follow-up pages. It is not rewindable; to iterate again,
/// issue the originating request again.
pub struct Cursor<T> {
    buffer: VecDeque<T>,
    response: Arc<Response>,
    transport: Arc<dyn Transport>,
    layout: PageLayout,
    tz: Option<Tz>,
    rollup: Option<Rollup>,
    state: CursorState,
}

impl<T: FromJson> Cursor<T> {
    /// Create a cursor over a plain collection page
    pub fn new(
        elements: &[Value],
        response: Arc<Response>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        Self::build(elements, response, transport, PageLayout::Array, None, None)
    }

    /// Create a cursor whose elements share a timezone
    ///
    /// Follow-up pages are read as envelopes and may name a new timezone,
    /// which then applies to their elements.
    pub fn with_timezone(
        elements: &[Value],
        response: Arc<Response>,
        transport: Arc<dyn Transport>,
        tz: Option<Tz>,
    ) -> Result<Self> {
        Self::build(elements, response, transport, PageLayout::Envelope, tz, None)
    }

    /// Create a cursor from the first page of a paged request
    ///
    /// A first page that is not a success is returned as an error here,
    /// not deferred to iteration.
    pub fn from_response(
        response: Arc<Response>,
        transport: Arc<dyn Transport>,
        layout: PageLayout,
    ) -> Result<Self> {
        response.ensure_success()?;
        let page = layout.split(&response.body)?;
        Self::build(
            &page.elements,
            response,
            transport,
            layout,
            page.tz,
            page.rollup,
        )
    }

    fn build(
        elements: &[Value],
        response: Arc<Response>,
        transport: Arc<dyn Transport>,
        layout: PageLayout,
        tz: Option<Tz>,
        rollup: Option<Rollup>,
    ) -> Result<Self> {
        let ctx = DecodeContext::new(Arc::clone(&response)).with_tz(tz);
        let buffer: VecDeque<T> = decode_elements(elements, &ctx)?.into();
        let state = if buffer.is_empty() {
            CursorState::NeedsRefill
        } else {
            CursorState::HasBuffered
        };

        Ok(Self {
            buffer,
            response,
            transport,
            layout,
            tz,
            rollup,
            state,
        })
    }

    /// Yield the next element, fetching the next page if needed
    ///
    /// Returns `Ok(None)` once the collection is exhausted. A failed
    /// follow-up page is returned as `Err` once; the cursor is then
    /// terminal and every later pull returns `Ok(None)`.
    pub async fn try_next(&mut self) -> Result<Option<T>> {
        loop {
            match self.state {
                CursorState::HasBuffered => {
                    let item = self.buffer.pop_front();
                    if self.buffer.is_empty() {
                        self.state = CursorState::NeedsRefill;
                    }
                    if item.is_some() {
                        return Ok(item);
                    }
                }
                CursorState::NeedsRefill | CursorState::Refilling => {
                    if let Err(e) = self.refill().await {
                        warn!("Page fetch failed, ending iteration: {}", e);
                        self.state = CursorState::Failed;
                        return Err(e);
                    }
                }
                CursorState::Exhausted | CursorState::Failed => return Ok(None),
            }
        }
    }

    async fn refill(&mut self) -> Result<()> {
        let Some(link) = self.response.next_link().map(str::to_string) else {
            debug!("No next link, cursor exhausted");
            self.state = CursorState::Exhausted;
            return Ok(());
        };

        self.state = CursorState::Refilling;
        debug!("Fetching next page: {}", link);

        let raw = self.transport.get(&link).await?;
        let response = Arc::new(Response::classify(raw));
        response.ensure_success()?;

        let page = self.layout.split(&response.body)?;
        // a page naming its own timezone or rollup overrides the current one
        let tz = page.tz.or(self.tz);
        let ctx = DecodeContext::new(Arc::clone(&response)).with_tz(tz);
        let elements: Vec<T> = decode_elements(&page.elements, &ctx)?;

        debug!("Fetched page with {} elements", elements.len());

        self.tz = tz;
        if page.rollup.is_some() {
            self.rollup = page.rollup;
        }
        self.response = response;
        self.buffer = elements.into();
        self.state = if self.buffer.is_empty() {
            CursorState::Exhausted
        } else {
            CursorState::HasBuffered
        };
        Ok(())
    }

    /// Convert into a stream of elements
    ///
    /// The stream ends after the first error.
    pub fn into_stream(self) -> BoxStream<'static, Result<T>>
    where
        T: Send + 'static,
    {
        stream::try_unfold(self, |mut cursor| async move {
            Ok(cursor.try_next().await?.map(|item| (item, cursor)))
        })
        .boxed()
    }
}

impl<T> Cursor<T> {
    /// Response of the most recently fetched page
    pub fn response(&self) -> &Response {
        &self.response
    }

    /// Timezone applied to the current page's elements
    pub fn timezone(&self) -> Option<Tz> {
        self.tz
    }

    /// Rollup the current page's points were computed with
    pub fn rollup(&self) -> Option<&Rollup> {
        self.rollup.as_ref()
    }

    /// Current lifecycle state
    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Number of elements buffered from the current page
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }
}

impl<T> fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("buffered", &self.buffer.len())
            .field("status", &self.response.status)
            .field("layout", &self.layout)
            .field("tz", &self.tz)
            .field("rollup", &self.rollup)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
