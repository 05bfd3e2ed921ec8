//! Pagination module
//!
//! A [`Cursor`] is a lazy, forward-only sequence over a paged collection.
//! Each page is decoded in full when it arrives; the next page is fetched
//! only when the consumer pulls past the end of the current one, by
//! following the `rel="next"` link of the response that produced it.
//!
//! Iteration ends cleanly when a page has no next link or a follow-up page
//! is empty. A follow-up page that cannot be fetched, is not a success or
//! cannot be decoded ends iteration with an error instead. Nothing is
//! retried and the cursor applies no cap on the number of pages.

mod cursor;
mod types;

pub use cursor::Cursor;
pub use types::{CursorState, Page, PageLayout};
