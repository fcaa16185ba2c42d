use snafu::Snafu;

/// A failure reported by a [`crate::PageSource`].
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum FetchError {
    #[snafu(display("page source timed out after {elapsed_ms}ms"))]
    TimedOut { elapsed_ms: u64 },
    #[snafu(display("page source rejected the request: {reason}"))]
    Rejected { reason: String },
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// The page was not merged and the cursor was not consumed; calling `load_more` again
    /// retries the same page.
    #[snafu(display("failed to fetch older page at cursor {cursor}"))]
    Fetch { cursor: String, source: FetchError },
    #[snafu(display(
        "live item {id} at {timestamp_ms} is older than the newest item at {newest_ms}"
    ))]
    LiveOutOfOrder {
        id: String,
        timestamp_ms: u64,
        newest_ms: u64,
    },
    #[snafu(display(
        "page item {id} at {timestamp_ms} is newer than the item before it at {previous_ms}"
    ))]
    PageOutOfOrder {
        id: String,
        timestamp_ms: u64,
        previous_ms: u64,
    },
    #[snafu(display("item {id} is already in the transcript"))]
    DuplicateItem { id: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
