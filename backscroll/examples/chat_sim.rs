// Example: a simulated chat session with history paging and live arrivals.
use backscroll::{FetchError, Item, Page, Session, Transcript, TranscriptOptions, Viewport};
use futures::FutureExt;
use futures::executor::block_on;
use futures::future::LocalBoxFuture;

const HISTORY: u64 = 45;
const PAGE: u64 = 20;

/// Serves a fixed history of `HISTORY` messages, newest first.
fn fetch(cursor: Option<u64>) -> LocalBoxFuture<'static, Result<Page<u64, u64>, FetchError>> {
    async move {
        let start = cursor.unwrap_or(0);
        let end = (start + PAGE).min(HISTORY);
        let items = (start..end)
            .map(|i| {
                let ts = 1_000_000 - i * 1_000;
                Item::new(i, "history", format!("old message {i}"), ts)
            })
            .collect();
        Ok(Page::new(items, (end < HISTORY).then_some(end)))
    }
    .boxed_local()
}

/// A pretend DOM: every third message wraps onto a second line.
struct Screen {
    offset: u64,
    height: u32,
}

impl Viewport for Screen {
    fn scroll_offset(&self) -> u64 {
        self.offset
    }

    fn set_scroll_offset(&mut self, offset: u64) {
        self.offset = offset;
    }

    fn viewport_extent(&self) -> u32 {
        self.height
    }

    fn measure(&mut self, index: usize) -> Option<u32> {
        Some(if index % 3 == 0 { 64 } else { 36 })
    }
}

fn main() {
    let session = Session::new(
        Transcript::<u64, u64>::new(TranscriptOptions::default().with_bottom_threshold(96)),
        fetch,
    );
    let mut screen = Screen {
        offset: 0,
        height: 480,
    };
    session.on_viewport_size(screen.height);

    block_on(session.load_more()).expect("first page");
    let report = session.transcript_mut().layout(&mut screen);
    println!(
        "opened: items={} off={} settle={report:?}",
        session.transcript().items().len(),
        screen.offset
    );

    // Live arrivals while at the bottom follow the conversation.
    for n in 0..3u64 {
        let now = n * 100;
        let item = Item::new(10_000 + n, "bob", format!("hi #{n}"), 1_000_000 + n);
        let followed = session.push_live(item, now).expect("in order");
        while let Some(off) = session.tick(now + 250) {
            screen.offset = off;
        }
        session.transcript_mut().layout(&mut screen);
        println!("arrival {n}: followed={followed} off={}", screen.offset);
    }

    // The reader scrolls to the top; the trigger pulls in older pages.
    session.on_scroll(0);
    while block_on(session.load_older_if_needed()).expect("fetch") {
        let t = session.transcript();
        println!(
            "paged: items={} off={} has_more={}",
            t.items().len(),
            t.scroll_offset(),
            t.has_more()
        );
        drop(t);
        session.on_scroll(0);
    }

    // Away from the bottom, arrivals no longer move the viewport.
    let item = Item::new(20_000, "carol", "anyone here?", 2_000_000);
    let followed = session.push_live(item, 1_000).expect("in order");
    println!(
        "arrival while reading history: followed={followed} off={}",
        session.transcript().scroll_offset()
    );
}
