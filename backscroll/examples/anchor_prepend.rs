use backscroll::{Item, Page, Transcript, TranscriptOptions, VirtualizerOptions};

fn message(id: u64) -> Item<u64> {
    Item::new(id, "alice", format!("message #{id}"), 10_000 - id)
}

fn main() {
    // Example: loading older history while the reader sits in the middle of the transcript.
    //
    // The engine captures an anchor (item id + signed offset) before the page merges and
    // restores it afterwards, so the item under the viewport top does not move on screen.
    let options = TranscriptOptions::new(VirtualizerOptions::new(40));
    let mut t: Transcript<u64, u32> = Transcript::new(options);
    t.on_viewport_size(400);

    let first = t.begin_load().expect("idle");
    let page = Page::new((0..50).map(message).collect(), Some(50));
    t.complete_load(first.ticket, Ok(page)).expect("page merges");

    t.on_scroll(748);
    let anchor = t.capture_anchor().expect("non-empty");
    println!("before: off={} anchor={anchor:?}", t.scroll_offset());

    let older = t.begin_load().expect("idle");
    let page = Page::new((50..70).map(message).collect(), Some(70));
    t.complete_load(older.ticket, Ok(page)).expect("page merges");

    let index = t.items().layout_index_of(&anchor.key).expect("still loaded");
    println!(
        "after: off={} anchored item now at index {index}, start={:?}",
        t.scroll_offset(),
        t.virtualizer().item_start(index)
    );
}
