// Example: measure-then-correct without visible jumps.
use backscroll_virtualizer::{Virtualize, Virtualizer, VirtualizerOptions};

fn main() {
    let options = VirtualizerOptions::new(40).with_overscan_margin(80);
    let mut v = Virtualizer::with_count(options, 100);
    v.set_viewport_and_scroll_clamped(400, 2000);

    println!(
        "before: off={} total={} window={:?}",
        v.scroll_offset(),
        v.total_size(),
        v.virtual_range()
    );

    // Items rendered above the viewport came out taller than estimated. Their growth is added to
    // the scroll offset so the item at the viewport top stays put.
    let top = v.index_at_offset(v.scroll_offset()).unwrap_or(0);
    let report = v.settle(|index| Some(if index % 3 == 0 { 90 } else { 40 }));
    println!(
        "settle: passes={} measured={} correction={} converged={}",
        report.passes, report.measured, report.correction, report.converged
    );
    println!(
        "after: off={} top item start={:?} total={}",
        v.scroll_offset(),
        v.item_start(top),
        v.total_size()
    );

    // A prepend bumps the generation; measurements from the old window are refused.
    let stale = v.window().generation;
    v.prepend(10);
    println!("stale report: {:?}", v.report_measured(stale, 0, 55));
}
