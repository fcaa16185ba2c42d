use crate::*;

use alloc::vec::Vec;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 11
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() % (end_exclusive - start))
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as u32
    }
}

fn expected_item_start(extents: &[u32], gap: u32, padding_start: u32, index: usize) -> u64 {
    let mut off = padding_start as u64;
    for i in 0..index {
        off += extents[i] as u64;
        if i + 1 < extents.len() {
            off += gap as u64;
        }
    }
    off
}

fn expected_total_size(extents: &[u32], gap: u32, padding_start: u32, padding_end: u32) -> u64 {
    let items: u64 = extents.iter().map(|&e| e as u64).sum();
    let gaps = (extents.len().saturating_sub(1) as u64) * gap as u64;
    padding_start as u64 + items + gaps + padding_end as u64
}

fn layout(model: &[Option<u32>], estimate: u32) -> Vec<u32> {
    model.iter().map(|m| m.unwrap_or(estimate)).collect()
}

#[test]
fn fixed_extent_range_and_total() {
    let mut v = Virtualizer::with_count(VirtualizerOptions::new(10).with_overscan_margin(0), 100);
    v.set_viewport_size(100);
    assert_eq!(v.total_size(), 1000);
    assert_eq!(v.visible_range(), VirtualRange { start_index: 0, end_index: 10 });
    assert_eq!(v.virtual_range(), v.visible_range());

    let w = v.window();
    assert_eq!(w.len(), 10);
    assert_eq!(w.offsets[3], 30);
    assert!(w.extents.iter().all(|&e| e == 10));
}

#[test]
fn overscan_margin_extends_both_sides_in_pixels() {
    let mut v = Virtualizer::with_count(VirtualizerOptions::new(10).with_overscan_margin(20), 100);
    v.set_viewport_and_scroll_clamped(100, 500);
    assert_eq!(v.visible_range(), VirtualRange { start_index: 50, end_index: 60 });
    assert_eq!(v.virtual_range(), VirtualRange { start_index: 48, end_index: 62 });

    let mut indexes = Vec::new();
    v.for_each_virtual_item(|it| indexes.push(it.index));
    assert_eq!(indexes, (48..62).collect::<Vec<_>>());
}

#[test]
fn overscan_is_clamped_at_both_ends() {
    let mut v = Virtualizer::with_count(VirtualizerOptions::new(10).with_overscan_margin(50), 20);
    v.set_viewport_and_scroll_clamped(50, 0);
    assert_eq!(v.virtual_range(), VirtualRange { start_index: 0, end_index: 10 });

    v.set_scroll_offset_clamped(u64::MAX);
    assert_eq!(v.scroll_offset(), 150);
    assert_eq!(v.virtual_range(), VirtualRange { start_index: 10, end_index: 20 });
}

#[test]
fn padding_and_gap_affect_total_and_positions() {
    let opts = VirtualizerOptions::new(2).with_padding(10, 5).with_gap(1);
    let v = Virtualizer::with_count(opts, 3);
    // total = pad_start(10) + (2+1)+(2+1)+2 + pad_end(5) = 23
    assert_eq!(v.total_size(), 23);
    assert_eq!(v.item_start(0), Some(10));
    assert_eq!(v.item_start(1), Some(13));
    assert_eq!(v.item_start(2), Some(16));
    assert_eq!(v.item_end(2), Some(18));
    assert_eq!(v.item_start(3), None);

    // viewport size 0 => nothing to materialize
    assert!(v.window().is_empty());
}

#[test]
fn estimator_shift_moves_measurements_past_prepended_slots() {
    let mut e = SizeEstimator::new(5, 100);
    for i in 0..3 {
        e.record(i, 40);
    }

    e.shift(2);

    assert_eq!(e.len(), 7);
    assert_eq!(e.measured(0), None);
    assert_eq!(e.measured(1), None);
    assert_eq!(e.measured(2), Some(40));
    assert_eq!(e.measured(3), Some(40));
    assert_eq!(e.measured(4), Some(40));
    assert_eq!(e.extent(0), 100);
    assert_eq!(e.measured_count(), 3);
}

#[test]
fn estimator_record_returns_previous_layout_extent() {
    let mut e = SizeEstimator::new(2, 50);
    assert_eq!(e.record(0, 70), Some(50));
    assert_eq!(e.record(0, 60), Some(70));
    assert_eq!(e.record(9, 60), None);
    assert!(e.is_measured(0));
    assert!(!e.is_measured(1));
}

#[test]
fn prepend_shifts_measurements_and_bumps_generation() {
    let mut v = Virtualizer::with_count(VirtualizerOptions::new(100), 3);
    for i in 0..3 {
        v.measure(i, 40);
    }
    assert_eq!(v.total_size(), 120);
    let before = v.generation();

    v.prepend(2);

    assert_eq!(v.len(), 5);
    assert_eq!(v.generation(), before + 1);
    assert!(!v.is_measured(0));
    assert!(!v.is_measured(1));
    assert_eq!(
        (2..5).map(|i| v.item_size(i).unwrap()).collect::<Vec<_>>(),
        [40, 40, 40]
    );
    assert_eq!(v.item_start(2), Some(200));
    assert_eq!(v.total_size(), 320);
}

#[test]
fn prepend_of_zero_is_a_no_op() {
    let mut v = Virtualizer::with_count(VirtualizerOptions::new(10), 3);
    v.prepend(0);
    assert_eq!(v.generation(), 0);
    assert_eq!(v.len(), 3);
}

#[test]
fn append_keeps_existing_positions_and_gap() {
    let mut v = Virtualizer::with_count(VirtualizerOptions::new(10).with_gap(2), 2);
    v.measure(1, 30);
    let gen_before = v.generation();
    let start_1 = v.item_start(1);

    v.append(2);

    assert_eq!(v.generation(), gen_before);
    assert_eq!(v.item_start(1), start_1);
    assert!(v.is_measured(1));
    // 10 + 2 + 30 + 2 + 10 + 2 + 10
    assert_eq!(v.total_size(), 66);
    assert_eq!(v.item_start(3), Some(56));

    let fresh = Virtualizer::with_count(VirtualizerOptions::new(10).with_gap(2), 4);
    assert_eq!(fresh.item_start(3), Some(36));
}

#[test]
fn measure_above_viewport_corrects_scroll() {
    let mut v = Virtualizer::with_count(VirtualizerOptions::new(10), 100);
    v.set_viewport_and_scroll_clamped(30, 200);

    let outcome = v.measure(0, 30);
    assert_eq!(
        outcome,
        MeasureOutcome::Resized {
            delta: 20,
            correction: 20
        }
    );
    assert_eq!(v.scroll_offset(), 220);
    assert_eq!(v.index_at_offset(v.scroll_offset()), Some(20));

    // Items at or below the viewport start do not move the viewport.
    let outcome = v.measure(21, 40);
    assert_eq!(outcome.correction(), 0);
    assert_eq!(v.scroll_offset(), 220);

    assert_eq!(v.measure(21, 40), MeasureOutcome::Unchanged);
}

#[test]
fn shrinking_item_above_viewport_moves_offset_back() {
    let mut v = Virtualizer::with_count(VirtualizerOptions::new(50), 10);
    v.set_viewport_and_scroll_clamped(50, 200);
    let outcome = v.measure(1, 20);
    assert_eq!(outcome.correction(), -30);
    assert_eq!(v.scroll_offset(), 170);
    assert_eq!(v.item_start(4), Some(170));
}

#[test]
fn stale_generation_measurement_is_ignored() {
    let mut v = Virtualizer::with_count(VirtualizerOptions::new(10), 5);
    v.set_viewport_size(50);
    let w = v.window();

    v.prepend(3);

    assert_eq!(v.report_measured(w.generation, 0, 99), MeasureOutcome::Stale);
    assert!(!v.is_measured(0));
    assert_eq!(v.report_measured(v.generation(), 42, 99), MeasureOutcome::Stale);
    assert_eq!(v.total_size(), 80);
}

#[test]
fn settle_measures_visible_window_until_converged() {
    let mut v = Virtualizer::with_count(VirtualizerOptions::new(10).with_overscan_margin(0), 100);
    v.set_viewport_size(100);

    let report = v.settle(|_| Some(25));

    assert!(report.converged);
    assert_eq!(report.passes, 1);
    assert_eq!(report.measured, 10);
    assert_eq!(report.correction, 0);
    assert_eq!(v.visible_range(), VirtualRange { start_index: 0, end_index: 4 });
    assert!((0..4).all(|i| v.is_measured(i)));
}

#[test]
fn settle_keeps_viewport_start_item_in_place() {
    let mut v = Virtualizer::with_count(VirtualizerOptions::new(10).with_overscan_margin(30), 100);
    v.set_viewport_and_scroll_clamped(100, 500);
    assert_eq!(v.index_at_offset(500), Some(50));

    let report = v.settle(|_| Some(20));

    assert!(report.converged);
    assert_eq!(report.correction, 30);
    assert_eq!(v.scroll_offset(), 530);
    assert_eq!(v.item_start(50), Some(530));
}

#[test]
fn settle_skips_unavailable_positions() {
    let mut v = Virtualizer::with_count(VirtualizerOptions::new(10).with_overscan_margin(0), 10);
    v.set_viewport_size(50);

    let report = v.settle(|i| (i != 3).then_some(10));

    assert!(report.converged);
    assert_eq!(report.unavailable, 1);
    assert!(!v.is_measured(3));
    assert!(v.is_measured(4));
}

#[test]
fn settle_stops_at_pass_cap() {
    let opts = VirtualizerOptions::new(10)
        .with_overscan_margin(0)
        .with_max_settle_passes(1);
    let mut v = Virtualizer::with_count(opts, 1000);
    v.set_viewport_size(100);

    let report = v.settle(|_| Some(1));

    assert_eq!(report.passes, 1);
    assert_eq!(report.measured, 10);
    assert!(!report.converged);
}

#[test]
fn distance_to_end_tracks_bottom_edge() {
    let mut v = Virtualizer::with_count(VirtualizerOptions::new(10), 100);
    v.set_viewport_and_scroll_clamped(100, 0);
    assert_eq!(v.distance_to_end(), 900);
    v.set_scroll_offset_clamped(v.max_scroll_offset());
    assert_eq!(v.distance_to_end(), 0);
    v.append(3);
    assert_eq!(v.distance_to_end(), 30);
}

#[test]
fn prefix_sums_grow_at_both_ends() {
    use crate::prefix::PrefixSums;

    // Layout top to bottom: [5, 7] prepended over [10, 20].
    let mut sums = PrefixSums::from_values([10u64, 20].into_iter());
    sums.push_front(7);
    sums.push_front(5);
    assert_eq!(sums.total(), 42);
    assert_eq!(
        (0..=4).map(|p| sums.start(p)).collect::<Vec<_>>(),
        [0, 5, 12, 22, 42]
    );

    assert_eq!(sums.position_at(0), 0);
    assert_eq!(sums.position_at(4), 0);
    assert_eq!(sums.position_at(5), 1);
    assert_eq!(sums.position_at(11), 1);
    assert_eq!(sums.position_at(12), 2);
    assert_eq!(sums.position_at(21), 2);
    assert_eq!(sums.position_at(41), 3);
    assert_eq!(sums.position_at(500), 4);

    sums.add(0, 3);
    sums.add(3, -20);
    sums.push_back(1);
    assert_eq!(
        (0..=5).map(|p| sums.start(p)).collect::<Vec<_>>(),
        [0, 8, 15, 25, 25, 26]
    );
    // A zero-width position shares its start with the next one.
    assert_eq!(sums.position_at(25), 4);
}

#[test]
fn many_prepends_match_a_fresh_layout() {
    let opts = VirtualizerOptions::new(9).with_gap(1);
    let mut grown = Virtualizer::new(opts);
    for n in [1, 3, 0, 7, 2] {
        grown.prepend(n);
    }
    grown.append(4);
    let fresh = Virtualizer::with_count(opts, 17);
    assert_eq!(grown.total_size(), fresh.total_size());
    for i in 0..17 {
        assert_eq!(grown.item_start(i), fresh.item_start(i));
    }
}

#[test]
fn window_items_match_for_each() {
    let mut v = Virtualizer::with_count(VirtualizerOptions::new(7).with_gap(3), 50);
    v.set_viewport_and_scroll_clamped(40, 123);
    let w = v.window();
    let mut expected = Vec::new();
    v.for_each_virtual_item(|it| expected.push(it));
    assert_eq!(w.items().collect::<Vec<_>>(), expected);
    assert_eq!(w.range(), v.virtual_range());
}

#[test]
fn property_random_layout_invariants() {
    let mut rng = Lcg::new(0x5eed_cafe);
    for _case in 0..40 {
        let estimate = rng.gen_range_u32(1, 40);
        let gap = rng.gen_range_u32(0, 4);
        let padding_start = rng.gen_range_u32(0, 10);
        let padding_end = rng.gen_range_u32(0, 10);
        let opts = VirtualizerOptions::new(estimate)
            .with_gap(gap)
            .with_padding(padding_start, padding_end)
            .with_overscan_margin(rng.gen_range_u32(0, 60));
        let initial = rng.gen_range_usize(0, 30);
        let mut v = Virtualizer::with_count(opts, initial);
        let mut model: Vec<Option<u32>> = alloc::vec![None; initial];

        for _step in 0..60 {
            match rng.gen_range_u64(0, 4) {
                0 => {
                    let n = rng.gen_range_usize(0, 6);
                    v.prepend(n);
                    let mut next = alloc::vec![None; n];
                    next.extend_from_slice(&model);
                    model = next;
                }
                1 => {
                    let n = rng.gen_range_usize(0, 6);
                    v.append(n);
                    model.extend(core::iter::repeat_n(None, n));
                }
                _ if !model.is_empty() => {
                    let i = rng.gen_range_usize(0, model.len());
                    let extent = rng.gen_range_u32(0, 80);
                    v.measure(i, extent);
                    model[i] = Some(extent);
                }
                _ => {}
            }

            let extents = layout(&model, estimate);
            assert_eq!(v.len(), model.len());
            assert_eq!(
                v.total_size(),
                expected_total_size(&extents, gap, padding_start, padding_end)
            );
            for i in 0..model.len() {
                assert_eq!(v.estimator().measured(i), model[i]);
                assert_eq!(
                    v.item_start(i),
                    Some(expected_item_start(&extents, gap, padding_start, i))
                );
            }

            let viewport = rng.gen_range_u32(1, 200);
            let offset = rng.gen_range_u64(0, v.total_size().max(1) + 50);
            v.set_viewport_and_scroll_clamped(viewport, offset);
            let visible = v.visible_range();
            let window = v.virtual_range();
            if model.is_empty() {
                assert!(window.is_empty());
                continue;
            }
            assert!(window.start_index <= visible.start_index);
            assert!(window.end_index >= visible.end_index);
            assert!(window.end_index <= model.len());
            // The item covering the scroll offset is always materialized.
            let at = v.index_at_offset(v.scroll_offset()).unwrap();
            assert!(window.contains(at));
        }
    }
}
