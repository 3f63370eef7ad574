//! Region merging.
//!
//! Detector output overlaps heavily: an embedded image, the drawing cluster
//! around it, and its visual contour usually describe the same figure.
//! [`RegionMerger`] collapses those into one box, and [`merge_rows`] joins
//! side-by-side panels into a single figure.

use std::cmp::Ordering;

use crate::model::Region;

/// Default intersection-over-union above which two regions merge.
pub const DEFAULT_OVERLAP_THRESHOLD: f32 = 0.3;

/// Default tolerance for [`was_merged`], in points.
pub const DEFAULT_CONTAINMENT_TOLERANCE: f32 = 10.0;

/// Same-row condition used by [`RegionMerger`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SameRowRule {
    /// Vertical overlap must exceed this fraction of the smaller height
    pub min_vertical_overlap: f32,

    /// Horizontal gap must not exceed this
    pub max_horizontal_gap: f32,
}

impl SameRowRule {
    /// Check if two regions sit side by side on one row.
    pub fn matches(&self, a: &Region, b: &Region) -> bool {
        let min_height = a.height().min(b.height());
        a.vertical_overlap(b) > min_height * self.min_vertical_overlap
            && a.horizontal_gap(b) <= self.max_horizontal_gap
    }
}

impl Default for SameRowRule {
    fn default() -> Self {
        Self {
            min_vertical_overlap: 0.5,
            max_horizontal_gap: 100.0,
        }
    }
}

/// Row grouping used by [`merge_rows`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowRule {
    /// Maximum distance between vertical centres
    pub center_tolerance: f32,

    /// Maximum horizontal gap
    pub max_horizontal_gap: f32,
}

impl RowRule {
    /// Check if `next` continues the row ending with `last`.
    pub fn continues(&self, last: &Region, next: &Region) -> bool {
        let dy = (last.center().1 - next.center().1).abs();
        dy <= self.center_tolerance && last.horizontal_gap(next) <= self.max_horizontal_gap
    }
}

impl Default for RowRule {
    fn default() -> Self {
        Self {
            center_tolerance: 30.0,
            max_horizontal_gap: 100.0,
        }
    }
}

/// Overlap and same-row merging.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionMerger {
    /// Merge when IoU is strictly greater than this
    pub overlap_threshold: f32,

    /// Also merge side-by-side regions; `None` disables the rule
    pub same_row: Option<SameRowRule>,
}

impl RegionMerger {
    /// Create a merger with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the overlap threshold.
    pub fn with_overlap_threshold(mut self, threshold: f32) -> Self {
        self.overlap_threshold = threshold;
        self
    }

    /// Set or disable the same-row rule.
    pub fn with_same_row(mut self, rule: Option<SameRowRule>) -> Self {
        self.same_row = rule;
        self
    }

    /// Check if two regions should become one.
    pub fn should_merge(&self, a: &Region, b: &Region) -> bool {
        if a.overlap_ratio(b) > self.overlap_threshold {
            return true;
        }
        self.same_row.is_some_and(|rule| rule.matches(a, b))
    }

    /// Merge until no pair satisfies [`should_merge`](Self::should_merge).
    ///
    /// Each pass grows every unvisited seed by absorbing any region it should
    /// merge with; passes repeat until one makes no change, so the result is a
    /// fixpoint and merging it again returns it unchanged.
    pub fn merge(&self, regions: &[Region]) -> Vec<Region> {
        let mut current = regions.to_vec();
        loop {
            let (next, changed) = self.merge_pass(&current);
            current = next;
            if !changed {
                return current;
            }
        }
    }

    fn merge_pass(&self, regions: &[Region]) -> (Vec<Region>, bool) {
        let mut used = vec![false; regions.len()];
        let mut merged = Vec::with_capacity(regions.len());
        let mut changed = false;

        for seed in 0..regions.len() {
            if used[seed] {
                continue;
            }
            used[seed] = true;
            let mut grown = regions[seed];

            let mut merged_any = true;
            while merged_any {
                merged_any = false;
                for other in 0..regions.len() {
                    if used[other] {
                        continue;
                    }
                    if self.should_merge(&grown, &regions[other]) {
                        grown = grown.union(&regions[other]);
                        used[other] = true;
                        merged_any = true;
                        changed = true;
                    }
                }
            }

            merged.push(grown);
        }

        (merged, changed)
    }
}

impl Default for RegionMerger {
    fn default() -> Self {
        Self {
            overlap_threshold: DEFAULT_OVERLAP_THRESHOLD,
            same_row: Some(SameRowRule::default()),
        }
    }
}

/// Join regions into rows and return one box per row, top to bottom.
///
/// Regions are sorted by top edge; a row keeps growing while each next region
/// continues it from the row's last member.
pub fn merge_rows(regions: &[Region], rule: &RowRule) -> Vec<Region> {
    let mut sorted = regions.to_vec();
    sort_top_to_bottom(&mut sorted);

    let mut rows = Vec::new();
    let mut iter = sorted.into_iter();
    let Some(first) = iter.next() else {
        return rows;
    };

    let mut row_box = first;
    let mut last = first;
    for region in iter {
        if rule.continues(&last, &region) {
            row_box = row_box.union(&region);
        } else {
            rows.push(row_box);
            row_box = region;
        }
        last = region;
    }
    rows.push(row_box);

    rows
}

/// Check if more than one raw region lies inside `region` (grown by `tolerance`).
pub fn was_merged(raw: &[Region], region: &Region, tolerance: f32) -> bool {
    raw.iter()
        .filter(|r| region.contains_with_tolerance(r, tolerance))
        .count()
        > 1
}

/// Sort by top edge, then left edge.
pub fn sort_top_to_bottom(regions: &mut [Region]) {
    regions.sort_by(|a, b| match a.y0.total_cmp(&b.y0) {
        Ordering::Equal => a.x0.total_cmp(&b.x0),
        other => other,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x0: f32, y0: f32, x1: f32, y1: f32) -> Region {
        Region::new(x0, y0, x1, y1)
    }

    #[test]
    fn test_merge_threshold_example() {
        let regions = [
            r(0.0, 0.0, 10.0, 10.0),
            r(5.0, 5.0, 15.0, 15.0),
            r(100.0, 100.0, 110.0, 110.0),
        ];

        let merged = RegionMerger::default().merge(&regions);
        assert_eq!(merged.len(), 3);

        let merged = RegionMerger::default()
            .with_overlap_threshold(0.1)
            .merge(&regions);
        assert_eq!(merged.len(), 2);
        assert!(merged.contains(&r(0.0, 0.0, 15.0, 15.0)));
        assert!(merged.contains(&r(100.0, 100.0, 110.0, 110.0)));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // IoU exactly 0.5
        let a = r(0.0, 0.0, 10.0, 10.0);
        let b = r(0.0, 0.0, 10.0, 20.0);
        assert_eq!(a.overlap_ratio(&b), 0.5);

        let merger = RegionMerger::new()
            .with_overlap_threshold(0.5)
            .with_same_row(None);
        assert!(!merger.should_merge(&a, &b));
        assert_eq!(merger.merge(&[a, b]).len(), 2);

        let merger = merger.with_overlap_threshold(0.49);
        assert_eq!(merger.merge(&[a, b]), vec![r(0.0, 0.0, 10.0, 20.0)]);
    }

    #[test]
    fn test_same_row_merge() {
        let left = r(0.0, 0.0, 100.0, 100.0);
        let right = r(180.0, 10.0, 280.0, 110.0);
        let merger = RegionMerger::default();
        assert!(merger.should_merge(&left, &right));
        assert_eq!(merger.merge(&[left, right]), vec![r(0.0, 0.0, 280.0, 110.0)]);

        let far = r(201.0, 0.0, 300.0, 100.0);
        assert!(!merger.should_merge(&left, &far));
        assert!(!merger.clone().with_same_row(None).should_merge(&left, &right));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let regions = [
            r(0.0, 0.0, 50.0, 50.0),
            r(40.0, 40.0, 90.0, 90.0),
            r(80.0, 0.0, 120.0, 45.0),
            r(300.0, 300.0, 400.0, 400.0),
            r(0.0, 500.0, 30.0, 530.0),
        ];
        let merger = RegionMerger::default();
        let once = merger.merge(&regions);
        let twice = merger.merge(&once);
        assert_eq!(once, twice);

        for (i, a) in once.iter().enumerate() {
            for b in once.iter().skip(i + 1) {
                assert!(!merger.should_merge(a, b));
            }
        }
    }

    #[test]
    fn test_merge_chains_through_grown_region() {
        // b overlaps a only after c has been absorbed
        let a = r(0.0, 0.0, 10.0, 10.0);
        let c = r(0.0, 0.0, 10.0, 30.0);
        let b = r(0.0, 15.0, 10.0, 40.0);
        let merger = RegionMerger::new().with_same_row(None);
        assert_eq!(merger.merge(&[a, b, c]), vec![r(0.0, 0.0, 10.0, 40.0)]);
    }

    #[test]
    fn test_merge_empty() {
        assert!(RegionMerger::default().merge(&[]).is_empty());
        assert!(merge_rows(&[], &RowRule::default()).is_empty());
    }

    #[test]
    fn test_merge_rows() {
        let regions = [
            r(300.0, 110.0, 400.0, 190.0),
            r(0.0, 100.0, 250.0, 200.0),
            r(0.0, 400.0, 200.0, 500.0),
        ];
        let rows = merge_rows(&regions, &RowRule::default());
        assert_eq!(
            rows,
            vec![r(0.0, 100.0, 400.0, 200.0), r(0.0, 400.0, 200.0, 500.0)]
        );
    }

    #[test]
    fn test_merge_rows_gap_breaks_row() {
        let regions = [r(0.0, 0.0, 100.0, 100.0), r(250.0, 0.0, 350.0, 100.0)];
        assert_eq!(merge_rows(&regions, &RowRule::default()).len(), 2);
    }

    #[test]
    fn test_was_merged() {
        let raw = [r(0.0, 0.0, 100.0, 100.0), r(150.0, 5.0, 255.0, 100.0)];
        let merged = r(0.0, 0.0, 250.0, 100.0);
        assert!(was_merged(&raw, &merged, 10.0));
        assert!(!was_merged(&raw, &merged, 1.0));
        assert!(!was_merged(&raw[..1], &merged, 10.0));
    }

    #[test]
    fn test_sort_top_to_bottom() {
        let mut regions = vec![
            r(50.0, 10.0, 60.0, 20.0),
            r(0.0, 10.0, 5.0, 20.0),
            r(0.0, 0.0, 5.0, 5.0),
        ];
        sort_top_to_bottom(&mut regions);
        assert_eq!(regions[0].y0, 0.0);
        assert_eq!(regions[1].x0, 0.0);
        assert_eq!(regions[2].x0, 50.0);
    }
}
