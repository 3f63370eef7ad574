//! Vector-drawing clustering.

use crate::model::{DrawingGroup, Region};

/// Default centre-distance threshold for clustering, in points.
pub const DEFAULT_DISTANCE_THRESHOLD: f32 = 50.0;

/// Default minimum width and height of a kept cluster, in points.
pub const DEFAULT_MIN_GROUP_SIZE: f32 = 50.0;

/// Single-link clustering of drawing primitives by bounding-box centre.
///
/// Two primitives are linked when their centres are closer than
/// `distance_threshold` (strictly). Links are transitive: a chain of close
/// primitives forms one group even if its ends are far apart. Groups keep
/// the order of their first member.
pub fn cluster_drawings(drawings: &[Region], distance_threshold: f32) -> Vec<DrawingGroup> {
    let centers: Vec<(f32, f32)> = drawings.iter().map(Region::center).collect();
    let mut assigned = vec![false; drawings.len()];
    let mut groups = Vec::new();

    for seed in 0..drawings.len() {
        if assigned[seed] {
            continue;
        }
        assigned[seed] = true;

        let mut members = vec![seed];
        let mut frontier = vec![seed];
        while let Some(current) = frontier.pop() {
            for candidate in 0..drawings.len() {
                if assigned[candidate] {
                    continue;
                }
                if distance(centers[current], centers[candidate]) < distance_threshold {
                    assigned[candidate] = true;
                    members.push(candidate);
                    frontier.push(candidate);
                }
            }
        }

        members.sort_unstable();
        groups.push(DrawingGroup {
            members: members.into_iter().map(|i| drawings[i]).collect(),
        });
    }

    groups
}

/// Cluster drawings and keep groups whose union box exceeds `min_size` in both
/// dimensions.
pub fn drawing_regions(drawings: &[Region], distance_threshold: f32, min_size: f32) -> Vec<Region> {
    let groups = cluster_drawings(drawings, distance_threshold);
    let total = groups.len();
    let regions: Vec<Region> = groups
        .iter()
        .filter_map(DrawingGroup::bounds)
        .filter(|b| b.width() > min_size && b.height() > min_size)
        .collect();
    log::debug!(
        "Clustered {} drawings into {} groups, kept {}",
        drawings.len(),
        total,
        regions.len()
    );
    regions
}

fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(cx: f32, cy: f32, half: f32) -> Region {
        Region::new(cx - half, cy - half, cx + half, cy + half)
    }

    #[test]
    fn test_cluster_transitive() {
        // A-B 40 apart, B-C 40 apart, A-C 80 apart: one group
        let drawings = [
            square(0.0, 0.0, 5.0),
            square(40.0, 0.0, 5.0),
            square(80.0, 0.0, 5.0),
        ];
        let groups = cluster_drawings(&drawings, 50.0);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 3);
    }

    #[test]
    fn test_cluster_threshold_is_strict() {
        let drawings = [square(0.0, 0.0, 5.0), square(50.0, 0.0, 5.0)];
        assert_eq!(cluster_drawings(&drawings, 50.0).len(), 2);
        assert_eq!(cluster_drawings(&drawings, 50.5).len(), 1);
    }

    #[test]
    fn test_cluster_empty() {
        assert!(cluster_drawings(&[], 50.0).is_empty());
    }

    #[test]
    fn test_drawing_regions_size_filter() {
        let drawings = [
            // Chart: four corners of a 120x100 box, neighbours within 50 via the middle
            Region::new(100.0, 100.0, 140.0, 140.0),
            Region::new(130.0, 100.0, 170.0, 140.0),
            Region::new(160.0, 100.0, 220.0, 140.0),
            Region::new(100.0, 130.0, 220.0, 200.0),
            // Underline far away: wide but thin
            Region::new(300.0, 500.0, 500.0, 501.0),
        ];
        let regions = drawing_regions(&drawings, 50.0, 50.0);
        assert_eq!(regions, vec![Region::new(100.0, 100.0, 220.0, 200.0)]);
    }
}
