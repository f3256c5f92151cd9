//! Line reconstruction: grouping fragments into visual rows.

use crate::model::{Line, PositionedFragment};

/// Group one page's fragments into lines, top of the page first.
///
/// A row is anchored at its highest fragment and absorbs every following
/// fragment (in descending `y`) whose `y` is within `y_tolerance` of the
/// anchor. Each row is then ordered left to right. Rows are strictly
/// separated, so every line's fragments span less than `y_tolerance`.
pub fn group_fragments_into_lines(
    fragments: Vec<PositionedFragment>,
    y_tolerance: f32,
) -> Vec<Line> {
    let mut fragments: Vec<PositionedFragment> =
        fragments.into_iter().filter(|f| !f.is_blank()).collect();
    if fragments.is_empty() {
        return vec![];
    }

    // Sort by Y (descending, since PDF Y is bottom-up) then X
    fragments.sort_by(|a, b| b.y.total_cmp(&a.y).then_with(|| a.x.total_cmp(&b.x)));

    let mut lines: Vec<Line> = Vec::new();
    let mut row: Vec<PositionedFragment> = Vec::new();
    let mut anchor_y: Option<f32> = None;

    for fragment in fragments {
        match anchor_y {
            Some(y) if (fragment.y - y).abs() < y_tolerance => row.push(fragment),
            _ => {
                if let Some(line) = close_row(&mut row) {
                    lines.push(line);
                }
                anchor_y = Some(fragment.y);
                row.push(fragment);
            }
        }
    }

    if let Some(line) = close_row(&mut row) {
        lines.push(line);
    }

    log::debug!("Reconstructed {} lines", lines.len());
    lines
}

fn close_row(row: &mut Vec<PositionedFragment>) -> Option<Line> {
    if row.is_empty() {
        return None;
    }
    let mut fragments = std::mem::take(row);
    // Stable: equal X keeps the top-down order
    fragments.sort_by(|a, b| a.x.total_cmp(&b.x));
    Line::from_fragments(&fragments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(text: &str, x: f32, y: f32) -> PositionedFragment {
        PositionedFragment::new(text, x, y, 10.0)
    }

    #[test]
    fn test_empty_input() {
        assert!(group_fragments_into_lines(vec![], 5.0).is_empty());
    }

    #[test]
    fn test_single_fragment() {
        let lines = group_fragments_into_lines(vec![frag("Only", 10.0, 100.0)], 5.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Only");
        assert_eq!(lines[0].fragment_count, 1);
    }

    #[test]
    fn test_same_row_ordered_by_x() {
        let lines = group_fragments_into_lines(
            vec![
                frag("world", 120.0, 700.0),
                frag("Hello", 50.0, 702.0),
                frag("below", 50.0, 680.0),
            ],
            5.0,
        );
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "Hello world");
        assert_eq!(lines[0].x, 50.0);
        assert_eq!(lines[0].y, 702.0);
        assert_eq!(lines[1].text, "below");
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let lines = group_fragments_into_lines(
            vec![frag("a", 0.0, 100.0), frag("b", 10.0, 95.0)],
            5.0,
        );
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_rows_anchor_at_first_fragment() {
        // 100 -> 96 joins, 92 is 8 away from the anchor and starts a new row
        let lines = group_fragments_into_lines(
            vec![
                frag("a", 0.0, 100.0),
                frag("b", 10.0, 96.0),
                frag("c", 20.0, 92.0),
            ],
            5.0,
        );
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "a b");
        assert_eq!(lines[1].text, "c");
    }

    #[test]
    fn test_blank_fragments_filtered() {
        let lines = group_fragments_into_lines(
            vec![frag("  ", 0.0, 100.0), frag("text", 0.0, 50.0)],
            5.0,
        );
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "text");
    }

    #[test]
    fn test_nan_coordinates_do_not_panic() {
        let lines = group_fragments_into_lines(
            vec![frag("a", f32::NAN, 100.0), frag("b", 0.0, f32::NAN)],
            5.0,
        );
        assert_eq!(lines.len(), 2);
    }
}
