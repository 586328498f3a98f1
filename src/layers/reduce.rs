//! Collapse a contact layer to "one group vs. all others"

use ndarray::{array, Array2};
use crate::error::{Result, SegregationError};

/// 2×2 layer with rows/columns {group, others}.
///
/// `M11` is the group's own block, `M12` its row minus `M11`, `M21` its column
/// minus `M11` and `M22` everything else. For an undirected (upper-triangular)
/// layer the cross cells are folded into `M12` so nothing is counted twice.
/// A layer that is already 2×2 is returned unchanged.
pub fn me_vs_others(m: &Array2<f64>, group_index: usize, directed: bool) -> Result<Array2<f64>> {
    let (rows, cols) = m.dim();
    if rows != cols {
        return Err(SegregationError::ShapeError { expected: rows, found: cols });
    }
    if group_index >= rows {
        return Err(SegregationError::UnknownGroup(format!("group index {}", group_index)));
    }
    if rows == 2 {
        return Ok(m.clone());
    }

    let m11 = m[[group_index, group_index]];
    let m12 = m.row(group_index).sum() - m11;
    let m21 = m.column(group_index).sum() - m11;
    let m22 = m.sum() - m11 - m12 - m21;

    let reduced = if directed {
        array![[m11, m12], [m21, m22]]
    } else {
        array![[m11, m12 + m21], [0.0, m22]]
    };

    Ok(reduced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::contact::fold_undirected;

    fn three_groups() -> Array2<f64> {
        array![[5.0, 1.0, 2.0], [3.0, 4.0, 0.5], [1.5, 2.5, 6.0]]
    }

    #[test]
    fn directed_blocks() {
        let reduced = me_vs_others(&three_groups(), 1, true).unwrap();

        assert_eq!(reduced, array![[4.0, 3.5], [3.5, 14.5]]);
        assert_eq!(reduced.sum(), three_groups().sum());
    }

    #[test]
    fn undirected_cross_ties_are_folded() {
        let symmetric = array![[4.0, 1.0, 2.0], [1.0, 6.0, 3.0], [2.0, 3.0, 8.0]];
        let folded = fold_undirected(&symmetric);
        let reduced = me_vs_others(&folded, 1, false).unwrap();

        // own block 3, cross ties 1 + 3, the rest 2 + 2 + 4
        assert_eq!(reduced, array![[3.0, 4.0], [0.0, 8.0]]);
        assert_eq!(reduced.sum(), folded.sum());
    }

    #[test]
    fn two_by_two_passes_through() {
        let m = array![[1.0, 2.0], [0.0, 3.0]];
        assert_eq!(me_vs_others(&m, 1, false).unwrap(), m);
    }

    #[test]
    fn two_by_two_still_checks_the_index() {
        let m = array![[1.0, 2.0], [0.0, 3.0]];
        assert!(matches!(me_vs_others(&m, 7, true), Err(SegregationError::UnknownGroup(_))));
    }

    #[test]
    fn rejects_bad_index_and_shape() {
        assert!(matches!(me_vs_others(&three_groups(), 3, true), Err(SegregationError::UnknownGroup(_))));
        assert!(matches!(
            me_vs_others(&Array2::zeros((2, 3)), 0, true),
            Err(SegregationError::ShapeError { .. })
        ));
    }
}
