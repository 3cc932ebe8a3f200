use super::*;

#[test]
fn exact_proportions_need_no_correction() {
    assert_eq!(apportion(&[0, 3, 1], 8), vec![0, 6, 2]);
    assert_eq!(apportion(&[3, 5, 2], 8), vec![2, 4, 2]);
}

#[test]
fn adjustments_tie_break_to_lowest_index() {
    assert_eq!(apportion(&[1, 1, 1], 4), vec![2, 1, 1]);
    assert_eq!(apportion(&[1, 1, 1], 5), vec![1, 2, 2]);
}

#[test]
fn surplus_skips_buckets_already_at_minimum() {
    // Rounding plus the minimum-one rule gives [1, 1, 2]; only the last bucket can shrink.
    assert_eq!(apportion(&[1, 1, 8], 3), vec![1, 1, 1]);
    // Halves round to even (0 and 2) before the minimum is applied.
    assert_eq!(apportion(&[1, 3], 2), vec![1, 1]);
}

#[test]
fn over_allocates_when_minimum_cannot_be_met() {
    assert_eq!(apportion(&[1, 1, 1], 2), vec![1, 1, 1]);
    assert_eq!(apportion(&[1, 1], 1), vec![1, 1]);
}

#[test]
fn degenerate_inputs_give_zeros() {
    assert_eq!(apportion(&[0, 0], 5), vec![0, 0]);
    assert_eq!(apportion(&[2, 3], 0), vec![0, 0]);
    assert!(apportion(&[], 4).is_empty());
}

#[test]
fn conserves_total_and_minimum_across_many_shapes() {
    let shapes: [&[usize]; 6] = [
        &[3, 5, 2],
        &[1, 1, 8],
        &[7],
        &[2, 0, 4, 1, 1],
        &[1, 2, 3, 4, 5, 6, 7],
        &[10, 1, 1, 1, 1],
    ];
    for weights in shapes {
        let non_empty = weights.iter().filter(|&&w| w > 0).count();
        for total in non_empty..60 {
            let alloc = apportion(weights, total);
            assert_eq!(alloc.len(), weights.len());
            assert_eq!(alloc.iter().sum::<usize>(), total, "{weights:?} / {total}");
            for (w, a) in weights.iter().zip(&alloc) {
                if *w > 0 {
                    assert!(*a >= 1, "{weights:?} / {total} -> {alloc:?}");
                } else {
                    assert_eq!(*a, 0);
                }
            }
        }
    }
}
