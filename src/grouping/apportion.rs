/// Split `total` items across buckets in proportion to `weights`.
///
/// Largest-remainder method: every bucket first gets its proportional share rounded half to even,
/// and at least one item when its weight is non-zero. The sum is then walked towards `total` one
/// item at a time: surplus comes off the bucket with the smallest fractional remainder that can
/// still give one up, deficit goes to the bucket with the largest remainder. A bucket that was
/// adjusted has its remainder reset to zero. Ties resolve to the lowest index.
///
/// When `total` is smaller than the number of non-zero weights the minimum of one per bucket
/// cannot be honored; the result then over-allocates and a warning is logged.
///
/// A zero `total` or an all-zero `weights` slice yields all zeros.
pub fn apportion(weights: &[usize], total: usize) -> Vec<usize> {
    let expected: usize = weights.iter().sum();
    if expected == 0 || total == 0 {
        return vec![0; weights.len()];
    }

    let proportional: Vec<f64> = weights
        .iter()
        .map(|&w| w as f64 / expected as f64 * total as f64)
        .collect();
    let mut alloc: Vec<usize> = weights
        .iter()
        .zip(&proportional)
        .map(|(&w, &p)| {
            let rounded = p.round_ties_even() as usize;
            if w > 0 { rounded.max(1) } else { rounded }
        })
        .collect();
    let mut remainders: Vec<f64> = proportional
        .iter()
        .map(|p| p - p.round_ties_even())
        .collect();

    let mut sum: usize = alloc.iter().sum();
    while sum < total {
        let Some(i) = pick(
            (0..alloc.len()).filter(|&i| weights[i] > 0),
            &remainders,
            |cand, best| cand > best,
        ) else {
            break;
        };
        alloc[i] += 1;
        remainders[i] = 0.0;
        sum += 1;
    }
    while sum > total {
        let floor = |i: usize| usize::from(weights[i] > 0);
        let Some(i) = pick(
            (0..alloc.len()).filter(|&i| alloc[i] > floor(i)),
            &remainders,
            |cand, best| cand < best,
        ) else {
            tracing::warn!(
                allocated = sum,
                total,
                buckets = alloc.len(),
                "cannot honor one item per bucket; accepting over-allocation"
            );
            break;
        };
        alloc[i] -= 1;
        remainders[i] = 0.0;
        sum -= 1;
    }
    alloc
}

// First candidate (lowest index) that no later candidate beats.
fn pick(
    candidates: impl Iterator<Item = usize>,
    remainders: &[f64],
    beats: impl Fn(f64, f64) -> bool,
) -> Option<usize> {
    candidates.fold(None, |best, i| match best {
        Some(b) if !beats(remainders[i], remainders[b]) => Some(b),
        _ => Some(i),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/grouping/apportion.rs"]
mod tests;
