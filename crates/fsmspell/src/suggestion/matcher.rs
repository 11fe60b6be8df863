// Sequence similarity ratio (Ratcliff/Obershelp matching blocks)

use hashbrown::HashMap;

/// `2 * matches / total`, or 1.0 when both sequences are empty.
pub fn ratio_from(matches: usize, total: usize) -> f64 {
    if total == 0 {
        1.0
    } else {
        2.0 * matches as f64 / total as f64
    }
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Returns `(i, j, k)` with `a[i..i + k] == b[j..j + k]` and `k` maximal. Among
/// blocks of maximal length the one starting earliest in `a` wins, then the
/// one starting earliest in `b`. `k == 0` means no common element.
pub fn longest_match(
    a: &[char],
    b: &[char],
    (alo, ahi): (usize, usize),
    (blo, bhi): (usize, usize),
) -> (usize, usize, usize) {
    let width = bhi - blo;
    let mut best = (alo, blo, 0);
    if width == 0 {
        return best;
    }
    // prev[j - blo + 1] = length of the common run ending at (i - 1, j)
    let mut prev = vec![0usize; width + 1];
    let mut cur = vec![0usize; width + 1];
    for i in alo..ahi {
        for j in blo..bhi {
            let col = j - blo;
            if a[i] == b[j] {
                let k = prev[col] + 1;
                cur[col + 1] = k;
                if k > best.2 {
                    best = (i + 1 - k, j + 1 - k, k);
                }
            } else {
                cur[col + 1] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    best
}

/// Total size of the matching blocks of `a` and `b`.
///
/// Takes the longest common block, then recurses into the pieces to its left
/// and to its right.
pub fn matched_len(a: &[char], b: &[char]) -> usize {
    let mut total = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        if alo >= ahi || blo >= bhi {
            continue;
        }
        let (i, j, k) = longest_match(a, b, (alo, ahi), (blo, bhi));
        if k == 0 {
            continue;
        }
        total += k;
        pending.push((alo, i, blo, j));
        pending.push((i + k, ahi, j + k, bhi));
    }
    total
}

/// Similarity of two character sequences in `[0, 1]`.
pub fn ratio(a: &[char], b: &[char]) -> f64 {
    ratio_from(matched_len(a, b), a.len() + b.len())
}

/// [`ratio`] over string slices.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio(&a, &b)
}

/// Upper bound on [`ratio`] from the lengths alone.
pub fn real_quick_ratio(a_len: usize, b_len: usize) -> f64 {
    ratio_from(a_len.min(b_len), a_len + b_len)
}

/// Character counts of a fixed target word, reused across many candidates.
#[derive(Debug, Clone)]
pub struct CharProfile {
    len: usize,
    counts: HashMap<char, usize>,
    avail: HashMap<char, usize>,
}

impl CharProfile {
    pub fn new(target: &[char]) -> Self {
        let mut counts = HashMap::new();
        for &c in target {
            *counts.entry(c).or_insert(0) += 1;
        }
        Self {
            len: target.len(),
            avail: HashMap::with_capacity(counts.len()),
            counts,
        }
    }

    /// Upper bound on [`ratio`] from the shared character multiset.
    pub fn quick_ratio(&mut self, candidate: &[char]) -> f64 {
        self.avail.clone_from(&self.counts);
        let mut matches = 0;
        for c in candidate {
            if let Some(left) = self.avail.get_mut(c) {
                if *left > 0 {
                    *left -= 1;
                    matches += 1;
                }
            }
        }
        ratio_from(matches, candidate.len() + self.len)
    }
}
