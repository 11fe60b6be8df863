// Longest-common-subsequence alignment of two token sequences

/// Upper bound on the DP table size (cells) for the middle section.
///
/// Past this, the unmatched middle of the two sequences is left unaligned
/// and every token in it is treated as new.
pub(crate) const MAX_ALIGN_CELLS: usize = 4_000_000;

/// Align `new` against `old`.
///
/// Returns, for every element of `new`, the index of the `old` element it is
/// matched with, or `None`. Matches are strictly increasing in both
/// sequences and form a longest common subsequence under `eq`.
///
/// The common prefix and suffix are matched first in linear time; only the
/// differing middle goes through the quadratic table, which keeps a typical
/// single edit cheap regardless of buffer size.
pub(crate) fn align_by<A, B>(old: &[A], new: &[B], eq: impl Fn(&A, &B) -> bool) -> Vec<Option<usize>> {
    let mut matches = vec![None; new.len()];

    let prefix = old.iter().zip(new).take_while(|&(a, b)| eq(a, b)).count();
    for (i, slot) in matches.iter_mut().enumerate().take(prefix) {
        *slot = Some(i);
    }

    let old_rest = &old[prefix..];
    let new_rest = &new[prefix..];
    let suffix = old_rest
        .iter()
        .rev()
        .zip(new_rest.iter().rev())
        .take_while(|&(a, b)| eq(a, b))
        .count();
    for k in 1..=suffix {
        matches[new.len() - k] = Some(old.len() - k);
    }

    let old_mid = &old_rest[..old_rest.len() - suffix];
    let new_mid = &new_rest[..new_rest.len() - suffix];
    let (n, m) = (old_mid.len(), new_mid.len());
    if n == 0 || m == 0 || n.saturating_mul(m) > MAX_ALIGN_CELLS {
        return matches;
    }

    // table[i * w + j] = LCS length of old_mid[i..] and new_mid[j..]
    let w = m + 1;
    let mut table = vec![0u32; (n + 1) * w];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[i * w + j] = if eq(&old_mid[i], &new_mid[j]) {
                table[(i + 1) * w + j + 1] + 1
            } else {
                table[(i + 1) * w + j].max(table[i * w + j + 1])
            };
        }
    }

    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if eq(&old_mid[i], &new_mid[j]) {
            matches[prefix + j] = Some(prefix + i);
            i += 1;
            j += 1;
        } else if table[(i + 1) * w + j] >= table[i * w + j + 1] {
            i += 1;
        } else {
            j += 1;
        }
    }

    matches
}
