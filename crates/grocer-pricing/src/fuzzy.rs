//! Substring-tolerant fuzzy similarity.
//!
//! [`partial_ratio`] aligns the shorter string against every matching block
//! it shares with the longer one and scores each aligned window with a
//! Ratcliff/Obershelp ratio, keeping the best. A short target such as
//! `"milk"` therefore scores 100 against any listing that contains it
//! verbatim, e.g. `"organic 2% milk gallon"`. Windows anchored near the end
//! of the longer string are cut short rather than skipped, so
//! `"chicken wings"` still scores 70 against `"tyson chicken"`.

use std::collections::HashMap;

/// Sequences at least this long have their most frequent characters
/// excluded from match seeding.
const AUTOJUNK_MIN_LEN: usize = 200;

/// Best-alignment similarity of `a` and `b`, 0–100.
///
/// Comparison is by `char`, case-sensitive; callers lower-case first.
/// Identical strings score 100; otherwise an empty string scores 0. When
/// both strings have the same length, `a` is the one aligned against `b`.
#[must_use]
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    if a == b {
        return 100;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (shorter, longer) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };

    let mut best = 0.0f64;
    for block in matching_blocks(shorter, longer) {
        let start = block.longer_start.saturating_sub(block.shorter_start);
        let end = (start + shorter.len()).min(longer.len());
        let score = ratio(shorter, &longer[start..end]);
        if score > 0.995 {
            return 100;
        }
        best = best.max(score);
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let score = (100.0 * best).round_ties_even() as u8;
    score
}

/// Shared run of `len` characters at `shorter_start` / `longer_start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Block {
    shorter_start: usize,
    longer_start: usize,
    len: usize,
}

/// `2·M / T`, where `M` counts characters in matching blocks and `T` is the
/// combined length.
fn ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matches: usize = matching_blocks(a, b).iter().map(|block| block.len).sum();
    #[allow(clippy::cast_precision_loss)]
    let ratio = 2.0 * matches as f64 / total as f64;
    ratio
}

/// Non-overlapping common runs in ascending order, found by recursively
/// taking the longest match and splitting around it. Always ends with an
/// empty block at `(a.len(), b.len())`.
fn matching_blocks(a: &[char], b: &[char]) -> Vec<Block> {
    let index = char_positions(b);
    let mut queue = vec![(0, a.len(), 0, b.len())];
    let mut blocks = Vec::new();

    while let Some((a_lo, a_hi, b_lo, b_hi)) = queue.pop() {
        let block = longest_match(a, b, &index, (a_lo, a_hi), (b_lo, b_hi));
        if block.len == 0 {
            continue;
        }
        blocks.push(block);
        if a_lo < block.shorter_start && b_lo < block.longer_start {
            queue.push((a_lo, block.shorter_start, b_lo, block.longer_start));
        }
        let a_end = block.shorter_start + block.len;
        let b_end = block.longer_start + block.len;
        if a_end < a_hi && b_end < b_hi {
            queue.push((a_end, a_hi, b_end, b_hi));
        }
    }

    blocks.sort_unstable();
    blocks.push(Block {
        shorter_start: a.len(),
        longer_start: b.len(),
        len: 0,
    });
    blocks
}

/// Ascending positions of each character in `b`. In long sequences,
/// characters making up more than 1 % of it are left out.
fn char_positions(b: &[char]) -> HashMap<char, Vec<usize>> {
    let mut index: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &c) in b.iter().enumerate() {
        index.entry(c).or_default().push(j);
    }
    if b.len() >= AUTOJUNK_MIN_LEN {
        let limit = b.len() / 100 + 1;
        index.retain(|_, positions| positions.len() <= limit);
    }
    index
}

/// Longest common run inside `a[a_lo..a_hi]` and `b[b_lo..b_hi]`, earliest
/// in `a` then in `b` on ties, extended across characters left out of the
/// index.
fn longest_match(
    a: &[char],
    b: &[char],
    index: &HashMap<char, Vec<usize>>,
    (a_lo, a_hi): (usize, usize),
    (b_lo, b_hi): (usize, usize),
) -> Block {
    let (mut best_i, mut best_j, mut best_len) = (a_lo, b_lo, 0);
    // Run length ending at each position of `b`, for the previous row of `a`.
    let mut run_ending: HashMap<usize, usize> = HashMap::new();

    for (i, c) in a.iter().enumerate().take(a_hi).skip(a_lo) {
        let mut next: HashMap<usize, usize> = HashMap::new();
        for &j in index.get(c).map_or(&[][..], Vec::as_slice) {
            if j < b_lo {
                continue;
            }
            if j >= b_hi {
                break;
            }
            let k = j
                .checked_sub(1)
                .and_then(|prev| run_ending.get(&prev))
                .copied()
                .unwrap_or(0)
                + 1;
            next.insert(j, k);
            if k > best_len {
                best_i = i + 1 - k;
                best_j = j + 1 - k;
                best_len = k;
            }
        }
        run_ending = next;
    }

    while best_i > a_lo && best_j > b_lo && a[best_i - 1] == b[best_j - 1] {
        best_i -= 1;
        best_j -= 1;
        best_len += 1;
    }
    while best_i + best_len < a_hi
        && best_j + best_len < b_hi
        && a[best_i + best_len] == b[best_j + best_len]
    {
        best_len += 1;
    }

    Block {
        shorter_start: best_i,
        longer_start: best_j,
        len: best_len,
    }
}
