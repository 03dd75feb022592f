//! Fuzzy string similarity on a 0-100 scale.
//!
//! Similarity is built on a recursive longest-common-block alignment: the
//! longest run shared by both strings is matched first, then the pieces to
//! its left and right are aligned the same way. `ratio` is `2 * M / T` for
//! `M` matched characters out of `T` total. The token variants make the
//! score independent of word order, and [`weighted_ratio`] picks the best
//! variant for a pair of strings of the given lengths.

use std::cmp::{max, min};
use std::collections::BTreeSet;

/// Normalize a name for scoring.
///
/// Latin-1 supplement characters (U+0080..=U+00FF, where most diacritics
/// live) are dropped, every remaining non-word character becomes a space,
/// and the result is lowercased and trimmed.
pub fn full_process(s: &str) -> String {
    let replaced: String = s
        .chars()
        .filter(|c| !('\u{80}'..='\u{ff}').contains(c))
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
        .collect();
    replaced.to_lowercase().trim().to_string()
}

/// A run of `size` equal characters at `a[a_start..]` and `b[b_start..]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct MatchingBlock {
    a_start: usize,
    b_start: usize,
    size: usize,
}

/// Longest run shared by `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Among equally long runs the one starting earliest in `a` wins, then the
/// one starting earliest in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    (alo, ahi): (usize, usize),
    (blo, bhi): (usize, usize),
) -> MatchingBlock {
    let mut best = MatchingBlock {
        a_start: alo,
        b_start: blo,
        size: 0,
    };
    // run lengths ending at b[j - 1], offset by one so index 0 is "before blo"
    let mut previous = vec![0usize; bhi - blo + 1];
    for i in alo..ahi {
        let mut current = vec![0usize; bhi - blo + 1];
        for j in blo..bhi {
            if a[i] == b[j] {
                let run = previous[j - blo] + 1;
                current[j - blo + 1] = run;
                if run > best.size {
                    best = MatchingBlock {
                        a_start: i + 1 - run,
                        b_start: j + 1 - run,
                        size: run,
                    };
                }
            }
        }
        previous = current;
    }
    best
}

/// Non-overlapping matching runs in ascending order, adjacent runs merged,
/// terminated by a zero-sized block at `(a.len(), b.len())`.
fn matching_blocks(a: &[char], b: &[char]) -> Vec<MatchingBlock> {
    let mut pending = vec![((0, a.len()), (0, b.len()))];
    let mut found = Vec::new();
    while let Some(((alo, ahi), (blo, bhi))) = pending.pop() {
        let block = longest_match(a, b, (alo, ahi), (blo, bhi));
        if block.size == 0 {
            continue;
        }
        found.push(block);
        if alo < block.a_start && blo < block.b_start {
            pending.push(((alo, block.a_start), (blo, block.b_start)));
        }
        if block.a_start + block.size < ahi && block.b_start + block.size < bhi {
            pending.push((
                (block.a_start + block.size, ahi),
                (block.b_start + block.size, bhi),
            ));
        }
    }
    found.sort();

    let mut merged: Vec<MatchingBlock> = Vec::with_capacity(found.len() + 1);
    for block in found {
        match merged.last_mut() {
            Some(last)
                if last.a_start + last.size == block.a_start
                    && last.b_start + last.size == block.b_start =>
            {
                last.size += block.size;
            }
            _ => merged.push(block),
        }
    }
    merged.push(MatchingBlock {
        a_start: a.len(),
        b_start: b.len(),
        size: 0,
    });
    merged
}

/// Similarity of two character sequences in `0.0..=1.0`.
fn similarity(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matches: usize = matching_blocks(a, b).iter().map(|m| m.size).sum();
    2.0 * matches as f64 / total as f64
}

fn to_score(value: f64) -> u8 {
    value.round_ties_even().clamp(0.0, 100.0) as u8
}

/// Plain similarity of two strings, no normalization.
pub fn ratio(s1: &str, s2: &str) -> u8 {
    if s1 == s2 {
        return 100;
    }
    if s1.is_empty() || s2.is_empty() {
        return 0;
    }
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    to_score(100.0 * similarity(&a, &b))
}

/// Best similarity of the shorter string against any equally long window of
/// the longer one, anchored on the matching runs.
pub fn partial_ratio(s1: &str, s2: &str) -> u8 {
    if s1 == s2 {
        return 100;
    }
    if s1.is_empty() || s2.is_empty() {
        return 0;
    }
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let mut best = 0.0f64;
    for block in matching_blocks(&shorter, &longer) {
        let long_start = block.b_start.saturating_sub(block.a_start);
        let long_end = min(long_start + shorter.len(), longer.len());
        let window = &longer[min(long_start, long_end)..long_end];
        let score = similarity(&shorter, window);
        if score > 0.995 {
            return 100;
        }
        if score > best {
            best = score;
        }
    }
    to_score(100.0 * best)
}

fn sorted_tokens(processed: &str) -> String {
    let mut tokens: Vec<&str> = processed.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn token_sort(p1: &str, p2: &str, partial: bool) -> u8 {
    let sorted1 = sorted_tokens(p1);
    let sorted2 = sorted_tokens(p2);
    if partial {
        partial_ratio(&sorted1, &sorted2)
    } else {
        ratio(&sorted1, &sorted2)
    }
}

fn token_set(p1: &str, p2: &str, partial: bool) -> u8 {
    if p1 == p2 {
        return 100;
    }
    if p1.is_empty() || p2.is_empty() {
        return 0;
    }
    let tokens1: BTreeSet<&str> = p1.split_whitespace().collect();
    let tokens2: BTreeSet<&str> = p2.split_whitespace().collect();

    let join = |tokens: Vec<&str>| tokens.join(" ");
    let intersection = join(tokens1.intersection(&tokens2).copied().collect());
    let only1 = join(tokens1.difference(&tokens2).copied().collect());
    let only2 = join(tokens2.difference(&tokens1).copied().collect());

    let combined1 = format!("{} {}", intersection, only1).trim().to_string();
    let combined2 = format!("{} {}", intersection, only2).trim().to_string();
    let intersection = intersection.trim();

    let score: fn(&str, &str) -> u8 = if partial { partial_ratio } else { ratio };
    max(
        max(score(intersection, &combined1), score(intersection, &combined2)),
        score(&combined1, &combined2),
    )
}

/// Similarity after sorting the words of both strings.
pub fn token_sort_ratio(s1: &str, s2: &str) -> u8 {
    token_sort(&full_process(s1), &full_process(s2), false)
}

/// [`partial_ratio`] after sorting the words of both strings.
pub fn partial_token_sort_ratio(s1: &str, s2: &str) -> u8 {
    token_sort(&full_process(s1), &full_process(s2), true)
}

/// Similarity of the shared words against each side's full word set.
pub fn token_set_ratio(s1: &str, s2: &str) -> u8 {
    token_set(&full_process(s1), &full_process(s2), false)
}

/// [`token_set_ratio`] scored with [`partial_ratio`].
pub fn partial_token_set_ratio(s1: &str, s2: &str) -> u8 {
    token_set(&full_process(s1), &full_process(s2), true)
}

/// Weighted combination of the ratios above, used to rank candidate names.
///
/// Strings of similar length are compared whole and by word order; when one
/// is at least 1.5 times longer, windowed (partial) comparisons are used
/// instead and scaled down (further still past a length factor of 8).
/// Returns 0 when either string normalizes to nothing.
pub fn weighted_ratio(s1: &str, s2: &str) -> u8 {
    let p1 = full_process(s1);
    let p2 = full_process(s2);
    weighted_ratio_processed(&p1, &p2)
}

/// [`weighted_ratio`] for strings that already went through [`full_process`].
pub(crate) fn weighted_ratio_processed(p1: &str, p2: &str) -> u8 {
    if p1.is_empty() || p2.is_empty() {
        return 0;
    }
    let unbase_scale = 0.95;
    let base = f64::from(ratio(p1, p2));

    let len1 = p1.chars().count();
    let len2 = p2.chars().count();
    let len_ratio = max(len1, len2) as f64 / min(len1, len2) as f64;

    if len_ratio < 1.5 {
        let tsor = f64::from(token_sort(p1, p2, false)) * unbase_scale;
        let tser = f64::from(token_set(p1, p2, false)) * unbase_scale;
        return to_score(base.max(tsor).max(tser));
    }

    let partial_scale = if len_ratio > 8.0 { 0.6 } else { 0.9 };
    let partial = f64::from(partial_ratio(p1, p2)) * partial_scale;
    let ptsor = f64::from(token_sort(p1, p2, true)) * unbase_scale * partial_scale;
    let ptser = f64::from(token_set(p1, p2, true)) * unbase_scale * partial_scale;
    to_score(base.max(partial).max(ptsor).max(ptser))
}
