// ==============================================================================
// "Did You Mean?" Suggestions for Option Names
// ==============================================================================
//
// Edit-distance helpers used when an option name given on the command line (or
// parsed from a string) is not one drafter recognizes.

/// Levenshtein edit distance between `a` and `b`, counted in chars.
///
/// Two-row dynamic programming; option names are short, so the quadratic time
/// never matters.
pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitute = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitute.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Largest distance at which a candidate still counts as a likely typo.
///
/// Short names tolerate a single edit; anything longer tolerates two.
pub(crate) fn max_edit_distance(name_len: usize) -> usize {
    if name_len <= 4 { 1 } else { 2 }
}
