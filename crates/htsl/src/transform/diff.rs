//! Myers shortest-edit-script diff over index pairs.
//!
//! The algorithm only sees lengths and an equality predicate, so the same
//! engine diffs holders, action lists and condition lists. On a tie the
//! backtrack prefers deletion, which keeps replacements as
//! delete-then-insert at the same position.

/// One step of an edit script, in old/new index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Edit {
    /// `old[old]` and `new[new]` match.
    Keep { old: usize, new: usize },
    /// `new[new]` has no counterpart and must be inserted.
    Insert { new: usize },
    /// `old[old]` has no counterpart and must be removed.
    Delete { old: usize },
}

/// Computes the shortest edit script between two sequences given only their
/// lengths and an equality predicate.
pub(crate) fn diff(
    old_len: usize,
    new_len: usize,
    eq: impl Fn(usize, usize) -> bool,
) -> Vec<Edit> {
    let max = old_len + new_len;
    if max == 0 {
        return Vec::new();
    }
    let offset = max as isize;
    let width = 2 * max + 1;

    // Forward pass, snapshotting the frontier per depth for the backtrack.
    let mut frontier = vec![0usize; width];
    let mut trace: Vec<Vec<usize>> = Vec::new();
    'forward: for depth in 0..=max {
        trace.push(frontier.clone());
        let d = depth as isize;
        let mut k = -d;
        while k <= d {
            let index = (k + offset) as usize;
            let mut x = if k == -d
                || (k != d && frontier[index - 1] < frontier[index + 1])
            {
                frontier[index + 1]
            } else {
                frontier[index - 1] + 1
            };
            let mut y = (x as isize - k) as usize;
            while x < old_len && y < new_len && eq(x, y) {
                x += 1;
                y += 1;
            }
            frontier[index] = x;
            if x >= old_len && y >= new_len {
                break 'forward;
            }
            k += 2;
        }
    }

    // Backtrack from (old_len, new_len) through the snapshots.
    let mut edits = Vec::new();
    let mut x = old_len;
    let mut y = new_len;
    for (depth, v) in trace.iter().enumerate().rev() {
        if depth == 0 {
            // Only the common prefix snake remains.
            while x > 0 && y > 0 {
                edits.push(Edit::Keep {
                    old: x - 1,
                    new: y - 1,
                });
                x -= 1;
                y -= 1;
            }
            break;
        }
        let d = depth as isize;
        let k = x as isize - y as isize;
        let index = (k + offset) as usize;
        let prev_k = if k == -d || (k != d && v[index - 1] < v[index + 1]) {
            k + 1
        } else {
            k - 1
        };
        let prev_x = v[(prev_k + offset) as usize];
        let prev_y = (prev_x as isize - prev_k) as usize;
        while x > prev_x && y > prev_y {
            edits.push(Edit::Keep {
                old: x - 1,
                new: y - 1,
            });
            x -= 1;
            y -= 1;
        }
        if depth > 0 {
            if x == prev_x {
                y -= 1;
                edits.push(Edit::Insert { new: y });
            } else {
                x -= 1;
                edits.push(Edit::Delete { old: x });
            }
        }
        x = prev_x;
        y = prev_y;
    }
    edits.reverse();
    edits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff_chars(old: &str, new: &str) -> Vec<Edit> {
        let old: Vec<char> = old.chars().collect();
        let new: Vec<char> = new.chars().collect();
        diff(old.len(), new.len(), |i, j| old[i] == new[j])
    }

    #[test]
    fn identical_sequences_keep_everything() {
        let edits = diff_chars("abc", "abc");
        assert!(edits.iter().all(|e| matches!(e, Edit::Keep { .. })));
        assert_eq!(edits.len(), 3);
    }

    #[test]
    fn pure_insertions() {
        let edits = diff_chars("", "ab");
        assert_eq!(
            edits,
            vec![Edit::Insert { new: 0 }, Edit::Insert { new: 1 }]
        );
    }

    #[test]
    fn pure_deletions() {
        let edits = diff_chars("ab", "");
        assert_eq!(
            edits,
            vec![Edit::Delete { old: 0 }, Edit::Delete { old: 1 }]
        );
    }

    #[test]
    fn middle_change_is_delete_then_insert() {
        let edits = diff_chars("abc", "axc");
        assert_eq!(
            edits,
            vec![
                Edit::Keep { old: 0, new: 0 },
                Edit::Delete { old: 1 },
                Edit::Insert { new: 1 },
                Edit::Keep { old: 2, new: 2 },
            ]
        );
    }

    #[test]
    fn script_reconstructs_the_new_sequence() {
        let old: Vec<char> = "kitten".chars().collect();
        let new: Vec<char> = "sitting".chars().collect();
        let edits = diff(old.len(), new.len(), |i, j| old[i] == new[j]);
        let mut rebuilt = String::new();
        for edit in &edits {
            match edit {
                Edit::Keep { old: i, .. } => rebuilt.push(old[*i]),
                Edit::Insert { new: j } => rebuilt.push(new[*j]),
                Edit::Delete { .. } => {}
            }
        }
        assert_eq!(rebuilt, "sitting");
    }

    #[test]
    fn edit_count_is_minimal() {
        let edits = diff_chars("abcabba", "cbabac");
        let changes = edits
            .iter()
            .filter(|e| !matches!(e, Edit::Keep { .. }))
            .count();
        assert_eq!(changes, 5);
    }
}
