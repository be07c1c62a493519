//! Line-level lyrics diff for reviewing suggested edits.
//!
//! Produces the segments a moderation view renders: runs of unchanged,
//! removed and added lines between the canonical text and a suggestion.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Unchanged,
    Added,
    Removed,
}

/// A maximal run of consecutive lines sharing one classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSegment {
    pub kind: DiffKind,
    pub lines: Vec<String>,
}

/// Diff `old` against `new` line by line.
///
/// Absent text counts as empty. Unchanged plus added lines rebuild `new`,
/// unchanged plus removed lines rebuild `old`. Inside a changed region the
/// removed lines come before the added ones.
pub fn diff(old: Option<&str>, new: Option<&str>) -> Vec<DiffSegment> {
    let a: Vec<&str> = old.unwrap_or_default().lines().collect();
    let b: Vec<&str> = new.unwrap_or_default().lines().collect();

    let prefix = a.iter().zip(&b).take_while(|(x, y)| x == y).count();
    let suffix = a[prefix..]
        .iter()
        .rev()
        .zip(b[prefix..].iter().rev())
        .take_while(|(x, y)| x == y)
        .count();

    let mut ops: Vec<(DiffKind, &str)> = Vec::with_capacity(a.len().max(b.len()));
    ops.extend(a[..prefix].iter().map(|l| (DiffKind::Unchanged, *l)));
    edit_script(&a[prefix..a.len() - suffix], &b[prefix..b.len() - suffix], &mut ops);
    ops.extend(a[a.len() - suffix..].iter().map(|l| (DiffKind::Unchanged, *l)));

    group(ops)
}

/// Longest-common-subsequence edit script over the differing middle part.
fn edit_script<'a>(a: &[&'a str], b: &[&'a str], ops: &mut Vec<(DiffKind, &'a str)>) {
    let (n, m) = (a.len(), b.len());

    // lcs[i][j]: LCS length of a[i..] and b[j..]
    let mut lcs = vec![vec![0u32; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if a[i] == b[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if a[i] == b[j] {
            ops.push((DiffKind::Unchanged, a[i]));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            ops.push((DiffKind::Removed, a[i]));
            i += 1;
        } else {
            ops.push((DiffKind::Added, b[j]));
            j += 1;
        }
    }
    ops.extend(a[i..].iter().map(|l| (DiffKind::Removed, *l)));
    ops.extend(b[j..].iter().map(|l| (DiffKind::Added, *l)));
}

fn group(ops: Vec<(DiffKind, &str)>) -> Vec<DiffSegment> {
    let mut segments: Vec<DiffSegment> = Vec::new();
    for (kind, line) in ops {
        match segments.last_mut() {
            Some(seg) if seg.kind == kind => seg.lines.push(line.to_string()),
            _ => segments.push(DiffSegment {
                kind,
                lines: vec![line.to_string()],
            }),
        }
    }
    segments
}

/// Line counts of a diff, for review summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub unchanged: usize,
    pub added: usize,
    pub removed: usize,
}

impl DiffStats {
    pub fn of(segments: &[DiffSegment]) -> Self {
        segments.iter().fold(Self::default(), |mut acc, seg| {
            let n = seg.lines.len();
            match seg.kind {
                DiffKind::Unchanged => acc.unchanged += n,
                DiffKind::Added => acc.added += n,
                DiffKind::Removed => acc.removed += n,
            }
            acc
        })
    }

    pub fn is_identical(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}
