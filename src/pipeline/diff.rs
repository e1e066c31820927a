//! Line diff between two rendered blocks.
//!
//! Uses a longest-common-subsequence table to align the previous block with
//! the current one. Lines only in the current block are additions; the
//! delta keeps those plus every separator line, whatever its tag, so that
//! downstream formatting can still tell record blocks apart.

use super::render::SEPARATOR;

/// One aligned line of a diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOp<'a> {
    Equal(&'a str),
    Added(&'a str),
    Removed(&'a str),
}

/// Result of diffing two blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// Lines only in the current block
    pub added: usize,
    /// Lines only in the previous block
    pub removed: usize,
    /// Added lines plus every separator line, in diff order
    pub delta: Vec<String>,
}

impl DiffResult {
    /// Check if there are any changes.
    pub fn has_changes(&self) -> bool {
        self.added > 0 || self.removed > 0
    }
}

/// Align two line sequences.
///
/// Where both an addition and a removal are possible at the same point the
/// removal is emitted first. The common head and tail are matched directly,
/// so the LCS table only spans the differing middle.
pub fn line_diff<'a>(previous: &'a [String], current: &'a [String]) -> Vec<LineOp<'a>> {
    let head = previous
        .iter()
        .zip(current)
        .take_while(|(p, c)| p == c)
        .count();
    let tail = previous[head..]
        .iter()
        .rev()
        .zip(current[head..].iter().rev())
        .take_while(|(p, c)| p == c)
        .count();

    let mut ops = Vec::with_capacity(previous.len().max(current.len()));
    ops.extend(current[..head].iter().map(|line| LineOp::Equal(line)));
    align(
        &previous[head..previous.len() - tail],
        &current[head..current.len() - tail],
        &mut ops,
    );
    ops.extend(
        current[current.len() - tail..]
            .iter()
            .map(|line| LineOp::Equal(line)),
    );
    ops
}

fn align<'a>(previous: &'a [String], current: &'a [String], ops: &mut Vec<LineOp<'a>>) {
    let (n, m) = (previous.len(), current.len());

    // lcs[i][j] = length of the LCS of previous[i..] and current[j..]
    let mut lcs = vec![vec![0u32; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if previous[i] == current[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if previous[i] == current[j] {
            ops.push(LineOp::Equal(&current[j]));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            ops.push(LineOp::Removed(&previous[i]));
            i += 1;
        } else {
            ops.push(LineOp::Added(&current[j]));
            j += 1;
        }
    }
    ops.extend(previous[i..].iter().map(|line| LineOp::Removed(line)));
    ops.extend(current[j..].iter().map(|line| LineOp::Added(line)));
}

/// Compute the delta of `current` against `previous`.
pub fn calculate_delta(previous: &[String], current: &[String]) -> DiffResult {
    let mut result = DiffResult::default();

    for op in line_diff(previous, current) {
        match op {
            LineOp::Added(line) => {
                result.added += 1;
                result.delta.push(line.to_string());
            }
            LineOp::Equal(line) if line == SEPARATOR => result.delta.push(line.to_string()),
            LineOp::Equal(_) => {}
            LineOp::Removed(line) => {
                result.removed += 1;
                if line == SEPARATOR {
                    result.delta.push(line.to_string());
                }
            }
        }
    }

    result
}
