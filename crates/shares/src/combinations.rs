// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

/// Lazily yields every `k`-element subset of `0..n` in lexicographic order.
///
/// Each step advances the rightmost index that has not reached its maximum
/// position and resets everything to its right to the smallest increasing
/// run. `k = 0` yields the empty subset once. `k > n` yields nothing.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    state: State,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Fresh,
    Running,
    Exhausted,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        let state = if k > n {
            State::Exhausted
        } else {
            State::Fresh
        };
        Self {
            n,
            indices: (0..k).collect(),
            state,
        }
    }

    /// Advances `indices` to the next combination, returning `false` when
    /// the last one has already been produced.
    fn advance(&mut self) -> bool {
        let k = self.indices.len();
        // Position i may hold at most n - k + i
        let Some(i) = (0..k).rev().find(|&i| self.indices[i] != self.n - k + i) else {
            return false;
        };

        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        true
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            State::Exhausted => return None,
            State::Fresh => self.state = State::Running,
            State::Running => {
                if !self.advance() {
                    self.state = State::Exhausted;
                    return None;
                }
            }
        }
        Some(self.indices.clone())
    }
}

impl std::iter::FusedIterator for Combinations {}

/// Number of `k`-subsets of an `n`-set, saturating at `u128::MAX`.
pub fn binomial(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k) as u128;
    let n = n as u128;
    let mut result: u128 = 1;
    for i in 0..k {
        // result * (n - i) is always divisible by (i + 1)
        result = match result.checked_mul(n - i) {
            Some(product) => product / (i + 1),
            None => return u128::MAX,
        };
    }
    result
}
