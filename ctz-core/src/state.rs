//! Recursion states and their flat LP-variable numbering.
//!
//! A state `(m, k)` is a residue class `m` at recursion depth `k >= 1` with
//! `m mod 3 = 2` and `m < 3^k`. Depth `d` holds `3^(d-1)` states, and the
//! states of depths `1..=k` are packed depth by depth into `[0, V)` with
//! `V = (3^k - 1) / 2`:
//!
//! ```text
//! index(m, k) = (3^(k-1) - 1) / 2 + (m - 2) / 3
//! ```

use crate::error::{CoreError, CoreResult};
use std::fmt;

/// `3^exponent`, or [`CoreError::DepthOutOfRange`] on overflow.
pub fn power_of_three(exponent: u32) -> CoreResult<usize> {
    3usize
        .checked_pow(exponent)
        .ok_or(CoreError::DepthOutOfRange(exponent))
}

/// Number of LP variables for a system of depth `depth`: `(3^depth - 1) / 2`.
pub fn variable_count(depth: u32) -> CoreResult<usize> {
    if depth == 0 {
        return Err(CoreError::DepthOutOfRange(depth));
    }
    Ok((power_of_three(depth)? - 1) / 2)
}

/// A residue class at a recursion depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct State {
    residue: usize,
    depth: u32,
}

impl State {
    /// Validate and create a state.
    pub fn new(residue: usize, depth: u32) -> CoreResult<Self> {
        let invalid = CoreError::InvalidState {
            m: residue,
            k: depth,
        };
        if depth == 0 || residue % 3 != 2 {
            return Err(invalid);
        }
        if residue >= power_of_three(depth)? {
            return Err(invalid);
        }
        Ok(Self { residue, depth })
    }

    /// Create a state known to be valid.
    pub(crate) fn from_parts(residue: usize, depth: u32) -> Self {
        debug_assert!(depth >= 1 && residue % 3 == 2);
        Self { residue, depth }
    }

    /// Residue-class identifier `m`.
    pub fn residue(&self) -> usize {
        self.residue
    }

    /// Recursion depth `k`.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Position of this state's variable in the packed numbering.
    pub fn flat_index(&self) -> usize {
        flat_index(self.residue, self.depth)
    }

    /// Inverse of [`State::flat_index`].
    pub fn from_flat_index(index: usize) -> CoreResult<Self> {
        let mut depth = 1u32;
        loop {
            let end = variable_count(depth)?;
            if index < end {
                let start = (power_of_three(depth - 1)? - 1) / 2;
                return Ok(Self::from_parts(2 + 3 * (index - start), depth));
            }
            depth += 1;
        }
    }

    /// All states of one depth in increasing residue order.
    pub fn all_at(depth: u32) -> CoreResult<impl Iterator<Item = State>> {
        if depth == 0 {
            return Err(CoreError::DepthOutOfRange(depth));
        }
        let modulus = power_of_three(depth)?;
        Ok((2..modulus)
            .step_by(3)
            .map(move |residue| State::from_parts(residue, depth)))
    }

    /// The three states one depth down that refine this one:
    /// `(m + 3^k * l, k + 1)` for `l` in `0..3`.
    pub fn children(&self) -> CoreResult<[State; 3]> {
        let block = power_of_three(self.depth)?;
        let depth = self.depth + 1;
        if block.checked_mul(3).is_none() {
            return Err(CoreError::DepthOutOfRange(depth));
        }
        Ok([0, 1, 2].map(|branch| State::from_parts(self.residue + block * branch, depth)))
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.residue, self.depth)
    }
}

/// Packed index of `(residue, depth)` without validation.
pub(crate) fn flat_index(residue: usize, depth: u32) -> usize {
    (3usize.pow(depth - 1) - 1) / 2 + (residue - 2) / 3
}
