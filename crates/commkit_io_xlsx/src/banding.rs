//! Row-banding state machine.
//!
//! Rows are classified only by whether their first cell is empty. The state
//! carries everything the classification needs about the previous row:
//!
//! | state                         | first cell | next state          | row kind   |
//! |-------------------------------|------------|---------------------|------------|
//! | `Seeking`                     | empty      | `Seeking`           | `Blank`    |
//! | `Seeking`                     | non-empty  | `HeaderRow`         | `Header`   |
//! | `HeaderRow`/`EvenData`/`OddData` | non-empty | `EvenData`/`OddData` | `Data`  |
//! | `HeaderRow`/`EvenData`/`OddData` | empty  | `Seeking`           | `Subtotal` |
//!
//! The even/odd counter restarts at zero on every header and advances on data rows only.

use crate::spec::EnumRowRole;

/// Banding states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumBandState {
    /// Sheet start or inside a blank run.
    #[default]
    Seeking,
    /// Previous row was a header.
    HeaderRow,
    /// Previous row was an even data row.
    EvenData,
    /// Previous row was an odd data row.
    OddData,
}

/// Row classification emitted per transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumRowKind {
    /// Blank separator row.
    Blank,
    /// Header or header-repeat row.
    Header,
    /// Data row.
    Data,
    /// First empty row after a block; receives subtotal formulas.
    Subtotal,
}

/// One classified row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecRowBand {
    /// Row classification.
    pub kind: EnumRowKind,
    /// Style role.
    pub role: EnumRowRole,
    /// Even/odd counter value before this row.
    pub counter: usize,
    /// Zero-based index of the header opening the current block.
    pub row_idx_header: Option<usize>,
}

/// Transition table. `counter` selects even/odd for data rows.
pub fn transition(
    state: EnumBandState,
    if_has_first_cell: bool,
    counter: usize,
) -> (EnumBandState, EnumRowKind) {
    match (state, if_has_first_cell) {
        (EnumBandState::Seeking, false) => (EnumBandState::Seeking, EnumRowKind::Blank),
        (EnumBandState::Seeking, true) => (EnumBandState::HeaderRow, EnumRowKind::Header),
        (_, true) => {
            let state_next = if counter % 2 == 0 {
                EnumBandState::EvenData
            } else {
                EnumBandState::OddData
            };
            (state_next, EnumRowKind::Data)
        }
        (_, false) => (EnumBandState::Seeking, EnumRowKind::Subtotal),
    }
}

/// Run the state machine over per-row "first cell is non-empty" flags.
pub fn classify_rows(first_cell_flags: &[bool]) -> Vec<SpecRowBand> {
    let mut state = EnumBandState::Seeking;
    let mut n_counter = 0usize;
    let mut n_row_idx_header: Option<usize> = None;

    let mut l_bands = Vec::with_capacity(first_cell_flags.len());
    for (row_idx, if_has_first_cell) in first_cell_flags.iter().copied().enumerate() {
        let (state_next, kind) = transition(state, if_has_first_cell, n_counter);
        let n_counter_before = n_counter;

        let role = match kind {
            EnumRowKind::Header => {
                n_counter = 0;
                n_row_idx_header = Some(row_idx);
                EnumRowRole::Header
            }
            EnumRowKind::Data => {
                n_counter += 1;
                if state_next == EnumBandState::EvenData {
                    EnumRowRole::EvenData
                } else {
                    EnumRowRole::OddData
                }
            }
            EnumRowKind::Blank | EnumRowKind::Subtotal => EnumRowRole::Plain,
        };

        l_bands.push(SpecRowBand {
            kind,
            role,
            counter: if kind == EnumRowKind::Header {
                0
            } else {
                n_counter_before
            },
            row_idx_header: n_row_idx_header,
        });
        state = state_next;
    }
    l_bands
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derive_flags(n_rows: usize, blank_rows: &[usize]) -> Vec<bool> {
        (0..n_rows).map(|idx| !blank_rows.contains(&idx)).collect()
    }

    #[test]
    fn test_transition_table() {
        assert_eq!(
            transition(EnumBandState::Seeking, false, 3),
            (EnumBandState::Seeking, EnumRowKind::Blank)
        );
        assert_eq!(
            transition(EnumBandState::Seeking, true, 3),
            (EnumBandState::HeaderRow, EnumRowKind::Header)
        );
        assert_eq!(
            transition(EnumBandState::HeaderRow, true, 0),
            (EnumBandState::EvenData, EnumRowKind::Data)
        );
        assert_eq!(
            transition(EnumBandState::EvenData, true, 1),
            (EnumBandState::OddData, EnumRowKind::Data)
        );
        assert_eq!(
            transition(EnumBandState::OddData, false, 2),
            (EnumBandState::Seeking, EnumRowKind::Subtotal)
        );
        assert_eq!(
            transition(EnumBandState::HeaderRow, false, 0),
            (EnumBandState::Seeking, EnumRowKind::Subtotal)
        );
    }

    #[test]
    fn test_headers_reappear_after_each_blank_run_and_counter_resets() {
        let l_bands = classify_rows(&derive_flags(12, &[2, 5, 9]));
        let l_kinds: Vec<EnumRowKind> = l_bands.iter().map(|band| band.kind).collect();

        use EnumRowKind::{Data, Header, Subtotal};
        assert_eq!(
            l_kinds,
            vec![
                Header, Data, Subtotal, Header, Data, Subtotal, Header, Data, Data, Subtotal,
                Header, Data
            ]
        );

        for row_idx_header in [0usize, 3, 6, 10] {
            assert_eq!(l_bands[row_idx_header].role, EnumRowRole::Header);
            assert_eq!(l_bands[row_idx_header + 1].counter, 0);
            assert_eq!(l_bands[row_idx_header + 1].role, EnumRowRole::EvenData);
            assert_eq!(l_bands[row_idx_header + 1].row_idx_header, Some(row_idx_header));
        }
        assert_eq!(l_bands[8].role, EnumRowRole::OddData);
        assert_eq!(l_bands[8].counter, 1);
    }

    #[test]
    fn test_consecutive_blank_rows_stay_seeking() {
        let l_bands = classify_rows(&[true, true, false, false, false, true, true]);
        let l_kinds: Vec<EnumRowKind> = l_bands.iter().map(|band| band.kind).collect();

        use EnumRowKind::{Blank, Data, Header, Subtotal};
        assert_eq!(
            l_kinds,
            vec![Header, Data, Subtotal, Blank, Blank, Header, Data]
        );
        assert!(l_bands[2..5].iter().all(|band| band.role == EnumRowRole::Plain));
    }

    #[test]
    fn test_leading_blank_rows_and_single_row_block() {
        let l_bands = classify_rows(&[false, true, false, true]);
        let l_kinds: Vec<EnumRowKind> = l_bands.iter().map(|band| band.kind).collect();

        use EnumRowKind::{Blank, Header, Subtotal};
        assert_eq!(l_kinds, vec![Blank, Header, Subtotal, Header]);
        assert_eq!(l_bands[0].row_idx_header, None);
        assert_eq!(l_bands[2].row_idx_header, Some(1));
    }

    #[test]
    fn test_alternation_within_long_block() {
        let l_bands = classify_rows(&[true; 6]);
        let l_roles: Vec<EnumRowRole> = l_bands.iter().map(|band| band.role).collect();
        assert_eq!(
            l_roles,
            vec![
                EnumRowRole::Header,
                EnumRowRole::EvenData,
                EnumRowRole::OddData,
                EnumRowRole::EvenData,
                EnumRowRole::OddData,
                EnumRowRole::EvenData,
            ]
        );
    }
}
