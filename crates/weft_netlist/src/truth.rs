//! Single-output-cover truth-table algebra.
//!
//! A truth table is an ordered list of rows; each row is an input cube
//! followed by one output value, and all rows of one cover share the same
//! output polarity (they OR together). These utilities re-express a
//! primitive's logic function over a different or larger input ordering:
//! detecting cover polarity, permuting input columns, widening the input
//! set, and expanding don't-care cubes into concrete minterms or a dense
//! LUT mask.
//!
//! None of these functions touch the netlist; they operate on bare rows.

use crate::error::NetlistError;
use weft_common::LogicValue;

/// A single-output cover: rows of input values plus a final output column.
pub type TruthTable = Vec<Vec<LogicValue>>;

/// Returns `true` if the table's rows enumerate the ON-set (output TRUE).
///
/// An empty table encodes a constant-0 function; whether that is "the
/// on-set" is an arbitrary convention and we choose `true`. For a non-empty
/// table the polarity is read from the first row's output value, since all
/// rows of one cover share polarity by construction.
///
/// # Errors
///
/// [`NetlistError::MalformedTruthTable`] if the output value is neither
/// TRUE nor FALSE.
pub fn truth_table_encodes_on_set(truth_table: &TruthTable) -> Result<bool, NetlistError> {
    if truth_table.is_empty() {
        return Ok(true);
    }
    let row = &truth_table[0];
    assert!(!row.is_empty(), "truth-table row must not be empty");
    match row[row.len() - 1] {
        LogicValue::True => Ok(true),
        LogicValue::False => Ok(false),
        value => Err(NetlistError::MalformedTruthTable { value }),
    }
}

/// Rewrites every row's input columns according to a position-to-position
/// mapping: `permutation[i]` is the new column index of old column `i`.
/// The output column is unchanged.
pub fn permute_truth_table(
    truth_table: &TruthTable,
    num_inputs: usize,
    permutation: &[usize],
) -> TruthTable {
    truth_table
        .iter()
        .map(|row| {
            let mut permuted = vec![LogicValue::False; num_inputs + 1];
            for (i, &value) in row[..row.len() - 1].iter().enumerate() {
                permuted[permutation[i]] = value;
            }
            let last = permuted.len() - 1;
            permuted[last] = row[row.len() - 1];
            permuted
        })
        .collect()
}

/// Widens every row to `num_inputs` input columns, filling the newly
/// introduced (unused) inputs with FALSE. Existing columns and the output
/// column keep their values.
pub fn expand_truth_table(truth_table: &TruthTable, num_inputs: usize) -> TruthTable {
    truth_table
        .iter()
        .map(|row| {
            let mut expanded = vec![LogicValue::False; num_inputs + 1];
            expanded[..row.len() - 1].copy_from_slice(&row[..row.len() - 1]);
            let last = expanded.len() - 1;
            expanded[last] = row[row.len() - 1];
            expanded
        })
        .collect()
}

/// Produces the dense LUT mask of a cover: one value per input assignment,
/// indexed by minterm number.
///
/// The background value is FALSE for an on-set cover and TRUE for an
/// off-set cover; every minterm covered by a row is then set to the cover's
/// explicit polarity.
///
/// # Errors
///
/// Propagates [`NetlistError::MalformedTruthTable`] from the polarity check.
pub fn truth_table_to_lut_mask(
    truth_table: &TruthTable,
    num_inputs: usize,
) -> Result<Vec<LogicValue>, NetlistError> {
    let on_set = truth_table_encodes_on_set(truth_table)?;

    let (background, foreground) = if on_set {
        (LogicValue::False, LogicValue::True)
    } else {
        (LogicValue::True, LogicValue::False)
    };
    let mut mask = vec![background; 1 << num_inputs];

    for row in truth_table {
        // Everything but the output column is a cube which may cover
        // multiple minterms through its don't-cares.
        let cube = &row[..row.len() - 1];
        assert_eq!(cube.len(), num_inputs, "cube width mismatch");

        for minterm in cube_to_minterms(cube) {
            mask[minterm] = foreground;
        }
    }
    Ok(mask)
}

/// Expands a cube into the full set of minterm indices it covers.
///
/// Every DONT_CARE position branches into its TRUE and FALSE cases; a cube
/// with no don't-cares yields exactly one minterm. Bit `i` of a minterm
/// index corresponds to column `i` of the cube being TRUE (weight `2^i`).
///
/// Cube entries other than TRUE/FALSE/DONT_CARE violate the caller's
/// contract.
pub fn cube_to_minterms(cube: &[LogicValue]) -> Vec<usize> {
    let mut scratch = cube.to_vec();
    let mut minterms = Vec::new();
    cube_to_minterms_recur(&mut scratch, &mut minterms);
    minterms
}

fn cube_to_minterms_recur(cube: &mut Vec<LogicValue>, minterms: &mut Vec<usize>) {
    for i in 0..cube.len() {
        match cube[i] {
            LogicValue::DontCare => {
                cube[i] = LogicValue::True;
                cube_to_minterms_recur(cube, minterms);
                cube[i] = LogicValue::False;
                cube_to_minterms_recur(cube, minterms);
                cube[i] = LogicValue::DontCare;
                return;
            }
            LogicValue::True | LogicValue::False => {}
            other => panic!("cube entry `{other}` is not TRUE, FALSE, or DONT_CARE"),
        }
    }

    // Fully specified: the cube is itself a minterm.
    let mut minterm = 0;
    for (i, &value) in cube.iter().enumerate() {
        if value == LogicValue::True {
            minterm += 1 << i;
        }
    }
    minterms.push(minterm);
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_common::LogicValue::{DontCare, False, True, Unknown};

    #[test]
    fn empty_table_is_on_set() {
        assert!(truth_table_encodes_on_set(&vec![]).unwrap());
    }

    #[test]
    fn polarity_read_from_output_column() {
        let on = vec![vec![True, False, True]];
        let off = vec![vec![True, False, False]];
        assert!(truth_table_encodes_on_set(&on).unwrap());
        assert!(!truth_table_encodes_on_set(&off).unwrap());
    }

    #[test]
    fn dont_care_output_is_malformed() {
        let table = vec![vec![True, DontCare]];
        let err = truth_table_encodes_on_set(&table).unwrap_err();
        assert!(matches!(
            err,
            NetlistError::MalformedTruthTable {
                value: DontCare
            }
        ));
    }

    #[test]
    fn cube_with_no_dont_cares_is_one_minterm() {
        assert_eq!(cube_to_minterms(&[False, False]), vec![0]);
        assert_eq!(cube_to_minterms(&[True, False]), vec![1]);
        assert_eq!(cube_to_minterms(&[False, True]), vec![2]);
        assert_eq!(cube_to_minterms(&[True, True]), vec![3]);
    }

    #[test]
    fn dont_care_expands_both_branches() {
        let mut minterms = cube_to_minterms(&[DontCare, True]);
        minterms.sort_unstable();
        assert_eq!(minterms, vec![2, 3]);
    }

    #[test]
    fn all_dont_cares_cover_every_minterm() {
        let mut minterms = cube_to_minterms(&[DontCare, DontCare, DontCare]);
        minterms.sort_unstable();
        assert_eq!(minterms, vec![0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    #[should_panic(expected = "not TRUE, FALSE, or DONT_CARE")]
    fn unknown_cube_entry_panics() {
        cube_to_minterms(&[Unknown]);
    }

    #[test]
    fn lut_mask_on_set_row() {
        // input0=TRUE, input1=don't-care, output=TRUE: minterms 1 and 3
        let table = vec![vec![True, DontCare, True]];
        let mask = truth_table_to_lut_mask(&table, 2).unwrap();
        assert_eq!(mask, vec![False, True, False, True]);
    }

    #[test]
    fn lut_mask_off_set_background_is_true() {
        // Off-set cover listing only minterm 0
        let table = vec![vec![False, False, False]];
        let mask = truth_table_to_lut_mask(&table, 2).unwrap();
        assert_eq!(mask, vec![False, True, True, True]);
    }

    #[test]
    fn lut_mask_empty_table_is_constant_zero() {
        let mask = truth_table_to_lut_mask(&vec![], 2).unwrap();
        assert_eq!(mask, vec![False; 4]);
    }

    #[test]
    fn lut_mask_propagates_malformed_output() {
        let table = vec![vec![True, Unknown]];
        assert!(truth_table_to_lut_mask(&table, 1).is_err());
    }

    #[test]
    fn permute_moves_input_columns() {
        // out = in0 with in0 moving to column 2 of a 3-input table
        let table = vec![vec![True, False, False, True]];
        let permuted = permute_truth_table(&table, 3, &[2, 0, 1]);
        assert_eq!(permuted, vec![vec![False, False, True, True]]);
    }

    #[test]
    fn permute_then_inverse_is_identity() {
        let table = vec![
            vec![True, DontCare, False, True],
            vec![False, True, True, True],
        ];
        let perm = [2, 0, 1];
        let mut inverse = [0; 3];
        for (i, &p) in perm.iter().enumerate() {
            inverse[p] = i;
        }
        let there = permute_truth_table(&table, 3, &perm);
        let back = permute_truth_table(&there, 3, &inverse);
        assert_eq!(back, table);
    }

    #[test]
    fn expand_pads_new_inputs_with_false() {
        let table = vec![vec![True, True]];
        let expanded = expand_truth_table(&table, 3);
        assert_eq!(expanded, vec![vec![True, False, False, True]]);
    }

    #[test]
    fn expand_preserves_existing_columns() {
        let table = vec![vec![DontCare, True, False]];
        let expanded = expand_truth_table(&table, 4);
        assert_eq!(expanded, vec![vec![DontCare, True, False, False, False]]);
    }
}
