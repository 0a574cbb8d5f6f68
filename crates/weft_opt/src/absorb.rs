//! Absorption of buffer LUTs.
//!
//! Synthesis flows frequently leave behind LUTs implementing the pure
//! identity function (`.names in out` / `1 1`). Each one is removed and its
//! input and output nets spliced into a single net, so the packer sees a
//! direct connection instead of a redundant buffer stage.
//!
//! Splicing discards one of the two net names, and net names on primary
//! I/Os are externally observable (equivalence checking matches on them).
//! The surviving name is therefore chosen to protect primary-I/O naming,
//! and a buffer wired from a primary input to a primary output — where both
//! names would need to survive — is left in place.

use weft_common::LogicValue;
use weft_netlist::{BlockId, BlockType, Netlist, PinId};

/// Returns `true` if the block is a buffer LUT: a `names` primitive with
/// one input port and one output port, exactly one connected pin on each,
/// and a single-row truth table encoding literal identity (`1 1` or `0 0`).
///
/// An inverting LUT (`0 1` / `1 0`) is not a buffer and is never absorbed.
pub fn is_buffer_lut(netlist: &Netlist, blk: BlockId) -> bool {
    if netlist.block_type(blk) != BlockType::Combinational {
        return false;
    }
    if netlist.block(blk).model != netlist.models().names_model() {
        return false;
    }

    if netlist.block_input_ports(blk).count() != 1 || netlist.block_output_ports(blk).count() != 1 {
        return false;
    }

    let connected_inputs = netlist
        .block_input_pins(blk)
        .filter(|&pin| netlist.pin_net(pin).is_some())
        .count();
    let connected_outputs = netlist
        .block_output_pins(blk)
        .filter(|&pin| netlist.pin_net(pin).is_some())
        .count();
    if connected_inputs != 1 || connected_outputs != 1 {
        return false;
    }

    let truth_table = netlist.block_truth_table(blk);
    if truth_table.len() != 1 || truth_table[0].len() != 2 {
        return false;
    }

    // `1 1` and `0 0` both implement logical identity over one input
    matches!(
        (truth_table[0][0], truth_table[0][1]),
        (LogicValue::True, LogicValue::True) | (LogicValue::False, LogicValue::False)
    )
}

fn identify_buffer_luts(netlist: &Netlist) -> Vec<BlockId> {
    netlist
        .blocks()
        .filter(|&blk| is_buffer_lut(netlist, blk))
        .collect()
}

/// Removes one buffer LUT, splicing its input and output nets into a
/// single net. Returns `false` without modifying the netlist when the
/// buffer connects a primary input to a primary output, since absorbing it
/// would have to discard one of the two externally visible names.
///
/// The surviving net keeps the input net's name when the driver is a
/// primary input, the output net's name when a primary output is among the
/// sinks, and otherwise the output net's name by convention. The driver and
/// every non-buffer sink of both nets carry over to the new net unchanged.
///
/// # Panics
///
/// Panics if `blk` is not a qualifying buffer LUT with a driven input net.
pub fn remove_buffer_lut(netlist: &mut Netlist, blk: BlockId) -> bool {
    let input_pin = netlist
        .block_input_pins(blk)
        .find(|&pin| netlist.pin_net(pin).is_some())
        .expect("buffer LUT input is connected");
    let output_pin = netlist
        .block_output_pins(blk)
        .find(|&pin| netlist.pin_net(pin).is_some())
        .expect("buffer LUT output is connected");

    let input_net = netlist.pin_net(input_pin).unwrap();
    let output_net = netlist.pin_net(output_pin).unwrap();

    let new_driver = netlist
        .net_driver(input_net)
        .expect("buffer LUT input net has a driver");

    // Merged sink set: the input net's sinks minus the buffer's own input
    // pin, plus all of the output net's sinks.
    let mut new_sinks: Vec<PinId> = netlist
        .net_sinks(input_net)
        .iter()
        .copied()
        .filter(|&pin| pin != input_pin)
        .collect();
    new_sinks.extend_from_slice(netlist.net_sinks(output_net));

    let driver_is_pi = netlist.block_type(netlist.pin_block(new_driver)) == BlockType::Inpad;
    let po_in_sinks = new_sinks
        .iter()
        .any(|&pin| netlist.block_type(netlist.pin_block(pin)) == BlockType::Outpad);

    let new_name = match (driver_is_pi, po_in_sinks) {
        // Buffered connection from primary input to primary output: both
        // names are externally visible, so the buffer stays.
        (true, true) => return false,
        // Preserve the primary input's net name
        (true, false) => netlist.net_name(input_net),
        // Preserve the primary output's net name
        (false, true) => netlist.net_name(output_net),
        // No primary I/O involved; either name would do
        (false, false) => netlist.net_name(output_net),
    };

    // Removing the buffer detaches its two pins; the old nets then come
    // apart and the merged net is rebuilt from the surviving pins.
    netlist.remove_block(blk);
    netlist.remove_net(input_net);
    netlist.remove_net(output_net);
    netlist.add_net(new_name, new_driver, new_sinks);

    true
}

/// Absorbs every buffer LUT in the netlist, returning the number removed.
///
/// Qualification is decided in one pass over the original netlist before
/// any removal: absorbing one buffer can never make another block start or
/// stop qualifying, so no fixed-point iteration is needed.
pub fn absorb_buffer_luts(netlist: &mut Netlist) -> usize {
    let buffer_luts = identify_buffer_luts(netlist);

    let mut absorbed = 0;
    for blk in buffer_luts {
        if remove_buffer_lut(netlist, blk) {
            absorbed += 1;
        }
    }
    absorbed
}
