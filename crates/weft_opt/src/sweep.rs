//! Iterative removal of dangling logic.
//!
//! A netlist arriving from synthesis (or leaving packing) can contain logic
//! that no observable primary output depends on: blocks whose outputs drive
//! nothing, primary inputs nobody reads, primary outputs nothing drives,
//! and nets missing a driver or all sinks. Each category has its own pass;
//! removing one entity can strand another (a removed block orphans its
//! nets, a removed net orphans upstream blocks), so [`sweep_iterative`]
//! repeats whole rounds of the enabled passes until a round removes
//! nothing.

use serde::{Deserialize, Serialize};
use weft_netlist::{BlockId, BlockType, NetId, Netlist};

/// Enable flags for the individual sweep passes. All passes are enabled by
/// default.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Remove primary inputs that drive nothing.
    pub sweep_inputs: bool,
    /// Remove primary outputs that nothing drives.
    pub sweep_outputs: bool,
    /// Remove non-I/O blocks with no connected output.
    pub sweep_blocks: bool,
    /// Remove driverless and sinkless nets.
    pub sweep_nets: bool,
    /// Remove primary outputs driven only by constant generators.
    pub sweep_constant_outputs: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            sweep_inputs: true,
            sweep_outputs: true,
            sweep_blocks: true,
            sweep_nets: true,
            sweep_constant_outputs: true,
        }
    }
}

/// Per-category removal counts accumulated across all sweep rounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepStats {
    /// Dangling primary inputs removed.
    pub inputs_swept: usize,
    /// Dangling primary outputs removed.
    pub outputs_swept: usize,
    /// Dangling non-I/O blocks removed.
    pub blocks_swept: usize,
    /// Driverless or sinkless nets removed.
    pub nets_swept: usize,
    /// Constant-driven primary outputs removed.
    pub constant_outputs_swept: usize,
}

impl SweepStats {
    /// Total entities removed across all categories.
    pub fn total(&self) -> usize {
        self.inputs_swept
            + self.outputs_swept
            + self.blocks_swept
            + self.nets_swept
            + self.constant_outputs_swept
    }
}

/// A block is removable when none of its output pins has a net: nothing in
/// the circuit can observe it.
fn is_removable_block(netlist: &Netlist, blk: BlockId) -> bool {
    netlist
        .block_output_pins(blk)
        .all(|pin| netlist.pin_net(pin).is_none())
}

fn is_removable_input(netlist: &Netlist, blk: BlockId) -> bool {
    netlist.block_type(blk) == BlockType::Inpad && is_removable_block(netlist, blk)
}

/// An output is removable only when it has no fan-in.
fn is_removable_output(netlist: &Netlist, blk: BlockId) -> bool {
    netlist.block_type(blk) == BlockType::Outpad
        && netlist
            .block_input_pins(blk)
            .all(|pin| netlist.pin_net(pin).is_none())
}

/// Removes non-I/O blocks with no connected output pin. Returns the number
/// removed.
pub fn sweep_blocks(netlist: &mut Netlist) -> usize {
    // Pads have their own sweep passes
    let to_remove: Vec<BlockId> = netlist
        .blocks()
        .filter(|&blk| {
            let ty = netlist.block_type(blk);
            ty != BlockType::Inpad && ty != BlockType::Outpad && is_removable_block(netlist, blk)
        })
        .collect();

    for blk in &to_remove {
        netlist.remove_block(*blk);
    }
    to_remove.len()
}

/// Removes primary inputs whose output drives nothing. Returns the number
/// removed.
pub fn sweep_inputs(netlist: &mut Netlist) -> usize {
    let to_remove: Vec<BlockId> = netlist
        .blocks()
        .filter(|&blk| is_removable_input(netlist, blk))
        .collect();

    for blk in &to_remove {
        netlist.remove_block(*blk);
    }
    to_remove.len()
}

/// Removes primary outputs that nothing drives. Returns the number removed.
pub fn sweep_outputs(netlist: &mut Netlist) -> usize {
    let to_remove: Vec<BlockId> = netlist
        .blocks()
        .filter(|&blk| is_removable_output(netlist, blk))
        .collect();

    for blk in &to_remove {
        netlist.remove_block(*blk);
    }
    to_remove.len()
}

/// Removes nets with no driver pin or no sink pins. Returns the number
/// removed.
pub fn sweep_nets(netlist: &mut Netlist) -> usize {
    let to_remove: Vec<NetId> = netlist
        .nets()
        .filter(|&net| netlist.net_driver(net).is_none() || netlist.net_sinks(net).is_empty())
        .collect();

    for net in &to_remove {
        netlist.remove_net(*net);
    }
    to_remove.len()
}

/// Removes primary outputs whose every connected input net is constant.
/// Such an output always emits a fixed value and carries no information.
/// Returns the number removed.
pub fn sweep_constant_primary_outputs(netlist: &mut Netlist) -> usize {
    let to_remove: Vec<BlockId> = netlist
        .blocks()
        .filter(|&blk| {
            netlist.block_type(blk) == BlockType::Outpad
                && netlist.block_input_pins(blk).all(|pin| {
                    netlist
                        .pin_net(pin)
                        .map_or(true, |net| netlist.net_is_constant(net))
                })
        })
        .collect();

    for blk in &to_remove {
        netlist.remove_block(*blk);
    }
    to_remove.len()
}

/// Runs the enabled sweep passes in rounds until a round removes nothing.
///
/// A single round is not enough: sweeping a block can orphan a net, and
/// sweeping that net can orphan another block. Every pass scans the live
/// entity set at the time it runs, so round order only affects how fast the
/// fixed point is reached, not what it is.
pub fn sweep_iterative(netlist: &mut Netlist, config: &SweepConfig) -> SweepStats {
    let mut stats = SweepStats::default();

    loop {
        let mut round = SweepStats::default();

        if config.sweep_inputs {
            round.inputs_swept += sweep_inputs(netlist);
        }
        if config.sweep_outputs {
            round.outputs_swept += sweep_outputs(netlist);
        }
        if config.sweep_blocks {
            round.blocks_swept += sweep_blocks(netlist);
        }
        if config.sweep_nets {
            round.nets_swept += sweep_nets(netlist);
        }
        if config.sweep_constant_outputs {
            round.constant_outputs_swept += sweep_constant_primary_outputs(netlist);
        }

        stats.inputs_swept += round.inputs_swept;
        stats.outputs_swept += round.outputs_swept;
        stats.blocks_swept += round.blocks_swept;
        stats.nets_swept += round.nets_swept;
        stats.constant_outputs_swept += round.constant_outputs_swept;

        if round.total() == 0 {
            return stats;
        }
    }
}
