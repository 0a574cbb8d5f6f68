//! Netlist emission: human-readable dump and BLIF.
//!
//! Both emitters are pure serialization over the store's read accessors.
//! Unconnected subcircuit pins that BLIF forces us to name get `unconn<N>`
//! placeholders from one counter shared across the whole emission, so no
//! placeholder is ever reused.

use crate::error::{EmitError, NetlistError};
use crate::ids::{BlockId, ModelId, NetId};
use crate::netlist::{BlockType, Netlist};
use std::collections::BTreeSet;
use std::io::{self, Write};
use weft_common::LogicValue;

const INDENT: &str = "    ";

/// Writes a human-readable dump of the netlist: blocks grouped by type with
/// their per-bit port connections, then every net with its driver and sinks.
pub fn print_netlist<W: Write>(w: &mut W, netlist: &Netlist) -> io::Result<()> {
    let name = |ident| netlist.interner().resolve(ident);

    // Sorting by type keeps blocks of the same type together
    let mut blocks: Vec<(BlockType, BlockId)> = netlist
        .blocks()
        .map(|blk| (netlist.block_type(blk), blk))
        .collect();
    blocks.sort_by_key(|&(ty, blk)| (ty, blk.index()));

    for (ty, blk) in blocks {
        writeln!(
            w,
            "Block '{}' ({ty}): {}",
            name(netlist.block_model(blk).name),
            name(netlist.block_name(blk))
        )?;

        for (label, arrow, ports) in [
            ("Input", "<-", netlist.block_input_ports(blk).collect::<Vec<_>>()),
            ("Output", "->", netlist.block_output_ports(blk).collect()),
            ("Clock", "<-", netlist.block_clock_ports(blk).collect()),
        ] {
            for port in ports {
                let pins = netlist.port_pins(port);
                writeln!(w, "\t{label} ({} bits)", pins.len())?;
                for (i, &pin) in pins.iter().enumerate() {
                    write!(w, "\t\t{} [{i}] {arrow}", name(netlist.port_name(port)))?;
                    match netlist.pin_net(pin) {
                        Some(net) => writeln!(w, " {}", name(netlist.net_name(net)))?,
                        None => writeln!(w, " ")?,
                    }
                }
            }
        }
    }

    for net in netlist.nets() {
        let sinks = netlist.net_sinks(net);
        writeln!(
            w,
            "Net '{}' (fanout {})",
            name(netlist.net_name(net)),
            sinks.len()
        )?;

        match netlist.net_driver(net) {
            Some(driver) => writeln!(
                w,
                "\tDriver Block: '{}' Driver Pin: '{}[{}]'",
                name(netlist.block_name(netlist.pin_block(driver))),
                name(netlist.port_name(netlist.pin_port(driver))),
                netlist.pin_port_bit(driver)
            )?,
            None => writeln!(w, "\tNo Driver")?,
        }

        for &sink in sinks {
            writeln!(
                w,
                "\tSink Block: '{}' Sink Pin: '{}[{}]'",
                name(netlist.block_name(netlist.pin_block(sink))),
                name(netlist.port_name(netlist.pin_port(sink))),
                netlist.pin_port_bit(sink)
            )?;
        }
    }

    Ok(())
}

/// Writes the netlist in structural BLIF.
///
/// Primary outputs must be driven by nets of their own name in BLIF; where
/// the driving net carries a different name an artificial identity buffer is
/// emitted to record the rename. Latch and LUT primitives become `.latch`
/// and `.names` lines; blocks of non-builtin models become `.subckt`
/// instantiations with trailing `.blackbox` model stubs.
///
/// # Errors
///
/// [`NetlistError`] for latch blocks violating the single-bit D/Q/clk
/// contract, [`io::Error`] from the writer.
pub fn print_netlist_as_blif<W: Write>(w: &mut W, netlist: &Netlist) -> Result<(), EmitError> {
    let name = |ident| netlist.interner().resolve(ident);
    let mut unconn_count = 0usize;

    writeln!(w, "#Atom netlist generated by weft")?;
    writeln!(w, ".model {}", name(netlist.name()))?;

    let inputs: Vec<BlockId> = netlist
        .blocks()
        .filter(|&blk| netlist.block_type(blk) == BlockType::Inpad)
        .collect();
    writeln!(w, ".inputs \\")?;
    for (i, &blk) in inputs.iter().enumerate() {
        write!(w, "{INDENT}{}", name(netlist.block_name(blk)))?;
        if i != inputs.len() - 1 {
            writeln!(w, " \\")?;
        }
    }
    writeln!(w)?;

    let outputs: Vec<BlockId> = netlist
        .blocks()
        .filter(|&blk| netlist.block_type(blk) == BlockType::Outpad)
        .collect();
    writeln!(w, ".outputs \\")?;
    // BLIF requires a primary output to be driven by a net of the same
    // name; the netlist does not, so renames become identity buffers.
    let mut rename_buffers: BTreeSet<(String, String)> = BTreeSet::new();
    for (i, &blk) in outputs.iter().enumerate() {
        let blk_name = name(netlist.block_name(blk));
        let out_name = blk_name.strip_prefix("out:").unwrap_or(blk_name);
        write!(w, "{INDENT}{out_name}")?;

        if let Some(pin) = netlist.block_input_pins(blk).next() {
            if let Some(net) = netlist.pin_net(pin) {
                let net_name = name(netlist.net_name(net));
                if net_name != out_name {
                    rename_buffers.insert((net_name.to_string(), out_name.to_string()));
                }
            }
        }

        if i != outputs.len() - 1 {
            writeln!(w, " \\")?;
        }
    }
    writeln!(w)?;
    writeln!(w)?;

    for (net_name, out_name) in &rename_buffers {
        writeln!(w, "#Artificially inserted primary-output assignment buffer")?;
        writeln!(w, ".names {net_name} {out_name}")?;
        writeln!(w, "1 1")?;
        writeln!(w)?;
    }

    for blk in netlist.blocks() {
        if netlist.block_type(blk) != BlockType::Sequential {
            continue;
        }
        if netlist.block(blk).model != netlist.models().latch_model() {
            continue;
        }
        emit_latch(w, netlist, blk)?;
    }

    for blk in netlist.blocks() {
        if netlist.block_type(blk) != BlockType::Combinational {
            continue;
        }
        if netlist.block(blk).model != netlist.models().names_model() {
            continue;
        }
        emit_names(w, netlist, blk)?;
    }

    let mut subckt_models: Vec<ModelId> = Vec::new();
    for blk in netlist.blocks() {
        let model_id = netlist.block(blk).model;
        if netlist.models().is_builtin(model_id) {
            continue;
        }
        if !subckt_models.contains(&model_id) {
            subckt_models.push(model_id);
        }

        writeln!(w, ".subckt {} \\", name(netlist.models().get(model_id).name))?;
        let ports = netlist.block_ports(blk);
        for (i, &port) in ports.iter().enumerate() {
            let width = netlist.port_width(port);
            for bit in 0..width {
                write!(w, "{INDENT}{}", name(netlist.port_name(port)))?;
                if width != 1 {
                    write!(w, "[{bit}]")?;
                }
                write!(w, "=")?;
                match netlist.port_net(port, bit) {
                    Some(net) => write!(w, "{}", name(netlist.net_name(net)))?,
                    None => write!(w, "{}", make_unconn(&mut unconn_count))?,
                }
                if i != ports.len() - 1 || bit != width - 1 {
                    write!(w, " \\")?;
                }
                writeln!(w)?;
            }
        }
        writeln!(w)?;
    }

    writeln!(w, ".end")?;
    writeln!(w)?;

    // Blackbox stubs for every referenced subckt model
    for model_id in subckt_models {
        let model = netlist.models().get(model_id);
        writeln!(w, ".model {}", name(model.name))?;

        write!(w, ".inputs")?;
        for port in model.input_ports().chain(model.clock_ports()) {
            if port.width == 1 {
                write!(w, " \\\n{INDENT}{}", name(port.name))?;
            } else {
                for bit in 0..port.width {
                    write!(w, " \\\n{INDENT}{}[{bit}]", name(port.name))?;
                }
            }
        }
        writeln!(w)?;

        write!(w, ".outputs")?;
        for port in model.output_ports() {
            if port.width == 1 {
                write!(w, " \\\n{INDENT}{}", name(port.name))?;
            } else {
                for bit in 0..port.width {
                    write!(w, " \\\n{INDENT}{}[{bit}]", name(port.name))?;
                }
            }
        }
        writeln!(w)?;

        writeln!(w, ".blackbox")?;
        writeln!(w, ".end")?;
        writeln!(w)?;
    }

    Ok(())
}

fn emit_latch<W: Write>(w: &mut W, netlist: &Netlist, blk: BlockId) -> Result<(), EmitError> {
    let name = |ident| netlist.interner().resolve(ident);
    let blk_name = name(netlist.block_name(blk)).to_string();

    let mut d_net: Option<NetId> = None;
    let mut q_net: Option<NetId> = None;
    let mut clk_net: Option<NetId> = None;

    for &port in netlist.block_ports(blk) {
        let pins = netlist.port_pins(port);
        if pins.len() != 1 {
            return Err(NetlistError::MalformedLatch {
                block: blk_name.clone(),
            }
            .into());
        }
        let net = netlist.pin_net(pins[0]).ok_or_else(|| NetlistError::MalformedLatch {
            block: blk_name.clone(),
        })?;
        match name(netlist.port_name(port)) {
            "D" => d_net = Some(net),
            "Q" => q_net = Some(net),
            "clk" => clk_net = Some(net),
            other => {
                return Err(NetlistError::UnknownLatchPort {
                    block: blk_name.clone(),
                    port: other.to_string(),
                }
                .into())
            }
        }
    }

    let (Some(d), Some(q), Some(clk)) = (d_net, q_net, clk_net) else {
        return Err(NetlistError::MalformedLatch { block: blk_name }.into());
    };

    // The initial value is stored as a single-entry truth table
    let truth_table = netlist.block_truth_table(blk);
    if truth_table.len() != 1 || truth_table[0].len() != 1 {
        return Err(NetlistError::MalformedLatchInitialState { block: blk_name }.into());
    }
    let init_val = match truth_table[0][0] {
        LogicValue::False => 0,
        LogicValue::True => 1,
        LogicValue::DontCare => 2,
        LogicValue::Unknown => 3,
    };

    // Rising edge is the only latch type we produce
    writeln!(
        w,
        ".latch {} {} re {} {}",
        name(netlist.net_name(d)),
        name(netlist.net_name(q)),
        name(netlist.net_name(clk)),
        init_val
    )?;
    writeln!(w)?;
    Ok(())
}

fn emit_names<W: Write>(w: &mut W, netlist: &Netlist, blk: BlockId) -> io::Result<()> {
    let name = |ident| netlist.interner().resolve(ident);

    let mut nets: Vec<NetId> = netlist
        .block_input_pins(blk)
        .filter_map(|pin| netlist.pin_net(pin))
        .collect();
    let Some(out_net) = netlist
        .block_output_pins(blk)
        .find_map(|pin| netlist.pin_net(pin))
    else {
        // Nothing observes this LUT; the sweep removes it
        return Ok(());
    };
    nets.push(out_net);

    write!(w, ".names ")?;
    for (i, &net) in nets.iter().enumerate() {
        write!(w, "{}", name(netlist.net_name(net)))?;
        if i != nets.len() - 1 {
            write!(w, " ")?;
        }
    }
    writeln!(w)?;

    for row in netlist.block_truth_table(blk) {
        for (i, value) in row.iter().enumerate() {
            // Space between the input cube and the output column
            if i == row.len() - 1 {
                write!(w, " ")?;
            }
            write!(w, "{value}")?;
        }
        writeln!(w)?;
    }
    writeln!(w)?;
    Ok(())
}

fn make_unconn(unconn_count: &mut usize) -> String {
    let placeholder = format!("unconn{unconn_count}");
    *unconn_count += 1;
    placeholder
}
