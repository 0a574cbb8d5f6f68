//! Structural netlist clean-up for the Weft packing toolchain.
//!
//! Two independent transforms prepare and sanitize an atom netlist around
//! packing:
//!
//! 1. **Sweeping** ([`sweep_iterative`]) — iterative removal of logic that
//!    cannot affect any observable primary output: dangling blocks, unused
//!    primary inputs, undriven primary outputs, constant-driven primary
//!    outputs, and driverless/sinkless nets, run to a fixed point.
//! 2. **Buffer absorption** ([`absorb_buffer_luts`]) — removal of LUTs that
//!    implement the identity function, splicing their input and output nets
//!    into one net while preserving primary-I/O naming.
//!
//! The transforms commute well enough to be applied any number of times in
//! either order; both operate purely through the mutation contract of
//! [`weft_netlist::Netlist`].

#![warn(missing_docs)]

pub mod absorb;
pub mod sweep;

pub use absorb::{absorb_buffer_luts, is_buffer_lut, remove_buffer_lut};
pub use sweep::{
    sweep_blocks, sweep_constant_primary_outputs, sweep_inputs, sweep_iterative, sweep_nets,
    sweep_outputs, SweepConfig, SweepStats,
};
