//! Atom netlist data model for the Weft packing toolchain.
//!
//! This crate holds a technology-mapped circuit between logic synthesis and
//! physical packing: primitive blocks with ports and pins, nets connecting
//! one driver pin to its sinks, and the single-output-cover truth tables
//! attached to logic primitives. It also provides the truth-table algebra
//! used to re-express a primitive's function over a different input
//! ordering, and BLIF/human-readable emission of the final netlist.
//!
//! Structural clean-up transforms over this model (sweeping, buffer
//! absorption) live in the `weft_opt` crate.
//!
//! # Usage
//!
//! ```
//! use weft_common::Interner;
//! use weft_netlist::{BlockType, ModelLibrary, Netlist};
//!
//! let interner = Interner::new();
//! let models = ModelLibrary::new(&interner, 4);
//! let mut netlist = Netlist::new("top", &interner, &models);
//!
//! let a = netlist.create_block("a", BlockType::Inpad, models.input_model(), vec![]);
//! let o = netlist.create_block("o", BlockType::Outpad, models.output_model(), vec![]);
//! let driver = netlist.block_output_pins(a).next().unwrap();
//! let sink = netlist.block_input_pins(o).next().unwrap();
//! let name = netlist.intern("a");
//! netlist.add_net(name, driver, vec![sink]);
//! assert_eq!(netlist.net_count(), 1);
//! ```

#![warn(missing_docs)]

pub mod arena;
pub mod emit;
pub mod error;
pub mod ids;
pub mod model;
pub mod netlist;
pub mod truth;

pub use arena::{Arena, ArenaId};
pub use emit::{print_netlist, print_netlist_as_blif};
pub use error::{EmitError, NetlistError};
pub use ids::{BlockId, ModelId, NetId, PinId, PortId};
pub use model::{Model, ModelLibrary, ModelPort, PortClass};
pub use netlist::{Block, BlockType, Net, Netlist, Pin, PinKind, Port};
pub use truth::{
    cube_to_minterms, expand_truth_table, permute_truth_table, truth_table_encodes_on_set,
    truth_table_to_lut_mask, TruthTable,
};
