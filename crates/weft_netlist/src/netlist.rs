//! The atom netlist: an id-referenced graph of blocks, ports, pins, and nets.
//!
//! The [`Netlist`] is the working representation of a technology-mapped
//! circuit between synthesis and packing. Blocks own ports, ports own pins,
//! and pins associate with at most one net; nets record one driver pin and a
//! set of sink pins. Construction happens through [`Netlist::create_block`]
//! and [`Netlist::add_net`]; thereafter only removal and net reconstruction
//! occur, through the mutation surface the sweep and absorption transforms
//! rely on.
//!
//! Referential symmetry is maintained by every mutation: a net only ever
//! references live pins that record that net back, and a pin's net always
//! lists the pin as its driver or one of its sinks.

use crate::arena::Arena;
use crate::ids::{BlockId, ModelId, NetId, PinId, PortId};
use crate::model::{Model, ModelLibrary, PortClass};
use crate::truth::TruthTable;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use weft_common::{Ident, InternalError, Interner, WeftResult};

/// The role of a primitive block in the circuit.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum BlockType {
    /// A primary input pad.
    Inpad,
    /// A primary output pad.
    Outpad,
    /// Combinational logic (e.g. a LUT).
    Combinational,
    /// Sequential logic (e.g. a latch).
    Sequential,
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockType::Inpad => write!(f, "INPAD"),
            BlockType::Outpad => write!(f, "OUTPAD"),
            BlockType::Combinational => write!(f, "COMBINATIONAL"),
            BlockType::Sequential => write!(f, "SEQUENTIAL"),
        }
    }
}

/// The role of a pin, derived from its port's class.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum PinKind {
    /// The pin drives its net (output ports).
    Driver,
    /// The pin is driven by its net (input and clock ports).
    Sink,
}

/// A primitive block instance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Block {
    /// The block name (unique among blocks).
    pub name: Ident,
    /// The block's circuit role.
    pub ty: BlockType,
    /// The model describing the block's port layout.
    pub model: ModelId,
    /// Single-output cover for logic blocks; one 1x1 row (the initial
    /// state) for latches; empty for pads.
    pub truth_table: TruthTable,
    /// The block's ports in model declaration order.
    pub ports: Vec<PortId>,
}

/// A named, fixed-width bus on a block.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Port {
    /// The port name (from the model definition).
    pub name: Ident,
    /// The owning block.
    pub block: BlockId,
    /// The port class.
    pub class: PortClass,
    /// One pin per bit, in bit order.
    pub pins: Vec<PinId>,
}

/// One bit of a port.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pin {
    /// The owning port.
    pub port: PortId,
    /// The bit index within the port.
    pub bit: u32,
    /// Driver or sink, derived from the port class.
    pub kind: PinKind,
    /// The associated net, if the pin is connected.
    pub net: Option<NetId>,
}

/// A named signal: one driver pin (or none) and any number of sink pins.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Net {
    /// The net name (unique among nets).
    pub name: Ident,
    /// The driving pin, or `None` for an undriven net.
    pub driver: Option<PinId>,
    /// The sink pins.
    pub sinks: Vec<PinId>,
}

/// The netlist store: arenas of entities plus name lookup indices.
///
/// Borrows the session [`Interner`] and the caller-owned [`ModelLibrary`];
/// the netlist references models but does not own the catalog.
pub struct Netlist<'a> {
    name: Ident,
    interner: &'a Interner,
    models: &'a ModelLibrary,
    blocks: Arena<BlockId, Block>,
    ports: Arena<PortId, Port>,
    pins: Arena<PinId, Pin>,
    nets: Arena<NetId, Net>,
    block_by_name: HashMap<Ident, BlockId>,
    net_by_name: HashMap<Ident, NetId>,
}

impl<'a> Netlist<'a> {
    /// Creates an empty netlist with the given top-level name.
    pub fn new(name: &str, interner: &'a Interner, models: &'a ModelLibrary) -> Self {
        Self {
            name: interner.get_or_intern(name),
            interner,
            models,
            blocks: Arena::new(),
            ports: Arena::new(),
            pins: Arena::new(),
            nets: Arena::new(),
            block_by_name: HashMap::new(),
            net_by_name: HashMap::new(),
        }
    }

    /// The top-level netlist name.
    pub fn name(&self) -> Ident {
        self.name
    }

    /// The interner all names in this netlist resolve through.
    pub fn interner(&self) -> &'a Interner {
        self.interner
    }

    /// The model catalog this netlist references.
    pub fn models(&self) -> &'a ModelLibrary {
        self.models
    }

    /// Interns a name through the session interner.
    pub fn intern(&self, s: &str) -> Ident {
        self.interner.get_or_intern(s)
    }

    // --- Construction ---

    /// Creates a block with one port per model port definition and one pin
    /// per port bit, all initially unconnected.
    ///
    /// # Panics
    ///
    /// Panics if a block with the same name already exists.
    pub fn create_block(
        &mut self,
        name: &str,
        ty: BlockType,
        model: ModelId,
        truth_table: TruthTable,
    ) -> BlockId {
        let name = self.intern(name);
        assert!(
            !self.block_by_name.contains_key(&name),
            "duplicate block name `{}`",
            self.interner.resolve(name)
        );

        let blk_id = self.blocks.alloc(Block {
            name,
            ty,
            model,
            truth_table,
            ports: Vec::new(),
        });

        let port_defs: Vec<_> = self
            .models
            .get(model)
            .ports
            .iter()
            .map(|p| (p.name, p.class, p.width))
            .collect();
        for (port_name, class, width) in port_defs {
            let port_id = self.ports.alloc(Port {
                name: port_name,
                block: blk_id,
                class,
                pins: Vec::new(),
            });
            for bit in 0..width {
                let kind = if class == PortClass::Output {
                    PinKind::Driver
                } else {
                    PinKind::Sink
                };
                let pin_id = self.pins.alloc(Pin {
                    port: port_id,
                    bit,
                    kind,
                    net: None,
                });
                self.ports.get_mut(port_id).pins.push(pin_id);
            }
            self.blocks.get_mut(blk_id).ports.push(port_id);
        }

        self.block_by_name.insert(name, blk_id);
        blk_id
    }

    /// Creates a net connecting `driver` to `sinks` and returns its ID.
    ///
    /// # Panics
    ///
    /// Panics if the name is already in use, if `driver` is not a
    /// driver-role pin, or if any of the pins is already associated with a
    /// net (callers must have removed the previous net first).
    pub fn add_net(&mut self, name: Ident, driver: PinId, sinks: Vec<PinId>) -> NetId {
        assert!(
            !self.net_by_name.contains_key(&name),
            "duplicate net name `{}`",
            self.interner.resolve(name)
        );
        assert!(
            self.pins.get(driver).kind == PinKind::Driver,
            "net driver must be a driver-role pin"
        );
        assert!(
            self.pins.get(driver).net.is_none(),
            "net driver pin is already connected"
        );
        for &sink in &sinks {
            assert!(
                self.pins.get(sink).kind == PinKind::Sink,
                "net sink must be a sink-role pin"
            );
            assert!(
                self.pins.get(sink).net.is_none(),
                "net sink pin is already connected"
            );
        }

        let members: Vec<PinId> = std::iter::once(driver).chain(sinks.iter().copied()).collect();
        let net_id = self.nets.alloc(Net {
            name,
            driver: Some(driver),
            sinks,
        });
        for pin in members {
            self.pins.get_mut(pin).net = Some(net_id);
        }
        self.net_by_name.insert(name, net_id);
        net_id
    }

    // --- Removal ---

    /// Removes a block along with its ports and pins, detaching every pin
    /// from its net. Nets the block drove become driverless; nets it sank
    /// lose one sink. The nets themselves are not removed.
    ///
    /// # Panics
    ///
    /// Panics if the ID is invalid or stale.
    pub fn remove_block(&mut self, blk: BlockId) {
        let port_ids = self.blocks.get(blk).ports.clone();
        for port_id in port_ids {
            let pin_ids = self.ports.get(port_id).pins.clone();
            for pin_id in pin_ids {
                let pin = self.pins.remove(pin_id);
                if let Some(net_id) = pin.net {
                    self.detach_pin(pin_id, net_id);
                }
            }
            self.ports.remove(port_id);
        }
        let block = self.blocks.remove(blk);
        self.block_by_name.remove(&block.name);
    }

    /// Removes a net, clearing the net association of every pin that
    /// referenced it. The pins become unconnected; they are not deleted.
    ///
    /// # Panics
    ///
    /// Panics if the ID is invalid or stale.
    pub fn remove_net(&mut self, net_id: NetId) {
        let net = self.nets.remove(net_id);
        self.net_by_name.remove(&net.name);
        if let Some(driver) = net.driver {
            self.pins.get_mut(driver).net = None;
        }
        for sink in net.sinks {
            self.pins.get_mut(sink).net = None;
        }
    }

    fn detach_pin(&mut self, pin_id: PinId, net_id: NetId) {
        let net = self.nets.get_mut(net_id);
        if net.driver == Some(pin_id) {
            net.driver = None;
        } else {
            net.sinks.retain(|&p| p != pin_id);
        }
    }

    // --- Block accessors ---

    /// Iterates over the IDs of live blocks.
    pub fn blocks(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.blocks.ids()
    }

    /// Returns the block with the given ID.
    pub fn block(&self, blk: BlockId) -> &Block {
        self.blocks.get(blk)
    }

    /// Returns the block's name.
    pub fn block_name(&self, blk: BlockId) -> Ident {
        self.blocks.get(blk).name
    }

    /// Returns the block's circuit role.
    pub fn block_type(&self, blk: BlockId) -> BlockType {
        self.blocks.get(blk).ty
    }

    /// Returns the block's model descriptor.
    pub fn block_model(&self, blk: BlockId) -> &Model {
        self.models.get(self.blocks.get(blk).model)
    }

    /// Returns the block's single-output cover.
    pub fn block_truth_table(&self, blk: BlockId) -> &TruthTable {
        &self.blocks.get(blk).truth_table
    }

    /// Returns the block's ports in declaration order.
    pub fn block_ports(&self, blk: BlockId) -> &[PortId] {
        &self.blocks.get(blk).ports
    }

    fn block_ports_of_class(
        &self,
        blk: BlockId,
        class: PortClass,
    ) -> impl Iterator<Item = PortId> + '_ {
        self.blocks
            .get(blk)
            .ports
            .iter()
            .copied()
            .filter(move |&p| self.ports.get(p).class == class)
    }

    /// Iterates over the block's input ports.
    pub fn block_input_ports(&self, blk: BlockId) -> impl Iterator<Item = PortId> + '_ {
        self.block_ports_of_class(blk, PortClass::Input)
    }

    /// Iterates over the block's output ports.
    pub fn block_output_ports(&self, blk: BlockId) -> impl Iterator<Item = PortId> + '_ {
        self.block_ports_of_class(blk, PortClass::Output)
    }

    /// Iterates over the block's clock ports.
    pub fn block_clock_ports(&self, blk: BlockId) -> impl Iterator<Item = PortId> + '_ {
        self.block_ports_of_class(blk, PortClass::Clock)
    }

    /// Iterates over all of the block's pins in port declaration order.
    pub fn block_pins(&self, blk: BlockId) -> impl Iterator<Item = PinId> + '_ {
        self.blocks
            .get(blk)
            .ports
            .iter()
            .flat_map(move |&p| self.ports.get(p).pins.iter().copied())
    }

    /// Iterates over the block's input pins.
    pub fn block_input_pins(&self, blk: BlockId) -> impl Iterator<Item = PinId> + '_ {
        self.block_ports_of_class(blk, PortClass::Input)
            .flat_map(move |p| self.ports.get(p).pins.iter().copied())
    }

    /// Iterates over the block's output pins.
    pub fn block_output_pins(&self, blk: BlockId) -> impl Iterator<Item = PinId> + '_ {
        self.block_ports_of_class(blk, PortClass::Output)
            .flat_map(move |p| self.ports.get(p).pins.iter().copied())
    }

    /// Iterates over the block's clock pins.
    pub fn block_clock_pins(&self, blk: BlockId) -> impl Iterator<Item = PinId> + '_ {
        self.block_ports_of_class(blk, PortClass::Clock)
            .flat_map(move |p| self.ports.get(p).pins.iter().copied())
    }

    /// Looks up a block by name.
    pub fn find_block(&self, name: &str) -> Option<BlockId> {
        let ident = self.interner.get(name)?;
        self.block_by_name.get(&ident).copied()
    }

    /// Returns the number of live blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    // --- Port accessors ---

    /// Returns the port with the given ID.
    pub fn port(&self, port: PortId) -> &Port {
        self.ports.get(port)
    }

    /// Returns the port's name.
    pub fn port_name(&self, port: PortId) -> Ident {
        self.ports.get(port).name
    }

    /// Returns the port's owning block.
    pub fn port_block(&self, port: PortId) -> BlockId {
        self.ports.get(port).block
    }

    /// Returns the port's class.
    pub fn port_class(&self, port: PortId) -> PortClass {
        self.ports.get(port).class
    }

    /// Returns the port's pins in bit order.
    pub fn port_pins(&self, port: PortId) -> &[PinId] {
        &self.ports.get(port).pins
    }

    /// Returns the port's width in bits.
    pub fn port_width(&self, port: PortId) -> u32 {
        self.ports.get(port).pins.len() as u32
    }

    /// Returns the pin at the given bit of the port.
    pub fn port_pin(&self, port: PortId, bit: u32) -> PinId {
        self.ports.get(port).pins[bit as usize]
    }

    /// Returns the net connected at the given bit of the port, if any.
    pub fn port_net(&self, port: PortId, bit: u32) -> Option<NetId> {
        self.pins.get(self.port_pin(port, bit)).net
    }

    // --- Pin accessors ---

    /// Returns the pin with the given ID.
    pub fn pin(&self, pin: PinId) -> &Pin {
        self.pins.get(pin)
    }

    /// Returns the pin's owning port.
    pub fn pin_port(&self, pin: PinId) -> PortId {
        self.pins.get(pin).port
    }

    /// Returns the pin's bit index within its port.
    pub fn pin_port_bit(&self, pin: PinId) -> u32 {
        self.pins.get(pin).bit
    }

    /// Returns the pin's role.
    pub fn pin_kind(&self, pin: PinId) -> PinKind {
        self.pins.get(pin).kind
    }

    /// Returns the pin's net, if connected.
    pub fn pin_net(&self, pin: PinId) -> Option<NetId> {
        self.pins.get(pin).net
    }

    /// Returns the block the pin ultimately belongs to.
    pub fn pin_block(&self, pin: PinId) -> BlockId {
        self.ports.get(self.pins.get(pin).port).block
    }

    /// Returns the number of live pins.
    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    // --- Net accessors ---

    /// Iterates over the IDs of live nets.
    pub fn nets(&self) -> impl Iterator<Item = NetId> + '_ {
        self.nets.ids()
    }

    /// Returns the net with the given ID.
    pub fn net(&self, net: NetId) -> &Net {
        self.nets.get(net)
    }

    /// Returns the net's name.
    pub fn net_name(&self, net: NetId) -> Ident {
        self.nets.get(net).name
    }

    /// Returns the net's driver pin, or `None` for an undriven net.
    pub fn net_driver(&self, net: NetId) -> Option<PinId> {
        self.nets.get(net).driver
    }

    /// Returns the net's sink pins.
    pub fn net_sinks(&self, net: NetId) -> &[PinId] {
        &self.nets.get(net).sinks
    }

    /// Iterates over all pins on the net: the driver (if any), then sinks.
    pub fn net_pins(&self, net: NetId) -> impl Iterator<Item = PinId> + '_ {
        let net = self.nets.get(net);
        net.driver.into_iter().chain(net.sinks.iter().copied())
    }

    /// Returns `true` if the net is driven by a constant generator: a
    /// combinational block none of whose input pins are connected.
    pub fn net_is_constant(&self, net: NetId) -> bool {
        let Some(driver) = self.nets.get(net).driver else {
            return false;
        };
        let blk = self.pin_block(driver);
        self.blocks.get(blk).ty == BlockType::Combinational
            && self.block_input_pins(blk).all(|p| self.pins.get(p).net.is_none())
    }

    /// Looks up a net by name.
    pub fn find_net(&self, name: &str) -> Option<NetId> {
        let ident = self.interner.get(name)?;
        self.net_by_name.get(&ident).copied()
    }

    /// Returns the number of live nets.
    pub fn net_count(&self) -> usize {
        self.nets.len()
    }

    // --- Consistency ---

    /// Checks referential symmetry across the whole netlist.
    ///
    /// Intended for use after construction and in tests; a failure means a
    /// mutation broke an invariant, which is a bug in this crate.
    pub fn verify(&self) -> WeftResult<()> {
        for (blk_id, block) in self.blocks.iter() {
            for &port_id in &block.ports {
                let port = self.ports.try_get(port_id).ok_or_else(|| {
                    InternalError::new(format!(
                        "block `{}` references a removed port",
                        self.interner.resolve(block.name)
                    ))
                })?;
                if port.block != blk_id {
                    return Err(InternalError::new(format!(
                        "port `{}` does not record its owning block",
                        self.interner.resolve(port.name)
                    )));
                }
            }
            if self.block_by_name.get(&block.name) != Some(&blk_id) {
                return Err(InternalError::new(format!(
                    "block `{}` missing from the name index",
                    self.interner.resolve(block.name)
                )));
            }
        }

        for (pin_id, pin) in self.pins.iter() {
            let port = self.ports.try_get(pin.port).ok_or_else(|| {
                InternalError::new("pin references a removed port".to_string())
            })?;
            if port.pins.get(pin.bit as usize) != Some(&pin_id) {
                return Err(InternalError::new(
                    "pin's port does not record the pin at its bit".to_string(),
                ));
            }
            if let Some(net_id) = pin.net {
                let net = self.nets.try_get(net_id).ok_or_else(|| {
                    InternalError::new("pin references a removed net".to_string())
                })?;
                let on_net = net.driver == Some(pin_id) || net.sinks.contains(&pin_id);
                if !on_net {
                    return Err(InternalError::new(format!(
                        "pin of net `{}` is not among the net's pins",
                        self.interner.resolve(net.name)
                    )));
                }
            }
        }

        for (net_id, net) in self.nets.iter() {
            for pin_id in net.driver.into_iter().chain(net.sinks.iter().copied()) {
                let pin = self.pins.try_get(pin_id).ok_or_else(|| {
                    InternalError::new(format!(
                        "net `{}` references a removed pin",
                        self.interner.resolve(net.name)
                    ))
                })?;
                if pin.net != Some(net_id) {
                    return Err(InternalError::new(format!(
                        "pin on net `{}` does not record the net",
                        self.interner.resolve(net.name)
                    )));
                }
                let expected = if net.driver == Some(pin_id) {
                    PinKind::Driver
                } else {
                    PinKind::Sink
                };
                if pin.kind != expected {
                    return Err(InternalError::new(format!(
                        "pin role mismatch on net `{}`",
                        self.interner.resolve(net.name)
                    )));
                }
            }
            if self.net_by_name.get(&net.name) != Some(&net_id) {
                return Err(InternalError::new(format!(
                    "net `{}` missing from the name index",
                    self.interner.resolve(net.name)
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelLibrary;
    use weft_common::LogicValue::{False, True};

    fn inpad(netlist: &mut Netlist, name: &str) -> BlockId {
        let model = netlist.models().input_model();
        netlist.create_block(name, BlockType::Inpad, model, vec![])
    }

    fn outpad(netlist: &mut Netlist, name: &str) -> BlockId {
        let model = netlist.models().output_model();
        netlist.create_block(name, BlockType::Outpad, model, vec![])
    }

    fn lut(netlist: &mut Netlist, name: &str, truth_table: TruthTable) -> BlockId {
        let model = netlist.models().names_model();
        netlist.create_block(name, BlockType::Combinational, model, truth_table)
    }

    fn out_pin(netlist: &Netlist, blk: BlockId) -> PinId {
        netlist.block_output_pins(blk).next().unwrap()
    }

    fn in_pin(netlist: &Netlist, blk: BlockId, bit: usize) -> PinId {
        netlist.block_input_pins(blk).nth(bit).unwrap()
    }

    #[test]
    fn create_block_instantiates_model_ports() {
        let interner = Interner::new();
        let models = ModelLibrary::new(&interner, 4);
        let mut netlist = Netlist::new("top", &interner, &models);

        let blk = lut(&mut netlist, "l0", vec![vec![True, True]]);
        assert_eq!(netlist.block_ports(blk).len(), 2);
        assert_eq!(netlist.block_input_pins(blk).count(), 4);
        assert_eq!(netlist.block_output_pins(blk).count(), 1);
        let out = out_pin(&netlist, blk);
        assert_eq!(netlist.pin_kind(out), PinKind::Driver);
        assert_eq!(netlist.pin_net(out), None);
        assert_eq!(netlist.pin_block(out), blk);
        netlist.verify().unwrap();
    }

    #[test]
    fn pin_roles_follow_port_class() {
        let interner = Interner::new();
        let models = ModelLibrary::new(&interner, 4);
        let mut netlist = Netlist::new("top", &interner, &models);

        let latch_model = models.latch_model();
        let ff = netlist.create_block("ff0", BlockType::Sequential, latch_model, vec![vec![False]]);
        for pin in netlist.block_input_pins(ff).chain(netlist.block_clock_pins(ff)) {
            assert_eq!(netlist.pin_kind(pin), PinKind::Sink);
        }
        for pin in netlist.block_output_pins(ff) {
            assert_eq!(netlist.pin_kind(pin), PinKind::Driver);
        }
    }

    #[test]
    #[should_panic(expected = "duplicate block name")]
    fn duplicate_block_name_panics() {
        let interner = Interner::new();
        let models = ModelLibrary::new(&interner, 4);
        let mut netlist = Netlist::new("top", &interner, &models);
        inpad(&mut netlist, "a");
        inpad(&mut netlist, "a");
    }

    #[test]
    fn add_net_associates_pins() {
        let interner = Interner::new();
        let models = ModelLibrary::new(&interner, 4);
        let mut netlist = Netlist::new("top", &interner, &models);

        let a = inpad(&mut netlist, "a");
        let o = outpad(&mut netlist, "o");
        let driver = out_pin(&netlist, a);
        let sink = in_pin(&netlist, o, 0);
        let name = netlist.intern("a");
        let net = netlist.add_net(name, driver, vec![sink]);

        assert_eq!(netlist.net_driver(net), Some(driver));
        assert_eq!(netlist.net_sinks(net), &[sink]);
        assert_eq!(netlist.pin_net(driver), Some(net));
        assert_eq!(netlist.pin_net(sink), Some(net));
        assert_eq!(netlist.find_net("a"), Some(net));
        netlist.verify().unwrap();
    }

    #[test]
    #[should_panic(expected = "driver-role pin")]
    fn add_net_rejects_sink_as_driver() {
        let interner = Interner::new();
        let models = ModelLibrary::new(&interner, 4);
        let mut netlist = Netlist::new("top", &interner, &models);
        let o = outpad(&mut netlist, "o");
        let sink = in_pin(&netlist, o, 0);
        let name = netlist.intern("n");
        netlist.add_net(name, sink, vec![]);
    }

    #[test]
    fn remove_net_disconnects_pins() {
        let interner = Interner::new();
        let models = ModelLibrary::new(&interner, 4);
        let mut netlist = Netlist::new("top", &interner, &models);

        let a = inpad(&mut netlist, "a");
        let o = outpad(&mut netlist, "o");
        let driver = out_pin(&netlist, a);
        let sink = in_pin(&netlist, o, 0);
        let name = netlist.intern("a");
        let net = netlist.add_net(name, driver, vec![sink]);

        netlist.remove_net(net);
        assert_eq!(netlist.pin_net(driver), None);
        assert_eq!(netlist.pin_net(sink), None);
        assert_eq!(netlist.find_net("a"), None);
        assert_eq!(netlist.net_count(), 0);
        // Pins survive and may be reconnected
        let name2 = netlist.intern("a2");
        netlist.add_net(name2, driver, vec![sink]);
        netlist.verify().unwrap();
    }

    #[test]
    fn remove_block_detaches_pins_from_nets() {
        let interner = Interner::new();
        let models = ModelLibrary::new(&interner, 4);
        let mut netlist = Netlist::new("top", &interner, &models);

        let a = inpad(&mut netlist, "a");
        let b = lut(&mut netlist, "b", vec![vec![True, True]]);
        let o = outpad(&mut netlist, "o");
        let n_in = netlist.intern("a");
        let net_in = netlist.add_net(n_in, out_pin(&netlist, a), vec![in_pin(&netlist, b, 0)]);
        let n_out = netlist.intern("b_out");
        let net_out = netlist.add_net(n_out, out_pin(&netlist, b), vec![in_pin(&netlist, o, 0)]);

        netlist.remove_block(b);

        // The block, its ports, and its pins are gone
        assert_eq!(netlist.block_count(), 2);
        assert_eq!(netlist.find_block("b"), None);
        // net_in lost its only sink; net_out lost its driver
        assert!(netlist.net_sinks(net_in).is_empty());
        assert_eq!(netlist.net_driver(net_in), Some(out_pin(&netlist, a)));
        assert_eq!(netlist.net_driver(net_out), None);
        assert_eq!(netlist.net_sinks(net_out).len(), 1);
        netlist.verify().unwrap();
    }

    #[test]
    #[should_panic(expected = "stale")]
    fn stale_block_id_panics() {
        let interner = Interner::new();
        let models = ModelLibrary::new(&interner, 4);
        let mut netlist = Netlist::new("top", &interner, &models);
        let a = inpad(&mut netlist, "a");
        netlist.remove_block(a);
        netlist.block_name(a);
    }

    #[test]
    fn removed_block_name_is_reusable() {
        let interner = Interner::new();
        let models = ModelLibrary::new(&interner, 4);
        let mut netlist = Netlist::new("top", &interner, &models);
        let a = inpad(&mut netlist, "a");
        netlist.remove_block(a);
        let a2 = inpad(&mut netlist, "a");
        assert_ne!(a, a2);
        assert_eq!(netlist.find_block("a"), Some(a2));
    }

    #[test]
    fn net_is_constant_requires_unconnected_inputs() {
        let interner = Interner::new();
        let models = ModelLibrary::new(&interner, 4);
        let mut netlist = Netlist::new("top", &interner, &models);

        // A LUT with no connected inputs is a constant generator
        let k = lut(&mut netlist, "k", vec![vec![True]]);
        let o = outpad(&mut netlist, "o");
        let n = netlist.intern("k_out");
        let const_net = netlist.add_net(n, out_pin(&netlist, k), vec![in_pin(&netlist, o, 0)]);
        assert!(netlist.net_is_constant(const_net));

        // Connecting an input makes the driver a real function
        let a = inpad(&mut netlist, "a");
        let g = lut(&mut netlist, "g", vec![vec![True, True]]);
        let n_a = netlist.intern("a");
        netlist.add_net(n_a, out_pin(&netlist, a), vec![in_pin(&netlist, g, 0)]);
        let o2 = outpad(&mut netlist, "o2");
        let n_g = netlist.intern("g_out");
        let g_net = netlist.add_net(n_g, out_pin(&netlist, g), vec![in_pin(&netlist, o2, 0)]);
        assert!(!netlist.net_is_constant(g_net));

        // A primary input is not a constant generator
        let n_a2 = netlist.intern("a_dup");
        let o3 = outpad(&mut netlist, "o3");
        netlist.remove_net(netlist.find_net("a").unwrap());
        let pad_net = netlist.add_net(n_a2, out_pin(&netlist, a), vec![in_pin(&netlist, o3, 0)]);
        assert!(!netlist.net_is_constant(pad_net));
    }

    #[test]
    fn undriven_net_is_not_constant() {
        let interner = Interner::new();
        let models = ModelLibrary::new(&interner, 4);
        let mut netlist = Netlist::new("top", &interner, &models);
        let o = outpad(&mut netlist, "o");
        let a = inpad(&mut netlist, "a");
        let name = netlist.intern("n");
        let net = netlist.add_net(name, out_pin(&netlist, a), vec![in_pin(&netlist, o, 0)]);
        netlist.remove_block(a);
        assert_eq!(netlist.net_driver(net), None);
        assert!(!netlist.net_is_constant(net));
    }

    #[test]
    fn port_net_resolves_per_bit() {
        let interner = Interner::new();
        let models = ModelLibrary::new(&interner, 4);
        let mut netlist = Netlist::new("top", &interner, &models);

        let a = inpad(&mut netlist, "a");
        let b = lut(&mut netlist, "b", vec![vec![True, True]]);
        let in_port = netlist.block_input_ports(b).next().unwrap();
        assert_eq!(netlist.port_width(in_port), 4);
        let name = netlist.intern("a");
        let net = netlist.add_net(name, out_pin(&netlist, a), vec![netlist.port_pin(in_port, 2)]);
        assert_eq!(netlist.port_net(in_port, 2), Some(net));
        assert_eq!(netlist.port_net(in_port, 0), None);
    }

    #[test]
    fn net_pins_yields_driver_then_sinks() {
        let interner = Interner::new();
        let models = ModelLibrary::new(&interner, 4);
        let mut netlist = Netlist::new("top", &interner, &models);
        let a = inpad(&mut netlist, "a");
        let o1 = outpad(&mut netlist, "o1");
        let o2 = outpad(&mut netlist, "o2");
        let driver = out_pin(&netlist, a);
        let s1 = in_pin(&netlist, o1, 0);
        let s2 = in_pin(&netlist, o2, 0);
        let name = netlist.intern("a");
        let net = netlist.add_net(name, driver, vec![s1, s2]);
        let pins: Vec<PinId> = netlist.net_pins(net).collect();
        assert_eq!(pins, vec![driver, s1, s2]);
    }
}
