//! Primitive model catalog.
//!
//! A [`Model`] describes the port layout of a primitive block type: named
//! input/output/clock ports with fixed widths. The catalog is owned by the
//! caller (it comes from the architecture description, not the netlist) and
//! the netlist only references models by [`ModelId`].
//!
//! Every [`ModelLibrary`] starts with the four BLIF primitive models
//! pre-registered: `input`, `output`, `names` (LUT logic), and `latch`.
//! Transforms that must recognize these primitives (buffer absorption, BLIF
//! emission) compare model IDs against the library's builtin accessors.

use crate::arena::Arena;
use crate::ids::ModelId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use weft_common::{Ident, Interner};

/// The class of a port: which direction its pins face.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum PortClass {
    /// A data input; its pins are net sinks.
    Input,
    /// A data output; its pins are net drivers.
    Output,
    /// A clock input; its pins are net sinks.
    Clock,
}

/// One port definition in a model: a named bus with a class and width.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelPort {
    /// The port name (unique within the model).
    pub name: Ident,
    /// The port class.
    pub class: PortClass,
    /// The number of bits in the port.
    pub width: u32,
}

/// A primitive model: the port layout shared by all blocks of one type.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Model {
    /// The model name (unique within the library).
    pub name: Ident,
    /// Port definitions in declaration order.
    pub ports: Vec<ModelPort>,
}

impl Model {
    /// Iterates over the input port definitions in declaration order.
    pub fn input_ports(&self) -> impl Iterator<Item = &ModelPort> {
        self.ports.iter().filter(|p| p.class == PortClass::Input)
    }

    /// Iterates over the output port definitions in declaration order.
    pub fn output_ports(&self) -> impl Iterator<Item = &ModelPort> {
        self.ports.iter().filter(|p| p.class == PortClass::Output)
    }

    /// Iterates over the clock port definitions in declaration order.
    pub fn clock_ports(&self) -> impl Iterator<Item = &ModelPort> {
        self.ports.iter().filter(|p| p.class == PortClass::Clock)
    }
}

/// The catalog of primitive models available to a netlist.
#[derive(Serialize, Deserialize)]
pub struct ModelLibrary {
    models: Arena<ModelId, Model>,
    by_name: HashMap<Ident, ModelId>,
    input: ModelId,
    output: ModelId,
    names: ModelId,
    latch: ModelId,
}

impl ModelLibrary {
    /// Creates a library with the four BLIF primitive models registered.
    ///
    /// `lut_inputs` sizes the input port of the `names` model (the LUT input
    /// count of the target device).
    pub fn new(interner: &Interner, lut_inputs: u32) -> Self {
        let mut library = Self {
            models: Arena::new(),
            by_name: HashMap::new(),
            input: ModelId::INVALID,
            output: ModelId::INVALID,
            names: ModelId::INVALID,
            latch: ModelId::INVALID,
        };

        library.input = library.add(Model {
            name: interner.get_or_intern("input"),
            ports: vec![ModelPort {
                name: interner.get_or_intern("inpad"),
                class: PortClass::Output,
                width: 1,
            }],
        });
        library.output = library.add(Model {
            name: interner.get_or_intern("output"),
            ports: vec![ModelPort {
                name: interner.get_or_intern("outpad"),
                class: PortClass::Input,
                width: 1,
            }],
        });
        library.names = library.add(Model {
            name: interner.get_or_intern("names"),
            ports: vec![
                ModelPort {
                    name: interner.get_or_intern("in"),
                    class: PortClass::Input,
                    width: lut_inputs,
                },
                ModelPort {
                    name: interner.get_or_intern("out"),
                    class: PortClass::Output,
                    width: 1,
                },
            ],
        });
        library.latch = library.add(Model {
            name: interner.get_or_intern("latch"),
            ports: vec![
                ModelPort {
                    name: interner.get_or_intern("D"),
                    class: PortClass::Input,
                    width: 1,
                },
                ModelPort {
                    name: interner.get_or_intern("Q"),
                    class: PortClass::Output,
                    width: 1,
                },
                ModelPort {
                    name: interner.get_or_intern("clk"),
                    class: PortClass::Clock,
                    width: 1,
                },
            ],
        });

        library
    }

    /// Registers a model and returns its ID.
    ///
    /// # Panics
    ///
    /// Panics if a model with the same name is already registered.
    pub fn add(&mut self, model: Model) -> ModelId {
        assert!(
            !self.by_name.contains_key(&model.name),
            "duplicate model name"
        );
        let name = model.name;
        let id = self.models.alloc(model);
        self.by_name.insert(name, id);
        id
    }

    /// Returns the model with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is invalid or stale.
    pub fn get(&self, id: ModelId) -> &Model {
        self.models.get(id)
    }

    /// Looks up a model by name.
    pub fn lookup(&self, name: Ident) -> Option<ModelId> {
        self.by_name.get(&name).copied()
    }

    /// The builtin `input` model (primary-input pad).
    pub fn input_model(&self) -> ModelId {
        self.input
    }

    /// The builtin `output` model (primary-output pad).
    pub fn output_model(&self) -> ModelId {
        self.output
    }

    /// The builtin `names` model (LUT logic function).
    pub fn names_model(&self) -> ModelId {
        self.names
    }

    /// The builtin `latch` model.
    pub fn latch_model(&self) -> ModelId {
        self.latch
    }

    /// Returns `true` if the ID names one of the four BLIF builtin models.
    pub fn is_builtin(&self, id: ModelId) -> bool {
        id == self.input || id == self.output || id == self.names || id == self.latch
    }

    /// Iterates over `(ID, &Model)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ModelId, &Model)> {
        self.models.iter()
    }
}
