//! Opaque ID newtypes for all netlist entities.
//!
//! Each ID pairs a `u32` slot index with a `u32` generation counter. The
//! generation lets the [`Arena`](crate::arena::Arena) distinguish a live
//! entity from a removed one whose slot was reused: a stale ID never aliases
//! a later entity. Every ID type has an [`INVALID`](BlockId::INVALID)
//! sentinel usable as a default/placeholder value.

use crate::arena::ArenaId;
use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
        pub struct $name {
            index: u32,
            generation: u32,
        }

        impl $name {
            /// The invalid sentinel. Never resolves to an entity.
            pub const INVALID: Self = Self {
                index: u32::MAX,
                generation: u32::MAX,
            };

            /// Creates an ID from a slot index and generation.
            ///
            /// Intended for deserialization and tests; normal code receives
            /// IDs from the arena that allocated the entity.
            pub fn new(index: u32, generation: u32) -> Self {
                Self { index, generation }
            }

            /// Returns the slot index.
            pub fn index(self) -> u32 {
                self.index
            }

            /// Returns the generation counter.
            pub fn generation(self) -> u32 {
                self.generation
            }

            /// Returns `true` unless this is the [`INVALID`](Self::INVALID) sentinel.
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl ArenaId for $name {
            const INVALID: Self = Self::INVALID;

            fn new(index: u32, generation: u32) -> Self {
                Self { index, generation }
            }

            fn index(self) -> u32 {
                self.index
            }

            fn generation(self) -> u32 {
                self.generation
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }
    };
}

define_id!(
    /// Opaque, copyable ID for a primitive block in the netlist.
    BlockId
);

define_id!(
    /// Opaque, copyable ID for a port on a block.
    PortId
);

define_id!(
    /// Opaque, copyable ID for a single pin (one bit of a port).
    PinId
);

define_id!(
    /// Opaque, copyable ID for a net.
    NetId
);

define_id!(
    /// Opaque, copyable ID for a primitive model in the catalog.
    ModelId
);
