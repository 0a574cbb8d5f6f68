//! Typed errors for netlist-contract violations.

use weft_common::LogicValue;

/// An input-contract violation detected while interpreting the netlist.
///
/// These indicate a malformed input netlist (an upstream synthesis bug),
/// not a bug in Weft itself; they are never silently coerced.
#[derive(Debug, thiserror::Error)]
pub enum NetlistError {
    /// A truth-table output column holds a value other than TRUE/FALSE
    /// where on/off-set polarity is required.
    #[error("truth-table output value `{value}` is neither TRUE nor FALSE")]
    MalformedTruthTable {
        /// The offending output value.
        value: LogicValue,
    },

    /// A latch block deviates from the one-input/one-output/one-clock,
    /// single-bit port shape.
    #[error("latch `{block}` must have single-bit D, Q, and clk ports, each connected")]
    MalformedLatch {
        /// Name of the offending block.
        block: String,
    },

    /// A latch block carries a port name other than `D`, `Q`, or `clk`.
    #[error("latch `{block}` has unrecognized port `{port}`")]
    UnknownLatchPort {
        /// Name of the offending block.
        block: String,
        /// The unrecognized port name.
        port: String,
    },

    /// A latch initial state is not a single-row, single-column truth table.
    #[error("latch `{block}` initial state must be a single truth-table value")]
    MalformedLatchInitialState {
        /// Name of the offending block.
        block: String,
    },
}

/// An error produced while emitting a netlist.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// The underlying writer failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The netlist violates an emission contract.
    #[error(transparent)]
    Netlist(#[from] NetlistError),
}
