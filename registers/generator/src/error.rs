// Licensed under the Apache-2.0 license

//! Errors raised while loading, validating and generating a register block.
//!
//! Every variant is a load-time failure. Generation never starts unless the
//! whole table validated, so no artifact is ever produced from a partial map.

use thiserror::Error;

/// Errors that can occur while turning a register table into Verilog.
#[derive(Error, Debug)]
pub enum RegMapError {
    /// An integer cell does not match the literal grammar.
    #[error("invalid integer literal '{literal}'")]
    InvalidLiteral { literal: String },

    /// An access cell is not one of RW, RO, WO, W1C.
    #[error("unsupported access '{access}'. Use one of: RW, RO, WO, W1C")]
    UnsupportedAccess { access: String },

    /// Rows of one register declare different access kinds.
    #[error("access mismatch in reg '{register}' @0x{offset:X}: [{}]", .values.join(", "))]
    AccessMismatch {
        register: String,
        offset: u64,
        values: Vec<String>,
    },

    /// Rows of one register declare different reset values.
    #[error("reset mismatch in reg '{register}' @0x{offset:X}: [{}]", hex_list(.values))]
    ResetMismatch {
        register: String,
        offset: u64,
        values: Vec<u64>,
    },

    /// `msb < lsb`.
    #[error("invalid bit range {field}[{msb}:{lsb}]")]
    InvalidRange { field: String, msb: u32, lsb: u32 },

    /// A field reaches past the data word.
    #[error("field {field}[{msb}:{lsb}] exceeds the {width}-bit data word")]
    FieldOutOfBounds {
        field: String,
        msb: u32,
        lsb: u32,
        width: u32,
    },

    /// Two fields of one register claim the same bit.
    #[error("bit overlap detected at bit {bit} (field {field})")]
    BitOverlap { bit: u32, field: String },

    /// The offset is not a multiple of the data word size in bytes.
    #[error("offset not {align}-byte aligned: {register} offset=0x{offset:X}")]
    Misaligned {
        register: String,
        offset: u64,
        align: u64,
    },

    /// The reset value does not fit in the data word.
    #[error("reset value 0x{reset:X} of reg '{register}' does not fit in {width} bits")]
    ResetOutOfRange {
        register: String,
        reset: u64,
        width: u32,
    },

    /// The offset does not fit in the address bus.
    #[error("offset 0x{offset:X} of reg '{register}' does not fit in {width} address bits")]
    OffsetOutOfRange {
        register: String,
        offset: u64,
        width: u32,
    },

    /// Two distinct register names sanitize to the same identifier token.
    #[error("registers '{first}' and '{second}' both map to identifier '{token}'")]
    DuplicateIdentifier {
        token: String,
        first: String,
        second: String,
    },

    /// Two distinct registers share one offset (only raised in strict mode).
    #[error("registers '{first}' and '{second}' share offset 0x{offset:X}")]
    DuplicateOffset {
        offset: u64,
        first: String,
        second: String,
    },

    /// The table lacks a required column.
    #[error("CSV missing required column: {column}")]
    MissingColumn { column: String },

    /// The configured bus width is not usable.
    #[error("unsupported {bus} width {width}: {reason}")]
    InvalidBusWidth {
        bus: &'static str,
        width: u32,
        reason: &'static str,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn hex_list(values: &[u64]) -> String {
    values
        .iter()
        .map(|v| format!("0x{v:X}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for register block operations.
pub type Result<T> = std::result::Result<T, RegMapError>;
