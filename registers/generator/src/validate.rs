// Licensed under the Apache-2.0 license

//! Validation rules for fields, registers and whole register maps.
//!
//! All checks are pure and fail fast on the first violation, with an error
//! naming the register, field, bit or value at fault.

use crate::config::BusConfig;
use crate::error::{RegMapError, Result};
use crate::model::{AccessKind, Field, Register};
use std::collections::HashMap;

/// Bit range legality: `lsb <= msb < data_width`.
pub fn validate_range(field: &Field, data_width: u32) -> Result<()> {
    if field.msb < field.lsb {
        return Err(RegMapError::InvalidRange {
            field: field.name.clone(),
            msb: field.msb,
            lsb: field.lsb,
        });
    }
    if field.msb >= data_width {
        return Err(RegMapError::FieldOutOfBounds {
            field: field.name.clone(),
            msb: field.msb,
            lsb: field.lsb,
            width: data_width,
        });
    }
    Ok(())
}

/// Checks every field's range and that no two fields claim the same bit.
///
/// Fields are visited in table order and bits from `lsb` upward, so an
/// overlap is reported against the later field at its lowest shared bit.
pub fn validate_fields(fields: &[Field], data_width: u32) -> Result<()> {
    let mut used = 0u64;
    for field in fields {
        validate_range(field, data_width)?;
        for bit in field.lsb..=field.msb {
            if used & (1 << bit) != 0 {
                return Err(RegMapError::BitOverlap {
                    bit,
                    field: field.name.clone(),
                });
            }
            used |= 1 << bit;
        }
    }
    Ok(())
}

/// Offsets must be a multiple of the data word size in bytes.
pub fn validate_alignment(register: &str, offset: u64, bus: &BusConfig) -> Result<()> {
    let align = bus.word_bytes();
    if offset % align != 0 {
        return Err(RegMapError::Misaligned {
            register: register.to_string(),
            offset,
            align,
        });
    }
    Ok(())
}

/// Parses an access cell (case-insensitive).
pub fn validate_access(raw: &str) -> Result<AccessKind> {
    raw.parse()
}

/// The reset value must fit in the data word.
pub fn validate_reset(register: &str, reset: u64, data_width: u32) -> Result<()> {
    if data_width < 64 && reset >> data_width != 0 {
        return Err(RegMapError::ResetOutOfRange {
            register: register.to_string(),
            reset,
            width: data_width,
        });
    }
    Ok(())
}

/// The offset must be representable on the address bus.
pub fn validate_offset(register: &str, offset: u64, addr_width: u32) -> Result<()> {
    if addr_width < 64 && offset >> addr_width != 0 {
        return Err(RegMapError::OffsetOutOfRange {
            register: register.to_string(),
            offset,
            width: addr_width,
        });
    }
    Ok(())
}

/// Register-level checks, in the order the loader applies them.
pub fn validate_register(register: &Register, bus: &BusConfig) -> Result<()> {
    validate_fields(&register.fields, bus.data_width)?;
    validate_alignment(&register.name, register.offset, bus)?;
    validate_offset(&register.name, register.offset, bus.addr_width)?;
    validate_reset(&register.name, register.reset, bus.data_width)
}

/// Distinct registers must have distinct identifier tokens, since the
/// generated modules declare one parameter, storage register and port per
/// token.
pub fn validate_unique_tokens(registers: &[Register]) -> Result<()> {
    let mut seen: HashMap<&str, &Register> = HashMap::new();
    for register in registers {
        if let Some(first) = seen.insert(register.token(), register) {
            return Err(RegMapError::DuplicateIdentifier {
                token: register.token().to_string(),
                first: first.name.clone(),
                second: register.name.clone(),
            });
        }
    }
    Ok(())
}

/// Rejects two registers at one offset. Expects `registers` sorted by offset.
pub fn validate_unique_offsets(registers: &[Register]) -> Result<()> {
    match registers.windows(2).find(|w| w[0].offset == w[1].offset) {
        Some(pair) => Err(RegMapError::DuplicateOffset {
            offset: pair[0].offset,
            first: pair[0].name.clone(),
            second: pair[1].name.clone(),
        }),
        None => Ok(()),
    }
}
