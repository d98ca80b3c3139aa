// Licensed under the Apache-2.0 license

//! Loading a register table from CSV.
//!
//! The table has one row per field, with the register-level attributes
//! (`name`, `offset`, `access`, `reset`) repeated on every row of a register:
//!
//! ```text
//! name,offset,access,reset,field,lsb,msb,desc
//! REG_CTRL,0x0000,RW,0x00000001,EN,0,0,Enable
//! REG_CTRL,0x0000,RW,0x00000001,MODE,1,2,Operating mode
//! REG_STAT,0x0004,RO,0,,,,
//! ```
//!
//! Rows with an empty `field` cell carry register metadata only. Loading is
//! all-or-nothing: the first violation aborts with no [`RegisterMap`].

use crate::config::BusConfig;
use crate::error::{RegMapError, Result};
use crate::model::{AccessKind, Field, Register, RegisterMap};
use crate::util::parse_int;
use crate::validate;
use log::{debug, info, warn};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::io::Read;
use std::path::Path;

/// Columns every table must provide.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "name", "offset", "access", "reset", "field", "lsb", "msb", "desc",
];

/// Options controlling how strictly a table is accepted.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LoadOptions {
    /// Reject two differently named registers at the same offset instead of
    /// passing both through.
    pub reject_duplicate_offsets: bool,
}

/// One table row, cells kept as text until their register is assembled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRow {
    pub name: String,
    pub offset: String,
    pub access: String,
    pub reset: String,
    pub field: String,
    pub lsb: String,
    pub msb: String,
    pub desc: String,
}

/// Loads and validates a register table from a CSV file.
pub fn load_register_map(
    path: &Path,
    bus: &BusConfig,
    options: &LoadOptions,
) -> Result<RegisterMap> {
    info!("Loading register table from {}", path.display());
    let file = std::fs::File::open(path)?;
    load_register_map_from_reader(file, bus, options)
}

/// Loads and validates a register table from any CSV source.
pub fn load_register_map_from_reader<R: Read>(
    reader: R,
    bus: &BusConfig,
    options: &LoadOptions,
) -> Result<RegisterMap> {
    let rows = read_rows(reader)?;
    RegisterMap::from_rows(&rows, bus, options)
}

/// Reads the raw rows of a CSV source, checking the header first.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let h = if i == 0 { h.trim_start_matches('\u{feff}') } else { h };
            h.trim().to_string()
        })
        .collect();

    let mut index = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, column) in index.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| RegMapError::MissingColumn {
                column: column.to_string(),
            })?;
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cell = |i: usize| record.get(index[i]).unwrap_or("").to_string();
        rows.push(RawRow {
            name: cell(0),
            offset: cell(1),
            access: cell(2),
            reset: cell(3),
            field: cell(4),
            lsb: cell(5),
            msb: cell(6),
            desc: cell(7),
        });
    }
    debug!("Read {} rows", rows.len());
    Ok(rows)
}

impl RegisterMap {
    /// Groups rows into registers and validates them.
    ///
    /// Rows are grouped by `(name, offset)`. Groups are then processed in
    /// ascending offset order (first appearance breaks ties), which is also
    /// the order of the resulting map.
    pub fn from_rows(rows: &[RawRow], bus: &BusConfig, options: &LoadOptions) -> Result<Self> {
        bus.validate()?;

        let mut groups: Vec<((String, u64), Vec<&RawRow>)> = Vec::new();
        let mut group_index: HashMap<(String, u64), usize> = HashMap::new();
        for row in rows {
            let name = row.name.trim();
            if name.is_empty() {
                continue;
            }
            let key = (name.to_string(), parse_int(&row.offset)?);
            match group_index.get(&key) {
                Some(&i) => groups[i].1.push(row),
                None => {
                    group_index.insert(key.clone(), groups.len());
                    groups.push((key, vec![row]));
                }
            }
        }
        groups.sort_by_key(|((_, offset), _)| *offset);

        let mut registers = Vec::with_capacity(groups.len());
        for ((name, offset), rows) in &groups {
            registers.push(assemble_register(name, *offset, rows, bus)?);
        }
        Self::finish(*bus, registers, options)
    }

    /// Validates already-assembled registers and orders them by offset.
    pub fn build(bus: BusConfig, registers: Vec<Register>, options: &LoadOptions) -> Result<Self> {
        bus.validate()?;
        for register in &registers {
            validate::validate_register(register, &bus)?;
        }
        Self::finish(bus, registers, options)
    }

    /// Map-wide checks over registers that each passed validation.
    fn finish(bus: BusConfig, registers: Vec<Register>, options: &LoadOptions) -> Result<Self> {
        let map = RegisterMap::new(bus, registers);
        validate::validate_unique_tokens(map.registers())?;
        if options.reject_duplicate_offsets {
            validate::validate_unique_offsets(map.registers())?;
        } else {
            for pair in map.registers().windows(2) {
                if pair[0].offset == pair[1].offset {
                    warn!(
                        "Registers '{}' and '{}' share offset 0x{:X}",
                        pair[0].name, pair[1].name, pair[0].offset
                    );
                }
            }
        }
        info!("Loaded {} registers", map.len());
        Ok(map)
    }
}

/// Builds one register from the rows sharing its `(name, offset)` key.
fn assemble_register(name: &str, offset: u64, rows: &[&RawRow], bus: &BusConfig) -> Result<Register> {
    let accesses = rows
        .iter()
        .map(|r| validate::validate_access(&r.access))
        .collect::<Result<BTreeSet<AccessKind>>>()?;
    let access = single(accesses).map_err(|values| {
        let mut values: Vec<String> = values.iter().map(AccessKind::to_string).collect();
        values.sort();
        RegMapError::AccessMismatch {
            register: name.to_string(),
            offset,
            values,
        }
    })?;

    let resets = rows
        .iter()
        .map(|r| parse_int(&r.reset))
        .collect::<Result<BTreeSet<u64>>>()?;
    let reset = single(resets).map_err(|values| RegMapError::ResetMismatch {
        register: name.to_string(),
        offset,
        values,
    })?;

    let mut fields = Vec::new();
    for row in rows {
        let field_name = row.field.trim();
        if field_name.is_empty() {
            continue;
        }
        fields.push(Field {
            name: field_name.to_string(),
            lsb: parse_bit(&row.lsb)?,
            msb: parse_bit(&row.msb)?,
            description: row.desc.trim().to_string(),
        });
    }

    let register = Register::new(name, offset, access, reset, fields);
    validate::validate_register(&register, bus)?;
    debug!(
        "Register {} @0x{:X} [{}] with {} fields",
        register.token(),
        offset,
        access,
        register.fields.len()
    );
    Ok(register)
}

/// Bit indices share the integer grammar but must fit a `u32`.
fn parse_bit(text: &str) -> Result<u32> {
    u32::try_from(parse_int(text)?).map_err(|_| RegMapError::InvalidLiteral {
        literal: text.to_string(),
    })
}

/// The only element of a set, or every element when there is more than one.
fn single<T: Ord>(set: BTreeSet<T>) -> std::result::Result<T, Vec<T>> {
    let mut values: Vec<T> = set.into_iter().collect();
    if values.len() == 1 {
        Ok(values.remove(0))
    } else {
        Err(values)
    }
}
