// Licensed under the Apache-2.0 license

//! Register and field model.
//!
//! A [`RegisterMap`] is the validated, address-ordered list of [`Register`]s
//! built by the loader. Its order is the emission order of every generated
//! module, so address tables and port lists line up across the three files.
//!
//! The access semantics the register core implements are also expressed
//! here in plain Rust ([`AccessKind::apply_write`], [`AccessKind::read_back`],
//! [`strobe_to_mask`], [`RegisterMap::decode`]); the core generator takes its
//! per-register update expression from the same [`AccessKind`] dispatch.

use crate::config::BusConfig;
use crate::error::{RegMapError, Result};
use crate::util::reg_token;
use std::fmt;
use std::str::FromStr;

/// Software access discipline of a register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AccessKind {
    /// Read-write.
    RW,
    /// Read-only; writes are acknowledged but ignored.
    RO,
    /// Write-only; reads return zero.
    WO,
    /// Write-one-to-clear.
    W1C,
}

impl AccessKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessKind::RW => "RW",
            AccessKind::RO => "RO",
            AccessKind::WO => "WO",
            AccessKind::W1C => "W1C",
        }
    }

    /// Whether a bus read returns the stored value.
    pub fn is_readable(&self) -> bool {
        !matches!(self, AccessKind::WO)
    }

    /// Storage value after a write hit with `data` under the bit `mask`.
    pub fn apply_write(&self, storage: u64, data: u64, mask: u64) -> u64 {
        match self {
            AccessKind::RO => storage,
            AccessKind::RW | AccessKind::WO => (storage & !mask) | (data & mask),
            AccessKind::W1C => storage & !(data & mask),
        }
    }

    /// Value a bus read returns for the given storage.
    pub fn read_back(&self, storage: u64) -> u64 {
        if self.is_readable() {
            storage
        } else {
            0
        }
    }

    /// Verilog expression for the next storage value on a write hit, or
    /// `None` when writes leave storage untouched.
    pub fn update_expr(&self, storage: &str, data: &str, mask: &str) -> Option<String> {
        match self {
            AccessKind::RO => None,
            AccessKind::RW | AccessKind::WO => {
                Some(format!("({storage} & ~{mask}) | ({data} & {mask})"))
            }
            AccessKind::W1C => Some(format!("{storage} & ~({data} & {mask})")),
        }
    }
}

impl FromStr for AccessKind {
    type Err = RegMapError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RW" => Ok(AccessKind::RW),
            "RO" => Ok(AccessKind::RO),
            "WO" => Ok(AccessKind::WO),
            "W1C" => Ok(AccessKind::W1C),
            _ => Err(RegMapError::UnsupportedAccess {
                access: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expands a byte-strobe vector into a bit mask, one byte lane per strobe bit.
///
/// ```
/// use regblock_generator::model::strobe_to_mask;
/// assert_eq!(strobe_to_mask(0b0011, 32), 0x0000_FFFF);
/// ```
pub fn strobe_to_mask(strobe: u64, data_width: u32) -> u64 {
    (0..data_width / 8)
        .filter(|lane| strobe & (1 << lane) != 0)
        .fold(0, |mask, lane| mask | (0xFF << (lane * 8)))
}

/// A named bit range inside a register.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub lsb: u32,
    pub msb: u32,
    pub description: String,
}

impl Field {
    /// `[msb:lsb]`, or `[bit]` for single-bit fields.
    pub fn range_str(&self) -> String {
        if self.msb == self.lsb {
            format!("[{}]", self.lsb)
        } else {
            format!("[{}:{}]", self.msb, self.lsb)
        }
    }
}

/// One addressable register.
///
/// The identifier token is derived once at construction; the address
/// parameter, storage register and observation port names all come from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Register {
    pub name: String,
    /// Byte offset from the block base.
    pub offset: u64,
    pub access: AccessKind,
    pub reset: u64,
    pub fields: Vec<Field>,
    token: String,
}

impl Register {
    pub fn new(
        name: &str,
        offset: u64,
        access: AccessKind,
        reset: u64,
        fields: Vec<Field>,
    ) -> Self {
        Self {
            name: name.to_string(),
            offset,
            access,
            reset,
            fields,
            token: reg_token(name),
        }
    }

    /// Uppercase, Verilog-legal identifier token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// `ADDR_<TOKEN>`
    pub fn addr_param(&self) -> String {
        format!("ADDR_{}", self.token)
    }

    /// `r_<TOKEN>`
    pub fn storage_name(&self) -> String {
        format!("r_{}", self.token)
    }

    /// `w_<TOKEN>_o`
    pub fn output_port(&self) -> String {
        format!("w_{}_o", self.token)
    }
}

/// Address-ordered registers of one table, with the bus geometry they were
/// validated against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterMap {
    bus: BusConfig,
    registers: Vec<Register>,
}

impl RegisterMap {
    /// Sorts by offset. The sort is stable, so registers sharing an offset
    /// keep their input order.
    pub(crate) fn new(bus: BusConfig, mut registers: Vec<Register>) -> Self {
        registers.sort_by_key(|r| r.offset);
        Self { bus, registers }
    }

    pub fn bus(&self) -> &BusConfig {
        &self.bus
    }

    pub fn registers(&self) -> &[Register] {
        &self.registers
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Register> {
        self.registers.iter()
    }

    pub fn len(&self) -> usize {
        self.registers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }

    /// Register selected by an exact address match, as the core's hit
    /// decode does. The first register in address order wins.
    pub fn decode(&self, addr: u64) -> Option<&Register> {
        self.registers.iter().find(|r| r.offset == addr)
    }
}

impl<'a> IntoIterator for &'a RegisterMap {
    type Item = &'a Register;
    type IntoIter = std::slice::Iter<'a, Register>;

    fn into_iter(self) -> Self::IntoIter {
        self.registers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_from_str() {
        assert_eq!("rw".parse::<AccessKind>().unwrap(), AccessKind::RW);
        assert_eq!(" Ro ".parse::<AccessKind>().unwrap(), AccessKind::RO);
        assert_eq!("wo".parse::<AccessKind>().unwrap(), AccessKind::WO);
        assert_eq!("w1c".parse::<AccessKind>().unwrap(), AccessKind::W1C);
        assert!(matches!(
            "RW1S".parse::<AccessKind>(),
            Err(RegMapError::UnsupportedAccess { access }) if access == "RW1S"
        ));
        assert!("".parse::<AccessKind>().is_err());
    }

    #[test]
    fn test_rw_wo_masked_write() {
        let mask = strobe_to_mask(0b0011, 32);
        assert_eq!(mask, 0x0000_FFFF);
        for access in [AccessKind::RW, AccessKind::WO] {
            assert_eq!(access.apply_write(0x0000_0000, 0xFFFF_FFFF, mask), 0x0000_FFFF);
            assert_eq!(
                access.apply_write(0x1234_5678, 0xAAAA_BBBB, 0xFF00_0000),
                0xAA34_5678
            );
        }
    }

    #[test]
    fn test_w1c_write() {
        assert_eq!(
            AccessKind::W1C.apply_write(0x0000_00FF, 0x0000_000F, 0xFFFF_FFFF),
            0x0000_00F0
        );
        // Ones outside the enabled lanes do not clear
        assert_eq!(
            AccessKind::W1C.apply_write(0xFFFF_FFFF, 0xFFFF_FFFF, 0x0000_FF00),
            0xFFFF_00FF
        );
    }

    #[test]
    fn test_ro_write_ignored() {
        let storage = 0x5A5A_0001;
        for (data, mask) in [(0, u64::MAX), (u64::MAX, u64::MAX), (0x1234, 0xFF)] {
            assert_eq!(AccessKind::RO.apply_write(storage, data, mask), storage);
        }
    }

    #[test]
    fn test_read_back() {
        assert_eq!(AccessKind::WO.read_back(0xFFFF), 0);
        assert_eq!(AccessKind::RW.read_back(0xFFFF), 0xFFFF);
        assert_eq!(AccessKind::RO.read_back(0x1), 0x1);
        assert_eq!(AccessKind::W1C.read_back(0x80), 0x80);
    }

    #[test]
    fn test_strobe_to_mask() {
        assert_eq!(strobe_to_mask(0, 32), 0);
        assert_eq!(strobe_to_mask(0b1111, 32), 0xFFFF_FFFF);
        assert_eq!(strobe_to_mask(0b0100, 32), 0x00FF_0000);
        assert_eq!(strobe_to_mask(0xFF, 64), u64::MAX);
        // Strobes beyond the word are ignored
        assert_eq!(strobe_to_mask(0b1_0001, 32), 0x0000_00FF);
    }

    #[test]
    fn test_update_expr() {
        assert_eq!(AccessKind::RO.update_expr("r", "d", "m"), None);
        assert_eq!(
            AccessKind::RW.update_expr("r", "d", "m").unwrap(),
            "(r & ~m) | (d & m)"
        );
        assert_eq!(
            AccessKind::W1C.update_expr("r", "d", "m").unwrap(),
            "r & ~(d & m)"
        );
    }

    #[test]
    fn test_register_names() {
        let reg = Register::new("reg-ctrl", 0, AccessKind::RW, 1, vec![]);
        assert_eq!(reg.token(), "REG_CTRL");
        assert_eq!(reg.addr_param(), "ADDR_REG_CTRL");
        assert_eq!(reg.storage_name(), "r_REG_CTRL");
        assert_eq!(reg.output_port(), "w_REG_CTRL_o");
    }

    #[test]
    fn test_map_order_and_decode() {
        let map = RegisterMap::new(
            BusConfig::default(),
            vec![
                Register::new("B", 0x8, AccessKind::RO, 0, vec![]),
                Register::new("A", 0x0, AccessKind::RW, 0, vec![]),
                Register::new("C", 0x8, AccessKind::RW, 0, vec![]),
            ],
        );
        let names: Vec<_> = map.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert_eq!(map.decode(0x8).map(|r| r.name.as_str()), Some("B"));
        assert!(map.decode(0x4).is_none());
    }

    #[test]
    fn test_field_range_str() {
        let field = Field {
            name: "EN".into(),
            lsb: 0,
            msb: 0,
            description: String::new(),
        };
        assert_eq!(field.range_str(), "[0]");
        let field = Field {
            lsb: 4,
            msb: 7,
            ..field
        };
        assert_eq!(field.range_str(), "[7:4]");
    }
}
