// Licensed under the Apache-2.0 license

//! Configuration for naming and bus geometry during code generation.
//!
//! [`NameConfig`] turns the user-supplied base name into the three module
//! names and file names. [`BusConfig`] carries the address and data widths
//! that drive validation and the default parameters of the emitted modules.
//!
//! Both deserialize from TOML tables so a project can keep them next to its
//! register table.

use crate::error::{RegMapError, Result};
use crate::util::{file_stem, verilog_ident};
use serde::Deserialize;

/// Default base name for modules and files.
pub const DEFAULT_BASE: &str = "regblock";

/// Names of the three generated modules and their files.
///
/// # Example
///
/// ```
/// use regblock_generator::config::NameConfig;
///
/// let config = NameConfig::new("gn common-test");
/// assert_eq!(config.busif_module(), "gn_common_test_reg_busif");
/// assert_eq!(config.wrap_file(), "gn_common_test_reg_wrap.v");
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct NameConfig {
    /// User-supplied base name, sanitized on use.
    pub base: String,
}

impl Default for NameConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE)
    }
}

impl NameConfig {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.to_string(),
        }
    }

    fn module(&self, suffix: &str) -> String {
        verilog_ident(&format!("{}_{suffix}", verilog_ident(&self.base)))
    }

    fn file(&self, suffix: &str) -> String {
        format!("{}_{suffix}.v", file_stem(&self.base))
    }

    /// Bus adapter module name.
    pub fn busif_module(&self) -> String {
        self.module("reg_busif")
    }

    /// Register core module name.
    pub fn core_module(&self) -> String {
        self.module("reg_core")
    }

    /// Wrapper module name.
    pub fn wrap_module(&self) -> String {
        self.module("reg_wrap")
    }

    pub fn busif_file(&self) -> String {
        self.file("reg_busif")
    }

    pub fn core_file(&self) -> String {
        self.file("reg_core")
    }

    pub fn wrap_file(&self) -> String {
        self.file("reg_wrap")
    }
}

/// Address and data bus widths, in bits.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BusConfig {
    pub addr_width: u32,
    pub data_width: u32,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            addr_width: 32,
            data_width: 32,
        }
    }
}

impl BusConfig {
    /// Create a bus configuration and check that it is usable.
    pub fn new(addr_width: u32, data_width: u32) -> Result<Self> {
        let config = Self {
            addr_width,
            data_width,
        };
        config.validate()?;
        Ok(config)
    }

    /// Data widths must be whole bytes up to 64 bits; address widths 1 to 64.
    pub fn validate(&self) -> Result<()> {
        if self.data_width == 0 || self.data_width % 8 != 0 {
            return Err(RegMapError::InvalidBusWidth {
                bus: "data",
                width: self.data_width,
                reason: "must be a non-zero multiple of 8",
            });
        }
        if self.data_width > 64 {
            return Err(RegMapError::InvalidBusWidth {
                bus: "data",
                width: self.data_width,
                reason: "must not exceed 64",
            });
        }
        if !(1..=64).contains(&self.addr_width) {
            return Err(RegMapError::InvalidBusWidth {
                bus: "address",
                width: self.addr_width,
                reason: "must be between 1 and 64",
            });
        }
        Ok(())
    }

    /// Bytes per data word; register offsets must be multiples of this.
    pub fn word_bytes(&self) -> u64 {
        u64::from(self.data_width / 8)
    }
}
