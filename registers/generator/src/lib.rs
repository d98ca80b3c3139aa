// Licensed under the Apache-2.0 license

//! CSV register table to Verilog register block generator.
//!
//! This crate turns a tabular register map into three Verilog-2001 modules:
//! an AXI4-Lite slave adapter, a register core holding the storage and
//! access logic, and a wrapper connecting the two.
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use regblock_generator::{
//!     generate_reg_block_from_file, BusConfig, LoadOptions, NameConfig,
//! };
//!
//! let block = generate_reg_block_from_file(
//!     Path::new("regs.csv"),
//!     &NameConfig::new("my_periph"),
//!     &BusConfig::default(),
//!     &LoadOptions::default(),
//! ).unwrap();
//! block.write_to_dir(Path::new("rtl")).unwrap();
//! ```
//!
//! ## Module Organization
//!
//! - [`util`]: Identifier sanitizing, literal parsing, formatting
//! - [`config`]: Naming ([`NameConfig`]) and bus geometry ([`BusConfig`])
//! - [`model`]: Registers, fields and access semantics
//! - [`validate`]: Field, register and map validation rules
//! - [`loader`]: CSV loading into a [`RegisterMap`]
//! - [`output`]: Generated modules and writing them out
//! - [`error`]: [`RegMapError`]

pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod output;
pub mod util;
pub mod validate;

mod codegen;

// Re-export main public API
pub use codegen::{
    generate_busif, generate_core, generate_reg_block, generate_reg_block_from_file,
    generate_wrap,
};
pub use config::{BusConfig, NameConfig};
pub use error::{RegMapError, Result};
pub use loader::{load_register_map, load_register_map_from_reader, LoadOptions, RawRow};
pub use model::{AccessKind, Field, Register, RegisterMap};
pub use output::{GeneratedModule, GeneratedRegBlock, WrittenFiles};
