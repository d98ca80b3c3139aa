// Licensed under the Apache-2.0 license

//! Generate a register block from a CSV table and write it out.

use anyhow::{Context, Result};
use log::info;
use regblock_generator::{
    generate_reg_block_from_file, BusConfig, GeneratedRegBlock, LoadOptions, NameConfig,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Command-line values; `None` falls back to the config file, then defaults.
#[derive(Debug, Default)]
pub struct Args {
    pub csv: PathBuf,
    pub base: Option<String>,
    pub outdir: Option<PathBuf>,
    pub addr_width: Option<u32>,
    pub data_width: Option<u32>,
    pub config: Option<PathBuf>,
    pub strict: bool,
    pub check: bool,
}

/// Contents of a `--config` TOML file.
///
/// ```toml
/// [names]
/// base = "gn_common_test"
///
/// [bus]
/// addr_width = 16
/// data_width = 32
///
/// [load]
/// reject_duplicate_offsets = true
/// ```
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct GenConfig {
    pub names: NameConfig,
    pub bus: BusConfig,
    pub load: LoadOptions,
    pub outdir: Option<PathBuf>,
}

impl GenConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Flags given on the command line replace file values.
    fn apply(mut self, args: &Args) -> Self {
        if let Some(base) = &args.base {
            self.names = NameConfig::new(base);
        }
        if let Some(outdir) = &args.outdir {
            self.outdir = Some(outdir.clone());
        }
        if let Some(width) = args.addr_width {
            self.bus.addr_width = width;
        }
        if let Some(width) = args.data_width {
            self.bus.data_width = width;
        }
        if args.strict {
            self.load.reject_duplicate_offsets = true;
        }
        self
    }
}

pub fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => GenConfig::from_file(path)?,
        None => GenConfig::default(),
    }
    .apply(args);
    let outdir = config.outdir.clone().unwrap_or_else(|| PathBuf::from("."));

    info!(
        "Generating {} from {} (AXI_ADDR_W={}, AXI_DATA_W={})",
        config.names.base,
        args.csv.display(),
        config.bus.addr_width,
        config.bus.data_width
    );
    let block = generate_reg_block_from_file(&args.csv, &config.names, &config.bus, &config.load)?;

    if args.check {
        print_check(&block);
        return Ok(());
    }

    let written = block
        .write_to_dir(&outdir)
        .with_context(|| format!("failed to write output to {}", outdir.display()))?;
    println!("Generated:");
    for path in written.paths() {
        println!("    {}", path.display());
    }
    println!("Registers: {}", block.register_count);
    Ok(())
}

fn print_check(block: &GeneratedRegBlock) {
    println!("Check passed, no files written:");
    for module in [&block.wrap, &block.busif, &block.core] {
        println!("    {} ({} bytes)", module.file_name, module.text.len());
    }
    println!("Registers: {}", block.register_count);
}
