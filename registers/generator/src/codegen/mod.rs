// Licensed under the Apache-2.0 license

//! Verilog generation for a register block.
//!
//! Three modules are generated from one [`RegisterMap`]:
//! - `busif`: the AXI4-Lite slave adapter (same shape for every table)
//! - `reg_core`: storage, address decode and per-access update logic
//! - `wrap`: instantiates both and forwards the observation outputs
//!
//! The port tables shared between the modules live here so that a signal
//! is declared, connected and wired from a single definition.

mod busif;
mod reg_core;
mod wrap;

pub use busif::generate_busif;
pub use reg_core::generate_core;
pub use wrap::generate_wrap;

use crate::config::{BusConfig, NameConfig};
use crate::error::Result;
use crate::loader::{load_register_map, LoadOptions};
use crate::model::{Register, RegisterMap};
use crate::output::{GeneratedModule, GeneratedRegBlock};
use log::info;
use std::path::Path;

/// One port of a generated module.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Port {
    pub dir: &'static str,
    pub kind: &'static str,
    pub range: &'static str,
    pub name: &'static str,
}

impl Port {
    const fn new(
        dir: &'static str,
        kind: &'static str,
        range: &'static str,
        name: &'static str,
    ) -> Self {
        Self {
            dir,
            kind,
            range,
            name,
        }
    }

    /// Port declaration line, columns aligned.
    pub fn decl(&self) -> String {
        port_decl(self.dir, self.kind, self.range, self.name)
    }

    /// Same signal declared as a local wire.
    pub fn wire(&self) -> String {
        format!("    wire {:<19} {};", self.range, self.name)
    }

    /// Named connection `.name(name)` for an instance.
    pub fn connect(&self) -> String {
        format!("        .{0}({0})", self.name)
    }

    /// The same signal seen from the other end of a connection.
    const fn flipped(&self, dir: &'static str, kind: &'static str) -> Self {
        Self::new(dir, kind, self.range, self.name)
    }
}

pub(crate) fn port_decl(dir: &str, kind: &str, range: &str, name: &str) -> String {
    format!("    {dir:<6} {kind:<4} {range:<19} {name}")
}

const ADDR: &str = "[AXI_ADDR_W-1:0]";
const DATA: &str = "[AXI_DATA_W-1:0]";
const STRB: &str = "[AXI_DATA_W/8-1:0]";
const RESP: &str = "[1:0]";

pub(crate) const CLOCK_PORTS: &[Port] = &[
    Port::new("input", "wire", "", "clk"),
    Port::new("input", "wire", "", "reset_n"),
];

/// AXI4-Lite slave channels, one group per channel (AW, W, B, AR, R).
pub(crate) const AXI_SLAVE_PORTS: &[&[Port]] = &[
    &[
        Port::new("input", "wire", ADDR, "s_axi_awaddr"),
        Port::new("input", "wire", "", "s_axi_awvalid"),
        Port::new("output", "wire", "", "s_axi_awready"),
    ],
    &[
        Port::new("input", "wire", DATA, "s_axi_wdata"),
        Port::new("input", "wire", STRB, "s_axi_wstrb"),
        Port::new("input", "wire", "", "s_axi_wvalid"),
        Port::new("output", "wire", "", "s_axi_wready"),
    ],
    &[
        Port::new("output", "wire", RESP, "s_axi_bresp"),
        Port::new("output", "wire", "", "s_axi_bvalid"),
        Port::new("input", "wire", "", "s_axi_bready"),
    ],
    &[
        Port::new("input", "wire", ADDR, "s_axi_araddr"),
        Port::new("input", "wire", "", "s_axi_arvalid"),
        Port::new("output", "wire", "", "s_axi_arready"),
    ],
    &[
        Port::new("output", "wire", DATA, "s_axi_rdata"),
        Port::new("output", "wire", RESP, "s_axi_rresp"),
        Port::new("output", "wire", "", "s_axi_rvalid"),
        Port::new("input", "wire", "", "s_axi_rready"),
    ],
];

const WR_EN: Port = Port::new("output", "wire", "", "wr_en");
const WR_ADDR: Port = Port::new("output", "wire", ADDR, "wr_addr");
const WR_DATA: Port = Port::new("output", "wire", DATA, "wr_data");
const WR_MASK: Port = Port::new("output", "wire", DATA, "wr_mask");
const WR_HIT: Port = Port::new("input", "wire", "", "wr_hit");
const RD_EN: Port = Port::new("output", "wire", "", "rd_en");
const RD_ADDR: Port = Port::new("output", "wire", ADDR, "rd_addr");
const RD_DATA: Port = Port::new("input", "wire", DATA, "rd_data");
const RD_HIT: Port = Port::new("input", "wire", "", "rd_hit");

/// Adapter-to-core request/response signals, as the adapter declares them.
/// Groups: write path, read path.
pub(crate) const BUSIF_CORE_PORTS: &[&[Port]] = &[
    &[WR_EN, WR_ADDR, WR_DATA, WR_MASK, WR_HIT],
    &[RD_EN, RD_ADDR, RD_DATA, RD_HIT],
];

/// The same signals as the core declares them. Hit flags and read data are
/// driven from combinational `always` blocks.
pub(crate) const CORE_BUS_PORTS: &[&[Port]] = &[
    &[
        WR_EN.flipped("input", "wire"),
        WR_ADDR.flipped("input", "wire"),
        WR_DATA.flipped("input", "wire"),
        WR_MASK.flipped("input", "wire"),
        WR_HIT.flipped("output", "reg"),
    ],
    &[
        RD_EN.flipped("input", "wire"),
        RD_ADDR.flipped("input", "wire"),
        RD_DATA.flipped("output", "reg"),
        RD_HIT.flipped("output", "reg"),
    ],
];

/// `module <name> #(...)(` with the bus widths as parameter defaults.
pub(crate) fn module_header(name: &str, bus: &BusConfig) -> String {
    format!(
        "module {name} #(\n    parameter integer AXI_ADDR_W = {},\n    parameter integer AXI_DATA_W = {}\n)(\n",
        bus.addr_width, bus.data_width
    )
}

/// Flattens port groups into lines, a blank line between groups.
pub(crate) fn group_lines(groups: &[&[Port]], line: impl Fn(&Port) -> String) -> Vec<String> {
    let mut lines = Vec::new();
    for group in groups {
        lines.extend(group.iter().map(&line));
        lines.push(String::new());
    }
    lines
}

/// Observation output declaration for one register.
pub(crate) fn observation_port(register: &Register) -> String {
    port_decl("output", "wire", DATA, &register.output_port())
}

/// Generate all three modules for a validated register map.
pub fn generate_reg_block(map: &RegisterMap, names: &NameConfig) -> GeneratedRegBlock {
    let busif = GeneratedModule {
        name: names.busif_module(),
        file_name: names.busif_file(),
        text: generate_busif(&names.busif_module(), map.bus()),
    };
    let core = GeneratedModule {
        name: names.core_module(),
        file_name: names.core_file(),
        text: generate_core(&names.core_module(), map),
    };
    let wrap = GeneratedModule {
        name: names.wrap_module(),
        file_name: names.wrap_file(),
        text: generate_wrap(
            &names.wrap_module(),
            &names.busif_module(),
            &names.core_module(),
            map,
        ),
    };
    info!(
        "Generated {}, {} and {} for {} registers",
        busif.name,
        core.name,
        wrap.name,
        map.len()
    );
    GeneratedRegBlock {
        busif,
        core,
        wrap,
        register_count: map.len(),
    }
}

/// Load a CSV register table and generate all three modules.
///
/// Nothing is generated unless the whole table loads and validates.
pub fn generate_reg_block_from_file(
    csv: &Path,
    names: &NameConfig,
    bus: &BusConfig,
    options: &LoadOptions,
) -> Result<GeneratedRegBlock> {
    let map = load_register_map(csv, bus, options)?;
    Ok(generate_reg_block(&map, names))
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
