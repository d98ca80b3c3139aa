// Licensed under the Apache-2.0 license

//! Register core: storage, write update, read mux and hit decode.
//!
//! Naming, per register token `T`:
//! - `ADDR_T`: byte address parameter
//! - `r_T`: storage register
//! - `w_T_o`: observation output
//!
//! Writes get one `always` block per register. Reads and hits are decoded
//! with combinational `case` statements over the exact register addresses.

use super::{group_lines, module_header, observation_port, Port, CLOCK_PORTS, CORE_BUS_PORTS};
use crate::model::{Register, RegisterMap};
use crate::util::{hex_literal, join_ports, verilog_ident};
use std::fmt::Write;

const ZERO_WORD: &str = "{AXI_DATA_W{1'b0}}";

/// Generate the register core module.
pub fn generate_core(module_name: &str, map: &RegisterMap) -> String {
    let m = verilog_ident(module_name);
    let data_width = map.bus().data_width;
    let addr_width = map.bus().addr_width;

    let mut ports: Vec<String> = CLOCK_PORTS.iter().map(Port::decl).collect();
    ports.push(String::new());
    ports.extend(group_lines(CORE_BUS_PORTS, Port::decl));
    ports.extend(map.iter().map(observation_port));

    let mut output = String::new();
    output.push_str("// Generated register block: register core\n");
    writeln!(output, "// Module: {m}").unwrap();
    output.push_str("// - Storage registers: r_<REG>\n");
    output.push_str("// - Observation outputs: w_<REG>_o\n");
    output.push_str("// - Writes: one always block per register\n");
    output.push_str("// - Reads and hits: combinational address decode\n");
    output.push_str("// - Verilog-2001\n\n");
    output.push_str(&module_header(&m, map.bus()));
    output.push_str(&join_ports(&ports));
    output.push_str("\n);\n\n");

    // Register summary
    for reg in map {
        writeln!(
            output,
            "    // {} @0x{:04X} [{}] reset={}",
            reg.token(),
            reg.offset,
            reg.access,
            hex_literal(reg.reset, data_width)
        )
        .unwrap();
        for field in &reg.fields {
            let desc = field.description.replace(['\r', '\n'], " ");
            writeln!(
                output,
                "    //   - {}{}: {}",
                field.name,
                field.range_str(),
                desc.trim()
            )
            .unwrap();
        }
    }
    output.push('\n');

    for reg in map {
        writeln!(
            output,
            "    localparam [AXI_ADDR_W-1:0] {} = {};",
            reg.addr_param(),
            hex_literal(reg.offset, addr_width)
        )
        .unwrap();
    }
    output.push('\n');

    output.push_str("    // Storage\n");
    for reg in map {
        writeln!(output, "    reg [AXI_DATA_W-1:0] {};", reg.storage_name()).unwrap();
    }
    output.push('\n');

    output.push_str("    // Observation outputs\n");
    for reg in map {
        writeln!(
            output,
            "    assign {} = {};",
            reg.output_port(),
            reg.storage_name()
        )
        .unwrap();
    }
    output.push('\n');

    for reg in map {
        output.push_str(&write_block(reg, data_width));
        output.push('\n');
    }

    output.push_str(&read_mux(map));
    output.push('\n');
    output.push_str(&hit_decode("wr_hit", "wr_addr", map));
    output.push('\n');
    output.push_str(&hit_decode("rd_hit", "rd_addr", map));
    output.push_str("\nendmodule\n");
    output
}

/// Reset and write-update logic for one register.
fn write_block(reg: &Register, data_width: u32) -> String {
    let storage = reg.storage_name();
    let reset = hex_literal(reg.reset, data_width);
    let mut block = String::new();
    match reg.access.update_expr(&storage, "wr_data", "wr_mask") {
        Some(next) => {
            writeln!(block, "    // {} ({})", reg.token(), reg.access).unwrap();
            block.push_str("    always @(posedge clk) begin\n");
            block.push_str("        if (!reset_n) begin\n");
            writeln!(block, "            {storage} <= {reset};").unwrap();
            writeln!(
                block,
                "        end else if (wr_en && (wr_addr == {})) begin",
                reg.addr_param()
            )
            .unwrap();
            writeln!(block, "            {storage} <= {next};").unwrap();
            block.push_str("        end\n");
            block.push_str("    end\n");
        }
        None => {
            writeln!(
                block,
                "    // {} ({}): write hits are acknowledged, storage holds",
                reg.token(),
                reg.access
            )
            .unwrap();
            block.push_str("    always @(posedge clk) begin\n");
            block.push_str("        if (!reset_n) begin\n");
            writeln!(block, "            {storage} <= {reset};").unwrap();
            block.push_str("        end\n");
            block.push_str("    end\n");
        }
    }
    block
}

/// Read data mux. Write-only registers and unknown addresses read as zero.
fn read_mux(map: &RegisterMap) -> String {
    let mut mux = String::new();
    mux.push_str("    // Read mux (combinational)\n");
    mux.push_str("    always @(*) begin\n");
    writeln!(mux, "        rd_data = {ZERO_WORD};").unwrap();
    mux.push_str("        case (rd_addr)\n");
    for reg in map {
        let value = if reg.access.is_readable() {
            reg.storage_name()
        } else {
            ZERO_WORD.to_string()
        };
        writeln!(mux, "            {}: rd_data = {value};", reg.addr_param()).unwrap();
    }
    writeln!(mux, "            default: rd_data = {ZERO_WORD};").unwrap();
    mux.push_str("        endcase\n");
    mux.push_str("    end\n");
    mux
}

/// Exact-match address decode driving a hit flag.
fn hit_decode(flag: &str, addr: &str, map: &RegisterMap) -> String {
    let mut decode = String::new();
    writeln!(decode, "    // {flag} decode (combinational)").unwrap();
    decode.push_str("    always @(*) begin\n");
    writeln!(decode, "        {flag} = 1'b0;").unwrap();
    writeln!(decode, "        case ({addr})").unwrap();
    for reg in map {
        writeln!(decode, "            {}: {flag} = 1'b1;", reg.addr_param()).unwrap();
    }
    writeln!(decode, "            default: {flag} = 1'b0;").unwrap();
    decode.push_str("        endcase\n");
    decode.push_str("    end\n");
    decode
}
