// Licensed under the Apache-2.0 license

//! Wrapper module: bus adapter and register core wired together.
//!
//! The adapter/core request signals stay internal. The wrapper exposes the
//! AXI4-Lite slave ports and one observation output per register, in
//! register map order.

use super::{
    group_lines, module_header, observation_port, Port, AXI_SLAVE_PORTS, BUSIF_CORE_PORTS,
    CLOCK_PORTS,
};
use crate::model::RegisterMap;
use crate::util::{join_ports, verilog_ident};
use std::fmt::Write;

/// Generate the wrapper module instantiating `busif_module` and `core_module`.
pub fn generate_wrap(
    module_name: &str,
    busif_module: &str,
    core_module: &str,
    map: &RegisterMap,
) -> String {
    let mw = verilog_ident(module_name);
    let mb = verilog_ident(busif_module);
    let mc = verilog_ident(core_module);

    let mut ports: Vec<String> = CLOCK_PORTS.iter().map(Port::decl).collect();
    ports.push(String::new());
    ports.extend(group_lines(AXI_SLAVE_PORTS, Port::decl));
    ports.extend(map.iter().map(observation_port));

    let mut output = String::new();
    output.push_str("// Generated register block: wrapper\n");
    writeln!(output, "// Module: {mw}").unwrap();
    output.push_str("// Instantiates:\n");
    writeln!(output, "//  - {mb} (AXI4-Lite bus interface)").unwrap();
    writeln!(output, "//  - {mc} (register core)").unwrap();
    output.push('\n');
    output.push_str(&module_header(&mw, map.bus()));
    output.push_str(&join_ports(&ports));
    output.push_str("\n);\n\n");

    // Internal adapter <-> core signals
    for line in group_lines(BUSIF_CORE_PORTS, Port::wire) {
        output.push_str(&line);
        output.push('\n');
    }

    let clock_conns: Vec<String> = CLOCK_PORTS.iter().map(Port::connect).collect();

    let mut busif_conns = clock_conns.clone();
    busif_conns.push(String::new());
    busif_conns.extend(group_lines(AXI_SLAVE_PORTS, Port::connect));
    busif_conns.extend(group_lines(BUSIF_CORE_PORTS, Port::connect));
    output.push_str(&instance(&mb, "u_busif", &busif_conns));
    output.push('\n');

    let mut core_conns = clock_conns;
    core_conns.push(String::new());
    core_conns.extend(group_lines(BUSIF_CORE_PORTS, Port::connect));
    core_conns.extend(map.iter().map(|reg| format!("        .{0}({0})", reg.output_port())));
    output.push_str(&instance(&mc, "u_core", &core_conns));

    output.push_str("\nendmodule\n");
    output
}

/// Parameterized instance with named connections.
fn instance(module: &str, instance: &str, connections: &[String]) -> String {
    let mut text = String::new();
    writeln!(text, "    {module} #(").unwrap();
    text.push_str("        .AXI_ADDR_W(AXI_ADDR_W),\n");
    text.push_str("        .AXI_DATA_W(AXI_DATA_W)\n");
    writeln!(text, "    ) {instance} (").unwrap();
    text.push_str(&join_ports(connections));
    text.push_str("\n    );\n");
    text
}
