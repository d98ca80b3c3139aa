// Licensed under the Apache-2.0 license

//! Tests for the Verilog generators.

mod test {
    use super::super::{generate_busif, generate_core, generate_reg_block, generate_wrap};
    use crate::config::{BusConfig, NameConfig};
    use crate::loader::{load_register_map_from_reader, LoadOptions};
    use crate::model::RegisterMap;

    const HEADER: &str = "name,offset,access,reset,field,lsb,msb,desc\n";

    fn map(body: &str) -> RegisterMap {
        let table = format!("{HEADER}{body}");
        load_register_map_from_reader(
            table.as_bytes(),
            &BusConfig::default(),
            &LoadOptions::default(),
        )
        .unwrap()
    }

    fn mixed_map() -> RegisterMap {
        map(concat!(
            "STATUS,0x8,W1C,0,ERR,0,0,Error flag\n",
            "REG_CTRL,0x0,RW,0x1,EN,0,0,Enable\n",
            "REG_CTRL,0x0,RW,0x1,MODE,1,2,Mode select\n",
            "VERSION,0x4,RO,0x00010002,,,,\n",
            "KICK,0xC,WO,0,GO,0,0,\n",
        ))
    }

    /// Index of the first line containing `needle`.
    fn line_of(text: &str, needle: &str) -> usize {
        text.lines()
            .position(|l| l.contains(needle))
            .unwrap_or_else(|| panic!("`{needle}` not found"))
    }

    #[test]
    fn test_single_rw_register() {
        let map = map("REG_CTRL,0x0000,RW,0x00000001,EN,0,0,Enable\n");
        let core = generate_core("periph_reg_core", &map);

        assert!(core.contains("module periph_reg_core #("));
        assert!(core.contains("localparam [AXI_ADDR_W-1:0] ADDR_REG_CTRL = 32'h00000000;"));
        assert!(core.contains("reg [AXI_DATA_W-1:0] r_REG_CTRL;"));
        assert!(core.contains("r_REG_CTRL <= 32'h00000001;"));
        assert!(core.contains("end else if (wr_en && (wr_addr == ADDR_REG_CTRL)) begin"));
        assert!(core.contains("r_REG_CTRL <= (r_REG_CTRL & ~wr_mask) | (wr_data & wr_mask);"));
        assert!(core.contains("ADDR_REG_CTRL: rd_data = r_REG_CTRL;"));
        assert!(core.contains("ADDR_REG_CTRL: wr_hit = 1'b1;"));
        assert!(core.contains("ADDR_REG_CTRL: rd_hit = 1'b1;"));
        assert!(core.contains("assign w_REG_CTRL_o = r_REG_CTRL;"));
        assert!(core.contains("    //   - EN[0]: Enable"));
        assert!(core.trim_end().ends_with("endmodule"));
    }

    #[test]
    fn test_access_kinds() {
        let core = generate_core("m", &mixed_map());

        // W1C clears only written ones in enabled lanes
        assert!(core.contains("r_STATUS <= r_STATUS & ~(wr_data & wr_mask);"));
        // RO storage has a reset branch and no write branch
        assert!(!core.contains("wr_addr == ADDR_VERSION"));
        assert!(core.contains("r_VERSION <= 32'h00010002;"));
        assert!(core.contains("ADDR_VERSION: rd_data = r_VERSION;"));
        // RO still acknowledges writes
        assert!(core.contains("ADDR_VERSION: wr_hit = 1'b1;"));
        // WO reads as zero
        assert!(core.contains("ADDR_KICK: rd_data = {AXI_DATA_W{1'b0}};"));
        assert!(!core.contains("rd_data = r_KICK"));
        assert!(core.contains("r_KICK <= (r_KICK & ~wr_mask) | (wr_data & wr_mask);"));
    }

    #[test]
    fn test_address_order() {
        let core = generate_core("m", &mixed_map());
        let order = ["ADDR_REG_CTRL =", "ADDR_VERSION =", "ADDR_STATUS =", "ADDR_KICK ="];
        let lines: Vec<usize> = order.iter().map(|n| line_of(&core, n)).collect();
        assert!(lines.windows(2).all(|w| w[0] < w[1]), "{lines:?}");

        let wrap = generate_wrap("w", "b", "c", &mixed_map());
        let ports = ["w_REG_CTRL_o", "w_VERSION_o", "w_STATUS_o", "w_KICK_o"];
        let lines: Vec<usize> = ports.iter().map(|n| line_of(&wrap, n)).collect();
        assert!(lines.windows(2).all(|w| w[0] < w[1]), "{lines:?}");
    }

    #[test]
    fn test_cross_module_names() {
        let map = mixed_map();
        let block = generate_reg_block(&map, &NameConfig::new("periph"));

        assert_eq!(block.register_count, 4);
        assert_eq!(block.busif.name, "periph_reg_busif");
        assert_eq!(block.core.file_name, "periph_reg_core.v");
        assert!(block.wrap.text.contains("periph_reg_busif #("));
        assert!(block.wrap.text.contains("periph_reg_core #("));

        for reg in &map {
            assert!(block.core.text.contains(&format!("{} =", reg.addr_param())));
            let decl = |text: &str| {
                text.lines().any(|l| {
                    l.starts_with("    output wire")
                        && l.trim_end_matches(',').ends_with(&reg.output_port())
                })
            };
            assert!(decl(&block.core.text), "{} not declared in core", reg.name);
            assert!(decl(&block.wrap.text), "{} not declared in wrap", reg.name);
            let conn = format!(".{0}({0})", reg.output_port());
            assert!(block.wrap.text.contains(&conn), "missing {conn}");
        }

        // Every adapter/core signal is wired in the wrapper
        for signal in [
            "wr_en", "wr_addr", "wr_data", "wr_mask", "wr_hit", "rd_en", "rd_addr", "rd_data",
            "rd_hit",
        ] {
            assert!(block.busif.text.contains(signal));
            assert!(block.core.text.contains(signal));
            assert_eq!(
                block.wrap.text.matches(&format!(".{0}({0})", signal)).count(),
                2,
                "{signal}"
            );
        }
    }

    #[test]
    fn test_busif_independent_of_table() {
        let bus = BusConfig::default();
        let a = generate_busif("a_reg_busif", &bus);
        let b = generate_busif("b_reg_busif", &bus);
        assert_eq!(a.replace("a_reg_busif", "X"), b.replace("b_reg_busif", "X"));

        assert!(a.contains("bresp_i  <= (wr_hit ? 2'b00 : 2'b10);"));
        assert!(a.contains("rresp_i  <= (rd_hit ? 2'b00 : 2'b10);"));
    }

    #[test]
    fn test_busif_handshake() {
        let busif = generate_busif("periph_reg_busif", &BusConfig::default());
        let has = |line: &str| {
            assert!(
                busif.lines().any(|l| l.trim() == line),
                "missing `{line}`"
            )
        };

        // Ready only while the latch is empty and no response is pending
        has("assign s_axi_awready = (~have_aw) & (~bvalid_i);");
        has("assign s_axi_wready  = (~have_w)  & (~bvalid_i);");
        has("assign s_axi_arready = (~have_ar) & (~rvalid_i);");

        // One outstanding write and one outstanding read
        has("assign do_write = have_aw & have_w & (~bvalid_i);");
        has("assign do_read  = have_ar & (~rvalid_i);");
        has("assign wr_en = do_write;");
        has("assign rd_en = do_read;");
        has("assign wr_mask = strb_to_mask(wstrb_lat);");

        // Capture on valid && ready
        has("if (s_axi_awvalid && s_axi_awready) begin");
        has("if (s_axi_wvalid && s_axi_wready) begin");
        has("if (s_axi_arvalid && s_axi_arready) begin");

        // Latches release when the response is accepted
        let release_w = line_of(&busif, "if (bvalid_i && s_axi_bready) begin");
        let lines: Vec<&str> = busif.lines().collect();
        assert_eq!(lines[release_w + 1].trim(), "have_aw <= 1'b0;");
        assert_eq!(lines[release_w + 2].trim(), "have_w  <= 1'b0;");
        let release_r = line_of(&busif, "if (rvalid_i && s_axi_rready) begin");
        assert_eq!(lines[release_r + 1].trim(), "have_ar <= 1'b0;");

        // Reset clears every latch and response
        for reset in [
            "have_aw    <= 1'b0;",
            "have_w     <= 1'b0;",
            "awaddr_lat <= {AXI_ADDR_W{1'b0}};",
            "wdata_lat  <= {AXI_DATA_W{1'b0}};",
            "wstrb_lat  <= {AXI_STRB_W{1'b0}};",
            "bvalid_i <= 1'b0;",
            "bresp_i  <= 2'b00;",
            "have_ar    <= 1'b0;",
            "araddr_lat <= {AXI_ADDR_W{1'b0}};",
            "rvalid_i <= 1'b0;",
            "rresp_i  <= 2'b00;",
            "rdata_i  <= {AXI_DATA_W{1'b0}};",
        ] {
            has(reset);
        }
        assert_eq!(busif.matches("if (!reset_n) begin").count(), 4);
    }

    #[test]
    fn test_field_comments() {
        let core = generate_core("m", &mixed_map());
        assert!(core.contains("    // REG_CTRL @0x0000 [RW] reset=32'h00000001"));
        assert!(core.contains("    //   - MODE[2:1]: Mode select"));
        assert!(core.contains("    // VERSION @0x0004 [RO] reset=32'h00010002"));
    }

    #[test]
    fn test_bus_widths_as_parameter_defaults() {
        let map = load_register_map_from_reader(
            format!("{HEADER}WIDE,0x8,RW,0x1,,,,\n").as_bytes(),
            &BusConfig::new(16, 64).unwrap(),
            &LoadOptions::default(),
        )
        .unwrap();
        let block = generate_reg_block(&map, &NameConfig::new("w"));
        for module in block.modules() {
            assert!(module.text.contains("parameter integer AXI_ADDR_W = 16,"));
            assert!(module.text.contains("parameter integer AXI_DATA_W = 64"));
        }
        assert!(block.core.text.contains("ADDR_WIDE = 16'h0008;"));
        assert!(block.core.text.contains("r_WIDE <= 64'h0000000000000001;"));
    }

    #[test]
    fn test_no_dangling_commas() {
        let block = generate_reg_block(&mixed_map(), &NameConfig::new("periph"));
        for module in block.modules() {
            let lines: Vec<&str> = module.text.lines().collect();
            for (i, line) in lines.iter().enumerate() {
                if line.trim_end().ends_with(',') {
                    let next = lines[i + 1..]
                        .iter()
                        .find(|l| !l.trim().is_empty() && !l.trim_start().starts_with("//"))
                        .unwrap();
                    assert!(
                        !next.trim_start().starts_with(')'),
                        "{}: comma before close at line {}",
                        module.name,
                        i + 1
                    );
                }
            }
        }
    }

    #[test]
    fn test_empty_map() {
        let map = map("");
        assert!(map.is_empty());
        let block = generate_reg_block(&map, &NameConfig::new("empty"));
        assert!(block.core.text.contains("default: rd_data = {AXI_DATA_W{1'b0}};"));
        assert!(block.core.text.contains("default: wr_hit = 1'b0;"));
        assert!(block.wrap.text.contains(".rd_hit(rd_hit)\n    );"));
        assert_eq!(block.register_count, 0);
    }

    #[test]
    fn test_sanitized_names() {
        let map = map("ctrl-reg.0,0x0,RW,0,,,,\n");
        let block = generate_reg_block(&map, &NameConfig::new("My Periph"));
        assert_eq!(block.wrap.name, "My_Periph_reg_wrap");
        assert_eq!(block.wrap.file_name, "My_Periph_reg_wrap.v");
        assert!(block.core.text.contains("ADDR_CTRL_REG_0"));
        assert!(block.wrap.text.contains("w_CTRL_REG_0_o"));
    }
}
