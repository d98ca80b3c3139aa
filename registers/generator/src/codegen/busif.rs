// Licensed under the Apache-2.0 license

//! AXI4-Lite slave adapter.
//!
//! The adapter accepts one write and one read at a time. AW and W are
//! latched independently; the write is issued to the core once both are
//! held and no write response is pending, and the read once AR is held and
//! no read response is pending. The core answers with a combinational hit
//! flag, which selects OKAY or SLVERR for the response.
//!
//! Only the module name and the parameter defaults vary between tables.

use super::{group_lines, module_header, Port, AXI_SLAVE_PORTS, BUSIF_CORE_PORTS, CLOCK_PORTS};
use crate::config::BusConfig;
use crate::util::{join_ports, verilog_ident};

/// Generate the bus adapter module.
pub fn generate_busif(module_name: &str, bus: &BusConfig) -> String {
    let m = verilog_ident(module_name);

    let mut ports: Vec<String> = CLOCK_PORTS.iter().map(Port::decl).collect();
    ports.push(String::new());
    ports.push("    // AXI4-Lite (slave)".to_string());
    ports.extend(group_lines(AXI_SLAVE_PORTS, Port::decl));
    ports.push("    // Core-side interface".to_string());
    ports.extend(group_lines(BUSIF_CORE_PORTS, Port::decl));

    let mut output = String::new();
    output.push_str("// Generated register block: AXI4-Lite bus interface\n");
    output.push_str(&format!("// Module: {m}\n"));
    output.push_str("// - One outstanding read and one outstanding write\n");
    output.push_str("// - AW and W are captured independently; the write issues once both are held\n");
    output.push_str("// - Core hit flags select OKAY or SLVERR\n");
    output.push_str("// - Verilog-2001\n\n");
    output.push_str(&module_header(&m, bus));
    output.push_str(&join_ports(&ports));
    output.push_str("\n);\n");
    output.push_str(BUSIF_BODY);
    output
}

const BUSIF_BODY: &str = r#"
    initial begin
        if ((AXI_DATA_W % 8) != 0) begin
            $display("ERROR: AXI_DATA_W must be a multiple of 8. AXI_DATA_W=%0d", AXI_DATA_W);
            $finish;
        end
    end

    localparam integer AXI_STRB_W = AXI_DATA_W/8;

    // Byte strobes to bit mask
    function [AXI_DATA_W-1:0] strb_to_mask;
        input [AXI_STRB_W-1:0] strb;
        integer i;
        begin
            strb_to_mask = {AXI_DATA_W{1'b0}};
            for (i = 0; i < AXI_STRB_W; i = i + 1) begin
                strb_to_mask[i*8 +: 8] = {8{strb[i]}};
            end
        end
    endfunction

    // Request latches
    reg [AXI_ADDR_W-1:0]    awaddr_lat;
    reg [AXI_DATA_W-1:0]    wdata_lat;
    reg [AXI_STRB_W-1:0]    wstrb_lat;
    reg                     have_aw;
    reg                     have_w;

    reg [AXI_ADDR_W-1:0]    araddr_lat;
    reg                     have_ar;

    // Response state
    reg [1:0]               bresp_i;
    reg                     bvalid_i;

    reg [1:0]               rresp_i;
    reg                     rvalid_i;
    reg [AXI_DATA_W-1:0]    rdata_i;

    assign s_axi_bresp  = bresp_i;
    assign s_axi_bvalid = bvalid_i;

    assign s_axi_rresp  = rresp_i;
    assign s_axi_rvalid = rvalid_i;
    assign s_axi_rdata  = rdata_i;

    // Accept a request only while its latch is empty and no response is pending
    assign s_axi_awready = (~have_aw) & (~bvalid_i);
    assign s_axi_wready  = (~have_w)  & (~bvalid_i);
    assign s_axi_arready = (~have_ar) & (~rvalid_i);

    assign wr_addr = awaddr_lat;
    assign wr_data = wdata_lat;
    assign wr_mask = strb_to_mask(wstrb_lat);

    assign rd_addr = araddr_lat;

    wire do_write;
    wire do_read;

    assign do_write = have_aw & have_w & (~bvalid_i);
    assign do_read  = have_ar & (~rvalid_i);

    assign wr_en = do_write;
    assign rd_en = do_read;

    // AW / W capture
    always @(posedge clk) begin
        if (!reset_n) begin
            have_aw    <= 1'b0;
            have_w     <= 1'b0;
            awaddr_lat <= {AXI_ADDR_W{1'b0}};
            wdata_lat  <= {AXI_DATA_W{1'b0}};
            wstrb_lat  <= {AXI_STRB_W{1'b0}};
        end else begin
            if (s_axi_awvalid && s_axi_awready) begin
                awaddr_lat <= s_axi_awaddr;
                have_aw    <= 1'b1;
            end
            if (s_axi_wvalid && s_axi_wready) begin
                wdata_lat  <= s_axi_wdata;
                wstrb_lat  <= s_axi_wstrb;
                have_w     <= 1'b1;
            end

            // Release both latches once the write response is taken
            if (bvalid_i && s_axi_bready) begin
                have_aw <= 1'b0;
                have_w  <= 1'b0;
            end
        end
    end

    // B channel
    always @(posedge clk) begin
        if (!reset_n) begin
            bvalid_i <= 1'b0;
            bresp_i  <= 2'b00;
        end else begin
            if (bvalid_i && s_axi_bready) begin
                bvalid_i <= 1'b0;
                bresp_i  <= 2'b00;
            end

            if (do_write) begin
                bvalid_i <= 1'b1;
                bresp_i  <= (wr_hit ? 2'b00 : 2'b10); // OKAY : SLVERR
            end
        end
    end

    // AR capture
    always @(posedge clk) begin
        if (!reset_n) begin
            have_ar    <= 1'b0;
            araddr_lat <= {AXI_ADDR_W{1'b0}};
        end else begin
            if (s_axi_arvalid && s_axi_arready) begin
                araddr_lat <= s_axi_araddr;
                have_ar    <= 1'b1;
            end
            if (rvalid_i && s_axi_rready) begin
                have_ar <= 1'b0;
            end
        end
    end

    // R channel
    always @(posedge clk) begin
        if (!reset_n) begin
            rvalid_i <= 1'b0;
            rresp_i  <= 2'b00;
            rdata_i  <= {AXI_DATA_W{1'b0}};
        end else begin
            if (rvalid_i && s_axi_rready) begin
                rvalid_i <= 1'b0;
                rresp_i  <= 2'b00;
            end

            if (do_read) begin
                rvalid_i <= 1'b1;
                rdata_i  <= rd_data;
                rresp_i  <= (rd_hit ? 2'b00 : 2'b10); // OKAY : SLVERR
            end
        end
    end

endmodule
"#;
