// Licensed under the Apache-2.0 license

use clap::{ArgAction, Parser};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::path::PathBuf;

mod reg_gen;

#[derive(Parser, Debug)]
#[command(
    name = "regblock-gen",
    author,
    version,
    about = "Generate reg_wrap/reg_busif/reg_core Verilog modules from a CSV register table"
)]
struct Cli {
    /// Input CSV (one row per register field)
    #[arg(value_name = "CSV")]
    csv: PathBuf,

    /// Base name for modules and files (e.g. gn_common_test) [default: regblock]
    #[arg(long, value_name = "NAME")]
    base: Option<String>,

    /// Output directory, created if missing [default: .]
    #[arg(long, value_name = "DIR")]
    outdir: Option<PathBuf>,

    /// AXI address width in bits [default: 32]
    #[arg(long, value_name = "N")]
    addr_width: Option<u32>,

    /// AXI data width in bits, a multiple of 8 [default: 32]
    #[arg(long, value_name = "N")]
    data_width: Option<u32>,

    /// TOML file with [names], [bus] and [load] tables; flags override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Reject registers sharing an offset instead of warning
    #[arg(long)]
    strict: bool,

    /// Validate and generate without writing any file
    #[arg(long)]
    check: bool,

    /// More log output (repeatable)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = SimpleLogger::new().with_level(cli.log_level()).init() {
        eprintln!("warning: logger unavailable: {e}");
    }

    if let Err(e) = reg_gen::run(&reg_gen::Args {
        csv: cli.csv,
        base: cli.base,
        outdir: cli.outdir,
        addr_width: cli.addr_width,
        data_width: cli.data_width,
        config: cli.config,
        strict: cli.strict,
        check: cli.check,
    }) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
