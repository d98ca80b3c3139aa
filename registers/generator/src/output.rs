// Licensed under the Apache-2.0 license

//! Generated output types and writing them to disk.
//!
//! ```text
//! RegisterMap → GeneratedRegBlock
//!               ├── busif  → <base>_reg_busif.v
//!               ├── core   → <base>_reg_core.v
//!               └── wrap   → <base>_reg_wrap.v
//! ```

use crate::error::Result;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// One generated Verilog module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedModule {
    /// Module name as declared in the text.
    pub name: String,
    /// File name, without directory.
    pub file_name: String,
    /// Complete Verilog source.
    pub text: String,
}

/// The three modules of one register block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedRegBlock {
    pub busif: GeneratedModule,
    pub core: GeneratedModule,
    pub wrap: GeneratedModule,
    /// Number of registers in the source map.
    pub register_count: usize,
}

/// Paths of the files written for a register block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrittenFiles {
    pub wrap: PathBuf,
    pub busif: PathBuf,
    pub core: PathBuf,
}

impl WrittenFiles {
    /// Paths in reporting order: wrapper, adapter, core.
    pub fn paths(&self) -> [&Path; 3] {
        [&self.wrap, &self.busif, &self.core]
    }
}

impl GeneratedRegBlock {
    /// Modules in dependency order: adapter, core, wrapper.
    pub fn modules(&self) -> [&GeneratedModule; 3] {
        [&self.busif, &self.core, &self.wrap]
    }

    /// Write all three modules into `dir`, creating it if needed.
    pub fn write_to_dir(&self, dir: &Path) -> Result<WrittenFiles> {
        fs::create_dir_all(dir)?;
        let write = |module: &GeneratedModule| -> Result<PathBuf> {
            let path = dir.join(&module.file_name);
            fs::write(&path, &module.text)?;
            debug!("Wrote {} ({} bytes)", path.display(), module.text.len());
            Ok(path)
        };
        let busif = write(&self.busif)?;
        let core = write(&self.core)?;
        let wrap = write(&self.wrap)?;
        Ok(WrittenFiles { wrap, busif, core })
    }
}
