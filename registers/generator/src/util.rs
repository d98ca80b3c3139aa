// Licensed under the Apache-2.0 license

//! Utility functions for name sanitizing, literal parsing and formatting.
//!
//! Every Verilog identifier the generators emit goes through [`verilog_ident`]
//! (or [`reg_token`] for register names), and every file name through
//! [`file_stem`].

use crate::error::{RegMapError, Result};

/// Sanitizes a name into a legal Verilog identifier.
///
/// - Surrounding whitespace is trimmed
/// - Every character outside `[A-Za-z0-9_]` becomes an underscore
/// - A name that does not start with a letter or underscore gets an
///   underscore prefix
/// - An empty name becomes `_`
///
/// # Examples
/// ```
/// use regblock_generator::util::verilog_ident;
/// assert_eq!(verilog_ident("gn common-test"), "gn_common_test");
/// assert_eq!(verilog_ident("3dma"), "_3dma");
/// assert_eq!(verilog_ident(""), "_");
/// ```
pub fn verilog_ident(name: &str) -> String {
    let mut result: String = name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if result.is_empty() {
        result.push('_');
    }
    if !result.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        result.insert(0, '_');
    }
    result
}

/// Identifier token for a register: the sanitized name, forced to uppercase.
///
/// The token is the shared suffix of the address parameter (`ADDR_<TOKEN>`),
/// the storage register (`r_<TOKEN>`) and the observation port (`w_<TOKEN>_o`).
///
/// # Examples
/// ```
/// use regblock_generator::util::reg_token;
/// assert_eq!(reg_token("reg_ctrl"), "REG_CTRL");
/// assert_eq!(reg_token("irq.status"), "IRQ_STATUS");
/// ```
pub fn reg_token(name: &str) -> String {
    verilog_ident(name).to_uppercase()
}

/// Sanitizes a name into a file stem.
///
/// Runs of characters outside `[A-Za-z0-9_]` collapse into a single
/// underscore. An empty result falls back to `regblock`.
///
/// # Examples
/// ```
/// use regblock_generator::util::file_stem;
/// assert_eq!(file_stem("gn  common/test"), "gn_common_test");
/// assert_eq!(file_stem("   "), "regblock");
/// ```
pub fn file_stem(name: &str) -> String {
    let mut result = String::new();
    let mut in_run = false;
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            result.push(c);
            in_run = false;
        } else if !in_run {
            result.push('_');
            in_run = true;
        }
    }
    if result.is_empty() {
        "regblock".to_string()
    } else {
        result
    }
}

/// Parses an integer cell.
///
/// Accepts a decimal literal or a `0x`-prefixed hexadecimal literal, either
/// optionally split with `_` separators and surrounded by whitespace.
///
/// # Examples
/// ```
/// use regblock_generator::util::parse_int;
/// assert_eq!(parse_int("42").unwrap(), 42);
/// assert_eq!(parse_int(" 0x1000_0000 ").unwrap(), 0x1000_0000);
/// assert!(parse_int("-1").is_err());
/// ```
pub fn parse_int(text: &str) -> Result<u64> {
    let invalid = || RegMapError::InvalidLiteral {
        literal: text.to_string(),
    };
    let trimmed = text.trim();
    let (digits, radix) = match trimmed.strip_prefix("0x") {
        Some(hex) if hex.chars().all(|c| c.is_ascii_hexdigit() || c == '_') => (hex, 16),
        Some(_) => return Err(invalid()),
        None if trimmed.chars().all(|c| c.is_ascii_digit() || c == '_') => (trimmed, 10),
        None => return Err(invalid()),
    };
    let digits: String = digits.chars().filter(|&c| c != '_').collect();
    if digits.is_empty() {
        return Err(invalid());
    }
    u64::from_str_radix(&digits, radix).map_err(|_| invalid())
}

/// Formats a value as a sized Verilog hex literal, zero-padded to the width.
///
/// # Examples
/// ```
/// use regblock_generator::util::hex_literal;
/// assert_eq!(hex_literal(1, 32), "32'h00000001");
/// assert_eq!(hex_literal(0xAB, 8), "8'hAB");
/// ```
pub fn hex_literal(value: u64, width: u32) -> String {
    let digits = width.div_ceil(4) as usize;
    format!("{width}'h{:0digits$X}", value & width_mask(width))
}

/// All-ones mask covering `width` bits.
pub fn width_mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// Joins port or connection lines with commas, leaving the last one bare.
///
/// Blank lines separate groups and comment lines (`// ...`) label them;
/// neither takes a comma. Leading, trailing and repeated blank lines are
/// dropped.
pub fn join_ports<S: AsRef<str>>(lines: &[S]) -> String {
    let lines: Vec<&str> = lines.iter().map(|l| l.as_ref().trim_end()).collect();
    let is_item = |l: &str| !l.is_empty() && !l.trim_start().starts_with("//");
    let Some(last) = lines.iter().rposition(|l| is_item(*l)) else {
        return String::new();
    };
    let mut out: Vec<String> = Vec::new();
    for (i, &line) in lines[..=last].iter().enumerate() {
        if line.is_empty() && out.last().map_or(true, |prev| prev.is_empty()) {
            continue;
        }
        if is_item(line) && i != last {
            out.push(format!("{line},"));
        } else {
            out.push(line.to_string());
        }
    }
    out.join("\n")
}
