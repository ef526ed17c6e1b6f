//! The `error` module defines [`EditorError`], the narrow set of recoverable input
//! problems the editor can run into:
//! 1. A byte typed into the edit field is not valid hex.
//! 2. The "goto" field holds something that is not a hex address.
//! 3. An address points outside of the backing store.
//!
//! None of these ever reach the user. The editor logs them and leaves the display unchanged.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    /// Edit buffer does not hold a hexadecimal byte
    #[error("Invalid hex byte: {0:?}")]
    InvalidHexByte(String),
    /// Goto field does not hold a hexadecimal address
    #[error("Invalid address: {0:?}")]
    InvalidAddress(String),
    /// Address is outside of `[base, base + size)`
    #[error("Address 0x{addr:X} is out of range (size 0x{size:X})")]
    AddressOutOfRange { addr: usize, size: usize },
}

/// Parse the content of the byte edit buffer.
///
/// Accepts one or two hex digits, surrounding whitespace is ignored.
///
/// # Errors
/// Returns [`EditorError::InvalidHexByte`] if the buffer is empty, too long or not hex.
pub fn parse_hex_byte(input: &str) -> Result<u8, EditorError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.len() > 2 {
        return Err(EditorError::InvalidHexByte(input.to_string()));
    }
    u8::from_str_radix(trimmed, 16).map_err(|_| EditorError::InvalidHexByte(input.to_string()))
}

/// Parse the content of the "goto" field into an offset into the backing store.
///
/// The typed address is a display address, so `base_display_addr` is subtracted from it.
///
/// # Errors
/// - Returns [`EditorError::InvalidAddress`] if the input is not a hex number
/// - Returns [`EditorError::AddressOutOfRange`] if it falls outside of the displayed range
pub fn parse_goto_address(
    input: &str,
    base_display_addr: usize,
    mem_size: usize,
) -> Result<usize, EditorError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let display_addr = usize::from_str_radix(digits, 16)
        .map_err(|_| EditorError::InvalidAddress(input.to_string()))?;

    display_addr
        .checked_sub(base_display_addr)
        .filter(|&offset| offset < mem_size)
        .ok_or(EditorError::AddressOutOfRange {
            addr: display_addr,
            size: mem_size,
        })
}
