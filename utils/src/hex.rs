use anyhow::{anyhow, Result};

pub fn strip_0x(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}

/// Parses a JSON-RPC quantity such as `"0x5208"`.
pub fn parse_quantity(value: &str) -> Result<u64> {
    let digits = strip_0x(value);
    if digits.is_empty() {
        return Err(anyhow!("Empty hex quantity: \"{}\"", value));
    }
    u64::from_str_radix(digits, 16).map_err(|e| anyhow!("Invalid hex quantity \"{}\": {}", value, e))
}

/// Left-pads hex digits to a 32-byte ABI word.
pub fn pad_word(hex_digits: &str) -> String {
    format!("{:0>64}", hex_digits)
}
