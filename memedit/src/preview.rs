//! Data preview engine.
//!
//! Converts the bytes at an address into a human-readable string for a chosen numeric type,
//! display base, and endianness. Reads are truncated at the end of the store: only in-bounds
//! bytes are ever sourced, and absent bytes decode as zero.

use crate::store::MemorySource;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
    #[default]
    Little,
    Big,
}

impl Endianness {
    pub const fn desc(self) -> &'static str {
        match self {
            Self::Little => "LE",
            Self::Big => "BE",
        }
    }
}

/// Byte order of the machine running the editor. Probed once per process.
pub static HOST_ENDIANNESS: LazyLock<Endianness> = LazyLock::new(|| {
    let one: u16 = 1;
    if one.to_ne_bytes()[0] == 1 {
        Endianness::Little
    } else {
        Endianness::Big
    }
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataType {
    I8,
    U8,
    I16,
    U16,
    #[default]
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

impl DataType {
    pub const ALL: [Self; 10] = [
        Self::I8,
        Self::U8,
        Self::I16,
        Self::U16,
        Self::I32,
        Self::U32,
        Self::I64,
        Self::U64,
        Self::F32,
        Self::F64,
    ];

    /// Size of the type in bytes
    pub const fn size(self) -> usize {
        match self {
            Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::U64 | Self::F64 => 8,
        }
    }

    pub const fn desc(self) -> &'static str {
        match self {
            Self::I8 => "Int8",
            Self::U8 => "Uint8",
            Self::I16 => "Int16",
            Self::U16 => "Uint16",
            Self::I32 => "Int32",
            Self::U32 => "Uint32",
            Self::I64 => "Int64",
            Self::U64 => "Uint64",
            Self::F32 => "Float",
            Self::F64 => "Double",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Bin,
    Dec,
    Hex,
}

impl DataFormat {
    pub const ALL: [Self; 3] = [Self::Dec, Self::Hex, Self::Bin];

    pub const fn desc(self) -> &'static str {
        match self {
            Self::Bin => "Bin",
            Self::Dec => "Dec",
            Self::Hex => "Hex",
        }
    }
}

/// Read the bytes of `data_type` at `addr`, truncated to the end of the store.
///
/// Bytes are fetched one by one through `mem`, so memory-mapped read semantics are preserved.
pub fn read_bytes<M: MemorySource + ?Sized>(
    mem: &M,
    addr: usize,
    mem_size: usize,
    data_type: DataType,
) -> Vec<u8> {
    let len = data_type.size().min(mem_size.saturating_sub(addr));
    (addr..addr + len).map(|a| mem.read_byte(a)).collect()
}

/// Copy `bytes` into a host-order buffer. Bytes past `bytes.len()` stay zero.
fn to_host_order(bytes: &[u8], endianness: Endianness) -> [u8; 8] {
    let len = bytes.len().min(8);
    let mut buf = [0u8; 8];
    buf[..len].copy_from_slice(&bytes[..len]);
    if endianness != *HOST_ENDIANNESS {
        buf[..len].reverse();
    }
    buf
}

/// Render bytes as `0`/`1` groups, most significant byte first
fn format_binary(bytes: &[u8], endianness: Endianness) -> String {
    let len = bytes.len().min(8);
    let buf = to_host_order(bytes, endianness);

    let mut ordered = buf[..len].to_vec();
    if *HOST_ENDIANNESS == Endianness::Little {
        ordered.reverse();
    }

    ordered
        .iter()
        .map(|b| format!("{b:08b}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a float the way C's `%a` does, e.g. `0x1.8p+1` for `3.0`
pub fn format_hex_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }

    let bits = value.to_bits();
    let sign = if bits >> 63 == 1 { "-" } else { "" };

    if value.is_infinite() {
        return format!("{sign}inf");
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let biased_exp = ((bits >> 52) & 0x7FF) as i32;
    let mantissa = bits & 0x000F_FFFF_FFFF_FFFF;

    if biased_exp == 0 && mantissa == 0 {
        return format!("{sign}0x0p+0");
    }

    // Subnormals keep a leading zero and the minimum exponent
    let (lead, exp) = if biased_exp == 0 {
        (0, -1022)
    } else {
        (1, biased_exp - 1023)
    };

    let frac = format!("{mantissa:013x}");
    let frac = frac.trim_end_matches('0');

    if frac.is_empty() {
        format!("{sign}0x{lead}p{exp:+}")
    } else {
        format!("{sign}0x{lead}.{frac}p{exp:+}")
    }
}

/// Format the preview bytes for `data_type` in the given base and endianness.
///
/// `bytes` may be shorter than the type (truncated read near the end of the store).
pub fn format_preview(
    bytes: &[u8],
    data_type: DataType,
    format: DataFormat,
    endianness: Endianness,
) -> String {
    if format == DataFormat::Bin {
        return format_binary(bytes, endianness);
    }

    let buf = to_host_order(bytes, endianness);
    let dec = format == DataFormat::Dec;

    match data_type {
        DataType::I8 => {
            let v = i8::from_ne_bytes([buf[0]]);
            if dec { v.to_string() } else { format!("0x{v:02x}") }
        }
        DataType::U8 => {
            let v = buf[0];
            if dec { v.to_string() } else { format!("0x{v:02x}") }
        }
        DataType::I16 => {
            let v = i16::from_ne_bytes([buf[0], buf[1]]);
            if dec { v.to_string() } else { format!("0x{v:04x}") }
        }
        DataType::U16 => {
            let v = u16::from_ne_bytes([buf[0], buf[1]]);
            if dec { v.to_string() } else { format!("0x{v:04x}") }
        }
        DataType::I32 => {
            let v = i32::from_ne_bytes([buf[0], buf[1], buf[2], buf[3]]);
            if dec { v.to_string() } else { format!("0x{v:08x}") }
        }
        DataType::U32 => {
            let v = u32::from_ne_bytes([buf[0], buf[1], buf[2], buf[3]]);
            if dec { v.to_string() } else { format!("0x{v:08x}") }
        }
        DataType::I64 => {
            let v = i64::from_ne_bytes(buf);
            if dec { v.to_string() } else { format!("0x{v:016x}") }
        }
        DataType::U64 => {
            let v = u64::from_ne_bytes(buf);
            if dec { v.to_string() } else { format!("0x{v:016x}") }
        }
        DataType::F32 => {
            let v = f32::from_ne_bytes([buf[0], buf[1], buf[2], buf[3]]);
            if dec {
                format!("{v:.6}")
            } else {
                format_hex_float(f64::from(v))
            }
        }
        DataType::F64 => {
            let v = f64::from_ne_bytes(buf);
            if dec {
                format!("{v:.6}")
            } else {
                format_hex_float(v)
            }
        }
    }
}

/// Read and format in one step. Used by the preview panel.
pub fn preview<M: MemorySource + ?Sized>(
    mem: &M,
    addr: usize,
    mem_size: usize,
    data_type: DataType,
    format: DataFormat,
    endianness: Endianness,
) -> String {
    let bytes = read_bytes(mem, addr, mem_size, data_type);
    format_preview(&bytes, data_type, format, endianness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Store that records every address it was asked for
    struct TracingStore {
        data: Vec<u8>,
        reads: RefCell<Vec<usize>>,
    }

    impl MemorySource for TracingStore {
        fn read_byte(&self, addr: usize) -> u8 {
            self.reads.borrow_mut().push(addr);
            self.data[addr]
        }

        fn write_byte(&mut self, addr: usize, value: u8) {
            self.data[addr] = value;
        }
    }

    #[test]
    fn test_u32_endianness() {
        let mem = vec![0x01, 0x02, 0x03, 0x04];

        let le = preview(
            &mem,
            0,
            4,
            DataType::U32,
            DataFormat::Dec,
            Endianness::Little,
        );
        let be = preview(&mem, 0, 4, DataType::U32, DataFormat::Dec, Endianness::Big);
        let le_hex = preview(
            &mem,
            0,
            4,
            DataType::U32,
            DataFormat::Hex,
            Endianness::Little,
        );
        let be_hex = preview(&mem, 0, 4, DataType::U32, DataFormat::Hex, Endianness::Big);

        assert_eq!(le, "67305985");
        assert_eq!(be, "16909060");
        assert_eq!(le_hex, "0x04030201");
        assert_eq!(be_hex, "0x01020304");
    }

    #[test]
    fn test_u8_and_i8() {
        let bytes = [0xFF];

        assert_eq!(
            format_preview(&bytes, DataType::U8, DataFormat::Dec, Endianness::Little),
            "255"
        );
        assert_eq!(
            format_preview(&bytes, DataType::U8, DataFormat::Hex, Endianness::Little),
            "0xff"
        );
        assert_eq!(
            format_preview(&bytes, DataType::I8, DataFormat::Dec, Endianness::Big),
            "-1"
        );
        assert_eq!(
            format_preview(&bytes, DataType::I8, DataFormat::Hex, Endianness::Big),
            "0xff"
        );
    }

    #[test]
    fn test_signed_hex_uses_bit_pattern() {
        let bytes = (-2i64).to_le_bytes();

        let hex = format_preview(&bytes, DataType::I64, DataFormat::Hex, Endianness::Little);
        let dec = format_preview(&bytes, DataType::I64, DataFormat::Dec, Endianness::Little);

        assert_eq!(hex, "0xfffffffffffffffe");
        assert_eq!(dec, "-2");
    }

    #[test]
    fn test_binary_ignores_type_and_follows_endianness() {
        let bytes = [0x01, 0x80];

        let le = format_preview(&bytes, DataType::U16, DataFormat::Bin, Endianness::Little);
        let be = format_preview(&bytes, DataType::I16, DataFormat::Bin, Endianness::Big);

        assert_eq!(le, "10000000 00000001");
        assert_eq!(be, "00000001 10000000");
    }

    #[test]
    fn test_floats() {
        let one = 1.0f32.to_le_bytes();
        let pi = std::f64::consts::PI.to_be_bytes();

        assert_eq!(
            format_preview(&one, DataType::F32, DataFormat::Dec, Endianness::Little),
            "1.000000"
        );
        assert_eq!(
            format_preview(&one, DataType::F32, DataFormat::Hex, Endianness::Little),
            "0x1p+0"
        );
        assert_eq!(
            format_preview(&pi, DataType::F64, DataFormat::Dec, Endianness::Big),
            "3.141593"
        );
        assert_eq!(
            format_preview(&pi, DataType::F64, DataFormat::Hex, Endianness::Big),
            "0x1.921fb54442d18p+1"
        );
    }

    #[test]
    fn test_format_hex_float_edge_cases() {
        assert_eq!(format_hex_float(0.0), "0x0p+0");
        assert_eq!(format_hex_float(-0.0), "-0x0p+0");
        assert_eq!(format_hex_float(0.5), "0x1p-1");
        assert_eq!(format_hex_float(-3.0), "-0x1.8p+1");
        assert_eq!(format_hex_float(f64::from_bits(1)), "0x0.0000000000001p-1022");
        assert_eq!(format_hex_float(f64::INFINITY), "inf");
        assert_eq!(format_hex_float(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_hex_float(f64::NAN), "nan");
    }

    #[test]
    fn test_truncated_read_stays_in_bounds() {
        // Arrange
        let store = TracingStore {
            data: vec![0x34, 0x12],
            reads: RefCell::new(Vec::new()),
        };

        // Act
        let bytes = read_bytes(&store, 0, 2, DataType::U32);
        let dec = format_preview(&bytes, DataType::U32, DataFormat::Dec, Endianness::Little);
        let bin = format_preview(&bytes, DataType::U32, DataFormat::Bin, Endianness::Little);

        // Assert
        assert_eq!(bytes, vec![0x34, 0x12]);
        assert_eq!(*store.reads.borrow(), vec![0, 1]);
        assert_eq!(dec, "4660");
        assert_eq!(bin, "00010010 00110100");
    }

    #[test]
    fn test_read_at_end_of_store_is_empty() {
        let mem = vec![0u8; 4];

        let bytes = read_bytes(&mem, 4, 4, DataType::U64);

        assert!(bytes.is_empty());
        assert_eq!(
            format_preview(&bytes, DataType::U64, DataFormat::Bin, Endianness::Little),
            ""
        );
    }

    #[test]
    fn test_type_sizes() {
        let sizes: Vec<usize> = DataType::ALL.iter().map(|t| t.size()).collect();

        assert_eq!(sizes, vec![1, 1, 2, 2, 4, 4, 8, 8, 4, 8]);
        assert_eq!(DataType::default(), DataType::I32);
    }
}
