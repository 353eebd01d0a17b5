//! Checksum primitives used by checksum tokens.

use crate::error::ParseAlgorithmError;
use crate::types::ByteOrder;
use std::fmt;
use std::str::FromStr;

/// Supported frame checksum algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecksumAlgorithm {
    /// CRC-16/MODBUS: reflected 0x8005, init 0xFFFF. Sent low byte first.
    Crc16Modbus,
    /// CRC-16/CCITT-FALSE: 0x1021, init 0xFFFF, no reflection. Sent high byte first.
    Crc16Ccitt,
    /// CRC-32 (IEEE 802.3). Sent high byte first.
    Crc32,
}

impl ChecksumAlgorithm {
    /// All supported algorithms.
    pub const ALL: [Self; 3] = [Self::Crc16Modbus, Self::Crc16Ccitt, Self::Crc32];

    /// Canonical configuration name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Crc16Modbus => "crc16-modbus",
            Self::Crc16Ccitt => "crc16-ccitt",
            Self::Crc32 => "crc32",
        }
    }

    /// Width of the checksum in bytes.
    pub const fn width(self) -> usize {
        match self {
            Self::Crc16Modbus | Self::Crc16Ccitt => 2,
            Self::Crc32 => 4,
        }
    }

    /// Byte order the checksum is conventionally transmitted in.
    pub const fn natural_order(self) -> ByteOrder {
        match self {
            Self::Crc16Modbus => ByteOrder::Little,
            Self::Crc16Ccitt | Self::Crc32 => ByteOrder::Big,
        }
    }

    /// Computes the checksum of `data`.
    pub fn compute(self, data: &[u8]) -> u32 {
        match self {
            Self::Crc16Modbus => u32::from(crc16_modbus(data)),
            Self::Crc16Ccitt => u32::from(crc16_ccitt(data)),
            Self::Crc32 => crc32(data),
        }
    }

    /// Computes the checksum of `data` and encodes it for the wire.
    ///
    /// `order` overrides the algorithm's natural byte order.
    pub fn checksum_bytes(self, data: &[u8], order: Option<ByteOrder>) -> Vec<u8> {
        let order = order.unwrap_or(self.natural_order());
        order.encode(u64::from(self.compute(data)), self.width())
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChecksumAlgorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' ' | '/'))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "crc16modbus" | "modbus" | "modbuscrc16" | "modbuscrc" => Ok(Self::Crc16Modbus),
            "crc16ccitt" | "ccitt" | "crcccitt" | "crc16ccittfalse" => Ok(Self::Crc16Ccitt),
            "crc32" | "crc32ieee" => Ok(Self::Crc32),
            _ => Err(ParseAlgorithmError {
                name: s.to_string(),
            }),
        }
    }
}

const CRC16_MODBUS_TABLE: [u16; 256] = {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u16;
        let mut j = 0;
        while j < 8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ 0xA001;
            } else {
                crc >>= 1;
            }
            j += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
};

const CRC16_CCITT_TABLE: [u16; 256] = {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = (i as u16) << 8;
        let mut j = 0;
        while j < 8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ 0x1021;
            } else {
                crc <<= 1;
            }
            j += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
};

const CRC32_TABLE: [u32; 256] = {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut j = 0;
        while j < 8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ 0xEDB8_8320;
            } else {
                crc >>= 1;
            }
            j += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
};

/// Computes CRC-16/MODBUS.
pub fn crc16_modbus(data: &[u8]) -> u16 {
    let mut crc = 0xFFFF_u16;
    for &byte in data {
        let index = usize::from((crc ^ u16::from(byte)) & 0xFF);
        crc = (crc >> 8) ^ CRC16_MODBUS_TABLE[index];
    }
    crc
}

/// Computes CRC-16/CCITT-FALSE.
pub fn crc16_ccitt(data: &[u8]) -> u16 {
    let mut crc = 0xFFFF_u16;
    for &byte in data {
        let index = usize::from((crc >> 8) ^ u16::from(byte));
        crc = (crc << 8) ^ CRC16_CCITT_TABLE[index];
    }
    crc
}

/// Computes CRC-32 (IEEE polynomial).
pub fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFF_u32;
    for &byte in data {
        let index = ((crc ^ u32::from(byte)) & 0xFF) as usize;
        crc = (crc >> 8) ^ CRC32_TABLE[index];
    }
    !crc
}
