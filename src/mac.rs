//! 48 位 MAC 地址
//!
//! 链路标识、路由地址和坐标地址都是 48 位的值，统一用 [`MacAddr`] 表示。
//! 文本格式固定为六组小写十六进制，用冒号分隔（`xx:xx:xx:xx:xx:xx`）。

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 地址位宽
pub const MAC_BITS: u32 = 48;

const MAC_MASK: u64 = (1 << MAC_BITS) - 1;

/// 48 位地址（高 16 位恒为 0）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MacAddr(u64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MacParseError {
    #[error("{0:?} is not 12 hex digits")]
    BadHexLength(String),
    #[error("{0:?} contains a non-hex digit")]
    BadHexDigit(String),
    #[error("{0:?} is not a colon-separated MAC address")]
    BadFormat(String),
}

impl MacAddr {
    pub const ZERO: MacAddr = MacAddr(0);

    /// 超过 48 位的值返回 `None`。
    pub fn new(bits: u64) -> Option<Self> {
        (bits & !MAC_MASK == 0).then_some(MacAddr(bits))
    }

    pub fn bits(self) -> u64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// 解析恰好 12 位的十六进制串（CSV 中的链路标识格式），大小写均可。
    pub fn from_hex12(s: &str) -> Result<Self, MacParseError> {
        if s.len() != 12 {
            return Err(MacParseError::BadHexLength(s.to_string()));
        }
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(MacParseError::BadHexDigit(s.to_string()));
        }
        // 12 位十六进制一定落在 48 位之内
        u64::from_str_radix(s, 16)
            .map(MacAddr)
            .map_err(|_| MacParseError::BadHexDigit(s.to_string()))
    }

    pub fn from_octets(octets: [u8; 6]) -> Self {
        let mut bits = 0u64;
        for b in octets {
            bits = (bits << 8) | u64::from(b);
        }
        MacAddr(bits)
    }

    /// 按网络字节序（高位在前）拆成 6 个字节。
    pub fn octets(self) -> [u8; 6] {
        let be = self.0.to_be_bytes();
        [be[2], be[3], be[4], be[5], be[6], be[7]]
    }

    /// Bloom 成员判断：`other` 的每一位在 `self` 中都置位。
    pub fn contains(self, other: MacAddr) -> bool {
        self.0 & other.0 == other.0
    }

    /// 48 字符、补零的二进制串，用于诊断输出。
    pub fn to_bit_string(self) -> String {
        format!("{:048b}", self.0)
    }

    /// 12 位补零的十六进制（无分隔符）。
    pub fn to_hex12(self) -> String {
        format!("{:012x}", self.0)
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = self.octets();
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

impl FromStr for MacAddr {
    type Err = MacParseError;

    /// 接受 `xx:xx:xx:xx:xx:xx` 或 12 位十六进制。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.contains(':') {
            return MacAddr::from_hex12(s);
        }
        let groups: Vec<&str> = s.split(':').collect();
        if groups.len() != 6 || groups.iter().any(|g| g.len() != 2) {
            return Err(MacParseError::BadFormat(s.to_string()));
        }
        MacAddr::from_hex12(&groups.concat()).map_err(|_| MacParseError::BadFormat(s.to_string()))
    }
}

impl From<MacAddr> for String {
    fn from(mac: MacAddr) -> String {
        mac.to_string()
    }
}

impl TryFrom<String> for MacAddr {
    type Error = MacParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl BitOr for MacAddr {
    type Output = MacAddr;

    fn bitor(self, rhs: MacAddr) -> MacAddr {
        MacAddr(self.0 | rhs.0)
    }
}

impl BitOrAssign for MacAddr {
    fn bitor_assign(&mut self, rhs: MacAddr) {
        self.0 |= rhs.0;
    }
}
