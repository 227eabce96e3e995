//! 坐标地址
//!
//! x、y 各占 24 位，先拼成 `xxxxxxyyyyyy`，再按固定顺序重排字节：
//! 第 1..6 个字节依次取原来的第 3、2、1、6、5、4 个字节。
//! 也就是两个字段各自以小端序存放。

use crate::mac::MacAddr;
use crate::topo::{COORD_MAX, Coord};

/// 重排后每个位置取自原来的哪个字节（1 起）
const BYTE_ORDER: [usize; 6] = [3, 2, 1, 6, 5, 4];

/// 打包坐标。超出 24 位的高位被丢弃（[`CoordTable`](crate::topo::CoordTable) 加载时已拒绝这种值）。
pub fn coordinate_address(coord: Coord) -> MacAddr {
    let x = u64::from(coord.x & COORD_MAX);
    let y = u64::from(coord.y & COORD_MAX);
    let packed = MacAddr::new((x << 24) | y).unwrap_or_default().octets();

    let mut out = [0u8; 6];
    for (slot, &src) in out.iter_mut().zip(BYTE_ORDER.iter()) {
        *slot = packed[src - 1];
    }
    MacAddr::from_octets(out)
}

/// [`coordinate_address`] 的逆运算
pub fn coordinate_from_address(mac: MacAddr) -> Coord {
    let permuted = mac.octets();
    let mut packed = [0u8; 6];
    for (&byte, &src) in permuted.iter().zip(BYTE_ORDER.iter()) {
        packed[src - 1] = byte;
    }
    let bits = MacAddr::from_octets(packed).bits();
    Coord {
        x: ((bits >> 24) as u32) & COORD_MAX,
        y: (bits as u32) & COORD_MAX,
    }
}
