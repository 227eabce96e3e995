//! CSV 行读取
//!
//! 两张表都是无表头、逗号分隔、字段两侧可带空格的格式，`#` 开头的行视为注释。

use std::io;
use std::path::Path;
use std::str::FromStr;

use super::error::{Result, TopoError};

pub(crate) fn reader_from_path(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    builder().from_path(path).map_err(|source| TopoError::Open {
        path: path.display().to_string(),
        source,
    })
}

pub(crate) fn reader_from_io<R: io::Read>(rdr: R) -> csv::Reader<R> {
    builder().from_reader(rdr)
}

fn builder() -> csv::ReaderBuilder {
    let mut b = csv::ReaderBuilder::new();
    b.has_headers(false)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        // 列数由调用方检查，报错信息更具体
        .flexible(true);
    b
}

/// 记录在文件中的行号（1 起），取不到位置时退回到序号。
pub(crate) fn row_number(record: &csv::StringRecord, fallback: usize) -> u64 {
    record
        .position()
        .map(|p| p.line())
        .unwrap_or(fallback as u64 + 1)
}

pub(crate) fn field<'r>(
    record: &'r csv::StringRecord,
    row: u64,
    pos: usize,
    name: &'static str,
) -> Result<&'r str> {
    record
        .get(pos)
        .ok_or(TopoError::MissingColumn { row, pos, name })
}

pub(crate) fn int_field<T: FromStr>(
    record: &csv::StringRecord,
    row: u64,
    pos: usize,
    name: &'static str,
) -> Result<T> {
    let raw = field(record, row, pos, name)?;
    raw.parse::<T>().map_err(|_| TopoError::InvalidInteger {
        row,
        name,
        value: raw.to_string(),
    })
}
