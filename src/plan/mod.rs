//! 寻址模式与节点初始化计划

mod addressing;
mod mode;

pub use addressing::{AddressingPlan, ArpEntry, InterfaceMac};
pub use mode::{AppMode, ParseModeError};
