pub mod embed;
pub mod mac;
pub mod plan;
pub mod topo;

#[cfg(test)]
mod test;
