pub mod cache;
#[cfg(test)]
pub mod mock;
pub mod postgres;
