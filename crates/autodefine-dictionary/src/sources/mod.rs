pub mod laban;
pub mod oxford;
