pub mod basic;
pub mod word;
