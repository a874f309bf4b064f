pub mod category;
pub mod creature;
pub mod favorites;
pub mod filter;
pub mod grid;
