pub mod descriptor;
pub mod filter;
pub mod order;
