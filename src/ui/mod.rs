pub mod panels;
pub mod pie;
pub mod scatter;
pub mod table;
