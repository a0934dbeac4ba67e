pub mod cards;
pub mod chips;
