pub mod spawn;
pub mod field;
pub mod powerups;
pub mod collision;
