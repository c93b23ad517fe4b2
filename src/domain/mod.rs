pub mod catalog;
pub mod entity;
pub mod mission;
pub mod star;
