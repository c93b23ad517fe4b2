pub mod event;
pub mod field;
pub mod report;
pub mod resources;
pub mod step;
pub mod world;
