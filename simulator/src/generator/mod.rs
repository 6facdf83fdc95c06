pub mod item;
pub mod schedule;
