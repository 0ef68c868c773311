pub mod outcome;
pub mod ritual;
