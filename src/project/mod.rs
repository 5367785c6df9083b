pub mod edits;
pub mod persistence;
pub mod state;
