/// Store and scene dispatch for mounted scripting programs.
pub mod program;
pub mod store;
