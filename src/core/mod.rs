pub mod classify;
pub mod collate;
pub mod extract;
pub mod graphics;
pub mod markup;
pub mod registry;
pub mod script;
pub mod styling;
