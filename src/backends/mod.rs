//! Backend implementations

pub mod console;

pub use console::ConsoleBackend;
