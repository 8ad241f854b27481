pub mod package;
pub mod symbol;
pub mod error;
pub mod ports;
pub mod scanner;
pub mod detector;
