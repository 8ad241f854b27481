pub mod fs;
pub mod go;
pub mod report;
