//! Loader services

pub mod batch_driver;
pub mod event_loader;
pub mod file_scanner;
pub mod song_loader;

pub use batch_driver::{process_data, process_files, BatchReport, FileProcessor, LoadStats};
pub use event_loader::LogFileLoader;
pub use file_scanner::{FileScanner, FileSet, ScanError};
pub use song_loader::SongFileLoader;
