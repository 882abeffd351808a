/// Filesystem adapters: session file, output files and backups
mod file_reader;
mod file_writer;
mod session_store;

pub use file_reader::FileSystemReader;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use session_store::{default_session_path, FileSessionStore, MemorySessionStore};
