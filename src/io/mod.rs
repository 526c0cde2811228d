pub mod kv;
pub mod recovery;
pub mod settings_io;
pub mod site_io;
pub mod watcher;
