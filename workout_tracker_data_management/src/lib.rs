use std::path::PathBuf;

use const_format::concatcp;

pub mod console;
pub mod file_store;

pub use file_store::FileStore;

pub const DATA_DIR: &str = "data/";
pub const STORE_DIR: &str = concatcp!(DATA_DIR, "store");

/// `data/store` under the project root, or under the working directory when
/// no project root can be found.
pub fn default_store_dir() -> PathBuf {
    match project_root::get_project_root() {
        Ok(root) => root.join(STORE_DIR),
        Err(err) => {
            tracing::debug!("No project root ({err}), using working directory");
            PathBuf::from(STORE_DIR)
        }
    }
}
