use std::fs;
use std::path::Path;

pub use record::testing::make_record;

/// Writes `data` to `root/rel`, creating parent directories.
pub fn put_file(root: &Path, rel: &str, data: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, data).unwrap();
}
