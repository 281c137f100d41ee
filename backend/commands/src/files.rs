//! Recursive file enumeration — the filesystem collaborator shared by the
//! manifest source.

use std::path::{Path, PathBuf};

/// List every file under `dir`, recursively, sorted for stable load order.
/// A missing directory yields an empty list.
pub fn all_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk(dir, &mut files);
    files.sort();
    files
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, out);
        } else {
            out.push(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_dir_is_empty() {
        assert!(all_files(Path::new("/definitely/not/here")).is_empty());
    }

    #[test]
    fn walks_recursively_in_sorted_order() {
        let root = std::env::temp_dir().join(format!("crier-files-{}", std::process::id()));
        let nested = root.join("nested");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.join("b.json"), "{}").unwrap();
        std::fs::write(root.join("a.json"), "{}").unwrap();
        std::fs::write(nested.join("c.json"), "{}").unwrap();

        let files = all_files(&root);
        assert_eq!(files.len(), 3);
        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);

        std::fs::remove_dir_all(&root).unwrap();
    }
}
