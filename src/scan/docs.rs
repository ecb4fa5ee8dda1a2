use super::filesystem::read_to_string_if_exists;
use crate::types::evidence::{FileEntry, README_ABSENT};
use std::path::Path;

const PRIMARY_README: &str = "README.md";

/// README text, or [`README_ABSENT`] when the root has no readable README.
pub fn read_readme(root: &Path, files: &[FileEntry]) -> String {
    let name = files
        .iter()
        .filter(|entry| !entry.is_dir())
        .find(|entry| entry.name == PRIMARY_README)
        .or_else(|| {
            files
                .iter()
                .filter(|entry| !entry.is_dir())
                .find(|entry| entry.name.to_lowercase().starts_with("readme"))
        });

    name.and_then(|entry| read_to_string_if_exists(&root.join(&entry.name)))
        .unwrap_or_else(|| README_ABSENT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::filesystem::list_root;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_readme_yields_sentinel() {
        let dir = TempDir::new().expect("temp dir should be created");
        let files = list_root(dir.path());
        assert_eq!(read_readme(dir.path(), &files), README_ABSENT);
    }

    #[test]
    fn prefers_readme_md_over_other_variants() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(dir.path().join("README.md"), "# Main").expect("readme should write");
        fs::write(dir.path().join("readme.txt"), "plain").expect("alt readme should write");
        let files = list_root(dir.path());
        assert_eq!(read_readme(dir.path(), &files), "# Main");
    }

    #[test]
    fn falls_back_to_any_readme_file() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(dir.path().join("Readme.rst"), "Usage: run").expect("readme should write");
        let files = list_root(dir.path());
        assert_eq!(read_readme(dir.path(), &files), "Usage: run");
    }
}
