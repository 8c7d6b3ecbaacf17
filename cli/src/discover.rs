//! Candidate file discovery.

use std::fs;
use std::path::{Path, PathBuf};

use notedown::{Error, Result};

/// Suffix the converter stamps on its own output files.
pub const OUTPUT_SUFFIX: &str = ".note.md";

/// Recursively collect the Markdown files to convert under `root`.
///
/// Files whose name ends in [`OUTPUT_SUFFIX`] are skipped so reruns
/// never convert previous output, and any file whose path contains one
/// of the `exclude` substrings is dropped. Results come back sorted for
/// stable reporting.
pub fn markdown_files(root: &Path, exclude: &[String]) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::NotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    walk(root, &mut files)?;

    files.retain(|path| {
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        if name.ends_with(OUTPUT_SUFFIX) {
            return false;
        }
        let path_str = path.to_string_lossy();
        !exclude.iter().any(|pattern| path_str.contains(pattern.as_str()))
    });

    files.sort();
    Ok(files)
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            walk(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    Ok(())
}

/// Output path for a converted file: `<stem>.note.md` next to the input.
pub fn output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}", stem, OUTPUT_SUFFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("docs/article.md")),
            PathBuf::from("docs/article.note.md")
        );
    }

    #[test]
    fn test_discovery_skips_output_and_excluded() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(dir.path().join("a.md"), "# A").unwrap();
        fs::write(dir.path().join("a.note.md"), "## A").unwrap();
        fs::write(dir.path().join("README.md"), "readme").unwrap();
        fs::write(nested.join("b.md"), "# B").unwrap();
        fs::write(nested.join("notes.txt"), "not markdown").unwrap();

        let files = markdown_files(dir.path(), &["README".to_string()]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.md", "b.md"]);
    }

    #[test]
    fn test_not_a_directory() {
        let err = markdown_files(Path::new("/no/such/dir"), &[]).unwrap_err();
        assert!(matches!(err, Error::NotADirectory(_)));
    }
}
