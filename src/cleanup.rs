use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extensions of the files an encode leaves behind
pub const GENERATED_EXTENSIONS: [&str; 2] = [".mid", ".mp3"];

/// Delete every regular file directly in `dir` whose name ends with one of
/// `extensions`. Returns the removed paths, sorted.
pub fn remove_generated(dir: &Path, extensions: &[&str]) -> io::Result<Vec<PathBuf>> {
    let mut removed = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };

        if extensions.iter().any(|ext| name.ends_with(ext)) {
            let path = entry.path();
            fs::remove_file(&path)?;
            log::info!("removed {}", path.display());
            removed.push(path);
        }
    }

    removed.sort();
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"x").unwrap();
    }

    #[test]
    fn test_removes_only_generated() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["output.mid", "song.mp3", "temp.mid", "notes.txt", "temp.wav", "mid", "a.mp3.bak"] {
            touch(dir.path(), name);
        }
        fs::create_dir(dir.path().join("folder.mid")).unwrap();

        let removed = remove_generated(dir.path(), &GENERATED_EXTENSIONS).unwrap();

        assert_eq!(
            removed,
            vec![
                dir.path().join("output.mid"),
                dir.path().join("song.mp3"),
                dir.path().join("temp.mid"),
            ]
        );

        let mut left: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        left.sort();
        assert_eq!(left, vec!["a.mp3.bak", "folder.mid", "mid", "notes.txt", "temp.wav"]);
    }

    #[test]
    fn test_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(remove_generated(dir.path(), &GENERATED_EXTENSIONS)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(remove_generated(&dir.path().join("gone"), &GENERATED_EXTENSIONS).is_err());
    }
}
