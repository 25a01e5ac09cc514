use std::{fs, path::Path};

use anyhow::{bail, Context, Result};

/// Create the directory if it doesn’t exist; error if a non-directory exists there.
pub(crate) fn ensure_dir_exists(path: &Path) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            bail!("Path exists but is not a directory: {}", path.display());
        }
    } else {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {}", path.display()))?;
    }
    Ok(())
}

/// Check that `path` may be written: not stdout, and not an existing file unless `force`.
/// Creates missing parent directories.
pub(crate) fn prepare_output(path: &Path, force: bool) -> Result<()> {
    if path == Path::new("-") {
        bail!("stdout is not supported; provide a real file path.");
    }
    if !force && path.exists() {
        bail!("Refusing to overwrite existing file: {} (use --force)", path.display());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent)?;
    }
    Ok(())
}

/// Write each `(path, contents)` pair once every path has passed [`prepare_output`].
pub(crate) fn write_outputs<P: AsRef<Path>, C: AsRef<[u8]>>(outputs: &[(P, C)], force: bool) -> Result<()> {
    for (path, _) in outputs {
        prepare_output(path.as_ref(), force)?;
    }
    for (path, contents) in outputs {
        let path = path.as_ref();
        fs::write(path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{ensure_dir_exists, prepare_output, write_outputs};

    #[test]
    fn refuses_stdout() {
        assert!(prepare_output(Path::new("-"), true).is_err());
    }

    #[test]
    fn refuses_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.svg");
        std::fs::write(&path, "x").unwrap();
        assert!(prepare_output(&path, false).is_err());
        assert!(prepare_output(&path, true).is_ok());
    }

    #[test]
    fn creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/out.csv");
        prepare_output(&path, false).unwrap();
        assert!(dir.path().join("a/b").is_dir());
    }

    #[test]
    fn file_in_the_way_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file");
        std::fs::write(&path, "x").unwrap();
        assert!(ensure_dir_exists(&path).is_err());
    }

    #[test]
    fn write_outputs_checks_every_path_first() {
        let dir = tempfile::tempdir().unwrap();
        let (a, b) = (dir.path().join("a.csv"), dir.path().join("b.svg"));
        std::fs::write(&b, "old").unwrap();

        assert!(write_outputs(&[(&a, "new"), (&b, "new")], false).is_err());
        assert!(!a.exists());
        assert_eq!(std::fs::read_to_string(&b).unwrap(), "old");

        write_outputs(&[(&a, "new"), (&b, "new")], true).unwrap();
        assert_eq!(std::fs::read_to_string(&a).unwrap(), "new");
        assert_eq!(std::fs::read_to_string(&b).unwrap(), "new");
    }
}
