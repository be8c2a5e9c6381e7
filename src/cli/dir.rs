use std::path::Path;

use super::error::ArgsError;

/// Check that `path` is an existing directory, creating it (one level only)
/// when it is missing and `create` is set.
pub fn assert_dir_arg(path: &Path, label: Option<&str>, create: bool) -> Result<(), ArgsError> {
    let label = label.map(str::to_string);

    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ArgsError::NotADirectory { label }),
        Err(_) if create => {
            std::fs::create_dir(path).map_err(|source| ArgsError::CreateDir {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::debug!(path = %path.display(), "created directory");
            Ok(())
        }
        Err(_) => Err(ArgsError::InvalidPath { label }),
    }
}
