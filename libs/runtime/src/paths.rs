use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HomeDirError {
    #[error("cannot determine the user home directory (HOME/APPDATA not set)")]
    NoHome,
    #[error("failed to create home directory '{path}': {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Resolve the application home directory into an absolute path.
///
/// - `None` falls back to `<platform home>/<default_subdir>`.
/// - A leading `~` is expanded against the platform home.
/// - Relative paths are joined with the current working directory.
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf, HomeDirError> {
    let resolved = match configured {
        None => platform_home()?.join(default_subdir),
        Some(raw) => expand(&raw)?,
    };

    if create {
        std::fs::create_dir_all(&resolved).map_err(|source| HomeDirError::Create {
            path: resolved.clone(),
            source,
        })?;
    }
    Ok(resolved)
}

fn expand(raw: &str) -> Result<PathBuf, HomeDirError> {
    if raw == "~" {
        return platform_home();
    }
    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        return Ok(platform_home()?.join(rest));
    }
    let p = Path::new(raw);
    if p.is_absolute() {
        Ok(p.to_path_buf())
    } else {
        let cwd = std::env::current_dir().map_err(|_| HomeDirError::NoHome)?;
        Ok(cwd.join(p))
    }
}

fn platform_home() -> Result<PathBuf, HomeDirError> {
    #[cfg(target_os = "windows")]
    let var = "APPDATA";
    #[cfg(not(target_os = "windows"))]
    let var = "HOME";

    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .ok_or(HomeDirError::NoHome)
}
