use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Operating system families with a known cache location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    MacOs,
    Linux,
    Windows,
    Other,
}

impl OsFamily {
    /// Family of the running host.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` value to a family.
    pub fn from_os(os: &str) -> Self {
        match os {
            "macos" => Self::MacOs,
            "linux" => Self::Linux,
            "windows" => Self::Windows,
            _ => Self::Other,
        }
    }

    /// Environment variable holding the base directory of the cache root.
    pub fn base_var(self) -> Option<&'static str> {
        match self {
            Self::MacOs | Self::Linux => Some("HOME"),
            Self::Windows => Some("LOCALAPPDATA"),
            Self::Other => None,
        }
    }

    /// Path of the cache root relative to its base directory.
    fn cache_subdir(self) -> &'static [&'static str] {
        match self {
            Self::MacOs => &["Library", "Caches"],
            Self::Linux => &[".cache"],
            Self::Windows => &["Temp"],
            Self::Other => &[],
        }
    }

    fn fallback_base(self) -> Option<PathBuf> {
        match self {
            Self::MacOs | Self::Linux => dirs::home_dir(),
            Self::Windows => dirs::data_local_dir(),
            Self::Other => None,
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MacOs => "macOS",
            Self::Linux => "Linux",
            Self::Windows => "Windows",
            Self::Other => std::env::consts::OS,
        };
        f.write_str(name)
    }
}

/// A platform-conventional directory holding disposable cached data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRoot {
    pub path: PathBuf,
    pub os: OsFamily,
}

impl CacheRoot {
    /// Cache root for `os` under the given base directory.
    pub fn under(os: OsFamily, base: &Path) -> Self {
        let path = os
            .cache_subdir()
            .iter()
            .fold(base.to_path_buf(), |acc, part| acc.join(part));
        Self { path, os }
    }
}

/// Cache roots of the running host, read fresh on every call.
pub fn detect_cache_roots() -> Vec<CacheRoot> {
    roots_for(OsFamily::current(), |key| std::env::var_os(key))
}

/// Cache roots for `os`, resolving its base directory through `lookup`.
///
/// An unknown family yields no roots. A missing, empty or relative base
/// variable falls back to the platform directory from `dirs`; if that is
/// unavailable too, no root is returned rather than a relative path.
pub fn roots_for<F>(os: OsFamily, lookup: F) -> Vec<CacheRoot>
where
    F: Fn(&str) -> Option<OsString>,
{
    let Some(var) = os.base_var() else {
        debug!(os = %os, "no known cache location for this platform");
        return Vec::new();
    };

    let base = match lookup(var).map(PathBuf::from) {
        Some(base) if base.is_absolute() => Some(base),
        other => {
            warn!(
                var,
                value = ?other,
                "cache base variable unusable, falling back to platform default"
            );
            os.fallback_base().filter(|p| p.is_absolute())
        }
    };

    match base {
        Some(base) => {
            let root = CacheRoot::under(os, &base);
            debug!(os = %os, root = %root.path.display(), "detected cache root");
            vec![root]
        }
        None => {
            warn!(var, "could not determine a cache root");
            Vec::new()
        }
    }
}
