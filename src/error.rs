use std::path::PathBuf;

use thiserror::Error;

/// Every failure the sweeper can report. Each is scoped to one root or one
/// entry and never aborts a sweep.
#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Error listing files in {}: {source}", root.display())]
    Enumerate {
        root: PathBuf,
        source: std::io::Error,
    },

    #[error("Error removing {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error getting info for {}: {source}", path.display())]
    Stat {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Skipped {}: sweep cancelled", path.display())]
    Cancelled { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn messages_name_the_path() {
        let err = SweepError::Remove {
            path: PathBuf::from("/tmp/cache/x"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "Error removing /tmp/cache/x: denied");

        let err = SweepError::Enumerate {
            root: PathBuf::from("/nope"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "Error listing files in /nope: missing");
    }
}
