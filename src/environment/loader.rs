// ABOUTME: Loaders for the key=value environment file.
// ABOUTME: The dotenv loader reads without touching the process environment.

use std::path::Path;

use super::EnvError;

/// Source of the base environment entries.
pub trait EnvLoader {
    fn load(&self, path: &Path) -> Result<Vec<(String, String)>, EnvError>;
}

/// Reads a dotenv-formatted file (comments, quoting and `export` prefixes allowed).
#[derive(Debug, Clone, Copy, Default)]
pub struct DotenvLoader;

impl EnvLoader for DotenvLoader {
    fn load(&self, path: &Path) -> Result<Vec<(String, String)>, EnvError> {
        let read_error = |source| EnvError::ReadFile {
            path: path.to_path_buf(),
            source,
        };

        dotenvy::from_path_iter(path)
            .map_err(read_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(read_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_key_value_pairs() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# deploy settings").unwrap();
        writeln!(file, "PORT=8080").unwrap();
        writeln!(file, "DATABASE_URL=\"postgres://db/app\"").unwrap();

        let mut vars = DotenvLoader.load(file.path()).unwrap();
        vars.sort();

        assert_eq!(
            vars,
            vec![
                ("DATABASE_URL".to_string(), "postgres://db/app".to_string()),
                ("PORT".to_string(), "8080".to_string()),
            ]
        );
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DotenvLoader
            .load(&dir.path().join(".deploy.env"))
            .unwrap_err();

        assert!(matches!(err, EnvError::ReadFile { .. }));
        assert!(err.to_string().contains(".deploy.env"));
    }

    #[test]
    fn malformed_line_is_read_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "GOOD=1").unwrap();
        writeln!(file, "NOT A VALID LINE").unwrap();

        let err = DotenvLoader.load(file.path()).unwrap_err();
        assert!(matches!(err, EnvError::ReadFile { .. }));
    }
}
