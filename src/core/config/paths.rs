use super::ConfigError;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub rc_path: PathBuf,
}

impl ConfigPaths {
    pub fn new() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;

        Ok(ConfigPaths {
            rc_path: home.join(".marrowrc"),
        })
    }

    pub fn with_rc(rc_path: impl Into<PathBuf>) -> Self {
        ConfigPaths {
            rc_path: rc_path.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_rc_path() {
        let paths = ConfigPaths::with_rc("/etc/marrowrc");
        assert_eq!(paths.rc_path, PathBuf::from("/etc/marrowrc"));
    }

    #[test]
    fn test_default_rc_under_home() {
        if let Some(home) = dirs::home_dir() {
            let paths = ConfigPaths::new().unwrap();
            assert_eq!(paths.rc_path, home.join(".marrowrc"));
        }
    }
}
