// src/environment.rs

//! The resolved interpreter environment
//!
//! One record per resolution pass: where the interpreter lives, which
//! version it is, and where its headers and library are. The record is
//! derived fresh every time and never persisted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Header whose presence marks a usable development install
pub const HEADER_MARKER: &str = "Python.h";

/// Interpreter version as reported by `sys.version_info`
///
/// Deserializes from either `[major, minor, patch]` or a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PythonVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl PythonVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// `major.minor`
    pub fn major_minor(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }

    /// `majorminor`, as used in Windows library names
    pub fn nodot(&self) -> String {
        format!("{}{}", self.major, self.minor)
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Everything a native-extension build needs to know about an interpreter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PythonEnvironment {
    /// Interpreter executable
    pub executable: PathBuf,
    /// Interpreter version
    pub version: PythonVersion,
    /// Directory holding `Python.h`
    pub include_dir: PathBuf,
    /// Shared or import library to link against
    pub library: PathBuf,
    /// Name passed to the linker (`-l<name>`)
    pub link_name: String,
    /// Interpreter home (`sys.prefix`)
    pub prefix: PathBuf,
    /// Standard library directory
    pub stdlib: PathBuf,
}

impl PythonEnvironment {
    /// `major.minor`
    pub fn python_version(&self) -> String {
        self.version.major_minor()
    }

    /// `majorminor`
    pub fn python_version_nodot(&self) -> String {
        self.version.nodot()
    }

    /// Directory containing the library
    pub fn lib_dir(&self) -> &Path {
        self.library.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Directory containing the executable
    pub fn bin_dir(&self) -> &Path {
        self.executable.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Expected location of the marker header
    pub fn header_path(&self) -> PathBuf {
        self.include_dir.join(HEADER_MARKER)
    }

    /// Whether this environment can build native extensions
    ///
    /// Executable, include directory and library must be known, and the
    /// include directory must contain `Python.h`.
    pub fn have_python_dev(&self) -> bool {
        if self.executable.as_os_str().is_empty() {
            return false;
        }
        if self.include_dir.as_os_str().is_empty() {
            return false;
        }
        if self.library.as_os_str().is_empty() {
            return false;
        }
        self.header_path().exists()
    }

    /// Reason `have_python_dev` is false, for error messages
    pub fn missing_dev_reason(&self) -> Option<String> {
        if self.executable.as_os_str().is_empty() {
            Some("interpreter executable is unknown".to_string())
        } else if self.include_dir.as_os_str().is_empty() {
            Some("interpreter reports no include directory".to_string())
        } else if self.library.as_os_str().is_empty() {
            Some("interpreter reports no Python library".to_string())
        } else if !self.header_path().exists() {
            Some(format!("{} not found", self.header_path().display()))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(include_dir: PathBuf) -> PythonEnvironment {
        PythonEnvironment {
            executable: PathBuf::from("/usr/bin/python3"),
            version: PythonVersion::new(3, 10, 12),
            include_dir,
            library: PathBuf::from("/usr/lib/libpython3.10.so"),
            link_name: "python3.10".to_string(),
            prefix: PathBuf::from("/usr"),
            stdlib: PathBuf::from("/usr/lib/python3.10"),
        }
    }

    #[test]
    fn test_version_formatting() {
        let env = sample(PathBuf::from("/usr/include/python3.10"));
        assert_eq!(env.python_version(), "3.10");
        assert_eq!(env.python_version_nodot(), "310");
        assert_eq!(env.version.to_string(), "3.10.12");
    }

    #[test]
    fn test_version_from_json_array() {
        let version: PythonVersion = serde_json::from_str("[3, 12, 1]").unwrap();
        assert_eq!(version, PythonVersion::new(3, 12, 1));
    }

    #[test]
    fn test_derived_dirs() {
        let env = sample(PathBuf::from("/usr/include/python3.10"));
        assert_eq!(env.lib_dir(), Path::new("/usr/lib"));
        assert_eq!(env.bin_dir(), Path::new("/usr/bin"));
        assert_eq!(env.header_path(), PathBuf::from("/usr/include/python3.10/Python.h"));
    }

    #[test]
    fn test_have_python_dev_with_header() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(HEADER_MARKER), "/* marker */").unwrap();

        let env = sample(dir.path().to_path_buf());
        assert!(env.have_python_dev());
        assert!(env.missing_dev_reason().is_none());
    }

    #[test]
    fn test_have_python_dev_without_header() {
        let dir = tempfile::tempdir().unwrap();

        let env = sample(dir.path().to_path_buf());
        assert!(!env.have_python_dev());
        assert!(env.missing_dev_reason().unwrap().contains("Python.h"));
    }

    #[test]
    fn test_have_python_dev_empty_fields() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(HEADER_MARKER), "").unwrap();

        let mut env = sample(dir.path().to_path_buf());
        env.library = PathBuf::new();
        assert!(!env.have_python_dev());

        let mut env = sample(PathBuf::new());
        assert!(!env.have_python_dev());
        env.include_dir = dir.path().to_path_buf();
        env.executable = PathBuf::new();
        assert!(!env.have_python_dev());
    }
}
