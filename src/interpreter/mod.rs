// src/interpreter/mod.rs

//! Interpreter resolution
//!
//! Turns an interpreter identifier into a [`PythonEnvironment`]:
//!
//! 1. Locate the executable (host `PATH`, an explicit path, or the install
//!    root of a managed interpreter package)
//! 2. Probe it with an inline script for version, prefix and sysconfig data
//! 3. Pick the include directory and, per target OS, the library and its
//!    link name
//!
//! Resolution never retries. Any failure is an
//! [`Error::EnvironmentUnusable`] for a human to fix.

mod library;
mod probe;

pub use library::{link_name, select_library};
pub use probe::{parse_probe_output, CommandProbe, Probe, ProbeOutput, SysconfigPaths, PROBE_SCRIPT};

use crate::environment::PythonEnvironment;
use crate::error::{Error, Result};
use crate::recipe::Recipe;
use crate::settings::TargetOs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Configuration for one resolution pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Interpreter identifier: command name or path
    pub python: String,
    /// Use the host interpreter rather than a managed one
    pub with_system_python: bool,
    /// Required `major.minor`, if any
    pub python_version: Option<String>,
    /// Install root of the managed interpreter package
    pub managed_root: Option<PathBuf>,
    /// Operating system whose naming rules apply
    pub os: TargetOs,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            python: "python3".to_string(),
            with_system_python: true,
            python_version: None,
            managed_root: None,
            os: TargetOs::detect(),
        }
    }
}

impl ResolverConfig {
    /// Build a configuration from a recipe's options and effective settings
    pub fn from_recipe(recipe: &Recipe) -> Self {
        let options = &recipe.options;
        Self {
            python: options.python.clone(),
            with_system_python: options.with_system_python,
            python_version: options.python_version.clone(),
            managed_root: options.managed_root.clone(),
            os: recipe.settings().os,
        }
    }

    /// Set the interpreter identifier
    pub fn with_python(mut self, python: impl Into<String>) -> Self {
        self.python = python.into();
        self
    }

    /// Use a managed interpreter installed under `root`
    pub fn with_managed_root(mut self, root: PathBuf) -> Self {
        self.with_system_python = false;
        self.managed_root = Some(root);
        self
    }

    /// Require a specific `major.minor`
    pub fn with_python_version(mut self, version: impl Into<String>) -> Self {
        self.python_version = Some(version.into());
        self
    }

    /// Apply another OS's naming rules
    pub fn with_os(mut self, os: TargetOs) -> Self {
        self.os = os;
        self
    }
}

/// Resolves interpreter environments
pub struct Resolver<P: Probe = CommandProbe> {
    config: ResolverConfig,
    probe: P,
}

impl Resolver<CommandProbe> {
    /// Create a resolver that runs the interpreter as a subprocess
    pub fn new(config: ResolverConfig) -> Self {
        Self::with_probe(config, CommandProbe)
    }
}

impl<P: Probe> Resolver<P> {
    /// Create a resolver with a custom probe
    pub fn with_probe(config: ResolverConfig, probe: P) -> Self {
        Self { config, probe }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Find the interpreter executable to probe
    pub fn locate_interpreter(&self) -> Result<PathBuf> {
        if self.config.with_system_python {
            self.locate_system()
        } else {
            self.locate_managed()
        }
    }

    fn locate_system(&self) -> Result<PathBuf> {
        let python = self.config.python.trim();
        if python.is_empty() {
            return Err(Error::unusable("no interpreter configured"));
        }

        if python.contains('/') || python.contains('\\') {
            let path = PathBuf::from(python);
            if !path.exists() {
                return Err(Error::unusable(format!(
                    "interpreter {} does not exist",
                    path.display()
                )));
            }
            return Ok(path);
        }

        which::which(python)
            .map_err(|e| Error::unusable(format!("{} not found on PATH: {}", python, e)))
    }

    fn locate_managed(&self) -> Result<PathBuf> {
        let root = self.config.managed_root.as_deref().ok_or_else(|| {
            Error::unusable("managed interpreter requested but no managed_root given")
        })?;
        if !root.is_dir() {
            return Err(Error::unusable(format!(
                "managed interpreter root {} does not exist",
                root.display()
            )));
        }

        let candidates = managed_candidates(root, &self.config.python, &self.config.os);
        candidates
            .iter()
            .find(|path| path.is_file())
            .cloned()
            .ok_or_else(|| {
                Error::unusable(format!(
                    "no interpreter found under {} (tried {})",
                    root.display(),
                    candidates
                        .iter()
                        .map(|p| p.display().to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }

    /// Resolve the interpreter environment
    ///
    /// Fails when the interpreter cannot be found or run, or reports a
    /// version other than the required one. The header check is left to
    /// [`PythonEnvironment::have_python_dev`]; see [`Resolver::resolve_dev`].
    pub fn resolve(&self) -> Result<PythonEnvironment> {
        let executable = self.locate_interpreter()?;
        let probe = self.probe.probe(&executable)?;
        if let Some(reported) = probe.target_os() {
            if reported != self.config.os {
                warn!(
                    "{} reports platform '{}' but resolving for {}",
                    executable.display(),
                    probe.platform,
                    self.config.os
                );
            }
        }
        let env = build_environment(&self.config.os, &executable, probe);

        if let Some(required) = &self.config.python_version {
            if env.python_version() != *required {
                return Err(Error::unusable(format!(
                    "{} is Python {}, but {} was requested",
                    env.executable.display(),
                    env.python_version(),
                    required
                )));
            }
        }

        info!(
            "Resolved Python {} at {}",
            env.version,
            env.executable.display()
        );
        Ok(env)
    }

    /// Resolve and require a complete development environment
    pub fn resolve_dev(&self) -> Result<PythonEnvironment> {
        let env = self.resolve()?;
        match env.missing_dev_reason() {
            None => Ok(env),
            Some(reason) => Err(Error::unusable(reason)),
        }
    }
}

fn managed_candidates(root: &Path, python: &str, os: &TargetOs) -> Vec<PathBuf> {
    let name = Path::new(python)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "python3".to_string());

    let mut candidates = Vec::new();
    if os.is_windows() {
        let exe = if name.ends_with(".exe") { name } else { format!("{}.exe", name) };
        candidates.push(root.join(&exe));
        candidates.push(root.join("python.exe"));
        candidates.push(root.join("bin").join(&exe));
    } else {
        candidates.push(root.join("bin").join(&name));
        candidates.push(root.join("bin").join("python3"));
        candidates.push(root.join("bin").join("python"));
    }
    candidates.dedup();
    candidates
}

/// Assemble the environment record from probe output
fn build_environment(os: &TargetOs, located: &Path, probe: ProbeOutput) -> PythonEnvironment {
    let include_dir = probe
        .config_var("INCLUDEPY")
        .map(PathBuf::from)
        .or_else(|| probe.paths.include.clone())
        .unwrap_or_default();

    let library = select_library(os, &probe).unwrap_or_default();
    let link_name = link_name(os, &library).unwrap_or_default();
    debug!(
        "Library {} links as '{}'",
        library.display(),
        link_name
    );

    // Embedded or frozen interpreters may report a null or empty sys.executable
    let executable = probe
        .executable
        .clone()
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| located.to_path_buf());

    PythonEnvironment {
        executable,
        version: probe.version,
        include_dir,
        library,
        link_name,
        prefix: probe.prefix.clone(),
        stdlib: probe.paths.stdlib.clone().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{PythonVersion, HEADER_MARKER};
    use std::cell::Cell;

    /// Probe returning canned output and counting calls
    struct FakeProbe {
        output: String,
        calls: Cell<usize>,
    }

    impl FakeProbe {
        fn new(output: String) -> Self {
            Self { output, calls: Cell::new(0) }
        }
    }

    impl Probe for FakeProbe {
        fn probe(&self, _executable: &Path) -> Result<ProbeOutput> {
            self.calls.set(self.calls.get() + 1);
            parse_probe_output(&self.output)
        }
    }

    struct FailingProbe;

    impl Probe for FailingProbe {
        fn probe(&self, executable: &Path) -> Result<ProbeOutput> {
            Err(Error::unusable(format!("cannot run {}", executable.display())))
        }
    }

    /// A fake install tree: interpreter file, include dir, shared library
    fn install(root: &Path, with_header: bool) -> (PathBuf, String) {
        let bin = root.join("bin");
        let include = root.join("include").join("python3.10");
        let lib = root.join("lib");
        std::fs::create_dir_all(&bin).unwrap();
        std::fs::create_dir_all(&include).unwrap();
        std::fs::create_dir_all(&lib).unwrap();
        std::fs::write(bin.join("python3"), "").unwrap();
        std::fs::write(lib.join("libpython3.10.so"), "").unwrap();
        if with_header {
            std::fs::write(include.join(HEADER_MARKER), "").unwrap();
        }

        let output = format!(
            r#"{{"executable": "{bin}/python3", "version": [3, 10, 12], "prefix": "{root}", "paths": {{"stdlib": "{root}/lib/python3.10", "include": "{include}"}}, "config": {{"INCLUDEPY": "{include}", "LIBDIR": "{lib}", "LDLIBRARY": "libpython3.10.so", "LIBRARY": "libpython3.10.a"}}}}"#,
            bin = bin.display(),
            root = root.display(),
            include = include.display(),
            lib = lib.display(),
        );
        (bin.join("python3"), output)
    }

    #[test]
    fn test_resolver_config_default() {
        let config = ResolverConfig::default();
        assert_eq!(config.python, "python3");
        assert!(config.with_system_python);
        assert!(config.python_version.is_none());
        assert!(config.managed_root.is_none());
    }

    #[test]
    fn test_resolver_config_builders() {
        let config = ResolverConfig::default()
            .with_python("python3.11")
            .with_python_version("3.11")
            .with_managed_root(PathBuf::from("/opt/cpython"))
            .with_os(TargetOs::Windows);
        assert_eq!(config.python, "python3.11");
        assert_eq!(config.python_version.as_deref(), Some("3.11"));
        assert!(!config.with_system_python);
        assert_eq!(config.managed_root, Some(PathBuf::from("/opt/cpython")));
        assert_eq!(config.os, TargetOs::Windows);
    }

    #[test]
    fn test_resolver_config_from_recipe() {
        let mut recipe = crate::recipe::builtin_recipe().unwrap();
        recipe.options.python = "python3.12".to_string();
        recipe.settings.os = Some(TargetOs::Macos);
        let config = ResolverConfig::from_recipe(&recipe);
        assert_eq!(config.python, "python3.12");
        assert!(config.with_system_python);
        assert_eq!(config.os, TargetOs::Macos);
    }

    #[test]
    fn test_resolve_system_by_path() {
        let dir = tempfile::tempdir().unwrap();
        let (exe, output) = install(dir.path(), true);

        let config = ResolverConfig::default()
            .with_python(exe.display().to_string())
            .with_os(TargetOs::Linux);
        let resolver = Resolver::with_probe(config, FakeProbe::new(output));
        let env = resolver.resolve_dev().unwrap();

        assert_eq!(env.executable, exe);
        assert_eq!(env.version, PythonVersion::new(3, 10, 12));
        assert_eq!(env.include_dir, dir.path().join("include").join("python3.10"));
        assert_eq!(env.library, dir.path().join("lib").join("libpython3.10.so"));
        assert_eq!(env.link_name, "python3.10");
        assert_eq!(env.stdlib, dir.path().join("lib").join("python3.10"));
        assert!(env.have_python_dev());
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let (exe, output) = install(dir.path(), true);

        let config = ResolverConfig::default()
            .with_python(exe.display().to_string())
            .with_os(TargetOs::Linux);
        let resolver = Resolver::with_probe(config, FakeProbe::new(output));
        let first = resolver.resolve().unwrap();
        let second = resolver.resolve().unwrap();
        assert_eq!(first, second);
        assert_eq!(resolver.probe.calls.get(), 2);
    }

    #[test]
    fn test_resolve_without_header() {
        let dir = tempfile::tempdir().unwrap();
        let (exe, output) = install(dir.path(), false);

        let config = ResolverConfig::default()
            .with_python(exe.display().to_string())
            .with_os(TargetOs::Linux);
        let resolver = Resolver::with_probe(config, FakeProbe::new(output));

        let env = resolver.resolve().unwrap();
        assert!(!env.have_python_dev());

        let err = resolver.resolve_dev().unwrap_err();
        assert!(err.is_unusable());
        assert!(err.to_string().contains("Python.h"));
    }

    #[test]
    fn test_resolve_version_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let (exe, output) = install(dir.path(), true);

        let config = ResolverConfig::default()
            .with_python(exe.display().to_string())
            .with_python_version("3.11")
            .with_os(TargetOs::Linux);
        let resolver = Resolver::with_probe(config, FakeProbe::new(output));
        let err = resolver.resolve().unwrap_err();
        assert!(err.to_string().contains("3.11"));
    }

    #[test]
    fn test_resolve_probe_failure() {
        let dir = tempfile::tempdir().unwrap();
        let (exe, _) = install(dir.path(), true);

        let config = ResolverConfig::default().with_python(exe.display().to_string());
        let resolver = Resolver::with_probe(config, FailingProbe);
        assert!(resolver.resolve().unwrap_err().is_unusable());
    }

    #[test]
    fn test_locate_missing_path() {
        let config = ResolverConfig::default().with_python("/nonexistent/bin/python3");
        let resolver = Resolver::new(config);
        assert!(resolver.locate_interpreter().unwrap_err().is_unusable());
    }

    #[test]
    fn test_locate_missing_command() {
        let config = ResolverConfig::default().with_python("python-that-does-not-exist-42");
        let resolver = Resolver::new(config);
        assert!(resolver.locate_interpreter().unwrap_err().is_unusable());
    }

    #[test]
    fn test_locate_managed() {
        let dir = tempfile::tempdir().unwrap();
        let (exe, output) = install(dir.path(), true);

        let config = ResolverConfig::default()
            .with_managed_root(dir.path().to_path_buf())
            .with_os(TargetOs::Linux);
        let resolver = Resolver::with_probe(config, FakeProbe::new(output));
        assert_eq!(resolver.locate_interpreter().unwrap(), exe);
        assert!(resolver.resolve_dev().unwrap().have_python_dev());
    }

    #[test]
    fn test_locate_managed_without_root() {
        let mut config = ResolverConfig::default();
        config.with_system_python = false;
        let resolver = Resolver::new(config);
        let err = resolver.locate_interpreter().unwrap_err();
        assert!(err.to_string().contains("managed_root"));
    }

    #[test]
    fn test_locate_managed_empty_root() {
        let dir = tempfile::tempdir().unwrap();
        let config = ResolverConfig::default()
            .with_managed_root(dir.path().to_path_buf())
            .with_os(TargetOs::Linux);
        let resolver = Resolver::new(config);
        assert!(resolver.locate_interpreter().unwrap_err().is_unusable());
    }

    #[test]
    fn test_managed_candidates_windows() {
        let candidates = managed_candidates(Path::new("C:/cpython"), "python3", &TargetOs::Windows);
        assert_eq!(candidates[0], Path::new("C:/cpython").join("python3.exe"));
        assert_eq!(candidates[1], Path::new("C:/cpython").join("python.exe"));
    }

    #[test]
    fn test_null_executable_uses_located_path() {
        let probe = parse_probe_output(
            r#"{"executable": null, "version": [3, 11, 2], "prefix": "/opt/embed"}"#,
        )
        .unwrap();
        let env = build_environment(&TargetOs::Linux, Path::new("/opt/embed/bin/python3"), probe);
        assert_eq!(env.executable, PathBuf::from("/opt/embed/bin/python3"));
    }

    #[test]
    fn test_platform_mismatch_still_resolves() {
        let dir = tempfile::tempdir().unwrap();
        let (exe, output) = install(dir.path(), true);
        let output = output.replacen('{', r#"{"platform": "darwin", "#, 1);

        let config = ResolverConfig::default()
            .with_python(exe.display().to_string())
            .with_os(TargetOs::Linux);
        let resolver = Resolver::with_probe(config, FakeProbe::new(output));
        let env = resolver.resolve_dev().unwrap();
        assert_eq!(env.link_name, "python3.10");
    }

    #[test]
    fn test_empty_executable_uses_located_path() {
        let probe = parse_probe_output(
            r#"{"executable": "", "version": [3, 10, 0], "prefix": "/opt/py"}"#,
        )
        .unwrap();
        let env = build_environment(&TargetOs::Linux, Path::new("/opt/py/bin/python3"), probe);
        assert_eq!(env.executable, PathBuf::from("/opt/py/bin/python3"));
        assert!(env.library.as_os_str().is_empty());
        assert!(env.link_name.is_empty());
        assert!(!env.have_python_dev());
    }
}
