// tests/common/mod.rs

//! Shared test utilities: fake Python installs with a scripted interpreter.

#![allow(dead_code)]

use python_dev_config::HEADER_MARKER;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

static EXEC_LOCK: Mutex<()> = Mutex::new(());

/// Serialize tests that write and then execute scripts
///
/// A script written by one thread can fail to exec with ETXTBSY while a
/// child forked by another thread still holds its write handle.
pub fn exec_lock() -> MutexGuard<'static, ()> {
    EXEC_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// A throwaway Python install whose interpreter is a shell script
pub struct FakePython {
    pub dir: TempDir,
    pub executable: PathBuf,
    pub include_dir: PathBuf,
    pub lib_dir: PathBuf,
    pub library: PathBuf,
    pub stdlib: PathBuf,
}

impl FakePython {
    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

/// Create a fake Python 3.10 install
///
/// The interpreter prints probe JSON matching the install layout. With
/// `with_header` false, `Python.h` is left out.
pub fn fake_python(with_header: bool) -> FakePython {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    let bin = root.join("bin");
    let include_dir = root.join("include").join("python3.10");
    let lib_dir = root.join("lib");
    let stdlib = lib_dir.join("python3.10");
    std::fs::create_dir_all(&bin).unwrap();
    std::fs::create_dir_all(&include_dir).unwrap();
    std::fs::create_dir_all(&stdlib).unwrap();

    let library = lib_dir.join("libpython3.10.so.1.0");
    std::fs::write(&library, "").unwrap();
    if with_header {
        std::fs::write(include_dir.join(HEADER_MARKER), "/* Python.h */\n").unwrap();
    }

    let executable = bin.join("python3");
    let json = format!(
        r#"{{"executable": "{exe}", "version": [3, 10, 12], "prefix": "{root}", "base_prefix": "{root}", "platform": "linux", "paths": {{"stdlib": "{stdlib}", "include": "{include}"}}, "config": {{"INCLUDEPY": "{include}", "LIBDIR": "{lib}", "LIBPL": "{lib}/python3.10/config-3.10", "LDLIBRARY": "libpython3.10.so.1.0", "LIBRARY": "libpython3.10.a", "MULTIARCH": null}}}}"#,
        exe = executable.display(),
        root = root.display(),
        stdlib = stdlib.display(),
        include = include_dir.display(),
        lib = lib_dir.display(),
    );
    write_script(&executable, &format!("cat <<'EOF'\n{}\nEOF\n", json));

    FakePython {
        dir,
        executable,
        include_dir,
        lib_dir,
        library,
        stdlib,
    }
}

/// Write an executable `/bin/sh` script
pub fn write_script(path: &Path, body: &str) {
    std::fs::write(path, format!("#!/bin/sh\n{}", body)).unwrap();
    let mut perms = std::fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms).unwrap();
}
