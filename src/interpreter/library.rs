// src/interpreter/library.rs

//! Choosing the Python library and its link name per operating system
//!
//! - Windows: `<base_prefix>/libs/python{major}{minor}.lib`; the link name
//!   is the file stem (`python310`).
//! - macOS: `LDLIBRARY` when it names a dylib, else `LIBRARY` (framework
//!   builds put a framework path in `LDLIBRARY`).
//! - Linux and other POSIX, including Cygwin and MSYS2: `LDLIBRARY`.
//!
//! POSIX link names drop the `lib` prefix and the extension, including any
//! trailing soname version (`libpython3.10.so.1.0` -> `python3.10`) or
//! import-library suffix (`libpython3.9.dll.a` -> `python3.9`).

use crate::interpreter::probe::ProbeOutput;
use crate::settings::TargetOs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Locate the library the interpreter links against
///
/// Returns `None` when the interpreter does not report a library name.
pub fn select_library(os: &TargetOs, probe: &ProbeOutput) -> Option<PathBuf> {
    if os.is_windows() {
        let file = format!("python{}.lib", probe.version.nodot());
        return Some(probe.base_prefix().join("libs").join(file));
    }

    let file = library_file_name(os, probe)?;
    let candidates = candidate_dirs(probe);

    for dir in &candidates {
        let path = dir.join(file);
        if path.exists() {
            debug!("Found Python library at {}", path.display());
            return Some(path);
        }
    }

    // Nothing on disk; report where LIBDIR says it should be
    let fallback = candidates
        .into_iter()
        .next()
        .unwrap_or_else(|| probe.prefix.join("lib"));
    Some(fallback.join(file))
}

fn library_file_name<'a>(os: &TargetOs, probe: &'a ProbeOutput) -> Option<&'a str> {
    let ldlibrary = probe.config_var("LDLIBRARY");
    match os {
        TargetOs::Macos => ldlibrary
            .filter(|name| !name.contains('/') && name.ends_with(".dylib"))
            .or_else(|| probe.config_var("LIBRARY"))
            .or(ldlibrary),
        _ => ldlibrary.or_else(|| probe.config_var("LIBRARY")),
    }
}

fn candidate_dirs(probe: &ProbeOutput) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(libdir) = probe.config_var("LIBDIR") {
        let libdir = PathBuf::from(libdir);
        if let Some(multiarch) = probe.config_var("MULTIARCH") {
            dirs.push(libdir.join(multiarch));
        }
        dirs.insert(0, libdir);
    }
    if let Some(libpl) = probe.config_var("LIBPL") {
        dirs.push(PathBuf::from(libpl));
    }
    dirs
}

/// Name passed to the linker for a library file
pub fn link_name(os: &TargetOs, library: &Path) -> Option<String> {
    if os.is_windows() {
        return library
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned());
    }

    let file = library.file_name()?.to_string_lossy();
    let name = file.strip_prefix("lib").unwrap_or(&*file);
    let name = match name.find(".so") {
        Some(idx) if is_soname_suffix(&name[idx..]) => &name[..idx],
        _ => name
            .strip_suffix(".dylib")
            .or_else(|| name.strip_suffix(".tbd"))
            .or_else(|| name.strip_suffix(".dll.a"))
            .or_else(|| name.strip_suffix(".a"))
            // framework binaries have no extension
            .unwrap_or(name),
    };

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// `.so` optionally followed by `.N` version components
fn is_soname_suffix(suffix: &str) -> bool {
    match suffix.strip_prefix(".so") {
        Some("") => true,
        Some(rest) => rest.strip_prefix('.').is_some_and(|versions| {
            versions
                .split('.')
                .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
        }),
        None => false,
    }
}
