//! Project-wide variable index
//!
//! Scans the project tree once, records which file (namespace) defines each
//! variable, and hands the resulting read-only index to every per-file lint
//! invocation. Indexed files are read as plain text: definitions are found
//! by a single linear scan for `$name:`, not by parsing, which keeps the
//! whole-project pass cheap.
//!
//! Scan order is deterministic: directory entries are sorted by name and
//! traversed depth-first. When two files define the same bare name, the
//! last-scanned definition wins.

use std::fs;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Fatal index-construction failure
///
/// The index underlies every classification, so a tree that cannot be
/// walked aborts the whole run. Unreadable individual files are skipped
/// with a warning instead.
#[derive(Error, Debug, Diagnostic)]
pub enum IndexError {
    #[error("failed to read directory `{}`", path.display())]
    #[diagnostic(
        code(index::walk),
        help("the variable index requires a readable project tree")
    )]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Mapping from bare variable name to the namespace that defines it
#[derive(Debug, Clone, Default)]
pub struct NamespaceIndex {
    map: FxHashMap<String, String>,
}

impl NamespaceIndex {
    /// Build the index from a full recursive scan of `root`
    pub fn build(root: &Path) -> Result<Self, IndexError> {
        let files = scan_files(root)?;
        let mut map: FxHashMap<String, String> = FxHashMap::default();

        for path in &files {
            if !is_stylesheet_source(path) {
                continue;
            }
            let namespace = namespace_of(path);
            let text = match fs::read_to_string(path) {
                Ok(text) => text,
                Err(err) => {
                    tracing::warn!(
                        "skipping `{}` while indexing: {}",
                        path.display(),
                        err
                    );
                    continue;
                }
            };
            for name in variable_definitions(&text) {
                if let Some(previous) = map.insert(name.clone(), namespace.clone()) {
                    if previous != namespace {
                        tracing::debug!(
                            "variable `${}` redefined: `{}` overrides `{}`",
                            name,
                            namespace,
                            previous
                        );
                    }
                }
            }
        }

        tracing::debug!(
            "indexed {} variable definitions under `{}`",
            map.len(),
            root.display()
        );
        Ok(Self { map })
    }

    /// Build an index from explicit entries, mainly for tests and tooling
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            map: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Namespace owning the bare variable `name`, if any file defines it
    pub fn namespace_of_var(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate `(variable, namespace)` entries in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Recursively enumerate regular files under `root`, depth-first, with
/// directory entries visited in file-name order
pub fn scan_files(root: &Path) -> Result<Vec<PathBuf>, IndexError> {
    let mut files = Vec::new();
    scan_into(root, &mut files)?;
    Ok(files)
}

fn scan_into(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IndexError> {
    let read_dir = fs::read_dir(dir).map_err(|source| IndexError::Walk {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut entries: Vec<_> = read_dir
        .collect::<Result<_, _>>()
        .map_err(|source| IndexError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            scan_into(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

/// Whether a path looks like an SCSS source file worth indexing: a
/// letters-only base name (with the usual `_` partial prefix allowed)
/// and a plain `.scss` extension
pub fn is_stylesheet_source(path: &Path) -> bool {
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name,
        None => return false,
    };
    let stem = match name.strip_suffix(".scss") {
        Some(stem) => stem,
        None => return false,
    };
    let stem = stem.strip_prefix('_').unwrap_or(stem);
    !stem.is_empty() && stem.chars().all(|c| c.is_ascii_alphabetic())
}

/// Namespace a file contributes: its base name, partial prefix stripped,
/// up to the first `.`
///
/// `_colors.scss` is consumed as `@use "colors"` / `colors.$var`, so the
/// underscore never appears in the namespace.
pub fn namespace_of(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = name.strip_prefix('_').unwrap_or(&name);
    name.split('.').next().unwrap_or("").to_string()
}

/// Extract every variable *definition* from raw text in one linear scan:
/// `$`, an ASCII-alphanumeric run, then (after optional whitespace) a `:`.
/// Plain references like `margin: $gap` do not count, so a consuming file
/// cannot claim ownership of a variable it merely uses.
pub fn variable_definitions(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut names = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'$' {
            i += 1;
            continue;
        }
        let start = i + 1;
        let mut end = start;
        while end < bytes.len() && bytes[end].is_ascii_alphanumeric() {
            end += 1;
        }
        if end > start {
            let mut after = end;
            while after < bytes.len() && (bytes[after] == b' ' || bytes[after] == b'\t') {
                after += 1;
            }
            if after < bytes.len() && bytes[after] == b':' {
                names.push(text[start..end].to_string());
            }
        }
        i = end.max(i + 1);
    }

    names
}
