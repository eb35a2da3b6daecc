//! Package metadata discovery.
//!
//! Walks up from the input file's directory looking for `package.json` and a
//! readme, then copies what it found onto the project before serialization.

use crate::config::PackageConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tessera_model::ProjectReflection;
use tracing::{debug, error, warn};

/// Name used when neither configuration nor `package.json` names the project.
pub const DEFAULT_PROJECT_NAME: &str = "Documentation";

/// The fields of `package.json` Tessera reads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageJson {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readme {
    pub path: PathBuf,
    pub contents: String,
}

/// What discovery found. Either part may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageMetadata {
    pub package: Option<PackageJson>,
    pub package_file: Option<PathBuf>,
    pub readme: Option<Readme>,
}

/// Directory discovery starts from for a model at `input`.
///
/// Always absolute, so walking ancestors reaches past the working directory
/// even for a bare file name such as `model.json`.
pub fn search_root(input: &Path) -> PathBuf {
    let parent = match input.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    absolute(parent)
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path)
        .map(|resolved| resolved.components().collect())
        .unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "Could not resolve path, searching as given");
            path.to_path_buf()
        })
}

/// Search `start` and its ancestors.
///
/// A relative `start` is resolved against the working directory first.
/// An explicitly configured readme is read even when discovery is disabled.
/// A configured readme that cannot be read is logged and skipped.
pub fn discover(start: &Path, config: &PackageConfig) -> PackageMetadata {
    let start = absolute(start);
    let start = start.as_path();
    debug!(start = %start.display(), "Searching for package.json and readme");

    let mut metadata = PackageMetadata::default();
    if config.discover {
        if let Some((file, package)) = find_package_json(start) {
            metadata.package_file = Some(file);
            metadata.package = Some(package);
        }
    }

    metadata.readme = match config.readme.as_deref() {
        Some(readme) if readme.eq_ignore_ascii_case("none") => None,
        Some(readme) => read_readme(Path::new(readme)),
        None if config.discover => find_readme(start),
        None => None,
    };
    metadata
}

/// Copy discovered metadata onto `project`.
///
/// `packageName` always follows `package.json`. The project name is only
/// filled when empty. A leading `v` is stripped from the version.
pub fn apply(project: &mut ProjectReflection, metadata: &PackageMetadata, include_version: bool) {
    if let Some(readme) = &metadata.readme {
        project.readme = Some(readme.contents.clone());
    }

    match &metadata.package {
        Some(package) => {
            project.package_name = Some(package.name.clone());
            if project.base.name.is_empty() {
                project.base.name = if package.name.is_empty() {
                    DEFAULT_PROJECT_NAME.to_string()
                } else {
                    package.name.clone()
                };
            }
            if include_version {
                project.package_version = package
                    .version
                    .as_deref()
                    .map(|v| v.strip_prefix('v').unwrap_or(v).to_string());
            }
        }
        None if project.base.name.is_empty() => {
            warn!(
                "No project name configured and no package.json found, defaulting to \"{}\"",
                DEFAULT_PROJECT_NAME
            );
            project.base.name = DEFAULT_PROJECT_NAME.to_string();
        }
        None => {}
    }
}

fn find_package_json(start: &Path) -> Option<(PathBuf, PackageJson)> {
    for dir in start.ancestors() {
        let file = dir.join("package.json");
        if !file.is_file() {
            continue;
        }
        let parsed = fs::read_to_string(&file)
            .map_err(|e| e.to_string())
            .and_then(|content| {
                serde_json::from_str::<PackageJson>(&content).map_err(|e| e.to_string())
            });
        match parsed {
            Ok(package) => {
                debug!(file = %file.display(), name = %package.name, "Found package.json");
                return Some((file, package));
            }
            Err(reason) => {
                warn!(file = %file.display(), %reason, "Ignoring unreadable package.json");
            }
        }
    }
    None
}

/// First file named `readme.md`, compared case-insensitively, in `start` or above.
fn find_readme(start: &Path) -> Option<Readme> {
    start.ancestors().find_map(|dir| {
        let entries = fs::read_dir(dir).ok()?;
        let path = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .find(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.eq_ignore_ascii_case("readme.md"))
            })?;
        let contents = fs::read_to_string(&path).ok()?;
        debug!(file = %path.display(), "Found readme");
        Some(Readme { path, contents })
    })
}

fn read_readme(path: &Path) -> Option<Readme> {
    match fs::read_to_string(path) {
        Ok(contents) => Some(Readme {
            path: path.to_path_buf(),
            contents,
        }),
        Err(e) => {
            error!(file = %path.display(), error = %e, "Configured readme could not be read");
            None
        }
    }
}
