//! Build-time source file management.
//!
//! A [`Filer`] hands out sinks for generated source files keyed by their
//! qualified type name, so the files it creates are tracked by whatever build
//! step owns it instead of being written to arbitrary paths.

use std::collections::HashSet;
use std::env;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use restdsl_core::transform::name_normalizer::is_qualified_name;

/// A source generation facility that owns where generated files go.
pub trait Filer {
    /// Open a sink for the source file of `qualified_name` (`pkg.Class`).
    fn create_source_file(&mut self, qualified_name: &str) -> io::Result<Box<dyn Write + '_>>;
}

/// Filer rooted at a build output directory, typically `OUT_DIR` in a build
/// script.
///
/// Each qualified name may be created once per filer; a second request fails
/// with [`io::ErrorKind::AlreadyExists`].
#[derive(Debug)]
pub struct BuildDirFiler {
    root: PathBuf,
    created: HashSet<String>,
    generated: Vec<PathBuf>,
}

impl BuildDirFiler {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            created: HashSet::new(),
            generated: Vec::new(),
        }
    }

    /// Root the filer at `$OUT_DIR`.
    pub fn from_out_dir() -> io::Result<Self> {
        let out_dir = env::var_os("OUT_DIR").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "OUT_DIR is not set")
        })?;
        Ok(Self::new(out_dir))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Files created so far, in creation order.
    pub fn generated(&self) -> &[PathBuf] {
        &self.generated
    }

    /// Where the source for `qualified_name` lives under the root.
    pub fn source_path(&self, qualified_name: &str) -> PathBuf {
        source_path(&self.root, qualified_name)
    }
}

impl Filer for BuildDirFiler {
    fn create_source_file(&mut self, qualified_name: &str) -> io::Result<Box<dyn Write + '_>> {
        if !is_qualified_name(qualified_name) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{qualified_name:?} is not a qualified type name"),
            ));
        }
        if self.created.contains(qualified_name) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("source file for {qualified_name} was already created"),
            ));
        }

        let path = self.source_path(qualified_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&path)?;

        log::debug!("filer created {}", path.display());
        self.created.insert(qualified_name.to_string());
        self.generated.push(path);
        Ok(Box::new(BufWriter::new(file)))
    }
}

/// `com.example.Routes` → `<root>/com/example/Routes.java`.
pub fn source_path(root: &Path, qualified_name: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    let mut segments = qualified_name.split('.').peekable();
    while let Some(segment) = segments.next() {
        if segments.peek().is_some() {
            path.push(segment);
        } else {
            path.push(format!("{segment}.java"));
        }
    }
    path
}
