use std::cell::RefCell;
use std::fmt::Debug;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use indexmap::IndexMap;

use crate::WeldError;
use crate::WeldResult;

/// Storage used to read included files and write compile artifacts.
pub trait FileSystem: Debug {
	fn read(&self, path: &str) -> WeldResult<String>;

	fn write(&self, path: &str, data: &str) -> WeldResult<()>;

	/// The canonical path of `path` with symlinks resolved, if it exists.
	fn realpath(&self, path: &str) -> Option<String>;
}

/// The directory part of `path`: `a/b.js` gives `a`, `b.js` gives `.`.
pub fn dirname(path: &str) -> String {
	match Path::new(path).parent() {
		Some(parent) if parent.as_os_str().is_empty() => ".".to_string(),
		Some(parent) => parent.to_string_lossy().into_owned(),
		None if path.starts_with('/') => "/".to_string(),
		None => ".".to_string(),
	}
}

/// Join `segments` into an absolute, normalised path. Later absolute segments
/// replace everything before them and a relative result is anchored at the
/// current working directory.
pub fn resolve<I, S>(segments: I) -> String
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
	resolve_from(&cwd, segments)
}

/// [`resolve`] against an explicit base directory.
pub fn resolve_from<I, S>(base: &Path, segments: I) -> String
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut joined = base.to_path_buf();
	for segment in segments {
		// Pushing an absolute path replaces the buffer.
		joined.push(segment.as_ref());
	}
	normalize(&joined).to_string_lossy().into_owned()
}

/// Resolve `.` and `..` lexically, without touching the file system.
fn normalize(path: &Path) -> PathBuf {
	let mut normalized = PathBuf::new();
	for component in path.components() {
		match component {
			Component::CurDir => {}
			Component::ParentDir => {
				normalized.pop();
			}
			other => normalized.push(other.as_os_str()),
		}
	}
	normalized
}

/// The real file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
	fn read(&self, path: &str) -> WeldResult<String> {
		std::fs::read_to_string(path).map_err(|e| {
			WeldError::Read {
				path: path.to_string(),
				reason: e.to_string(),
			}
		})
	}

	fn write(&self, path: &str, data: &str) -> WeldResult<()> {
		std::fs::write(path, data).map_err(|e| {
			WeldError::Write {
				path: path.to_string(),
				reason: e.to_string(),
			}
		})
	}

	fn realpath(&self, path: &str) -> Option<String> {
		std::fs::canonicalize(path)
			.ok()
			.map(|path| path.to_string_lossy().into_owned())
	}
}

/// Files held in memory, keyed by absolute path. Symlinks are modelled as
/// file-to-file links that [`FileSystem::realpath`] follows.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
	files: RefCell<IndexMap<String, String>>,
	links: IndexMap<String, String>,
}

impl MemoryFileSystem {
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with_file(self, path: &str, content: &str) -> Self {
		self.insert(path, content);
		self
	}

	/// Make `path` a link to `target`.
	#[must_use]
	pub fn with_link(mut self, path: &str, target: &str) -> Self {
		self.links.insert(resolve([path]), resolve([target]));
		self
	}

	pub fn insert(&self, path: &str, content: &str) {
		self.files
			.borrow_mut()
			.insert(resolve([path]), content.to_string());
	}

	pub fn get(&self, path: &str) -> Option<String> {
		let path = self.follow(&resolve([path]));
		self.files.borrow().get(&path).cloned()
	}

	/// Every stored path, in insertion order.
	pub fn paths(&self) -> Vec<String> {
		self.files.borrow().keys().cloned().collect()
	}

	fn follow(&self, path: &str) -> String {
		self.links
			.get(path)
			.cloned()
			.unwrap_or_else(|| path.to_string())
	}
}

impl FileSystem for MemoryFileSystem {
	fn read(&self, path: &str) -> WeldResult<String> {
		self.get(path).ok_or_else(|| {
			WeldError::Read {
				path: path.to_string(),
				reason: "no such file".to_string(),
			}
		})
	}

	fn write(&self, path: &str, data: &str) -> WeldResult<()> {
		let target = self.follow(&resolve([path]));
		self.files.borrow_mut().insert(target, data.to_string());
		Ok(())
	}

	fn realpath(&self, path: &str) -> Option<String> {
		let target = self.follow(&resolve([path]));
		self.files.borrow().contains_key(&target).then_some(target)
	}
}
