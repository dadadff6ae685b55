use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn weld_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("weld"));
	cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
	cmd
}

/// Write `content` to `path` under `root`, creating parent directories.
#[allow(dead_code)]
pub fn write(root: &Path, path: &str, content: &str) {
	let path = root.join(path);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent).unwrap_or_else(|e| panic!("create {}: {e}", parent.display()));
	}
	std::fs::write(&path, content).unwrap_or_else(|e| panic!("write {}: {e}", path.display()));
}
