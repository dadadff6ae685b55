mod common;

use similar_asserts::assert_eq;
use weld_core::AnyEmptyResult;

fn project() -> tempfile::TempDir {
	let tmp = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
	common::write(tmp.path(), "main.js", "/* borschik:include:lib/a.js */\nvar m = 1;\n");
	common::write(tmp.path(), "lib/a.js", "var a = 1;\n");
	tmp
}

#[test]
fn writes_the_default_output_file() -> AnyEmptyResult {
	let tmp = project();

	common::weld_cmd()
		.current_dir(tmp.path())
		.arg("main.js")
		.assert()
		.success()
		.stdout(predicates::str::contains("compiled"));

	let output = std::fs::read_to_string(tmp.path().join("main.output.js"))?;
	assert_eq!(output, "var a=1;var m=1;");

	Ok(())
}

#[test]
fn writes_an_explicit_output_and_source_map() -> AnyEmptyResult {
	let tmp = project();

	common::weld_cmd()
		.current_dir(tmp.path())
		.args(["main.js", "-o", "dist.js", "--source-map", "dist.js.map"])
		.assert()
		.success();

	let output = std::fs::read_to_string(tmp.path().join("dist.js"))?;
	assert_eq!(output, "var a=1;var m=1;\n//# sourceMappingURL=dist.js.map");

	let map = std::fs::read_to_string(tmp.path().join("dist.js.map"))?;
	assert!(map.starts_with("{\"version\":3,"));
	assert!(map.contains("lib/a.js"));

	Ok(())
}

#[test]
fn pretty_prints_code() -> AnyEmptyResult {
	let tmp = project();

	common::weld_cmd()
		.current_dir(tmp.path())
		.args(["main.js", "--pretty-print"])
		.assert()
		.success();

	let output = std::fs::read_to_string(tmp.path().join("main.output.js"))?;
	assert_eq!(output, "var a = 1;\nvar m = 1;");

	Ok(())
}

#[test]
fn round_trips_through_ast_documents() -> AnyEmptyResult {
	let tmp = project();

	common::weld_cmd()
		.current_dir(tmp.path())
		.args(["main.js", "--output-format", "ast", "--pretty-print"])
		.assert()
		.success();

	let document = std::fs::read_to_string(tmp.path().join("main.output.json"))?;
	assert!(document.starts_with("{\n    \"type\": \"Program\""));

	common::weld_cmd()
		.current_dir(tmp.path())
		.args(["main.output.json", "--input-format", "ast", "-o", "back.js"])
		.assert()
		.success();

	let output = std::fs::read_to_string(tmp.path().join("back.js"))?;
	assert_eq!(output, "var a=1;var m=1;");

	Ok(())
}

#[test]
fn uses_a_custom_marker() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write(tmp.path(), "main.js", "/* weld:include:a.js */ var m = 1;");
	common::write(tmp.path(), "a.js", "var a = 1;");

	common::weld_cmd()
		.current_dir(tmp.path())
		.args(["main.js", "--marker", "weld"])
		.assert()
		.success();

	let output = std::fs::read_to_string(tmp.path().join("main.output.js"))?;
	assert_eq!(output, "var a=1;var m=1;");

	Ok(())
}

#[test]
fn verbose_logs_each_include() {
	let tmp = project();

	common::weld_cmd()
		.current_dir(tmp.path())
		.args(["main.js", "--verbose"])
		.assert()
		.success()
		.stderr(predicates::str::contains("included"));
}

#[test]
fn rejects_unknown_formats() {
	let tmp = project();

	common::weld_cmd()
		.current_dir(tmp.path())
		.args(["main.js", "--output-format", "xml"])
		.assert()
		.code(2)
		.stderr(predicates::str::contains("unknown output format `xml`"));
}

#[test]
fn rejects_unknown_transforms() {
	let tmp = project();

	common::weld_cmd()
		.current_dir(tmp.path())
		.args(["main.js", "--transforms", "include,minify"])
		.assert()
		.code(2)
		.stderr(predicates::str::contains("`minify`"));

	assert!(!tmp.path().join("main.output.js").exists());
}

#[test]
fn reports_validity_threats_without_writing() {
	let tmp = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
	common::write(tmp.path(), "main.js", "/* borschik:include:data.json */ var m = 1;");
	common::write(tmp.path(), "data.json", "{\"a\": 1}");

	common::weld_cmd()
		.current_dir(tmp.path())
		.arg("main.js")
		.assert()
		.code(2)
		.stderr(predicates::str::contains("validity threat"));

	assert!(!tmp.path().join("main.output.js").exists());
}

#[test]
fn reports_missing_includes() {
	let tmp = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
	common::write(tmp.path(), "main.js", "/* borschik:include:gone.js */ var m = 1;");

	common::weld_cmd()
		.current_dir(tmp.path())
		.arg("main.js")
		.assert()
		.code(2)
		.stderr(predicates::str::contains("gone.js"));
}
