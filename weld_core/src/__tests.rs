use rstest::rstest;
use similar_asserts::assert_eq;
use tracing_test::traced_test;

use super::__fixtures::*;
use super::*;
use crate::splice::Origin;
use crate::splice::splice;

#[rstest]
#[case::custom_suffix_wins("a.custom.js", Some("txt"), Some("custom.js"))]
#[case::longest_suffix_first("a.complex.custom.js", Some("txt"), Some("custom.js"))]
#[case::plain_suffix("a.js", Some("txt"), Some("js"))]
#[case::json("data/config.json", None, Some("json"))]
#[case::dotted_directory("dir.v1/a.json", None, Some("json"))]
#[case::default_fallback("style.css", Some("txt"), Some("txt"))]
#[case::no_default("style.css", None, None)]
#[case::unknown_default("style.css", Some("css"), None)]
fn tech_lookup_prefers_longest_suffix(
	#[case] file_name: &str,
	#[case] default: Option<&str>,
	#[case] expected: Option<&str>,
) {
	let mut techs = TechRegistry::with_builtins();
	techs.register("custom.js", RecordingTech::default());

	assert_eq!(techs.lookup_name(file_name, default), expected);
	assert_eq!(techs.lookup(file_name, default).is_some(), expected.is_some());
}

#[test]
fn tech_aliases_require_a_registered_target() -> AnyEmptyResult {
	let mut techs = TechRegistry::with_builtins();
	techs.alias("es", JS_TECH)?;

	assert_eq!(techs.lookup_name("module.es", None), Some("es"));
	assert!(matches!(
		techs.alias("coffee", "coffee"),
		Err(WeldError::MissingTech(name)) if name == "coffee"
	));

	Ok(())
}

#[test]
fn txt_tech_wraps_the_whole_text() -> AnyEmptyResult {
	let shared = SharedOptions::new();
	let ast = TxtTech.parse("one\ntwo", &ParseOptions {
		source_path: Some("notes.txt"),
		shared: &shared,
	})?;

	let [literal] = ast.body() else {
		panic!("expected a single literal, got {:?}", ast.body());
	};
	assert_eq!(literal.kind, NodeKind::Literal);
	assert_eq!(literal.string_value(), Some("one\ntwo"));
	assert_eq!(literal.range, Some(Span(0, 7)));

	let loc = literal.loc.as_ref().unwrap_or_else(|| panic!("missing loc"));
	assert_eq!(loc.start, Point::new(1, 0));
	assert_eq!(loc.end, Point::new(2, 3));
	assert_eq!(loc.source.as_deref(), Some("notes.txt"));

	Ok(())
}

#[test]
fn json_tech_produces_one_expression() -> AnyEmptyResult {
	let shared = SharedOptions::new();
	let ast = JsonTech.parse(r#"{"a": [1, 2], "b": null}"#, &ParseOptions {
		source_path: None,
		shared: &shared,
	})?;

	let [object] = ast.body() else {
		panic!("expected a single expression, got {:?}", ast.body());
	};
	assert_eq!(object.kind, NodeKind::ObjectExpression);
	assert_eq!(object.nodes("properties").map(<[Node]>::len), Some(2));

	Ok(())
}

#[rstest]
#[case::regex_member("x = /ab+c/g.test(s);", "x=/ab+c/g.test(s);")]
#[case::regex_after_division("a = b / 2 / c; r = /[/]\\//i;", "a=b/2/c;r=/[/]\\//i;")]
#[case::regex_after_keyword("function f() { return /x/; }", "function f(){return/x/;}")]
#[case::array_holes("x = [1,, 2,];", "x=[1,,2];")]
#[case::trailing_hole("x = [1,,];", "x=[1,,];")]
#[case::only_hole("x = [,];", "x=[,];")]
#[case::accessors(
	"x = { get a() { return 1; }, set a(v) {}, get: 2 };",
	"x={get a(){return 1;},set a(v){},get:2};"
)]
#[case::labels("outer: for (;;) { continue outer; }", "outer:for(;;){continue outer;}")]
#[case::labelled_block("a: { break a; }", "a:{break a;}")]
#[case::with("with (o) { p = 1; }", "with(o){p=1;}")]
#[case::short_numbers(
	"x = [1e300, 1e21, 1000000, 0.0000001, 1.5, 100];",
	"x=[1e300,1e21,1e6,1e-7,1.5,100];"
)]
fn js_tech_round_trips(#[case] code: &str, #[case] expected: &str) -> AnyEmptyResult {
	assert_eq!(generate(&parse_js(code, None)?)?, expected);

	Ok(())
}

#[rstest]
#[case::top_level_return("return 1;", "Illegal return statement", 1)]
#[case::undefined_label("for (;;) { break missing; }", "Undefined label 'missing'", 18)]
#[case::label_shadowing("a: a: x();", "Label 'a' has already been declared", 4)]
#[case::labels_stop_at_functions("a: function f() { break a; }", "Undefined label 'a'", 25)]
#[case::unterminated_regex("x = /ab\n/;", "Invalid regular expression: missing /", 5)]
fn js_tech_rejects_invalid_scripts(#[case] code: &str, #[case] message: &str, #[case] expected_column: usize) {
	let result = parse_js(code, None);

	assert!(
		matches!(
			&result,
			Err(WeldError::Parse { line: 1, column, description, .. })
				if *column == expected_column && description == message
		),
		"unexpected result: {result:?}"
	);
}

#[test]
fn parse_columns_count_utf16_units() {
	let result = parse_js("var s = 'ééé'; #", Some("main.js"));

	assert!(
		matches!(
			&result,
			Err(WeldError::Parse { index: 18, line: 1, column: 16, .. })
		),
		"unexpected result: {result:?}"
	);
}

#[test]
fn locations_count_utf16_units() -> AnyEmptyResult {
	let ast = parse_js("var s = '😀'; var t;", None)?;
	let second = ast.body().get(1).unwrap_or_else(|| panic!("missing statement"));

	assert_eq!(second.range.map(|range| range.start()), Some(16));
	assert_eq!(second.start(), Some(Point::new(1, 14)));

	Ok(())
}

#[rstest]
#[case::default_marker("borschik", " borschik:include:lib/a.js ", Some("lib/a.js"))]
#[case::custom_marker("weld", "weld:include:a.js", Some("a.js"))]
#[case::other_marker("weld", "borschik:include:a.js", None)]
#[case::not_a_directive("borschik", "borschik:require:a.js", None)]
#[case::escaped_marker("a.b", "axb:include:a.js", None)]
fn directive_pattern_extracts_paths(
	#[case] marker: &str,
	#[case] text: &str,
	#[case] expected: Option<&str>,
) -> AnyEmptyResult {
	let pattern = DirectivePattern::new(marker)?;
	assert_eq!(pattern.match_path(text), expected);

	Ok(())
}

#[test]
fn line_comments_are_not_directives() -> AnyEmptyResult {
	let code = compiled(
		&[("a.js", "var x = 1;")],
		"// borschik:include:a.js\nvar a = 1;",
	)?;
	assert_eq!(code, "var a=1;");

	Ok(())
}

#[test]
fn includes_before_the_enclosing_statement() -> AnyEmptyResult {
	let code = compiled(
		&[("a.js", "var x = 1;")],
		"var a = /*borschik:include:a.js*/ 1;",
	)?;
	insta::assert_snapshot!(code, @"var x=1;var a=1;");

	Ok(())
}

#[test]
fn before_siblings_keep_document_order() -> AnyEmptyResult {
	let code = compiled(
		&[("b.js", "var b = 2;"), ("c.js", "var c = 3;")],
		"/* borschik:include:b.js */ /* borschik:include:c.js */ var a = 1;",
	)?;
	assert_eq!(code, "var b=2;var c=3;var a=1;");

	Ok(())
}

#[test]
fn after_siblings_keep_document_order() -> AnyEmptyResult {
	let code = compiled(
		&[("b.js", "var b = 2;"), ("c.js", "var c = 3;")],
		"var a = 1; /* borschik:include:b.js */ /* borschik:include:c.js */",
	)?;
	assert_eq!(code, "var a=1;var b=2;var c=3;");

	Ok(())
}

#[test]
fn fills_an_empty_block_in_order() -> AnyEmptyResult {
	let code = compiled(
		&[("b.js", "var b = 2;"), ("c.js", "var c = 3;")],
		"function f() { /* borschik:include:b.js */ /* borschik:include:c.js */ }",
	)?;
	assert_eq!(code, "function f(){var b=2;var c=3;}");

	Ok(())
}

#[test]
fn fills_an_empty_program() -> AnyEmptyResult {
	let code = compiled(&[("b.js", "var b = 2;")], "/* borschik:include:b.js */")?;
	assert_eq!(code, "var b=2;");

	Ok(())
}

#[test]
fn fills_empty_blocks_of_ast_inputs() -> AnyEmptyResult {
	let ast = parse_js("function f() { /* borschik:include:b.js */ }", Some("main.js"))?;
	let compiler = Compiler::with_file_system(memory_fs(&[("b.js", "var b = 2;")]));

	let output = compiler.compile(Input::Ast(ast.clone()), &CompileOptions::default())?;
	assert_eq!(output.compiled_source.as_deref(), Some("function f(){var b=2;}"));

	let document = ast_document(&ast, false)?;
	let from_document = compiler.compile(Input::Ast(Ast::parse_document(&document)?), &CompileOptions::default())?;
	assert_eq!(from_document.compiled_source.as_deref(), Some("function f(){var b=2;}"));

	Ok(())
}

#[test]
fn keeps_before_into_and_after_in_document_order() -> AnyEmptyResult {
	let code = compiled(
		&[("a.js", "var a = 1;"), ("b.js", "var b = 2;"), ("c.js", "var c = 3;")],
		"function f() {\n\t/* borschik:include:a.js */ g(function () { /* borschik:include:b.js */ }); /* borschik:include:c.js */\n}",
	)?;
	assert_eq!(code, "function f(){var a=1;g(function(){var b=2;});var c=3;}");

	Ok(())
}

#[rstest]
#[case::object(
	"var o = { /* borschik:include:o.json */ };",
	r#"{"a": [1, 2]}"#,
	"var o={'a':[1,2]};"
)]
#[case::array("var l = [ /* borschik:include:o.json */ ];", "[1, 2]", "var l=[1,2];")]
#[case::array_with_object("var l = [ /* borschik:include:o.json */ ];", r#"{"k": true}"#, "var l={'k':true};")]
fn replaces_empty_atomic_values(
	#[case] code: &str,
	#[case] json: &str,
	#[case] expected: &str,
) -> AnyEmptyResult {
	assert_eq!(compiled(&[("o.json", json)], code)?, expected);

	Ok(())
}

#[test]
fn string_literal_directives_include_text() -> AnyEmptyResult {
	let code = compiled(
		&[("t.txt", "it's\n")],
		"var t = 'borschik:include:t.txt';",
	)?;
	assert_eq!(code, r#"var t="it's\n";"#);

	Ok(())
}

#[test]
fn string_literal_directives_ignore_the_suffix() -> AnyEmptyResult {
	let code = compiled(&[("a.js", "var x;")], "var t = 'borschik:include:a.js';")?;
	assert_eq!(code, "var t='var x;';");

	Ok(())
}

#[test]
fn unknown_suffixes_use_the_default_tech() -> AnyEmptyResult {
	let code = compiled(
		&[("style.css", "a{}")],
		"var css = [ /* borschik:include:style.css */ ];",
	)?;
	assert_eq!(code, "var css='a{}';");

	let compiler = Compiler::with_file_system(memory_fs(&[("style.css", "a{}")]));
	let options = CompileOptions {
		default_tech: None,
		..CompileOptions::default()
	};
	let result = compiler.compile(
		Input::Code("var css = [ /* borschik:include:style.css */ ];".into()),
		&options,
	);
	assert!(matches!(result, Err(WeldError::MissingTech(path)) if path == "style.css"));

	Ok(())
}

#[test]
fn reanchors_paths_at_every_depth() -> AnyEmptyResult {
	let fs = memory_fs(&[
		("/p/main.js", "/* borschik:include:lib/a.js */ var m = 1;"),
		(
			"/p/lib/a.js",
			"/* borschik:include:b.js */ /* borschik:include:../c.js */ var a = 1;",
		),
		("/p/lib/b.js", "var b = 1;"),
		("/p/c.js", "var c = 1;"),
		("/p/b.js", "var wrong = 1;"),
	]);
	let output = Compiler::with_file_system(fs).compile(Input::File("/p/main.js".into()), &CompileOptions::default())?;

	assert_eq!(
		output.compiled_source.as_deref(),
		Some("var b=1;var c=1;var a=1;var m=1;")
	);

	Ok(())
}

#[test]
fn symlinked_inputs_include_next_to_the_target() -> AnyEmptyResult {
	let fs = memory_fs(&[
		("/src/main.js", "/* borschik:include:a.js */ var m = 1;"),
		("/src/a.js", "var a = 1;"),
		("/work/a.js", "var wrong = 1;"),
	])
	.with_link("/work/main.js", "/src/main.js");
	let output = Compiler::with_file_system(fs).compile(Input::File("/work/main.js".into()), &CompileOptions::default())?;

	assert_eq!(output.compiled_source.as_deref(), Some("var a=1;var m=1;"));

	Ok(())
}

#[test]
fn rejects_statements_in_value_positions() {
	let result = compile_code(
		&[("two.js", "1; 2;")],
		"var l = [ /* borschik:include:two.js */ ];",
	);

	assert!(
		matches!(
			result,
			Err(WeldError::Validity {
				file: None,
				index: 10,
				line: 1,
				column: 11,
			})
		),
		"unexpected result: {result:?}"
	);
}

#[test]
fn rejects_a_single_statement_in_a_value_position() {
	let result = compile_code(
		&[("s.js", "var x;")],
		"var l = [ /* borschik:include:s.js */ ];",
	);

	assert!(
		matches!(
			result,
			Err(WeldError::Validity {
				file: None,
				index: 10,
				line: 1,
				column: 11,
			})
		),
		"unexpected result: {result:?}"
	);
}

#[test]
fn atomic_nodes_never_receive_nodes_into_their_lists() -> AnyEmptyResult {
	let mut ast = parse_js("var l = [];", None)?;
	let mut path = NodePath::default();
	path.push(Step::item("body", 0));
	path.push(Step::item("declarations", 0));
	path.push(Step::field("init"));

	let element = Node::new(NodeKind::Literal).with("value", serde_json::json!(1));
	let result = splice(
		&mut ast,
		&mut path,
		vec![element],
		&Placement::Into("elements".into()),
		&Origin::default(),
	);

	assert!(matches!(result, Err(WeldError::Validity { .. })), "unexpected result: {result:?}");
	assert_eq!(generate(&ast)?, "var l=[];");

	Ok(())
}

#[test]
fn rejects_values_among_statements_with_location() {
	let compiler = Compiler::with_file_system(memory_fs(&[("o.json", "[1]")]));
	let options = CompileOptions {
		source_path: Some("main.js".into()),
		..CompileOptions::default()
	};
	let result = compiler.compile(
		Input::Code("var a = 1;\n  /* borschik:include:o.json */ var b;".into()),
		&options,
	);

	assert!(
		matches!(
			&result,
			Err(WeldError::Validity {
				file: Some(file),
				index: 13,
				line: 2,
				column: 3,
			}) if file == "main.js"
		),
		"unexpected result: {result:?}"
	);
}

#[test]
fn validity_errors_name_the_including_file() {
	let compiler = Compiler::with_file_system(memory_fs(&[
		("/p/main.js", "/* borschik:include:lib/a.js */"),
		("/p/lib/a.js", "/* borschik:include:o.json */ var a;"),
		("/p/lib/o.json", "{}"),
	]));
	let result = compiler.compile(Input::File("/p/main.js".into()), &CompileOptions::default());

	assert!(
		matches!(
			&result,
			Err(WeldError::Validity { file: Some(file), line: 1, column: 1, .. }) if file == "lib/a.js"
		),
		"unexpected result: {result:?}"
	);
}

#[test]
fn missing_includes_fail_to_read() {
	let result = compile_code(&[], "/* borschik:include:missing.js */ var a;");

	assert!(
		matches!(&result, Err(WeldError::Read { path, .. }) if path.ends_with("missing.js")),
		"unexpected result: {result:?}"
	);
}

#[test]
fn resolution_consumes_every_directive() -> AnyEmptyResult {
	let files = [("a.js", "var x = 1; // note"), ("b.js", "var y = 2;")];
	let output = compile_code(
		&files,
		"/* borschik:include:a.js */ var a = 1; /* borschik:include:b.js */ /* keep */",
	)?;
	let ast = output.ast.unwrap_or_else(|| panic!("missing ast"));

	let pattern = DirectivePattern::new(DEFAULT_MARKER)?;
	assert!(find_directives(&pattern, &ast.comments, None).is_empty());
	assert!(ast.comments.iter().any(|comment| comment.value == " keep "));

	let mut remaining = 0;
	ast.program.for_each(&mut |node| {
		remaining += find_directives(&pattern, &node.leading_comments, None).len();
		remaining += find_directives(&pattern, &node.trailing_comments, None).len();
	});
	assert_eq!(remaining, 0);

	let again = Compiler::with_file_system(memory_fs(&files)).compile(Input::Ast(ast.clone()), &CompileOptions::default())?;
	assert_eq!(again.ast, Some(ast));

	Ok(())
}

#[test]
fn runs_transforms_in_order_with_shared_options() -> AnyEmptyResult {
	let transform = MarkerTransform::default();
	let tech = RecordingTech::default();
	let mut compiler = Compiler::with_file_system(memory_fs(&[
		("x.custom.js", "var x = 1;"),
		("y.custom.js", "var y = 2;"),
	]));
	compiler.techs_mut().register("custom.js", tech.clone());
	compiler.transforms_mut().register("marker", transform.clone());

	let options = CompileOptions {
		transforms: vec!["include".into(), "marker".into()],
		shared: shared("flag", true),
		..CompileOptions::default()
	};
	let output = compiler.compile(
		Input::Code("/* borschik:include:x.custom.js */ /* borschik:include:y.custom.js */ go();".into()),
		&options,
	)?;

	assert_eq!(
		output.compiled_source.as_deref(),
		Some("var x=1;var y=2;go();marker();")
	);
	assert_eq!(tech.calls.get(), 2);
	assert!(tech.seen.borrow().iter().all(|seen| seen == &options.shared));
	assert_eq!(*transform.seen.borrow(), vec![options.shared.clone()]);

	Ok(())
}

#[test]
fn unknown_transforms_fail_before_parsing() {
	let compiler = Compiler::with_file_system(MemoryFileSystem::new());
	let options = CompileOptions {
		transforms: vec!["minify".into()],
		..CompileOptions::default()
	};
	let mut output = CompileOutput::default();
	let result = compiler.compile_into(Input::Code("var a;".into()), &options, &mut output);

	assert!(matches!(result, Err(WeldError::UnknownTransform(name)) if name == "minify"));
	assert_eq!(output, CompileOutput::default());
}

#[rstest]
#[case::code("output", "code", Some(Format::Code))]
#[case::ast("input", "ast", Some(Format::Ast))]
#[case::unknown("output", "xml", None)]
fn parses_format_names(#[case] kind: &'static str, #[case] name: &str, #[case] expected: Option<Format>) {
	let result = Format::parse(kind, name);

	match expected {
		Some(format) => assert_eq!(result.ok(), Some(format)),
		None => {
			assert!(matches!(
				result,
				Err(WeldError::UnknownFormat { kind: reported, name: unknown }) if reported == kind && unknown == name
			));
		}
	}
}

#[test]
fn keeps_the_source_after_a_parse_failure() {
	let compiler = Compiler::with_file_system(MemoryFileSystem::new());
	let mut output = CompileOutput::default();
	let result = compiler.compile_into(
		Input::Code("var = ;".into()),
		&CompileOptions::default(),
		&mut output,
	);

	assert!(
		matches!(&result, Err(WeldError::Parse { line: 1, description, .. }) if description.contains("Unexpected token")),
		"unexpected result: {result:?}"
	);
	assert_eq!(output.source.as_deref(), Some("var = ;"));
	assert_eq!(output.ast, None);
	assert_eq!(output.compiled_source, None);
}

#[test]
fn pretty_prints_statements_on_their_own_lines() -> AnyEmptyResult {
	let compiler = Compiler::with_file_system(memory_fs(&[("a.js", "var x = 1;")]));
	let options = CompileOptions {
		pretty_print: true,
		..CompileOptions::default()
	};
	let output = compiler.compile(
		Input::Code("var a = /*borschik:include:a.js*/ 1;".into()),
		&options,
	)?;

	assert_eq!(
		output.compiled_source.as_deref(),
		Some("var x = 1;\nvar a = 1;")
	);

	Ok(())
}

#[test]
fn source_maps_list_every_contributing_file() -> AnyEmptyResult {
	let fs = memory_fs(&[
		("/p/main.js", "/* borschik:include:a.js */ /* borschik:include:b.js */ var m = 1;"),
		("/p/a.js", "var a = 1;"),
		("/p/b.js", "var b = 2;"),
	]);
	let options = CompileOptions {
		source_map: Some(SourceMap::Unnamed),
		..CompileOptions::default()
	};
	let output = Compiler::with_file_system(fs).compile(Input::File("/p/main.js".into()), &options)?;

	let code = output.compiled_source.unwrap_or_default();
	assert_eq!(code, "var a=1;var b=2;var m=1;");
	assert!(!code.contains("sourceMappingURL"));

	let map: serde_json::Value = serde_json::from_str(output.source_map.as_deref().unwrap_or("{}"))?;
	assert_eq!(map["version"], 3);
	let sources = map["sources"]
		.as_array()
		.unwrap_or_else(|| panic!("missing sources: {map}"));
	for expected in ["/p/main.js", "a.js", "b.js"] {
		assert!(sources.iter().any(|source| source == expected), "{expected} not in {sources:?}");
	}

	Ok(())
}

#[test]
fn named_source_maps_are_written_for_file_outputs() -> AnyEmptyResult {
	let compiler = Compiler::with_file_system(memory_fs(&[("/p/a.js", "var a = 1;")]));
	let options = CompileOptions {
		output: OutputFormat::CodeFile("/out/main.js".into()),
		source_map: Some(SourceMap::Named("/out/main.js.map".into())),
		..CompileOptions::default()
	};
	compiler.compile(Input::File("/p/a.js".into()), &options)?;

	let fs = compiler.file_system();
	let written = fs.read("/out/main.js")?;
	assert_eq!(written, "var a=1;\n//# sourceMappingURL=/out/main.js.map");

	let map: serde_json::Value = serde_json::from_str(&fs.read("/out/main.js.map")?)?;
	assert_eq!(map["sources"], serde_json::json!(["/p/a.js"]));

	Ok(())
}

#[test]
fn ast_outputs_generate_only_the_map() -> AnyEmptyResult {
	let compiler = Compiler::with_file_system(memory_fs(&[("/p/a.js", "var a = 1;")]));
	let options = CompileOptions {
		output: OutputFormat::Ast,
		source_map: Some(SourceMap::Named("a.map".into())),
		..CompileOptions::default()
	};
	let output = compiler.compile(Input::File("/p/a.js".into()), &options)?;

	assert_eq!(output.compiled_source, None);
	assert!(output.ast.is_some());
	assert!(output.source_map.is_some());
	assert!(compiler.file_system().read("a.map").is_err());

	Ok(())
}

#[test]
fn ast_documents_round_trip_through_json() -> AnyEmptyResult {
	let compiler = Compiler::with_file_system(memory_fs(&[
		("/p/main.js", "var a = /*borschik:include:a.js*/ 'text';"),
		("/p/a.js", "function f(x) { return x + 1; }"),
	]));
	let options = CompileOptions {
		output: OutputFormat::AstFile("/out/ast.json".into()),
		pretty_print: true,
		..CompileOptions::default()
	};
	let output = compiler.compile(Input::File("/p/main.js".into()), &options)?;

	let document = compiler.file_system().read("/out/ast.json")?;
	assert!(document.starts_with("{\n    \"type\": \"Program\""));

	let reparsed = Ast::parse_document(&document)?;
	let expected = generate(&output.ast.unwrap_or_else(|| panic!("missing ast")))?;
	assert_eq!(generate(&reparsed)?, expected);
	assert_eq!(expected, "function f(x){return x+1;}var a='text';");

	let from_file = compiler.compile(Input::AstFile("/out/ast.json".into()), &CompileOptions::default())?;
	assert_eq!(from_file.compiled_source, Some(expected));

	Ok(())
}

#[rstest]
#[case::body_is_a_number(r#"{"type": "Program", "body": 3}"#)]
#[case::missing_body(r#"{"type": "Program"}"#)]
#[case::hole_in_a_body(r#"{"type": "Program", "body": [null]}"#)]
#[case::block_of_numbers(r#"{"type": "Program", "body": [{"type": "BlockStatement", "body": [1]}]}"#)]
#[case::properties_is_a_string(
	r#"{"type": "Program", "body": [{"type": "ExpressionStatement", "expression": {"type": "ObjectExpression", "properties": "a"}}]}"#
)]
#[case::not_a_node("[1, 2]")]
fn rejects_invalid_ast_documents(#[case] document: &str) {
	let result = Ast::parse_document(document);

	assert!(matches!(result, Err(WeldError::AstDocument(_))), "unexpected result: {result:?}");
}

#[test]
fn ast_documents_carry_array_holes() -> AnyEmptyResult {
	let document = r#"{
		"type": "Program",
		"body": [{
			"type": "ExpressionStatement",
			"expression": {
				"type": "ArrayExpression",
				"elements": [null, {"type": "Literal", "value": 1}, null]
			}
		}]
	}"#;
	let ast = Ast::parse_document(document)?;
	assert_eq!(generate(&ast)?, "[,1,,];");

	let elements = ast.to_json()["body"][0]["expression"]["elements"].clone();
	assert_eq!(elements, serde_json::json!([null, {"type": "Literal", "value": 1}, null]));

	Ok(())
}

#[test]
fn walks_nodes_depth_first() {
	struct Kinds(Vec<String>);

	impl Visitor for Kinds {
		type Error = WeldError;

		fn enter(&mut self, ast: &mut Ast, path: &mut NodePath) -> WeldResult<()> {
			if let Some(node) = ast.program.at(path) {
				self.0.push(node.kind.to_string());
			}
			Ok(())
		}
	}

	let mut ast = JsTech
		.parse("a(b);", &ParseOptions {
			source_path: None,
			shared: &SharedOptions::new(),
		})
		.unwrap_or_else(|e| panic!("{e}"));
	let mut kinds = Kinds(vec![]);
	walk(&mut ast, &mut kinds).unwrap_or_else(|e| panic!("{e}"));

	assert_eq!(
		kinds.0,
		[
			"Program",
			"ExpressionStatement",
			"CallExpression",
			"Identifier",
			"Identifier"
		]
	);
}

#[test]
fn custom_markers_replace_the_default() -> AnyEmptyResult {
	let compiler = Compiler::with_file_system(memory_fs(&[("a.js", "var x = 1;")]));
	let options = CompileOptions {
		marker: "weld".into(),
		..CompileOptions::default()
	};
	let output = compiler.compile(
		Input::Code("/* weld:include:a.js */ /* borschik:include:a.js */ var a;".into()),
		&options,
	)?;

	assert_eq!(output.compiled_source.as_deref(), Some("var x=1;var a;"));

	Ok(())
}

#[test]
#[traced_test]
fn logs_each_resolved_include() -> AnyEmptyResult {
	compiled(&[("a.js", "var x = 1;")], "/* borschik:include:a.js */ var a;")?;

	assert!(logs_contain("included"));
	assert!(logs_contain("before, in `body`"));

	Ok(())
}

#[test]
fn config_overrides_compile_options() -> AnyEmptyResult {
	let config = WeldConfig::parse(
		r#"
			marker = "weld"
			default_tech = ""
			pretty_print = true
			transforms = []

			[techs]
			es = "js"

			[shared]
			banner = "generated"
		"#,
	)?;

	let mut options = CompileOptions::default();
	config.apply(&mut options);
	assert_eq!(options.marker, "weld");
	assert_eq!(options.default_tech, None);
	assert!(options.pretty_print);
	assert!(options.transforms.is_empty());
	assert_eq!(options.shared, shared("banner", "generated"));

	let mut techs = TechRegistry::with_builtins();
	config.register_techs(&mut techs)?;
	assert_eq!(techs.lookup_name("lib.es", None), Some("es"));

	Ok(())
}

#[rstest]
#[case::unknown_key("minify = true")]
#[case::wrong_type("pretty_print = \"yes\"")]
#[case::invalid_toml("marker = ")]
fn rejects_invalid_config(#[case] content: &str) {
	let result = WeldConfig::parse(content);

	assert!(matches!(result, Err(WeldError::ConfigParse(_))), "unexpected result: {result:?}");
}

#[test]
fn discovers_config_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	assert_eq!(WeldConfig::load(tmp.path())?, None);

	std::fs::create_dir_all(tmp.path().join(".config"))?;
	std::fs::write(tmp.path().join(".config/weld.toml"), "marker = \"low\"")?;
	std::fs::write(tmp.path().join(".weld.toml"), "marker = \"high\"")?;

	let config = WeldConfig::load(tmp.path())?.unwrap_or_else(|| panic!("config not found"));
	assert_eq!(config.marker.as_deref(), Some("high"));
	assert_eq!(
		WeldConfig::resolve_path(tmp.path()),
		Some(tmp.path().join(".weld.toml"))
	);

	Ok(())
}
