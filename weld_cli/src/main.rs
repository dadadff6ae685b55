use std::path::Path;
use std::path::PathBuf;
use std::process;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use clap::Parser;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use weld_cli::WeldCli;
use weld_core::AnyResult;
use weld_core::CompileOptions;
use weld_core::Compiler;
use weld_core::Format;
use weld_core::SourceMap;
use weld_core::WeldConfig;
use weld_core::WeldError;
use weld_core::ast_document;

static USE_COLOR: AtomicBool = AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

/// What a run ended with, as far as the exit code is concerned.
enum Outcome {
	Written,
	UpToDate,
	Stale,
}

fn main() {
	let args = WeldCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, Ordering::Relaxed);
	}

	let default_level = if args.verbose { "debug" } else { "warn" };
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
		)
		.with_ansi(use_color)
		.with_writer(std::io::stderr)
		.init();

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	match run(&args) {
		Ok(Outcome::Written | Outcome::UpToDate) => {}
		Ok(Outcome::Stale) => process::exit(1),
		Err(e) => {
			// Render through miette for error codes and help text.
			match e.downcast::<WeldError>() {
				Ok(weld_err) => {
					let report: miette::Report = (*weld_err).into();
					eprintln!("{report:?}");
				}
				Err(e) => {
					eprintln!("{} {e}", colored!("error:", red));
				}
			}
			process::exit(2);
		}
	}
}

fn run(args: &WeldCli) -> AnyResult<Outcome> {
	let input_format = Format::parse("input", &args.input_format)?;
	let output_format = Format::parse("output", &args.output_format)?;

	let config = match &args.config {
		Some(path) => Some(WeldConfig::load_file(path)?),
		None => WeldConfig::load(&std::env::current_dir()?)?,
	};

	let mut compiler = Compiler::new();
	let mut options = CompileOptions::default();

	if let Some(config) = &config {
		config.register_techs(compiler.techs_mut())?;
		config.apply(&mut options);
	}

	if let Some(marker) = &args.marker {
		options.marker.clone_from(marker);
	}

	if let Some(transforms) = &args.transforms {
		options.transforms.clone_from(transforms);
	}

	options.pretty_print |= args.pretty_print;
	options.source_map = args
		.source_map
		.as_deref()
		.map(|path| SourceMap::Named(display(path)));

	let output_path = args
		.output
		.clone()
		.unwrap_or_else(|| default_output(&args.input, output_format));
	let input = input_format.input(display(&args.input));
	debug!(input = %args.input.display(), output = %output_path.display(), "compiling");

	if args.check {
		options.output = output_format.output(None);
		let output = compiler.compile(input, &options)?;
		let expected = match output_format {
			Format::Code => output.compiled_source.unwrap_or_default(),
			Format::Ast => {
				match &output.ast {
					Some(ast) => ast_document(ast, options.pretty_print)?,
					None => String::new(),
				}
			}
		};

		return Ok(check(&output_path, &expected));
	}

	options.output = output_format.output(Some(display(&output_path)));
	compiler.compile(input, &options)?;

	println!(
		"{} {} → {}",
		colored!("compiled", green),
		args.input.display(),
		colored!(output_path.display(), bold)
	);

	Ok(Outcome::Written)
}

/// Compare the existing output with what a compile would write.
fn check(output_path: &Path, expected: &str) -> Outcome {
	let current = std::fs::read_to_string(output_path).unwrap_or_default();

	if current == expected {
		println!("{} {}", colored!("up to date:", green), output_path.display());
		return Outcome::UpToDate;
	}

	eprintln!("{} {}", colored!("stale:", red), output_path.display());
	print_diff(&current, expected);
	Outcome::Stale
}

/// `<input stem>.output.js` (or `.output.json` for AST output) in the current
/// directory.
fn default_output(input: &Path, format: Format) -> PathBuf {
	let stem = input.file_stem().map_or_else(
		|| "input".to_string(),
		|stem| stem.to_string_lossy().into_owned(),
	);
	let extension = match format {
		Format::Code => "js",
		Format::Ast => "json",
	};

	PathBuf::from(format!("{stem}.output.{extension}"))
}

fn display(path: &Path) -> String {
	path.display().to_string()
}

fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprint!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				eprint!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				eprint!("   {change}");
			}
		}
	}
	eprintln!();
}
