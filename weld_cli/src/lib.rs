use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Resolve inclusion directives in JavaScript sources.",
	long_about = "weld parses a JavaScript file, replaces every `/* borschik:include:path */` \
	              directive with the parsed content of the named file, recursively, and writes \
	              the welded result as code or as an ESTree JSON document.\n\nDirectives before \
	              a statement insert before it, directives after a statement insert after it, \
	              and directives inside an empty block, array or object fill it. String \
	              literals like `'borschik:include:notes.txt'` become the text of the file."
)]
#[allow(clippy::struct_excessive_bools)]
pub struct WeldCli {
	/// The file to compile.
	pub input: PathBuf,

	/// Where to write the result. Defaults to `<input stem>.output.js` in the
	/// current directory.
	#[arg(long, short)]
	pub output: Option<PathBuf>,

	/// How to read the input: `code` or `ast` (an ESTree JSON document).
	#[arg(long, default_value = "code")]
	pub input_format: String,

	/// What to write: `code` or `ast` (an ESTree JSON document).
	#[arg(long, default_value = "code")]
	pub output_format: String,

	/// Write a source map to this file and reference it from the code.
	#[arg(long)]
	pub source_map: Option<PathBuf>,

	/// Comma separated transforms to run, in order. Defaults to `include`.
	#[arg(long, value_delimiter = ',')]
	pub transforms: Option<Vec<String>>,

	/// Indent the output instead of minifying it.
	#[arg(long, default_value_t = false)]
	pub pretty_print: bool,

	/// The word directives start with. Defaults to `borschik`.
	#[arg(long)]
	pub marker: Option<String>,

	/// Read configuration from this file instead of discovering `weld.toml`.
	#[arg(long)]
	pub config: Option<PathBuf>,

	/// Compile without writing and fail when the output file is out of date.
	#[arg(long, default_value_t = false)]
	pub check: bool,

	/// Log each resolved include.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}
