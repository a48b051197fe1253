//! # The fieldopts Library
//!
//! The fieldopts library parses command line options straight into the
//! fields of a command struct. A command declares its options once, each
//! one bound to a field, and the parser converts every value to the type
//! of its field.
//!
//! Supported field types are `String`, the signed integers, `f32`, `f64`,
//! `bool`, `PathBuf` and enums implementing [`ArgEnum`]. A `Vec` of any of
//! them collects repeated occurrences of the option.
//!
//! Every command gets a built-in `-h, --help` option. A help message
//! displayed by fieldopts looks like this:
//!
//! ```txt
//! usage: patch [options] <apk>
//!
//! Options:
//!
//!   -d, --debuggable
//!                Set app to be debuggable
//!
//!   -h, --help   Print this help message
//!
//!   -m, --embed <arg>
//!                Embed a module
//!
//!   -o, --output <dir>
//!                Output directory
//!
//!   --verbose    Print more
//! ```
//!
//! # Examples
//!
//! ```
//! use fieldopts::{Command, Declarations, DefaultParser, OptionSpec, ParseOutcome, Parser, Syntax};
//!
//! #[derive(Default)]
//! struct Patch {
//!     output: String,
//!     debuggable: bool,
//!     verbose: bool,
//!     modules: Vec<String>,
//! }
//!
//! impl Command for Patch {
//!     fn syntax() -> Syntax {
//!         Syntax::new("patch").syntax("patch [options] <apk>")
//!     }
//!
//!     fn declare(decl: &mut Declarations<Self>) {
//!         decl.add(OptionSpec::builder("output")
//!                 .option("o")
//!                 .long_option("output")
//!                 .arg_name("dir")
//!                 .desc("Output directory")
//!                 .required(true)
//!                 .value(|p: &mut Patch| &mut p.output))
//!             .add(OptionSpec::builder("debuggable")
//!                 .option("d")
//!                 .long_option("debuggable")
//!                 .desc("Set app to be debuggable")
//!                 .switch(|p: &mut Patch| &mut p.debuggable))
//!             .add(OptionSpec::builder("modules")
//!                 .option("m")
//!                 .long_option("embed")
//!                 .desc("Embed a module")
//!                 .values(|p: &mut Patch| &mut p.modules))
//!             // No flag names: registered as `--verbose`.
//!             .add(OptionSpec::builder("verbose")
//!                 .desc("Print more")
//!                 .switch(|p: &mut Patch| &mut p.verbose));
//!     }
//! }
//!
//! let mut patch = Patch::default();
//! let mut parser = DefaultParser::new();
//! let outcome = parser
//!     .parse_args(&mut patch, &["app.apk", "-o", "out", "-m", "a.apk", "-m", "b.apk", "-d"])
//!     .unwrap();
//!
//! assert_eq!(ParseOutcome::Success(vec!["app.apk".to_string()]), outcome);
//! assert_eq!("out", patch.output);
//! assert_eq!(vec!["a.apk", "b.apk"], patch.modules);
//! assert!(patch.debuggable);
//! assert!(!patch.verbose);
//! ```
//!
//! Reporting problems the way a command line tool would.
//!
//! ```
//! use fieldopts::{Command, Declarations, DefaultParser, HelpFormatter, OptionRegistry, OptionSpec, Parser};
//!
//! #[derive(Default)]
//! struct Sign {
//!     keystore: String,
//! }
//!
//! impl Command for Sign {
//!     fn declare(decl: &mut Declarations<Self>) {
//!         decl.add(OptionSpec::builder("keystore")
//!             .option("k")
//!             .required(true)
//!             .value(|s: &mut Sign| &mut s.keystore));
//!     }
//!
//!     fn version(&self) -> Option<String> {
//!         Some(env!("CARGO_PKG_VERSION").to_string())
//!     }
//! }
//!
//! let mut sign = Sign::default();
//! let registry = OptionRegistry::discover(&mut sign).unwrap();
//! let outcome = DefaultParser::new().parse_with(&registry, &mut sign, &["--bogus"]).unwrap();
//!
//! let mut out = Vec::new();
//! HelpFormatter::new().print_outcome(&mut out, &outcome, &registry, sign.version()).unwrap();
//! assert!(String::from_utf8(out).unwrap().starts_with("ERROR: Unrecognized option: --bogus"));
//! ```

pub use command::{Command, Declarations, Syntax};
pub use error::{OptionErr, ParseErr};
pub use format::HelpFormatter;
pub use option::{OptionBuilder, OptionSpec};
pub use parser::{DefaultParser, ParseOutcome, Parser};
pub use registry::OptionRegistry;
pub use util::Util;
pub use value::{convert, ArgEnum, ArgValue, ConvertErr, Value, ValueKind};

mod command;
mod error;
mod format;
mod option;
mod parser;
mod registry;
mod util;
mod value;
