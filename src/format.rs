use std::io::{self, Write};

use crate::option::OptionSpec;
use crate::parser::ParseOutcome;
use crate::registry::OptionRegistry;

pub const DEFAULT_LINE_SEPARATOR: &str = if cfg!(windows) { "\r\n" } else { "\n" };

const DEFAULT_LEFT_PAD: usize = 2;
const DEFAULT_DESC_COLUMN: usize = 15;
const DEFAULT_SYNTAX_PREFIX: &str = "usage: ";
const DEFAULT_OPTIONS_TITLE: &str = "Options:";
const DEFAULT_ERROR_PREFIX: &str = "ERROR: ";

/// `HelpFormatter` renders the usage listing of an [`OptionRegistry`].
///
/// The output format is like:
/// ```txt
/// usage: <syntax>
/// <description>
///
/// Options:
///
///   -h, --help   Print this help message
///
///   -o, --out <file>
///                Output file
///
/// version: <version>
/// ```
///
/// Options are sorted by short name, then long name; options without a
/// short name come last. The usage line, description, online help and
/// version are left out when empty.
pub struct HelpFormatter {
    left_pad: usize,
    desc_column: usize,
    newline: String,
    syntax_prefix: String,
    options_title: String,
    error_prefix: String,
}

impl HelpFormatter {
    /// Create a `HelpFormatter` with default configuration.
    pub fn new() -> HelpFormatter {
        HelpFormatter {
            left_pad: DEFAULT_LEFT_PAD,
            desc_column: DEFAULT_DESC_COLUMN,
            newline: DEFAULT_LINE_SEPARATOR.to_string(),
            syntax_prefix: DEFAULT_SYNTAX_PREFIX.to_string(),
            options_title: DEFAULT_OPTIONS_TITLE.to_string(),
            error_prefix: DEFAULT_ERROR_PREFIX.to_string(),
        }
    }

    /// Get number of padding space before option.
    pub fn get_left_padding(&self) -> usize {
        self.left_pad
    }

    /// Get the column descriptions start at.
    pub fn get_desc_column(&self) -> usize {
        self.desc_column
    }

    /// Get the newline.
    /// For windows, it defaults to `\r\n`.
    /// For other operating system, it defaults to `\n`.
    pub fn get_newline(&self) -> &str {
        &self.newline
    }

    pub fn get_syntax_prefix(&self) -> &str {
        &self.syntax_prefix
    }

    pub fn get_options_title(&self) -> &str {
        &self.options_title
    }

    /// Set number of padding space before option.
    pub fn set_left_padding(&mut self, padding: usize) {
        self.left_pad = padding;
    }

    /// Set the column descriptions start at.
    ///
    /// When the flags of an option reach this column, the description moves
    /// to the next line, indented to the same column.
    pub fn set_desc_column(&mut self, column: usize) {
        self.desc_column = column;
    }

    /// Set the newline characters.
    pub fn set_newline(&mut self, newline: &str) {
        self.newline = newline.to_string();
    }

    /// Set the syntax prefix, the default value is `"usage: "`.
    pub fn set_syntax_prefix(&mut self, prefix: &str) {
        self.syntax_prefix = prefix.to_string();
    }

    /// Set the title line printed above the options.
    pub fn set_options_title(&mut self, title: &str) {
        self.options_title = title.to_string();
    }

    /// Set the prefix of error messages, the default value is `"ERROR: "`.
    pub fn set_error_prefix(&mut self, prefix: &str) {
        self.error_prefix = prefix.to_string();
    }

    /// Render the full usage listing into a string.
    pub fn render_help<C>(&self, registry: &OptionRegistry<C>, version: Option<&str>) -> String {
        let mut buff = String::new();
        let syntax = registry.get_syntax();

        if !syntax.get_syntax().is_empty() {
            self.push_line(&mut buff, &format!("{}{}", self.syntax_prefix, syntax.get_syntax()));
        }
        if !syntax.get_desc().is_empty() {
            self.push_line(&mut buff, syntax.get_desc());
        }
        buff.push_str(&self.newline);

        if !registry.is_empty() {
            self.push_line(&mut buff, &self.options_title);
            buff.push_str(&self.newline);
        }

        for option in registry.get_sorted_options() {
            self.render_option(&mut buff, option);
            buff.push_str(&self.newline);
        }

        if !syntax.get_online_help().is_empty() {
            self.push_line(&mut buff, &format!("online help: {}", syntax.get_online_help()));
        }
        if let Some(ver) = version.filter(|v| !v.is_empty()) {
            self.push_line(&mut buff, &format!("version: {}", ver));
        }
        buff
    }

    fn render_option<C>(&self, buff: &mut String, option: &OptionSpec<C>) {
        let mut line = " ".repeat(self.left_pad);
        line.push_str(&option.display_name());
        if option.has_arg() {
            line.push_str(&format!(" <{}>", option.get_arg_name()));
        }

        let desc = option.get_description();
        if !desc.is_empty() {
            let width = line.chars().count();
            if width >= self.desc_column {
                line.push_str(&self.newline);
                line.push_str(&" ".repeat(self.desc_column));
            } else {
                line.push_str(&" ".repeat(self.desc_column - width));
            }
            line.push_str(desc);
        }
        self.push_line(buff, &line);
    }

    fn push_line(&self, buff: &mut String, line: &str) {
        buff.push_str(line);
        buff.push_str(&self.newline);
    }

    /// Print the usage listing to the `out` sink.
    ///
    /// # Example
    ///
    /// ```
    /// use std::io::stderr;
    /// use fieldopts::{Command, Declarations, HelpFormatter, OptionRegistry};
    ///
    /// struct Empty;
    ///
    /// impl Command for Empty {
    ///     fn declare(_: &mut Declarations<Self>) {}
    /// }
    ///
    /// let registry = OptionRegistry::discover(&mut Empty).unwrap();
    /// HelpFormatter::new().print_help(&mut stderr(), &registry, None).unwrap();
    /// ```
    pub fn print_help<T: Write, C>(
        &self,
        out: &mut T,
        registry: &OptionRegistry<C>,
        version: Option<String>,
    ) -> io::Result<()> {
        write!(out, "{}", self.render_help(registry, version.as_deref()))?;
        out.flush()
    }

    /// Report a parse that did not succeed: the error message when there is
    /// one, followed by the usage listing. Nothing is printed on success.
    pub fn print_outcome<T: Write, C>(
        &self,
        out: &mut T,
        outcome: &ParseOutcome,
        registry: &OptionRegistry<C>,
        version: Option<String>,
    ) -> io::Result<()> {
        match outcome {
            ParseOutcome::Success(_) => return Ok(()),
            ParseOutcome::Failed(err) => {
                write!(out, "{}{}{}", self.error_prefix, err, self.newline)?;
            }
            ParseOutcome::HelpRequested => {}
        }
        self.print_help(out, registry, version)
    }
}

impl Default for HelpFormatter {
    fn default() -> Self {
        HelpFormatter::new()
    }
}
