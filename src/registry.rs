use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

use tracing::debug;

use crate::command::{Command, Declarations, Syntax};
use crate::error::OptionErr;
use crate::option::{OptionSpec, Target};

/// Field name of the built-in help option, used in conflict messages.
pub const HELP_FIELD: &str = "print_help";

/// The options of one command, keyed by flag token (`-x`, `--name`).
///
/// Built once per command instance and read-only while parsing.
pub struct OptionRegistry<C> {
    syntax: Syntax,
    options: Vec<OptionSpec<C>>,
    keys: HashMap<String, usize>,
}

impl<C: Command> OptionRegistry<C> {
    /// Build the registry for `cmd` from the declarations of its type.
    ///
    /// The built-in `-h, --help` option comes first, then the declarations
    /// in order, with included base commands ahead of the command's own
    /// options. A key claimed twice fails on the later declaration.
    ///
    /// `cmd` is only read, to check that no-argument options start out
    /// `false`.
    pub fn discover(cmd: &mut C) -> Result<OptionRegistry<C>, OptionErr> {
        let mut registry = OptionRegistry {
            syntax: C::syntax(),
            options: Vec::new(),
            keys: HashMap::new(),
        };

        registry.register(cmd, help_option()?)?;
        for option in Declarations::<C>::of().into_options() {
            registry.register(cmd, option?)?;
        }

        debug!(
            command = registry.syntax.get_cmd(),
            options = registry.options.len(),
            keys = registry.keys.len(),
            "option registry built"
        );
        Ok(registry)
    }
}

impl<C: 'static> OptionRegistry<C> {
    fn register(&mut self, cmd: &mut C, option: OptionSpec<C>) -> Result<(), OptionErr> {
        if !option.has_arg() {
            if let Target::Scalar(slot) = option.target() {
                if slot.current_flag(cmd) != Some(false) {
                    return Err(OptionErr::TrueDefault {
                        field: option.get_field().to_string(),
                    });
                }
            }
        }

        let index = self.options.len();
        for key in option.keys() {
            if let Some(&previous) = self.keys.get(&key) {
                return Err(OptionErr::Conflict {
                    key,
                    field: option.get_field().to_string(),
                    previous: self.options[previous].get_field().to_string(),
                });
            }
            debug!(key = key.as_str(), field = option.get_field(), "registered option");
            self.keys.insert(key, index);
        }
        self.options.push(option);
        Ok(())
    }
}

impl<C> OptionRegistry<C> {
    /// Look up a flag token, including its leading hyphens.
    pub fn get_option(&self, key: &str) -> Option<&OptionSpec<C>> {
        self.index_of(key).map(|i| &self.options[i])
    }

    pub(crate) fn index_of(&self, key: &str) -> Option<usize> {
        self.keys.get(key).copied()
    }

    pub(crate) fn option_at(&self, index: usize) -> &OptionSpec<C> {
        &self.options[index]
    }

    pub fn has_option(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    /// All options in registration order.
    pub fn get_options(&self) -> &[OptionSpec<C>] {
        &self.options
    }

    /// All options in usage listing order.
    pub fn get_sorted_options(&self) -> Vec<&OptionSpec<C>> {
        let mut options: Vec<&OptionSpec<C>> = self.options.iter().collect();
        options.sort_by(|a, b| a.display_cmp(b));
        options
    }

    pub fn get_required_options(&self) -> impl Iterator<Item = (usize, &OptionSpec<C>)> {
        self.options.iter().enumerate().filter(|(_, o)| o.is_required())
    }

    pub fn get_syntax(&self) -> &Syntax {
        &self.syntax
    }

    /// Number of options, the built-in help option included.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Number of flag tokens; an option with both names has two.
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }
}

impl<C> Debug for OptionRegistry<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionRegistry")
            .field("syntax", &self.syntax)
            .field("options", &self.options)
            .finish()
    }
}

fn help_option<C: 'static>() -> Result<OptionSpec<C>, OptionErr> {
    OptionSpec::builder(HELP_FIELD)
        .option("h")
        .long_option("help")
        .desc("Print this help message")
        .help()
}
