use std::collections::BTreeSet;
use std::env;
use std::io::stderr;
use std::process::exit;

use tracing::{debug, trace};

use crate::command::Command;
use crate::error::{OptionErr, ParseErr};
use crate::format::HelpFormatter;
use crate::option::{OptionSpec, Slot, Target};
use crate::registry::OptionRegistry;
use crate::value::{convert, Value};

/// The result of parsing one argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Parsing succeeded; holds the positional arguments in order.
    Success(Vec<String>),
    /// The user's input was wrong; parsing stopped.
    Failed(ParseErr),
    /// The help flag was given.
    HelpRequested,
}

impl ParseOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ParseOutcome::Success(_))
    }

    /// Whether the usage listing should be shown instead of running the
    /// command.
    pub fn shows_help(&self) -> bool {
        !self.is_success()
    }

    /// The positional arguments, if parsing succeeded.
    pub fn into_args(self) -> Option<Vec<String>> {
        match self {
            ParseOutcome::Success(args) => Some(args),
            _ => None,
        }
    }

    /// Suggested process exit status.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

/// The parser trait to fill in a [`Command`] from command line arguments.
pub trait Parser {
    /// Parse arguments from `env::args()`, skipping the executable name.
    ///
    /// Also see [`Self::parse_args`], [`Self::parse_or_exit`]
    fn parse<C: Command>(&mut self, cmd: &mut C) -> Result<ParseOutcome, OptionErr> {
        let args: Vec<String> = env::args().skip(1).collect();
        self.parse_args(cmd, &args)
    }

    /// Build the option registry of `cmd` and parse `arguments` against it.
    ///
    /// # Error
    ///
    /// [`OptionErr`] is returned if the command's declarations are invalid
    /// or a value cannot be converted to its field type. Problems with the
    /// user's input are reported as [`ParseOutcome::Failed`] instead.
    fn parse_args<C: Command, T: AsRef<str>>(
        &mut self,
        cmd: &mut C,
        arguments: &[T],
    ) -> Result<ParseOutcome, OptionErr> {
        let registry = OptionRegistry::discover(cmd)?;
        self.parse_with(&registry, cmd, arguments)
    }

    /// Parse `arguments` against an already built `registry`, storing
    /// option values into `cmd` as they are found.
    fn parse_with<C: 'static, T: AsRef<str>>(
        &mut self,
        registry: &OptionRegistry<C>,
        cmd: &mut C,
        arguments: &[T],
    ) -> Result<ParseOutcome, OptionErr>;

    /// Parse arguments from `env::args()` or exit.
    ///
    /// If the user's input is wrong or help is requested, the error message
    /// and the usage are printed to stderr and the process exits with
    /// status 1. A declaration or conversion error exits with status 2.
    fn parse_or_exit<C: Command>(&mut self, cmd: &mut C, formatter: &HelpFormatter) -> Vec<String> {
        let args: Vec<String> = env::args().skip(1).collect();
        let parsed = OptionRegistry::discover(cmd)
            .and_then(|registry| self.parse_with(&registry, cmd, &args).map(|o| (o, registry)));

        match parsed {
            Ok((ParseOutcome::Success(args), _)) => args,
            Ok((outcome, registry)) => {
                // Nothing else to report if stderr is gone.
                let _ = formatter.print_outcome(&mut stderr(), &outcome, &registry, cmd.version());
                exit(outcome.exit_code());
            }
            Err(err) => {
                eprintln!("ERROR: {}", err);
                exit(err.exit_code());
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scanning,
    /// The option at this registry index takes the next token.
    AwaitingValue(usize),
}

/// The default implementation of [`Parser`] trait.
///
/// Tokens starting with `-` are looked up in the registry as they are.
/// An option that takes a value consumes the following token whatever it
/// looks like. All other tokens are positional arguments.
pub struct DefaultParser {
    state: State,
    outstanding: BTreeSet<usize>,
    positionals: Vec<String>,
    help: bool,
}

impl DefaultParser {
    pub fn new() -> DefaultParser {
        DefaultParser {
            state: State::Scanning,
            outstanding: BTreeSet::new(),
            positionals: Vec::new(),
            help: false,
        }
    }

    fn reset<C>(&mut self, registry: &OptionRegistry<C>) {
        self.state = State::Scanning;
        self.positionals = Vec::new();
        self.help = false;
        self.outstanding = registry.get_required_options().map(|(i, _)| i).collect();
    }

    fn handle_token<C: 'static>(
        &mut self,
        registry: &OptionRegistry<C>,
        cmd: &mut C,
        token: &str,
    ) -> Result<Result<(), ParseErr>, OptionErr> {
        trace!(token, state = ?self.state, "handling token");

        match self.state {
            State::AwaitingValue(index) => {
                self.handle_value(registry.option_at(index), cmd, token)?;
                self.state = State::Scanning;
            }
            State::Scanning if token.starts_with('-') => {
                let Some(index) = registry.index_of(token) else {
                    return Ok(Err(ParseErr::UnrecognizedOption(token.to_string())));
                };
                let option = registry.option_at(index);
                self.outstanding.remove(&index);

                if option.has_arg() {
                    self.state = State::AwaitingValue(index);
                } else {
                    self.handle_flag(option, cmd)?;
                }
            }
            State::Scanning => self.positionals.push(token.to_string()),
        }
        Ok(Ok(()))
    }

    fn handle_flag<C: 'static>(&mut self, option: &OptionSpec<C>, cmd: &mut C) -> Result<(), OptionErr> {
        match option.target() {
            Target::Help => {
                self.help = true;
                Ok(())
            }
            Target::Scalar(slot) | Target::List(slot) => store(slot, cmd, Value::Bool(true)),
        }
    }

    fn handle_value<C: 'static>(&mut self, option: &OptionSpec<C>, cmd: &mut C, raw: &str) -> Result<(), OptionErr> {
        let slot = match option.target() {
            Target::Help => {
                self.help = true;
                return Ok(());
            }
            Target::Scalar(slot) | Target::List(slot) => slot,
        };

        let value = convert(raw, slot.kind()).map_err(|source| OptionErr::InvalidValue {
            option: option.display_name(),
            value: raw.to_string(),
            source,
        })?;
        store(slot, cmd, value)
    }

    fn check_required_args<C>(&self, registry: &OptionRegistry<C>) -> Result<(), ParseErr> {
        if let State::AwaitingValue(index) = self.state {
            return Err(ParseErr::MissingArgument(registry.option_at(index).display_name()));
        }
        Ok(())
    }

    fn check_required_options<C>(&self, registry: &OptionRegistry<C>) -> Result<(), ParseErr> {
        if self.outstanding.is_empty() {
            return Ok(());
        }
        let mut missing: Vec<&OptionSpec<C>> = self
            .outstanding
            .iter()
            .map(|&i| registry.option_at(i))
            .collect();
        missing.sort_by(|a, b| a.display_cmp(b));
        Err(ParseErr::MissingOption(missing.iter().map(|o| o.display_name()).collect()))
    }
}

impl Default for DefaultParser {
    fn default() -> Self {
        DefaultParser::new()
    }
}

fn store<C: 'static>(slot: &Slot<C>, cmd: &mut C, value: Value) -> Result<(), OptionErr> {
    slot.store(cmd, value).map_err(|value| OptionErr::Unconvertible {
        value: format!("{:?}", value),
        kind: slot.kind().to_string(),
    })
}

impl Parser for DefaultParser {
    fn parse_with<C: 'static, T: AsRef<str>>(
        &mut self,
        registry: &OptionRegistry<C>,
        cmd: &mut C,
        arguments: &[T],
    ) -> Result<ParseOutcome, OptionErr> {
        self.reset(registry);

        for argument in arguments {
            if let Err(err) = self.handle_token(registry, cmd, argument.as_ref())? {
                debug!(error = %err, "parse failed");
                return Ok(ParseOutcome::Failed(err));
            }
        }

        let outcome = if self.help {
            ParseOutcome::HelpRequested
        } else if let Err(err) = self.check_required_args(registry) {
            ParseOutcome::Failed(err)
        } else if let Err(err) = self.check_required_options(registry) {
            ParseOutcome::Failed(err)
        } else {
            ParseOutcome::Success(std::mem::take(&mut self.positionals))
        };

        debug!(outcome = ?outcome, "parse finished");
        Ok(outcome)
    }
}
