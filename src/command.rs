use std::rc::Rc;

use crate::error::OptionErr;
use crate::option::OptionSpec;

/// Per-command metadata shown around the option listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Syntax {
    cmd: String,
    desc: String,
    syntax: String,
    online_help: String,
}

impl Syntax {
    pub fn new(cmd: &str) -> Syntax {
        Syntax {
            cmd: cmd.to_string(),
            ..Syntax::default()
        }
    }

    /// One line description of the command.
    pub fn desc(mut self, desc: &str) -> Self {
        self.desc = desc.to_string();
        self
    }

    /// Usage syntax, for example `patch [options] <apk>`.
    pub fn syntax(mut self, syntax: &str) -> Self {
        self.syntax = syntax.to_string();
        self
    }

    /// Where to find more documentation, for example a URL.
    pub fn online_help(mut self, online_help: &str) -> Self {
        self.online_help = online_help.to_string();
        self
    }

    pub fn get_cmd(&self) -> &str {
        &self.cmd
    }

    pub fn get_desc(&self) -> &str {
        &self.desc
    }

    pub fn get_syntax(&self) -> &str {
        &self.syntax
    }

    pub fn get_online_help(&self) -> &str {
        &self.online_help
    }
}

/// A command whose fields are filled in from the command line.
///
/// # Examples
///
/// A base command shared by several tools, embedded into a derived one.
///
/// ```
/// use fieldopts::{Command, Declarations, OptionSpec, Syntax};
///
/// #[derive(Default)]
/// struct Common {
///     verbose: bool,
/// }
///
/// impl Command for Common {
///     fn declare(decl: &mut Declarations<Self>) {
///         decl.add(OptionSpec::builder("verbose")
///             .option("v")
///             .desc("Print more")
///             .switch(|c: &mut Common| &mut c.verbose));
///     }
/// }
///
/// #[derive(Default)]
/// struct Patch {
///     common: Common,
///     out: String,
/// }
///
/// impl Command for Patch {
///     fn syntax() -> Syntax {
///         Syntax::new("patch").syntax("patch [options] <apk>")
///     }
///
///     fn declare(decl: &mut Declarations<Self>) {
///         decl.include(|p: &mut Patch| &mut p.common);
///         decl.add(OptionSpec::builder("out")
///             .option("o")
///             .long_option("output")
///             .required(true)
///             .value(|p: &mut Patch| &mut p.out));
///     }
/// }
/// ```
pub trait Command: Sized + 'static {
    fn syntax() -> Syntax {
        Syntax::default()
    }

    /// Declare this command's options.
    ///
    /// Options of embedded base commands are pulled in with
    /// [`Declarations::include`] before the command's own.
    fn declare(decl: &mut Declarations<Self>);

    /// Version shown below the usage listing.
    fn version(&self) -> Option<String> {
        None
    }
}

/// The options a [`Command`] declares, in declaration order.
///
/// Builder errors are kept and reported when the registry is built, so
/// declarations can be written without `?`.
pub struct Declarations<C> {
    options: Vec<Result<OptionSpec<C>, OptionErr>>,
}

impl<C: 'static> Declarations<C> {
    pub fn new() -> Declarations<C> {
        Declarations { options: Vec::new() }
    }

    /// Add an option built with [`OptionSpec::builder`].
    pub fn add(&mut self, option: Result<OptionSpec<C>, OptionErr>) -> &mut Self {
        self.options.push(option);
        self
    }

    /// Add every option of the base command `B`, reached through `field`.
    pub fn include<B, F>(&mut self, field: F) -> &mut Self
    where
        B: Command,
        F: Fn(&mut C) -> &mut B + 'static,
    {
        let projection = Rc::new(field);
        for option in Declarations::<B>::of().options {
            self.options
                .push(option.map(|o| o.lift(Rc::clone(&projection))));
        }
        self
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub(crate) fn into_options(self) -> Vec<Result<OptionSpec<C>, OptionErr>> {
        self.options
    }
}

impl<C: Command> Declarations<C> {
    /// Collect the declarations of `C`.
    pub fn of() -> Declarations<C> {
        let mut decl = Declarations::new();
        C::declare(&mut decl);
        decl
    }
}

impl<C: 'static> Default for Declarations<C> {
    fn default() -> Self {
        Declarations::new()
    }
}
