use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};
use std::marker::PhantomData;
use std::rc::Rc;

use crate::error::OptionErr;
use crate::util::{OptionValidator, Util};
use crate::value::{ArgEnum, ArgValue, Value, ValueKind};

const DEFAULT_ARG_NAME: &str = "arg";

type Store<C> = Rc<dyn Fn(&mut C, Value) -> Result<(), Value>>;
type Probe<C> = Rc<dyn Fn(&mut C) -> Option<bool>>;

/// Typed access to one field of the command `C`.
pub(crate) struct Slot<C> {
    kind: ValueKind,
    store: Store<C>,
    probe: Probe<C>,
}

impl<C> Clone for Slot<C> {
    fn clone(&self) -> Self {
        Slot {
            kind: self.kind,
            store: Rc::clone(&self.store),
            probe: Rc::clone(&self.probe),
        }
    }
}

impl<C: 'static> Slot<C> {
    fn scalar<T, F>(field: F) -> Slot<C>
    where
        T: ArgValue,
        F: Fn(&mut C) -> &mut T + 'static,
    {
        let field = Rc::new(field);
        let probe = Rc::clone(&field);
        Slot {
            kind: T::kind(),
            store: Rc::new(move |cmd: &mut C, value: Value| {
                *field(cmd) = T::from_value(value.clone()).ok_or(value)?;
                Ok(())
            }),
            probe: Rc::new(move |cmd: &mut C| probe(cmd).as_flag()),
        }
    }

    fn list<T, F>(field: F) -> Slot<C>
    where
        T: ArgValue,
        F: Fn(&mut C) -> &mut Vec<T> + 'static,
    {
        Slot {
            kind: T::kind(),
            store: Rc::new(move |cmd: &mut C, value: Value| {
                field(cmd).push(T::from_value(value.clone()).ok_or(value)?);
                Ok(())
            }),
            probe: Rc::new(|_: &mut C| None),
        }
    }

    fn choice<E, F>(field: F) -> Slot<C>
    where
        E: ArgEnum,
        F: Fn(&mut C) -> &mut E + 'static,
    {
        Slot {
            kind: E::kind(),
            store: Rc::new(move |cmd: &mut C, value: Value| {
                let v = E::from_value(value.clone()).ok_or(value)?;
                *field(cmd) = v;
                Ok(())
            }),
            probe: Rc::new(|_: &mut C| None),
        }
    }

    fn choices<E, F>(field: F) -> Slot<C>
    where
        E: ArgEnum,
        F: Fn(&mut C) -> &mut Vec<E> + 'static,
    {
        Slot {
            kind: E::kind(),
            store: Rc::new(move |cmd: &mut C, value: Value| {
                let v = E::from_value(value.clone()).ok_or(value)?;
                field(cmd).push(v);
                Ok(())
            }),
            probe: Rc::new(|_: &mut C| None),
        }
    }

    fn lift<O, P>(self, projection: Rc<P>) -> Slot<O>
    where
        O: 'static,
        P: Fn(&mut O) -> &mut C + 'static,
    {
        let store = self.store;
        let probe = self.probe;
        let to_probe = Rc::clone(&projection);
        Slot {
            kind: self.kind,
            store: Rc::new(move |outer: &mut O, value: Value| store(projection(outer), value)),
            probe: Rc::new(move |outer: &mut O| probe(to_probe(outer))),
        }
    }

    pub(crate) fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Store `value`, handing it back if its tag does not fit the field.
    pub(crate) fn store(&self, cmd: &mut C, value: Value) -> Result<(), Value> {
        (self.store)(cmd, value)
    }

    pub(crate) fn current_flag(&self, cmd: &mut C) -> Option<bool> {
        (self.probe)(cmd)
    }
}

/// Where a parsed option ends up.
pub(crate) enum Target<C> {
    /// The built-in help flag, tracked by the parser itself.
    Help,
    /// A single field, overwritten by every occurrence.
    Scalar(Slot<C>),
    /// A `Vec` field, appended to by every occurrence.
    List(Slot<C>),
}

impl<C> Clone for Target<C> {
    fn clone(&self) -> Self {
        match self {
            Target::Help => Target::Help,
            Target::Scalar(slot) => Target::Scalar(slot.clone()),
            Target::List(slot) => Target::List(slot.clone()),
        }
    }
}

impl<C: 'static> Target<C> {
    fn lift<O, P>(self, projection: Rc<P>) -> Target<O>
    where
        O: 'static,
        P: Fn(&mut O) -> &mut C + 'static,
    {
        match self {
            Target::Help => Target::Help,
            Target::Scalar(slot) => Target::Scalar(slot.lift(projection)),
            Target::List(slot) => Target::List(slot.lift(projection)),
        }
    }
}

/// The `OptionSpec` describes one declared option and the command field it
/// fills in.
///
/// # Examples
///
/// ```
/// use fieldopts::OptionSpec;
///
/// struct Patch { out: String, verbose: bool }
///
/// let out = OptionSpec::builder("out")
///     .option("o")
///     .long_option("output")
///     .arg_name("dir")
///     .desc("Output directory")
///     .value(|p: &mut Patch| &mut p.out)
///     .unwrap();
/// assert_eq!("-o, --output", out.display_name());
///
/// // No flags given: named `--verbose` after the field.
/// let verbose = OptionSpec::builder("verbose")
///     .switch(|p: &mut Patch| &mut p.verbose)
///     .unwrap();
/// assert_eq!("--verbose", verbose.display_name());
/// ```
pub struct OptionSpec<C> {
    field: String,
    option: Option<String>,
    long_option: Option<String>,
    arg_name: String,
    description: String,
    has_arg: bool,
    required: bool,
    target: Target<C>,
}

/// A builder struct for [`OptionSpec`].
pub struct OptionBuilder<C> {
    field: String,
    option: Option<String>,
    long_option: Option<String>,
    arg_name: Option<String>,
    description: Option<String>,
    has_arg: Option<bool>,
    required: bool,
    _command: PhantomData<fn(&mut C)>,
}

impl<C: 'static> OptionBuilder<C> {
    /// Set the short option name, without the leading `-`.
    pub fn option(mut self, opt: &str) -> Self {
        self.option = Some(opt.trim().to_owned()).filter(|o| !o.is_empty());
        self
    }

    /// Set the long option name, without the leading `--`.
    pub fn long_option(mut self, long_opt: &str) -> Self {
        self.long_option = Some(long_opt.trim().to_owned()).filter(|o| !o.is_empty());
        self
    }

    /// Set the argument name shown in usage, `arg` by default.
    ///
    /// Also applies to options named after their field.
    pub fn arg_name(mut self, arg_name: &str) -> Self {
        self.arg_name = Some(arg_name.to_owned()).filter(|a| !a.is_empty());
        self
    }

    pub fn desc(mut self, description: &str) -> Self {
        self.description = Some(description.trim().to_owned());
        self
    }

    /// Set whether the option takes a value.
    ///
    /// Defaults to `false` for [`Self::switch`] and `true` for everything
    /// else. Only boolean fields may be declared without a value.
    pub fn has_arg(mut self, has_arg: bool) -> Self {
        self.has_arg = Some(has_arg);
        self
    }

    /// Whether the option must appear on the command line.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Bind to a boolean field set by the bare flag.
    pub fn switch<F>(self, field: F) -> Result<OptionSpec<C>, OptionErr>
    where
        F: Fn(&mut C) -> &mut bool + 'static,
    {
        let has_arg = self.has_arg.unwrap_or(false);
        self.has_arg(has_arg).build(Target::Scalar(Slot::scalar(field)))
    }

    /// Bind to a field taking one converted value; later occurrences win.
    pub fn value<T, F>(self, field: F) -> Result<OptionSpec<C>, OptionErr>
    where
        T: ArgValue,
        F: Fn(&mut C) -> &mut T + 'static,
    {
        self.build(Target::Scalar(Slot::scalar(field)))
    }

    /// Bind to a `Vec` field; every occurrence appends one value.
    pub fn values<T, F>(self, field: F) -> Result<OptionSpec<C>, OptionErr>
    where
        T: ArgValue,
        F: Fn(&mut C) -> &mut Vec<T> + 'static,
    {
        self.build(Target::List(Slot::list(field)))
    }

    /// Bind to an enum field, selected by variant name.
    pub fn choice<E, F>(self, field: F) -> Result<OptionSpec<C>, OptionErr>
    where
        E: ArgEnum,
        F: Fn(&mut C) -> &mut E + 'static,
    {
        self.build(Target::Scalar(Slot::choice(field)))
    }

    /// Bind to a `Vec` of enum values.
    pub fn choices<E, F>(self, field: F) -> Result<OptionSpec<C>, OptionErr>
    where
        E: ArgEnum,
        F: Fn(&mut C) -> &mut Vec<E> + 'static,
    {
        self.build(Target::List(Slot::choices(field)))
    }

    pub(crate) fn help(self) -> Result<OptionSpec<C>, OptionErr> {
        self.has_arg(false).build(Target::Help)
    }

    fn build(self, target: Target<C>) -> Result<OptionSpec<C>, OptionErr> {
        let mut has_arg = self.has_arg.unwrap_or(true);
        let mut long_option = self.long_option;

        if self.option.is_none() && long_option.is_none() {
            // Named after the field; a boolean field is always a plain toggle.
            long_option = Some(Util::from_camel(&self.field)).filter(|o| !o.is_empty());
            if matches!(&target, Target::Scalar(slot) if slot.kind() == ValueKind::Bool) {
                has_arg = false;
            }
        }
        if self.option.is_none() && long_option.is_none() {
            return Err(OptionErr::Unnamed { field: self.field });
        }
        if let Some(ref option) = self.option {
            OptionValidator::validate(&self.field, option)?;
        }
        if let Some(ref long_option) = long_option {
            OptionValidator::validate(&self.field, long_option)?;
        }

        if !has_arg {
            let is_flag = match &target {
                Target::Help => true,
                Target::Scalar(slot) => slot.kind() == ValueKind::Bool,
                Target::List(_) => false,
            };
            if !is_flag {
                return Err(OptionErr::NotBoolean { field: self.field });
            }
        }

        Ok(OptionSpec {
            field: self.field,
            option: self.option,
            long_option,
            arg_name: self.arg_name.unwrap_or_else(|| DEFAULT_ARG_NAME.to_string()),
            description: self.description.unwrap_or_default(),
            has_arg,
            required: self.required,
            target,
        })
    }
}

impl<C> OptionSpec<C> {
    /// Start declaring an option for the field named `field`.
    ///
    /// The field name appears in configuration errors and is the source of
    /// the long option name when no flag is given.
    pub fn builder(field: &str) -> OptionBuilder<C> {
        OptionBuilder {
            field: field.to_string(),
            option: None,
            long_option: None,
            arg_name: None,
            description: None,
            has_arg: None,
            required: false,
            _command: PhantomData,
        }
    }

    pub fn get_field(&self) -> &str {
        &self.field
    }

    pub fn get_opt(&self) -> Option<&str> {
        self.option.as_deref()
    }

    pub fn get_long_opt(&self) -> Option<&str> {
        self.long_option.as_deref()
    }

    pub fn get_arg_name(&self) -> &str {
        &self.arg_name
    }

    pub fn get_description(&self) -> &str {
        &self.description
    }

    /// Check if the option consumes the next token as its value.
    pub fn has_arg(&self) -> bool {
        self.has_arg
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Check if values accumulate across occurrences.
    pub fn is_list_valued(&self) -> bool {
        matches!(self.target, Target::List(_))
    }

    pub fn is_help(&self) -> bool {
        matches!(self.target, Target::Help)
    }

    pub(crate) fn target(&self) -> &Target<C> {
        &self.target
    }

    /// The flag tokens this option is registered under, short first.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::with_capacity(2);
        if let Some(opt) = &self.option {
            keys.push(format!("-{}", opt));
        }
        if let Some(long_opt) = &self.long_option {
            keys.push(format!("--{}", long_opt));
        }
        keys
    }

    /// The combined flag display, like `-o, --output`.
    pub fn display_name(&self) -> String {
        self.keys().join(", ")
    }

    /// Ordering used by the usage listing.
    ///
    /// Compares short name, long name, argument name, then description. An
    /// absent name sorts after any present one.
    pub fn display_cmp(&self, other: &Self) -> Ordering {
        fn absent_last(a: Option<&str>, b: Option<&str>) -> Ordering {
            match (a, b) {
                (Some(a), Some(b)) => a.cmp(b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }

        absent_last(self.get_opt(), other.get_opt())
            .then_with(|| absent_last(self.get_long_opt(), other.get_long_opt()))
            .then_with(|| self.arg_name.cmp(&other.arg_name))
            .then_with(|| self.description.cmp(&other.description))
    }

    /// Re-target this option at a command that embeds `C`.
    pub(crate) fn lift<O, P>(self, projection: Rc<P>) -> OptionSpec<O>
    where
        C: 'static,
        O: 'static,
        P: Fn(&mut O) -> &mut C + 'static,
    {
        OptionSpec {
            field: self.field,
            option: self.option,
            long_option: self.long_option,
            arg_name: self.arg_name,
            description: self.description,
            has_arg: self.has_arg,
            required: self.required,
            target: self.target.lift(projection),
        }
    }
}

impl<C> Clone for OptionSpec<C> {
    fn clone(&self) -> Self {
        Self {
            field: self.field.clone(),
            option: self.option.clone(),
            long_option: self.long_option.clone(),
            arg_name: self.arg_name.clone(),
            description: self.description.clone(),
            has_arg: self.has_arg,
            required: self.required,
            target: self.target.clone(),
        }
    }
}

impl<C> Debug for OptionSpec<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionSpec")
            .field("field", &self.field)
            .field("option", &self.option)
            .field("long_option", &self.long_option)
            .field("arg_name", &self.arg_name)
            .field("has_arg", &self.has_arg)
            .field("required", &self.required)
            .field("list_valued", &self.is_list_valued())
            .finish()
    }
}

impl<C> Display for OptionSpec<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut buf = String::from("[ option: ");
        buf.push_str(&self.display_name());
        if self.is_list_valued() {
            buf.push_str(" [ARG...]");
        } else if self.has_arg {
            buf.push_str(" [ARG]");
        }
        buf.push_str(" :: ");
        buf.push_str(&self.description);
        buf.push_str(" ]");

        write!(f, "{}", buf)
    }
}
