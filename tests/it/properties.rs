use fieldopts::{
    convert, Command, Declarations, DefaultParser, OptionErr, OptionRegistry, OptionSpec,
    ParseErr, ParseOutcome, Parser, Value, ValueKind,
};

#[derive(Debug, Default)]
struct Out {
    out: String,
}

impl Command for Out {
    fn declare(decl: &mut Declarations<Self>) {
        decl.add(
            OptionSpec::builder("out")
                .option("o")
                .long_option("out")
                .required(true)
                .value(|c: &mut Out| &mut c.out),
        );
    }
}

#[derive(Debug, Default)]
struct Includes {
    includes: Vec<String>,
}

impl Command for Includes {
    fn declare(decl: &mut Declarations<Self>) {
        decl.add(
            OptionSpec::builder("includes")
                .option("I")
                .values(|c: &mut Includes| &mut c.includes),
        );
    }
}

#[derive(Debug, Default)]
struct Verbose {
    verbose: bool,
}

impl Command for Verbose {
    fn declare(decl: &mut Declarations<Self>) {
        decl.add(
            OptionSpec::builder("verbose")
                .option("v")
                .switch(|c: &mut Verbose| &mut c.verbose),
        );
    }
}

#[derive(Debug, Default)]
struct AutoNamed {
    print_usage: bool,
}

impl Command for AutoNamed {
    fn declare(decl: &mut Declarations<Self>) {
        decl.add(OptionSpec::builder("printUsage").switch(|c: &mut AutoNamed| &mut c.print_usage));
    }
}

#[derive(Debug, Default)]
struct AutoValue {
    output_dir: String,
    force: bool,
}

impl Command for AutoValue {
    fn declare(decl: &mut Declarations<Self>) {
        decl.add(
            OptionSpec::builder("outputDir")
                .arg_name("dir")
                .value(|c: &mut AutoValue| &mut c.output_dir),
        )
        .add(OptionSpec::builder("force").value(|c: &mut AutoValue| &mut c.force));
    }
}

#[derive(Debug, Default)]
struct TwoOuts {
    first: String,
    second: String,
}

impl Command for TwoOuts {
    fn declare(decl: &mut Declarations<Self>) {
        decl.add(
            OptionSpec::builder("first")
                .long_option("out")
                .value(|c: &mut TwoOuts| &mut c.first),
        )
        .add(
            OptionSpec::builder("second")
                .long_option("out")
                .value(|c: &mut TwoOuts| &mut c.second),
        );
    }
}

#[derive(Debug, Default)]
struct TwoRequired {
    key: String,
    out: String,
}

impl Command for TwoRequired {
    fn declare(decl: &mut Declarations<Self>) {
        decl.add(
            OptionSpec::builder("out")
                .option("o")
                .long_option("out")
                .required(true)
                .value(|c: &mut TwoRequired| &mut c.out),
        )
        .add(
            OptionSpec::builder("key")
                .option("k")
                .required(true)
                .value(|c: &mut TwoRequired| &mut c.key),
        );
    }
}

fn parse<C: Command + Default>(args: &[&str]) -> (Result<ParseOutcome, OptionErr>, C) {
    let mut cmd = C::default();
    let outcome = DefaultParser::new().parse_args(&mut cmd, args);
    (outcome, cmd)
}

#[test]
fn required_option() {
    let (outcome, _) = parse::<Out>(&[]);
    assert_eq!(
        ParseOutcome::Failed(ParseErr::MissingOption(vec!["-o, --out".to_string()])),
        outcome.unwrap()
    );

    let (outcome, cmd) = parse::<Out>(&["-o", "f.txt"]);
    assert_eq!(ParseOutcome::Success(vec![]), outcome.unwrap());
    assert_eq!("f.txt", cmd.out);

    let (outcome, cmd) = parse::<Out>(&["--out", "g.txt"]);
    assert!(outcome.unwrap().is_success());
    assert_eq!("g.txt", cmd.out);
}

#[test]
fn missing_required_options_are_listed_together() {
    let (outcome, _) = parse::<TwoRequired>(&["x"]);
    let ParseOutcome::Failed(err) = outcome.unwrap() else {
        panic!("expected a parse failure");
    };
    assert_eq!("Options: -k and -o, --out is required", err.to_string());
}

#[test]
fn list_values_accumulate() {
    let (outcome, cmd) = parse::<Includes>(&["-I", "a", "-I", "b"]);
    assert!(outcome.unwrap().is_success());
    assert_eq!(vec!["a", "b"], cmd.includes);
}

#[test]
fn unknown_flag() {
    let (outcome, _) = parse::<Out>(&["--bogus"]);
    assert_eq!(
        ParseOutcome::Failed(ParseErr::UnrecognizedOption("--bogus".to_string())),
        outcome.unwrap()
    );

    let (outcome, cmd) = parse::<Verbose>(&["-v", "-"]);
    assert!(matches!(
        outcome.unwrap(),
        ParseOutcome::Failed(ParseErr::UnrecognizedOption(ref t)) if t == "-"
    ));
    assert!(cmd.verbose);
}

#[test]
fn missing_trailing_value() {
    let (outcome, _) = parse::<Out>(&["-o"]);
    let outcome = outcome.unwrap();
    assert_eq!(
        ParseOutcome::Failed(ParseErr::MissingArgument("-o, --out".to_string())),
        outcome
    );
    if let ParseOutcome::Failed(err) = outcome {
        assert_eq!("Option -o, --out needs an argument value", err.to_string());
    }
}

#[test]
fn help_wins() {
    let (outcome, _) = parse::<Out>(&["-h", "-o"]);
    assert_eq!(ParseOutcome::HelpRequested, outcome.unwrap());

    let (outcome, _) = parse::<Out>(&["x", "--help"]);
    assert_eq!(ParseOutcome::HelpRequested, outcome.unwrap());
}

#[test]
fn automatic_naming() {
    let mut cmd = AutoNamed::default();
    let registry = OptionRegistry::discover(&mut cmd).unwrap();
    assert!(registry.has_option("--print-usage"));
    assert!(!registry.get_option("--print-usage").unwrap().has_arg());

    let outcome = DefaultParser::new()
        .parse_with(&registry, &mut cmd, &["--print-usage"])
        .unwrap();
    assert!(outcome.is_success());
    assert!(cmd.print_usage);
}

#[test]
fn automatic_naming_value_option() {
    let (outcome, cmd) = parse::<AutoValue>(&["--output-dir", "out", "--force", "in"]);
    assert_eq!(ParseOutcome::Success(vec!["in".to_string()]), outcome.unwrap());
    assert_eq!("out", cmd.output_dir);
    assert!(cmd.force);

    let (outcome, _) = parse::<AutoValue>(&["--output-dir"]);
    assert_eq!(
        ParseOutcome::Failed(ParseErr::MissingArgument("--output-dir".into())),
        outcome.unwrap()
    );
}

#[test]
fn conflicts_fail_before_parsing() {
    for args in [&[][..], &["--out", "x"][..], &["--bogus"][..]] {
        let (outcome, cmd) = parse::<TwoOuts>(args);
        assert!(matches!(outcome, Err(OptionErr::Conflict { .. })));
        assert!(cmd.first.is_empty());
        assert!(cmd.second.is_empty());
    }
}

#[test]
fn conversion_is_deterministic() {
    assert_eq!(Value::I32(42), convert("42", ValueKind::I32).unwrap());
    assert_eq!(convert("42", ValueKind::I32).unwrap(), convert("42", ValueKind::I32).unwrap());
    assert_eq!(
        convert("abc", ValueKind::I32).unwrap_err(),
        convert("abc", ValueKind::I32).unwrap_err()
    );
}

#[test]
fn positional_capture() {
    let (outcome, cmd) = parse::<Verbose>(&["a.txt", "-v", "b.txt"]);
    assert_eq!(
        ParseOutcome::Success(vec!["a.txt".to_string(), "b.txt".to_string()]),
        outcome.unwrap()
    );
    assert!(cmd.verbose);
}

#[test]
fn parser_is_reusable() {
    let mut parser = DefaultParser::new();
    let mut first = Out::default();
    assert!(!parser.parse_args(&mut first, &["-h"]).unwrap().is_success());

    let mut second = Out::default();
    let outcome = parser.parse_args(&mut second, &["-o", "x", "y"]).unwrap();
    assert_eq!(Some(vec!["y".to_string()]), outcome.into_args());
}
