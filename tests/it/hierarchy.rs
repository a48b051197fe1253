use expect_test::expect;
use fieldopts::{
    Command, Declarations, DefaultParser, HelpFormatter, OptionErr, OptionRegistry, OptionSpec,
    ParseOutcome, Parser, Syntax,
};

use crate::check;

#[derive(Debug, Default)]
pub struct Base {
    pub verbose: bool,
    pub output: String,
}

impl Command for Base {
    fn declare(decl: &mut Declarations<Self>) {
        decl.add(
            OptionSpec::builder("verbose")
                .option("v")
                .desc("Print more")
                .switch(|b: &mut Base| &mut b.verbose),
        )
        .add(
            OptionSpec::builder("output")
                .option("o")
                .long_option("output")
                .arg_name("dir")
                .desc("Output directory")
                .value(|b: &mut Base| &mut b.output),
        );
    }
}

#[derive(Debug, Default)]
pub struct Patch {
    pub base: Base,
    pub force: bool,
    pub keystore: Vec<String>,
}

impl Command for Patch {
    fn syntax() -> Syntax {
        Syntax::new("patch")
            .syntax("patch [options] <apk> [<apk> ...]")
            .desc("Patch apk files.")
    }

    fn declare(decl: &mut Declarations<Self>) {
        decl.include(|p: &mut Patch| &mut p.base)
            .add(
                OptionSpec::builder("force")
                    .option("f")
                    .long_option("force")
                    .desc("Force overwrite existing output")
                    .switch(|p: &mut Patch| &mut p.force),
            )
            .add(
                OptionSpec::builder("keystore")
                    .option("k")
                    .long_option("keystore")
                    .arg_name("field")
                    .desc("Keystore file, password, alias and alias password")
                    .values(|p: &mut Patch| &mut p.keystore),
            );
    }

    fn version(&self) -> Option<String> {
        Some("0.5.1".to_string())
    }
}

#[derive(Debug, Default)]
pub struct Nested {
    pub patch: Patch,
    pub dry_run: bool,
}

impl Command for Nested {
    fn declare(decl: &mut Declarations<Self>) {
        decl.include(|n: &mut Nested| &mut n.patch).add(
            OptionSpec::builder("dryRun").switch(|n: &mut Nested| &mut n.dry_run),
        );
    }
}

#[derive(Debug, Default)]
pub struct Redeclares {
    pub base: Base,
    pub out: String,
}

impl Command for Redeclares {
    fn declare(decl: &mut Declarations<Self>) {
        decl.include(|r: &mut Redeclares| &mut r.base).add(
            OptionSpec::builder("out")
                .long_option("output")
                .value(|r: &mut Redeclares| &mut r.out),
        );
    }
}

#[test]
fn base_options_fill_embedded_fields() {
    check::<Patch>(
        "-v a.apk -o out -k ks -k pass b.apk -f",
        expect![[r#"
            Success(["a.apk", "b.apk"])
            Patch {
                base: Base {
                    verbose: true,
                    output: "out",
                },
                force: true,
                keystore: [
                    "ks",
                    "pass",
                ],
            }"#]],
    );
}

#[test]
fn nested_includes() {
    check::<Nested>(
        "--dry-run --output build -v",
        expect![[r#"
            Success([])
            Nested {
                patch: Patch {
                    base: Base {
                        verbose: true,
                        output: "build",
                    },
                    force: false,
                    keystore: [],
                },
                dry_run: true,
            }"#]],
    );
}

#[test]
fn derived_conflict_is_reported_against_base() {
    let mut cmd = Redeclares::default();
    let err = OptionRegistry::discover(&mut cmd).unwrap_err();
    assert!(matches!(err, OptionErr::Conflict { .. }));
    assert_eq!(
        "option `--output` of field `out` conflicts with field `output`",
        err.to_string()
    );

    let err = DefaultParser::new()
        .parse_args(&mut cmd, &["-v"])
        .unwrap_err();
    assert!(err.is_declaration());
    assert!(!cmd.base.verbose);
}

#[test]
fn usage_listing() {
    let mut patch = Patch::default();
    let registry = OptionRegistry::discover(&mut patch).unwrap();
    let mut formatter = HelpFormatter::new();
    formatter.set_newline("\n");

    let outcome = DefaultParser::new()
        .parse_with(&registry, &mut patch, &["-x"])
        .unwrap();
    let mut out = Vec::new();
    formatter
        .print_outcome(&mut out, &outcome, &registry, patch.version())
        .unwrap();

    expect![[r#"
        ERROR: Unrecognized option: -x
        usage: patch [options] <apk> [<apk> ...]
        Patch apk files.

        Options:

          -f, --force  Force overwrite existing output

          -h, --help   Print this help message

          -k, --keystore <field>
                       Keystore file, password, alias and alias password

          -o, --output <dir>
                       Output directory

          -v           Print more

        version: 0.5.1
    "#]]
    .assert_eq(&String::from_utf8(out).unwrap());
    assert_eq!(ParseOutcome::HelpRequested.exit_code(), outcome.exit_code());
}
