mod hierarchy;
mod properties;

use std::fmt;

use expect_test::Expect;
use fieldopts::{Command, DefaultParser, Parser};

/// Parse `args` into a fresh `C` and compare the outcome and the resulting
/// fields with `expect`.
fn check<C>(args: &str, expect: Expect)
where
    C: Command + Default + fmt::Debug,
{
    let args = args.split_ascii_whitespace().collect::<Vec<_>>();
    let mut cmd = C::default();
    match DefaultParser::new().parse_args(&mut cmd, &args) {
        Ok(outcome) => expect.assert_eq(&format!("{:?}\n{:#?}", outcome, cmd)),
        Err(err) => expect.assert_eq(&err.to_string()),
    }
}
