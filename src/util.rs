use crate::error::OptionErr;

pub struct Util;

impl Util {
    /// Derive a long option name from a field name.
    ///
    /// Both `printHelp` and `print_help` become `print-help`.
    pub fn from_camel(name: &str) -> String {
        let mut buf = String::with_capacity(name.len() + 4);
        for (i, c) in name.chars().enumerate() {
            if i == 0 {
                buf.extend(c.to_lowercase());
            } else if c.is_uppercase() {
                buf.push('-');
                buf.extend(c.to_lowercase());
            } else if c == '_' {
                buf.push('-');
            } else {
                buf.push(c);
            }
        }
        buf
    }
}

pub struct OptionValidator;

impl OptionValidator {
    fn is_valid_char(c: char) -> bool {
        c.is_alphanumeric() || c == '?' || c == '@' || c == '-' || c == '_' || c == '.'
    }

    /// Check a short or long option name as written without its leading hyphens.
    pub fn validate(field: &str, option: &str) -> Result<(), OptionErr> {
        let invalid = |reason: String| OptionErr::InvalidName {
            field: field.to_string(),
            name: option.to_string(),
            reason,
        };

        if option.is_empty() {
            return Err(invalid("illegal blank option name".to_string()));
        }
        if option.starts_with('-') {
            return Err(invalid("option names are declared without leading hyphens".to_string()));
        }
        if let Some(c) = option.chars().find(|c| !Self::is_valid_char(*c)) {
            return Err(invalid(format!("contains an illegal character: '{}'", c)));
        }
        Ok(())
    }
}
