use std::io::{self, BufRead, Write};

/// Ask for a value on `output`, read one line from `input`. An empty answer
/// or end of input yields `default`.
pub fn prompt_with_default<R, W>(
    input: &mut R,
    output: &mut W,
    message: &str,
    default: &str,
) -> io::Result<String>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{message} [{default}]: ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim();
    if answer.is_empty() {
        Ok(default.to_owned())
    } else {
        Ok(answer.to_owned())
    }
}

/// Use `value` when given, otherwise prompt on stdin/stdout unless
/// `interactive` is off.
pub fn value_or_prompt(
    value: Option<String>,
    interactive: bool,
    message: &str,
    default: &str,
) -> io::Result<String> {
    match value {
        Some(value) => Ok(value),
        None if interactive => {
            prompt_with_default(&mut io::stdin().lock(), &mut io::stdout(), message, default)
        }
        None => Ok(default.to_owned()),
    }
}
