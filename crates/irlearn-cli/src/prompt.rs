//! Line-based terminal prompts.
//!
//! Every prompt reads whole lines, so the wizard works the same over a tty,
//! a pipe, or a scripted buffer in tests. Invalid answers are reported and
//! the question is asked again. End of input is an `UnexpectedEof` error.

use std::fmt::Display;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

use irlearn_core::{
    CaptureError, Catalog, CommandToken, Confirmation, FailureChoice, Leaf, Operator,
};

/// Prompt surface over any line reader and writer.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl Terminal<StdinLock<'static>, Stdout> {
    /// Terminal bound to the process stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write a line of text.
    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// Print `prompt` and read one line, without the trailing newline.
    pub fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Ask until a non-empty answer is given.
    pub fn ask_non_empty(&mut self, prompt: &str) -> io::Result<String> {
        loop {
            let answer = self.ask(prompt)?;
            let answer = answer.trim();
            if !answer.is_empty() {
                return Ok(answer.to_string());
            }
            self.say("  A value is required.")?;
        }
    }

    /// Pick any number of catalog entries.
    ///
    /// The answer lists numbers or names separated by commas or spaces. The
    /// result keeps the order the operator typed them in. An empty answer
    /// selects nothing.
    pub fn multi_select<T: Catalog>(&mut self, title: &str, choices: &[T]) -> io::Result<Vec<T>> {
        self.say(title)?;
        for (index, choice) in choices.iter().enumerate() {
            self.say(format_args!("  {:>2}) {}", index + 1, choice))?;
        }

        loop {
            let answer = self.ask("Select by number or name, separated by commas (empty for none): ")?;
            match parse_selection(&answer, choices) {
                Ok(selected) => return Ok(selected),
                Err(message) => self.say(format_args!("  {}", message))?,
            }
        }
    }

    /// Ask for a finite number.
    pub fn number(&mut self, prompt: &str) -> io::Result<f64> {
        loop {
            let answer = self.ask(prompt)?;
            match validate_number(&answer) {
                Ok(value) => return Ok(value),
                Err(message) => self.say(format_args!("  {}", message))?,
            }
        }
    }

    /// Pick exactly one entry. An empty answer picks the first choice.
    pub fn select_one<T: Display + Copy>(&mut self, title: &str, choices: &[T]) -> io::Result<T> {
        self.say(title)?;
        for (index, choice) in choices.iter().enumerate() {
            let marker = if index == 0 { " (default)" } else { "" };
            self.say(format_args!("  {:>2}) {}{}", index + 1, choice, marker))?;
        }

        loop {
            let answer = self.ask("Select by number or value: ")?;
            let answer = answer.trim();
            if answer.is_empty() {
                if let Some(first) = choices.first() {
                    return Ok(*first);
                }
            }

            let by_number = answer
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| choices.get(i));
            let by_value = choices.iter().find(|c| c.to_string() == answer);

            match by_number.or(by_value) {
                Some(choice) => return Ok(*choice),
                None => self.say(format_args!("  '{}' is not one of the choices", answer))?,
            }
        }
    }

    /// Yes/no question where an empty answer means yes.
    pub fn ask_yes_no(&mut self, prompt: &str) -> io::Result<bool> {
        let answer = self.ask(prompt)?;
        Ok(Confirmation::parse(&answer) == Confirmation::Accept)
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> Operator for Terminal<R, W> {
    fn announce(&mut self, leaf: &Leaf, position: usize, total: usize) -> io::Result<()> {
        self.say("")?;
        self.say(format_args!("[{}/{}] Learning {}", position, total, leaf))?;
        self.output.flush()
    }

    fn confirm(&mut self, _leaf: &Leaf, token: &CommandToken) -> io::Result<Confirmation> {
        let answer = self.ask(&format!(
            "Press Enter or Y to confirm or N to relearn - {}\n",
            token
        ))?;
        Ok(Confirmation::parse(&answer))
    }

    fn capture_failed(&mut self, _leaf: &Leaf, error: &CaptureError) -> io::Result<FailureChoice> {
        self.say(format_args!("Capture failed: {}", error))?;
        self.say(format_args!("  hint: {}", error.hint()))?;
        if self.ask_yes_no("Try again? [Y/n] ")? {
            Ok(FailureChoice::Retry)
        } else {
            Ok(FailureChoice::Abort)
        }
    }
}

/// Parse a multi-select answer against `choices`.
///
/// Tokens may be 1-based indices or catalog names. Repeats collapse onto
/// the first occurrence.
pub fn parse_selection<T: Catalog>(answer: &str, choices: &[T]) -> Result<Vec<T>, String> {
    let mut selected = Vec::new();

    for token in answer
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let choice = match token.parse::<usize>() {
            Ok(number) => number
                .checked_sub(1)
                .and_then(|i| choices.get(i))
                .copied()
                .ok_or_else(|| format!("{} is not between 1 and {}", number, choices.len()))?,
            Err(_) => choices
                .iter()
                .find(|c| c.to_string().eq_ignore_ascii_case(token))
                .copied()
                .ok_or_else(|| format!("'{}' is not a valid {}", token, T::NAME))?,
        };

        if !selected.contains(&choice) {
            selected.push(choice);
        }
    }

    Ok(selected)
}

/// Accept plain numbers only; rejects text, NaN and infinities.
pub fn validate_number(answer: &str) -> Result<f64, String> {
    let answer = answer.trim();
    match answer.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(format!("'{}' is not a number", answer)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use irlearn_core::{FanMode, OperationMode, Precision, SwingMode};

    fn terminal(input: &str) -> Terminal<&[u8], Vec<u8>> {
        Terminal::new(input.as_bytes(), Vec::new())
    }

    fn output(terminal: Terminal<&[u8], Vec<u8>>) -> String {
        String::from_utf8(terminal.into_inner().1).unwrap()
    }

    #[test]
    fn selection_keeps_typed_order() {
        let choices = OperationMode::selectable();
        let selected = parse_selection("cool, 1 heat", &choices).unwrap();
        assert_eq!(
            selected,
            vec![OperationMode::Cool, OperationMode::Auto, OperationMode::Heat]
        );
    }

    #[test]
    fn selection_collapses_repeats_and_ignores_case() {
        let choices = FanMode::all();
        let selected = parse_selection("LEVEL2 level2 3", &choices).unwrap();
        assert_eq!(selected, vec![FanMode::Level2]);
    }

    #[test]
    fn selection_rejects_unknown_and_out_of_range() {
        let choices = OperationMode::selectable();
        assert!(parse_selection("off", &choices).unwrap_err().contains("operation mode"));
        assert!(parse_selection("0", &choices).is_err());
        assert!(parse_selection("7", &choices).unwrap_err().contains("between 1 and 6"));
    }

    #[test]
    fn empty_selection_is_allowed() {
        let choices = SwingMode::all();
        assert_eq!(parse_selection("  ", &choices).unwrap(), Vec::<SwingMode>::new());
    }

    #[test]
    fn number_validator_rejects_text() {
        assert_eq!(validate_number(" 16 "), Ok(16.0));
        assert_eq!(validate_number("16.5"), Ok(16.5));
        assert!(validate_number("sixteen").is_err());
        assert!(validate_number("NaN").is_err());
        assert!(validate_number("inf").is_err());
        assert!(validate_number("").is_err());
    }

    #[test]
    fn multi_select_reprompts_on_invalid_answer() {
        let mut term = terminal("cool bogus\n3,1\n");
        let selected = term
            .multi_select("Select Operation Modes", &OperationMode::selectable())
            .unwrap();
        assert_eq!(selected, vec![OperationMode::Cool, OperationMode::Auto]);

        let shown = output(term);
        assert!(shown.contains("Select Operation Modes"));
        assert!(shown.contains(" 6) dry"));
        assert!(!shown.contains(") off"));
        assert!(shown.contains("'bogus' is not a valid operation mode"));
    }

    #[test]
    fn number_reprompts_until_numeric() {
        let mut term = terminal("warm\n21\n");
        assert_eq!(term.number("Enter the Minimum Temperature: ").unwrap(), 21.0);
        assert!(output(term).contains("'warm' is not a number"));
    }

    #[test]
    fn select_one_defaults_to_first() {
        let mut term = terminal("\n");
        let precision = term.select_one("Select Precision", &Precision::ALL).unwrap();
        assert_eq!(precision, Precision::Whole);
        assert!(output(term).contains("1.0 (default)"));
    }

    #[test]
    fn select_one_by_number_or_value() {
        let mut term = terminal("2\n");
        assert_eq!(term.select_one("p", &Precision::ALL).unwrap(), Precision::Half);

        let mut term = terminal("3\n0.5\n");
        assert_eq!(term.select_one("p", &Precision::ALL).unwrap(), Precision::Half);
        assert!(output(term).contains("'3' is not one of the choices"));
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut term = terminal("");
        let err = term.ask("anything? ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn operator_confirm_parses_answers() {
        let token = CommandToken::from("JgBGAJKV");
        let mut term = terminal("\nn\nY\n");
        assert_eq!(Operator::confirm(&mut term, &Leaf::Off, &token).unwrap(), Confirmation::Accept);
        assert_eq!(Operator::confirm(&mut term, &Leaf::Off, &token).unwrap(), Confirmation::Reject);
        assert_eq!(Operator::confirm(&mut term, &Leaf::Off, &token).unwrap(), Confirmation::Accept);
        assert!(output(term).contains("Press Enter or Y to confirm or N to relearn - JgBGAJKV"));
    }

    #[test]
    fn operator_capture_failure_shows_hint() {
        let mut term = terminal("n\n");
        let choice = term.capture_failed(&Leaf::Off, &CaptureError::NoSignal).unwrap();
        assert_eq!(choice, FailureChoice::Abort);
        let shown = output(term);
        assert!(shown.contains("Capture failed"));
        assert!(shown.contains("hint:"));
    }

    #[test]
    fn operator_announce_shows_progress() {
        let mut term = terminal("");
        term.announce(&Leaf::Off, 1, 25).unwrap();
        assert!(output(term).contains("[1/25] Learning OFF"));
    }
}
