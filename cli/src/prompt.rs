use anyhow::{bail, Result};
use std::io::{BufRead, Write};

/// Line-oriented console questions.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self { Self { input, output } }

    /// Ask and return the trimmed answer. Closed input is an error.
    pub fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("input closed while waiting for an answer");
        }
        Ok(line.trim().to_string())
    }

    /// Re-ask until the answer is a positive integer.
    pub fn ask_positive(&mut self, question: &str) -> Result<usize> {
        loop {
            let answer = self.ask(question)?;
            match answer.parse::<usize>() {
                Ok(n) if n > 0 => return Ok(n),
                _ => writeln!(self.output, "Please enter a positive whole number.")?,
            }
        }
    }

    pub fn ask_words(&mut self, question: &str) -> Result<Vec<String>> {
        Ok(self.ask(question)?.split_whitespace().map(str::to_string).collect())
    }

    pub fn say(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasks_until_positive() {
        let input = b"abc\n0\n-3\n5\n".as_slice();
        let mut out = Vec::new();
        let n = Prompter::new(input, &mut out).ask_positive("Top N: ").unwrap();
        assert_eq!(n, 5);
        let shown = String::from_utf8(out).unwrap();
        assert_eq!(shown.matches("Top N: ").count(), 4);
    }

    #[test]
    fn splits_words_and_errors_on_eof() {
        let mut p = Prompter::new(b"  rust   sql \n".as_slice(), Vec::new());
        assert_eq!(p.ask_words("kw: ").unwrap(), vec!["rust", "sql"]);
        assert!(p.ask("again: ").is_err());
    }
}
