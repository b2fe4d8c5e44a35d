//! Line-based interactive questions.

use std::fmt::Display;
use std::io::{BufRead, Write};

use anyhow::{bail, Result};
use codemeta_core::model;
use codemeta_schema::format;
use crossterm::style::Stylize as _;
use serde_json::Value;

pub(crate) struct Prompter<R, W> {
    input: R,
    output: W,
    color: bool,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W, color: bool) -> Self {
        Prompter {
            input,
            output,
            color,
        }
    }

    /// Print an informational line.
    pub fn say(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    /// Ask a question and return the trimmed answer, which may be empty.
    pub fn ask(&mut self, label: &str) -> Result<String> {
        if self.color {
            write!(self.output, "{} {} ", "?".green().bold(), label.bold())?;
        } else {
            write!(self.output, "? {} ", label)?;
        }
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("no input while waiting for: {}", label);
        }
        Ok(line.trim().to_string())
    }

    /// Like [`Prompter::ask`], but non-empty answers must pass `check`.
    pub fn ask_validated(
        &mut self,
        label: &str,
        check: impl Fn(&str) -> Result<()>,
    ) -> Result<String> {
        let answer = self.ask(label)?;
        if !answer.is_empty() {
            check(&answer)?;
        }
        Ok(answer)
    }

    /// Show a numbered menu and return the index of the chosen option.
    ///
    /// The answer may be the option's number or its name, in any case.
    pub fn select(&mut self, label: &str, options: &[&str]) -> Result<usize> {
        self.say(label)?;
        for (i, option) in options.iter().enumerate() {
            if self.color {
                writeln!(self.output, "  {}) {}", i + 1, option.cyan())?;
            } else {
                writeln!(self.output, "  {}) {}", i + 1, option)?;
            }
        }
        let answer = self.ask("Enter a number or a name:")?;
        let chosen = match answer.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => Some(n - 1),
            Ok(_) => None,
            Err(_) => options
                .iter()
                .position(|option| option.eq_ignore_ascii_case(&answer)),
        };
        match chosen {
            Some(i) => {
                tracing::debug!(selected = options[i], "{}", label);
                Ok(i)
            }
            None => bail!("invalid selection `{}`", answer),
        }
    }

    /// Ask for a person or an organization and build the entity.
    pub fn person_or_organization(&mut self, label: &str) -> Result<Value> {
        let kind = self.select(
            &format!("Please enter a {} type:", label),
            &[model::PERSON_TYPE, model::ORGANIZATION_TYPE],
        )?;
        if kind == 0 {
            let given_name = self.ask("Enter the given (first) name of the person")?;
            let family_name = self.ask("Enter the family (last) name of the person")?;
            let email = self.ask_validated("Enter the email address of the person", check_email)?;
            let id = self.ask("Enter the identifier of the person (see: https://orcid.org)")?;
            Ok(model::person(&given_name, &family_name, &email, &id))
        } else {
            let name = self.ask("Enter the name of the organization")?;
            let url = self.ask_validated("Enter the URL of the organization", check_url)?;
            let id = self.ask("Enter the identifier of the organization (see: https://orcid.org)")?;
            Ok(model::organization(&name, &url, &id))
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

pub(crate) fn check_email(answer: &str) -> Result<()> {
    if !format::is_email(answer) {
        bail!("invalid email address: {}", answer);
    }
    Ok(())
}

pub(crate) fn check_url(answer: &str) -> Result<()> {
    if !format::is_url(answer) {
        bail!("invalid URL: {}", answer);
    }
    Ok(())
}
