mod age;
mod error;
mod person;

use age::{Age, compute_age};
use anyhow::{Result, bail};
use chrono::{Local, NaiveDate};
use error::AgeError;
use person::parse_date;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

const USAGE: &str = "\
Usage: agecalc [OPTIONS] [NAME] [BIRTH_DATE]

Computes an age in years, months and days from a dd/mm/yyyy birth date.
Prompts for anything not given on the command line.

Options:
  --reference <dd/mm/yyyy>  Measure against this date instead of today
  --json                    Print the breakdown as JSON
  -h, --help                Show this help";

struct Cli {
    name: Option<String>,
    birth_date: Option<String>,
    reference: Option<String>,
    json: bool,
}

fn parse_cli(mut args: impl Iterator<Item = String>) -> Result<Cli> {
    let mut cli = Cli {
        name: None,
        birth_date: None,
        reference: None,
        json: false,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => cli.json = true,
            "--reference" => {
                let Some(value) = args.next() else {
                    bail!("--reference needs a dd/mm/yyyy value");
                };
                cli.reference = Some(value);
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            _ if arg.starts_with('-') => bail!("unknown option `{arg}`\n{USAGE}"),
            _ if cli.name.is_none() => cli.name = Some(arg),
            _ if cli.birth_date.is_none() => cli.birth_date = Some(arg),
            _ => bail!("unexpected argument `{arg}`\n{USAGE}"),
        }
    }

    Ok(cli)
}

/// Inserts commas every three digits: 12419 -> "12,419".
fn group_thousands(n: i64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn render(name: &str, age: &Age, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(age)?);
    }
    Ok(format!(
        "Hello, {name}! You are {age} old.\n(That is {} days in total.)",
        group_thousands(age.total_days)
    ))
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        bail!("stdin closed");
    }
    Ok(line.trim_end().to_owned())
}

/// Form-style loop: ask, validate, and re-ask after a bad entry instead of
/// giving up, the same way the original window stayed open on error.
fn run_interactive(cli: &Cli, reference: NaiveDate) -> Result<()> {
    loop {
        let name = match &cli.name {
            Some(name) => name.clone(),
            None => prompt("Your name")?,
        };
        let raw_date = match &cli.birth_date {
            Some(raw) => raw.clone(),
            None => prompt("Birth date (dd/mm/yyyy)")?,
        };

        let result = parse_date(&raw_date)
            .and_then(|birth| compute_age(&name, birth, reference));

        match result {
            Ok(age) => {
                println!("{}", render(name.trim(), &age, cli.json)?);
                return Ok(());
            }
            Err(err) => {
                // Re-prompting can only fix values typed at a prompt; a bad
                // value given on the command line fails hard instead.
                let from_args = match &err {
                    AgeError::InvalidName => cli.name.is_some(),
                    AgeError::InvalidDate(_) | AgeError::FutureBirthDate(_) => {
                        cli.birth_date.is_some()
                    }
                };
                if from_args {
                    bail!(err);
                }
                eprintln!("error: {err}");
            }
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = parse_cli(std::env::args().skip(1))?;

    let reference = match &cli.reference {
        Some(raw) => parse_date(raw)?,
        None => Local::now().date_naive(),
    };

    // Everything came from the command line: one shot, no re-prompting.
    if let (Some(name), Some(raw)) = (&cli.name, &cli.birth_date) {
        let birth = parse_date(raw)?;
        let age = compute_age(name, birth, reference)?;
        println!("{}", render(name.trim(), &age, cli.json)?);
        return Ok(());
    }

    run_interactive(&cli, reference)
}
