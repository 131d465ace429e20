use anyhow::Context;
use bankacct::{parse_ymd, Account, ParseUsdError, Person, Pin, Usd};
use lexopt::{Arg, Parser, ValueExt};
use std::io::{self, Write};
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;
use time::{Date, OffsetDateTime};
use tracing::Level;

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunArgs),
    Help,
    Version,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct RunArgs {
    id: String,
    first: String,
    last: String,
    opened: Option<Date>,
    closed: Option<Date>,
    balance: Usd,
    pin: Pin,
    withdrawals: Vec<Withdrawal>,
    verbose: bool,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut positional = Vec::with_capacity(3);
        let mut opened = None;
        let mut closed = None;
        let mut balance = Usd::ZERO;
        let mut pin = Pin::new(0);
        let mut withdrawals: Vec<Withdrawal> = Vec::new();
        let mut verbose = false;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('o') | Arg::Long("opened") => {
                    opened = Some(parser.value()?.parse_with(parse_ymd)?);
                }
                Arg::Short('c') | Arg::Long("closed") => {
                    closed = Some(parser.value()?.parse_with(parse_ymd)?);
                }
                Arg::Short('b') | Arg::Long("balance") => balance = parser.value()?.parse()?,
                Arg::Short('p') | Arg::Long("pin") => {
                    pin = Pin::new(parser.value()?.parse()?);
                }
                Arg::Short('w') | Arg::Long("withdraw") => {
                    withdrawals.push(parser.value()?.parse()?);
                }
                Arg::Short('v') | Arg::Long("verbose") => verbose = true,
                Arg::Value(value) if positional.len() < 3 => positional.push(value.string()?),
                _ => return Err(arg.unexpected()),
            }
        }
        let Ok([id, first, last]) = <[String; 3]>::try_from(positional) else {
            return Err("expected <ID> <FIRST NAME> <LAST NAME>".into());
        };
        if closed.is_some() && opened.is_none() {
            return Err("--closed requires --opened".into());
        }
        Ok(Command::Run(RunArgs {
            id,
            first,
            last,
            opened,
            closed,
            balance,
            pin,
            withdrawals,
            verbose,
        }))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(args) => args.run(),
            Command::Help => {
                println!("Usage: bankacct [OPTIONS] <ID> <FIRST NAME> <LAST NAME>");
                println!();
                println!("Open an account, attempt withdrawals against it, and summarize it");
                println!();
                println!("Options:");
                println!("  -o, --opened <YYYY-MM-DD>     Date the account was opened [default: today]");
                println!("  -c, --closed <YYYY-MM-DD>     Date the account was closed (requires --opened)");
                println!("  -b, --balance <AMOUNT>        Starting balance in USD [default: 0]");
                println!("  -p, --pin <PIN>               Account PIN [default: 0]");
                println!("  -w, --withdraw <AMOUNT>:<PIN> Attempt a withdrawal (repeatable)");
                println!("  -v, --verbose                 Log each operation to stderr");
                println!("  -h, --help                    Display this help message and exit");
                println!("  -V, --version                 Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

impl RunArgs {
    fn run(self) -> anyhow::Result<()> {
        init_logging(self.verbose);
        self.execute(local_today, &mut io::stdout().lock(), &mut io::stderr().lock())
    }

    // `today` is only consulted when no opening date was given
    fn execute<F, W, E>(self, today: F, out: &mut W, err: &mut E) -> anyhow::Result<()>
    where
        F: FnOnce() -> anyhow::Result<Date>,
        W: Write,
        E: Write,
    {
        let opened = match self.opened {
            Some(d) => d,
            None => today()?,
        };
        let owner = Person::new(self.first, self.last);
        let mut account = Account::new(
            self.id,
            &opened,
            self.closed.as_ref(),
            &owner,
            self.balance,
            self.pin,
        )
        .context("failed to open account")?;
        for w in self.withdrawals {
            if let Err(e) = account.withdraw(w.amount, w.pin) {
                writeln!(err, "bankacct: withdrawal of ${} refused: {e}", w.amount)?;
            }
        }
        writeln!(out, "{account}")?;
        Ok(())
    }
}

fn local_today() -> anyhow::Result<Date> {
    Ok(OffsetDateTime::now_local()
        .context("failed to determine local date")?
        .date())
}

/// A withdrawal request given on the command line as `AMOUNT:PIN`
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Withdrawal {
    amount: Usd,
    pin: Pin,
}

impl FromStr for Withdrawal {
    type Err = ParseWithdrawalError;

    fn from_str(s: &str) -> Result<Withdrawal, ParseWithdrawalError> {
        let (amount, pin) = s
            .rsplit_once(':')
            .ok_or(ParseWithdrawalError::MissingPin)?;
        Ok(Withdrawal {
            amount: amount.parse()?,
            pin: Pin::new(pin.parse()?),
        })
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
enum ParseWithdrawalError {
    #[error("withdrawal must be given as AMOUNT:PIN")]
    MissingPin,
    #[error("invalid withdrawal amount")]
    Amount(#[from] ParseUsdError),
    #[error("invalid PIN")]
    Pin(#[from] ParseIntError),
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::ERROR };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}
