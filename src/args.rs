use crate::storage::DEFAULT_DATA_FILE;
use clap::{App, Arg, ArgMatches};
use std::path::PathBuf;

pub struct Args {
    pub data_file: PathBuf,
    pub statement: bool,
}

impl Args {
    pub fn parse() -> Self {
        Self::from_matches(&Self::app().get_matches())
    }

    fn app() -> App<'static, 'static> {
        App::new("bank")
            .version("0.1.0")
            .about("Terminal ledger for bank accounts")
            .arg(
                Arg::with_name("data_file")
                    .long("data-file")
                    .takes_value(true)
                    .default_value(DEFAULT_DATA_FILE)
                    .help("path of the JSON file accounts are persisted to"),
            )
            .arg(
                Arg::with_name("statement")
                    .long("statement")
                    .help("print a CSV statement of all accounts and exit"),
            )
    }

    fn from_matches(matches: &ArgMatches<'_>) -> Self {
        Self {
            data_file: PathBuf::from(matches.value_of("data_file").unwrap_or(DEFAULT_DATA_FILE)),
            statement: matches.is_present("statement"),
        }
    }
}
