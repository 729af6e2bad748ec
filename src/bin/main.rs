use std::io;
use std::process;
use terminal_bank::args::Args;
use terminal_bank::console::Console;
use terminal_bank::engine::Ledger;
use terminal_bank::menu;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    if args.statement {
        let ledger = match Ledger::try_from(args.data_file) {
            Ok(ledger) => ledger,
            Err(err) => {
                eprintln!("failed to load accounts: {}", err);
                process::exit(1);
            }
        };

        let output = match ledger.generate_account_statements() {
            Ok(output) => output,
            Err(err) => {
                eprintln!("failed to generate output report: {}", err);
                process::exit(1);
            }
        };
        print!("{}", output);
        return;
    }

    let mut ledger = Ledger::open(args.data_file);
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());

    if let Err(err) = menu::run(&mut ledger, &mut console) {
        eprintln!("terminal session failed: {}", err);
        process::exit(1);
    }
}
