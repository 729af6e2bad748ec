use crate::console::Console;
use crate::engine::Ledger;
use crate::errors::LedgerError;
use std::io::{self, BufRead, Write};

const DIVIDER: &str = "------------------------------------";
const ACCOUNT_PROMPT: &str = "Enter account number: ";

/// Runs the interactive menu until the user exits or input runs out.
///
/// Every handler calls at most one ledger operation and reports its outcome;
/// ledger failures are printed and never end the session.
pub fn run<R: BufRead, W: Write>(
    ledger: &mut Ledger,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    loop {
        console.clear_screen()?;
        print_menu(console)?;

        let choice = console.read_int("Enter your choice: ")?;
        if console.is_closed() {
            console.println("")?;
            return Ok(());
        }

        match choice {
            Some(1) => create_account(ledger, console)?,
            Some(2) => deposit(ledger, console)?,
            Some(3) => withdraw(ledger, console)?,
            Some(4) => transfer(ledger, console)?,
            Some(5) => check_balance(ledger, console)?,
            Some(6) => list_all_accounts(ledger, console)?,
            Some(7) => {
                console.println("Exiting banking system. Goodbye!")?;
                return Ok(());
            }
            _ => {
                console.println("\nInvalid choice. Please enter a number between 1 and 7.")?;
                console.press_enter_to_continue()?;
            }
        }
    }
}

fn print_menu<R: BufRead, W: Write>(console: &mut Console<R, W>) -> io::Result<()> {
    console.println(DIVIDER)?;
    console.println("  Rust Terminal Banking System")?;
    console.println(DIVIDER)?;
    console.println("1. Create New Account")?;
    console.println("2. Deposit Funds")?;
    console.println("3. Withdraw Funds")?;
    console.println("4. Transfer Funds")?;
    console.println("5. Check Account Balance")?;
    console.println("6. List All Accounts")?;
    console.println("7. Exit")?;
    console.println(DIVIDER)
}

fn create_account<R: BufRead, W: Write>(
    ledger: &mut Ledger,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    console.clear_screen()?;
    console.println("--- Create New Account ---")?;

    let owner_name = console
        .read_string("Enter account owner name: ")?
        .unwrap_or_default();
    let outcome = ledger.create_account(&owner_name).map(|account_number| {
        format!(
            "Successfully created account for {}. Account number: {}",
            owner_name, account_number
        )
    });

    report(console, outcome)
}

fn deposit<R: BufRead, W: Write>(
    ledger: &mut Ledger,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    console.clear_screen()?;
    console.println("--- Deposit Funds ---")?;

    let account_number = match read_account(console, ACCOUNT_PROMPT, "account number")? {
        Some(account_number) => account_number,
        None => return Ok(()),
    };
    let amount = match read_amount(console, "Enter amount to deposit: $")? {
        Some(amount) => amount,
        None => return Ok(()),
    };

    let outcome = ledger.deposit(account_number, amount).map(|balance| {
        format!(
            "Successfully deposited ${:.2} into account {}. New balance: ${:.2}",
            amount, account_number, balance
        )
    });

    report(console, outcome)
}

fn withdraw<R: BufRead, W: Write>(
    ledger: &mut Ledger,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    console.clear_screen()?;
    console.println("--- Withdraw Funds ---")?;

    let account_number = match read_account(console, ACCOUNT_PROMPT, "account number")? {
        Some(account_number) => account_number,
        None => return Ok(()),
    };
    let amount = match read_amount(console, "Enter amount to withdraw: $")? {
        Some(amount) => amount,
        None => return Ok(()),
    };

    let outcome = ledger.withdraw(account_number, amount).map(|balance| {
        format!(
            "Successfully withdrew ${:.2} from account {}. New balance: ${:.2}",
            amount, account_number, balance
        )
    });

    report(console, outcome)
}

fn transfer<R: BufRead, W: Write>(
    ledger: &mut Ledger,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    console.clear_screen()?;
    console.println("--- Transfer Funds ---")?;

    let from = match read_account(
        console,
        "Enter source account number: ",
        "source account number",
    )? {
        Some(from) => from,
        None => return Ok(()),
    };
    let to = match read_account(
        console,
        "Enter destination account number: ",
        "destination account number",
    )? {
        Some(to) => to,
        None => return Ok(()),
    };
    let amount = match read_amount(console, "Enter amount to transfer: $")? {
        Some(amount) => amount,
        None => return Ok(()),
    };

    let outcome = ledger.transfer(from, to, amount).map(|()| {
        format!(
            "Successfully transferred ${:.2} from account {} to account {}.",
            amount, from, to
        )
    });

    report(console, outcome)
}

fn check_balance<R: BufRead, W: Write>(
    ledger: &Ledger,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    console.clear_screen()?;
    console.println("--- Check Account Balance ---")?;

    let account_number = match read_account(console, ACCOUNT_PROMPT, "account number")? {
        Some(account_number) => account_number,
        None => return Ok(()),
    };

    let outcome = ledger.get_account(account_number).map(|view| {
        format!(
            "\n--- Account Details ---\n{}\n-----------------------",
            view
        )
    });

    report(console, outcome)
}

fn list_all_accounts<R: BufRead, W: Write>(
    ledger: &Ledger,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    console.clear_screen()?;
    console.println("--- List All Accounts ---")?;

    let accounts = ledger.list_accounts();
    if accounts.is_empty() {
        console.println("\nNo accounts registered yet.")?;
    } else {
        console.println("\n--- All Accounts ---")?;
        for view in accounts {
            console.println(view.to_string())?;
            console.println("--------------------")?;
        }
    }

    console.press_enter_to_continue()
}

/// Prompts for an account number, reporting `Invalid <what>.` and pausing
/// when the input does not parse.
fn read_account<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    prompt: &str,
    what: &str,
) -> io::Result<Option<u32>> {
    let account_number = console.read_int(prompt)?;
    if account_number.is_none() {
        console.println(format!("Invalid {}.", what))?;
        console.press_enter_to_continue()?;
    }

    Ok(account_number)
}

fn read_amount<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    prompt: &str,
) -> io::Result<Option<f64>> {
    let amount = console.read_float(prompt)?;
    if amount.is_none() {
        console.println("Invalid amount.")?;
        console.press_enter_to_continue()?;
    }

    Ok(amount)
}

fn report<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    outcome: Result<String, LedgerError>,
) -> io::Result<()> {
    match outcome {
        Ok(message) => console.println(message)?,
        Err(err) => console.println(format!("Error: {}", err))?,
    }

    console.press_enter_to_continue()
}
