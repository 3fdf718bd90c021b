//! Interactive menu for manual contract testing
//!
//! - **Pure logic**: menu table, input parsing and validation
//! - **Imperative shell**: prompt/read/dispatch loop over generic I/O handles
//!
//! Invalid input is rejected before any node call is made.

use crate::account::{AccountAddress, LocalAccount};
use crate::client::NodeClient;
use crate::contract::{CallOutcome, ContractClient};
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use thiserror::Error;

const RULE: &str = "==================================================";

/// Entries of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AccountInfo,
    GetStatus,
    GetMessage,
    GetNumber,
    InitStatus,
    SetMessage,
    SetStatusTrue,
    UpdateStatus,
    LoadAccount,
    Quit,
}

impl MenuChoice {
    /// Menu entries in display order
    pub const ALL: [Self; 10] = [
        Self::AccountInfo,
        Self::GetStatus,
        Self::GetMessage,
        Self::GetNumber,
        Self::InitStatus,
        Self::SetMessage,
        Self::SetStatusTrue,
        Self::UpdateStatus,
        Self::LoadAccount,
        Self::Quit,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::AccountInfo => "1",
            Self::GetStatus => "2",
            Self::GetMessage => "3",
            Self::GetNumber => "4",
            Self::InitStatus => "5",
            Self::SetMessage => "6",
            Self::SetStatusTrue => "7",
            Self::UpdateStatus => "8",
            Self::LoadAccount => "9",
            Self::Quit => "0",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AccountInfo => "Show account info",
            Self::GetStatus => "Get status (get_status)",
            Self::GetMessage => "Get message (get_message)",
            Self::GetNumber => "Get number (get_number)",
            Self::InitStatus => "Initialize status (init_status)",
            Self::SetMessage => "Set message (set_message)",
            Self::SetStatusTrue => "Set status to true (set_status_true)",
            Self::UpdateStatus => "Update status (update_status)",
            Self::LoadAccount => "Load account",
            Self::Quit => "Quit",
        }
    }

    /// Look up the entry for a typed key
    #[must_use]
    pub fn from_key(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL.into_iter().find(|choice| choice.key() == input)
    }
}

/// Rejected user input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("No account loaded. Please load an account first.")]
    NoAccount,

    #[error("No address provided")]
    NoAddress,

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("No message provided")]
    EmptyMessage,

    #[error("Invalid status '{0}'. Use 'true' or 'false'")]
    InvalidStatus(String),

    #[error("Invalid choice")]
    InvalidChoice,
}

/// Parse `true`/`false`, case-insensitive
pub fn parse_status(input: &str) -> Result<bool, InputError> {
    match input.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(InputError::InvalidStatus(other.to_string())),
    }
}

/// Parse an address, falling back to the session account on empty input
pub fn resolve_address(
    input: &str,
    session: Option<&LocalAccount>,
) -> Result<AccountAddress, InputError> {
    let input = input.trim();
    if input.is_empty() {
        return session.map(LocalAccount::address).ok_or(InputError::NoAddress);
    }
    parse_address(input)
}

/// Parse a required address
pub fn parse_address(input: &str) -> Result<AccountAddress, InputError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(InputError::NoAddress);
    }
    input
        .parse()
        .map_err(|_| InputError::InvalidAddress(input.to_string()))
}

pub fn parse_message(input: &str) -> Result<String, InputError> {
    let message = input.trim();
    if message.is_empty() {
        return Err(InputError::EmptyMessage);
    }
    Ok(message.to_string())
}

/// Blocking read-dispatch-print loop
pub struct Shell<C, R, W> {
    contract: ContractClient<C>,
    account: Option<LocalAccount>,
    input: R,
    output: W,
}

impl<C: NodeClient, R: BufRead, W: Write> Shell<C, R, W> {
    pub fn new(contract: ContractClient<C>, input: R, output: W) -> Self {
        Self {
            contract,
            account: None,
            input,
            output,
        }
    }

    pub fn account(&self) -> Option<&LocalAccount> {
        self.account.as_ref()
    }

    pub fn set_account(&mut self, account: LocalAccount) {
        self.account = Some(account);
    }

    /// Run until the user quits or input ends
    ///
    /// # Errors
    ///
    /// Returns an error only if reading or writing the console fails.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Welcome to the TruePass CLI ({})", self.contract.abi().name)?;
        if self.account.is_none() {
            self.load_account(LocalAccount::generate())?;
        }

        loop {
            self.show_menu()?;
            let Some(choice) = self.read_line("\nEnter your choice: ")? else {
                break;
            };

            match MenuChoice::from_key(&choice) {
                Some(MenuChoice::Quit) => {
                    writeln!(self.output, "Goodbye!")?;
                    break;
                }
                Some(choice) => self.dispatch(choice)?,
                None => self.reject(&InputError::InvalidChoice)?,
            }

            if self.read_line("\nPress Enter to continue...")?.is_none() {
                break;
            }
        }
        Ok(())
    }

    /// Run one menu operation
    ///
    /// # Errors
    ///
    /// Returns an error only if reading or writing the console fails.
    pub fn dispatch(&mut self, choice: MenuChoice) -> io::Result<()> {
        match choice {
            MenuChoice::AccountInfo => self.show_account_info(),
            MenuChoice::GetStatus => self.get_status(),
            MenuChoice::GetMessage => self.get_message(),
            MenuChoice::GetNumber => self.get_number(),
            MenuChoice::InitStatus => self.init_status(),
            MenuChoice::SetMessage => self.set_message(),
            MenuChoice::SetStatusTrue => self.set_status_true(),
            MenuChoice::UpdateStatus => self.update_status(),
            MenuChoice::LoadAccount => self.load_account_interactive(),
            MenuChoice::Quit => Ok(()),
        }
    }

    fn show_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n{RULE}")?;
        writeln!(self.output, "TruePass Blockchain CLI")?;
        writeln!(self.output, "{RULE}")?;
        for choice in MenuChoice::ALL {
            writeln!(self.output, "{}. {}", choice.key(), choice.label())?;
        }
        writeln!(self.output, "{RULE}")
    }

    /// Prompt and read one trimmed line; `None` at end of input
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn reject(&mut self, err: &InputError) -> io::Result<()> {
        writeln!(self.output, "✗ {err}")
    }

    fn report<T: Display>(&mut self, what: &str, outcome: CallOutcome<T>) -> io::Result<()> {
        match outcome {
            CallOutcome::Value(value) => writeln!(self.output, "✓ {what}: {value}"),
            CallOutcome::Empty => writeln!(self.output, "✗ Failed to get {what}: no value"),
            CallOutcome::Failed(err) => writeln!(self.output, "✗ Failed to get {what}: {err}"),
        }
    }

    fn report_transaction(&mut self, outcome: CallOutcome<String>) -> io::Result<()> {
        match outcome {
            CallOutcome::Value(hash) => writeln!(self.output, "✓ Success! Transaction: {hash}"),
            CallOutcome::Empty => writeln!(self.output, "✗ Transaction returned no hash"),
            CallOutcome::Failed(err) => writeln!(self.output, "✗ Transaction failed: {err}"),
        }
    }

    fn load_account(&mut self, account: LocalAccount) -> io::Result<()> {
        writeln!(self.output, "✓ Account loaded: {}", account.address())?;
        writeln!(self.output, "  Private key: {}", account.private_key_hex())?;
        self.account = Some(account);
        Ok(())
    }

    /// Ask for an address, defaulting to the session account
    fn prompt_address(&mut self) -> io::Result<Option<AccountAddress>> {
        let input = self
            .read_line("Enter address (or press Enter for current account): ")?
            .unwrap_or_default();
        match resolve_address(&input, self.account.as_ref()) {
            Ok(address) => Ok(Some(address)),
            Err(err) => {
                self.reject(&err)?;
                Ok(None)
            }
        }
    }

    /// Sign one entry call with the session account and report it
    fn transact(
        &mut self,
        progress: &str,
        call: impl FnOnce(&ContractClient<C>, &LocalAccount) -> CallOutcome<String>,
    ) -> io::Result<()> {
        let Some(account) = &self.account else {
            return self.reject(&InputError::NoAccount);
        };
        writeln!(self.output, "{progress}")?;
        let outcome = call(&self.contract, account);
        self.report_transaction(outcome)
    }

    fn show_account_info(&mut self) -> io::Result<()> {
        let (address, public_key, private_key) = match &self.account {
            Some(account) => (
                account.address(),
                account.public_key_hex(),
                account.private_key_hex(),
            ),
            None => return self.reject(&InputError::NoAccount),
        };

        writeln!(self.output, "\nAccount Information:")?;
        writeln!(self.output, "Address: {address}")?;
        writeln!(self.output, "Public Key: {public_key}")?;
        writeln!(self.output, "Private Key: {private_key}")?;

        match self.contract.account_info(&address) {
            CallOutcome::Value(info) => {
                writeln!(self.output, "Sequence Number: {}", info.sequence_number)?;
                writeln!(self.output, "Authentication Key: {}", info.authentication_key)
            }
            CallOutcome::Empty => Ok(()),
            CallOutcome::Failed(err) => {
                writeln!(self.output, "✗ On-chain info unavailable: {err}")
            }
        }
    }

    fn get_status(&mut self) -> io::Result<()> {
        let Some(address) = self.prompt_address()? else {
            return Ok(());
        };
        writeln!(self.output, "Getting status for {address}...")?;
        let outcome = self.contract.get_status(&address);
        self.report("Status", outcome)
    }

    fn get_message(&mut self) -> io::Result<()> {
        let Some(address) = self.prompt_address()? else {
            return Ok(());
        };
        writeln!(self.output, "Getting message for {address}...")?;
        let outcome = self.contract.get_message(&address);
        self.report("Message", outcome)
    }

    fn get_number(&mut self) -> io::Result<()> {
        writeln!(self.output, "Getting number...")?;
        let outcome = self.contract.get_number();
        self.report("Number", outcome)
    }

    fn init_status(&mut self) -> io::Result<()> {
        self.transact("Initializing status...", |contract, account| {
            contract.init_status(account)
        })
    }

    fn set_message(&mut self) -> io::Result<()> {
        if self.account.is_none() {
            return self.reject(&InputError::NoAccount);
        }
        let input = self.read_line("Enter message: ")?.unwrap_or_default();
        let message = match parse_message(&input) {
            Ok(message) => message,
            Err(err) => return self.reject(&err),
        };

        self.transact(&format!("Setting message to '{message}'..."), |contract, account| {
            contract.set_message(account, &message)
        })
    }

    fn set_status_true(&mut self) -> io::Result<()> {
        self.transact("Setting status to true...", |contract, account| {
            contract.set_status_true(account)
        })
    }

    fn update_status(&mut self) -> io::Result<()> {
        if self.account.is_none() {
            return self.reject(&InputError::NoAccount);
        }
        let input = self.read_line("Enter target address: ")?.unwrap_or_default();
        let target = match parse_address(&input) {
            Ok(target) => target,
            Err(err) => return self.reject(&err),
        };

        let input = self.read_line("Enter status (true/false): ")?.unwrap_or_default();
        let status = match parse_status(&input) {
            Ok(status) => status,
            Err(err) => return self.reject(&err),
        };

        self.transact(
            &format!("Updating status for {target} to {status}..."),
            |contract, account| contract.update_status(account, &target, status),
        )
    }

    fn load_account_interactive(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n1. Generate new account")?;
        writeln!(self.output, "2. Load from private key")?;
        let choice = self.read_line("Choose option (1/2): ")?.unwrap_or_default();

        match choice.as_str() {
            "1" => self.load_account(LocalAccount::generate()),
            "2" => {
                let key = self.read_line("Enter private key: ")?.unwrap_or_default();
                match LocalAccount::from_private_key(&key) {
                    Ok(account) => self.load_account(account),
                    Err(err) => writeln!(self.output, "✗ Error loading account: {err}"),
                }
            }
            _ => self.reject(&InputError::InvalidChoice),
        }
    }
}
