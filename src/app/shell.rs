use crate::config::toml_config::LedgerConfig;
use crate::core::{PricingPolicy, Registry, Resident};
use crate::utils::error::{BillingError, Result};
use std::collections::VecDeque;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddResident,
    AddService,
    TotalCost,
    ListResidents,
    Quit,
}

impl MenuChoice {
    /// Only a single-character token is accepted.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "a" => Some(MenuChoice::AddResident),
            "s" => Some(MenuChoice::AddService),
            "c" => Some(MenuChoice::TotalCost),
            "l" => Some(MenuChoice::ListResidents),
            "q" => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

/// Interactive console front-end over a [`Registry`].
///
/// Input is consumed as whitespace-separated tokens, so several answers may
/// be typed on one line. End of input behaves like `q`.
pub struct Shell<R: BufRead, W: Write, E: Write> {
    input: R,
    output: W,
    errors: E,
    pending: VecDeque<String>,
    config: LedgerConfig,
    registry: Registry,
}

impl<R: BufRead, W: Write, E: Write> Shell<R, W, E> {
    pub fn new(config: LedgerConfig, input: R, output: W, errors: E) -> Self {
        Self {
            input,
            output,
            errors,
            pending: VecDeque::new(),
            config,
            registry: Registry::new(),
        }
    }

    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Runs the menu loop until `q` or end of input and hands back the registry.
    pub fn run(mut self) -> Result<Registry> {
        tracing::info!("Shell started");

        loop {
            let Some(choice) = self.read_menu_choice()? else {
                writeln!(self.output)?;
                writeln!(self.output, "Exiting.")?;
                break;
            };

            match choice {
                MenuChoice::AddResident => self.add_resident()?,
                MenuChoice::AddService => self.add_service()?,
                MenuChoice::TotalCost => self.print_total()?,
                MenuChoice::ListResidents => self.list_residents()?,
                MenuChoice::Quit => {
                    writeln!(self.output, "Exiting.")?;
                    break;
                }
            }
        }

        tracing::info!("Shell finished with {} resident(s)", self.registry.len());
        Ok(self.registry)
    }

    fn read_menu_choice(&mut self) -> Result<Option<MenuChoice>> {
        loop {
            let Some(token) = self.prompt(
                "Choose an action: (a) add resident, (s) add service, (c) total cost, \
                 (l) list residents, (q) quit: ",
            )?
            else {
                return Ok(None);
            };

            match MenuChoice::parse(&token) {
                Some(choice) => return Ok(Some(choice)),
                None => writeln!(
                    self.errors,
                    "Error: invalid input. Use 'a', 's', 'c', 'l' or 'q'."
                )?,
            }
        }
    }

    fn add_resident(&mut self) -> Result<()> {
        let Some(name) = self.prompt("Enter resident name: ")? else {
            return Ok(());
        };

        let policy = loop {
            let Some(token) =
                self.prompt("Enter resident type (w - with benefits, n - without benefits): ")?
            else {
                return Ok(());
            };
            match token.as_str() {
                "w" => break PricingPolicy::Discounted,
                "n" => break PricingPolicy::Standard,
                _ => writeln!(self.errors, "Error: invalid input. Use 'w' or 'n'.")?,
            }
        };

        let result = self.insert_resident(name, policy);
        self.report(result)
    }

    fn insert_resident(&mut self, name: String, policy: PricingPolicy) -> Result<()> {
        if self.config.registry.unique_names && self.registry.contains(&name) {
            return Err(BillingError::Validation {
                field: "name".to_string(),
                value: name,
                reason: "a resident with this name already exists".to_string(),
            });
        }

        let resident = Resident::new(name, policy)?;
        let name = resident.name().to_string();
        self.registry.add_resident(resident)?;
        writeln!(self.output, "Resident \"{}\" added ({}).", name, policy)?;
        Ok(())
    }

    fn add_service(&mut self) -> Result<()> {
        let Some(name) = self.prompt("Enter the name of the resident to bill: ")? else {
            return Ok(());
        };

        writeln!(self.output, "Available services:")?;
        for (i, service) in self.config.services.catalog.iter().enumerate() {
            writeln!(self.output, "{}. Service {}", i + 1, service)?;
        }
        let hint = self.config.services.catalog.join(", ");
        let Some(service_type) = self.prompt(&format!("Enter service type ({}): ", hint))? else {
            return Ok(());
        };
        let service_type = service_type.to_lowercase();

        let Some(amount) = self.read_amount()? else {
            return Ok(());
        };

        let result = self.registry.add_service(&name, &service_type, amount);
        if result.is_ok() {
            writeln!(
                self.output,
                "Added {} of service {} to \"{}\".",
                amount, service_type, name
            )?;
        }
        self.report(result)
    }

    fn read_amount(&mut self) -> Result<Option<f64>> {
        loop {
            let Some(token) = self.prompt("Enter service quantity: ")? else {
                return Ok(None);
            };

            match token.parse::<f64>() {
                Ok(amount) if amount.is_finite() && amount >= 0.0 => return Ok(Some(amount)),
                _ => {
                    writeln!(
                        self.errors,
                        "Error: enter a valid service quantity (a non-negative number)."
                    )?;
                    self.pending.clear();
                }
            }
        }
    }

    fn print_total(&mut self) -> Result<()> {
        if self.config.json_reports() {
            let summary = self.registry.summary();
            writeln!(self.output, "{}", serde_json::to_string_pretty(&summary)?)?;
            return Ok(());
        }

        let total = self.registry.calculate_total_costs();
        writeln!(
            self.output,
            "Total cost of all services: {}{:.2}",
            self.config.shell.currency, total
        )?;
        Ok(())
    }

    fn list_residents(&mut self) -> Result<()> {
        if self.registry.is_empty() {
            writeln!(self.output, "No residents registered.")?;
            return Ok(());
        }

        for resident in self.registry.iter() {
            writeln!(
                self.output,
                "{} ({}): {}{:.2}",
                resident.name(),
                resident.pricing_policy(),
                self.config.shell.currency,
                resident.total_cost()
            )?;
        }
        Ok(())
    }

    /// Writes recoverable errors for the user; anything else is propagated.
    fn report(&mut self, result: Result<()>) -> Result<()> {
        match result {
            Ok(()) => Ok(()),
            Err(e) if e.is_recoverable() => {
                tracing::warn!("{} (category: {:?})", e, e.category());
                writeln!(self.errors, "Error: {}", e.user_friendly_message())?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        self.next_token()
    }

    fn next_token(&mut self) -> Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }
}
