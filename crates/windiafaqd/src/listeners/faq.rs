//! `faq`: lookup and maintenance of FAQ entries.
//!
//! The first argument selects the operation; the rest are its operands.
//! Empty text, such as the listing of an empty store, is replied as `{}`.
//!
//! | Operation       | Arguments                       |
//! |-----------------|---------------------------------|
//! | *(none)* / `""` | list visible commands           |
//! | `GetCommand`    | name                            |
//! | `AddCommand`    | name, description, hidden       |
//! | `UpdateCommand` | name, description               |
//! | `DeleteCommand` | name                            |
//! | `AddAlias`      | alias, command                  |

use std::sync::{Mutex, MutexGuard};

use tracing::info;

use crate::dispatch::{Args, Command, CommandListener, HandlerError, ReturnData};
use crate::store::{FaqAlias, FaqCommand, FaqStore};

use super::LISTENER_TARGET;

/// Serves the `faq` command from a [`FaqStore`].
pub struct FaqListener {
    store: Mutex<Box<dyn FaqStore>>,
}

impl FaqListener {
    pub fn new(store: impl FaqStore + 'static) -> Self {
        Self::from_boxed(Box::new(store))
    }

    pub fn from_boxed(store: Box<dyn FaqStore>) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    fn store(&self) -> Result<MutexGuard<'_, Box<dyn FaqStore>>, HandlerError> {
        self.store
            .lock()
            .map_err(|_| HandlerError::internal("FAQ store lock poisoned"))
    }

    fn list(&self) -> Result<String, HandlerError> {
        let names: Vec<String> = self
            .store()?
            .list_all()
            .into_iter()
            .filter(|command| !command.hidden)
            .map(|command| command.command)
            .collect();
        Ok(names.join(" "))
    }

    fn get(&self, args: &Args) -> Result<String, HandlerError> {
        let key = args.string_at(1)?;
        self.store()?
            .get(key)
            .map(|command| command.description)
            .ok_or_else(|| HandlerError::invalid_input(format!("{key} is not a command or alias")))
    }

    fn add(&self, args: &Args) -> Result<String, HandlerError> {
        let name = args.string_at(1)?;
        let command = FaqCommand::new(name, args.string_at(2)?, args.bool_at(3)?);
        self.store()?.put(command)?;
        info!(target: LISTENER_TARGET, command = name, "FAQ command added");
        Ok(format!("{name} has been added."))
    }

    fn update(&self, args: &Args) -> Result<String, HandlerError> {
        let name = args.string_at(1)?;
        let description = args.string_at(2)?;
        if self.store()?.update(name, description)? {
            info!(target: LISTENER_TARGET, command = name, "FAQ command updated");
            Ok(format!("{name} has been updated."))
        } else {
            Ok(format!("{name} has not been updated."))
        }
    }

    fn delete(&self, args: &Args) -> Result<String, HandlerError> {
        let name = args.string_at(1)?;
        if self.store()?.delete(name)? {
            info!(target: LISTENER_TARGET, command = name, "FAQ command deleted");
            Ok(format!("{name} has been deleted."))
        } else {
            Ok(format!("{name} has not been deleted."))
        }
    }

    fn add_alias(&self, args: &Args) -> Result<String, HandlerError> {
        let alias = args.string_at(1)?;
        let target = args.string_at(2)?;
        self.store()?.put_alias(FaqAlias::new(alias, target))?;
        info!(target: LISTENER_TARGET, alias, command = target, "FAQ alias added");
        Ok(format!("{alias} has been added."))
    }
}

impl CommandListener for FaqListener {
    fn run(&self, command: &Command) -> Result<ReturnData, HandlerError> {
        let args = command.args();
        let operation = if args.is_empty() { "" } else { args.string_at(0)? };

        let content = match operation {
            "" => self.list()?,
            "GetCommand" => self.get(args)?,
            "AddCommand" => self.add(args)?,
            "UpdateCommand" => self.update(args)?,
            "DeleteCommand" => self.delete(args)?,
            "AddAlias" => self.add_alias(args)?,
            other => {
                return Err(HandlerError::invalid_input(format!(
                    "unknown FAQ operation: {other}"
                )));
            }
        };
        if content.is_empty() {
            return Ok(ReturnData::default());
        }
        Ok(ReturnData::content(content))
    }
}

impl std::fmt::Debug for FaqListener {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("FaqListener").finish_non_exhaustive()
    }
}
