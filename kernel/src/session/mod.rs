// Counter Session
//
// Caller layer in front of the catalog store: validates user input,
// gates admin actions behind a login and turns store results into
// outcomes suitable for display.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::AdminCredentials;
use crate::catalog::{CatalogEntry, CatalogError, CatalogStore, FoodId};
use crate::orders::OrderReceipt;
use crate::payment::{CardDetails, PaymentError};

/// One user action, as scripted in a session file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Login {
        username: String,
        password: String,
    },
    Logout,
    Insert {
        id: FoodId,
        name: String,
        price: f64,
        stock: u32,
        category: String,
    },
    Update {
        id: FoodId,
        name: String,
        price: f64,
        stock: u32,
        category: String,
    },
    Delete {
        id: FoodId,
    },
    Order {
        id: FoodId,
        quantity: u32,
        #[serde(default)]
        card: Option<CardDetails>,
    },
    Find {
        id: FoodId,
    },
    List,
    Note {
        text: String,
    },
}

impl Command {
    /// Whether the command mutates the catalog on behalf of an admin.
    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Command::Insert { .. }
                | Command::Update { .. }
                | Command::Delete { .. }
                | Command::Note { .. }
        )
    }
}

/// Successful result of a command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Outcome {
    LoggedIn,
    LoggedOut,
    Inserted { id: FoodId, created: bool },
    Updated { id: FoodId },
    Deleted { id: FoodId },
    Ordered(OrderReceipt),
    Found(Option<CatalogEntry>),
    Listed(Vec<CatalogEntry>),
    Noted,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum SessionError {
    #[error("admin login required")]
    Unauthorized,

    #[error("invalid admin credentials")]
    InvalidCredentials,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("payment rejected: {0}")]
    Payment(#[from] PaymentError),
}

/// A customer/admin session against one store.
#[derive(Debug)]
pub struct Session {
    store: CatalogStore,
    credentials: AdminCredentials,
    authenticated: bool,
}

impl Session {
    pub fn new(store: CatalogStore, credentials: AdminCredentials) -> Self {
        Self {
            store,
            credentials,
            authenticated: false,
        }
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn into_store(self) -> CatalogStore {
        self.store
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Execute a single command.
    pub fn execute(&mut self, command: Command) -> Result<Outcome, SessionError> {
        if command.requires_admin() && !self.authenticated {
            warn!(?command, "admin command without login");
            return Err(SessionError::Unauthorized);
        }

        match command {
            Command::Login { username, password } => {
                if !self.credentials.verify(&username, &password) {
                    self.authenticated = false;
                    warn!(%username, "admin login failed");
                    return Err(SessionError::InvalidCredentials);
                }
                self.authenticated = true;
                info!(%username, "admin logged in");
                Ok(Outcome::LoggedIn)
            }
            Command::Logout => {
                self.authenticated = false;
                Ok(Outcome::LoggedOut)
            }
            Command::Insert {
                id,
                name,
                price,
                stock,
                category,
            } => {
                validate_fields(&name, price, &category)?;
                let created = self.store.insert(id, &name, price, stock, &category);
                Ok(Outcome::Inserted { id, created })
            }
            Command::Update {
                id,
                name,
                price,
                stock,
                category,
            } => {
                validate_fields(&name, price, &category)?;
                self.store.update(id, &name, price, stock, &category)?;
                Ok(Outcome::Updated { id })
            }
            Command::Delete { id } => {
                self.store.delete(id)?;
                Ok(Outcome::Deleted { id })
            }
            Command::Order { id, quantity, card } => {
                if quantity == 0 {
                    return Err(SessionError::InvalidInput(
                        "quantity must be positive".into(),
                    ));
                }
                if let Some(card) = &card {
                    card.validate()?;
                }
                let receipt = self.store.fulfill_order(id, quantity)?;
                Ok(Outcome::Ordered(receipt))
            }
            Command::Find { id } => Ok(Outcome::Found(self.store.find(id).cloned())),
            Command::List => Ok(Outcome::Listed(
                self.store.list_all().into_iter().cloned().collect(),
            )),
            Command::Note { text } => {
                self.store.append_log(text);
                Ok(Outcome::Noted)
            }
        }
    }
}

/// Field checks for admin-entered catalog values.
pub fn validate_fields(name: &str, price: f64, category: &str) -> Result<(), SessionError> {
    if name.trim().is_empty() || category.trim().is_empty() {
        return Err(SessionError::InvalidInput(
            "name and category cannot be empty".into(),
        ));
    }
    if !price.is_finite() || price < 0.0 {
        return Err(SessionError::InvalidInput(format!(
            "price must be a non-negative number, got {price}"
        )));
    }
    Ok(())
}
