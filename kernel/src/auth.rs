// Admin Gate
//
// Literal credential check that guards catalog mutations at the
// session layer. The catalog store itself performs no authorization.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            username: "admin".into(),
            password: "pass".into(),
        }
    }
}

impl AdminCredentials {
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}
