//! Common types for the shared crate
//!
//! Back-office modules and the permission strings that guard them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Back-office module, one per business list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Module {
    Cambios,
    Devoluciones,
    DevolucionesMl,
    Vendedoras,
    Campanas,
    Ranking,
    Reportes,
}

impl Module {
    pub const ALL: [Module; 7] = [
        Module::Cambios,
        Module::Devoluciones,
        Module::DevolucionesMl,
        Module::Vendedoras,
        Module::Campanas,
        Module::Ranking,
        Module::Reportes,
    ];

    /// Permission prefix (`cambios`, `devoluciones-ml`, ...)
    pub fn slug(&self) -> &'static str {
        match self {
            Module::Cambios => "cambios",
            Module::Devoluciones => "devoluciones",
            Module::DevolucionesMl => "devoluciones-ml",
            Module::Vendedoras => "vendedoras",
            Module::Campanas => "campanas",
            Module::Ranking => "ranking",
            Module::Reportes => "reportes",
        }
    }

    /// `"{module}:view"`
    pub fn view_action(&self) -> String {
        format!("{}:view", self.slug())
    }

    /// `"{module}:edit"`
    pub fn edit_action(&self) -> String {
        format!("{}:edit", self.slug())
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Permission type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission(pub String);

impl Permission {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Check if this permission grants access to the given resource action
    pub fn grants(&self, action: &str) -> bool {
        if self.0 == "*" {
            return true;
        }
        if let Some(prefix) = self.0.strip_suffix(":*") {
            return action
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with(':'));
        }
        self.0 == action
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
