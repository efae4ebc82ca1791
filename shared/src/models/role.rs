//! Role Model

use crate::types::{Module, Permission};
use serde::{Deserialize, Serialize};

/// Role of the signed-in user
///
/// Passed explicitly to every list controller, so permission checks are an
/// input of the component rather than ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    /// Permission strings (e.g. `["*"]`, `["cambios:*", "reportes:view"]`)
    pub permissions: Vec<Permission>,
}

impl Role {
    pub fn new(name: impl Into<String>, permissions: &[&str]) -> Self {
        Self {
            name: name.into(),
            permissions: permissions.iter().map(|p| Permission::new(*p)).collect(),
        }
    }

    /// Full access
    pub fn admin() -> Self {
        Self::new("admin", &["*"])
    }

    /// Read access to every module
    pub fn viewer() -> Self {
        let actions: Vec<String> = Module::ALL.iter().map(|m| m.view_action()).collect();
        Self {
            name: "viewer".into(),
            permissions: actions.into_iter().map(Permission).collect(),
        }
    }

    fn grants(&self, action: &str) -> bool {
        self.permissions.iter().any(|p| p.grants(action))
    }

    /// Edit rights imply view rights
    pub fn can_view(&self, module: Module) -> bool {
        self.grants(&module.view_action()) || self.can_edit(module)
    }

    pub fn can_edit(&self, module: Module) -> bool {
        self.grants(&module.edit_action())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_can_do_everything() {
        let role = Role::admin();
        for module in Module::ALL {
            assert!(role.can_view(module));
            assert!(role.can_edit(module));
        }
    }

    #[test]
    fn test_viewer_is_read_only() {
        let role = Role::viewer();
        assert!(role.can_view(Module::Cambios));
        assert!(!role.can_edit(Module::Cambios));
    }

    #[test]
    fn test_edit_implies_view() {
        let role = Role::new("deposito", &["cambios:edit", "devoluciones:*"]);
        assert!(role.can_view(Module::Cambios));
        assert!(role.can_edit(Module::Devoluciones));
        assert!(!role.can_view(Module::Vendedoras));
    }
}
