//! # Session & Authorization
//!
//! The logged-in user context and the single role-permission check.
//!
//! ## Design
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Authorization Flow                              │
//! │                                                                     │
//! │  login(email, secret) ──► User { role }                             │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Session::new(user)   ← explicit value, passed to every operation   │
//! │       │                 that needs role information (no process-    │
//! │       │                 wide current-user singleton)                │
//! │       ▼                                                             │
//! │  session.allows(Permission::DeleteInvoices)                         │
//! │       │                                                             │
//! │       └── the ONLY place roles are interpreted is Role::allows      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Role → Permission Mapping
//! - Admin:   everything
//! - Manager: catalogs + invoices + reports, no user management
//! - Cashier: clients + invoices only

use serde::{Deserialize, Serialize};

use crate::types::{Role, User};

// =============================================================================
// Permission
// =============================================================================

/// Operations gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Create/update/delete products and suppliers.
    ManageCatalog,
    /// Create/update/delete clients.
    ManageClients,
    /// Create/update/delete user accounts.
    ManageUsers,
    /// Create invoices.
    CreateInvoices,
    /// Delete invoices (cascades to line items).
    DeleteInvoices,
    /// View revenue reports and run aggregations.
    ViewReports,
}

impl Role {
    /// The single authorization check consulted everywhere.
    ///
    /// Call sites never compare role names; they ask this function.
    pub const fn allows(&self, permission: Permission) -> bool {
        match self {
            Role::Admin => true,
            Role::Manager => !matches!(permission, Permission::ManageUsers | Permission::DeleteInvoices),
            Role::Cashier => matches!(
                permission,
                Permission::ManageClients | Permission::CreateInvoices
            ),
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// The authenticated user's context for one logical operation.
///
/// Passed explicitly to operations that need role information, rather
/// than read from a global.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    user: User,
}

impl Session {
    /// Creates a session for a logged-in user.
    pub fn new(user: User) -> Self {
        Session { user }
    }

    /// The logged-in user.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// The logged-in user's role.
    #[inline]
    pub fn role(&self) -> Role {
        self.user.role
    }

    /// Whether this session's role permits the operation.
    #[inline]
    pub fn allows(&self, permission: Permission) -> bool {
        self.user.role.allows(permission)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with(role: Role) -> User {
        User {
            id: "u1".to_string(),
            name: "Test User".to_string(),
            email: "test@pharma.local".to_string(),
            password: "secret".to_string(),
            role,
        }
    }

    #[test]
    fn test_admin_allows_everything() {
        let session = Session::new(user_with(Role::Admin));
        assert!(session.allows(Permission::ManageCatalog));
        assert!(session.allows(Permission::ManageClients));
        assert!(session.allows(Permission::ManageUsers));
        assert!(session.allows(Permission::CreateInvoices));
        assert!(session.allows(Permission::DeleteInvoices));
        assert!(session.allows(Permission::ViewReports));
    }

    #[test]
    fn test_manager_has_no_user_management() {
        let session = Session::new(user_with(Role::Manager));
        assert!(session.allows(Permission::ManageCatalog));
        assert!(session.allows(Permission::ManageClients));
        assert!(session.allows(Permission::CreateInvoices));
        assert!(session.allows(Permission::ViewReports));
        assert!(!session.allows(Permission::ManageUsers));
        assert!(!session.allows(Permission::DeleteInvoices));
    }

    #[test]
    fn test_cashier_is_clients_and_invoices_only() {
        let session = Session::new(user_with(Role::Cashier));
        assert!(session.allows(Permission::ManageClients));
        assert!(session.allows(Permission::CreateInvoices));
        assert!(!session.allows(Permission::ManageCatalog));
        assert!(!session.allows(Permission::ManageUsers));
        assert!(!session.allows(Permission::DeleteInvoices));
        assert!(!session.allows(Permission::ViewReports));
    }
}
