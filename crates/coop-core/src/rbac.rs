//! # Roles & Permissions
//!
//! The access-control model for Coop POS.
//!
//! ## Design
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Permission-Set Model                                 │
//! │                                                                         │
//! │  Role (closed enum)  ──────►  &'static [Permission]                    │
//! │                                                                         │
//! │  SuperAdmin   ──► every permission                                     │
//! │  Treasurer    ──► manage-stock, create-sale,                           │
//! │                   view-all-reports, manage-members                     │
//! │  Cashier      ──► create-sale, view-own-purchases                      │
//! │  Member       ──► view-own-purchases                                   │
//! │  Viewer       ──► view-all-reports                                     │
//! │                                                                         │
//! │  The API boundary asks role.allows(permission) - role NAMES are        │
//! │  never compared as strings anywhere in the system.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Roles are code, not database rows: the set is fixed at compile time
//! and each user record stores exactly one role.

use serde::{Deserialize, Serialize};

// =============================================================================
// Permission
// =============================================================================

/// A single capability checked at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Permission {
    /// Create, update, and delete products; adjust stock.
    ManageStock,
    /// Process a point-of-sale checkout.
    CreateSale,
    /// Read dashboard statistics and cross-member reports.
    ViewAllReports,
    /// Create, update, and delete member records.
    ManageMembers,
    /// Reverse a completed sale.
    IssueRefunds,
    /// Read one's own purchase history.
    ViewOwnPurchases,
    /// Administer user accounts and see the role catalog.
    ManageUsers,
}

impl Permission {
    /// Stable kebab-case name, used in API payloads and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ManageStock => "manage-stock",
            Permission::CreateSale => "create-sale",
            Permission::ViewAllReports => "view-all-reports",
            Permission::ManageMembers => "manage-members",
            Permission::IssueRefunds => "issue-refunds",
            Permission::ViewOwnPurchases => "view-own-purchases",
            Permission::ManageUsers => "manage-users",
        }
    }
}

// =============================================================================
// Role
// =============================================================================

/// A staff role carrying a fixed permission set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Unrestricted access, including user administration.
    SuperAdmin,
    /// Day-to-day shop administration: stock, sales, members, reports.
    Treasurer,
    /// Operates the till.
    Cashier,
    /// A cooperative member with a login.
    Member,
    /// Read-only reporting access.
    Viewer,
}

impl Role {
    /// All roles, in display order.
    pub const ALL: [Role; 5] = [
        Role::SuperAdmin,
        Role::Treasurer,
        Role::Cashier,
        Role::Member,
        Role::Viewer,
    ];

    /// The fixed permission set granted by this role.
    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            Role::SuperAdmin => &[
                Permission::ManageStock,
                Permission::CreateSale,
                Permission::ViewAllReports,
                Permission::ManageMembers,
                Permission::IssueRefunds,
                Permission::ViewOwnPurchases,
                Permission::ManageUsers,
            ],
            Role::Treasurer => &[
                Permission::ManageStock,
                Permission::CreateSale,
                Permission::ViewAllReports,
                Permission::ManageMembers,
            ],
            Role::Cashier => &[Permission::CreateSale, Permission::ViewOwnPurchases],
            Role::Member => &[Permission::ViewOwnPurchases],
            Role::Viewer => &[Permission::ViewAllReports],
        }
    }

    /// Checks whether this role grants the given permission.
    #[inline]
    pub fn allows(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Admin",
            Role::Treasurer => "Treasurer/Admin",
            Role::Cashier => "Cashier",
            Role::Member => "Member",
            Role::Viewer => "Viewer",
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_super_admin_has_every_permission() {
        for p in [
            Permission::ManageStock,
            Permission::CreateSale,
            Permission::ViewAllReports,
            Permission::ManageMembers,
            Permission::IssueRefunds,
            Permission::ViewOwnPurchases,
            Permission::ManageUsers,
        ] {
            assert!(Role::SuperAdmin.allows(p), "super admin missing {:?}", p);
        }
    }

    #[test]
    fn test_cashier_can_sell_but_not_manage() {
        assert!(Role::Cashier.allows(Permission::CreateSale));
        assert!(!Role::Cashier.allows(Permission::ManageStock));
        assert!(!Role::Cashier.allows(Permission::ManageMembers));
        assert!(!Role::Cashier.allows(Permission::ManageUsers));
    }

    #[test]
    fn test_only_super_admin_manages_users() {
        for role in Role::ALL {
            let expected = role == Role::SuperAdmin;
            assert_eq!(role.allows(Permission::ManageUsers), expected);
        }
    }

    #[test]
    fn test_viewer_is_read_only() {
        assert!(Role::Viewer.allows(Permission::ViewAllReports));
        assert!(!Role::Viewer.allows(Permission::CreateSale));
        assert!(!Role::Viewer.allows(Permission::ManageStock));
    }

    #[test]
    fn test_role_serde_snake_case() {
        let r: Role = serde_json::from_str("\"super_admin\"").unwrap();
        assert_eq!(r, Role::SuperAdmin);
        assert_eq!(serde_json::to_string(&Role::Treasurer).unwrap(), "\"treasurer\"");
    }

    #[test]
    fn test_permission_serde_kebab_case() {
        let p: Permission = serde_json::from_str("\"manage-stock\"").unwrap();
        assert_eq!(p, Permission::ManageStock);
        assert_eq!(p.as_str(), "manage-stock");
    }
}
