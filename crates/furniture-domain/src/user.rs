//! User domain types.

wire_enum! {
    /// Account role. Stored as its wire name in `users.role`.
    #[derive(Default)]
    pub enum UserRole("user role") {
        Admin => "admin",
        Editor => "editor",
        #[default]
        Customer => "customer",
    }
}

impl UserRole {
    /// Staff roles may be assigned to orders and author posts.
    pub fn is_staff(self) -> bool {
        matches!(self, Self::Admin | Self::Editor)
    }
}

/// A phone number is exactly ten ASCII digits.
pub fn is_valid_phone_number(phone: &str) -> bool {
    phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit())
}
