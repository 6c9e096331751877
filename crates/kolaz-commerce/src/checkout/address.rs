//! Address types.

use crate::ids::AddressId;
use serde::{Deserialize, Serialize};

/// A shipping address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Address {
    pub id: AddressId,
    /// Recipient name.
    pub full_name: String,
    pub phone: String,
    /// Street address.
    pub address: String,
    pub city: String,
    /// Postal code.
    pub zip: String,
    /// Preferred address for the user.
    pub is_default: bool,
}

impl Address {
    /// Create a new, non-default address.
    pub fn new(
        full_name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        zip: impl Into<String>,
    ) -> Self {
        Self {
            id: AddressId::generate(),
            full_name: full_name.into(),
            phone: phone.into(),
            address: address.into(),
            city: city.into(),
            zip: zip.into(),
            is_default: false,
        }
    }

    /// Format as single line.
    pub fn one_line(&self) -> String {
        [self.address.as_str(), self.city.as_str(), self.zip.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_line() {
        let addr = Address::new("Rahim Uddin", "01712345678", "12 Road 5", "Dhaka", "1209");
        assert_eq!(addr.one_line(), "12 Road 5, Dhaka, 1209");
        assert!(!addr.is_default);
    }

    #[test]
    fn test_one_line_skips_empty() {
        let addr = Address::new("A", "", "12 Road 5", "Dhaka", "");
        assert_eq!(addr.one_line(), "12 Road 5, Dhaka");
    }
}
