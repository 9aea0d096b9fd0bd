//! Sheet addressing and the route back to the owning space

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Where a sheet lives: its space and its date
///
/// Both values are opaque strings supplied by the router.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetAddress {
    /// Owning space
    pub space_id: String,
    /// Sheet date as routed
    pub date: String,
}

impl SheetAddress {
    /// Create address
    #[inline]
    #[must_use]
    pub fn new(space_id: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            space_id: space_id.into(),
            date: date.into(),
        }
    }

    /// Route of the owning space
    #[must_use]
    pub fn space_route(&self) -> String {
        format!("/space/{}", self.space_id)
    }

    /// Route of this sheet
    #[must_use]
    pub fn sheet_route(&self) -> String {
        format!("/space/{}/sheet/{}", self.space_id, self.date)
    }
}

/// External router
pub trait Navigator: Debug {
    /// Leave the sheet screen for its space
    fn return_to_space(&self, address: &SheetAddress);
}

/// Navigator that only records the request in the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn return_to_space(&self, address: &SheetAddress) {
        tracing::info!(route = %address.space_route(), "return to space requested");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes() {
        let address = SheetAddress::new("react-101", "2024-01-15");
        assert_eq!(address.space_route(), "/space/react-101");
        assert_eq!(address.sheet_route(), "/space/react-101/sheet/2024-01-15");
    }
}
