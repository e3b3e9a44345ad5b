//! Vehicle identifiers.

use std::fmt;

/// Index of a vehicle in the fleet.  Also its activation order.
///
/// The inner integer is `pub`; prefer `.index()` when indexing the fleet's
/// `Vec`s.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleId(pub u32);

impl VehicleId {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Conventional display name: `AGV-01`, `AGV-02`, …
    pub fn default_name(self) -> String {
        format!("AGV-{:02}", self.0 + 1)
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VehicleId({})", self.0)
    }
}
