use std::collections::HashMap;
use std::sync::Arc;

/// Static, plan-independent facts about one aisle: its display name, impulse
/// rate, and how many distinct products it stocks. Which grid cells currently
/// carry this aisle is derived from a `Plan` on demand
/// ([`Plan::cells_by_aisle`](super::Plan::cells_by_aisle)), not stored here,
/// since a swap can move an aisle's cells without changing anything about the
/// aisle itself.
#[derive(Debug, Clone, PartialEq)]
pub struct AisleInfo {
    pub name: String,
    pub impulse_index: f64,
    pub product_count: u32,
}

/// The full set of aisles a layout can draw from, shared by reference across
/// every `Plan` and candidate derived from it.
pub type AisleCatalog = Arc<HashMap<i32, AisleInfo>>;
