/// Trait for aggregate roots mirrored from the LabPilot backend
///
/// Instance methods expose the data every list screen needs; the static
/// methods describe the aggregate class (resource path and UI names).
pub trait AggregateRoot {
    // ============================================================================
    // Instance data
    // ============================================================================

    /// Backend-assigned identifier; never reassigned once set
    fn id(&self) -> &str;

    /// Human readable name used in confirmation and feedback messages
    fn display_name(&self) -> &str;

    /// Whether the record is usable (inactive records are kept, not deleted)
    fn is_active(&self) -> bool;

    // ============================================================================
    // Class metadata
    // ============================================================================

    /// Aggregate index in the system (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// REST collection name (e.g. "referrers")
    fn collection_name() -> &'static str;

    /// Singular UI name (e.g. "Referrer")
    fn element_name() -> &'static str;

    /// Plural UI name (e.g. "Referrers")
    fn list_name() -> &'static str;

    /// Full aggregate name (e.g. "a001_referrers")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
