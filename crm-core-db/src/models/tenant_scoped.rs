use uuid::Uuid;

use super::identifiable::Identifiable;

/// Trait for entities that belong to exactly one tenant (Company).
///
/// Tenant scoping is a correctness invariant, not a performance concern:
/// every query over a tenant-scoped entity must filter on this id.
pub trait TenantScoped: Identifiable {
    /// Returns the owning tenant's id
    fn get_company_id(&self) -> Uuid;
}
