//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: two instances with the same attribute values
/// are the same value. Form snapshots such as an address or a doctor reference are
/// value objects; the edited entity (which carries an `EntityId`) is not.
///
/// The trait requires:
/// - **Clone**: values are copied freely between the form tree and DTOs
/// - **PartialEq**: values are compared by their attributes
/// - **Debug**: values show up in logs and test failures
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
