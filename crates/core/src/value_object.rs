//! Value object trait: equality by value, not identity.
//!
//! Catalog metrics and category tags have **no identity**; they are defined
//! entirely by their values.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. A derived metric
/// such as "real cost per kg" is one: two metrics holding the same amount are
/// interchangeable, regardless of which product produced them.
///
/// ## Value Object vs Record
///
/// - **Value Object**: no identity (`Metric::Value(34.71)` equals any other `Metric::Value(34.71)`)
/// - **Record**: has identity (two products with the same `ProductId` are the same product)
///
/// ## Design Constraints
///
/// The trait requires:
/// - **Clone**: values are cheap to copy
/// - **PartialEq**: values are compared by their attributes
/// - **Debug**: values show up in logs and test failures
///
/// ## Usage Pattern
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Metric {
///     Value(f64),
///     NotApplicable,
/// }
///
/// impl ValueObject for Metric {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
