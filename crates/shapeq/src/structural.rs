//! The `Structural` trait.

use crate::descriptor::TypeDescriptor;
use crate::layout::{EquatableOps, RawView};
use crate::registry::CompileSession;
use crate::strategy::Strategy;
use crate::synth::StrategyDescriptor;
use crate::StructuralError;

/// A type that can be compared and hashed structurally.
///
/// Implementations exist for primitives, `String`, the standard wrappers,
/// pointers and collections, and tuples. User structs and fieldless enums use
/// `#[derive(Structural)]`.
///
/// Implementors declare their shape in [`describe`](Structural::describe) and
/// build their comparer in [`strategy`](Structural::strategy). The registry
/// calls `strategy` once per type, after classification and synthesis have
/// produced `plan`.
pub trait Structural: Sized + 'static {
    /// Declared members and capabilities of this type.
    fn describe() -> TypeDescriptor;

    /// Build the comparer for this type from its synthesized plan.
    ///
    /// Nested comparers are obtained through `session`, which compiles them
    /// on demand and links recursive types.
    fn strategy(
        plan: &StrategyDescriptor,
        session: &mut CompileSession,
    ) -> Result<Strategy<Self>, StructuralError>;

    /// Raw byte view of slices of `Self`, for padding-free types.
    fn fixed_layout() -> Option<RawView<Self>> {
        None
    }

    /// The type's own `Eq + Hash`, when that is its structural contract.
    fn equatable() -> Option<EquatableOps<Self>> {
        None
    }
}
