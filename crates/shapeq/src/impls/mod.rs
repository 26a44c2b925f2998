//! `Structural` implementations for standard library types.

mod collection;
mod pointer;
mod primitive;
mod tuple;

use crate::classify::TypeShape;
use crate::registry::CompileSession;
use crate::strategy::{
    shape_mismatch, EnumArrayComparer, EquatableArrayComparer, FixedLayoutArrayComparer,
    SliceComparer, Strategy,
};
use crate::synth::StrategyDescriptor;
use crate::{Structural, StructuralError};

/// Build the comparer for any container viewable as a slice of `E`.
///
/// Picks the raw-memory and self-equatable fast paths for the array shapes
/// and the unrolled element walk for everything else.
fn slice_strategy<C: 'static, E: Structural>(
    plan: &StrategyDescriptor,
    session: &mut CompileSession,
    view: fn(&C) -> &[E],
) -> Result<Strategy<C>, StructuralError> {
    match plan.shape() {
        TypeShape::EnumArray { width } => {
            let raw = E::fixed_layout().ok_or_else(|| shape_mismatch(plan))?;
            Ok(Box::new(EnumArrayComparer::new(view, raw, width)))
        }
        TypeShape::FixedLayoutArray => {
            let raw = E::fixed_layout().ok_or_else(|| shape_mismatch(plan))?;
            Ok(Box::new(FixedLayoutArrayComparer::new(view, raw)))
        }
        TypeShape::EquatableArray => {
            let ops = E::equatable().ok_or_else(|| shape_mismatch(plan))?;
            Ok(Box::new(EquatableArrayComparer::new(view, ops)))
        }
        TypeShape::ValueArray
        | TypeShape::ValueList
        | TypeShape::NullableValueArray
        | TypeShape::NullableValueList
        | TypeShape::ReferenceArray
        | TypeShape::ReferenceList => Ok(Box::new(SliceComparer::new(
            view,
            session.handle::<E>()?,
        ))),
        _ => Err(shape_mismatch(plan)),
    }
}
