use crate::classify::TypeShape;
use crate::descriptor::TypeDescriptor;
use crate::layout::{EquatableOps, RawView};
use crate::registry::CompileSession;
use crate::strategy::{expect_shape, FloatComparer, ScalarComparer, Strategy};
use crate::synth::StrategyDescriptor;
use crate::{Structural, StructuralError};

/// Integers, `bool` and `char`: self-equatable and fixed-layout.
macro_rules! fixed_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Structural for $ty {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::scalar::<Self>()
                }

                fn strategy(
                    plan: &StrategyDescriptor,
                    _session: &mut CompileSession,
                ) -> Result<Strategy<Self>, StructuralError> {
                    expect_shape(plan, &[TypeShape::Primitive])?;
                    Ok(Box::new(ScalarComparer::new()))
                }

                fn fixed_layout() -> Option<RawView<Self>> {
                    Some(RawView::of())
                }

                fn equatable() -> Option<EquatableOps<Self>> {
                    Some(EquatableOps::of())
                }
            }
        )*
    };
}

fixed_scalar!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, bool, char,
);

/// Heap-backed or zero-sized scalars: self-equatable only.
macro_rules! equatable_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Structural for $ty {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::scalar::<Self>()
                }

                fn strategy(
                    plan: &StrategyDescriptor,
                    _session: &mut CompileSession,
                ) -> Result<Strategy<Self>, StructuralError> {
                    expect_shape(plan, &[TypeShape::Primitive])?;
                    Ok(Box::new(ScalarComparer::new()))
                }

                fn equatable() -> Option<EquatableOps<Self>> {
                    Some(EquatableOps::of())
                }
            }
        )*
    };
}

equatable_scalar!(String, &'static str, ());

// Floats are neither fixed-layout nor self-equatable: their bits disagree
// with numeric equality on NaN and signed zero.
macro_rules! float_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Structural for $ty {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::scalar::<Self>()
                }

                fn strategy(
                    plan: &StrategyDescriptor,
                    _session: &mut CompileSession,
                ) -> Result<Strategy<Self>, StructuralError> {
                    expect_shape(plan, &[TypeShape::Primitive])?;
                    Ok(Box::new(FloatComparer::new()))
                }
            }
        )*
    };
}

float_scalar!(f32, f64);
