use std::collections::{BTreeMap, BTreeSet, HashMap, LinkedList, VecDeque};
use std::hash::BuildHasher;

use crate::classify::TypeShape;
use crate::descriptor::{TypeDescriptor, TypeKind, TypeRef};
use crate::registry::CompileSession;
use crate::strategy::{expect_shape, IterComparer, MapComparer, Strategy};
use crate::synth::StrategyDescriptor;
use crate::{Structural, StructuralError};

use super::slice_strategy;

impl<E: Structural, const N: usize> Structural for [E; N] {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new::<Self>(TypeKind::Array(TypeRef::of::<E>()))
    }

    fn strategy(
        plan: &StrategyDescriptor,
        session: &mut CompileSession,
    ) -> Result<Strategy<Self>, StructuralError> {
        slice_strategy::<Self, E>(plan, session, <[E; N]>::as_slice)
    }
}

impl<E: Structural> Structural for Box<[E]> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new::<Self>(TypeKind::Array(TypeRef::of::<E>()))
    }

    fn strategy(
        plan: &StrategyDescriptor,
        session: &mut CompileSession,
    ) -> Result<Strategy<Self>, StructuralError> {
        slice_strategy::<Self, E>(plan, session, |boxed| &**boxed)
    }
}

impl<E: Structural> Structural for Vec<E> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new::<Self>(TypeKind::List(TypeRef::of::<E>()))
    }

    fn strategy(
        plan: &StrategyDescriptor,
        session: &mut CompileSession,
    ) -> Result<Strategy<Self>, StructuralError> {
        slice_strategy::<Self, E>(plan, session, Vec::as_slice)
    }
}

macro_rules! sequence_structural {
    ($($seq:ident),* $(,)?) => {
        $(
            impl<E: Structural> Structural for $seq<E> {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::new::<Self>(TypeKind::Sequence(vec![TypeRef::of::<E>()]))
                }

                fn strategy(
                    plan: &StrategyDescriptor,
                    session: &mut CompileSession,
                ) -> Result<Strategy<Self>, StructuralError> {
                    expect_shape(
                        plan,
                        &[
                            TypeShape::ValueSequence,
                            TypeShape::NullableValueSequence,
                            TypeShape::ReferenceSequence,
                        ],
                    )?;
                    Ok(Box::new(IterComparer::<Self, _>::new(session.handle::<E>()?)))
                }
            }
        )*
    };
}

sequence_structural!(VecDeque, LinkedList, BTreeSet);

impl<K: Structural, V: Structural, S: BuildHasher + 'static> Structural for HashMap<K, V, S> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new::<Self>(TypeKind::Map {
            key: TypeRef::of::<K>(),
            value: TypeRef::of::<V>(),
        })
    }

    fn strategy(
        plan: &StrategyDescriptor,
        session: &mut CompileSession,
    ) -> Result<Strategy<Self>, StructuralError> {
        expect_shape(plan, &[TypeShape::KeyValueMap])?;
        Ok(Box::new(MapComparer::<Self>::new(
            session.handle::<K>()?,
            session.handle::<V>()?,
        )))
    }
}

impl<K: Structural, V: Structural> Structural for BTreeMap<K, V> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new::<Self>(TypeKind::Map {
            key: TypeRef::of::<K>(),
            value: TypeRef::of::<V>(),
        })
    }

    fn strategy(
        plan: &StrategyDescriptor,
        session: &mut CompileSession,
    ) -> Result<Strategy<Self>, StructuralError> {
        expect_shape(plan, &[TypeShape::KeyValueMap])?;
        Ok(Box::new(MapComparer::<Self>::new(
            session.handle::<K>()?,
            session.handle::<V>()?,
        )))
    }
}
