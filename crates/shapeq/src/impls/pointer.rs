use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use crate::classify::TypeShape;
use crate::descriptor::{TypeDescriptor, TypeKind, TypeRef};
use crate::registry::CompileSession;
use crate::strategy::{
    expect_shape, BoxComparer, OptionComparer, RefCellComparer, ReferenceComparer, Strategy,
    WeakComparer,
};
use crate::synth::StrategyDescriptor;
use crate::{Structural, StructuralError};

impl<T: Structural> Structural for Option<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new::<Self>(TypeKind::Nullable(TypeRef::of::<T>()))
    }

    fn strategy(
        _plan: &StrategyDescriptor,
        session: &mut CompileSession,
    ) -> Result<Strategy<Self>, StructuralError> {
        Ok(Box::new(OptionComparer::new(session.handle::<T>()?)))
    }
}

impl<T: Structural> Structural for Rc<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new::<Self>(TypeKind::Reference {
            target: TypeRef::of::<T>(),
            weak: false,
        })
    }

    fn strategy(
        plan: &StrategyDescriptor,
        session: &mut CompileSession,
    ) -> Result<Strategy<Self>, StructuralError> {
        expect_shape(plan, &[TypeShape::ReferenceType])?;
        Ok(Box::new(ReferenceComparer::<Self, _>::new(
            session.handle::<T>()?,
        )))
    }
}

impl<T: Structural> Structural for Arc<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new::<Self>(TypeKind::Reference {
            target: TypeRef::of::<T>(),
            weak: false,
        })
    }

    fn strategy(
        plan: &StrategyDescriptor,
        session: &mut CompileSession,
    ) -> Result<Strategy<Self>, StructuralError> {
        expect_shape(plan, &[TypeShape::ReferenceType])?;
        Ok(Box::new(ReferenceComparer::<Self, _>::new(
            session.handle::<T>()?,
        )))
    }
}

impl<T: Structural> Structural for Weak<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new::<Self>(TypeKind::Reference {
            target: TypeRef::of::<T>(),
            weak: true,
        })
    }

    fn strategy(
        plan: &StrategyDescriptor,
        session: &mut CompileSession,
    ) -> Result<Strategy<Self>, StructuralError> {
        expect_shape(plan, &[TypeShape::ReferenceType])?;
        Ok(Box::new(WeakComparer::new(session.handle::<T>()?)))
    }
}

impl<T: Structural> Structural for Box<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new::<Self>(TypeKind::Transparent(TypeRef::of::<T>()))
    }

    fn strategy(
        _plan: &StrategyDescriptor,
        session: &mut CompileSession,
    ) -> Result<Strategy<Self>, StructuralError> {
        Ok(Box::new(BoxComparer::new(session.handle::<T>()?)))
    }
}

impl<T: Structural> Structural for RefCell<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new::<Self>(TypeKind::Transparent(TypeRef::of::<T>()))
    }

    fn strategy(
        _plan: &StrategyDescriptor,
        session: &mut CompileSession,
    ) -> Result<Strategy<Self>, StructuralError> {
        Ok(Box::new(RefCellComparer::new(session.handle::<T>()?)))
    }
}
