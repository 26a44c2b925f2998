use crate::descriptor::{FieldInfo, TypeDescriptor};
use crate::registry::CompileSession;
use crate::strategy::{CompositeComparer, Strategy};
use crate::synth::StrategyDescriptor;
use crate::{Structural, StructuralError};

/// Tuples are composites with fields named by position.
macro_rules! tuple_structural {
    ($(($($idx:tt $name:ident),+)),+ $(,)?) => {
        $(
            impl<$($name: Structural),+> Structural for ($($name,)+) {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::composite::<Self>(vec![
                        $(FieldInfo::of::<$name>(stringify!($idx))),+
                    ])
                }

                fn strategy(
                    plan: &StrategyDescriptor,
                    session: &mut CompileSession,
                ) -> Result<Strategy<Self>, StructuralError> {
                    CompositeComparer::<Self>::builder(plan)
                        $(.field(stringify!($idx), session.handle::<$name>()?, |t| &t.$idx))+
                        .finish()
                }
            }
        )+
    };
}

tuple_structural!(
    (0 A),
    (0 A, 1 B),
    (0 A, 1 B, 2 C),
    (0 A, 1 B, 2 C, 3 D),
    (0 A, 1 B, 2 C, 3 D, 4 E),
    (0 A, 1 B, 2 C, 3 D, 4 E, 5 F),
);
