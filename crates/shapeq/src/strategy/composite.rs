//! Field-by-field comparer for structs and tuples.

use std::fmt;

use crate::classify::TypeShape;
use crate::context::EqualityContext;
use crate::hash::SEED;
use crate::registry::ComparerHandle;
use crate::synth::{PartDescriptor, StrategyDescriptor};
use crate::StructuralError;

use super::{expect_shape, EqualityStrategy, Strategy};

/// One field's equality check and hash contribution.
trait FieldStep<T>: Send + Sync {
    fn name(&self) -> &'static str;

    fn equals(&self, x: &T, y: &T, cx: &mut EqualityContext) -> bool;

    fn fold_into(&self, hash: u64, x: &T, cx: &mut EqualityContext) -> u64;
}

struct Field<T: 'static, F: 'static> {
    name: &'static str,
    comparer: ComparerHandle<F>,
    get: fn(&T) -> &F,
}

impl<T: 'static, F: 'static> FieldStep<T> for Field<T, F> {
    fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    fn equals(&self, x: &T, y: &T, cx: &mut EqualityContext) -> bool {
        self.comparer.equals((self.get)(x), (self.get)(y), cx)
    }

    #[inline]
    fn fold_into(&self, hash: u64, x: &T, cx: &mut EqualityContext) -> u64 {
        self.comparer.fold_into(hash, (self.get)(x), cx)
    }
}

/// Compares fields in declaration order and folds their hashes left to
/// right from [`SEED`].
pub struct CompositeComparer<T: 'static> {
    type_name: &'static str,
    fields: Vec<Box<dyn FieldStep<T>>>,
}

impl<T: 'static> CompositeComparer<T> {
    /// Start building the comparer for a composite plan.
    pub fn builder(plan: &StrategyDescriptor) -> CompositeBuilder<'_, T> {
        CompositeBuilder {
            plan,
            fields: Vec::new(),
        }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|field| field.name())
    }
}

impl<T: 'static> EqualityStrategy<T> for CompositeComparer<T> {
    fn equals(&self, x: &T, y: &T, cx: &mut EqualityContext) -> bool {
        self.fields.iter().all(|field| field.equals(x, y, cx))
    }

    fn hash(&self, x: &T, cx: &mut EqualityContext) -> u64 {
        self.fields
            .iter()
            .fold(SEED, |hash, field| field.fold_into(hash, x, cx))
    }
}

impl<T: 'static> fmt::Debug for CompositeComparer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeComparer")
            .field("type_name", &self.type_name)
            .field("fields", &self.field_names().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder returned by [`CompositeComparer::builder`].
///
/// Fields must be added in the order the plan lists them.
pub struct CompositeBuilder<'p, T: 'static> {
    plan: &'p StrategyDescriptor,
    fields: Vec<Box<dyn FieldStep<T>>>,
}

impl<T: 'static> CompositeBuilder<'_, T> {
    #[must_use]
    pub fn field<F: 'static>(
        mut self,
        name: &'static str,
        comparer: ComparerHandle<F>,
        get: fn(&T) -> &F,
    ) -> Self {
        self.fields.push(Box::new(Field {
            name,
            comparer,
            get,
        }));
        self
    }

    /// Check the fields against the plan and box the comparer.
    pub fn finish(self) -> Result<Strategy<T>, StructuralError> {
        expect_shape(self.plan, &[TypeShape::Composite])?;

        let planned = self.plan.parts().iter().filter_map(PartDescriptor::field_name);
        let built = self.fields.iter().map(|field| field.name());
        if !planned.eq(built) {
            return Err(StructuralError::invalid_argument(
                "composite fields",
                format!(
                    "fields of `{}` do not match its descriptor",
                    self.plan.type_name()
                ),
            ));
        }

        Ok(Box::new(CompositeComparer {
            type_name: self.plan.type_name(),
            fields: self.fields,
        }))
    }
}
