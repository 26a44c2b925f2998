//! Strategy synthesis: the plan for comparing and hashing one type.
//!
//! The synthesizer classifies a type, lists its parts (fields in declaration
//! order, or the element / key / value / inner type of a specialized shape),
//! and validates every reachable type before anything is compiled. A type
//! that is already on the validation stack is a recursive reference and is
//! accepted as pending; its own synthesis decides whether it is valid.

use std::any::TypeId;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::classify::{Classification, ShapeClassifier, TypeShape};
use crate::descriptor::{TypeDescriptor, TypeKind, TypeRef};
use crate::StructuralError;

/// Role of one part within its parent's plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartRole {
    /// Composite field, in declaration order.
    Field { name: &'static str, index: usize },
    /// Element of an array, list or sequence.
    Element,
    Key,
    Value,
    /// Content of a wrapper, option or reference.
    Inner,
}

/// One classified part of a plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartDescriptor {
    pub role: PartRole,
    pub ty: TypeRef,
    pub classification: Classification,
}

impl PartDescriptor {
    /// Field name, for composite fields.
    pub fn field_name(&self) -> Option<&'static str> {
        match self.role {
            PartRole::Field { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// Synthesized plan for one closed type. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrategyDescriptor {
    ty: TypeRef,
    classification: Classification,
    parts: Vec<PartDescriptor>,
}

impl StrategyDescriptor {
    #[inline]
    pub fn ty(&self) -> TypeRef {
        self.ty
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.ty.name()
    }

    #[inline]
    pub fn classification(&self) -> Classification {
        self.classification
    }

    #[inline]
    pub fn shape(&self) -> TypeShape {
        self.classification.shape
    }

    pub fn parts(&self) -> &[PartDescriptor] {
        &self.parts
    }

    /// Composite fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &PartDescriptor> {
        self.parts
            .iter()
            .filter(|part| part.field_name().is_some())
    }

    /// First part with the given role.
    pub fn part(&self, role: PartRole) -> Option<&PartDescriptor> {
        self.parts.iter().find(|part| part.role == role)
    }
}

/// Builds and validates [`StrategyDescriptor`]s.
#[derive(Default)]
pub struct Synthesizer {
    classifier: ShapeClassifier,
    validated: FxHashMap<TypeId, Result<(), StructuralError>>,
    visiting: FxHashSet<TypeId>,
}

impl Synthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synthesize the plan for `ty`, validating every reachable type.
    pub fn synthesize(&mut self, ty: &TypeRef) -> Result<StrategyDescriptor, StructuralError> {
        let classification = self.classifier.classify(ty)?;
        let descriptor = ty.describe();

        self.visiting.insert(ty.id());
        let parts = self.build_parts(&descriptor);
        self.visiting.remove(&ty.id());

        Ok(StrategyDescriptor {
            ty: *ty,
            classification,
            parts: parts?,
        })
    }

    fn build_parts(
        &mut self,
        descriptor: &TypeDescriptor,
    ) -> Result<Vec<PartDescriptor>, StructuralError> {
        let children: Vec<(PartRole, TypeRef)> = match descriptor.kind() {
            TypeKind::Scalar | TypeKind::Enumeration | TypeKind::Opaque => Vec::new(),
            TypeKind::Nullable(inner)
            | TypeKind::Transparent(inner)
            | TypeKind::Reference { target: inner, .. } => vec![(PartRole::Inner, *inner)],
            TypeKind::Array(element) | TypeKind::List(element) => {
                vec![(PartRole::Element, *element)]
            }
            TypeKind::Sequence(elements) => elements
                .iter()
                .map(|element| (PartRole::Element, *element))
                .collect(),
            TypeKind::Map { key, value } => {
                vec![(PartRole::Key, *key), (PartRole::Value, *value)]
            }
            TypeKind::Composite(fields) => fields
                .iter()
                .enumerate()
                .map(|(index, field)| {
                    (
                        PartRole::Field {
                            name: field.name,
                            index,
                        },
                        field.ty,
                    )
                })
                .collect(),
        };

        children
            .into_iter()
            .map(|(role, ty)| {
                let checked = self
                    .validate(&ty)
                    .and_then(|()| self.classifier.classify(&ty));
                match checked {
                    Ok(classification) => Ok(PartDescriptor {
                        role,
                        ty,
                        classification,
                    }),
                    Err(cause) => Err(StructuralError::Compilation {
                        type_name: descriptor.name(),
                        cause: Box::new(cause),
                    }),
                }
            })
            .collect()
    }

    /// Validate that `ty` and everything reachable from it can be compiled.
    fn validate(&mut self, ty: &TypeRef) -> Result<(), StructuralError> {
        if let Some(done) = self.validated.get(&ty.id()) {
            return done.clone();
        }
        if self.visiting.contains(&ty.id()) {
            tracing::trace!(type_name = ty.name(), "recursive type accepted as pending");
            return Ok(());
        }

        let result = self.synthesize(ty).map(|_| ());
        self.validated.insert(ty.id(), result.clone());
        result
    }
}
