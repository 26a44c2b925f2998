//! Type shape classifier.
//!
//! Assigns every type descriptor exactly one [`TypeShape`] from a closed set,
//! or fails with `UnsupportedShape`. Classification is shallow: a collection
//! looks at its element's descriptor to pick a strategy family, but never
//! descends further. Validating the whole reachable type graph is the
//! synthesizer's job.
//!
//! Results are memoized per type identity, failures included. A
//! classification-in-progress set catches wrapper chains that lead back to
//! themselves.

use std::any::TypeId;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::descriptor::{Capabilities, TypeDescriptor, TypeKind, TypeRef};
use crate::error::UnsupportedReason;
use crate::StructuralError;

/// Closed set of comparison shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeShape {
    /// Compared through its own equality (integers, strings, enums, ...).
    Primitive,
    /// `Option` of a primitive, composite or nested nullable value.
    NullableValue,
    /// Identity-bearing pointer (`Rc`, `Arc`, `rc::Weak`).
    ReferenceType,
    ValueArray,
    ValueList,
    ValueSequence,
    NullableValueArray,
    NullableValueList,
    NullableValueSequence,
    ReferenceArray,
    ReferenceList,
    ReferenceSequence,
    /// Array of elements whose own `Eq + Hash` is the contract.
    EquatableArray,
    /// Array of padding-free elements, compared as raw memory.
    FixedLayoutArray,
    /// Array of fieldless enums, compared as raw integers of `width` bytes.
    EnumArray { width: usize },
    KeyValueMap,
    /// Struct or tuple, compared field by field.
    Composite,
}

impl TypeShape {
    /// Whether a hand-written strategy handles this shape directly, without
    /// per-field synthesis.
    pub fn is_specialized(self) -> bool {
        !matches!(self, TypeShape::Composite)
    }

    /// Whether values of this shape are walked element by element.
    pub fn is_sequence(self) -> bool {
        matches!(
            self,
            TypeShape::ValueArray
                | TypeShape::ValueList
                | TypeShape::ValueSequence
                | TypeShape::NullableValueArray
                | TypeShape::NullableValueList
                | TypeShape::NullableValueSequence
                | TypeShape::ReferenceArray
                | TypeShape::ReferenceList
                | TypeShape::ReferenceSequence
                | TypeShape::EquatableArray
                | TypeShape::FixedLayoutArray
                | TypeShape::EnumArray { .. }
        )
    }
}

/// A shape plus the nullable flag recorded while unwrapping `Option`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Classification {
    pub shape: TypeShape,
    pub nullable: bool,
}

impl Classification {
    fn of(shape: TypeShape) -> Self {
        Self {
            shape,
            nullable: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Container {
    Array,
    List,
    Sequence,
}

/// Element category shared by every container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ElementClass {
    Value,
    NullableValue,
    Reference,
}

/// Memoizing shape classifier.
#[derive(Default)]
pub struct ShapeClassifier {
    cache: FxHashMap<TypeId, Result<Classification, StructuralError>>,
    /// Types currently being classified. Reaching one again means a wrapper
    /// chain wraps itself.
    classifying: FxHashSet<TypeId>,
}

impl ShapeClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `ty`, memoizing the result.
    pub fn classify(&mut self, ty: &TypeRef) -> Result<Classification, StructuralError> {
        if let Some(cached) = self.cache.get(&ty.id()) {
            return cached.clone();
        }

        if !self.classifying.insert(ty.id()) {
            return Err(StructuralError::unsupported(
                ty.name(),
                UnsupportedReason::SelfWrapping,
            ));
        }

        let descriptor = ty.describe();
        let result = self.classify_descriptor(&descriptor);

        self.classifying.remove(&ty.id());
        self.cache.insert(ty.id(), result.clone());
        result
    }

    /// Number of memoized classifications, failures included.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    fn classify_descriptor(
        &mut self,
        descriptor: &TypeDescriptor,
    ) -> Result<Classification, StructuralError> {
        match descriptor.kind() {
            TypeKind::Scalar | TypeKind::Enumeration => Ok(Classification::of(TypeShape::Primitive)),

            TypeKind::Composite(_) => Ok(Classification::of(TypeShape::Composite)),

            // Rule 1: unwrap, re-classify, record nullability.
            TypeKind::Nullable(inner) => {
                let inner = self.classify(inner)?;
                let shape = match inner.shape {
                    TypeShape::Primitive | TypeShape::Composite | TypeShape::NullableValue => {
                        TypeShape::NullableValue
                    }
                    other => other,
                };
                Ok(Classification {
                    shape,
                    nullable: true,
                })
            }

            TypeKind::Reference { weak, .. } => Ok(Classification {
                shape: TypeShape::ReferenceType,
                nullable: *weak,
            }),

            TypeKind::Transparent(inner) => self.classify(inner),

            // Rule 2: arrays and lists before generic sequences.
            TypeKind::Array(element) => self.classify_container(Container::Array, element),
            TypeKind::List(element) => self.classify_container(Container::List, element),

            TypeKind::Sequence(elements) => match elements.as_slice() {
                [element] => self.classify_container(Container::Sequence, element),
                [] => Err(StructuralError::unsupported(
                    descriptor.name(),
                    UnsupportedReason::NoCapability,
                )),
                candidates => Err(StructuralError::unsupported(
                    descriptor.name(),
                    UnsupportedReason::AmbiguousSequence {
                        candidates: candidates.iter().map(TypeRef::name).collect(),
                    },
                )),
            },

            // Rule 5: key and value shapes are classified independently when
            // the map's plan is synthesized.
            TypeKind::Map { .. } => Ok(Classification::of(TypeShape::KeyValueMap)),

            TypeKind::Opaque => Err(StructuralError::unsupported(
                descriptor.name(),
                UnsupportedReason::NoCapability,
            )),
        }
    }

    fn classify_container(
        &mut self,
        container: Container,
        element: &TypeRef,
    ) -> Result<Classification, StructuralError> {
        let element_class = self.classify(element)?;

        // Rules 3 and 4 apply to array elements only.
        if container == Container::Array {
            let descriptor = element.describe();
            let capabilities = descriptor.capabilities();
            if capabilities.contains(Capabilities::FIXED_LAYOUT) {
                if *descriptor.kind() == TypeKind::Enumeration {
                    return Ok(Classification::of(TypeShape::EnumArray {
                        width: descriptor.size(),
                    }));
                }
                return Ok(Classification::of(TypeShape::FixedLayoutArray));
            }
            if capabilities.contains(Capabilities::SELF_EQUATABLE) {
                return Ok(Classification::of(TypeShape::EquatableArray));
            }
        }

        let class = if element_class.shape == TypeShape::ReferenceType {
            ElementClass::Reference
        } else if element_class.nullable {
            ElementClass::NullableValue
        } else {
            ElementClass::Value
        };

        let shape = match (container, class) {
            (Container::Array, ElementClass::Value) => TypeShape::ValueArray,
            (Container::List, ElementClass::Value) => TypeShape::ValueList,
            (Container::Sequence, ElementClass::Value) => TypeShape::ValueSequence,
            (Container::Array, ElementClass::NullableValue) => TypeShape::NullableValueArray,
            (Container::List, ElementClass::NullableValue) => TypeShape::NullableValueList,
            (Container::Sequence, ElementClass::NullableValue) => {
                TypeShape::NullableValueSequence
            }
            (Container::Array, ElementClass::Reference) => TypeShape::ReferenceArray,
            (Container::List, ElementClass::Reference) => TypeShape::ReferenceList,
            (Container::Sequence, ElementClass::Reference) => TypeShape::ReferenceSequence,
        };

        Ok(Classification::of(shape))
    }
}
