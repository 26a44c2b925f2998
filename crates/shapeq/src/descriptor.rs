//! Type descriptors: what a type declares about itself.
//!
//! A [`TypeDescriptor`] is the input to classification. It lists the type's
//! members in declaration order and the capabilities it advertises. Child
//! types are referenced through [`TypeRef`], which describes its target only
//! on demand, so a recursive type can be described without looping.

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use bitflags::bitflags;

use crate::Structural;

/// Lazy reference to a structural type.
#[derive(Clone, Copy)]
pub struct TypeRef {
    id: TypeId,
    name: &'static str,
    describe: fn() -> TypeDescriptor,
}

impl TypeRef {
    pub fn of<T: Structural>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            describe: T::describe,
        }
    }

    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Build the target's descriptor.
    pub fn describe(&self) -> TypeDescriptor {
        (self.describe)()
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

bitflags! {
    /// Capabilities a type advertises for array-level fast paths.
    ///
    /// Derived from [`Structural::equatable`] and
    /// [`Structural::fixed_layout`] when the descriptor is built.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Capabilities: u8 {
        /// The type's own `Eq + Hash` is its structural contract.
        const SELF_EQUATABLE = 1 << 0;
        /// Values are padding-free and comparable as raw bytes.
        const FIXED_LAYOUT = 1 << 1;
    }
}

/// A named member of a composite type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: &'static str,
    pub ty: TypeRef,
}

impl FieldInfo {
    pub fn of<F: Structural>(name: &'static str) -> Self {
        Self {
            name,
            ty: TypeRef::of::<F>(),
        }
    }
}

/// Structural kind of a type, as declared by its `Structural` impl.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeKind {
    /// Compared by value through its own equality (integers, strings, ...).
    Scalar,
    /// Fieldless enumeration with a fixed integer representation.
    Enumeration,
    /// Optional value (`Option<T>`).
    Nullable(TypeRef),
    /// Identity-bearing shared pointer. `weak` pointers may dangle.
    Reference { target: TypeRef, weak: bool },
    /// Wrapper compared exactly like its contents (`Box`, `RefCell`).
    Transparent(TypeRef),
    /// Contiguous fixed-length storage (`[T; N]`, `Box<[T]>`).
    Array(TypeRef),
    /// Contiguous growable storage (`Vec<T>`).
    List(TypeRef),
    /// Iterable container, one entry per element type it yields.
    Sequence(Vec<TypeRef>),
    /// Key-value map.
    Map { key: TypeRef, value: TypeRef },
    /// Struct or tuple with fields in declaration order.
    Composite(Vec<FieldInfo>),
    /// Declares nothing comparable.
    Opaque,
}

/// Everything classification needs to know about one type.
#[derive(Clone, Debug)]
pub struct TypeDescriptor {
    ty: TypeRef,
    kind: TypeKind,
    capabilities: Capabilities,
    size: usize,
}

impl TypeDescriptor {
    /// Descriptor for `T`, with capabilities read from its `Structural` impl.
    pub fn new<T: Structural>(kind: TypeKind) -> Self {
        let mut capabilities = Capabilities::empty();
        if T::equatable().is_some() {
            capabilities |= Capabilities::SELF_EQUATABLE;
        }
        if T::fixed_layout().is_some() {
            capabilities |= Capabilities::FIXED_LAYOUT;
        }

        Self {
            ty: TypeRef::of::<T>(),
            kind,
            capabilities,
            size: std::mem::size_of::<T>(),
        }
    }

    pub fn scalar<T: Structural>() -> Self {
        Self::new::<T>(TypeKind::Scalar)
    }

    pub fn enumeration<T: Structural>() -> Self {
        Self::new::<T>(TypeKind::Enumeration)
    }

    pub fn composite<T: Structural>(fields: Vec<FieldInfo>) -> Self {
        Self::new::<T>(TypeKind::Composite(fields))
    }

    pub fn opaque<T: Structural>() -> Self {
        Self::new::<T>(TypeKind::Opaque)
    }

    #[inline]
    pub fn ty(&self) -> TypeRef {
        self.ty
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.ty.name()
    }

    #[inline]
    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    #[inline]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// `size_of` the described type.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }
}
