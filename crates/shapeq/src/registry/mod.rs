//! Per-type compiled comparer cache.
//!
//! The registry maps each type to a leaked, compile-once slot. Slots are
//! allocated under a write lock, so there is exactly one slot per type;
//! compilation runs outside the lock and publishes through the slot's
//! `OnceLock`. Failures are published like successes, so a type that cannot
//! be compiled fails identically on every later request without being
//! classified again.
//!
//! A [`CompileSession`] tracks the types it is compiling. A nested type that
//! is already being compiled is a recursive reference: its handle is linked
//! to the slot and resolved on first use instead of being compiled again.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::OnceLock;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::classify::TypeShape;
use crate::context::{ContextPool, EqualityContext};
use crate::descriptor::TypeRef;
use crate::hash::{fold_null, SEED};
use crate::strategy::{EqualityStrategy, Strategy};
use crate::synth::{StrategyDescriptor, Synthesizer};
use crate::{Structural, StructuralError};

type Slot<T> = OnceLock<Result<CompiledComparer<T>, StructuralError>>;

type ErasedSlot = &'static (dyn Any + Send + Sync);

/// Process-wide map from type to compiled comparer.
#[derive(Default)]
pub struct Registry {
    slots: RwLock<FxHashMap<TypeId, ErasedSlot>>,
}

impl Registry {
    /// An empty registry. Comparers borrow from their registry for the rest
    /// of the process, so a registry must be `'static` to be used.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry behind [`crate::comparer`].
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::new)
    }

    /// The compiled comparer for `T`, compiling it on first use.
    pub fn comparer<T: Structural>(
        &'static self,
    ) -> Result<&'static CompiledComparer<T>, StructuralError> {
        CompileSession::new(self).publish::<T>()
    }

    /// Whether `T` has been compiled successfully.
    pub fn is_compiled<T: 'static>(&self) -> bool {
        self.slots
            .read()
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.downcast_ref::<Slot<T>>())
            .is_some_and(|slot| matches!(slot.get(), Some(Ok(_))))
    }

    /// Number of types with a slot, compiled or not.
    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }

    fn slot<T: 'static>(&self) -> Result<&'static Slot<T>, StructuralError> {
        let id = TypeId::of::<T>();
        let existing = self.slots.read().get(&id).copied();
        let erased = match existing {
            Some(slot) => slot,
            None => *self.slots.write().entry(id).or_insert_with(|| {
                let leaked: ErasedSlot = Box::leak(Box::new(Slot::<T>::new()));
                leaked
            }),
        };
        erased.downcast_ref::<Slot<T>>().ok_or_else(|| {
            StructuralError::invalid_argument(
                "registry slot",
                format!("slot for `{}` holds another type", type_name::<T>()),
            )
        })
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("slots", &self.len())
            .finish()
    }
}

/// State of one compilation run.
pub struct CompileSession {
    registry: &'static Registry,
    synthesizer: Synthesizer,
    in_progress: FxHashSet<TypeId>,
}

impl CompileSession {
    fn new(registry: &'static Registry) -> Self {
        Self {
            registry,
            synthesizer: Synthesizer::new(),
            in_progress: FxHashSet::default(),
        }
    }

    /// Handle to the comparer for a nested type `F`.
    ///
    /// Compiles `F` now unless it is already published or is being compiled
    /// further up this session, in which case the handle resolves through
    /// `F`'s slot on first use.
    pub fn handle<F: Structural>(&mut self) -> Result<ComparerHandle<F>, StructuralError> {
        let slot = self.registry.slot::<F>()?;
        if let Some(done) = slot.get() {
            return done.as_ref().map(ComparerHandle::ready).map_err(Clone::clone);
        }
        if self.in_progress.contains(&TypeId::of::<F>()) {
            tracing::trace!(type_name = type_name::<F>(), "recursive comparer link deferred");
            return Ok(ComparerHandle {
                link: Link::Deferred {
                    slot,
                    registry: self.registry,
                    compile: Registry::comparer::<F>,
                },
            });
        }
        self.publish::<F>().map(ComparerHandle::ready)
    }

    fn publish<T: Structural>(&mut self) -> Result<&'static CompiledComparer<T>, StructuralError> {
        let slot = self.registry.slot::<T>()?;
        if let Some(done) = slot.get() {
            return done.as_ref().map_err(Clone::clone);
        }

        let result = self.compile::<T>();
        slot.get_or_init(move || result)
            .as_ref()
            .map_err(Clone::clone)
    }

    fn compile<T: Structural>(&mut self) -> Result<CompiledComparer<T>, StructuralError> {
        let id = TypeId::of::<T>();
        self.in_progress.insert(id);
        let result = self.build::<T>();
        self.in_progress.remove(&id);

        match &result {
            Ok(compiled) => tracing::debug!(
                type_name = type_name::<T>(),
                shape = ?compiled.shape(),
                "comparer compiled"
            ),
            Err(error) => tracing::warn!(
                type_name = type_name::<T>(),
                %error,
                "comparer compilation failed; failure cached"
            ),
        }
        result
    }

    fn build<T: Structural>(&mut self) -> Result<CompiledComparer<T>, StructuralError> {
        let plan = self.synthesizer.synthesize(&TypeRef::of::<T>())?;
        let strategy = T::strategy(&plan, self)?;
        Ok(CompiledComparer { plan, strategy })
    }
}

/// Comparer compiled once for one closed type.
pub struct CompiledComparer<T: 'static> {
    plan: StrategyDescriptor,
    strategy: Strategy<T>,
}

impl<T: 'static> CompiledComparer<T> {
    /// Structural equality, with a context from the global pool.
    pub fn equals(&self, x: &T, y: &T) -> bool {
        ContextPool::global().scoped(|cx| self.strategy.equals(x, y, cx))
    }

    /// Structural hash, with a context from the global pool.
    pub fn hash(&self, x: &T) -> u64 {
        ContextPool::global().scoped(|cx| self.strategy.hash(x, cx))
    }

    #[inline]
    pub fn equals_in(&self, x: &T, y: &T, cx: &mut EqualityContext) -> bool {
        self.strategy.equals(x, y, cx)
    }

    #[inline]
    pub fn hash_in(&self, x: &T, cx: &mut EqualityContext) -> u64 {
        self.strategy.hash(x, cx)
    }

    pub fn plan(&self) -> &StrategyDescriptor {
        &self.plan
    }

    pub fn shape(&self) -> TypeShape {
        self.plan.shape()
    }
}

impl<T: 'static> fmt::Debug for CompiledComparer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledComparer")
            .field("type_name", &self.plan.type_name())
            .field("shape", &self.shape())
            .finish_non_exhaustive()
    }
}

enum Link<F: 'static> {
    Ready(&'static CompiledComparer<F>),
    Deferred {
        slot: &'static Slot<F>,
        registry: &'static Registry,
        compile: fn(&'static Registry) -> Result<&'static CompiledComparer<F>, StructuralError>,
    },
}

/// Reference to a nested type's compiled comparer.
pub struct ComparerHandle<F: 'static> {
    link: Link<F>,
}

impl<F: 'static> ComparerHandle<F> {
    fn ready(compiled: &'static CompiledComparer<F>) -> Self {
        Self {
            link: Link::Ready(compiled),
        }
    }

    /// Whether the handle was linked before its target finished compiling.
    pub fn is_deferred(&self) -> bool {
        matches!(self.link, Link::Deferred { .. })
    }

    fn resolve(&self) -> Option<&'static CompiledComparer<F>> {
        match self.link {
            Link::Ready(compiled) => Some(compiled),
            Link::Deferred {
                slot,
                registry,
                compile,
            } => {
                let resolved = match slot.get() {
                    Some(done) => done.as_ref().map_err(Clone::clone),
                    None => compile(registry),
                };
                match resolved {
                    Ok(compiled) => Some(compiled),
                    Err(error) => {
                        tracing::error!(
                            type_name = type_name::<F>(),
                            %error,
                            "deferred comparer link unresolved"
                        );
                        None
                    }
                }
            }
        }
    }
}

impl<F: 'static> Clone for ComparerHandle<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: 'static> Copy for ComparerHandle<F> {}

impl<F: 'static> Clone for Link<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: 'static> Copy for Link<F> {}

impl<F: 'static> fmt::Debug for ComparerHandle<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComparerHandle")
            .field("type_name", &type_name::<F>())
            .field("deferred", &self.is_deferred())
            .finish()
    }
}

impl<F: 'static> EqualityStrategy<F> for ComparerHandle<F> {
    #[inline]
    fn equals(&self, x: &F, y: &F, cx: &mut EqualityContext) -> bool {
        self.resolve()
            .is_some_and(|compiled| compiled.strategy.equals(x, y, cx))
    }

    #[inline]
    fn hash(&self, x: &F, cx: &mut EqualityContext) -> u64 {
        self.resolve()
            .map_or_else(|| fold_null(SEED), |compiled| compiled.strategy.hash(x, cx))
    }

    #[inline]
    fn fold_into(&self, hash: u64, x: &F, cx: &mut EqualityContext) -> u64 {
        self.resolve().map_or_else(
            || fold_null(hash),
            |compiled| compiled.strategy.fold_into(hash, x, cx),
        )
    }
}
