#![deny(missing_docs)]

//! # Tree Mutation Engine
//!
//! Locates every mapping entry in a JSON document that satisfies a predicate,
//! applies a mutation to the parent mapping, and restarts the walk from the
//! root after each mutation. The walk finishes when a full pass finds nothing
//! to change.
//!
//! Only mappings are descended into. Arrays are opaque leaves: a mapping
//! nested inside an array element is never visited.

use crate::error::{AppError, AppResult};
use serde_json::{Map, Value};

/// A JSON object as seen by predicates and mutators.
pub type Mapping = Map<String, Value>;

/// Upper bound on restarts performed by [`Engine::default`].
pub const DEFAULT_MAX_PASSES: usize = 100_000;

/// Decides whether the entry `key` of `parent` needs mutating.
///
/// Implementations must be free of side effects and must not assume that any
/// earlier match has (or has not) been mutated yet.
pub trait Predicate {
    /// Returns `true` when `parent[key]` should be handed to the mutator.
    fn matches(&self, parent: &Mapping, key: &str) -> bool;
}

impl<F> Predicate for F
where
    F: Fn(&Mapping, &str) -> bool,
{
    fn matches(&self, parent: &Mapping, key: &str) -> bool {
        self(parent, key)
    }
}

/// Rewrites `parent` in place at or around `key`.
///
/// A mutator may add, remove or replace any number of keys. It must move the
/// document strictly towards not matching its predicate, otherwise the engine
/// will run until its pass cap is exhausted.
pub trait Mutator {
    /// Applies the change.
    fn mutate(&self, parent: &mut Mapping, key: &str) -> AppResult<()>;
}

impl<F> Mutator for F
where
    F: Fn(&mut Mapping, &str) -> AppResult<()>,
{
    fn mutate(&self, parent: &mut Mapping, key: &str) -> AppResult<()> {
        self(parent, key)
    }
}

/// Outcome of running the engine to its fixed point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settled {
    /// Number of mutations applied (one per restarted pass).
    pub mutations: usize,
}

impl Settled {
    /// Whether the document changed at all.
    pub fn changed(&self) -> bool {
        self.mutations > 0
    }
}

/// The restart-based traversal driver.
#[derive(Debug, Clone, Copy)]
pub struct Engine {
    max_passes: usize,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

impl Engine {
    /// Creates an engine with [`DEFAULT_MAX_PASSES`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine that allows up to `max_passes` mutations. A rule that
    /// still matches after that many fails with [`AppError::NoFixedPoint`].
    pub fn with_max_passes(max_passes: usize) -> Self {
        Self { max_passes }
    }

    /// Runs `predicate`/`mutator` over `document` until no entry matches.
    pub fn apply<P, M>(
        &self,
        document: &mut Value,
        predicate: &P,
        mutator: &M,
    ) -> AppResult<Settled>
    where
        P: Predicate + ?Sized,
        M: Mutator + ?Sized,
    {
        self.apply_named("<anonymous>", document, predicate, mutator)
    }

    /// Same as [`Engine::apply`], naming the rule in the pass-cap error.
    pub fn apply_named<P, M>(
        &self,
        name: &str,
        document: &mut Value,
        predicate: &P,
        mutator: &M,
    ) -> AppResult<Settled>
    where
        P: Predicate + ?Sized,
        M: Mutator + ?Sized,
    {
        let Value::Object(root) = document else {
            return Ok(Settled::default());
        };

        let mut settled = Settled::default();
        while settle_pass(root, predicate, mutator)? {
            if settled.mutations == self.max_passes {
                return Err(AppError::NoFixedPoint {
                    rule: name.to_string(),
                    passes: settled.mutations,
                });
            }
            settled.mutations += 1;
        }

        Ok(settled)
    }
}

/// Runs the default engine and hands the (mutated) document back.
pub fn apply<'a, P, M>(
    document: &'a mut Value,
    predicate: &P,
    mutator: &M,
) -> AppResult<&'a mut Value>
where
    P: Predicate + ?Sized,
    M: Mutator + ?Sized,
{
    Engine::default().apply(document, predicate, mutator)?;
    Ok(document)
}

/// One depth-first pass. Returns `true` as soon as a mutation was applied;
/// the caller must then restart from the root.
fn settle_pass<P, M>(mapping: &mut Mapping, predicate: &P, mutator: &M) -> AppResult<bool>
where
    P: Predicate + ?Sized,
    M: Mutator + ?Sized,
{
    // Snapshot the keys so the mutator is free to reshape `mapping`; the pass
    // ends right after it runs.
    let keys: Vec<String> = mapping.keys().cloned().collect();

    for key in &keys {
        if predicate.matches(mapping, key) {
            mutator.mutate(mapping, key)?;
            return Ok(true);
        }
        if let Some(Value::Object(child)) = mapping.get_mut(key) {
            if settle_pass(child, predicate, mutator)? {
                return Ok(true);
            }
        }
    }

    Ok(false)
}
