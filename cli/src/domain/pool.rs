//! Device pool definitions and flattening of `+pool` references.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

use crate::domain::error::PoolError;

/// Items starting with this sigil inline another pool.
pub const POOL_REFERENCE: char = '+';

/// User-authored pools: name → raw items (descriptors or `+name` references).
pub type PoolDefinitions = BTreeMap<String, Vec<String>>;

/// Flattened pools: name → sorted, duplicate-free descriptors.
pub type FlatPoolDefinitions = BTreeMap<String, Vec<String>>;

/// Returns the referenced pool name if `item` is a `+name` reference.
#[must_use]
pub fn pool_reference(item: &str) -> Option<&str> {
    item.strip_prefix(POOL_REFERENCE)
}

/// Expand every pool into its concrete device descriptors.
///
/// Pools are processed in name order so the reported error is stable for a
/// given input. Each pool is expanded breadth-first; every queued item
/// remembers the chain of pools that produced it, so a reference back into
/// its own chain is reported as a cycle however long the chain is.
///
/// # Errors
///
/// - [`PoolError::Empty`] if any pool has no items.
/// - [`PoolError::Missing`] if a reference names an undefined pool.
/// - [`PoolError::Circular`] if a pool (transitively) includes itself.
pub fn flatten(defs: &PoolDefinitions) -> Result<FlatPoolDefinitions, PoolError> {
    if let Some((name, _)) = defs.iter().find(|(_, items)| items.is_empty()) {
        return Err(PoolError::Empty(name.clone()));
    }
    defs.keys()
        .map(|name| Ok((name.clone(), flatten_one(defs, name)?)))
        .collect()
}

/// Flatten all pools and return the one named `name`.
///
/// Every definition is validated, not just the requested one.
///
/// # Errors
///
/// Returns any error from [`flatten`], or [`PoolError::Missing`] if `name`
/// is not defined.
pub fn flatten_pool(defs: &PoolDefinitions, name: &str) -> Result<Vec<String>, PoolError> {
    let mut flat = flatten(defs)?;
    flat.remove(name)
        .ok_or_else(|| PoolError::Missing(name.to_string()))
}

fn flatten_one(defs: &PoolDefinitions, root: &str) -> Result<Vec<String>, PoolError> {
    let mut queue: VecDeque<(&str, Vec<&str>)> = VecDeque::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut devices: BTreeSet<&str> = BTreeSet::new();

    enqueue(defs, &mut queue, root, &[])?;

    while let Some((item, chain)) = queue.pop_front() {
        if let Some(target) = pool_reference(item) {
            if chain.contains(&target) {
                let mut cycle: Vec<String> = chain.iter().map(|s| (*s).to_string()).collect();
                cycle.push(target.to_string());
                return Err(PoolError::Circular {
                    pool: root.to_string(),
                    chain: cycle,
                });
            }
            if !seen.insert(item) {
                continue;
            }
            enqueue(defs, &mut queue, target, &chain)?;
        } else if seen.insert(item) {
            devices.insert(item);
        }
    }

    Ok(devices.into_iter().map(str::to_string).collect())
}

fn enqueue<'a>(
    defs: &'a PoolDefinitions,
    queue: &mut VecDeque<(&'a str, Vec<&'a str>)>,
    name: &'a str,
    parent_chain: &[&'a str],
) -> Result<(), PoolError> {
    let items = defs
        .get(name)
        .ok_or_else(|| PoolError::Missing(name.to_string()))?;
    let mut chain = parent_chain.to_vec();
    chain.push(name);
    for item in items {
        queue.push_back((item.as_str(), chain.clone()));
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
