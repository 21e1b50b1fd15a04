//! Create / update / keep decision for remote device pools.
//!
//! Pure functions only — the application service performs the remote calls.

use std::collections::BTreeSet;

use crate::domain::remote::{PoolRule, RemotePool};

/// Separator between branch and pool in remote pool names.
pub const POOL_NAME_SEPARATOR: char = '/';

/// Remote display name for `pool` on `branch`. This is the only key used to
/// find an existing remote pool.
#[must_use]
pub fn remote_pool_name(branch: &str, pool: &str) -> String {
    format!("{branch}{POOL_NAME_SEPARATOR}{pool}")
}

/// Serialized rule value for a device list: a JSON array in input order.
#[must_use]
#[allow(clippy::expect_used)] // a slice of strings always serializes
pub fn rule_value(device_arns: &[String]) -> String {
    serde_json::to_string(device_arns).expect("serializable")
}

/// How a remote pool's membership is compared with the desired devices.
///
/// Both variants require the pool to carry exactly one `ARN IN` rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MembershipCheck {
    /// Rule value must equal the serialized desired list byte for byte, so
    /// the same devices in a different order count as a change.
    #[default]
    ExactRule,
    /// Rule value must decode to the same set of ARNs, in any order.
    SameSet,
}

impl MembershipCheck {
    #[must_use]
    pub fn matches(self, pool: &RemotePool, device_arns: &[String]) -> bool {
        let [rule] = pool.rules.as_slice() else {
            return false;
        };
        if !rule.is_arn_in() {
            return false;
        }
        match self {
            Self::ExactRule => rule.value == rule_value(device_arns),
            Self::SameSet => serde_json::from_str::<Vec<String>>(&rule.value)
                .is_ok_and(|current| as_set(&current) == as_set(device_arns)),
        }
    }
}

fn as_set(arns: &[String]) -> BTreeSet<&str> {
    arns.iter().map(String::as_str).collect()
}

/// What reconciliation has to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolPlan {
    /// No pool with the expected name exists.
    Create { name: String, rule: PoolRule },
    /// The pool exists but its membership differs.
    Update { pool: RemotePool, rule: PoolRule },
    /// The pool exists and already matches.
    Keep(RemotePool),
}

/// Decide how to bring `remote_pools` in line with `device_arns` for the pool
/// named `name`. When several remote pools share the name, the last wins.
#[must_use]
pub fn plan_pool(
    remote_pools: &[RemotePool],
    name: &str,
    device_arns: &[String],
    check: MembershipCheck,
) -> PoolPlan {
    let rule = PoolRule::arn_in(rule_value(device_arns));
    match remote_pools.iter().rev().find(|p| p.name == name) {
        None => PoolPlan::Create {
            name: name.to_string(),
            rule,
        },
        Some(pool) if check.matches(pool, device_arns) => PoolPlan::Keep(pool.clone()),
        Some(pool) => PoolPlan::Update {
            pool: pool.clone(),
            rule,
        },
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
