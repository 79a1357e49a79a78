//! Leader reply parsing.
//!
//! These functions turn free-form leader output into decisions. They are pure
//! domain logic with no I/O.
//!
//! | Function | Use Case | Looks for |
//! |----------|----------|-----------|
//! | [`parse_conflict_verdict`] | Collaborate conflict analysis | `CONFLICTS DETECTED` |
//! | [`parse_route_selection`] | Route member choice | member name or 1-based number |

use super::value_objects::ConflictVerdict;

/// Phrase the analyzer must emit when member answers contradict each other.
pub const CONFLICT_SENTINEL: &str = "CONFLICTS DETECTED";

/// Phrase the analyzer emits when member answers agree.
pub const NO_CONFLICT_SENTINEL: &str = "NO CONFLICTS";

/// Derive a conflict verdict from the analyzer's reply.
///
/// The verdict is a case-insensitive substring check for
/// [`CONFLICT_SENTINEL`]; the whole reply is kept as the rationale.
/// Note that `"no conflicts detected"` also contains the sentinel and
/// therefore counts as a conflict. The analysis prompt asks for the exact
/// phrases `CONFLICTS DETECTED` / `NO CONFLICTS` to avoid that.
///
/// # Examples
///
/// ```
/// use crew_domain::team::parsing::parse_conflict_verdict;
///
/// assert!(parse_conflict_verdict("Conflicts detected: dates differ").has_conflict);
/// assert!(!parse_conflict_verdict("NO CONFLICTS. All agree.").has_conflict);
/// ```
pub fn parse_conflict_verdict(reply: &str) -> ConflictVerdict {
    let has_conflict = reply.to_uppercase().contains(CONFLICT_SENTINEL);
    ConflictVerdict {
        has_conflict,
        rationale: reply.trim().to_string(),
    }
}

/// Find which member the leader selected.
///
/// Tries, in order:
/// 1. A member name appearing in the reply (case-insensitive). When several
///    names appear, the earliest occurrence wins; at the same position the
///    longer name wins.
/// 2. A standalone number `1..=members.len()` (1-based index).
///
/// Returns `None` when nothing matches; callers fall back to the first member.
pub fn parse_route_selection(reply: &str, member_names: &[&str]) -> Option<usize> {
    let reply_lower = reply.to_lowercase();

    let by_name = member_names
        .iter()
        .enumerate()
        .filter(|(_, name)| !name.trim().is_empty())
        .filter_map(|(idx, name)| {
            reply_lower
                .find(&name.to_lowercase())
                .map(|pos| (pos, name.len(), idx))
        })
        .min_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

    if let Some((_, _, idx)) = by_name {
        return Some(idx);
    }

    reply
        .split(|c: char| !c.is_ascii_digit())
        .filter(|tok| !tok.is_empty())
        .filter_map(|tok| tok.parse::<usize>().ok())
        .find(|n| (1..=member_names.len()).contains(n))
        .map(|n| n - 1)
}
