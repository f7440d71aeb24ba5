//! Agent roles.
//!
//! Roles are assigned once at population build time and are immutable for the
//! agent's lifetime.  Dispatch on role is a plain enum match — never a string
//! comparison.

use std::fmt;

/// The coordination role of an agent, assigned at spawn by index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// Exactly one per population: the first agent.
    Leader,
    /// A small advance party after the leader.
    Scout,
    /// Everyone else.
    Follower,
}

impl Role {
    /// Deterministic role for the agent at `index` in a population of `count`.
    ///
    /// Index 0 is the leader; the next `count / 8` (at least one, when the
    /// population allows) are scouts; the remainder follow.  The pattern is a
    /// pure function of `(index, count)`, so rebuilding a population with the
    /// same count always reproduces the same role layout.
    pub fn for_index(index: usize, count: usize) -> Role {
        debug_assert!(index < count);
        if index == 0 {
            return Role::Leader;
        }
        let scouts = (count / 8).max(1);
        if index <= scouts {
            Role::Scout
        } else {
            Role::Follower
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Leader => "leader",
            Role::Scout => "scout",
            Role::Follower => "follower",
        };
        f.write_str(s)
    }
}
