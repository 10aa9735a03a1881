// SPDX-License-Identifier: PMPL-1.0-or-later

//! Key-path analysis over translation trees
//!
//! - [`flatten`] turns a tree into dotted key paths.
//! - [`plural`] finds the nodes holding pluralization forms.
//! - [`stable`] compares the keys that must match across locales.

pub mod flatten;
pub mod plural;
pub mod stable;

pub use flatten::{flatten, join_path};
pub use plural::{find_pluralizations, is_plural_key, PluralForm, PLURALIZATION_KEYS};
pub use stable::{reconcile, stable_keys, KeyDrift, PluralGap};
