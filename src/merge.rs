// SPDX-License-Identifier: PMPL-1.0-or-later

//! Deep localization merge
//!
//! Imports translated values into the source-language skeleton. The
//! skeleton decides which keys exist: a translated key the skeleton lacks is
//! dropped, unless it is a plural form, since other languages need forms the
//! source language does not. A skeleton key the translation lacks keeps its
//! source-language value.

use crate::document::{Node, Tree};
use crate::keys::plural::PLURALIZATION_KEYS;

/// Merge `translated` into `skeleton` and return the result.
///
/// Takes the skeleton by value; pass a clone to keep the original.
pub fn deep_localize(mut skeleton: Tree, translated: &Tree) -> Tree {
    localize_in_place(&mut skeleton, translated);
    skeleton
}

/// In-place form of [`deep_localize`].
pub fn localize_in_place(skeleton: &mut Tree, translated: &Tree) {
    for form in PLURALIZATION_KEYS {
        if let Some(value) = translated.get(form) {
            skeleton.insert(form.to_string(), value.clone());
        }
    }

    for (key, slot) in skeleton.iter_mut() {
        let Some(incoming) = translated.get(key) else {
            continue;
        };
        match slot {
            Node::Branch(own) => {
                // A translated scalar cannot stand in for a whole subtree.
                if let Node::Branch(theirs) = incoming {
                    localize_in_place(own, theirs);
                }
            }
            // Leaf slots take whatever was translated, mappings included.
            Node::Leaf(_) => *slot = incoming.clone(),
        }
    }
}
