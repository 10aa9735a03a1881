// SPDX-License-Identifier: PMPL-1.0-or-later

//! locale-warden: consistency engine for hierarchical translation files.
//!
//! One authoritative source-language document per namespace defines the key
//! skeleton; translated counterparts must mirror it, except that
//! pluralization nodes may carry whichever plural forms their language needs.
//!
//! ENGINE PILLARS:
//! 1. **Keys**: flattening, pluralization lookup and stable-key comparison.
//! 2. **Merge**: imports translated leaves into the source skeleton without
//!    letting new keys in, plural forms aside.
//! 3. **Duplicates**: finds repeated mapping keys on a structural parse,
//!    since a resolved parse has already discarded them.
//! 4. **Driver**: walks namespace/locale pairs for validation or fix-up, with
//!    an optional upstream sync in front.

pub mod checks;
pub mod config;
pub mod document;
pub mod driver;
pub mod duplicates;
pub mod error;
pub mod keys;
pub mod locale;
pub mod merge;
pub mod report;
pub mod sync;
pub mod types;
