//! Name generation for limbs and segments.
//!
//! Every limb and segment carries a name that ends up in the emitted scene.
//! When the caller does not supply one, a [`NameGenerator`] is asked for a fresh
//! identifier. [`UuidNames`] is the default; [`SequentialNames`] produces
//! predictable names for tests and reproducible scenes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Source of process-unique identifiers for unnamed limbs and segments.
pub trait NameGenerator {
    /// Returns a fresh name. Successive calls must not repeat.
    fn next_name(&mut self) -> String;
}

/// Random v4 UUID names.
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidNames;

impl NameGenerator for UuidNames {
    fn next_name(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `"<prefix>-<n>"` names, counting up from zero.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SequentialNames {
    prefix: String,
    counter: usize,
}

impl SequentialNames {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 0,
        }
    }
}

impl NameGenerator for SequentialNames {
    fn next_name(&mut self) -> String {
        let name = format!("{}-{}", self.prefix, self.counter);
        self.counter += 1;
        name
    }
}

impl<G: NameGenerator + ?Sized> NameGenerator for &mut G {
    fn next_name(&mut self) -> String {
        (**self).next_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_names_count_up() {
        let mut names = SequentialNames::new("leg");
        assert_eq!(names.next_name(), "leg-0");
        assert_eq!(names.next_name(), "leg-1");
    }

    #[test]
    fn uuid_names_do_not_repeat() {
        let mut names = UuidNames;
        assert_ne!(names.next_name(), names.next_name());
    }
}
