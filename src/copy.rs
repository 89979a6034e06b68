//! Copy strategies decide what a reader actually observes.
//!
//! Every read hands its callback `strategy.copy(&state)` rather than the state
//! itself, so the state never leaves the agent by reference. The default,
//! [`IdentityCopy`], is a plain `Clone`: for values that is already a private
//! copy, for `Arc`-shared state it is the same allocation. Use [`DeepCopy`] or a
//! closure when readers need a defensive copy of shared state.

use std::sync::Arc;

/// Computes the snapshot handed to a reader from the current state.
///
/// Implementations must not mutate the state (they only get `&T`) and must not
/// keep an alias through which a reader could later change what the agent sees.
pub trait CopyStrategy<T>: Send + 'static {
    fn copy(&self, state: &T) -> T;
}

/// Hands readers `state.clone()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityCopy;

impl<T: Clone> CopyStrategy<T> for IdentityCopy {
    #[inline]
    fn copy(&self, state: &T) -> T {
        state.clone()
    }
}

/// For `Arc`-shared state: clones the pointee into a fresh allocation, so a
/// reader never shares memory with the agent.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeepCopy;

impl<U: Clone> CopyStrategy<Arc<U>> for DeepCopy {
    fn copy(&self, state: &Arc<U>) -> Arc<U> {
        Arc::new(U::clone(state))
    }
}

impl<T, F> CopyStrategy<T> for F
where
    F: Fn(&T) -> T + Send + 'static,
{
    #[inline]
    fn copy(&self, state: &T) -> T {
        self(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_identity_returns_same_shared_allocation_every_time() {
        let state = Arc::new(vec![1, 2, 3]);

        let first = IdentityCopy.copy(&state);
        let second = IdentityCopy.copy(&state);

        assert!(Arc::ptr_eq(&first, &state));
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_identity_on_plain_values() {
        assert_eq!(IdentityCopy.copy(&7_i64), 7);
        assert_eq!(IdentityCopy.copy(&7_i64), IdentityCopy.copy(&7_i64));
    }

    #[test]
    fn test_deep_copy_detaches_from_state() {
        let state = Arc::new(HashMap::from([("Pilsner".to_string(), 1_u32)]));

        let snapshot = DeepCopy.copy(&state);

        assert!(!Arc::ptr_eq(&snapshot, &state));
        assert_eq!(*snapshot, *state);
    }

    #[test]
    fn test_closure_strategy() {
        let upper = |s: &String| s.to_uppercase();
        assert_eq!(upper.copy(&"lager".to_string()), "LAGER");
    }
}
