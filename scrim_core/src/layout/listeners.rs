// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slot storage for layout subscriptions.

use alloc::vec::Vec;

use super::token::ListenerToken;

/// The set of listeners subscribed to a surface's layout-completion events.
///
/// Listeners are addressed by [`ListenerToken`] handles. Each registration
/// occupies a slot; unsubscribed slots are recycled via a free list, and the
/// per-slot generation counter is bumped on unsubscribe so that outstanding
/// tokens go stale immediately.
#[derive(Debug)]
pub struct LayoutListeners<L> {
    slots: Vec<Option<L>>,
    generation: Vec<u32>,
    free_list: Vec<u32>,
    len: u32,
    live: usize,
}

impl<L> Default for LayoutListeners<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> LayoutListeners<L> {
    /// Creates an empty subscription set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            live: 0,
        }
    }

    /// Subscribes `listener` and returns its token.
    pub fn subscribe(&mut self, listener: L) -> ListenerToken {
        self.subscribe_with(|_| listener)
    }

    /// Subscribes the listener built by `make`, which receives the token the
    /// registration will have.
    ///
    /// Use this when the listener needs to know its own token, e.g. to
    /// unsubscribe itself when it fires.
    pub fn subscribe_with(&mut self, make: impl FnOnce(ListenerToken) -> L) -> ListenerToken {
        let idx = if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.slots.push(None);
            self.generation.push(0);
            idx
        };

        let token = ListenerToken {
            idx,
            generation: self.generation[idx as usize],
        };
        self.slots[idx as usize] = Some(make(token));
        self.live += 1;
        token
    }

    /// Removes the registration identified by `token`.
    ///
    /// Returns `true` if the token was subscribed. Calling this again with the
    /// same token, or with a token from an earlier registration of the same
    /// slot, is a no-op that returns `false`.
    pub fn unsubscribe(&mut self, token: ListenerToken) -> bool {
        if !self.is_subscribed(token) {
            return false;
        }
        let idx = token.idx as usize;
        self.slots[idx] = None;
        // Bump generation so the token immediately fails validation.
        self.generation[idx] = self.generation[idx].wrapping_add(1);
        self.free_list.push(token.idx);
        self.live -= 1;
        true
    }

    /// Returns whether `token` refers to a live registration.
    #[must_use]
    pub fn is_subscribed(&self, token: ListenerToken) -> bool {
        token.idx < self.len
            && self.generation[token.idx as usize] == token.generation
            && self.slots[token.idx as usize].is_some()
    }

    /// Returns the listener registered under `token`, if it is still live.
    #[must_use]
    pub fn get(&self, token: ListenerToken) -> Option<&L> {
        if self.is_subscribed(token) {
            self.slots[token.idx as usize].as_ref()
        } else {
            None
        }
    }

    /// Returns the tokens of all live registrations, in slot order.
    ///
    /// The result is a snapshot; it stays valid to iterate while the set is
    /// mutated, but each token should be rechecked with
    /// [`is_subscribed`](Self::is_subscribed) before use.
    #[must_use]
    pub fn tokens(&self) -> Vec<ListenerToken> {
        let mut tokens = Vec::with_capacity(self.live);
        for (idx, slot) in (0..self.len).zip(&self.slots) {
            if slot.is_some() {
                tokens.push(ListenerToken {
                    idx,
                    generation: self.generation[idx as usize],
                });
            }
        }
        tokens
    }

    /// Returns the number of live registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns whether there are no live registrations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn subscribe_and_unsubscribe() {
        let mut set = LayoutListeners::new();
        let token = set.subscribe("overlay");
        assert!(set.is_subscribed(token));
        assert_eq!(set.get(token), Some(&"overlay"));
        assert_eq!(set.len(), 1);

        assert!(set.unsubscribe(token));
        assert!(!set.is_subscribed(token));
        assert_eq!(set.get(token), None);
        assert!(set.is_empty());
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let mut set = LayoutListeners::new();
        let token = set.subscribe(1_u8);
        assert!(set.unsubscribe(token));
        assert!(!set.unsubscribe(token));
        assert!(!set.unsubscribe(token));
        assert!(set.is_empty());
    }

    #[test]
    fn reused_slot_rejects_stale_token() {
        let mut set = LayoutListeners::new();
        let old = set.subscribe('a');
        set.unsubscribe(old);
        let new = set.subscribe('b');

        // Same slot, different generation.
        assert_eq!(old.index(), new.index());
        assert_ne!(old.generation(), new.generation());
        assert!(!set.is_subscribed(old));
        assert!(set.is_subscribed(new));

        // The stale token must not cancel the newer registration.
        assert!(!set.unsubscribe(old));
        assert_eq!(set.get(new), Some(&'b'));
    }

    #[test]
    fn subscribe_with_sees_own_token() {
        let mut set = LayoutListeners::new();
        let token = set.subscribe_with(|token| token);
        assert_eq!(set.get(token), Some(&token));
    }

    #[test]
    fn tokens_snapshot_survives_mutation() {
        let mut set = LayoutListeners::new();
        let a = set.subscribe(0_u32);
        let b = set.subscribe(1_u32);
        let c = set.subscribe(2_u32);
        set.unsubscribe(b);

        let snapshot = set.tokens();
        assert_eq!(snapshot, vec![a, c]);

        let mut seen = Vec::new();
        for token in snapshot {
            if !set.is_subscribed(token) {
                continue;
            }
            seen.push(token);
            // Removing a later entry mid-iteration must skip it, not crash.
            set.unsubscribe(c);
        }
        assert_eq!(seen, vec![a]);
    }
}
