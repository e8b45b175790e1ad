/// Identifies one `show` of an [`Ephemeral`] slot.
///
/// Deferred dismissals hold a ticket instead of clearing unconditionally, so a
/// timer armed for an older value cannot clear a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// A single-value slot whose every `show` bumps a generation counter.
#[derive(Debug, Clone)]
pub struct Ephemeral<T> {
    value: Option<T>,
    generation: u64,
}

impl<T> Default for Ephemeral<T> {
    fn default() -> Self {
        Self {
            value: None,
            generation: 0,
        }
    }
}

impl<T> Ephemeral<T> {
    /// Replace whatever is showing and return the ticket for this generation.
    pub fn show(&mut self, value: T) -> Ticket {
        self.generation += 1;
        self.value = Some(value);
        Ticket(self.generation)
    }

    pub fn hide(&mut self) {
        self.value = None;
    }

    /// Clear only if nothing has been shown since `ticket` was issued.
    /// Returns whether the slot was cleared.
    pub fn dismiss(&mut self, ticket: Ticket) -> bool {
        if ticket.0 == self.generation && self.value.is_some() {
            self.value = None;
            true
        } else {
            false
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.value.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_then_dismiss_with_current_ticket() {
        let mut slot = Ephemeral::default();
        let ticket = slot.show("saved");
        assert_eq!(slot.get(), Some(&"saved"));
        assert!(slot.dismiss(ticket));
        assert!(!slot.is_active());
    }

    #[test]
    fn stale_ticket_does_not_clear_newer_value() {
        let mut slot = Ephemeral::default();
        let first = slot.show("first");
        let second = slot.show("second");
        assert!(!slot.dismiss(first));
        assert_eq!(slot.get(), Some(&"second"));
        assert!(slot.dismiss(second));
        assert_eq!(slot.get(), None);
    }

    #[test]
    fn dismiss_after_hide_is_a_no_op() {
        let mut slot = Ephemeral::default();
        let ticket = slot.show(());
        slot.hide();
        assert!(!slot.dismiss(ticket));
    }
}
