//! Lazy-load state for per-instance caches.

/// Progress of a value that is computed at most once per owner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState<T> {
    #[default]
    Unloaded,
    /// The value is being computed; seeing this again means re-entry.
    Loading,
    Loaded(T),
}

impl<T> LoadState<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The loaded value, if any.
    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::Unloaded | Self::Loading => None,
        }
    }

    /// Replace the state with `Loaded(value)` and return a reference to it.
    pub fn set(&mut self, value: T) -> &mut T {
        *self = Self::Loaded(value);
        match self {
            Self::Loaded(value) => value,
            Self::Unloaded | Self::Loading => unreachable!("state was just set to Loaded"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unloaded() {
        let state: LoadState<u8> = LoadState::default();
        assert!(!state.is_loaded());
        assert!(!state.is_loading());
        assert_eq!(state.get(), None);
    }

    #[test]
    fn set_marks_loaded() {
        let mut state = LoadState::Loading;
        assert_eq!(*state.set(7), 7);
        assert!(state.is_loaded());
        assert_eq!(state.get(), Some(&7));
    }
}
