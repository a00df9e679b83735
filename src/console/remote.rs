//! Lifecycle of one remote fetch within a screen activation

/// `Idle → Loading → {Ready | Failed}`
///
/// `Failed` is terminal: only [`RemoteState::begin`] on a fresh activation or
/// an explicit re-fetch returns to `Loading`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RemoteState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> RemoteState<T> {
    /// Start (or restart) a fetch
    pub fn begin(&mut self) {
        *self = RemoteState::Loading;
    }

    /// Store the outcome of the pending fetch.
    ///
    /// Returns false and leaves the state untouched when no fetch is pending.
    pub fn resolve(&mut self, outcome: Result<T, String>) -> bool {
        if !self.is_loading() {
            return false;
        }
        *self = match outcome {
            Ok(data) => RemoteState::Ready(data),
            Err(message) => RemoteState::Failed(message),
        };
        true
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RemoteState::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RemoteState::Failed(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            RemoteState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RemoteState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Busy guard of a create/update submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Busy,
}

impl SubmitState {
    /// Enter `Busy`; false if a submission is already in flight
    pub fn try_begin(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        *self = SubmitState::Busy;
        true
    }

    /// Return to `Idle`; true only for the call that ends the submission
    pub fn finish(&mut self) -> bool {
        if !self.is_busy() {
            return false;
        }
        *self = SubmitState::Idle;
        true
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, SubmitState::Busy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_to_ready() {
        let mut state: RemoteState<Vec<i32>> = RemoteState::default();
        assert_eq!(state, RemoteState::Idle);
        state.begin();
        assert!(state.is_loading());
        assert!(state.resolve(Ok(vec![1, 2])));
        assert_eq!(state.ready(), Some(&vec![1, 2]));
    }

    #[test]
    fn test_failed_is_terminal() {
        let mut state: RemoteState<i32> = RemoteState::default();
        state.begin();
        assert!(state.resolve(Err("Failed to fetch tags.".to_string())));
        assert!(!state.resolve(Ok(1)));
        assert_eq!(state.error(), Some("Failed to fetch tags."));
    }

    #[test]
    fn test_resolve_without_pending_fetch_is_ignored() {
        let mut state: RemoteState<i32> = RemoteState::default();
        assert!(!state.resolve(Ok(3)));
        assert_eq!(state, RemoteState::Idle);
    }

    #[test]
    fn test_submit_guard() {
        let mut submit = SubmitState::default();
        assert!(submit.try_begin());
        assert!(!submit.try_begin());
        assert!(submit.is_busy());
        assert!(submit.finish());
        assert!(!submit.finish());
        assert_eq!(submit, SubmitState::Idle);
    }
}
