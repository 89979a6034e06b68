use crate::error::BoxError;

pub type UpdateFn<T> = Box<dyn FnOnce(&T) -> Result<T, BoxError> + Send>;

pub type ConsumeFn<T> = Box<dyn FnOnce(T) -> Result<(), BoxError> + Send>;

/// A message in an agent's mailbox.
///
/// Messages are applied strictly one at a time, in the order they were enqueued.
pub enum Message<T> {
    /// Replace the state.
    SetValue(T),

    /// Replace the state with the function's result. The function only borrows
    /// the state, so when it fails the previous state is kept.
    UpdateFn(UpdateFn<T>),

    /// Hand a snapshot of the state to a callback. Never changes the state.
    ConsumeFn(ConsumeFn<T>),
}

impl<T> Message<T> {
    pub fn update<F>(f: F) -> Self
    where
        F: FnOnce(&T) -> T + Send + 'static,
    {
        Message::UpdateFn(Box::new(move |state| Ok(f(state))))
    }

    pub fn try_update<F, E>(f: F) -> Self
    where
        F: FnOnce(&T) -> Result<T, E> + Send + 'static,
        E: Into<BoxError>,
    {
        Message::UpdateFn(Box::new(move |state| f(state).map_err(Into::into)))
    }

    pub fn consume<F>(f: F) -> Self
    where
        F: FnOnce(T) + Send + 'static,
    {
        Message::ConsumeFn(Box::new(move |snapshot| {
            f(snapshot);
            Ok(())
        }))
    }

    pub fn try_consume<F, E>(f: F) -> Self
    where
        F: FnOnce(T) -> Result<(), E> + Send + 'static,
        E: Into<BoxError>,
    {
        Message::ConsumeFn(Box::new(move |snapshot| f(snapshot).map_err(Into::into)))
    }
}

impl<T> std::fmt::Debug for Message<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Message::SetValue(_) => f.write_str("SetValue"),
            Message::UpdateFn(_) => f.write_str("UpdateFn"),
            Message::ConsumeFn(_) => f.write_str("ConsumeFn"),
        }
    }
}
