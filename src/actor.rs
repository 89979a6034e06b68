use futures::Stream;

/// A unit of state that runs on its own task and only talks to the outside
/// through its inbox.
///
/// `run` owns `self` for the whole life of the actor; it returns when the inbox
/// ends or when the actor decides to stop.
#[trait_variant::make(Send)]
pub trait Actor: Sized + Send + 'static {
    type Message: Send + 'static;

    async fn run(self, inbox: impl Inbox<Item = Self::Message>);
}

/// Where an actor receives its messages from: any `Send` stream.
pub trait Inbox: Stream + Send {}

impl<S: Stream + Send> Inbox for S {}
