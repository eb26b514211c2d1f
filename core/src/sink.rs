//! Token delivery between the driver loop and its consumer.
//!
//! The producer half ([`Sink`]) lives inside the lexer; the consumer half
//! ([`Tokens`]) is what `Lexer::start` and `Lexer::start_sync` hand back.
//!
//! - **Synchronous**: the driver runs to completion first, so tokens collect
//!   in an in-memory queue that grows instead of blocking.
//! - **Asynchronous**: the driver runs on a worker thread feeding a bounded
//!   `tokio::sync::mpsc` channel. The worker blocks while the channel is full
//!   and the consumer blocks (or awaits) while it is empty.
//!
//! Both halves preserve emission order exactly.

use std::collections::VecDeque;
use std::thread::JoinHandle;

use tokio::sync::mpsc;

use crate::{ContextError, Error, Token};

/// Producer half of the token buffer.
pub(crate) enum Sink<K> {
    Buffered(VecDeque<Token<K>>),
    Channel {
        tx: mpsc::Sender<Token<K>>,
        dropped: bool,
    },
    Closed,
}

impl<K> Sink<K> {
    pub(crate) fn buffered() -> Self {
        Sink::Buffered(VecDeque::new())
    }

    pub(crate) fn channel(tx: mpsc::Sender<Token<K>>) -> Self {
        Sink::Channel { tx, dropped: false }
    }

    /// Grows a buffered sink so `capacity` tokens fit without reallocating.
    pub(crate) fn reserve(&mut self, capacity: usize) {
        if let Sink::Buffered(queue) = self {
            queue.reserve(capacity.saturating_sub(queue.len()));
        }
    }

    /// Appends a token, blocking while a channel is full.
    ///
    /// Once the consumer has gone away tokens are discarded; the driver loop
    /// keeps running until its state chain terminates.
    pub(crate) fn push(&mut self, token: Token<K>) {
        match self {
            Sink::Buffered(queue) => queue.push_back(token),
            Sink::Channel { tx, dropped } => {
                if *dropped {
                    return;
                }
                if tx.blocking_send(token).is_err() {
                    *dropped = true;
                    tracing::debug!("token consumer dropped, discarding further tokens");
                }
            }
            Sink::Closed => {
                tracing::trace!("token emitted after the sink was closed");
            }
        }
    }

    /// Takes whatever a buffered sink holds.
    pub(crate) fn take_buffered(&mut self) -> VecDeque<Token<K>> {
        match self {
            Sink::Buffered(queue) => std::mem::take(queue),
            _ => VecDeque::new(),
        }
    }

    /// Closes a channel sink so the consumer observes the end of the stream.
    /// Buffered sinks keep their queue for hand-off.
    pub(crate) fn close(&mut self) {
        if let Sink::Channel { .. } = self {
            *self = Sink::Closed;
        }
    }
}

enum Queue<K> {
    Buffered(VecDeque<Token<K>>),
    Channel(mpsc::Receiver<Token<K>>),
}

/// Consumer half of a lexer's output.
///
/// Yields tokens in emission order. Once the stream reports its end
/// ([`next_token`](Self::next_token) returns `None`), the lexer's last
/// recorded error is available through [`error`](Self::error).
///
/// # Example
///
/// ```ignore
/// let mut tokens = Lexer::new(src, lex_start).start();
/// while let Some(token) = tokens.next_token() {
///     println!("{:?} {:?}", token.kind(), token.value());
/// }
/// if let Some(err) = tokens.error() {
///     eprintln!("{err}");
/// }
/// ```
pub struct Tokens<K> {
    queue: Queue<K>,
    worker: Option<JoinHandle<Option<ContextError>>>,
    error: Option<ContextError>,
    failure: Option<Error>,
    done: bool,
}

impl<K> Tokens<K> {
    pub(crate) fn buffered(queue: VecDeque<Token<K>>, error: Option<ContextError>) -> Self {
        Self {
            queue: Queue::Buffered(queue),
            worker: None,
            error,
            failure: None,
            done: false,
        }
    }

    pub(crate) fn channel(
        rx: mpsc::Receiver<Token<K>>,
        worker: Result<JoinHandle<Option<ContextError>>, std::io::Error>,
    ) -> Self {
        let (worker, failure) = match worker {
            Ok(handle) => (Some(handle), None),
            Err(err) => (None, Some(Error::Spawn(err))),
        };
        Self {
            queue: Queue::Channel(rx),
            worker,
            error: None,
            failure,
            done: false,
        }
    }

    /// Returns the next token, blocking until one is available.
    ///
    /// `None` means the lexer terminated and every token was delivered.
    ///
    /// # Panics
    ///
    /// Blocking inside an async runtime panics; use [`recv`](Self::recv)
    /// there instead.
    pub fn next_token(&mut self) -> Option<Token<K>> {
        if self.done {
            return None;
        }
        let next = match &mut self.queue {
            Queue::Buffered(queue) => queue.pop_front(),
            Queue::Channel(rx) => rx.blocking_recv(),
        };
        if next.is_none() {
            self.complete();
        }
        next
    }

    /// Async counterpart of [`next_token`](Self::next_token).
    ///
    /// Observing the end of a worker-driven stream joins the worker thread,
    /// which briefly blocks the calling executor thread.
    pub async fn recv(&mut self) -> Option<Token<K>> {
        if self.done {
            return None;
        }
        let next = match &mut self.queue {
            Queue::Buffered(queue) => queue.pop_front(),
            Queue::Channel(rx) => rx.recv().await,
        };
        if next.is_none() {
            self.complete();
        }
        next
    }

    /// True once the end of the stream has been observed.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// The lexer's last recorded error.
    ///
    /// For a worker-driven stream this stays `None` until the end of the
    /// stream has been observed.
    #[inline]
    pub fn error(&self) -> Option<&ContextError> {
        self.error.as_ref()
    }

    /// Drains remaining tokens and reports how the lexer finished.
    pub fn finish(mut self) -> Result<(), Error> {
        while self.next_token().is_some() {}
        if let Some(failure) = self.failure.take() {
            return Err(failure);
        }
        match self.error.take() {
            Some(err) => Err(Error::Lex(err)),
            None => Ok(()),
        }
    }

    /// Collects every token, failing if the lexer recorded an error.
    pub fn collect_all(mut self) -> Result<Vec<Token<K>>, Error> {
        let tokens: Vec<Token<K>> = self.by_ref().collect();
        self.finish().map(|()| tokens)
    }

    /// Joins the worker once its channel has closed. The sender is dropped
    /// just before the worker returns, so the join is brief, but it is a
    /// blocking `JoinHandle::join`: when reached from `recv` or `poll_next`
    /// it blocks the executor thread until the worker exits.
    fn complete(&mut self) {
        self.done = true;
        if let Some(worker) = self.worker.take() {
            match worker.join() {
                Ok(error) => self.error = error,
                Err(_) => self.failure = Some(Error::WorkerPanicked),
            }
        }
    }
}

impl<K> Iterator for Tokens<K> {
    type Item = Token<K>;

    #[inline]
    fn next(&mut self) -> Option<Token<K>> {
        self.next_token()
    }
}

impl<K> core::fmt::Debug for Tokens<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mode = match self.queue {
            Queue::Buffered(_) => "sync",
            Queue::Channel(_) => "async",
        };
        f.debug_struct("Tokens")
            .field("mode", &mode)
            .field("done", &self.done)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "futures")]
mod futures_impl {
    //! `Stream` adapter (runtime-agnostic).

    use core::pin::Pin;
    use core::task::{Context, Poll};

    use futures_core::Stream;

    use super::{Queue, Tokens};
    use crate::Token;

    impl<K: Unpin> Stream for Tokens<K> {
        type Item = Token<K>;

        fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
            let this = self.get_mut();
            if this.done {
                return Poll::Ready(None);
            }
            let next = match &mut this.queue {
                Queue::Buffered(queue) => queue.pop_front(),
                Queue::Channel(rx) => match rx.poll_recv(cx) {
                    Poll::Ready(next) => next,
                    Poll::Pending => return Poll::Pending,
                },
            };
            if next.is_none() {
                this.complete();
            }
            Poll::Ready(next)
        }
    }
}
