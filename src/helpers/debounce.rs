use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Delivers the last value pushed once no newer push arrived for `delay`.
///
/// Every push clears the pending timer and arms a new one, so a site never has
/// more than one timer outstanding. Values that already fired are not recalled.
pub struct Debouncer<T> {
    delay: Duration,
    sender: mpsc::UnboundedSender<T>,
    receiver: mpsc::UnboundedReceiver<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            delay,
            sender,
            receiver,
            pending: None,
        }
    }

    pub fn push(&mut self, value: T) {
        self.clear();
        // A value that fired but was never taken is stale now.
        while self.receiver.try_recv().is_ok() {}
        let delay = self.delay;
        let sender = self.sender.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = sender.send(value);
        }));
    }

    pub fn clear(&mut self) {
        if let Some(timer) = self.pending.take() {
            timer.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().map_or(false, |t| !t.is_finished())
    }

    /// Waits for the next value to fire.
    pub async fn fired(&mut self) -> Option<T> {
        self.receiver.recv().await
    }

    /// A value that already fired, without waiting.
    pub fn try_fired(&mut self) -> Option<T> {
        self.receiver.try_recv().ok()
    }

    /// The value the last push settles on. Returns `None` right away when
    /// nothing was pushed since the last value was taken.
    pub async fn settled(&mut self) -> Option<T> {
        // Checked first: a timer that finishes after this has already queued its value.
        let pending = self.is_pending();
        match self.try_fired() {
            Some(value) => Some(value),
            None if pending => self.fired().await,
            None => None,
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(timer) = self.pending.take() {
            timer.abort();
        }
    }
}
