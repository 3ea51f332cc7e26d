use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    /// Binding or configuring the queue failed; no packet may be processed.
    #[error("failed to {step} for queue {queue}: {source}")]
    QueueSetup {
        queue: u16,
        step: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("NFQUEUE is only available on Linux")]
    Unsupported,
}

impl DispatchError {
    pub(crate) fn setup(queue: u16, step: &'static str, source: std::io::Error) -> Self {
        Self::QueueSetup {
            queue,
            step,
            source,
        }
    }
}
