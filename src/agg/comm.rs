use tokio::sync::{mpsc, oneshot};
use tokio_stream::{StreamExt, wrappers::ReceiverStream};

use crate::error::{Error, Result};

use super::{GlobalSum, PartialSum, Payload};

enum Role {
    Coordinator {
        broadcast: Option<Vec<oneshot::Sender<Payload>>>,
        partials: mpsc::Receiver<PartialSum>,
    },
    Member {
        broadcast: Option<oneshot::Receiver<Payload>>,
        partials: mpsc::Sender<PartialSum>,
    },
}

/// One participant's handle on the group's two collective operations.
///
/// Dropping an endpoint before taking part in a collective makes that
/// collective fail with [`Error::Aborted`] for the peers waiting on it.
pub struct Endpoint {
    rank: usize,
    size: usize,
    role: Role,
}

/// Builds a group of `size` connected endpoints. Endpoint 0 is the
/// coordinator.
pub fn group(size: usize) -> Vec<Endpoint> {
    if size == 0 {
        return vec![];
    }
    let (partial_tx, partial_rx) = mpsc::channel(size);
    let mut senders = Vec::with_capacity(size - 1);
    let mut members = Vec::with_capacity(size - 1);
    for rank in 1..size {
        let (tx, rx) = oneshot::channel();
        senders.push(tx);
        members.push(Endpoint {
            rank,
            size,
            role: Role::Member {
                broadcast: Some(rx),
                partials: partial_tx.clone(),
            },
        });
    }
    let coordinator = Endpoint {
        rank: 0,
        size,
        role: Role::Coordinator {
            broadcast: Some(senders),
            partials: partial_rx,
        },
    };
    std::iter::once(coordinator).chain(members).collect()
}

impl Endpoint {
    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_coordinator(&self) -> bool {
        matches!(self.role, Role::Coordinator { .. })
    }

    /// One-shot broadcast from the coordinator. The coordinator passes
    /// `Some(value)`; members pass `None` and wait for the value.
    pub async fn broadcast(&mut self, value: Option<Payload>) -> Result<Payload> {
        match &mut self.role {
            Role::Coordinator { broadcast, .. } => {
                let value = value.ok_or(Error::Collective("coordinator has no value to broadcast"))?;
                let senders = broadcast.take().ok_or(Error::Collective("broadcast already performed"))?;
                for tx in senders {
                    // a member that is already gone finds out at the reduce
                    let _ = tx.send(value);
                }
                Ok(value)
            }
            Role::Member { broadcast, .. } => {
                let rx = broadcast.take().ok_or(Error::Collective("broadcast already performed"))?;
                rx.await.map_err(|_| Error::Aborted)
            }
        }
    }

    /// Sum-reduce to the coordinator, which gets `Some(total)`; members get
    /// `None` once their partial sum is handed over.
    pub async fn reduce(self, local: PartialSum) -> Result<Option<GlobalSum>> {
        match self.role {
            Role::Coordinator { partials, .. } => {
                let expected = self.size - 1;
                let mut total = GlobalSum::from(local);
                let mut received = 0;
                let mut partials = ReceiverStream::new(partials).take(expected);
                while let Some(p) = partials.next().await {
                    total += p;
                    received += 1;
                }
                if received < expected {
                    log::warn!("reduce got {} of {} partial sums", received, expected);
                    return Err(Error::Aborted);
                }
                Ok(Some(total))
            }
            Role::Member { partials, .. } => {
                partials.send(local).await.map_err(|_| Error::Aborted)?;
                Ok(None)
            }
        }
    }
}
