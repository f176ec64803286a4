//! Point-to-point links between neighboring workers
//!
//! Each link of the chain is a rendezvous channel: a send blocks until
//! the downstream worker takes the value, so at most one value is ever in
//! flight per link and a slow consumer stalls its producer one item at a
//! time. Values on a link are received in exactly the order they were
//! sent.
//!
//! Ports carry the ranks of the link's two endpoints so a broken link is
//! reported against the topology, not as an anonymous channel error. A
//! disconnect (peer thread died) is fatal; a peer that simply never sends
//! blocks the caller indefinitely.

use crate::error::{PipelineError, Result};
use crate::topology;
use crossbeam_channel::{bounded, Receiver, Sender};

/// Sending half of a link, held by the upstream worker
pub struct SendPort {
    from: usize,
    to: usize,
    tx: Sender<f64>,
}

impl SendPort {
    /// Block until the downstream worker has taken `value`
    pub fn send(&self, value: f64) -> Result<()> {
        self.tx
            .send(value)
            .map_err(|_| PipelineError::transport(self.from, self.to, "receiver dropped"))
    }

    /// Rank of the downstream worker
    pub fn to(&self) -> usize {
        self.to
    }
}

/// Receiving half of a link, held by the downstream worker
pub struct RecvPort {
    from: usize,
    to: usize,
    rx: Receiver<f64>,
}

impl RecvPort {
    /// Block until the upstream worker sends a value
    pub fn recv(&self) -> Result<f64> {
        self.rx
            .recv()
            .map_err(|_| PipelineError::transport(self.from, self.to, "sender dropped"))
    }

    /// Rank of the upstream worker
    pub fn from(&self) -> usize {
        self.from
    }
}

/// Create the link from rank `from` to rank `to`
pub fn link(from: usize, to: usize) -> (SendPort, RecvPort) {
    // Rendezvous channel: capacity 0 keeps exactly one value in flight.
    let (tx, rx) = bounded(0);
    (SendPort { from, to, tx }, RecvPort { from, to, rx })
}

/// A worker's view of the chain: its rank and its two port halves
pub struct Endpoint {
    pub rank: usize,
    pub inbound: Option<RecvPort>,
    pub outbound: Option<SendPort>,
}

/// Wire the links of a linear chain and hand each rank its endpoint
///
/// Rank k sends to rank k+1 for every interior link; the head has no
/// inbound port and the tail no outbound one. A single-worker chain has
/// no links at all.
pub fn chain(total: usize) -> Vec<Endpoint> {
    let mut endpoints: Vec<Endpoint> = (0..total)
        .map(|rank| Endpoint {
            rank,
            inbound: None,
            outbound: None,
        })
        .collect();

    for from in 0..total.saturating_sub(1) {
        let to = from + 1;
        let (tx, rx) = link(from, to);
        endpoints[from].outbound = Some(tx);
        endpoints[to].inbound = Some(rx);
    }

    endpoints
}

/// Check an endpoint's wiring against the chain topology
pub fn validate_endpoint(endpoint: &Endpoint, total: usize) -> Result<()> {
    topology::validate_topology(endpoint.rank, total)?;

    let (expect_in, expect_out) = topology::neighbors(endpoint.rank, total);
    if endpoint.inbound.as_ref().map(|p| p.from()) != expect_in {
        return Err(PipelineError::Topology(format!(
            "rank {} has a mis-wired inbound link",
            endpoint.rank
        )));
    }
    if endpoint.outbound.as_ref().map(|p| p.to()) != expect_out {
        return Err(PipelineError::Topology(format!(
            "rank {} has a mis-wired outbound link",
            endpoint.rank
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_delivers_in_order() {
        let (tx, rx) = link(0, 1);

        let sender = std::thread::spawn(move || {
            for i in 0..100 {
                tx.send(i as f64).unwrap();
            }
        });

        for i in 0..100 {
            assert_eq!(rx.recv().unwrap(), i as f64);
        }
        sender.join().unwrap();
    }

    #[test]
    fn test_send_fails_when_receiver_dropped() {
        let (tx, rx) = link(1, 2);
        drop(rx);

        let err = tx.send(1.0).unwrap_err();
        assert!(err.to_string().contains("1 -> 2"));
    }

    #[test]
    fn test_recv_fails_when_sender_dropped() {
        let (tx, rx) = link(0, 1);
        drop(tx);

        assert!(rx.recv().is_err());
    }

    #[test]
    fn test_chain_wiring() {
        let endpoints = chain(4);
        assert_eq!(endpoints.len(), 4);

        assert!(endpoints[0].inbound.is_none());
        assert_eq!(endpoints[0].outbound.as_ref().unwrap().to(), 1);

        assert_eq!(endpoints[2].inbound.as_ref().unwrap().from(), 1);
        assert_eq!(endpoints[2].outbound.as_ref().unwrap().to(), 3);

        assert_eq!(endpoints[3].inbound.as_ref().unwrap().from(), 2);
        assert!(endpoints[3].outbound.is_none());

        for endpoint in &endpoints {
            assert!(validate_endpoint(endpoint, 4).is_ok());
        }
    }

    #[test]
    fn test_single_worker_chain_has_no_links() {
        let endpoints = chain(1);
        assert_eq!(endpoints.len(), 1);
        assert!(endpoints[0].inbound.is_none());
        assert!(endpoints[0].outbound.is_none());
        assert!(validate_endpoint(&endpoints[0], 1).is_ok());
    }

    #[test]
    fn test_validate_endpoint_rejects_miswired_link() {
        // Wire rank 2's inbound from rank 0 instead of rank 1.
        let (_tx, rx) = link(0, 2);
        let endpoint = Endpoint {
            rank: 2,
            inbound: Some(rx),
            outbound: None,
        };
        assert!(validate_endpoint(&endpoint, 3).is_err());
    }
}
