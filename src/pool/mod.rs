//! Shared node pool: health registry and round-robin cursor.
//!
//! One pool instance is owned by the client and shared by every logical
//! call. The mutex is held only to pick a node or flip a health flag,
//! never across network I/O or backoff sleeps.

mod select;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::config::NodeConfig;

/// Identifies a node within the pool: the out-of-band preferred node, or a
/// regular node by its configured position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeId {
    Nearest,
    Pool(usize),
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeId::Nearest => write!(f, "nearest_node"),
            NodeId::Pool(i) => write!(f, "{}", i),
        }
    }
}

/// A node chosen for one attempt. The endpoint is cloned out of the pool
/// so no lock is held while the request is on the wire.
#[derive(Debug, Clone)]
pub struct SelectedNode {
    pub id: NodeId,
    pub config: NodeConfig,
}

/// Dispatcher-owned metadata for one endpoint.
#[derive(Debug)]
struct NodeState {
    config: NodeConfig,
    is_healthy: bool,
    last_check: Instant,
}

impl NodeState {
    fn new(config: NodeConfig) -> Self {
        Self {
            config,
            is_healthy: true,
            last_check: Instant::now(),
        }
    }

    /// True when the last health determination is older than the recheck
    /// interval, making the node eligible again despite being unhealthy.
    fn due_for_healthcheck(&self, interval: Duration) -> bool {
        self.last_check.elapsed() > interval
    }
}

struct PoolInner {
    nodes: Vec<NodeState>,
    nearest: Option<NodeState>,
    /// Round-robin cursor; points at the last node returned and persists
    /// across logical calls.
    cursor: usize,
}

/// Registry of all endpoints with their current health view.
pub struct NodePool {
    inner: Mutex<PoolInner>,
    healthcheck_interval: Duration,
}

impl NodePool {
    /// Build a pool from validated configuration. Every node starts healthy.
    pub fn new(
        nodes: Vec<NodeConfig>,
        nearest: Option<NodeConfig>,
        healthcheck_interval: Duration,
    ) -> Arc<Self> {
        let cursor = nodes.len().saturating_sub(1);
        Arc::new(Self {
            inner: Mutex::new(PoolInner {
                nodes: nodes.into_iter().map(NodeState::new).collect(),
                nearest: nearest.map(NodeState::new),
                cursor,
            }),
            healthcheck_interval,
        })
    }

    /// Set a node's health flag and stamp its last-check time.
    pub fn mark(&self, id: NodeId, is_healthy: bool) {
        let mut inner = self.lock();
        let node = match id {
            NodeId::Nearest => inner.nearest.as_mut(),
            NodeId::Pool(i) => inner.nodes.get_mut(i),
        };
        if let Some(node) = node {
            node.is_healthy = is_healthy;
            node.last_check = Instant::now();
            tracing::debug!(node = %id, healthy = is_healthy, "node health updated");
        }
    }

    /// Current health flag for a node (staleness not considered).
    pub fn is_healthy(&self, id: NodeId) -> bool {
        let inner = self.lock();
        match id {
            NodeId::Nearest => inner.nearest.as_ref().map_or(false, |n| n.is_healthy),
            NodeId::Pool(i) => inner.nodes.get(i).map_or(false, |n| n.is_healthy),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PoolInner> {
        // Health flags and the cursor stay usable after a writer panic.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
