//! Node selection: preferred-node short-circuit, then health-aware
//! round-robin with an optimistic fallback.

use super::{NodeId, NodePool, SelectedNode};

impl NodePool {
    /// Pick the node to target for the next attempt.
    ///
    /// The preferred node, when configured, short-circuits the rotation
    /// while it is healthy or due for a recheck. Otherwise the cursor
    /// advances through the pool, at most one full sweep, returning the
    /// first node that is healthy or stale. If the sweep finds neither,
    /// the last node examined is returned anyway: health data may be
    /// outdated, and attempting a request beats failing fast.
    pub fn select(&self) -> SelectedNode {
        let mut inner = self.lock();

        if let Some(nearest) = inner.nearest.as_ref() {
            if nearest.is_healthy || nearest.due_for_healthcheck(self.healthcheck_interval) {
                tracing::debug!(node = %NodeId::Nearest, "using nearest node");
                return SelectedNode {
                    id: NodeId::Nearest,
                    config: nearest.config.clone(),
                };
            }
            tracing::debug!("nearest node unhealthy, falling back to node rotation");
        }

        let len = inner.nodes.len();
        for _ in 0..len {
            inner.cursor = (inner.cursor + 1) % len;
            let candidate = &inner.nodes[inner.cursor];
            if candidate.is_healthy || candidate.due_for_healthcheck(self.healthcheck_interval) {
                tracing::debug!(node = inner.cursor, "selected node");
                return SelectedNode {
                    id: NodeId::Pool(inner.cursor),
                    config: candidate.config.clone(),
                };
            }
        }

        // No node is healthy or stale; return the node under the cursor
        // and let the attempt itself re-probe it.
        tracing::debug!(node = inner.cursor, "no healthy node, trying next node anyway");
        SelectedNode {
            id: NodeId::Pool(inner.cursor),
            config: inner.nodes[inner.cursor].config.clone(),
        }
    }
}
