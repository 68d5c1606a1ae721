//! Test harness wiring the real client to the local stand-in.

use std::time::Duration;

use posts_conformance::{ConformanceSuite, Dataset, PostsClient};
use url::Url;

use super::stand_in::{self, Behavior};

/// A stand-in service bound to an ephemeral port, plus a client aimed at
/// it.
pub struct TestHarness {
    /// Client pointed at the stand-in.
    pub client: PostsClient,
    /// The dataset the stand-in serves.
    pub dataset: Dataset,
    budget: Duration,
}

impl TestHarness {
    /// Spawns the stand-in with default behavior.
    pub async fn spawn() -> Self {
        Self::spawn_with(Behavior::default()).await
    }

    /// Spawns the stand-in with the given behavior.
    pub async fn spawn_with(behavior: Behavior) -> Self {
        Self::spawn_with_budget(behavior, Duration::from_secs(5)).await
    }

    /// Spawns the stand-in with the given behavior and wall-clock budget.
    ///
    /// The client's own request timeout stays at 5 seconds so a short
    /// budget is reported as a deadline failure rather than a transport
    /// one.
    pub async fn spawn_with_budget(behavior: Behavior, budget: Duration) -> Self {
        let dataset = Dataset::canonical();
        let app = stand_in::router(dataset.clone(), behavior);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind stand-in listener");
        let addr = listener.local_addr().expect("listener has no local addr");
        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("stand-in server failed");
        });

        let base_url =
            Url::parse(&format!("http://{}", addr)).expect("stand-in address is a valid URL");
        let client = PostsClient::with_base_url(base_url, Duration::from_secs(5))
            .expect("failed to build client");

        Self {
            client,
            dataset,
            budget,
        }
    }

    /// Builds a conformance suite against the stand-in.
    pub fn suite(&self) -> ConformanceSuite {
        ConformanceSuite::new(self.client.clone(), self.dataset.clone(), self.budget)
    }
}
