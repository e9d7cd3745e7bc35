//! TCP accept loop serving the chat pipeline.

use crate::http;
use crate::routes;
use core::fmt;
use quern_core::{ChatModel, EmbeddingModel, VectorStore};
use quern_rag::QueryPipeline;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::net::{TcpListener, TcpStream};

/// HTTP front end over a [`QueryPipeline`].
///
/// Each accepted connection is served on its own task. The pipeline is
/// shared read-only behind an [`Arc`], so handlers never contend on it.
pub struct Server<M, S, G> {
    listener: TcpListener,
    pipeline: Arc<QueryPipeline<M, S, G>>,
}

impl<M, S, G> fmt::Debug for Server<M, S, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Server")
            .field("listener", &self.listener)
            .finish_non_exhaustive()
    }
}

impl<M, S, G> Server<M, S, G>
where
    M: EmbeddingModel + 'static,
    S: VectorStore + 'static,
    G: ChatModel + 'static,
{
    /// Binds `addr` and prepares to serve `pipeline`.
    ///
    /// # Errors
    ///
    /// Fails when the address cannot be bound.
    pub async fn bind(addr: SocketAddr, pipeline: QueryPipeline<M, S, G>) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            pipeline: Arc::new(pipeline),
        })
    }

    /// Returns the bound address, which differs from the requested one when
    /// binding port 0.
    ///
    /// # Errors
    ///
    /// Fails when the listener's local address cannot be read.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts and serves connections until the listener fails.
    ///
    /// Per-connection errors are logged and do not stop the loop.
    ///
    /// # Errors
    ///
    /// Fails only when the listener's local address cannot be read at
    /// startup; accept errors are retried.
    pub async fn run(self) -> std::io::Result<()> {
        tracing::info!(addr = %self.listener.local_addr()?, "serving chat requests");
        loop {
            match self.listener.accept().await {
                Ok((stream, peer)) => {
                    let pipeline = Arc::clone(&self.pipeline);
                    tokio::spawn(async move {
                        tracing::debug!(%peer, "connection accepted");
                        handle_connection(stream, &pipeline).await;
                    });
                }
                Err(err) => tracing::warn!(error = %err, "failed to accept connection"),
            }
        }
    }
}

async fn handle_connection<M, S, G>(stream: TcpStream, pipeline: &QueryPipeline<M, S, G>)
where
    M: EmbeddingModel,
    S: VectorStore,
    G: ChatModel,
{
    let mut stream = BufReader::new(stream);
    let request = match http::read_request(&mut stream).await {
        Some(Ok(request)) => request,
        Some(Err(reason)) => {
            tracing::debug!(%reason, "rejecting request");
            let status = if reason.contains("too large") { 413 } else { 400 };
            http::write_response(&mut stream, &routes::json_error(status, &reason)).await;
            return;
        }
        None => return,
    };

    tracing::debug!(method = %request.method, path = %request.path, "handling request");
    let response = routes::route(&request, pipeline).await;
    http::write_response(&mut stream, &response).await;
}
