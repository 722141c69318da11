//! Off-thread execution of AI gateway calls.
//!
//! Each request runs on its own short-lived thread and reports back over an
//! mpsc channel that the UI loop drains every tick.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use guardian_core::{Error, HealthGateway, MealAnalysis, Result};

/// Work for the gateway.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayRequest {
    AnalyzeMeal {
        description: String,
    },
    /// `view_session` identifies the assistant view session that sent it
    HealthAdvice {
        view_session: u64,
        prompt: String,
    },
}

/// Result of a finished gateway call.
#[derive(Debug)]
pub enum GatewayReply {
    MealAnalysis(Result<MealAnalysis>),
    HealthAdvice {
        view_session: u64,
        result: Result<String>,
    },
}

/// How requests are executed.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Dispatch {
    /// One background thread per request
    Threaded,
    /// On the caller's thread (tests)
    #[cfg_attr(not(test), allow(dead_code))]
    Inline,
}

/// Runs gateway calls and collects their replies.
pub struct GatewayWorker {
    gateway: Arc<dyn HealthGateway>,
    tx: Sender<GatewayReply>,
    rx: Receiver<GatewayReply>,
    dispatch: Dispatch,
}

impl GatewayWorker {
    pub fn new(gateway: Arc<dyn HealthGateway>) -> Self {
        Self::with_dispatch(gateway, Dispatch::Threaded)
    }

    /// Worker that runs calls synchronously; replies still go through the channel.
    #[cfg(test)]
    pub fn inline(gateway: Arc<dyn HealthGateway>) -> Self {
        Self::with_dispatch(gateway, Dispatch::Inline)
    }

    fn with_dispatch(gateway: Arc<dyn HealthGateway>, dispatch: Dispatch) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            gateway,
            tx,
            rx,
            dispatch,
        }
    }

    /// Start a request. The reply shows up in [`GatewayWorker::drain`].
    pub fn submit(&self, request: GatewayRequest) {
        tracing::debug!(?request, "Submitting gateway request");

        if self.dispatch == Dispatch::Inline {
            let _ = self.tx.send(execute(self.gateway.as_ref(), request));
            return;
        }

        let fallback = request.clone();
        let gateway = Arc::clone(&self.gateway);
        let tx = self.tx.clone();
        let spawned = std::thread::Builder::new()
            .name("gateway-call".to_string())
            .spawn(move || {
                // The receiver is gone only when the app is shutting down
                let _ = tx.send(execute(gateway.as_ref(), request));
            });

        if let Err(e) = spawned {
            tracing::error!(error = %e, "Failed to spawn gateway thread");
            let _ = self.tx.send(spawn_failure(&fallback, &e));
        }
    }

    /// Take every reply that has arrived so far.
    pub fn drain(&self) -> Vec<GatewayReply> {
        self.rx.try_iter().collect()
    }
}

fn execute(gateway: &dyn HealthGateway, request: GatewayRequest) -> GatewayReply {
    match request {
        GatewayRequest::AnalyzeMeal { description } => {
            GatewayReply::MealAnalysis(gateway.analyze_meal(&description))
        }
        GatewayRequest::HealthAdvice {
            view_session,
            prompt,
        } => GatewayReply::HealthAdvice {
            view_session,
            result: gateway.health_advice(&prompt),
        },
    }
}

/// Reply used when a request could not be started at all.
fn spawn_failure(request: &GatewayRequest, cause: &std::io::Error) -> GatewayReply {
    match request {
        GatewayRequest::AnalyzeMeal { .. } => {
            GatewayReply::MealAnalysis(Err(Error::Analysis(cause.to_string())))
        }
        GatewayRequest::HealthAdvice { view_session, .. } => GatewayReply::HealthAdvice {
            view_session: *view_session,
            result: Err(Error::Advice(cause.to_string())),
        },
    }
}
