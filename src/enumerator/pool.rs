//! Bounded resolution worker pool.
//!
//! A fixed set of long-lived workers consumes candidate hostnames from a
//! shared queue, so pool construction cost is paid once per enumerator, not
//! once per enumeration call. The worker count bounds simultaneous
//! outstanding resolutions regardless of candidate-set size.

use std::sync::Arc;

use log::debug;
use tokio::sync::{mpsc, Mutex};

use crate::error_handling::EnumerationError;
use crate::models::EnumerationResult;
use crate::resolver::HostResolver;

pub(crate) struct Job {
    pub hostname: String,
    pub reply: mpsc::UnboundedSender<EnumerationResult>,
}

pub(crate) struct WorkerPool {
    jobs: mpsc::Sender<Job>,
}

impl WorkerPool {
    /// Spawns `workers` resolution tasks sharing one job queue.
    pub fn new<R: HostResolver + 'static>(
        resolver: Arc<R>,
        workers: usize,
    ) -> Result<Self, EnumerationError> {
        if workers == 0 {
            return Err(EnumerationError::EmptyPool);
        }

        let (jobs, rx) = mpsc::channel::<Job>(workers * 2);
        let rx = Arc::new(Mutex::new(rx));

        for id in 0..workers {
            let rx = Arc::clone(&rx);
            let resolver = Arc::clone(&resolver);
            tokio::spawn(async move {
                loop {
                    // Hold the queue lock only while receiving; resolution
                    // runs with the lock released.
                    let job = { rx.lock().await.recv().await };
                    let Some(job) = job else { break };

                    let addresses = resolver.resolve_host(&job.hostname, "A").await;
                    if !addresses.is_empty() {
                        let _ = job.reply.send(EnumerationResult {
                            hostname: job.hostname,
                            addresses,
                        });
                    }
                }
                debug!("resolution worker {id} stopped");
            });
        }

        Ok(WorkerPool { jobs })
    }

    /// Queues one candidate. Blocks when the queue is full, which keeps
    /// submission paced to what the workers can drain.
    pub async fn submit(&self, hostname: String, reply: mpsc::UnboundedSender<EnumerationResult>) {
        let _ = self.jobs.send(Job { hostname, reply }).await;
    }
}
