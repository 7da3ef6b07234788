// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::Scrape;
use crate::error::ExporterError;
use crate::metrics::{GaugeFamily, MetricSection};

/// Label for jobs whose worker is not in `WorkerStats`.
const UNKNOWN_WORKER: &str = "unknown";

/// Every running job, valued with how long it has been running at scrape start.
pub(super) async fn collect(
    scrape: &Scrape<'_>,
    out: &mut MetricSection,
) -> Result<(), ExporterError> {
    let stats = scrape.miner.worker_stats().await?;
    let jobs = scrape.miner.worker_jobs().await?;

    let mut job_family = GaugeFamily::new(
        "miner_worker_job",
        "Job running on a worker, value is its duration in seconds",
    );
    for (worker, jobs) in &jobs {
        let worker_host = stats
            .get(worker)
            .map(|it| it.info.hostname.as_str())
            .filter(|it| !it.is_empty())
            .unwrap_or(UNKNOWN_WORKER);
        for job in jobs {
            let running_for = (scrape.started_at - job.start).num_seconds();
            job_family.push(
                scrape
                    .labels()
                    .with("job_id", &job.id.id)
                    .with("worker_host", worker_host)
                    .with("task", &job.task)
                    .with("sector_id", job.sector.number)
                    .with("job_start_time", job.start.to_rfc3339())
                    .with("run_wait", job.run_wait),
                running_for,
            );
        }
    }
    out.add(job_family);
    Ok(())
}
