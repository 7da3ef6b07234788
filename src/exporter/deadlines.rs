// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::Scrape;
use crate::deadlines::{ChainDeadlines, DeadlineAggregate, ProvingSchedule, aggregate};
use crate::error::ExporterError;
use crate::metrics::{GaugeFamily, Labels, MetricSection};
use futures::TryStreamExt as _;

/// One gauge per [`DeadlineAggregate`] field.
struct DeadlineFamilies {
    active_start: GaugeFamily,
    partitions: GaugeFamily,
    partitions_proven: GaugeFamily,
    sectors_all: GaugeFamily,
    sectors_recovering: GaugeFamily,
    sectors_faulty: GaugeFamily,
    sectors_active: GaugeFamily,
    sectors_live: GaugeFamily,
}

impl DeadlineFamilies {
    fn new() -> Self {
        Self {
            active_start: GaugeFamily::new(
                "miner_deadline_active_start",
                "Seconds until the deadline window opens",
            ),
            partitions: GaugeFamily::new(
                "miner_deadline_active_partitions",
                "Number of partitions in the deadline",
            ),
            partitions_proven: GaugeFamily::new(
                "miner_deadline_active_partitions_proven",
                "Number of partitions already proven in the current window",
            ),
            sectors_all: GaugeFamily::new(
                "miner_deadline_active_sectors_all",
                "Number of sectors in the deadline",
            ),
            sectors_recovering: GaugeFamily::new(
                "miner_deadline_active_sectors_recovering",
                "Number of recovering sectors",
            ),
            sectors_faulty: GaugeFamily::new(
                "miner_deadline_active_sectors_faulty",
                "Number of faulty sectors",
            ),
            sectors_active: GaugeFamily::new(
                "miner_deadline_active_sectors_active",
                "Number of active sectors",
            ),
            sectors_live: GaugeFamily::new(
                "miner_deadline_active_sectors_live",
                "Number of live sectors",
            ),
        }
    }

    fn push(&mut self, labels: Labels, it: &DeadlineAggregate) {
        let labels = labels.with("index", it.index);
        self.active_start.push(labels.clone(), it.seconds_until_open);
        self.partitions.push(labels.clone(), it.partitions);
        self.partitions_proven.push(labels.clone(), it.proven_partitions);
        self.sectors_all.push(labels.clone(), it.all_sectors);
        self.sectors_recovering.push(labels.clone(), it.recovering_sectors);
        self.sectors_faulty.push(labels.clone(), it.faulty_sectors);
        self.sectors_active.push(labels.clone(), it.active_sectors);
        self.sectors_live.push(labels, it.live_sectors);
    }

    fn add_to(self, out: &mut MetricSection) {
        out.add(self.active_start)
            .add(self.partitions)
            .add(self.partitions_proven)
            .add(self.sectors_all)
            .add(self.sectors_recovering)
            .add(self.sectors_faulty)
            .add(self.sectors_active)
            .add(self.sectors_live);
    }
}

/// The proving schedule, then one row per non-empty deadline in the order
/// their windows open. Deadlines aggregated before a failure are kept.
pub(super) async fn collect(
    scrape: &Scrape<'_>,
    out: &mut MetricSection,
) -> Result<(), ExporterError> {
    let info = scrape
        .node
        .state_miner_proving_deadline(scrape.miner_id())
        .await?;
    let schedule = ProvingSchedule::try_from(&info)?;

    let mut info_family = GaugeFamily::new(
        "miner_deadline_info",
        "Current deadline and WindowPoSt parameters, value is always 1",
    );
    info_family.push(
        scrape
            .labels()
            .with("current_idx", schedule.index())
            .with("current_epoch", schedule.current_epoch())
            .with("current_open_epoch", schedule.open_epoch())
            .with("wpost_period_deadlines", schedule.period_deadlines())
            .with("wpost_challenge_window", schedule.challenge_window()),
        1u64,
    );
    out.add(info_family);

    let source = ChainDeadlines::fetch(scrape.node, scrape.miner_id()).await?;
    let mut aggregates =
        std::pin::pin!(aggregate(schedule, scrape.epoch_duration_seconds, &source));
    let mut families = DeadlineFamilies::new();
    let outcome = loop {
        match aggregates.try_next().await {
            Ok(Some(it)) => families.push(scrape.labels(), &it),
            Ok(None) => break Ok(()),
            Err(e) => break Err(e),
        }
    };
    families.add_to(out);
    outcome
}
