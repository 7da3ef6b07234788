// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Per-deadline aggregation of a miner's Window PoSt schedule.
//!
//! A proving period is split into `period_deadlines` deadlines. Starting from
//! the one currently open, we walk every deadline in the order its challenge
//! window opens, fetch its partitions, and fold their sector sets into a
//! [`DeadlineAggregate`]. Deadlines without partitions produce nothing.


use crate::error::ExporterError;
use crate::lotus_json::{ApiDeadline, ChainEpoch, DeadlineInfo, MinerPartition, SectorSet};
use crate::rpc_api::FullNodeApi;
use futures::Stream;

/// Average Filecoin block time. Only used to turn epoch distances into a rough
/// number of seconds.
pub const EPOCH_DURATION_SECONDS: i64 = 30;

/// The deadline cycle of one miner at one epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvingSchedule {
    current_epoch: ChainEpoch,
    index: u64,
    open_epoch: ChainEpoch,
    period_deadlines: u64,
    challenge_window: ChainEpoch,
}

impl ProvingSchedule {
    pub fn new(
        current_epoch: ChainEpoch,
        index: u64,
        open_epoch: ChainEpoch,
        period_deadlines: u64,
        challenge_window: ChainEpoch,
    ) -> Result<Self, ExporterError> {
        if period_deadlines == 0 {
            return Err(ExporterError::MalformedSchedule(
                "a proving period needs at least one deadline".into(),
            ));
        }
        if index >= period_deadlines {
            return Err(ExporterError::MalformedSchedule(format!(
                "deadline index {index} out of range for {period_deadlines} deadlines"
            )));
        }
        Ok(Self {
            current_epoch,
            index,
            open_epoch,
            period_deadlines,
            challenge_window,
        })
    }

    pub fn current_epoch(&self) -> ChainEpoch {
        self.current_epoch
    }

    /// The currently open deadline.
    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn open_epoch(&self) -> ChainEpoch {
        self.open_epoch
    }

    pub fn period_deadlines(&self) -> u64 {
        self.period_deadlines
    }

    pub fn challenge_window(&self) -> ChainEpoch {
        self.challenge_window
    }

    /// The deadline `i` windows after the open one.
    pub fn deadline_index(&self, i: u64) -> u64 {
        (self.index + i) % self.period_deadlines
    }

    /// Every deadline index once, open deadline first.
    pub fn rotation(self) -> impl Iterator<Item = u64> {
        (0..self.period_deadlines).map(move |i| self.deadline_index(i))
    }

    /// Epoch at which the window `i` steps ahead opens.
    pub fn window_open_epoch(&self, i: u64) -> Result<ChainEpoch, ExporterError> {
        ChainEpoch::try_from(i)
            .ok()
            .and_then(|i| self.challenge_window.checked_mul(i))
            .and_then(|offset| self.open_epoch.checked_add(offset))
            .ok_or_else(|| {
                ExporterError::MalformedSchedule(format!(
                    "window {i} of {self:?} overflows the epoch range"
                ))
            })
    }

    /// Estimated seconds until the window `i` steps ahead opens. Negative for
    /// the open deadline.
    pub fn seconds_until_open(
        &self,
        i: u64,
        epoch_duration_seconds: i64,
    ) -> Result<i64, ExporterError> {
        self.window_open_epoch(i)?
            .checked_sub(self.current_epoch)
            .and_then(|epochs| epochs.checked_mul(epoch_duration_seconds))
            .ok_or_else(|| {
                ExporterError::MalformedSchedule(format!(
                    "seconds until window {i} of {self:?} overflow"
                ))
            })
    }
}

impl TryFrom<&DeadlineInfo> for ProvingSchedule {
    type Error = ExporterError;

    fn try_from(info: &DeadlineInfo) -> Result<Self, Self::Error> {
        Self::new(
            info.current_epoch,
            info.index,
            info.open,
            info.wpost_period_deadlines,
            info.wpost_challenge_window,
        )
    }
}

/// What the chain knows about one deadline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeadlineSnapshot {
    pub partitions: Vec<MinerPartition>,
    /// Partitions that already submitted a proof in the current window.
    pub post_submissions: SectorSet,
}

/// Where the aggregator gets each deadline from.
#[async_trait::async_trait]
pub trait DeadlineSource: Send + Sync {
    async fn deadline(&self, index: u64) -> Result<DeadlineSnapshot, ExporterError>;
}

/// [`DeadlineSource`] backed by a Lotus daemon: `StateMinerDeadlines` once up
/// front, then `StateMinerPartitions` per deadline.
pub struct ChainDeadlines<'a> {
    node: &'a dyn FullNodeApi,
    miner: &'a str,
    deadlines: Vec<ApiDeadline>,
}

impl<'a> ChainDeadlines<'a> {
    pub async fn fetch(node: &'a dyn FullNodeApi, miner: &'a str) -> Result<Self, ExporterError> {
        let deadlines = node.state_miner_deadlines(miner).await?;
        Ok(Self {
            node,
            miner,
            deadlines,
        })
    }
}

#[async_trait::async_trait]
impl DeadlineSource for ChainDeadlines<'_> {
    async fn deadline(&self, index: u64) -> Result<DeadlineSnapshot, ExporterError> {
        let post_submissions = usize::try_from(index)
            .ok()
            .and_then(|it| self.deadlines.get(it))
            .ok_or(ExporterError::MissingData { index })?
            .post_submissions
            .clone();
        let partitions = self
            .node
            .state_miner_partitions(self.miner, index)
            .await?
            .unwrap_or_default();
        Ok(DeadlineSnapshot {
            partitions,
            post_submissions,
        })
    }
}

/// Sector counts for one deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineAggregate {
    pub index: u64,
    pub seconds_until_open: i64,
    pub partitions: u64,
    pub proven_partitions: u64,
    /// `AllSectors` of the last partition only, not a sum.
    pub all_sectors: u64,
    pub recovering_sectors: u64,
    pub faulty_sectors: u64,
    pub active_sectors: u64,
    pub live_sectors: u64,
}

impl DeadlineAggregate {
    /// `None` for a deadline without partitions. Every set is counted before
    /// anything is returned, so a malformed set leaves no partial aggregate.
    pub fn from_snapshot(
        index: u64,
        seconds_until_open: i64,
        snapshot: &DeadlineSnapshot,
    ) -> Result<Option<Self>, ExporterError> {
        if snapshot.partitions.is_empty() {
            return Ok(None);
        }
        let proven_partitions = snapshot.post_submissions.count()?;
        let mut all_sectors = 0;
        let mut recovering_sectors = 0;
        let mut faulty_sectors = 0;
        let mut active_sectors = 0;
        let mut live_sectors = 0;
        for partition in &snapshot.partitions {
            add_count(&mut faulty_sectors, &partition.faulty_sectors, index)?;
            add_count(&mut recovering_sectors, &partition.recovering_sectors, index)?;
            add_count(&mut active_sectors, &partition.active_sectors, index)?;
            add_count(&mut live_sectors, &partition.live_sectors, index)?;
            // last one wins, see `all_sectors`
            all_sectors = partition.all_sectors.count()?;
        }
        Ok(Some(Self {
            index,
            seconds_until_open,
            partitions: snapshot.partitions.len() as u64,
            proven_partitions,
            all_sectors,
            recovering_sectors,
            faulty_sectors,
            active_sectors,
            live_sectors,
        }))
    }
}

fn add_count(total: &mut u64, set: &SectorSet, index: u64) -> Result<(), ExporterError> {
    *total = total.checked_add(set.count()?).ok_or_else(|| {
        ExporterError::MalformedSet(format!("sector counts of deadline {index} overflow"))
    })?;
    Ok(())
}

/// Walk `schedule` from the open deadline onwards, yielding one aggregate per
/// deadline that has partitions.
///
/// Deadlines are fetched one at a time, only when the stream is polled. The
/// first error ends the stream; aggregates yielded before it stand.
pub fn aggregate<'a, S>(
    schedule: ProvingSchedule,
    epoch_duration_seconds: i64,
    source: &'a S,
) -> impl Stream<Item = Result<DeadlineAggregate, ExporterError>> + 'a
where
    S: DeadlineSource + ?Sized,
{
    futures::stream::try_unfold(0u64, move |mut i| async move {
        while i < schedule.period_deadlines() {
            let index = schedule.deadline_index(i);
            let seconds_until_open = schedule.seconds_until_open(i, epoch_duration_seconds)?;
            let snapshot = source.deadline(index).await?;
            i += 1;
            match DeadlineAggregate::from_snapshot(index, seconds_until_open, &snapshot)? {
                Some(aggregate) => return Ok(Some((aggregate, i))),
                None => tracing::trace!(index, "deadline has no partitions"),
            }
        }
        Ok::<_, ExporterError>(None)
    })
}
