// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::Scrape;
use crate::error::ExporterError;
use crate::metrics::{GaugeFamily, MetricSection};

pub(super) async fn collect(
    scrape: &Scrape<'_>,
    out: &mut MetricSection,
) -> Result<(), ExporterError> {
    let mut cpu = GaugeFamily::new("miner_worker_cpu", "Number of CPUs");
    let mut gpu = GaugeFamily::new("miner_worker_gpu", "Number of GPUs");
    let mut mem_physical =
        GaugeFamily::new("miner_worker_mem_physical", "Physical memory in bytes");
    let mut mem_swap = GaugeFamily::new("miner_worker_mem_swap", "Swap in bytes");
    let mut mem_physical_used = GaugeFamily::new(
        "miner_worker_mem_physical_used",
        "Minimum memory used by running tasks",
    );
    let mut mem_vmem_used = GaugeFamily::new(
        "miner_worker_mem_vmem_used",
        "Maximum memory used by running tasks",
    );
    let mut mem_reserved = GaugeFamily::new(
        "miner_worker_mem_reserved",
        "Memory reserved by lotus in bytes",
    );
    let mut gpu_used = GaugeFamily::new("miner_worker_gpu_used", "GPU used by lotus");
    let mut cpu_used = GaugeFamily::new("miner_worker_cpu_used", "Number of CPUs used by lotus");

    for stats in scrape.miner.worker_stats().await?.values() {
        let labels = scrape.labels().with("worker_host", &stats.info.hostname);
        let resources = &stats.info.resources;
        cpu.push(labels.clone(), resources.cpus);
        gpu.push(labels.clone(), resources.gpus.len());
        mem_physical.push(labels.clone(), resources.mem_physical);
        mem_swap.push(labels.clone(), resources.mem_swap);
        mem_physical_used.push(labels.clone(), stats.mem_used_min);
        mem_vmem_used.push(labels.clone(), stats.mem_used_max);
        mem_reserved.push(labels.clone(), resources.mem_reserved);
        gpu_used.push(labels.clone(), stats.gpu_used.as_f64());
        cpu_used.push(labels, stats.cpu_use);
    }

    out.add(cpu)
        .add(gpu)
        .add(mem_physical)
        .add(mem_swap)
        .add(mem_physical_used)
        .add(mem_vmem_used)
        .add(mem_reserved)
        .add(gpu_used)
        .add(cpu_used);
    Ok(())
}
