// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! OpenMetrics encoding for the exporter.
//!
//! Every scrape builds fresh values, so there is no long-lived metric state:
//! each section of the exporter produces a [`MetricSection`], which is a
//! [`Collector`] over constant gauges, and registers it into an
//! [`Exposition`]. Rendering the exposition encodes whatever was registered so
//! far, which is what lets a failed scrape still print its earlier sections.

use prometheus_client::{
    collector::Collector,
    encoding::{
        DescriptorEncoder, EncodeLabelKey, EncodeLabelSet, EncodeLabelValue, EncodeMetric,
        LabelSetEncoder,
    },
    metrics::{MetricType, gauge::ConstGauge},
    registry::Registry,
};
use std::borrow::Cow;
use std::fmt::Display;

/// An ordered label set. Values are escaped on insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Labels(Vec<(&'static str, String)>);

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &'static str, value: impl Display) -> Self {
        self.push(key, value);
        self
    }

    pub fn push(&mut self, key: &'static str, value: impl Display) {
        let value = value.to_string();
        let value = match escape_label_value(&value) {
            Cow::Borrowed(_) => value,
            Cow::Owned(escaped) => escaped,
        };
        self.0.push((key, value));
    }
}

impl EncodeLabelSet for Labels {
    fn encode(&self, mut encoder: LabelSetEncoder) -> Result<(), std::fmt::Error> {
        for (key, value) in &self.0 {
            let mut label_encoder = encoder.encode_label();
            let mut label_key_encoder = label_encoder.encode_label_key()?;
            EncodeLabelKey::encode(key, &mut label_key_encoder)?;
            let mut label_value_encoder = label_key_encoder.encode_label_value()?;
            EncodeLabelValue::encode(&value.as_str(), &mut label_value_encoder)?;
            label_value_encoder.finish()?;
        }
        Ok(())
    }
}

/// Escape `\`, `"` and line feeds the way the text exposition format expects.
pub fn escape_label_value(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', '"', '\n']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str(r"\\"),
            '"' => escaped.push_str(r#"\""#),
            '\n' => escaped.push_str(r"\n"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// A gauge sample. Counts stay integral on the wire, balances and shares don't.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::From)]
pub enum SampleValue {
    Int(i64),
    Float(f64),
}

impl From<u64> for SampleValue {
    fn from(value: u64) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<usize> for SampleValue {
    fn from(value: usize) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

/// One gauge metric and its samples.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeFamily {
    name: &'static str,
    help: &'static str,
    samples: Vec<(Labels, SampleValue)>,
}

impl GaugeFamily {
    pub fn new(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            help,
            samples: vec![],
        }
    }

    pub fn samples(&self) -> &[(Labels, SampleValue)] {
        &self.samples
    }

    pub fn push(&mut self, labels: Labels, value: impl Into<SampleValue>) {
        self.samples.push((labels, value.into()));
    }

    fn encode(&self, encoder: &mut DescriptorEncoder) -> Result<(), std::fmt::Error> {
        if self.samples.is_empty() {
            return Ok(());
        }
        let mut metric_encoder =
            encoder.encode_descriptor(self.name, self.help, None, MetricType::Gauge)?;
        for (labels, value) in &self.samples {
            let family_encoder = metric_encoder.encode_family(labels)?;
            match *value {
                SampleValue::Int(v) => ConstGauge::new(v).encode(family_encoder)?,
                SampleValue::Float(v) => ConstGauge::new(v).encode(family_encoder)?,
            }
        }
        Ok(())
    }
}

/// The gauges one exporter section produced in one scrape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricSection {
    families: Vec<GaugeFamily>,
}

impl MetricSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, family: GaugeFamily) -> &mut Self {
        self.families.push(family);
        self
    }
}

impl FromIterator<GaugeFamily> for MetricSection {
    fn from_iter<T: IntoIterator<Item = GaugeFamily>>(iter: T) -> Self {
        Self {
            families: iter.into_iter().collect(),
        }
    }
}

impl Collector for MetricSection {
    fn encode(&self, mut encoder: DescriptorEncoder) -> Result<(), std::fmt::Error> {
        for family in &self.families {
            family.encode(&mut encoder)?;
        }
        Ok(())
    }
}

/// The registry a scrape renders from. Metric names get the namespace prefix.
#[derive(Debug)]
pub struct Exposition {
    registry: Registry,
}

impl Exposition {
    pub fn new(namespace: &str) -> Self {
        let registry = if namespace.is_empty() {
            Registry::default()
        } else {
            Registry::with_prefix(namespace)
        };
        Self { registry }
    }

    pub fn register(&mut self, section: MetricSection) {
        self.registry.register_collector(Box::new(section));
    }

    /// OpenMetrics text, terminated by `# EOF`.
    pub fn render(&self) -> Result<String, std::fmt::Error> {
        let mut metrics = String::new();
        prometheus_client::encoding::text::encode_registry(&mut metrics, &self.registry)?;
        prometheus_client::encoding::text::encode_eof(&mut metrics)?;
        Ok(metrics)
    }
}
