//! Identity correlation of VM records across uploaded workbooks.
//!
//! The index is keyed by the lower-cased VM name and is rebuilt from scratch on every
//! call; nothing here is cached or persisted.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use strata_model::{DataSource, FileType, Row, VmRecord};

/// One deduplicated VM identity.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Anchor {
    /// Display name from the first record seen for this identity.
    pub vm_name: String,
    pub host_name: Option<String>,
    pub datacenter: Option<String>,
    /// Source code -> that source's record for this identity.
    pub sources: BTreeMap<String, VmRecord>,
    /// Code of the source that created the anchor.
    #[serde(skip)]
    first_source: String,
}

impl Anchor {
    fn new(record: &VmRecord, code: &str) -> Self {
        Self {
            vm_name: record.name.clone(),
            host_name: record.host.clone(),
            datacenter: record.datacenter.clone(),
            sources: BTreeMap::new(),
            first_source: code.to_string(),
        }
    }

    /// The record contributed by the source that first introduced this identity.
    pub fn primary_record(&self) -> Option<&VmRecord> {
        self.sources
            .get(&self.first_source)
            .or_else(|| self.sources.values().next())
    }

    pub fn source_codes(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }
}

/// Anchors in first-seen order, addressable by identity key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CorrelationIndex {
    anchors: Vec<(String, Anchor)>,
    by_key: HashMap<String, usize>,
}

impl CorrelationIndex {
    /// Number of distinct case-insensitive VM names: the deduplicated VM count.
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Look up an anchor by VM name (any casing).
    pub fn get(&self, vm_name: &str) -> Option<&Anchor> {
        self.by_key
            .get(&vm_name.to_lowercase())
            .map(|&idx| &self.anchors[idx].1)
    }

    /// `(identity key, anchor)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Anchor)> {
        self.anchors.iter().map(|(k, a)| (k.as_str(), a))
    }

    pub fn anchors(&self) -> impl Iterator<Item = &Anchor> {
        self.anchors.iter().map(|(_, a)| a)
    }

    fn entry(&mut self, key: String, record: &VmRecord, code: &str) -> &mut Anchor {
        let idx = match self.by_key.get(&key) {
            Some(&idx) => idx,
            None => {
                let idx = self.anchors.len();
                self.anchors.push((key.clone(), Anchor::new(record, code)));
                self.by_key.insert(key, idx);
                idx
            }
        };
        &mut self.anchors[idx].1
    }

    fn push_anchor(&mut self, key: String, anchor: Anchor) {
        self.by_key.insert(key.clone(), self.anchors.len());
        self.anchors.push((key, anchor));
    }
}

impl Serialize for CorrelationIndex {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.anchors.len()))?;
        for (key, anchor) in &self.anchors {
            map.serialize_entry(key, anchor)?;
        }
        map.end()
    }
}

/// Build the identity index over `sources`, in list order.
///
/// The first record seen for an identity fixes the anchor's display fields. Each
/// source's entry is overwritten by later rows of that same source with the same name.
pub fn correlate<'a, I>(sources: I) -> CorrelationIndex
where
    I: IntoIterator<Item = &'a DataSource>,
{
    let mut index = CorrelationIndex::default();
    for source in sources {
        for record in source.vms() {
            index
                .entry(record.identity_key(), record, &source.code)
                .sources
                .insert(source.code.clone(), record.clone());
        }
    }
    log::debug!("correlated {} distinct VMs", index.len());
    index
}

/// The sources whose code is in `active_codes`, in list order.
pub fn filter_active<'a>(sources: &'a [DataSource], active_codes: &[String]) -> Vec<&'a DataSource> {
    sources
        .iter()
        .filter(|s| active_codes.contains(&s.code))
        .collect()
}

/// Restrict an index to `codes`: anchors absent from every listed code are dropped and
/// the remaining anchors only keep entries for listed codes.
pub fn filter_by_codes(index: &CorrelationIndex, codes: &[String]) -> CorrelationIndex {
    let mut out = CorrelationIndex::default();
    for (key, anchor) in index.iter() {
        let sources: BTreeMap<String, VmRecord> = anchor
            .sources
            .iter()
            .filter(|(code, _)| codes.contains(code))
            .map(|(code, record)| (code.clone(), record.clone()))
            .collect();
        if sources.is_empty() {
            continue;
        }
        out.push_anchor(
            key.to_string(),
            Anchor {
                sources,
                ..anchor.clone()
            },
        );
    }
    out
}

/// Per-source detail rows for one VM identity.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CorrelatedMetrics {
    pub basic: BTreeMap<String, VmRecord>,
    pub cpu: BTreeMap<String, Row>,
    pub memory: BTreeMap<String, Row>,
    pub disk: BTreeMap<String, Vec<Row>>,
}

/// Collect the RVTools `vCPU` / `vMemory` / `vDisk` rows for `vm_name` from every active
/// source that holds the identity.
///
/// Returns `None` when the index has no such VM.
pub fn correlated_metrics(
    vm_name: &str,
    index: &CorrelationIndex,
    sources: &[DataSource],
    active_codes: &[String],
) -> Option<CorrelatedMetrics> {
    let anchor = index.get(vm_name)?;
    let key = vm_name.to_lowercase();
    let mut metrics = CorrelatedMetrics::default();

    for code in active_codes {
        let Some(record) = anchor.sources.get(code) else {
            continue;
        };
        let Some(data) = sources
            .iter()
            .find(|s| &s.code == code)
            .and_then(|s| s.data.as_ref())
        else {
            continue;
        };
        metrics.basic.insert(code.clone(), record.clone());

        if data.file_type != FileType::RvTools {
            continue;
        }
        if let Some(row) = data.sheet_rows("vCPU").iter().find(|r| row_matches(r, &key)) {
            metrics.cpu.insert(code.clone(), row.clone());
        }
        if let Some(row) = data.sheet_rows("vMemory").iter().find(|r| row_matches(r, &key)) {
            metrics.memory.insert(code.clone(), row.clone());
        }
        let disks: Vec<Row> = data
            .sheet_rows("vDisk")
            .iter()
            .filter(|r| row_matches(r, &key))
            .cloned()
            .collect();
        if !disks.is_empty() {
            metrics.disk.insert(code.clone(), disks);
        }
    }

    Some(metrics)
}

fn row_matches(row: &Row, key: &str) -> bool {
    row.text_of(&["VM"])
        .is_some_and(|name| name.to_lowercase() == key)
}
