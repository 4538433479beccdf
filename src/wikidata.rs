//! English labels for Wikidata ids (`Q…` entities, `P…` properties), fetched
//! from the public SPARQL endpoint and cached as a `id<TAB>label` file.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path;

use itertools::Itertools;
use serde::Deserialize;

use crate::helpers;
use crate::{ConvertErrorKind, ConvertResult, ConvertResultExt};

pub const ENDPOINT: &str = "https://query.wikidata.org/bigdata/namespace/wdq/sparql";
pub const USER_AGENT: &str = "SearchItemLabelBotForResearch/0.0 (bailong@ict.ac.cn)";

/// Progress is logged every that many ids.
const PROGRESS_EVERY: usize = 100;

pub trait LabelSource {
    fn fetch_label(&self, wid: &str) -> ConvertResult<String>;
}

pub struct SparqlClient {
    client: reqwest::blocking::Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct SparqlResponse {
    results: SparqlResults,
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    bindings: Vec<Binding>,
}

#[derive(Debug, Deserialize)]
struct Binding {
    #[serde(rename = "itemLabel")]
    item_label: Literal,
}

#[derive(Debug, Deserialize)]
struct Literal {
    value: String,
}

impl SparqlClient {
    pub fn new(endpoint: &str) -> ConvertResult<SparqlClient> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .chain_err(|| "can not build http client")?;
        Ok(SparqlClient { client, endpoint: endpoint.to_string() })
    }

    pub fn query_for(wid: &str) -> String {
        format!(
            "SELECT ?itemLabel WHERE {{ wd:{} rdfs:label ?itemLabel . FILTER (LANG(?itemLabel) = 'en') }} ",
            wid
        )
    }
}

impl LabelSource for SparqlClient {
    fn fetch_label(&self, wid: &str) -> ConvertResult<String> {
        let query = SparqlClient::query_for(wid);
        let body = self
            .client
            .get(&self.endpoint)
            .query(&[("query", query.as_str()), ("format", "json")])
            .send()?
            .text()?;
        label_from_response(wid, &body)
    }
}

fn label_from_response(wid: &str, body: &str) -> ConvertResult<String> {
    let response: SparqlResponse = serde_json::from_str(body)?;
    response
        .results
        .bindings
        .into_iter()
        .next()
        .map(|b| b.item_label.value)
        .ok_or_else(|| ConvertErrorKind::NoLabel(wid.to_string()).into())
}

/// Tabs and line breaks would corrupt the cache file. Trailing blanks would not
/// survive a reload, leading ones do.
fn clean_label(label: &str) -> String {
    label
        .replace(|c: char| c == '\t' || c == '\n' || c == '\r', " ")
        .trim_end()
        .to_string()
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LabelReport {
    pub labels: Vec<(String, String)>,
    pub fails: Vec<String>,
}

impl LabelReport {
    /// Writes `id<TAB>label` lines to `path` and failed ids to `path.fail`.
    pub fn write(&self, path: &path::Path) -> ConvertResult<()> {
        helpers::write_lines(path, self.labels.iter().map(|&(ref wid, ref label)| format!("{}\t{}", wid, label)))?;
        helpers::write_lines(&helpers::with_suffix(path, ".fail"), self.fails.iter())?;
        Ok(())
    }
}

/// Looks every distinct id up once, in first-seen order. A failed lookup is
/// recorded and the batch goes on.
pub fn fetch_labels<S, I>(source: &S, wids: I) -> LabelReport
where
    S: LabelSource + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let wids: Vec<String> = wids.into_iter().map(|w| w.as_ref().to_string()).unique().collect();
    let mut report = LabelReport::default();
    for (i, wid) in wids.iter().enumerate() {
        let label = source.fetch_label(wid).and_then(|label| {
            let label = clean_label(&label);
            if label.is_empty() {
                bail!(ConvertErrorKind::NoLabel(wid.clone()));
            }
            Ok(label)
        });
        match label {
            Ok(label) => report.labels.push((wid.clone(), label)),
            Err(e) => {
                warn!(wid = %wid, error = %e, "label lookup failed");
                report.fails.push(wid.clone());
            }
        }
        if (i + 1) % PROGRESS_EVERY == 0 {
            info!(done = i + 1, of = wids.len(), total = report.labels.len(), fail = report.fails.len(), "labels");
        }
    }
    info!(total = report.labels.len(), fail = report.fails.len(), "label lookup done");
    report
}

/// The first column of a WIKI dictionary file, in file order.
pub fn collect_ids(dictionary: &path::Path, ids: &mut Vec<String>) -> ConvertResult<()> {
    helpers::for_each_line(dictionary, |line| {
        ids.push(line.exact(2)?[0].to_string());
        Ok(())
    })?;
    Ok(())
}

/// The id to label cache.
#[derive(Debug, Default, Clone)]
pub struct Wikidata {
    labels: HashMap<String, String>,
}

impl Wikidata {
    pub fn load(path: &path::Path) -> ConvertResult<Wikidata> {
        let mut labels = HashMap::new();
        helpers::for_each_line(path, |line| {
            let fields = line.exact(2)?;
            if let Entry::Vacant(vac) = labels.entry(fields[0].to_string()) {
                vac.insert(fields[1].to_string());
            }
            Ok(())
        })?;
        info!(path = %path.display(), labels = labels.len(), "loaded wikidata labels");
        Ok(Wikidata { labels })
    }

    /// Loads the cache at `cache`, building it first from the dictionaries in
    /// `input_dir` if it does not exist yet.
    pub fn load_or_fetch<S>(input_dir: &path::Path, cache: &path::Path, source: &S) -> ConvertResult<Wikidata>
    where
        S: LabelSource + ?Sized,
    {
        if !cache.exists() {
            info!(cache = %cache.display(), "no label cache, querying wikidata");
            let mut wids = vec![];
            collect_ids(&input_dir.join(helpers::ENTITY_FILE), &mut wids)?;
            collect_ids(&input_dir.join(helpers::RELATION_FILE), &mut wids)?;
            fetch_labels(source, &wids).write(cache)?;
        }
        Wikidata::load(cache)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get_label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(|s| s.as_str())
    }

    pub fn label(&self, key: &str) -> ConvertResult<&str> {
        self.get_label(key).ok_or_else(|| ConvertErrorKind::MissingLabel(key.to_string()).into())
    }
}
