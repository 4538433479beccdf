use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path;

use crate::cameo::CameoTable;
use crate::dataset::Dataset;
use crate::helpers;
use crate::normalize;
use crate::records::{DictEntry, Fact, Line, Timestamp};
use crate::wikidata::{self, LabelSource, SparqlClient, Wikidata};
use crate::{ConvertResult, ConvertResultExt};

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub input_dir: path::PathBuf,
    pub output_dir: path::PathBuf,
    pub cameo_path: path::PathBuf,
    pub names_path: path::PathBuf,
    pub endpoint: String,
}

impl ConvertOptions {
    pub fn new<P: AsRef<path::Path>>(input_dir: P) -> ConvertOptions {
        ConvertOptions {
            input_dir: input_dir.as_ref().to_path_buf(),
            output_dir: path::PathBuf::from("."),
            cameo_path: path::PathBuf::from("cameo.yaml"),
            names_path: path::PathBuf::from("./wid2name.txt"),
            endpoint: wikidata::ENDPOINT.to_string(),
        }
    }

    pub fn with_output_dir<P: AsRef<path::Path>>(mut self, dir: P) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_cameo_path<P: AsRef<path::Path>>(mut self, path: P) -> Self {
        self.cameo_path = path.as_ref().to_path_buf();
        self
    }

    pub fn with_names_path<P: AsRef<path::Path>>(mut self, path: P) -> Self {
        self.names_path = path.as_ref().to_path_buf();
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Converted files land in `<output_dir>/<DATASET>`.
    pub fn target_dir(&self, dataset: Dataset) -> path::PathBuf {
        self.output_dir.join(dataset.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    fn split<'a>(self, line: &Line<'a>) -> ConvertResult<Vec<&'a str>> {
        match self {
            Arity::Exact(n) => line.exact(n),
            Arity::AtLeast(n) => line.at_least(n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameRule {
    Underscores,
    /// GDELT actors: bracketed suffix dropped, then title-cased.
    Actor,
    Angles,
    AnglesUnderscores,
    Cameo,
    Label,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    Input,
    /// Keyed on the integer id, last duplicate wins.
    ById,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DictRule {
    arity: Arity,
    name: NameRule,
    order: Order,
}

impl DictRule {
    fn input(arity: Arity, name: NameRule) -> DictRule {
        DictRule { arity, name, order: Order::Input }
    }

    fn by_id(name: NameRule) -> DictRule {
        DictRule { arity: Arity::AtLeast(2), name, order: Order::ById }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FactRule {
    /// Exactly four columns, time shifted to start at 0.
    Rebase,
    /// Exactly four columns, copied as they are.
    Verbatim,
    /// First four columns, trimmed, time divided by the step.
    Rescale(i64),
    /// First four columns, trimmed, time written back as an integer.
    Reparse,
}

impl FactRule {
    fn apply<'a>(self, line: &Line<'a>) -> ConvertResult<Fact<'a>> {
        let (fields, trim) = match self {
            FactRule::Rebase | FactRule::Verbatim => (line.exact(4)?, false),
            FactRule::Rescale(_) | FactRule::Reparse => (line.at_least(4)?, true),
        };
        let field = |i: usize| if trim { fields[i].trim() } else { fields[i] };
        let time = match self {
            FactRule::Rebase => {
                let t = normalize::rebase(line.integer(fields[3])?).ok_or_else(|| line.malformed())?;
                Timestamp::Value(t)
            }
            FactRule::Verbatim => Timestamp::Raw(fields[3]),
            FactRule::Rescale(step) => {
                Timestamp::Value(normalize::rescale(line.integer(fields[3])?, step))
            }
            FactRule::Reparse => Timestamp::Value(line.integer(fields[3])?),
        };
        Ok(Fact { subject: field(0), predicate: field(1), object: field(2), time })
    }
}

/// How one dataset maps onto the standard layout.
pub struct Conversion {
    dataset: Dataset,
    entities: DictRule,
    relations: DictRule,
    facts: FactRule,
    cameo: Option<CameoTable>,
    labels: Option<Wikidata>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub dataset: Dataset,
    pub output_dir: path::PathBuf,
    /// Lines written, per output file name.
    pub files: Vec<(String, usize)>,
}

impl fmt::Display for ConversionSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> {}", self.dataset, self.output_dir.display())?;
        for &(ref file, lines) in &self.files {
            write!(f, "\n  {:<16} {:>10}", file, lines)?;
        }
        Ok(())
    }
}

impl Conversion {
    fn rules(dataset: Dataset) -> Conversion {
        use self::Arity::*;
        use self::NameRule::*;
        let (entities, relations, facts) = match dataset {
            Dataset::Icews14 => (
                DictRule::input(Exact(2), Underscores),
                DictRule::input(Exact(2), Underscores),
                FactRule::Rebase,
            ),
            Dataset::Icews18 => (
                DictRule::input(Exact(2), Underscores),
                DictRule::input(Exact(2), Underscores),
                FactRule::Rescale(24),
            ),
            Dataset::Icews0515 => (
                DictRule::input(Exact(2), Underscores),
                DictRule::input(Exact(2), Underscores),
                FactRule::Verbatim,
            ),
            Dataset::Gdelt => (
                DictRule::input(Exact(2), Actor),
                DictRule::input(Exact(2), Cameo),
                FactRule::Rescale(15),
            ),
            Dataset::Yago => (
                DictRule::input(AtLeast(2), AnglesUnderscores),
                DictRule::input(Exact(2), Angles),
                FactRule::Reparse,
            ),
            Dataset::Wiki => (DictRule::by_id(Label), DictRule::by_id(Label), FactRule::Reparse),
        };
        Conversion { dataset, entities, relations, facts, cameo: None, labels: None }
    }

    /// Builds the conversion for `dataset`, loading whatever side table it
    /// needs. WIKI labels missing from the cache are fetched from `source`.
    pub fn prepare<S>(dataset: Dataset, options: &ConvertOptions, source: &S) -> ConvertResult<Conversion>
    where
        S: LabelSource + ?Sized,
    {
        let mut conversion = Conversion::rules(dataset);
        match dataset {
            Dataset::Gdelt => conversion.cameo = Some(CameoTable::load(&options.cameo_path)?),
            Dataset::Wiki => {
                conversion.labels = Some(Wikidata::load_or_fetch(&options.input_dir, &options.names_path, source)?)
            }
            _ => (),
        }
        Ok(conversion)
    }

    fn rename(&self, rule: NameRule, name: &str) -> ConvertResult<String> {
        Ok(match rule {
            NameRule::Underscores => normalize::underscores_to_spaces(name),
            NameRule::Actor => normalize::title_case(normalize::drop_bracket_suffix(name)),
            NameRule::Angles => normalize::strip_angle_brackets(name).to_string(),
            NameRule::AnglesUnderscores => normalize::underscores_to_spaces(normalize::strip_angle_brackets(name)),
            NameRule::Cameo => {
                let table = self.cameo.as_ref().ok_or("CAMEO table not loaded")?;
                table.event_name(name)?.to_string()
            }
            NameRule::Label => {
                let labels = self.labels.as_ref().ok_or("wikidata labels not loaded")?;
                labels.label(name)?.to_string()
            }
        })
    }

    fn dictionary(&self, rule: DictRule, input: &path::Path, output: &path::Path) -> ConvertResult<usize> {
        match rule.order {
            Order::Input => helpers::rewrite_lines(input, output, |line| {
                let fields = rule.arity.split(line)?;
                let entry = DictEntry { name: self.rename(rule.name, fields[0])?, id: fields[1] };
                Ok(entry.to_string())
            }),
            Order::ById => {
                let mut by_id = BTreeMap::new();
                helpers::for_each_line(input, |line| {
                    let fields = rule.arity.split(line)?;
                    let name = self.rename(rule.name, fields[0])?;
                    by_id.insert(line.integer(fields[1])?, name);
                    Ok(())
                })?;
                helpers::write_lines(output, by_id.into_iter().map(|(id, name)| DictEntry { name, id }))
            }
        }
    }

    fn facts(&self, input: &path::Path, output: &path::Path) -> ConvertResult<usize> {
        helpers::rewrite_lines(input, output, |line| Ok(self.facts.apply(line)?.to_string()))
    }

    pub fn run(&self, input_dir: &path::Path, output_dir: &path::Path) -> ConvertResult<ConversionSummary> {
        fs::create_dir_all(output_dir).chain_err(|| format!("can not create {}", output_dir.display()))?;
        let mut files = vec![];
        for &(file, rule) in &[(helpers::ENTITY_FILE, self.entities), (helpers::RELATION_FILE, self.relations)] {
            let lines = self.dictionary(rule, &input_dir.join(file), &output_dir.join(file))?;
            info!(dataset = %self.dataset, file, lines, "dictionary converted");
            files.push((file.to_string(), lines));
        }
        for part in helpers::PARTS.iter() {
            let file = helpers::part_file(part);
            let lines = self.facts(&input_dir.join(&file), &output_dir.join(&file))?;
            info!(dataset = %self.dataset, file = %file, lines, "facts converted");
            files.push((file, lines));
        }
        Ok(ConversionSummary { dataset: self.dataset, output_dir: output_dir.to_path_buf(), files })
    }
}

/// Converts `options.input_dir` as `dataset` into `<output_dir>/<DATASET>`.
pub fn convert_with<S>(dataset: Dataset, options: &ConvertOptions, source: &S) -> ConvertResult<ConversionSummary>
where
    S: LabelSource + ?Sized,
{
    let conversion = Conversion::prepare(dataset, options, source)?;
    conversion.run(&options.input_dir, &options.target_dir(dataset))
}

/// Same as `convert_with`, with labels fetched from `options.endpoint`.
pub fn convert(dataset: Dataset, options: &ConvertOptions) -> ConvertResult<ConversionSummary> {
    let client = SparqlClient::new(&options.endpoint)?;
    convert_with(dataset, options, &client)
}
