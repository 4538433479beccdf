extern crate tempfile;
extern crate tkgconv;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tkgconv::convert::convert_with;
use tkgconv::wikidata::LabelSource;
use tkgconv::{ConvertErrorKind, ConvertOptions, ConvertResult, Dataset};

/// Refuses every lookup: conversions under test must not need the network.
struct Offline;

impl LabelSource for Offline {
    fn fetch_label(&self, wid: &str) -> ConvertResult<String> {
        Err(format!("offline, can not look {} up", wid).into())
    }
}

struct Fixed(HashMap<&'static str, &'static str>);

impl LabelSource for Fixed {
    fn fetch_label(&self, wid: &str) -> ConvertResult<String> {
        self.0.get(wid).map(|s| s.to_string()).ok_or_else(|| ConvertErrorKind::NoLabel(wid.to_string()).into())
    }
}

fn seed(dir: &Path, files: &[(&str, &str)]) {
    fs::create_dir_all(dir).unwrap();
    for &(name, content) in files {
        fs::write(dir.join(name), content).unwrap();
    }
}

fn assert_files(dir: &Path, expected: &[(&str, &str)]) {
    for &(name, content) in expected {
        let actual = fs::read_to_string(dir.join(name)).unwrap();
        assert_eq!(actual, content, "{}", name);
    }
}

struct Workspace {
    _root: tempfile::TempDir,
    input: PathBuf,
    output: PathBuf,
}

fn workspace(dir_name: &str, files: &[(&str, &str)]) -> Workspace {
    let root = tempfile::tempdir().unwrap();
    let input = root.path().join("raw").join(dir_name);
    let output = root.path().join("out");
    seed(&input, files);
    Workspace { input, output, _root: root }
}

fn run(ws: &Workspace, options: ConvertOptions) -> ConvertResult<PathBuf> {
    let dataset = Dataset::guess(&ws.input)?;
    let summary = convert_with(dataset, &options, &Offline)?;
    assert_eq!(summary.files.len(), 5);
    Ok(summary.output_dir)
}

#[test]
fn icews14_rebases_time() {
    let ws = workspace(
        "ICEWS14s",
        &[
            ("entity2id.txt", "Abdul_Kalam\t0\nUnited_States\t1\n"),
            ("relation2id.txt", "Make_statement\t0\nConsult\t1\n"),
            ("train.txt", "0\t0\t1\t1\n1\t1\t0\t365\n"),
            ("valid.txt", "0\t1\t1\t2\n"),
            ("test.txt", "1\t0\t0\t3\n"),
        ],
    );
    let out = run(&ws, ConvertOptions::new(&ws.input).with_output_dir(&ws.output)).unwrap();
    assert_eq!(out, ws.output.join("ICEWS14"));
    assert_files(
        &out,
        &[
            ("entity2id.txt", "Abdul Kalam\t0\nUnited States\t1\n"),
            ("relation2id.txt", "Make statement\t0\nConsult\t1\n"),
            ("train.txt", "0\t0\t1\t0\n1\t1\t0\t364\n"),
            ("valid.txt", "0\t1\t1\t1\n"),
            ("test.txt", "1\t0\t0\t2\n"),
        ],
    );
}

#[test]
fn icews18_hours_to_days() {
    let ws = workspace(
        "ICEWS18",
        &[
            ("entity2id.txt", "Police_(Nigeria)\t0\nCitizen\t1\n"),
            ("relation2id.txt", "Arrest,_detain\t0\n"),
            ("train.txt", "0 \t0\t1\t24\t0\n1\t0 \t0\t71\t1\n"),
            ("valid.txt", "0\t0\t1\t0\t0\n"),
            ("test.txt", "1\t0\t0\t7272\t3\n"),
        ],
    );
    let out = run(&ws, ConvertOptions::new(&ws.input).with_output_dir(&ws.output)).unwrap();
    assert_files(
        &out,
        &[
            ("entity2id.txt", "Police (Nigeria)\t0\nCitizen\t1\n"),
            ("relation2id.txt", "Arrest, detain\t0\n"),
            ("train.txt", "0\t0\t1\t1\n1\t0\t0\t2\n"),
            ("valid.txt", "0\t0\t1\t0\n"),
            ("test.txt", "1\t0\t0\t303\n"),
        ],
    );
}

#[test]
fn icews05_15_copies_facts() {
    let ws = workspace(
        "icews05-15",
        &[
            ("entity2id.txt", "South_Korea\t0\n"),
            ("relation2id.txt", "Express_intent_to_cooperate\t0\n"),
            ("train.txt", "0\t0\t0\t4017   \n"),
            ("valid.txt", "0\t0\t0\t0\n"),
            ("test.txt", "0\t0\t0\t12\n"),
        ],
    );
    let out = run(&ws, ConvertOptions::new(&ws.input).with_output_dir(&ws.output)).unwrap();
    assert_eq!(out, ws.output.join("ICEWS05-15"));
    assert_files(
        &out,
        &[
            ("entity2id.txt", "South Korea\t0\n"),
            ("relation2id.txt", "Express intent to cooperate\t0\n"),
            ("train.txt", "0\t0\t0\t4017\n"),
            ("test.txt", "0\t0\t0\t12\n"),
        ],
    );
}

const CAMEO: &str = r#"
event_code:
  "010": Make statement
  "0211": Appeal for economic cooperation
"#;

fn gdelt() -> Workspace {
    let ws = workspace(
        "GDELT",
        &[
            ("entity2id.txt", "UNITED STATES (USA)\t0\nPOLICE (NIGERIA)\t1\nCITIZEN\t2\n"),
            ("relation2id.txt", "010\t0\n0211\t1\n"),
            ("train.txt", "0\t0\t1\t30\t0\n2\t1\t0\t44\t1\n"),
            ("valid.txt", "1\t0\t2\t2205\t0\n"),
            ("test.txt", "2\t1\t1\t2220\t0\n"),
        ],
    );
    seed(ws.input.parent().unwrap(), &[("cameo.yaml", CAMEO)]);
    ws
}

#[test]
fn gdelt_names_and_quarter_hours() {
    let ws = gdelt();
    let options = ConvertOptions::new(&ws.input)
        .with_output_dir(&ws.output)
        .with_cameo_path(ws.input.parent().unwrap().join("cameo.yaml"));
    let out = run(&ws, options).unwrap();
    assert_files(
        &out,
        &[
            ("entity2id.txt", "United States\t0\nPolice\t1\nCitizen\t2\n"),
            ("relation2id.txt", "Make statement\t0\nAppeal for economic cooperation\t1\n"),
            ("train.txt", "0\t0\t1\t2\n2\t1\t0\t2\n"),
            ("valid.txt", "1\t0\t2\t147\n"),
            ("test.txt", "2\t1\t1\t148\n"),
        ],
    );
}

#[test]
fn gdelt_unknown_code_is_fatal() {
    let ws = gdelt();
    seed(&ws.input, &[("relation2id.txt", "010\t0\n999\t1\n")]);
    let options = ConvertOptions::new(&ws.input)
        .with_output_dir(&ws.output)
        .with_cameo_path(ws.input.parent().unwrap().join("cameo.yaml"));
    let err = run(&ws, options).unwrap_err();
    match *err.kind() {
        ConvertErrorKind::UnknownCameoCode(ref code) => assert_eq!(code, "999"),
        ref other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn gdelt_without_cameo_table_fails() {
    let ws = gdelt();
    let options = ConvertOptions::new(&ws.input)
        .with_output_dir(&ws.output)
        .with_cameo_path(ws.input.join("missing.yaml"));
    assert!(run(&ws, options).is_err());
}

#[test]
fn yago_strips_brackets_and_columns() {
    let ws = workspace(
        "YAGO",
        &[
            ("entity2id.txt", "<Barack_Obama>\t0\tperson\n<New_York>\t1\n"),
            ("relation2id.txt", "<wasBornIn>\t0\n<isMarriedTo>\t1\n"),
            ("train.txt", "0\t0\t1\t05\t0\n"),
            ("valid.txt", "1\t1\t0\t7\t0\n"),
            ("test.txt", "0 \t1\t1\t188\n"),
        ],
    );
    let out = run(&ws, ConvertOptions::new(&ws.input).with_output_dir(&ws.output)).unwrap();
    assert_files(
        &out,
        &[
            ("entity2id.txt", "Barack Obama\t0\nNew York\t1\n"),
            ("relation2id.txt", "wasBornIn\t0\nisMarriedTo\t1\n"),
            ("train.txt", "0\t0\t1\t5\n"),
            ("valid.txt", "1\t1\t0\t7\n"),
            ("test.txt", "0\t1\t1\t188\n"),
        ],
    );
}

fn wiki() -> Workspace {
    workspace(
        "WIKI",
        &[
            ("entity2id.txt", "Q2\t1\nQ1\t0\n"),
            ("relation2id.txt", "P31\t0\n"),
            ("train.txt", "0\t0\t1\t12\t13\n"),
            ("valid.txt", "1\t0\t0\t82\n"),
            ("test.txt", "0\t0\t0\t83\n"),
        ],
    )
}

const WIKI_OUT: &[(&str, &str)] = &[
    ("entity2id.txt", "Universe\t0\nEarth\t1\n"),
    ("relation2id.txt", "instance of\t0\n"),
    ("train.txt", "0\t0\t1\t12\n"),
    ("valid.txt", "1\t0\t0\t82\n"),
    ("test.txt", "0\t0\t0\t83\n"),
];

#[test]
fn wiki_uses_cached_labels_sorted_by_id() {
    let ws = wiki();
    let cache = ws.input.parent().unwrap().join("wid2name.txt");
    fs::write(&cache, "Q1\tUniverse\nQ2\tEarth\nP31\tinstance of\n").unwrap();
    let options = ConvertOptions::new(&ws.input).with_output_dir(&ws.output).with_names_path(&cache);
    let out = run(&ws, options).unwrap();
    assert_files(&out, WIKI_OUT);
}

#[test]
fn wiki_dictionary_last_duplicate_id_wins() {
    let ws = workspace(
        "WIKI",
        &[
            ("entity2id.txt", "Q1\t10\nQ2\t007\nQ3\t2\nQ4\t10\textra\n"),
            ("relation2id.txt", "P31\t01\nP17\t0\n"),
            ("train.txt", "7\t0\t10\t3\n"),
            ("valid.txt", ""),
            ("test.txt", ""),
        ],
    );
    let cache = ws.input.parent().unwrap().join("wid2name.txt");
    fs::write(&cache, "Q1\tUniverse\nQ2\tEarth\nQ3\tMoon\nQ4\tSun\nP31\tinstance of\nP17\tcountry\n").unwrap();
    let options = ConvertOptions::new(&ws.input).with_output_dir(&ws.output).with_names_path(&cache);
    let out = run(&ws, options).unwrap();
    assert_files(
        &out,
        &[
            ("entity2id.txt", "Moon\t2\nEarth\t7\nSun\t10\n"),
            ("relation2id.txt", "country\t0\ninstance of\t1\n"),
            ("train.txt", "7\t0\t10\t3\n"),
        ],
    );
}

#[test]
fn wiki_fetches_missing_cache() {
    let ws = wiki();
    let cache = ws.output.join("wid2name.txt");
    fs::create_dir_all(&ws.output).unwrap();
    let source = Fixed(vec![("Q1", "Universe"), ("Q2", "Earth"), ("P31", "instance of")].into_iter().collect());
    let options = ConvertOptions::new(&ws.input).with_output_dir(&ws.output).with_names_path(&cache);
    let summary = convert_with(Dataset::Wiki, &options, &source).unwrap();
    assert_files(&summary.output_dir, WIKI_OUT);
    assert_eq!(fs::read_to_string(&cache).unwrap(), "Q2\tEarth\nQ1\tUniverse\nP31\tinstance of\n");
    assert_eq!(fs::read_to_string(ws.output.join("wid2name.txt.fail")).unwrap(), "");
}

#[test]
fn wiki_missing_label_is_fatal() {
    let ws = wiki();
    let cache = ws.input.parent().unwrap().join("wid2name.txt");
    fs::write(&cache, "Q1\tUniverse\nP31\tinstance of\n").unwrap();
    let options = ConvertOptions::new(&ws.input).with_output_dir(&ws.output).with_names_path(&cache);
    match *run(&ws, options).unwrap_err().kind() {
        ConvertErrorKind::MissingLabel(ref id) => assert_eq!(id, "Q2"),
        ref other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn malformed_line_stops_the_run() {
    let ws = workspace(
        "ICEWS14",
        &[
            ("entity2id.txt", "A\t0\n"),
            ("relation2id.txt", "R\t0\n"),
            ("train.txt", "0\t0\t0\t1\n0\t0\t0\n"),
            ("valid.txt", ""),
            ("test.txt", ""),
        ],
    );
    let err = run(&ws, ConvertOptions::new(&ws.input).with_output_dir(&ws.output)).unwrap_err();
    match *err.kind() {
        ConvertErrorKind::MalformedLine(ref path, line_no, _) => {
            assert!(path.ends_with("train.txt"));
            assert_eq!(line_no, 2);
        }
        ref other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn unknown_directory_name_is_rejected() {
    let ws = workspace("FB15k", &[]);
    let err = run(&ws, ConvertOptions::new(&ws.input)).unwrap_err();
    assert_eq!(err.to_string(), "Unknown dataset: FB15K");
}
