extern crate tkgconv;
#[macro_use]
extern crate clap;
#[macro_use]
extern crate tracing;
extern crate tracing_subscriber;

use std::path;

use tkgconv::wikidata::{self, SparqlClient};
use tkgconv::ConvertResult;

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let matches = clap_app!(wikidata_names =>
        (about: "Builds the wikidata label cache for a WIKI dataset")
        (@arg input_dir: --input_dir +takes_value +required "WIKI dataset directory")
        (@arg names_path: --names_path +takes_value "Cache file to write [default: ./wid2name.txt]")
        (@arg endpoint: --endpoint +takes_value "Wikidata SPARQL endpoint")
    )
    .get_matches();
    let input_dir = path::Path::new(matches.value_of("input_dir").unwrap_or("."));
    let names_path = path::Path::new(matches.value_of("names_path").unwrap_or("./wid2name.txt"));
    let endpoint = matches.value_of("endpoint").unwrap_or(wikidata::ENDPOINT);
    if let Err(e) = run(input_dir, names_path, endpoint) {
        error!("{}", e);
        for cause in e.iter().skip(1) {
            error!("caused by: {}", cause);
        }
        ::std::process::exit(1);
    }
}

fn run(input_dir: &path::Path, names_path: &path::Path, endpoint: &str) -> ConvertResult<()> {
    if names_path.exists() {
        info!(cache = %names_path.display(), "cache already present, nothing to do");
        return Ok(());
    }
    let client = SparqlClient::new(endpoint)?;
    let cache = wikidata::Wikidata::load_or_fetch(input_dir, names_path, &client)?;
    info!(labels = cache.len(), cache = %names_path.display(), "done");
    Ok(())
}
