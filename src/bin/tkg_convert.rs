extern crate tkgconv;
#[macro_use]
extern crate clap;
#[macro_use]
extern crate tracing;
extern crate tracing_subscriber;

use std::path;

use tkgconv::wikidata;
use tkgconv::{ConvertOptions, ConvertResult, Dataset};

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let matches = clap_app!(tkg_convert =>
        (about: "Converts a temporal knowledge graph dataset to the standard TSV layout")
        (@arg input_dir: --input_dir +takes_value +required "Source dataset directory")
        (@arg output_dir: --output_dir +takes_value "Output root, files go to <output_dir>/<DATASET> [default: .]")
        (@arg dataset: --dataset +takes_value
            "ICEWS14, ICEWS18, ICEWS05-15, GDELT, YAGO or WIKI, guessed from input_dir if absent")
        (@arg cameo_path: --cameo_path +takes_value "CAMEO code table for GDELT [default: cameo.yaml]")
        (@arg names_path: --names_path +takes_value "Wikidata label cache for WIKI [default: ./wid2name.txt]")
        (@arg endpoint: --endpoint +takes_value "Wikidata SPARQL endpoint")
    )
    .get_matches();

    let input_dir = path::Path::new(matches.value_of("input_dir").unwrap_or("."));
    let options = ConvertOptions::new(input_dir)
        .with_output_dir(matches.value_of("output_dir").unwrap_or("."))
        .with_cameo_path(matches.value_of("cameo_path").unwrap_or("cameo.yaml"))
        .with_names_path(matches.value_of("names_path").unwrap_or("./wid2name.txt"))
        .with_endpoint(matches.value_of("endpoint").unwrap_or(wikidata::ENDPOINT));

    if let Err(e) = run(matches.value_of("dataset"), &options) {
        error!("{}", e);
        for cause in e.iter().skip(1) {
            error!("caused by: {}", cause);
        }
        ::std::process::exit(1);
    }
}

fn run(dataset: Option<&str>, options: &ConvertOptions) -> ConvertResult<()> {
    let dataset = Dataset::resolve(dataset, &options.input_dir)?;
    info!(%dataset, input = %options.input_dir.display(), "converting");
    let summary = tkgconv::convert(dataset, options)?;
    info!("{}", summary);
    Ok(())
}
