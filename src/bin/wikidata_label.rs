extern crate tkgconv;
#[macro_use]
extern crate clap;
#[macro_use]
extern crate tracing;
extern crate tracing_subscriber;

use tkgconv::wikidata::{self, LabelSource, SparqlClient};
use tkgconv::ConvertResult;

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let matches = clap_app!(wikidata_label =>
        (about: "Prints the english label of wikidata ids")
        (@arg endpoint: -e --endpoint +takes_value "Wikidata SPARQL endpoint")
        (@arg ids: +required +multiple "Ids such as Q202735 or P31")
    )
    .get_matches();
    let endpoint = matches.value_of("endpoint").unwrap_or(wikidata::ENDPOINT);
    let ids: Vec<&str> = matches.values_of("ids").map(|v| v.collect()).unwrap_or_default();
    if let Err(e) = run(endpoint, &ids) {
        error!("{}", e);
        ::std::process::exit(1);
    }
}

fn run(endpoint: &str, ids: &[&str]) -> ConvertResult<()> {
    let client = SparqlClient::new(endpoint)?;
    for id in ids {
        match client.fetch_label(id) {
            Ok(label) => println!("{}\t{}", id, label),
            Err(e) => warn!(id, error = %e, "no label"),
        }
    }
    Ok(())
}
