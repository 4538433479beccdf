#![recursion_limit = "1024"]

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate tracing;

extern crate itertools;
extern crate reqwest;
extern crate serde;
extern crate serde_json;
extern crate serde_yaml;

pub mod cameo;
pub mod convert;
pub mod dataset;
pub mod helpers;
pub mod normalize;
pub mod records;
pub mod wikidata;

pub use convert::{convert, ConversionSummary, ConvertOptions};
pub use dataset::Dataset;

error_chain! {
    types { ConvertError, ConvertErrorKind, ConvertResultExt, ConvertResult; }
    foreign_links {
        Io(::std::io::Error);
        ParseInt(::std::num::ParseIntError);
        Http(::reqwest::Error);
        Json(::serde_json::Error);
        Yaml(::serde_yaml::Error);
    }
    errors {
        UnknownDataset(name: String) {
            description("unknown dataset")
            display("Unknown dataset: {}", name)
        }
        MalformedLine(path: String, line_no: usize, line: String) {
            description("malformed input line")
            display("{}:{}: malformed line {:?}", path, line_no, line)
        }
        UnknownCameoCode(code: String) {
            description("unknown CAMEO event code")
            display("unknown CAMEO event code {:?}", code)
        }
        MissingLabel(id: String) {
            description("no label for wikidata id")
            display("no label known for {}", id)
        }
        NoLabel(id: String) {
            description("endpoint returned no label")
            display("endpoint returned no english label for {}", id)
        }
    }
}
