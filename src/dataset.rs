use std::fmt;
use std::path;
use std::str::FromStr;

use crate::{ConvertError, ConvertErrorKind, ConvertResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Icews14,
    Icews18,
    Icews0515,
    Gdelt,
    Yago,
    Wiki,
}

impl Dataset {
    pub const ALL: [Dataset; 6] = [
        Dataset::Icews14,
        Dataset::Icews18,
        Dataset::Icews0515,
        Dataset::Gdelt,
        Dataset::Yago,
        Dataset::Wiki,
    ];

    pub fn name(&self) -> &'static str {
        match *self {
            Dataset::Icews14 => "ICEWS14",
            Dataset::Icews18 => "ICEWS18",
            Dataset::Icews0515 => "ICEWS05-15",
            Dataset::Gdelt => "GDELT",
            Dataset::Yago => "YAGO",
            Dataset::Wiki => "WIKI",
        }
    }

    /// Infers the dataset from the last component of its source directory.
    /// `ICEWS14s` is the RE-GCN spelling of ICEWS14.
    pub fn guess(input_dir: &path::Path) -> ConvertResult<Dataset> {
        let dir_name = input_dir.file_name().and_then(|n| n.to_str()).unwrap_or("");
        match dir_name {
            "ICEWS14" | "ICEWS14s" => Ok(Dataset::Icews14),
            other => other.parse(),
        }
    }

    /// An explicit name wins over the guess from `input_dir`.
    pub fn resolve(explicit: Option<&str>, input_dir: &path::Path) -> ConvertResult<Dataset> {
        match explicit {
            Some(name) => name.parse(),
            None => Dataset::guess(input_dir),
        }
    }
}

impl FromStr for Dataset {
    type Err = ConvertError;

    fn from_str(s: &str) -> ConvertResult<Dataset> {
        let upper = s.to_uppercase();
        Dataset::ALL
            .iter()
            .find(|d| d.name() == upper)
            .cloned()
            .ok_or_else(|| ConvertErrorKind::UnknownDataset(upper).into())
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
