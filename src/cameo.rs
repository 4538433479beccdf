//! CAMEO event codes, used to name GDELT relations.

use std::collections::HashMap;
use std::path;

use serde::Deserialize;

use crate::helpers;
use crate::{ConvertErrorKind, ConvertResult, ConvertResultExt};

/// The `event_code` section of a CAMEO YAML table. Other sections are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CameoTable {
    event_code: HashMap<String, String>,
}

impl CameoTable {
    pub fn load(path: &path::Path) -> ConvertResult<CameoTable> {
        let input = helpers::open(path)?;
        let table: CameoTable = serde_yaml::from_reader(input)
            .chain_err(|| format!("can not parse CAMEO table {}", path.display()))?;
        info!(path = %path.display(), codes = table.len(), "loaded CAMEO table");
        Ok(table)
    }

    pub fn parse(yaml: &str) -> ConvertResult<CameoTable> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn len(&self) -> usize {
        self.event_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.event_code.is_empty()
    }

    pub fn event_name(&self, code: &str) -> ConvertResult<&str> {
        self.event_code
            .get(code)
            .map(|s| s.as_str())
            .ok_or_else(|| ConvertErrorKind::UnknownCameoCode(code.to_string()).into())
    }
}
