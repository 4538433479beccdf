use std::fs;
use std::io;
use std::io::prelude::*;
use std::path;

use crate::records::Line;
use crate::{ConvertResult, ConvertResultExt};

pub const ENTITY_FILE: &str = "entity2id.txt";
pub const RELATION_FILE: &str = "relation2id.txt";
pub const PARTS: [&str; 3] = ["train", "valid", "test"];

pub fn part_file(part: &str) -> String {
    format!("{}.txt", part)
}

pub fn open(path: &path::Path) -> ConvertResult<io::BufReader<fs::File>> {
    let file = fs::File::open(path).chain_err(|| format!("can not open {}", path.display()))?;
    Ok(io::BufReader::new(file))
}

pub fn create(path: &path::Path) -> ConvertResult<io::BufWriter<fs::File>> {
    let file = fs::File::create(path).chain_err(|| format!("can not create {}", path.display()))?;
    Ok(io::BufWriter::new(file))
}

/// Calls `f` on every line of `path`, numbered from 1.
pub fn for_each_line<F>(path: &path::Path, mut f: F) -> ConvertResult<usize>
where
    F: FnMut(&Line) -> ConvertResult<()>,
{
    let name = path.display().to_string();
    let mut count = 0;
    for (i, text) in open(path)?.lines().enumerate() {
        let text = text.chain_err(|| format!("can not read {}", name))?;
        f(&Line::new(&name, i + 1, &text))?;
        count += 1;
    }
    Ok(count)
}

/// One line in, one line out, in input order.
pub fn rewrite_lines<F>(input: &path::Path, output: &path::Path, mut f: F) -> ConvertResult<usize>
where
    F: FnMut(&Line) -> ConvertResult<String>,
{
    let mut out = create(output)?;
    let count = for_each_line(input, |line| {
        let rewritten = f(line)?;
        writeln!(out, "{}", rewritten)?;
        Ok(())
    })?;
    out.flush().chain_err(|| format!("can not write {}", output.display()))?;
    debug!(input = %input.display(), output = %output.display(), lines = count, "rewritten");
    Ok(count)
}

pub fn write_lines<I, T>(output: &path::Path, lines: I) -> ConvertResult<usize>
where
    I: IntoIterator<Item = T>,
    T: ::std::fmt::Display,
{
    let mut out = create(output)?;
    let mut count = 0;
    for line in lines {
        writeln!(out, "{}", line)?;
        count += 1;
    }
    out.flush().chain_err(|| format!("can not write {}", output.display()))?;
    Ok(count)
}

/// `file` with `suffix` appended to its full name, `wid2name.txt` -> `wid2name.txt.fail`.
pub fn with_suffix(file: &path::Path, suffix: &str) -> path::PathBuf {
    let mut name = file.as_os_str().to_owned();
    name.push(suffix);
    path::PathBuf::from(name)
}
