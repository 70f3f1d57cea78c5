//! Common, IO-related code.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use flate2::bufread::MultiGzDecoder;

/// Transparently open a file with gzip decoder.
pub fn open_read_maybe_gz<P>(path: P) -> Result<Box<dyn BufRead>, std::io::Error>
where
    P: AsRef<Path>,
{
    if path.as_ref().extension().map(|s| s.to_str()) == Some(Some("gz")) {
        tracing::trace!("Opening {:?} as gzip for reading", path.as_ref());
        let file = File::open(path)?;
        let bufreader = BufReader::new(file);
        let decoder = MultiGzDecoder::new(bufreader);
        Ok(Box::new(BufReader::new(decoder)))
    } else {
        tracing::trace!("Opening {:?} as plain text for reading", path.as_ref());
        let file = File::open(path)?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Expand `~` and environment variables in a path given on the command line.
pub fn expand_path(path: &str) -> Result<String, anyhow::Error> {
    shellexpand::full(path)
        .map(|expanded| expanded.into_owned())
        .map_err(|e| anyhow::anyhow!("could not expand path {:?}: {}", path, e))
}

/// Build list of paths, reading through files given by `@path`.
///
/// Blank lines and lines starting with `#` in list files are ignored.
pub fn expand_path_list(paths: &[String]) -> Result<Vec<String>, anyhow::Error> {
    let mut result = Vec::new();
    for path in paths {
        if let Some(list_path) = path.strip_prefix('@') {
            let list_path = expand_path(list_path)?;
            let contents = std::fs::read_to_string(&list_path).map_err(|e| {
                anyhow::anyhow!("could not read path list {}: {}", &list_path, e)
            })?;
            for line in contents.lines().map(str::trim) {
                if !line.is_empty() && !line.starts_with('#') {
                    result.push(expand_path(line)?);
                }
            }
        } else {
            result.push(expand_path(path)?);
        }
    }
    Ok(result)
}
