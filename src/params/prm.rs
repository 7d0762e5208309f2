//! Parameter files (`.prm`).
//!
//! One `Name value` pair per line. Blank lines and lines starting with `#`
//! are skipped. Only overrides are written; defaults are implied.

use super::set::{Param, ParamKind, ParamSet, ParamValue};
use crate::engine::error::{EngineError, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Writes the overrides of `params` to `path` in parameter-file format.
///
/// Entries are sorted by parameter name.
pub fn write_params(path: &Path, params: &ParamSet) -> Result<()> {
    let mut entries: Vec<(Param, ParamValue)> = params.overrides().collect();
    entries.sort_by_key(|(p, _)| p.name());

    let mut file = fs::File::create(path).map_err(|e| EngineError::file_io(path, e))?;
    writeln!(file, "# funcopt parameter file").map_err(|e| EngineError::file_io(path, e))?;
    for (param, value) in entries {
        writeln!(file, "{} {}", param.name(), value).map_err(|e| EngineError::file_io(path, e))?;
    }
    Ok(())
}

/// Reads a parameter file back into an override set.
///
/// Unknown parameter names and unparsable values are format errors.
pub fn read_params(path: &Path) -> Result<ParamSet> {
    let text = fs::read_to_string(path).map_err(|e| EngineError::file_io(path, e))?;
    let mut params = ParamSet::new();

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            continue;
        };
        let raw = parts.next().ok_or_else(|| {
            EngineError::file_format(path, format!("line {}: missing value", lineno + 1))
        })?;
        if parts.next().is_some() {
            return Err(EngineError::file_format(
                path,
                format!("line {}: trailing tokens", lineno + 1),
            ));
        }

        let param = Param::from_name(name)
            .ok_or_else(|| EngineError::UnknownParam(name.to_string()))?;
        let value = parse_value(param, raw).ok_or_else(|| {
            EngineError::file_format(
                path,
                format!("line {}: bad value {raw:?} for {name}", lineno + 1),
            )
        })?;
        params.set(param, value)?;
    }
    Ok(params)
}

fn parse_value(param: Param, raw: &str) -> Option<ParamValue> {
    match param.kind() {
        ParamKind::Int => raw.parse::<i64>().ok().map(ParamValue::Int),
        ParamKind::Float => raw.parse::<f64>().ok().map(ParamValue::Float),
    }
}
