//! Weapons data file loading.
//!
//! The per-game file is an INI-style section list. Each section names a tag
//! and maps basenames to a display name, optionally followed by clip size,
//! reserve ammo and the `silencer` flag for in-place silencer attachments:
//!
//! ```ini
//! [primary]
//! ak47 = AK-47, 30, 90
//!
//! [secondary]
//! usp = USP, 12, 24, silencer
//!
//! [melee]
//! knife = Knife
//! ```

use std::fs;
use std::path::Path;

use super::catalog::WeaponTag;
use super::error::CatalogError;

/// One weapon line of the data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaponEntry {
    pub tag: WeaponTag,
    pub basename: String,
    pub display_name: String,
    pub clip_size: u32,
    pub max_ammo: u32,
    pub silencer_attachment: bool,
}

/// Parse the contents of a weapons file, keeping the file order.
pub fn parse_weapons_ini(contents: &str) -> Result<Vec<WeaponEntry>, CatalogError> {
    let mut entries = Vec::new();
    let mut section: Option<WeaponTag> = None;

    for (i, raw) in contents.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let Some(name) = header.strip_suffix(']') else {
                return Err(CatalogError::ParseError {
                    line: line_no,
                    details: format!("unterminated section header '{}'", line),
                });
            };
            let tag = name
                .parse::<WeaponTag>()
                .map_err(|tag| CatalogError::UnknownTag { tag, line: line_no })?;
            section = Some(tag);
            continue;
        }

        let Some(tag) = section else {
            return Err(CatalogError::EntryOutsideSection { line: line_no });
        };

        entries.push(parse_entry(tag, line, line_no)?);
    }

    Ok(entries)
}

fn parse_entry(tag: WeaponTag, line: &str, line_no: usize) -> Result<WeaponEntry, CatalogError> {
    let parse_error = |details: String| CatalogError::ParseError { line: line_no, details };

    let Some((key, value)) = line.split_once('=') else {
        return Err(parse_error(format!("expected 'basename = display name', got '{}'", line)));
    };

    let basename = key.trim();
    if basename.is_empty() {
        return Err(parse_error("empty weapon basename".to_string()));
    }

    let mut fields = value.split(',').map(str::trim);
    let display_name = fields.next().filter(|name| !name.is_empty()).unwrap_or(basename);

    let mut numbers = Vec::new();
    let mut silencer_attachment = false;
    for field in fields {
        if field.eq_ignore_ascii_case("silencer") {
            silencer_attachment = true;
        } else {
            let number = field
                .parse::<u32>()
                .map_err(|e| parse_error(format!("invalid number '{}': {}", field, e)))?;
            numbers.push(number);
        }
    }

    let (clip_size, max_ammo) = match numbers.as_slice() {
        [] => (0, 0),
        [clip, ammo] => (*clip, *ammo),
        _ => {
            return Err(parse_error(format!(
                "expected clip size and max ammo for '{}'",
                basename
            )))
        }
    };

    Ok(WeaponEntry {
        tag,
        basename: basename.to_string(),
        display_name: display_name.to_string(),
        clip_size,
        max_ammo,
        silencer_attachment,
    })
}

/// Read and parse a weapons file from disk.
pub fn load_weapons_file(path: &Path) -> Result<Vec<WeaponEntry>, CatalogError> {
    let contents = fs::read_to_string(path).map_err(|e| CatalogError::ReadError {
        path: path.display().to_string(),
        details: e.to_string(),
    })?;

    parse_weapons_ini(&contents)
}
