use std::cmp;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

const MAX_FILE_STEM_LEN: usize = 64;

pub fn mkdirp<P>(path: &P) -> Result<()>
where
    P: AsRef<Path>,
{
    fs::create_dir_all(path.as_ref()).map_err(|inner| Error::AccessError {
        inner,
        path: path.as_ref().to_owned(),
    })?;
    Ok(())
}

fn truncate_to_character_boundary(s: &mut String, max_len: usize) {
    let mut boundary = cmp::min(max_len, s.len());
    while !s.is_char_boundary(boundary) {
        boundary -= 1;
    }
    s.truncate(boundary);
}

/// Turns a column header into something usable as a file stem
pub fn make_filename_safe(string: &str) -> String {
    let mut string = string.replace(
        &['?', '"', '/', '\\', '*', '<', '>', ':', '|', '^', '.'][..],
        "_",
    );

    truncate_to_character_boundary(&mut string, MAX_FILE_STEM_LEN);

    let string = string.trim();
    if string.is_empty() {
        String::from("column")
    } else {
        string.to_owned()
    }
}
