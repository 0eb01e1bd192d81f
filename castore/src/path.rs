//! Parsing of the `/`-separated paths used to address entries below a root tree.
use crate::objects::is_valid_name;
use crate::Error;

pub const SEPARATOR: char = '/';

/// Splits a path into its components.
/// Every component must be usable as a tree entry name, so empty components
/// (leading, trailing or doubled separators), `.` and `..` are rejected.
pub fn components(path: &str) -> Result<Vec<&str>, Error> {
    if path.is_empty() {
        return Err(Error::invalid_path(path, "path is empty"));
    }

    path.split(SEPARATOR)
        .map(|component| {
            if is_valid_name(component) {
                Ok(component)
            } else {
                Err(Error::invalid_path(
                    path,
                    format!("invalid component {:?}", component),
                ))
            }
        })
        .collect()
}

/// Appends a component to a path prefix. An empty prefix denotes the root.
pub fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}{}{}", prefix, SEPARATOR, name)
    }
}
