//! Text parser turning SWC source into a [`SampleTable`].
//!
//! The format is line oriented: a leading block of `#` comments, then one
//! sample per line with seven single-space separated fields. Every field is
//! numeric, including ids and type codes, so the numeric grammar has to be
//! as permissive as the files found in the wild (signs, exponents, `inf`,
//! `nan`).

use nom::{combinator::all_consuming, number::complete::double};

use crate::error::FormatError;
use crate::sample::{CompartmentKind, Sample, SampleTable};
use crate::Point3;

const FIELD_COUNT: usize = 7;

/// Names of the seven mandatory fields, in file order.
const FIELD_NAMES: [&str; FIELD_COUNT] = ["id", "type", "x", "y", "z", "radius", "parent"];

/// Parses a whole SWC file.
///
/// Comments are only recognized at the top of the file; from the first
/// data line on, every line must be a sample. The table keeps samples in
/// file order, and a duplicated id overwrites the earlier sample without
/// moving it.
pub fn parse(text: &str) -> Result<SampleTable, FormatError> {
    let mut table = SampleTable::new();
    let mut in_header = true;

    for (index, line) in text.lines().enumerate() {
        if in_header && line.starts_with('#') {
            continue;
        }
        in_header = false;
        table.insert(parse_line(index + 1, line)?);
    }

    if table.is_empty() {
        return Err(FormatError::Empty);
    }
    Ok(table)
}

fn parse_line(line: usize, text: &str) -> Result<Sample, FormatError> {
    let fields: Vec<&str> = text.trim().split(' ').collect();
    if fields.len() < FIELD_COUNT {
        return Err(FormatError::MissingFields {
            line,
            found: fields.len(),
        });
    }

    // Fields past the seventh are ignored, matching other SWC readers.
    let mut values = [0.0_f64; FIELD_COUNT];
    for (i, value) in values.iter_mut().enumerate() {
        *value = number(fields[i]).ok_or_else(|| FormatError::InvalidNumber {
            line,
            field: FIELD_NAMES[i],
            token: fields[i].to_string(),
        })?;
    }
    let [id, kind, x, y, z, radius, parent] = values;

    Ok(Sample {
        id: id as i64,
        kind: CompartmentKind::from_code(kind as i64),
        position: Point3::new(x, y, z),
        radius,
        parent: parent as i64,
    })
}

/// Parses one field as a float, accepting the full lenient grammar.
fn number(token: &str) -> Option<f64> {
    all_consuming(double::<_, nom::error::Error<&str>>)(token)
        .ok()
        .map(|(_, value)| value)
}
