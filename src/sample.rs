//! Sampled-configuration decoding
//!
//! SPLConqueror prints each sampled configuration as one log line whose
//! quoted payload lists the selected options separated by `%;%`:
//!
//! ```text
//! config1="compression%;%cache_size;64%;%"
//! ```
//!
//! Binary options appear as their bare name, numeric options as
//! `name;value` tokens. [`decode_samples`] recovers the token lists;
//! [`to_vector`] projects a token list onto a fixed set of known options,
//! yielding a [`Configuration`] ready for
//! [`InfluenceModel::predict`](crate::influence::InfluenceModel::predict).

use crate::error::{Error, Result};
use crate::influence::Configuration;

/// Token separator inside a printed configuration payload
const SEPARATOR: &str = "%;%";

/// Decode one printed configuration line into its option tokens
///
/// The payload is the content between the line's first and second `"`;
/// empty tokens are dropped. A line without a quoted payload fails with
/// [`Error::MalformedLog`].
pub fn decode_sample(line: &str) -> Result<Vec<String>> {
    let payload = line
        .split('"')
        .nth(1)
        .ok_or_else(|| Error::MalformedLog(format!("sample line has no quoted payload: `{}`", line)))?;
    Ok(payload
        .split(SEPARATOR)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect())
}

/// Decode every non-blank line of a sampled-configurations log
pub fn decode_samples(log: &str) -> Result<Vec<Vec<String>>> {
    log.lines()
        .filter(|line| !line.trim().is_empty())
        .map(decode_sample)
        .collect()
}

/// Project decoded tokens onto known binary and numeric options
///
/// Every binary option maps to 1.0 when its name appears verbatim among
/// the tokens, 0.0 otherwise. A numeric option maps to the float parsed
/// from the first token beginning with its name, after that token's first
/// `;`; when no token matches, the option is omitted rather than zeroed —
/// numeric presence is sparse while binary presence is total.
pub fn to_vector(tokens: &[String], binary: &[String], numeric: &[String]) -> Result<Configuration> {
    let mut vector = Configuration::new();

    for option in binary {
        let selected = tokens.iter().any(|token| token == option);
        vector.insert(option.clone(), if selected { 1.0 } else { 0.0 });
    }

    for option in numeric {
        let Some(token) = tokens.iter().find(|token| token.starts_with(option.as_str())) else {
            continue;
        };
        let value = token.splitn(2, ';').nth(1).ok_or_else(|| {
            Error::MalformedLog(format!("numeric token has no value: `{}`", token))
        })?;
        let value: f64 = value.parse().map_err(|_| {
            Error::MalformedLog(format!("invalid numeric token value: `{}`", token))
        })?;
        vector.insert(option.clone(), value);
    }

    Ok(vector)
}

/// Project a batch of decoded samples, one [`Configuration`] per sample
pub fn project_samples(
    samples: &[Vec<String>],
    binary: &[String],
    numeric: &[String],
) -> Result<Vec<Configuration>> {
    samples
        .iter()
        .map(|tokens| to_vector(tokens, binary, numeric))
        .collect()
}
