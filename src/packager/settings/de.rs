//! Lenient field deserializers for the service descriptor.
//!
//! A descriptor is written by hand and often carries values this tool does
//! not understand (unresolved `${...}` variables, CloudFormation tags, numbers
//! where strings are expected). A field with the wrong shape reads as absent
//! so the accessor's default applies, instead of failing the whole parse.

use serde::{Deserialize, Deserializer, de::DeserializeOwned};

/// Deserializes `T`, or `None` if the value does not have the expected shape.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    Ok(serde_yaml::from_value(value).ok())
}

/// Like [`lenient`], falling back to `T::default()`.
pub(crate) fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// Reads a scalar as a string; numbers keep their YAML spelling.
///
/// `version: 5` and `version: 4.16` are numbers in YAML but pins to the user.
/// Non-scalar values read as absent.
pub(crate) fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Keeps a non-null value as written, for fields that must be validated
/// later instead of being defaulted.
pub(crate) fn raw<'de, D>(deserializer: D) -> Result<Option<serde_yaml::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::Null => None,
        value => Some(value),
    })
}

/// Records that a key is present, whatever its value (including `null`).
///
/// Use together with `#[serde(default)]` so a missing key stays `None`.
pub(crate) fn present<'de, D>(deserializer: D) -> Result<Option<serde_yaml::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_yaml::Value::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize, Default)]
    #[serde(default)]
    struct Fields {
        #[serde(deserialize_with = "super::scalar_string")]
        pin: Option<String>,
        #[serde(deserialize_with = "super::raw")]
        value: Option<serde_yaml::Value>,
    }

    fn read(yaml: &str) -> Fields {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn numbers_read_as_their_spelling() {
        assert_eq!(read("pin: 5").pin.as_deref(), Some("5"));
        assert_eq!(read("pin: 4.16").pin.as_deref(), Some("4.16"));
        assert_eq!(read("pin: 5.0.0").pin.as_deref(), Some("5.0.0"));
        assert_eq!(read("pin: [5]").pin, None);
    }

    #[test]
    fn raw_keeps_everything_but_null() {
        assert_eq!(read("value: ~").value, None);
        assert!(read("value: [arm64]").value.unwrap().is_sequence());
    }
}
