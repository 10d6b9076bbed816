use serde::{Deserialize, Deserializer};

/// Treats a missing, empty or whitespace-only query value as absent.
///
/// `?search=&student_class=` from a cleared filter form means "no filter".
pub fn deserialize_optional_trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| {
        let trimmed = s.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }))
}

/// Keeps an explicit `null` apart from a missing field.
///
/// Use with `#[serde(default)]`: a missing field stays `None`, `null`
/// becomes `Some(None)` and a value becomes `Some(Some(v))`.
pub fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Filter {
        #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
        search: Option<String>,
    }

    #[test]
    fn test_empty_value_is_none() {
        let f: Filter = serde_json::from_str(r#"{"search": "   "}"#).unwrap();
        assert_eq!(f.search, None);
        let f: Filter = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(f.search, None);
    }

    #[test]
    fn test_value_is_trimmed() {
        let f: Filter = serde_json::from_str(r#"{"search": " ada "}"#).unwrap();
        assert_eq!(f.search.as_deref(), Some("ada"));
    }

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_nullable")]
        link: Option<Option<String>>,
    }

    #[test]
    fn test_null_differs_from_missing() {
        let p: Patch = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(p.link, None);
        let p: Patch = serde_json::from_str(r#"{"link": null}"#).unwrap();
        assert_eq!(p.link, Some(None));
        let p: Patch = serde_json::from_str(r#"{"link": "https://a.example"}"#).unwrap();
        assert_eq!(p.link, Some(Some("https://a.example".to_string())));
    }
}
